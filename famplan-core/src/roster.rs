//! Family members and passcode login.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// A family member who can log in and own events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    /// Color tag copied onto the member's events
    pub color: String,
    #[serde(skip_serializing_if = "String::is_empty", default, alias = "password")]
    pub passcode: String,
}

impl FamilyMember {
    /// Copy of the member that is safe to hand out (no passcode).
    pub fn public(&self) -> FamilyMember {
        FamilyMember {
            passcode: String::new(),
            ..self.clone()
        }
    }
}

/// The fixed set of people in the family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<FamilyMember>,
}

impl Default for Roster {
    fn default() -> Self {
        let member = |id: &str, name: &str, avatar: &str, color: &str, passcode: &str| FamilyMember {
            id: id.to_string(),
            name: name.to_string(),
            avatar: avatar.to_string(),
            color: color.to_string(),
            passcode: passcode.to_string(),
        };

        Roster {
            members: vec![
                member("kid", "나", "👧", "bg-emerald-400", "333"),
                member("mom", "엄마", "👩", "bg-indigo-400", "222"),
                member("dad", "아빠", "👨", "bg-rose-400", "1212"),
            ],
        }
    }
}

impl Roster {
    pub fn new(members: Vec<FamilyMember>) -> Self {
        Roster { members }
    }

    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    pub fn get(&self, member_id: &str) -> Option<&FamilyMember> {
        self.members.iter().find(|m| m.id == member_id)
    }

    /// Log in with a passcode alone; the first member it belongs to wins.
    pub fn login(&self, passcode: &str) -> PlannerResult<&FamilyMember> {
        if passcode.is_empty() {
            return Err(PlannerError::InvalidPasscode);
        }
        self.members
            .iter()
            .find(|m| m.passcode == passcode)
            .ok_or(PlannerError::InvalidPasscode)
    }

    /// Log in as a specific member.
    pub fn login_as(&self, member_id: &str, passcode: &str) -> PlannerResult<&FamilyMember> {
        self.get(member_id)
            .filter(|m| !passcode.is_empty() && m.passcode == passcode)
            .ok_or(PlannerError::InvalidPasscode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_by_passcode() {
        let roster = Roster::default();

        assert_eq!(roster.login("222").unwrap().id, "mom");
        assert_eq!(roster.login("1212").unwrap().id, "dad");
        assert!(matches!(roster.login("0000"), Err(PlannerError::InvalidPasscode)));
        assert!(roster.login("").is_err());
    }

    #[test]
    fn test_login_as_checks_the_named_member() {
        let roster = Roster::default();

        assert_eq!(roster.login_as("kid", "333").unwrap().name, "나");
        assert!(roster.login_as("kid", "222").is_err());
        assert!(roster.login_as("grandma", "333").is_err());
    }

    #[test]
    fn test_public_copy_hides_passcode() {
        let roster = Roster::default();
        let public = roster.get("dad").unwrap().public();

        let value = serde_json::to_value(&public).unwrap();
        assert!(value.get("passcode").is_none());
        assert_eq!(value["color"], "bg-rose-400");
    }

    #[test]
    fn test_reads_password_field() {
        let json = r#"[{"id":"kid","name":"Kid","avatar":"🧒","color":"bg-emerald-400","password":"333"}]"#;
        let roster: Roster = serde_json::from_str(json).unwrap();

        assert_eq!(roster.login("333").unwrap().id, "kid");
    }
}
