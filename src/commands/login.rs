use anyhow::Result;
use chrono::Utc;
use famplan_core::config::Backend;
use famplan_core::roster::FamilyMember;
use famplan_core::session::Session;
use owo_colors::OwoColorize;

use crate::backend::Planner;
use crate::client::HttpStore;

pub async fn login(planner: &Planner, passcode: &str, member_id: Option<&str>) -> Result<()> {
    let session = match planner.backend {
        // The server owns the roster when events live there
        Backend::Http => {
            HttpStore::new(&planner.config.server_url)?
                .login(member_id, passcode)
                .await?
        }
        Backend::File => {
            let roster = planner.config.roster();
            let member = match member_id {
                Some(id) => roster.login_as(id, passcode)?,
                None => roster.login(passcode)?,
            };
            Session::start(member, Utc::now(), planner.config.session_timeout()?)
        }
    };

    planner.session_file().save(&session)?;

    println!("{} Logged in as {}", "✓".green(), render_member(&session.member));
    if let Some(expires_at) = session.expires_at {
        let local = expires_at.with_timezone(&chrono::Local);
        println!("  {}", format!("Session expires at {}", local.format("%H:%M")).dimmed());
    }

    Ok(())
}

pub fn logout(planner: &Planner) -> Result<()> {
    planner.session_file().clear()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(planner: &Planner) -> Result<()> {
    match planner.session()? {
        Some(session) => println!("{}", render_member(&session.member)),
        None => println!("{}", "Not logged in".dimmed()),
    }
    Ok(())
}

/// The family as seen by the backend in use: the server's roster over
/// http, the configured one otherwise.
async fn roster_members(planner: &Planner) -> Result<Vec<FamilyMember>> {
    match planner.backend {
        Backend::Http => Ok(HttpStore::new(&planner.config.server_url)?.members().await?),
        Backend::File => Ok(planner.config.roster().members().to_vec()),
    }
}

pub async fn members(planner: &Planner) -> Result<()> {
    for member in roster_members(planner).await? {
        println!("{} {}", render_member(&member), format!("({})", member.id).dimmed());
    }
    Ok(())
}

fn render_member(member: &FamilyMember) -> String {
    if member.avatar.is_empty() {
        member.name.bold().to_string()
    } else {
        format!("{} {}", member.avatar, member.name.bold())
    }
}
