mod backend;
mod client;
mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use famplan_core::TimeOfDay;
use famplan_core::config::{Backend, PlannerConfig};
use famplan_core::event::today;
use famplan_core::grid::first_of_month;
use famplan_core::view::ViewMode;
use tracing_subscriber::EnvFilter;

use crate::backend::Planner;
use crate::commands::event::EventEdit;
use crate::commands::{DEFAULT_AGENDA_DAYS, parse_date_arg, parse_month_arg};

#[derive(Parser)]
#[command(name = "famplan")]
#[command(about = "Family planner: month views and shared events for the whole family")]
struct Cli {
    /// Where events are kept: "file" or "http" (defaults to the config)
    #[arg(long, global = true)]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with your passcode
    Login {
        passcode: String,

        /// Log in as this family member (by id)
        #[arg(short, long)]
        member: Option<String>,
    },
    /// Forget the current login
    Logout,
    /// Show who is logged in
    Whoami,
    /// List family members
    Members,
    /// Show month views
    Month {
        /// Month to start at (YYYY-MM, defaults to the current month)
        month: Option<String>,

        /// Number of months to show
        #[arg(short = 'n', long, default_value_t = 1)]
        months: usize,

        /// Layout: "grid" or "list"
        #[arg(short, long, default_value_t = ViewMode::Grid)]
        view: ViewMode,
    },
    /// List upcoming events day by day
    Agenda {
        /// First day to show (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        from: Option<String>,

        /// Number of days to show
        #[arg(short, long, default_value_t = DEFAULT_AGENDA_DAYS)]
        days: i64,
    },
    /// Add an event
    Add {
        title: String,

        /// Day of the event (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Time of day (HH:MM, 24-hour). Omit for an all-day event
        #[arg(short, long)]
        time: Option<TimeOfDay>,

        /// Use this id instead of a generated one
        #[arg(long)]
        id: Option<String>,
    },
    /// Change an event
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// New day (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// New time (HH:MM, 24-hour)
        #[arg(short, long, conflicts_with = "no_time")]
        time: Option<TimeOfDay>,

        /// Make the event all-day
        #[arg(long)]
        no_time: bool,
    },
    /// Delete an event
    Rm { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PlannerConfig::load()?;
    config.apply_time_zone()?;
    let planner = Planner::open(config, cli.backend)?;
    let today = today();

    match cli.command {
        Commands::Login { passcode, member } => {
            commands::login::login(&planner, &passcode, member.as_deref()).await
        }
        Commands::Logout => commands::login::logout(&planner),
        Commands::Whoami => commands::login::whoami(&planner),
        Commands::Members => commands::login::members(&planner).await,
        Commands::Month {
            month,
            months,
            view,
        } => {
            let start = match month {
                Some(m) => parse_month_arg(&m)?,
                None => first_of_month(today),
            };
            commands::month::run(&planner, start, months, view, today).await
        }
        Commands::Agenda { from, days } => {
            let from = match from {
                Some(s) => parse_date_arg(&s)?,
                None => today,
            };
            commands::agenda::run(&planner, from, days, today).await
        }
        Commands::Add {
            title,
            date,
            time,
            id,
        } => {
            let date = parse_date_arg(&date)?;
            commands::event::add(&planner, title, date, time, id).await
        }
        Commands::Edit {
            id,
            title,
            date,
            time,
            no_time,
        } => {
            let changes = EventEdit {
                title,
                date: date.as_deref().map(parse_date_arg).transpose()?,
                time,
                clear_time: no_time,
            };
            commands::event::edit(&planner, &id, changes).await
        }
        Commands::Rm { id } => commands::event::remove(&planner, &id).await,
    }
}
