//! Command-line management of check-in reminders.
//!
//! Preferences are kept in the client state file; triggers are written to a
//! JSON trigger table for the local notification agent.

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reminders::{
    weekday_name, ClientStateStore, FileNotificationCenter, NotificationCenter,
    NotificationPreferences, ReminderScheduler, ScheduleOutcome, TimeOfDay,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Parser)]
#[command(name = "gr8life-reminders")]
#[command(about = "Manage gr8life check-in reminders")]
struct Args {
    /// Client state file (default: $GR8LIFE_STATE_PATH or ./data/client-state.json)
    #[arg(long)]
    state: Option<PathBuf>,
    /// Trigger table file (default: $GR8LIFE_TRIGGERS_PATH or ./data/triggers.json)
    #[arg(long)]
    triggers: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print preferences and registered triggers.
    Show,
    /// Set the reminder time (HH:MM) and reschedule.
    SetTime { time: TimeOfDay },
    /// Select or deselect a weekday (0 = Sunday) and reschedule.
    ToggleDay { day: u8 },
    /// Replace the selected weekdays, e.g. `1,3,5`, and reschedule. Empty clears.
    SetDays {
        #[arg(value_delimiter = ',')]
        days: Vec<u8>,
    },
    /// Turn reminders on and schedule them.
    Enable,
    /// Turn reminders off and cancel them.
    Disable,
    /// Register triggers matching the saved preferences.
    Apply,
    /// Cancel all triggers without changing preferences.
    Cancel,
    /// Mark onboarding as finished.
    OnboardingComplete,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    let state_path = args
        .state
        .or_else(|| env::var("GR8LIFE_STATE_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./data/client-state.json"));
    let triggers_path = args
        .triggers
        .or_else(|| env::var("GR8LIFE_TRIGGERS_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./data/triggers.json"));

    let mut store = ClientStateStore::load(&state_path).await?;
    let scheduler = ReminderScheduler::new(FileNotificationCenter::new(&triggers_path));

    match args.command {
        Command::Show => {
            print_preferences(&store.state().notifications);
            println!("onboarding finished: {}", store.state().has_finished_onboarding);
            for line in pending_lines(scheduler.center()).await? {
                println!("{}", line);
            }
            return Ok(());
        }
        Command::SetTime { time } => store.state_mut().notifications.set_time(time),
        Command::ToggleDay { day } => store.state_mut().notifications.toggle_day(day)?,
        Command::SetDays { days } => store.state_mut().notifications.set_days(days)?,
        Command::Enable => store.state_mut().notifications.enabled = true,
        Command::Disable => store.state_mut().notifications.enabled = false,
        Command::Apply => {}
        Command::Cancel => {
            scheduler.cancel().await;
            println!("cancelled all reminders");
            return Ok(());
        }
        Command::OnboardingComplete => {
            store.state_mut().has_finished_onboarding = true;
            store.save().await?;
            println!("onboarding complete");
            return Ok(());
        }
    }

    store.save().await?;
    let outcome = scheduler.apply(&store.state().notifications).await;
    info!(
        registered = outcome.registered.len(),
        failed = outcome.failed.len(),
        "Reminders applied"
    );
    print_preferences(&store.state().notifications);
    print_outcome(&outcome);

    Ok(())
}

async fn pending_lines<C: NotificationCenter>(center: &C) -> reminders::Result<Vec<String>> {
    Ok(center
        .pending()
        .await?
        .into_iter()
        .map(|trigger| {
            format!(
                "trigger {} at {} ({:?})",
                trigger.id, trigger.timestamp_millis, trigger.repeat
            )
        })
        .collect())
}

fn print_preferences(prefs: &NotificationPreferences) {
    let days: Vec<&str> = prefs.days().iter().map(|&d| weekday_name(d)).collect();
    println!(
        "reminders {} at {} on [{}]",
        if prefs.enabled { "enabled" } else { "disabled" },
        prefs.time,
        days.join(", ")
    );
}

fn print_outcome(outcome: &ScheduleOutcome) {
    if let Some(permission) = outcome.permission {
        println!("permission: {:?}", permission);
    }
    for trigger in &outcome.registered {
        println!("registered {} at {}", trigger.id, trigger.fires_at_millis);
    }
    for id in &outcome.failed {
        println!("failed {}", id);
    }
}
