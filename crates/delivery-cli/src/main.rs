//! `daysoff` CLI — manage delivery-date rules and check dates against them.
//!
//! ## Usage
//!
//! ```sh
//! # Show the stored settings (defaults if the file does not exist yet)
//! daysoff settings show
//!
//! # Three days lead time, no deliveries on Mondays or at weekends
//! daysoff settings set --minimum-days 3 --disable mon --auto-weekend
//!
//! # Block a single date
//! daysoff dayoff add 2024-12-25 --reason "Christmas"
//! daysoff dayoff list
//! daysoff dayoff remove 2024-12-25
//!
//! # Earliest selectable date and date-picker hints, as of a given day
//! daysoff --today 2024-06-07 earliest
//! daysoff --today 2024-06-07 hints
//!
//! # Run the checkout decision list on a date (non-zero exit when refused)
//! daysoff --today 2024-06-07 check 2024-06-10
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod store;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use delivery_engine::weekday::{weekday_from_index, weekday_name, SUNDAY_FIRST};
use delivery_engine::{
    AdminService, CheckoutService, DeliveryDateNotice, Role, SettingsForm, WeekdaySet,
};
use tracing_subscriber::EnvFilter;

use crate::store::JsonFileSettings;

#[derive(Parser)]
#[command(
    name = "daysoff",
    version,
    about = "Delivery-date rules: excluded weekdays, day-offs and lead time"
)]
struct Cli {
    /// Settings file (created on first write)
    #[arg(long, global = true, default_value = "delivery-settings.json")]
    settings: String,

    /// Evaluate as if today were this date (YYYY-MM-DD); defaults to the local date
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or replace the delivery settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Manage explicitly blocked dates
    Dayoff {
        #[command(subcommand)]
        action: DayoffAction,
    },
    /// Check whether a date can be chosen for delivery
    Check {
        /// Candidate date (YYYY-MM-DD)
        date: String,
    },
    /// Print the earliest selectable delivery date
    Earliest,
    /// Print the date-picker hints for the checkout page as JSON
    Hints,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the stored settings as JSON
    Show,
    /// Replace lead time and weekday rules; day-offs are kept
    Set {
        /// Lead time, in available days
        #[arg(long, default_value_t = 2)]
        minimum_days: u32,
        /// Comma-separated weekdays without delivery (e.g. "sun,wed" or "0,3")
        #[arg(long, value_delimiter = ',')]
        disable: Vec<String>,
        /// Exclude exactly Saturday and Sunday, ignoring --disable
        #[arg(long)]
        auto_weekend: bool,
    },
}

#[derive(Subcommand)]
enum DayoffAction {
    /// Block a date
    Add {
        /// Date to block (YYYY-MM-DD)
        date: String,
        /// Optional note shown to admins
        #[arg(long)]
        reason: Option<String>,
    },
    /// Unblock a date (no-op if it is not blocked)
    Remove {
        /// Date to unblock (YYYY-MM-DD)
        date: String,
    },
    /// List blocked dates, earliest first
    List,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let store = JsonFileSettings::new(&cli.settings);
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Commands::Settings { action } => run_settings(&store, action)?,
        Commands::Dayoff { action } => run_dayoff(&store, action)?,
        Commands::Check { date } => {
            let checkout = CheckoutService::new(&store);
            let accepted = checkout.validate(&date, today)?;
            let notice = DeliveryDateNotice { date: accepted };
            println!("{} is available for delivery ({})", accepted, notice.formatted());
        }
        Commands::Earliest => {
            let hints = CheckoutService::new(&store).hints(today)?;
            match hints.min_date {
                Some(date) => println!("{}", date),
                None if hints.disabled_days.is_full() => {
                    anyhow::bail!("No deliverable date: every weekday is excluded")
                }
                None => anyhow::bail!("No deliverable date within the supported calendar range"),
            }
        }
        Commands::Hints => {
            let hints = CheckoutService::new(&store).hints(today)?;
            println!("{}", serde_json::to_string_pretty(&hints)?);
        }
    }

    Ok(())
}

fn run_settings(store: &JsonFileSettings, action: SettingsAction) -> Result<()> {
    let admin = AdminService::new(store);
    match action {
        SettingsAction::Show => {
            let settings = admin.settings()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Set {
            minimum_days,
            disable,
            auto_weekend,
        } => {
            let form = SettingsForm {
                minimum_days,
                disabled_weekdays: parse_weekdays(&disable)?,
                auto_weekend_disable: auto_weekend,
            };
            let settings = admin
                .update_settings(Role::Administrator, &form)
                .context("Failed to save settings")?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}

fn run_dayoff(store: &JsonFileSettings, action: DayoffAction) -> Result<()> {
    let admin = AdminService::new(store);
    match action {
        DayoffAction::Add { date, reason } => {
            let added = admin.add_exclusion(Role::Administrator, &date, reason.as_deref())?;
            println!(
                "Added day-off: {} ({})",
                added.formatted_date, added.day_name
            );
        }
        DayoffAction::Remove { date } => {
            admin.remove_exclusion(Role::Administrator, &date)?;
            println!("Removed day-off: {}", date.trim());
        }
        DayoffAction::List => {
            let day_offs = admin.list_exclusions()?;
            if day_offs.is_empty() {
                println!("No day-offs configured.");
            }
            for day_off in day_offs {
                let name = weekday_name(&day_off.date.weekday());
                match &day_off.reason {
                    Some(reason) => println!("{}  {:<9}  {}", day_off.date, name, reason),
                    None => println!("{}  {}", day_off.date, name),
                }
            }
        }
    }
    Ok(())
}

/// Parse weekday names ("sun", "Sunday") or Sunday-based indices ("0").
fn parse_weekdays(raw: &[String]) -> Result<WeekdaySet> {
    raw.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(parse_weekday)
        .collect()
}

fn parse_weekday(raw: &str) -> Result<Weekday> {
    if let Ok(index) = raw.parse::<u8>() {
        return Ok(weekday_from_index(index)?);
    }
    let lower = raw.to_ascii_lowercase();
    SUNDAY_FIRST
        .into_iter()
        .find(|day| {
            let name = weekday_name(day).to_ascii_lowercase();
            lower == name || (lower.len() >= 3 && name.starts_with(&lower))
        })
        .with_context(|| {
            format!(
                "Unknown weekday: '{}'. Use a name (sun, monday, ...) or 0-6 with 0 = Sunday",
                raw
            )
        })
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
