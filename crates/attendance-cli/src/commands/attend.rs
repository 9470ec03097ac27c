use attendance_core::{Config, Tracker};
use chrono::NaiveDate;
use clap::{ArgGroup, Subcommand};
use std::path::Path;

use super::percent_label;

#[derive(Subcommand)]
pub enum AttendAction {
    /// Mark a subject present or absent (today unless --date is given)
    #[command(group(ArgGroup::new("outcome").required(true).args(["present", "absent"])))]
    Mark {
        /// Subject name
        subject: String,
        #[arg(long)]
        present: bool,
        #[arg(long)]
        absent: bool,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Attendance standing of one subject
    Status {
        subject: String,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: AttendAction, dir: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = Tracker::open_in(dir, config)?;

    match action {
        AttendAction::Mark {
            subject,
            present,
            absent: _,
            date,
        } => {
            let date = date.unwrap_or_else(|| tracker.today());
            tracker.mark(&subject, date, present);
            let label = if present { "Marked Present" } else { "Marked Absent" };
            println!("{label}: {subject} on {date}");
            println!("{subject}: {}", percent_label(tracker.percentage(&subject)));
        }
        AttendAction::Status { subject, json } => {
            let ledger = tracker.ledger();
            let percentage = ledger.percentage(&subject);
            if json {
                let status = serde_json::json!({
                    "subject_name": subject,
                    "percentage": percentage,
                    "health": attendance_core::classify(percentage),
                    "present": ledger.present_classes(&subject),
                    "total": ledger.total_classes(&subject),
                    "marked_today": tracker.is_marked_today(&subject),
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("{subject}: {}", percent_label(percentage));
                println!(
                    "  {}/{} classes attended",
                    ledger.present_classes(&subject),
                    ledger.total_classes(&subject)
                );
                if !tracker.is_marked_today(&subject) {
                    println!("  not marked today");
                }
            }
        }
    }
    Ok(())
}
