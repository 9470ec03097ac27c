//! Routine commands. Every change goes through the draft editor and is saved
//! in one step.

use attendance_core::{Config, SubjectSchedule, Tracker, Weekday};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Show the weekly routine
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Show classes scheduled for today
    Today {
        #[arg(long)]
        json: bool,
    },
    /// Add a subject to the routine
    Add {
        /// Subject name
        name: String,
        /// Comma-separated days (e.g. "Mon,Wed" or "Monday,Wednesday")
        #[arg(long, value_delimiter = ',', required = true)]
        days: Vec<Weekday>,
    },
    /// Remove the subject at an index shown by `routine show`
    Remove { index: usize },
    /// Replace the whole routine
    Set {
        /// Subject and days as "Name=Mon,Wed"; repeat for each subject
        #[arg(long = "subject", value_parser = parse_subject, required = true)]
        subjects: Vec<(String, Vec<Weekday>)>,
    },
}

fn parse_subject(raw: &str) -> Result<(String, Vec<Weekday>), String> {
    let (name, days) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected Name=Day,Day but got '{raw}'"))?;
    let days = days
        .split(',')
        .filter(|d| !d.trim().is_empty())
        .map(|d| d.parse::<Weekday>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((name.to_string(), days))
}

fn print_entries(entries: &[&SubjectSchedule]) {
    for (i, s) in entries.iter().enumerate() {
        println!("{i:>3}  {}  [{}]", s.subject_name, s.days_label());
    }
}

pub fn run(action: RoutineAction, dir: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = Tracker::open_in(dir, config)?;

    match action {
        RoutineAction::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tracker.routine())?);
            } else if tracker.routine().is_empty() {
                println!("no routine set up");
            } else {
                print_entries(&tracker.routine().iter().collect::<Vec<_>>());
            }
        }
        RoutineAction::Today { json } => {
            let today = tracker.resolve_today();
            let classes = tracker.todays_classes();
            if json {
                println!("{}", serde_json::to_string_pretty(&classes)?);
            } else if classes.is_empty() {
                println!("no classes on {today}");
            } else {
                println!("{today}:");
                for s in classes {
                    let mark = match tracker.ledger().record_for(&s.subject_name, tracker.today()) {
                        Some(r) if r.attended => "present",
                        Some(_) => "absent",
                        None => "not marked yet",
                    };
                    println!("  {}  ({mark})", s.subject_name);
                }
            }
        }
        RoutineAction::Add { name, days } => {
            tracker.begin_edit();
            tracker.add_to_draft(&name, days)?;
            let count = tracker.save_routine()?;
            println!("routine saved with {count} subjects");
        }
        RoutineAction::Remove { index } => {
            tracker.begin_edit();
            let Some(removed) = tracker.remove_from_draft(index)? else {
                println!("no subject at index {index}");
                return Ok(());
            };
            let count = tracker.save_routine()?;
            println!("removed {}", removed.subject_name);
            println!("routine saved with {count} subjects");
        }
        RoutineAction::Set { subjects } => {
            let editor = tracker.begin_edit();
            while editor.remove_from_draft(0).is_some() {}
            for (name, days) in subjects {
                editor.add_to_draft(&name, days)?;
            }
            let count = tracker.save_routine()?;
            println!("routine saved with {count} subjects");
        }
    }
    Ok(())
}
