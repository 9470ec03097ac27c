use attendance_core::{Config, Dashboard, Tracker};
use std::path::Path;

use super::percent_label;

fn print_text(report: &Dashboard) {
    println!("Overall attendance: {}", percent_label(report.overall_percentage));
    println!("Total subjects:     {}", report.total_subjects);
    println!(
        "Today's classes:    {} ({} {})",
        report.today.len(),
        report.weekday,
        report.date
    );

    if !report.subjects.is_empty() {
        println!();
        println!("Subjects:");
        for s in &report.subjects {
            println!(
                "  {:<20} {:>3}%  {}/{} classes  {}",
                s.subject_name, s.percentage, s.present, s.total, s.health
            );
        }
    }

    if !report.at_risk.is_empty() {
        println!();
        println!("Below minimum requirement:");
        for s in &report.at_risk {
            println!("  {} - {}%", s.subject_name, s.percentage);
        }
    }

    println!();
    println!(
        "Records: {} total, {} present, {} absent",
        report.quick_stats.total_records, report.quick_stats.present, report.quick_stats.absent
    );
}

pub fn run(json: bool, dir: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = Tracker::open_in(dir, config)?;
    let report = tracker.dashboard();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.total_subjects == 0 {
        println!("no routine set up; add subjects with `attendance routine add`");
    } else {
        print_text(&report);
    }
    Ok(())
}
