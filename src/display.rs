use std::fs::File;
use std::io::Write;

use crate::schedule::{format_date, format_date_short, Appointment, Snapshot, WeeklyReport};

/// Formats a pub with its address, e.g. `Zum Anker, Hafenweg 1 (S3)`
pub fn format_pub(appointment: &Appointment) -> String {
    let mut line = appointment.name.clone();
    if !appointment.street.is_empty() {
        line.push_str(&format!(", {}", appointment.street));
    }
    if !appointment.public_transport.is_empty() {
        line.push_str(&format!(" ({})", appointment.public_transport));
    }
    line
}

/// Poster lines: `dd.mm. name, street (transport)`
pub fn poster_lines(pubs: &[Appointment]) -> Vec<String> {
    pubs.iter()
        .filter_map(|a| a.scheduled_date.map(|d| format!("{} {}", format_date_short(d), format_pub(a))))
        .collect()
}

/// Writes the poster to a text file
pub fn write_poster_to_file(pubs: &[Appointment], filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;

    writeln!(file, "** Nomaden Termine **")?;
    for line in poster_lines(pubs) {
        writeln!(file, "{}", line)?;
    }

    Ok(())
}

/// Prints the current schedule and waiting list
pub fn print_schedule(snapshot: &Snapshot) {
    println!("\n=== Upcoming ===");
    let upcoming = snapshot.upcoming();
    if upcoming.is_empty() {
        println!("  [EMPTY]");
    }
    for appointment in upcoming {
        if let Some(date) = appointment.scheduled_date {
            println!("  {} -> {} (id: {})", format_date(date), format_pub(appointment), appointment.id);
        }
    }

    println!("\n=== Waiting list ({}) ===", snapshot.waiting.len());
    for (position, appointment) in snapshot.waiting.iter().enumerate() {
        println!("  {}. {} (id: {})", position + 1, format_pub(appointment), appointment.id);
    }
}

/// Prints what a weekly pass changed
pub fn print_weekly_report(report: &WeeklyReport) {
    println!("Archived: {}", report.archived.len());
    for appointment in &report.archived {
        println!("  - {}", format_pub(appointment));
    }

    println!("Scheduled: {}", report.scheduled.len());
    for (id, date) in &report.scheduled {
        println!("  - {} -> {}", format_date(*date), id);
    }

    println!("Still waiting: {}", report.still_waiting.len());
}
