use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::schedule::dates::parse_date;
use crate::schedule::Appointment;

/// Provenance stamped on every imported record
pub const IMPORT_SOURCE: &str = "import";

/// Parses legacy archive lines of the form `dd.mm.yyyy, name, address`.
///
/// The address may itself contain commas; everything after the second
/// field is joined back together. Lines with an unreadable date or no
/// name are skipped.
pub fn parse_legacy_archive<R: Read>(
    input: R,
    imported_at: NaiveDateTime,
) -> Result<Vec<Appointment>, Box<dyn std::error::Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut appointments = Vec::new();

    for (line, result) in reader.records().enumerate() {
        let record = result?;

        let Some(date) = record.get(0).and_then(parse_date) else {
            warn!(line = line + 1, "skipping archive line without a valid date");
            continue;
        };

        let name = record.get(1).unwrap_or("").to_string();
        if name.is_empty() {
            warn!(line = line + 1, "skipping archive line without a name");
            continue;
        }

        let address = record.iter().skip(2).collect::<Vec<_>>().join(", ");

        let mut appointment = Appointment::new(name, address, "", "", imported_at, Some(IMPORT_SOURCE.to_string()));
        appointment.scheduled_date = Some(date);
        appointments.push(appointment);
    }

    Ok(appointments)
}

/// Loads a legacy archive file
pub fn load_legacy_archive<P: AsRef<Path>>(
    csv_path: P,
    imported_at: NaiveDateTime,
) -> Result<Vec<Appointment>, Box<dyn std::error::Error>> {
    let file = std::fs::File::open(csv_path)?;
    parse_legacy_archive(file, imported_at)
}
