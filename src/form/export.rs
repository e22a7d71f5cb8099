use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;

use crate::schedule::{format_date, Appointment};

/// Writes archived appointments as CSV: date, name, street, city, public transport
pub fn export_archive_csv<W: Write>(
    appointments: &[&Appointment],
    out: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = WriterBuilder::new().from_writer(out);
    writer.write_record(["date", "name", "street", "city", "public_transport"])?;

    for appointment in appointments {
        let date = appointment.scheduled_date.map(format_date).unwrap_or_default();
        writer.write_record([
            date.as_str(),
            appointment.name.as_str(),
            appointment.street.as_str(),
            appointment.city.as_str(),
            appointment.public_transport.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Exports the archive to a CSV file, replacing it if present
pub fn export_archive_to_file(
    appointments: &[&Appointment],
    csv_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(csv_path)?;
    export_archive_csv(appointments, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_export_quotes_commas() {
        let entered = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let mut pub_ = Appointment::new("Zum Anker", "Hafenweg 1, 2. OG", "Hamburg", "S3", entered, None);
        pub_.scheduled_date = NaiveDate::from_ymd_opt(2025, 10, 7);

        let mut out = Vec::new();
        export_archive_csv(&[&pub_], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "date,name,street,city,public_transport\n07.10.2025,Zum Anker,\"Hafenweg 1, 2. OG\",Hamburg,S3\n"
        );
    }
}
