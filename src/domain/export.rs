//! CSV export for tracked applications.

use super::models::JobApplication;

pub struct CsvExporter;

impl CsvExporter {
    /// Writes all applications to a CSV file with a header row.
    ///
    /// Returns the filename on success so the caller can report it.
    pub fn export_to_csv(applications: &[JobApplication], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;

        writer
            .write_record([
                "Company",
                "Job Title",
                "Date Applied",
                "Status",
                "Job Type",
                "Link",
                "Salary Range",
                "Contact Info",
                "Notes",
            ])
            .map_err(|e| e.to_string())?;

        for app in applications {
            writer
                .write_record([
                    app.company.as_str(),
                    app.job_title.as_str(),
                    app.date_applied.as_str(),
                    &app.status.to_string(),
                    &app.job_type.to_string(),
                    app.link.as_deref().unwrap_or(""),
                    app.salary_range.as_deref().unwrap_or(""),
                    app.contact_info.as_deref().unwrap_or(""),
                    app.notes.as_deref().unwrap_or(""),
                ])
                .map_err(|e| e.to_string())?;
        }

        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }
}
