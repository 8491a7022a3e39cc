use serde::{Deserialize, Serialize};

/// Progress of an application through the hiring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Interviewing,
    Offer,
    Rejected,
    Ghosted,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
        ApplicationStatus::Ghosted,
    ];

    /// Returns the next status in display order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Returns the previous status in display order, wrapping around.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Applied
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interviewing => "Interviewing",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Ghosted => "Ghosted",
        };
        write!(f, "{}", label)
    }
}

/// Kind of position applied for.
///
/// Serialized labels ("Full-time" etc.) match the data format written by
/// earlier versions of the tracker, so existing files load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Internship,
    Contract,
    Freelance,
    Temporary,
}

impl JobType {
    pub const ALL: [JobType; 6] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Internship,
        JobType::Contract,
        JobType::Freelance,
        JobType::Temporary,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for JobType {
    fn default() -> Self {
        JobType::FullTime
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Internship => "Internship",
            JobType::Contract => "Contract",
            JobType::Freelance => "Freelance",
            JobType::Temporary => "Temporary",
        };
        write!(f, "{}", label)
    }
}

/// A single tracked job application.
///
/// The `id` is assigned once when the record is added and never changes.
/// Required fields are enforced by the form before a record reaches the
/// store; the store itself accepts any well-typed record. Field names are
/// serialized in camelCase and every field carries a serde default so that
/// envelopes written by older versions still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobApplication {
    pub id: String,
    pub company: String,
    pub job_title: String,
    /// Calendar date in ISO 8601 `YYYY-MM-DD` form.
    pub date_applied: String,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub job_type: JobType,
}

impl Default for JobApplication {
    fn default() -> Self {
        Self {
            id: String::new(),
            company: String::new(),
            job_title: String::new(),
            date_applied: String::new(),
            status: ApplicationStatus::default(),
            link: None,
            salary_range: None,
            contact_info: None,
            notes: None,
            job_type: JobType::default(),
        }
    }
}

impl JobApplication {
    /// Applies a partial update, overwriting exactly the fields the patch
    /// sets. The id is deliberately not patchable.
    pub fn apply(&mut self, patch: ApplicationPatch) {
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(job_title) = patch.job_title {
            self.job_title = job_title;
        }
        if let Some(date_applied) = patch.date_applied {
            self.date_applied = date_applied;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(link) = patch.link {
            self.link = link;
        }
        if let Some(salary_range) = patch.salary_range {
            self.salary_range = salary_range;
        }
        if let Some(contact_info) = patch.contact_info {
            self.contact_info = contact_info;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(job_type) = patch.job_type {
            self.job_type = job_type;
        }
    }
}

/// A new application as entered in the form, before an id is assigned.
#[derive(Debug, Clone, Default)]
pub struct ApplicationDraft {
    pub company: String,
    pub job_title: String,
    pub date_applied: String,
    pub status: ApplicationStatus,
    pub link: Option<String>,
    pub salary_range: Option<String>,
    pub contact_info: Option<String>,
    pub notes: Option<String>,
    pub job_type: JobType,
}

impl ApplicationDraft {
    /// Turns the draft into a full record with the given id.
    pub fn into_application(self, id: String) -> JobApplication {
        JobApplication {
            id,
            company: self.company,
            job_title: self.job_title,
            date_applied: self.date_applied,
            status: self.status,
            link: self.link,
            salary_range: self.salary_range,
            contact_info: self.contact_info,
            notes: self.notes,
            job_type: self.job_type,
        }
    }
}

/// Field-by-field partial update for [`JobApplication::apply`].
///
/// `None` leaves a field untouched. For the optional free-text fields the
/// payload is itself an `Option`, so `Some(None)` clears the field.
#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub date_applied: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub link: Option<Option<String>>,
    pub salary_range: Option<Option<String>>,
    pub contact_info: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub job_type: Option<JobType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JobApplication {
        JobApplication {
            id: "1700000000000-0".to_string(),
            company: "Acme".to_string(),
            job_title: "Engineer".to_string(),
            date_applied: "2024-01-01".to_string(),
            status: ApplicationStatus::Applied,
            link: Some("https://acme.example/jobs/1".to_string()),
            salary_range: None,
            contact_info: None,
            notes: Some("Referred by Sam".to_string()),
            job_type: JobType::FullTime,
        }
    }

    #[test]
    fn test_serializes_camel_case_labels() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"jobTitle\":\"Engineer\""));
        assert!(json.contains("\"dateApplied\":\"2024-01-01\""));
        assert!(json.contains("\"status\":\"Applied\""));
        assert!(json.contains("\"jobType\":\"Full-time\""));
        // Unset optionals are omitted entirely
        assert!(!json.contains("salaryRange"));
    }

    #[test]
    fn test_round_trip() {
        let app = sample();
        let json = serde_json::to_string(&app).unwrap();
        let back: JobApplication = serde_json::from_str(&json).unwrap();
        assert_eq!(back, app);
    }

    #[test]
    fn test_missing_fields_default() {
        // An envelope written before jobType existed
        let json = r#"{"id":"x","company":"Acme","jobTitle":"Engineer",
                       "dateApplied":"2024-01-01","status":"Ghosted"}"#;
        let app: JobApplication = serde_json::from_str(json).unwrap();
        assert_eq!(app.job_type, JobType::FullTime);
        assert_eq!(app.status, ApplicationStatus::Ghosted);
        assert!(app.link.is_none());
    }

    #[test]
    fn test_apply_overwrites_only_patched_fields() {
        let mut app = sample();
        app.apply(ApplicationPatch {
            status: Some(ApplicationStatus::Interviewing),
            notes: Some(None),
            ..Default::default()
        });
        assert_eq!(app.status, ApplicationStatus::Interviewing);
        assert!(app.notes.is_none());
        assert_eq!(app.company, "Acme");
        assert_eq!(app.job_title, "Engineer");
        assert_eq!(app.link.as_deref(), Some("https://acme.example/jobs/1"));
    }

    #[test]
    fn test_apply_never_touches_id() {
        let mut app = sample();
        let id = app.id.clone();
        app.apply(ApplicationPatch {
            company: Some("Globex".to_string()),
            ..Default::default()
        });
        assert_eq!(app.id, id);
        assert_eq!(app.company, "Globex");
    }

    #[test]
    fn test_status_cycling_wraps() {
        assert_eq!(ApplicationStatus::Applied.next(), ApplicationStatus::Interviewing);
        assert_eq!(ApplicationStatus::Ghosted.next(), ApplicationStatus::Applied);
        assert_eq!(ApplicationStatus::Applied.prev(), ApplicationStatus::Ghosted);
    }

    #[test]
    fn test_job_type_cycling_wraps() {
        assert_eq!(JobType::Temporary.next(), JobType::FullTime);
        assert_eq!(JobType::FullTime.prev(), JobType::Temporary);
    }

    #[test]
    fn test_draft_into_application() {
        let draft = ApplicationDraft {
            company: "Acme".to_string(),
            job_title: "Engineer".to_string(),
            date_applied: "2024-01-01".to_string(),
            ..Default::default()
        };
        let app = draft.into_application("42-0".to_string());
        assert_eq!(app.id, "42-0");
        assert_eq!(app.status, ApplicationStatus::Applied);
        assert_eq!(app.job_type, JobType::FullTime);
    }
}
