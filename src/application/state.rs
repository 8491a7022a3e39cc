//! Application state management for the terminal job tracker.
//!
//! This module contains the main application state, the mode machine for
//! the terminal user interface, and the add/edit/delete/export workflows
//! that sit between key handling and the stores.

use crate::application::applications::ApplicationStore;
use crate::application::session::SessionStore;
use crate::application::store::Subscription;
use crate::domain::{
    ApplicationDraft, ApplicationPatch, ApplicationStatus, JobApplication, JobType,
};
use crate::infrastructure::Storage;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Represents the current mode of the application.
///
/// The mode determines how user input is interpreted and what the status
/// bar displays.
#[derive(Debug)]
pub enum AppMode {
    /// Browsing the application list
    List,
    /// Filling in the add/edit form
    Form,
    /// Waiting for delete confirmation
    ConfirmDelete,
    /// Help screen is displayed
    Help,
    /// CSV export dialog is open
    ExportCsv,
}

/// One focusable field of the application form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Company,
    JobTitle,
    DateApplied,
    Status,
    JobType,
    Link,
    SalaryRange,
    ContactInfo,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::Company,
        FormField::JobTitle,
        FormField::DateApplied,
        FormField::Status,
        FormField::JobType,
        FormField::Link,
        FormField::SalaryRange,
        FormField::ContactInfo,
        FormField::Notes,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Company => "Company *",
            FormField::JobTitle => "Job Title *",
            FormField::DateApplied => "Date Applied *",
            FormField::Status => "Status",
            FormField::JobType => "Job Type",
            FormField::Link => "Job Posting Link",
            FormField::SalaryRange => "Salary Range",
            FormField::ContactInfo => "Contact Info",
            FormField::Notes => "Notes",
        }
    }

    /// Whether the field takes free text (as opposed to a cycled choice).
    pub fn is_text(self) -> bool {
        !matches!(self, FormField::Status | FormField::JobType)
    }
}

/// Editable contents of the application form.
#[derive(Debug, Clone)]
pub struct FormState {
    pub company: String,
    pub job_title: String,
    pub date_applied: String,
    pub status: ApplicationStatus,
    pub job_type: JobType,
    pub link: String,
    pub salary_range: String,
    pub contact_info: String,
    pub notes: String,
    pub focused: FormField,
}

impl FormState {
    /// A fresh form for adding a record: today's date, default status and
    /// job type, everything else empty.
    pub fn blank() -> Self {
        Self {
            company: String::new(),
            job_title: String::new(),
            date_applied: chrono::Local::now().format("%Y-%m-%d").to_string(),
            status: ApplicationStatus::default(),
            job_type: JobType::default(),
            link: String::new(),
            salary_range: String::new(),
            contact_info: String::new(),
            notes: String::new(),
            focused: FormField::Company,
        }
    }

    /// A form pre-filled from an existing record, for editing.
    pub fn from_application(app: &JobApplication) -> Self {
        Self {
            company: app.company.clone(),
            job_title: app.job_title.clone(),
            date_applied: app.date_applied.clone(),
            status: app.status,
            job_type: app.job_type,
            link: app.link.clone().unwrap_or_default(),
            salary_range: app.salary_range.clone().unwrap_or_default(),
            contact_info: app.contact_info.clone().unwrap_or_default(),
            notes: app.notes.clone().unwrap_or_default(),
            focused: FormField::Company,
        }
    }

    /// The text buffer of the focused field, if it is a text field.
    pub fn focused_text(&self) -> Option<&String> {
        match self.focused {
            FormField::Company => Some(&self.company),
            FormField::JobTitle => Some(&self.job_title),
            FormField::DateApplied => Some(&self.date_applied),
            FormField::Link => Some(&self.link),
            FormField::SalaryRange => Some(&self.salary_range),
            FormField::ContactInfo => Some(&self.contact_info),
            FormField::Notes => Some(&self.notes),
            FormField::Status | FormField::JobType => None,
        }
    }

    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            FormField::Company => Some(&mut self.company),
            FormField::JobTitle => Some(&mut self.job_title),
            FormField::DateApplied => Some(&mut self.date_applied),
            FormField::Link => Some(&mut self.link),
            FormField::SalaryRange => Some(&mut self.salary_range),
            FormField::ContactInfo => Some(&mut self.contact_info),
            FormField::Notes => Some(&mut self.notes),
            FormField::Status | FormField::JobType => None,
        }
    }

    /// Cycles the focused choice field forward. No effect on text fields.
    pub fn cycle_forward(&mut self) {
        match self.focused {
            FormField::Status => self.status = self.status.next(),
            FormField::JobType => self.job_type = self.job_type.next(),
            _ => {}
        }
    }

    /// Cycles the focused choice field backward. No effect on text fields.
    pub fn cycle_backward(&mut self) {
        match self.focused {
            FormField::Status => self.status = self.status.prev(),
            FormField::JobType => self.job_type = self.job_type.prev(),
            _ => {}
        }
    }

    /// Display value for any field, used by the form renderer.
    pub fn display_value(&self, field: FormField) -> String {
        match field {
            FormField::Company => self.company.clone(),
            FormField::JobTitle => self.job_title.clone(),
            FormField::DateApplied => self.date_applied.clone(),
            FormField::Status => self.status.to_string(),
            FormField::JobType => self.job_type.to_string(),
            FormField::Link => self.link.clone(),
            FormField::SalaryRange => self.salary_range.clone(),
            FormField::ContactInfo => self.contact_info.clone(),
            FormField::Notes => self.notes.clone(),
        }
    }

    /// Required-field and date-format validation.
    ///
    /// This is the form's responsibility; the stores accept whatever
    /// well-typed record they are handed.
    pub fn validate(&self) -> Result<(), String> {
        if self.company.trim().is_empty() {
            return Err("Company is required".to_string());
        }
        if self.job_title.trim().is_empty() {
            return Err("Job title is required".to_string());
        }
        if self.date_applied.trim().is_empty() {
            return Err("Date applied is required".to_string());
        }
        if chrono::NaiveDate::parse_from_str(&self.date_applied, "%Y-%m-%d").is_err() {
            return Err("Date applied must be YYYY-MM-DD".to_string());
        }
        Ok(())
    }

    /// Builds the draft submitted when adding a new record.
    pub fn draft(&self) -> ApplicationDraft {
        ApplicationDraft {
            company: self.company.clone(),
            job_title: self.job_title.clone(),
            date_applied: self.date_applied.clone(),
            status: self.status,
            link: non_empty(&self.link),
            salary_range: non_empty(&self.salary_range),
            contact_info: non_empty(&self.contact_info),
            notes: non_empty(&self.notes),
            job_type: self.job_type,
        }
    }

    /// Builds the full-form patch submitted when editing a record.
    ///
    /// Every field is set, so blanked optionals clear the stored value.
    pub fn patch(&self) -> ApplicationPatch {
        ApplicationPatch {
            company: Some(self.company.clone()),
            job_title: Some(self.job_title.clone()),
            date_applied: Some(self.date_applied.clone()),
            status: Some(self.status),
            link: Some(non_empty(&self.link)),
            salary_range: Some(non_empty(&self.salary_range)),
            contact_info: Some(non_empty(&self.contact_info)),
            notes: Some(non_empty(&self.notes)),
            job_type: Some(self.job_type),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Main application state: the stores plus everything the terminal UI
/// needs to render and react to input.
///
/// The list view holds a cached copy of the records that is refreshed by a
/// store subscription, so rendering never recomputes state that has not
/// changed: subscribe once, re-read the snapshot whenever notified.
pub struct App {
    /// Canonical record store, persisted to durable storage
    pub applications: ApplicationStore,
    /// Unpersisted editing session (which record the form is editing)
    pub session: SessionStore,
    /// Current application mode
    pub mode: AppMode,
    /// Selected row in the list (zero-based)
    pub selected: usize,
    /// Contents of the add/edit form
    pub form: FormState,
    /// Cursor position within the focused text buffer
    pub cursor_position: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for the CSV export filename
    pub filename_input: String,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Record awaiting delete confirmation: (id, company)
    pub pending_delete: Option<(String, String)>,
    list_rows: Rc<RefCell<Vec<JobApplication>>>,
    _list_subscription: Subscription,
}

impl App {
    /// Builds the app over a storage backend, rehydrating persisted
    /// records and wiring the list view's subscription.
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        let applications = ApplicationStore::open(storage);
        let list_rows = Rc::new(RefCell::new(applications.applications()));

        let reader = applications.store();
        let rows = Rc::clone(&list_rows);
        let subscription = applications.subscribe(move || {
            *rows.borrow_mut() = reader.get().applications;
        });

        Self {
            applications,
            session: SessionStore::new(),
            mode: AppMode::List,
            selected: 0,
            form: FormState::blank(),
            cursor_position: 0,
            status_message: None,
            filename_input: String::new(),
            help_scroll: 0,
            pending_delete: None,
            list_rows,
            _list_subscription: subscription,
        }
    }

    /// The rows the list view renders: the subscription-maintained
    /// snapshot of the record store.
    pub fn visible_applications(&self) -> Ref<'_, Vec<JobApplication>> {
        self.list_rows.borrow()
    }

    /// The record under the cursor, if any.
    pub fn selected_application(&self) -> Option<JobApplication> {
        self.list_rows.borrow().get(self.selected).cloned()
    }

    pub fn move_selection_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        let len = self.list_rows.borrow().len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.list_rows.borrow().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Opens a blank form for a new application.
    pub fn start_add(&mut self) {
        self.session.stop_editing();
        self.form = FormState::blank();
        self.cursor_position = 0;
        self.mode = AppMode::Form;
        self.status_message = None;
    }

    /// Opens the form pre-filled with the selected record and marks it as
    /// the editing session. Does nothing if the list is empty.
    pub fn start_edit(&mut self) {
        if let Some(app) = self.selected_application() {
            self.session.start_editing(&app.id);
            self.form = FormState::from_application(&app);
            self.cursor_position = self.form.focused_text().map_or(0, |t| t.len());
            self.mode = AppMode::Form;
            self.status_message = None;
        }
    }

    /// Abandons the form, clearing any editing session.
    pub fn cancel_form(&mut self) {
        self.session.stop_editing();
        self.form = FormState::blank();
        self.cursor_position = 0;
        self.mode = AppMode::List;
    }

    /// Moves form focus to the next field, placing the cursor at the end
    /// of its text.
    pub fn focus_next_field(&mut self) {
        self.form.focused = self.form.focused.next();
        self.cursor_position = self.form.focused_text().map_or(0, |t| t.len());
    }

    /// Moves form focus to the previous field.
    pub fn focus_prev_field(&mut self) {
        self.form.focused = self.form.focused.prev();
        self.cursor_position = self.form.focused_text().map_or(0, |t| t.len());
    }

    /// Validates and submits the form.
    ///
    /// With an active editing session this patches that record and clears
    /// the session; otherwise it adds a new record. Validation failures
    /// and storage-write failures both land in the status bar, leaving
    /// the form open.
    pub fn submit_form(&mut self) {
        if let Err(message) = self.form.validate() {
            self.status_message = Some(message);
            return;
        }

        let company = self.form.company.trim().to_string();
        let result = match self.session.editing_application_id() {
            Some(id) => self
                .applications
                .update_application(&id, self.form.patch())
                .map(|_| format!("Updated application for {}", company)),
            None => self
                .applications
                .add_application(self.form.draft())
                .map(|_| format!("Added application for {}", company)),
        };

        match result {
            Ok(message) => {
                self.session.stop_editing();
                self.form = FormState::blank();
                self.cursor_position = 0;
                self.mode = AppMode::List;
                self.status_message = Some(message);
                self.clamp_selection();
            }
            Err(error) => {
                self.status_message = Some(format!("Save failed: {}", error));
            }
        }
    }

    /// Asks for confirmation before deleting the selected record.
    pub fn request_delete(&mut self) {
        if let Some(app) = self.selected_application() {
            self.pending_delete = Some((app.id, app.company));
            self.mode = AppMode::ConfirmDelete;
            self.status_message = None;
        }
    }

    /// Deletes the record that confirmation was requested for.
    pub fn confirm_delete(&mut self) {
        if let Some((id, company)) = self.pending_delete.take() {
            match self.applications.delete_application(&id) {
                Ok(()) => {
                    self.status_message = Some(format!("Deleted application for {}", company));
                }
                Err(error) => {
                    self.status_message = Some(format!("Save failed: {}", error));
                }
            }
        }
        self.mode = AppMode::List;
        self.clamp_selection();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = AppMode::List;
    }

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = "applications.csv".to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Gets the filename to use for CSV export, falling back to the
    /// default if the input is empty.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "applications.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of a CSV export operation and returns to list
    /// mode.
    pub fn set_csv_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }
        self.mode = AppMode::List;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn cancel_csv_export(&mut self) {
        self.mode = AppMode::List;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStorage;

    fn test_app() -> App {
        App::new(Rc::new(MemoryStorage::new()))
    }

    fn fill_required(app: &mut App, company: &str) {
        app.form.company = company.to_string();
        app.form.job_title = "Engineer".to_string();
        app.form.date_applied = "2024-01-01".to_string();
    }

    #[test]
    fn test_app_default_state() {
        let app = test_app();
        assert!(matches!(app.mode, AppMode::List));
        assert_eq!(app.selected, 0);
        assert!(app.status_message.is_none());
        assert!(app.pending_delete.is_none());
        assert!(app.visible_applications().is_empty());
        assert!(app.session.editing_application_id().is_none());
    }

    #[test]
    fn test_start_add_opens_blank_form_dated_today() {
        let mut app = test_app();
        app.start_add();

        assert!(matches!(app.mode, AppMode::Form));
        assert!(app.form.company.is_empty());
        assert_eq!(app.form.focused, FormField::Company);
        assert_eq!(
            app.form.date_applied,
            chrono::Local::now().format("%Y-%m-%d").to_string()
        );
        assert_eq!(app.form.status, ApplicationStatus::Applied);
        assert_eq!(app.form.job_type, JobType::FullTime);
    }

    #[test]
    fn test_submit_blank_form_reports_validation_error() {
        let mut app = test_app();
        app.start_add();
        app.form.company.clear();
        app.form.date_applied.clear();

        app.submit_form();

        assert!(matches!(app.mode, AppMode::Form)); // form stays open
        assert_eq!(app.status_message.as_deref(), Some("Company is required"));
        assert!(app.visible_applications().is_empty());
    }

    #[test]
    fn test_submit_rejects_malformed_date() {
        let mut app = test_app();
        app.start_add();
        fill_required(&mut app, "Acme");
        app.form.date_applied = "01/01/2024".to_string();

        app.submit_form();

        assert_eq!(
            app.status_message.as_deref(),
            Some("Date applied must be YYYY-MM-DD")
        );
        assert!(app.visible_applications().is_empty());
    }

    #[test]
    fn test_submit_adds_record_and_returns_to_list() {
        let mut app = test_app();
        app.start_add();
        fill_required(&mut app, "Acme");
        app.form.link = "https://acme.example/jobs/1".to_string();

        app.submit_form();

        assert!(matches!(app.mode, AppMode::List));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Added application for Acme")
        );
        let rows = app.visible_applications();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company, "Acme");
        assert_eq!(rows[0].link.as_deref(), Some("https://acme.example/jobs/1"));
        assert!(!rows[0].id.is_empty());
    }

    #[test]
    fn test_list_cache_follows_store_notifications() {
        let mut app = test_app();
        app.start_add();
        fill_required(&mut app, "Acme");
        app.submit_form();
        app.start_add();
        fill_required(&mut app, "Globex");
        app.submit_form();

        let rows = app.visible_applications();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].company, "Globex");
    }

    #[test]
    fn test_start_edit_fills_form_and_sets_session() {
        let mut app = test_app();
        app.start_add();
        fill_required(&mut app, "Acme");
        app.submit_form();

        app.start_edit();

        assert!(matches!(app.mode, AppMode::Form));
        assert_eq!(app.form.company, "Acme");
        let editing = app.session.editing_application_id().unwrap();
        assert_eq!(editing, app.visible_applications()[0].id);
    }

    #[test]
    fn test_start_edit_on_empty_list_does_nothing() {
        let mut app = test_app();
        app.start_edit();
        assert!(matches!(app.mode, AppMode::List));
        assert!(app.session.editing_application_id().is_none());
    }

    #[test]
    fn test_edit_submit_updates_record_and_clears_session() {
        let mut app = test_app();
        app.start_add();
        fill_required(&mut app, "Acme");
        app.submit_form();
        let id = app.visible_applications()[0].id.clone();

        app.start_edit();
        app.form.status = ApplicationStatus::Interviewing;
        app.form.salary_range = "$90k".to_string();
        app.submit_form();

        assert!(matches!(app.mode, AppMode::List));
        assert!(app.session.editing_application_id().is_none());
        let rows = app.visible_applications();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id); // same record, same position
        assert_eq!(rows[0].status, ApplicationStatus::Interviewing);
        assert_eq!(rows[0].salary_range.as_deref(), Some("$90k"));
    }

    #[test]
    fn test_cancel_form_clears_session() {
        let mut app = test_app();
        app.start_add();
        fill_required(&mut app, "Acme");
        app.submit_form();

        app.start_edit();
        app.cancel_form();

        assert!(matches!(app.mode, AppMode::List));
        assert!(app.session.editing_application_id().is_none());
        assert_eq!(app.visible_applications()[0].company, "Acme");
    }

    #[test]
    fn test_delete_flow_with_confirmation() {
        let mut app = test_app();
        app.start_add();
        fill_required(&mut app, "Acme");
        app.submit_form();

        app.request_delete();
        assert!(matches!(app.mode, AppMode::ConfirmDelete));
        assert_eq!(app.pending_delete.as_ref().unwrap().1, "Acme");

        app.confirm_delete();
        assert!(matches!(app.mode, AppMode::List));
        assert!(app.visible_applications().is_empty());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Deleted application for Acme")
        );
    }

    #[test]
    fn test_cancel_delete_keeps_record() {
        let mut app = test_app();
        app.start_add();
        fill_required(&mut app, "Acme");
        app.submit_form();

        app.request_delete();
        app.cancel_delete();

        assert!(matches!(app.mode, AppMode::List));
        assert!(app.pending_delete.is_none());
        assert_eq!(app.visible_applications().len(), 1);
    }

    #[test]
    fn test_delete_last_row_clamps_selection() {
        let mut app = test_app();
        for name in ["Acme", "Globex"] {
            app.start_add();
            fill_required(&mut app, name);
            app.submit_form();
        }

        app.selected = 1;
        app.request_delete();
        app.confirm_delete();

        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_selection_movement_stays_in_bounds() {
        let mut app = test_app();
        app.move_selection_down(); // empty list
        assert_eq!(app.selected, 0);

        for name in ["Acme", "Globex"] {
            app.start_add();
            fill_required(&mut app, name);
            app.submit_form();
        }

        app.move_selection_down();
        assert_eq!(app.selected, 1);
        app.move_selection_down();
        assert_eq!(app.selected, 1);
        app.move_selection_up();
        assert_eq!(app.selected, 0);
        app.move_selection_up();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_csv_export_filename_defaults() {
        let mut app = test_app();
        app.start_csv_export();
        assert!(matches!(app.mode, AppMode::ExportCsv));
        assert_eq!(app.get_csv_export_filename(), "applications.csv");

        app.filename_input.clear();
        assert_eq!(app.get_csv_export_filename(), "applications.csv");
    }

    #[test]
    fn test_csv_export_result_messages() {
        let mut app = test_app();
        app.start_csv_export();
        app.set_csv_export_result(Ok("applications.csv".to_string()));
        assert!(matches!(app.mode, AppMode::List));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Exported to applications.csv")
        );

        app.start_csv_export();
        app.set_csv_export_result(Err("permission denied".to_string()));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Export failed: permission denied")
        );
    }

    #[test]
    fn test_blanked_optional_field_is_cleared_on_edit() {
        let mut app = test_app();
        app.start_add();
        fill_required(&mut app, "Acme");
        app.form.notes = "call back".to_string();
        app.submit_form();
        assert_eq!(
            app.visible_applications()[0].notes.as_deref(),
            Some("call back")
        );

        app.start_edit();
        app.form.notes.clear();
        app.submit_form();
        assert!(app.visible_applications()[0].notes.is_none());
    }

    #[test]
    fn test_form_field_cycling() {
        let mut form = FormState::blank();
        form.focused = FormField::Status;
        form.cycle_forward();
        assert_eq!(form.status, ApplicationStatus::Interviewing);
        form.cycle_backward();
        assert_eq!(form.status, ApplicationStatus::Applied);

        // Cycling a text field is a no-op
        form.focused = FormField::Company;
        form.cycle_forward();
        assert!(form.company.is_empty());
    }
}
