use crate::application::{App, AppMode};
use crate::domain::CsvExporter;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::List => Self::handle_list_mode(app, key, modifiers),
            AppMode::Form => Self::handle_form_mode(app, key),
            AppMode::ConfirmDelete => Self::handle_confirm_delete_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportCsv => Self::handle_export_mode(app, key),
        }
    }

    fn handle_list_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.start_csv_export();
            }
            return;
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.status_message = None;
                app.move_selection_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.status_message = None;
                app.move_selection_down();
            }
            KeyCode::Char('a') | KeyCode::Char('n') => {
                app.start_add();
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                app.start_edit();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                app.request_delete();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.show_help();
            }
            KeyCode::Esc => {
                app.status_message = None;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                app.submit_form();
            }
            KeyCode::Esc => {
                app.cancel_form();
            }
            KeyCode::Tab | KeyCode::Down => {
                app.focus_next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus_prev_field();
            }
            KeyCode::Left => {
                if app.form.focused.is_text() {
                    if app.cursor_position > 0 {
                        app.cursor_position -= 1;
                    }
                } else {
                    app.form.cycle_backward();
                }
            }
            KeyCode::Right => {
                if app.form.focused.is_text() {
                    let len = app.form.focused_text().map_or(0, |t| t.len());
                    if app.cursor_position < len {
                        app.cursor_position += 1;
                    }
                } else {
                    app.form.cycle_forward();
                }
            }
            KeyCode::Backspace => {
                let position = app.cursor_position;
                if let Some(text) = app.form.focused_text_mut() {
                    if position > 0 {
                        text.remove(position - 1);
                        app.cursor_position -= 1;
                    }
                }
            }
            KeyCode::Delete => {
                let position = app.cursor_position;
                if let Some(text) = app.form.focused_text_mut() {
                    if position < text.len() {
                        text.remove(position);
                    }
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.form.focused_text().map_or(0, |t| t.len());
            }
            KeyCode::Char(c) => {
                let position = app.cursor_position;
                if let Some(text) = app.form.focused_text_mut() {
                    text.insert(position, c);
                    app.cursor_position += 1;
                }
            }
            _ => {}
        }
    }

    fn handle_confirm_delete_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.confirm_delete();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.cancel_delete();
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::List;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_export_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let applications = app.visible_applications().clone();
                let result = CsvExporter::export_to_csv(&applications, &filename);
                app.set_csv_export_result(result);
            }
            KeyCode::Esc => {
                app.cancel_csv_export();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.filename_input.remove(app.cursor_position - 1);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.len() {
                    app.filename_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.filename_input.len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.len();
            }
            KeyCode::Char(c) => {
                app.filename_input.insert(app.cursor_position, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }
}
