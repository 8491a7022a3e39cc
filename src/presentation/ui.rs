use crate::application::{App, AppMode, FormField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.mode {
        AppMode::Form => render_form(f, app, chunks[1]),
        _ => render_list(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let count = app.visible_applications().len();
    let header = Paragraph::new(format!(
        "jobtrack - Job Application Tracker | {} application{}",
        count,
        if count == 1 { "" } else { "s" }
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let applications = app.visible_applications();

    if applications.is_empty() {
        let empty = Paragraph::new("No applications yet. Press 'a' to add one and get started!")
            .block(Block::default().borders(Borders::ALL).title("Applications"));
        f.render_widget(empty, area);
        return;
    }

    let header_style = Style::default().fg(Color::Yellow);
    let header = Row::new(vec![
        Cell::from("Company").style(header_style),
        Cell::from("Job Title").style(header_style),
        Cell::from("Date").style(header_style),
        Cell::from("Status").style(header_style),
        Cell::from("Type").style(header_style),
    ])
    .height(1);

    let mut rows = vec![header];
    for (idx, application) in applications.iter().enumerate() {
        let style = if idx == app.selected {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };
        rows.push(
            Row::new(vec![
                Cell::from(application.company.clone()),
                Cell::from(application.job_title.clone()),
                Cell::from(application.date_applied.clone()),
                Cell::from(application.status.to_string()),
                Cell::from(application.job_type.to_string()),
            ])
            .style(style)
            .height(1),
        );
    }

    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(30),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Applications"))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.session.editing_application_id().is_some() {
        "Edit Application"
    } else {
        "Add New Application"
    };

    let mut rows = Vec::new();
    for field in FormField::ALL {
        let focused = field == app.form.focused;
        let label_style = if focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let value_style = if focused {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        };

        let mut value = app.form.display_value(field);
        if focused && !field.is_text() {
            value = format!("< {} >", value);
        }

        rows.push(
            Row::new(vec![
                Cell::from(field.label()).style(label_style),
                Cell::from(value).style(value_style),
            ])
            .height(1),
        );
    }

    let widths = [Constraint::Length(18), Constraint::Min(20)];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::List => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "a: add | Enter/e: edit | d: delete | Ctrl+E: export CSV | F1/?: help | q: quit"
                    .to_string()
            }
        }
        AppMode::Form => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else if app.form.focused.is_text() {
                format!(
                    "Editing: {} | Tab/\u{2193}: next field | Enter: save | Esc: cancel",
                    app.form.focused.label()
                )
            } else {
                format!(
                    "Editing: {} | \u{2190}/\u{2192}: change | Tab/\u{2193}: next field | Enter: save | Esc: cancel",
                    app.form.focused.label()
                )
            }
        }
        AppMode::ConfirmDelete => match app.pending_delete {
            Some((_, ref company)) => {
                format!("Delete application for {}? (y/n)", company)
            }
            None => "Delete application? (y/n)".to_string(),
        },
        AppMode::Help => {
            "\u{2191}\u{2193}/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help"
                .to_string()
        }
        AppMode::ExportCsv => format!(
            "Export CSV as: {} (Enter to export, Esc to cancel)",
            app.filename_input
        ),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::List => Style::default(),
            AppMode::Form => Style::default().fg(Color::Green),
            AppMode::ConfirmDelete => Style::default().fg(Color::Red),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("jobtrack Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"JOBTRACK REFERENCE

=== LIST VIEW ===
a or n          Add a new application
Enter or e      Edit the selected application
d or Delete     Delete the selected application (asks for confirmation)
Arrow keys      Move selection (j/k also work)
Ctrl+E          Export all applications to a CSV file
F1 or ?         Show this help
q               Quit

=== FORM VIEW ===
Tab or Down     Move to the next field
Shift+Tab or Up Move to the previous field
Left/Right      Move the cursor in text fields,
                or cycle the Status / Job Type choices
Enter           Save the application
Esc             Cancel without saving

Fields marked with * are required. Date Applied must be
in YYYY-MM-DD form; it defaults to today for new entries.

=== STATUSES ===
Applied, Interviewing, Offer, Rejected, Ghosted

=== JOB TYPES ===
Full-time, Part-time, Internship, Contract, Freelance, Temporary

=== STORAGE ===
Applications are saved automatically after every change to
"job-application-tracker-data.json" in the working directory.
There is nothing to save manually; restarting picks up where
you left off. CSV export writes a snapshot of the list and
does not affect the saved data.

=== HELP NAVIGATION ===
Up/Down or j/k  Scroll help text one line
Page Up/Down    Scroll help text five lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#
        .to_string()
}
