//! Rendering for each screen.

mod detail;
mod form;
mod list;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, View};
use domain_tasks::TaskStatus;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let [body_area, footer_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

    match app.view {
        View::List => list::render(frame, body_area, app),
        View::Detail => detail::render(frame, body_area, app),
        View::Form => form::render(frame, body_area, app),
    }

    render_footer(frame, footer_area, app);
}

/// Display color for a task status.
pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::Yellow,
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::Completed => Color::Green,
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.view {
        View::List if app.filter_mode => " type to filter | Enter/Esc: done ",
        View::List => {
            " q: quit | j/k: move | Enter: detail | a: add | e: edit | d: delete | n/p: page | /: filter | s: status "
        }
        View::Detail => " Esc: back | e: edit ",
        View::Form => " Tab: next field | Enter: save | Esc: cancel ",
    };

    let status = if app.store.loading {
        "Loading..."
    } else if let Some(ref error) = app.store.error {
        error.as_str()
    } else {
        app.status_message.as_deref().unwrap_or("Ready")
    };

    let status_style = if app.store.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let footer = Line::from(vec![
        Span::styled(status, status_style),
        Span::raw(" | "),
        Span::styled(help, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(footer), area);
}
