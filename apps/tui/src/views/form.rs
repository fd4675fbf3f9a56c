//! Add/edit form screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, FormField, FormMode};
use crate::views::status_color;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.form.as_ref() else {
        return;
    };

    let title = match form.mode {
        FormMode::Add => " New Task ",
        FormMode::Edit { .. } => " Edit Task ",
    };

    let mut text = vec![Line::from("")];

    if let Some(ref error) = form.error {
        text.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        text.push(Line::from(""));
    }

    text.push(field_line(
        "title",
        &form.title,
        form.focus == FormField::Title,
    ));
    text.push(Line::from(""));
    text.push(field_line(
        "description",
        &form.description,
        form.focus == FormField::Description,
    ));
    text.push(Line::from(""));

    let status_focused = form.focus == FormField::Status;
    text.push(Line::from(vec![
        Span::styled(
            format!("  {} status: ", if status_focused { ">" } else { " " }),
            label_style(status_focused),
        ),
        Span::styled(
            format!("< {} >", form.status),
            Style::default().fg(status_color(form.status)),
        ),
    ]));

    if form.submitting {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "  Saving...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {} {label}: ", if focused { ">" } else { " " }),
            label_style(focused),
        ),
        Span::raw(value),
        Span::raw(if focused { "█" } else { "" }),
    ])
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}
