//! Task detail screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::views::status_color;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(task) = app.detail.as_ref() else {
        return;
    };

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                task.title.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  status: "),
            Span::styled(
                task.status.to_string(),
                Style::default().fg(status_color(task.status)),
            ),
        ]),
        Line::from(vec![
            Span::raw("  id: "),
            Span::styled(task.id.as_str(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(format!("  {}", task.description)),
    ];

    let detail = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Task ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(detail, area);
}
