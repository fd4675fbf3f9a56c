//! Task list screen.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};

use crate::app::App;
use crate::views::status_color;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let [filter_area, table_area, pager_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_filter(frame, filter_area, app);
    render_table(frame, table_area, app);
    render_pager(frame, pager_area, app);
}

fn render_filter(frame: &mut Frame, area: Rect, app: &App) {
    let status_label = match app.store.filter_status {
        Some(status) => status.to_string(),
        None => "all".to_string(),
    };

    let border_style = if app.filter_mode {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::raw(" search: "),
        Span::styled(
            app.store.filter_text.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(if app.filter_mode { "█" } else { "" }),
        Span::raw("   status: "),
        Span::styled(
            status_label,
            Style::default().fg(app
                .store
                .filter_status
                .map_or(Color::White, status_color)),
        ),
    ]);

    let filter = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Filter ")
            .border_style(border_style),
    );
    frame.render_widget(filter, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let tasks = app.store.filtered_tasks();

    if tasks.is_empty() {
        let message = if app.store.tasks.is_empty() && !app.store.is_filtered() {
            "No tasks added yet..."
        } else {
            "No matching tasks found."
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::DarkGray),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Tasks ")
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Title", "Description", "Status"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = tasks
        .iter()
        .map(|task| {
            Row::new(vec![
                Span::raw(task.title.clone()),
                Span::raw(task.description.clone()),
                Span::styled(
                    task.status.to_string(),
                    Style::default().fg(status_color(task.status)),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(50),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Tasks ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    let mut state = TableState::default();
    state.select(Some(app.selected.min(tasks.len() - 1)));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_pager(frame: &mut Frame, area: Rect, app: &App) {
    let pager = Line::from(Span::styled(
        format!(
            " page {} of {} | {} tasks total ",
            app.store.page,
            app.store.total_pages(),
            app.store.total
        ),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(pager), area);
}
