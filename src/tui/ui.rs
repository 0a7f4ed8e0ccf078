use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::models::{BandRecord, BandStatus};
use crate::render::{display_description, display_image, genre_tags};

use super::state::FilterChoice;
use super::{App, FocusArea};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_search(frame, app, chunks[0]);
    draw_filters(frame, app, chunks[1]);
    draw_notice(frame, app, chunks[2]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);

    draw_results(frame, app, body[0]);
    draw_card(frame, app, body[1]);
    draw_logs(frame, app, chunks[4]);
    draw_footer(frame, chunks[5]);
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title("Search Band")
        .borders(Borders::ALL)
        .border_style(border_style(app.focus, FocusArea::Search));

    let paragraph = Paragraph::new(format!("> {}", app.search_input))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn draw_filters(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    draw_filter(frame, "Genre", &app.genre, app.focus, FocusArea::Genre, columns[0]);
    draw_filter(frame, "Country", &app.country, app.focus, FocusArea::Country, columns[1]);
    draw_filter(frame, "Status", &app.status, app.focus, FocusArea::Status, columns[2]);
}

fn draw_filter(
    frame: &mut Frame,
    title: &str,
    choice: &FilterChoice,
    focus: FocusArea,
    area_focus: FocusArea,
    area: Rect,
) {
    let paragraph = Paragraph::new(format!("◀ {} ▶", choice.label())).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border_style(focus, area_focus)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_notice(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.is_loading() {
        Line::from("Loading bands…").style(Style::default().fg(Color::Yellow))
    } else if let Some(notice) = &app.notice {
        Line::from(notice.clone()).style(Style::default().fg(Color::LightRed))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = if app.results.is_empty() {
        let text = app.notice.clone().unwrap_or_else(|| "No bands loaded".to_string());
        vec![ListItem::new(text).style(dim_style())]
    } else {
        app.results
            .iter()
            .map(|band| ListItem::new(band_lines(band)))
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(app.results_title())
                .borders(Borders::ALL)
                .border_style(border_style(app.focus, FocusArea::Results)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.result_state);
}

fn draw_card(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title("Band").borders(Borders::ALL);

    let Some(band) = app.selected_band() else {
        let paragraph = Paragraph::new(Line::from("Select a band to see details").style(dim_style()))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let tags = genre_tags(band)
        .into_iter()
        .flat_map(|tag| {
            [
                Span::styled(format!(" {tag} "), Style::default().fg(Color::Black).bg(Color::Red)),
                Span::raw(" "),
            ]
        })
        .collect::<Vec<_>>();

    let lines = vec![
        Line::from(Span::styled(
            band.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(display_description(band)),
        Line::from(""),
        Line::from(tags),
        Line::from(""),
        field_line("Country", &band.country),
        field_line("Genre", &band.genre),
        Line::from(vec![
            Span::styled("Status: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(band.status.to_string(), status_style(band.status)),
        ]),
        field_line("Image", &display_image(band)),
        field_line("Profile", &band.profile_link),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_logs(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .logs
        .iter()
        .rev()
        .take(100)
        .map(|entry| Line::from(entry.clone()))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Activity")
                .borders(Borders::ALL)
                .border_style(border_style(app.focus, FocusArea::Logs)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(
        "Tab: cycle • Enter: search • ◀/▶: change filter • Ctrl+R: clear filters • q: quit",
    )
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(footer, area);
}

fn band_lines(band: &BandRecord) -> Vec<Line<'static>> {
    let marker = if band.is_enriched() { "★" } else { " " };
    vec![
        Line::from(format!("{marker} {}", band.name)),
        Line::from(format!("   {}", band.summary_line())).style(dim_style()),
    ]
}

fn field_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(value.to_string()),
    ])
}

fn status_style(status: BandStatus) -> Style {
    match status {
        BandStatus::Active => Style::default().fg(Color::LightGreen),
        BandStatus::SplitUp => Style::default().fg(Color::LightRed),
        BandStatus::OnHold | BandStatus::ChangedName => Style::default().fg(Color::Yellow),
        BandStatus::Unknown => dim_style(),
    }
}

fn border_style(current: FocusArea, area: FocusArea) -> Style {
    if current == area {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
