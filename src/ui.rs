use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line as TextLine,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::render::{Presentation, desktop::tooltip_lines, draw_legend, legend_lines};
use crate::state::AppState;

pub fn draw(f: &mut Frame, state: &mut AppState) {
    match state.view {
        Presentation::Desktop(_) => draw_desktop(f, state),
        Presentation::Mobile(_) => draw_mobile(f, state),
    }
}

fn draw_desktop(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(f.area());

    // Left: auctions
    let items: Vec<ListItem> = state
        .reports
        .iter()
        .map(|r| ListItem::new(r.label().to_string()))
        .collect();
    let mut list_state = ListState::default();
    list_state.select((!state.reports.is_empty()).then_some(state.selected));
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Auctions"))
        .highlight_symbol(">> ")
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    // Centre: map
    if let Presentation::Desktop(view) = &mut state.view {
        view.draw(f, chunks[1], &state.scene);
    }

    // Right: info + legend
    let legend_height = legend_lines(&state.scene).len() as u16 + 2;
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(legend_height)])
        .split(chunks[2]);

    let info = Paragraph::new(info_lines(state))
        .block(Block::default().borders(Borders::ALL).title("Info"))
        .wrap(Wrap { trim: true });
    f.render_widget(info, right[0]);
    draw_legend(f, right[1], &state.scene);
}

fn info_lines(state: &AppState) -> Vec<TextLine<'static>> {
    let mut lines = match state.current_report() {
        Some(report) => vec![
            TextLine::styled(report.label().to_string(), Style::default().add_modifier(Modifier::BOLD)),
            TextLine::from(format!("{} sales", state.model.sale_count)),
        ],
        None => vec![TextLine::from("No auction reports")],
    };
    lines.push(TextLine::default());
    match state.view.focused().and_then(|id| state.scene.region(id)) {
        Some(region) => lines.extend(tooltip_lines(region)),
        None => lines.push(TextLine::styled("Hover a province", Style::default().fg(Color::DarkGray))),
    }
    lines.push(TextLine::default());
    lines.extend(AppState::HELP_TEXT.lines().map(|l| TextLine::from(l.to_string())));
    lines
}

fn draw_mobile(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(f.area());

    let title = state.current_report().map_or("No auction reports", |r| r.label());
    let header = Paragraph::new(format!("{title}  ({}/{})", state.selected + 1, state.reports.len().max(1)))
        .block(Block::default().borders(Borders::ALL).title("↑/↓ auction · m layout · q quit"));
    f.render_widget(header, centered(chunks[0], 48));

    if let Presentation::Mobile(view) = &mut state.view {
        view.draw(f, chunks[1], &state.scene);
    }
}

fn centered(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect { x: area.x + (area.width - width) / 2, width, ..area }
}
