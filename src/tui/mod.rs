// TUI module for rendering the terminal interface
pub mod colors;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::{blend, centered_rect, first_visible_row};
pub use input::{handle_key_event, handle_mouse_event, KeyAction};

use crate::animation::{EntryAnimator, RowFrame, ENTRY_OFFSET};
use crate::app::{App, Screen};
use crate::domain::screen::{DetailPage, DetailScreen, ListScreen, ScreenState};
use crate::domain::{EntityConfig, EntityKind, ResourceSummary};
use crate::gesture::SwipeTracker;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};
use std::time::Instant;

/// Terminal lines per list row: three of content, one of margin
pub const ROW_HEIGHT: u16 = 4;

/// Width of the "Details" action revealed by a full swipe
const ACTION_WIDTH: u16 = 12;

/// Width of the label column on detail screens
const LABEL_WIDTH: usize = 20;

/// Renders the whole application for one frame
pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    match app.screen() {
        Screen::List(screen) => render_list_screen(frame, screen, app.animator(), app.swipe(), now),
        Screen::Detail(screen) => render_detail_screen(frame, screen),
    }

    if app.show_help() {
        render_help_overlay(frame);
    }
}

/// Renders a list screen: entity tabs, search box, rows, footer
pub fn render_list_screen(
    frame: &mut Frame,
    screen: &ListScreen,
    animator: &EntryAnimator,
    swipe: &SwipeTracker,
    now: Instant,
) {
    let [tabs, search, rows, footer] = list_layout(frame.area());

    render_tabs(frame, tabs, screen.kind());
    render_search_box(frame, search, screen);
    render_rows(frame, rows, screen, animator, swipe, now);
    render_footer(frame, footer, LIST_CONTROLS);
}

/// Splits a list screen into tabs, search box, rows and footer
pub fn list_layout(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Entity tabs
            Constraint::Length(3), // Search box
            Constraint::Min(0),    // Rows
            Constraint::Length(3), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Index into the filtered rows of the row drawn at (`column`, `line`).
///
/// Mirrors the windowing in `render_rows`; cells outside the rows area or
/// below the last row hit nothing.
pub fn row_at(rows_area: Rect, screen: &ListScreen, column: u16, line: u16) -> Option<usize> {
    let inside = column >= rows_area.x
        && column < rows_area.right()
        && line >= rows_area.y
        && line < rows_area.bottom();
    if !inside || screen.state().is_loading() {
        return None;
    }

    let capacity = (rows_area.height / ROW_HEIGHT).max(1) as usize;
    let first = first_visible_row(screen.highlighted(), capacity);
    let index = first + ((line - rows_area.y) / ROW_HEIGHT) as usize;
    (index < screen.visible().len()).then_some(index)
}

fn render_tabs(frame: &mut Frame, area: Rect, active: EntityKind) {
    let titles: Vec<Line> = EntityKind::ALL
        .iter()
        .map(|kind| Line::from(format!(" {} ", kind.config().title)))
        .collect();
    let selected = EntityKind::ALL.iter().position(|k| *k == active).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .title(" Holonet ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .style(Style::default().fg(TEXT_SECONDARY))
        .highlight_style(
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");

    frame.render_widget(tabs, area);
}

fn render_search_box(frame: &mut Frame, area: Rect, screen: &ListScreen) {
    let line = if screen.query().is_empty() {
        Line::from(Span::styled(
            screen.config().search_placeholder,
            Style::default().fg(TEXT_MUTED),
        ))
    } else {
        Line::from(vec![
            Span::styled(screen.query(), Style::default().fg(TEXT_PRIMARY)),
            Span::styled("▏", Style::default().fg(ACCENT_HIGHLIGHT)),
        ])
    };

    let search = Paragraph::new(line).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR)),
    );

    frame.render_widget(search, area);
}

fn render_rows(
    frame: &mut Frame,
    area: Rect,
    screen: &ListScreen,
    animator: &EntryAnimator,
    swipe: &SwipeTracker,
    now: Instant,
) {
    if screen.state().is_loading() {
        frame.render_widget(message_widget("Loading..."), area);
        return;
    }

    let visible = screen.visible();
    if visible.is_empty() {
        frame.render_widget(message_widget("No results."), area);
        return;
    }

    let capacity = (area.height / ROW_HEIGHT).max(1) as usize;
    let first = first_visible_row(screen.highlighted(), capacity);
    let config = screen.config();

    for (slot, (index, &summary)) in visible
        .iter()
        .enumerate()
        .skip(first)
        .take(capacity)
        .enumerate()
    {
        let y = area.y + slot as u16 * ROW_HEIGHT;
        if y >= area.bottom() {
            break;
        }
        let row_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: ROW_HEIGHT.min(area.bottom() - y),
        };
        let swipe_progress = if swipe.active_row() == Some(index) {
            swipe.progress()
        } else {
            0.0
        };
        let row = RowView {
            config,
            summary,
            highlighted: index == screen.highlighted(),
            anim: animator.frame(&summary.row_key(config), now),
            swipe_progress,
        };
        render_row(frame, row_area, &row);
    }
}

/// Everything needed to draw one list row
struct RowView<'a> {
    config: &'a EntityConfig,
    summary: &'a ResourceSummary,
    highlighted: bool,
    anim: RowFrame,
    swipe_progress: f32,
}

fn render_row(frame: &mut Frame, area: Rect, row: &RowView) {
    // Offset maps onto at most the one spare margin line
    let shift = ((row.anim.offset / ENTRY_OFFSET).round() as u16).min(ROW_HEIGHT - 3);
    let content = Rect {
        y: area.y + shift,
        height: area.height.saturating_sub(shift).min(3),
        ..area
    };
    if content.height == 0 {
        return;
    }

    let primary = blend(BG_DARK, TEXT_PRIMARY, row.anim.opacity);
    let secondary = blend(BG_DARK, TEXT_SECONDARY, row.anim.opacity);
    let border = if row.highlighted {
        blend(BG_DARK, ACCENT_HIGHLIGHT, row.anim.opacity)
    } else {
        blend(BG_DARK, BORDER_COLOR, row.anim.opacity)
    };

    let mut lines = vec![Line::from(Span::styled(
        row.summary.primary_name(row.config),
        Style::default().fg(primary).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(row.config.summary_fields.iter().map(|field| {
        Line::from(Span::styled(
            format!("{}: {}", field.label, row.summary.display(field.key)),
            Style::default().fg(secondary),
        ))
    }));

    let reveal = ((row.swipe_progress * ACTION_WIDTH as f32).round() as u16).min(content.width);
    let (body_area, action_area) = if reveal > 0 {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(reveal)])
            .split(content);
        (split[0], Some(split[1]))
    } else {
        (content, None)
    };

    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::LEFT)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(body, body_area);

    if let Some(action_area) = action_area {
        let action = Paragraph::new(vec![Line::from(""), Line::from("Details")])
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(TEXT_PRIMARY)
                    .bg(ACCENT_ACTION)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(action, action_area);
    }
}

/// Renders a detail screen: header, fields and reference lists, footer
pub fn render_detail_screen(frame: &mut Frame, screen: &DetailScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", screen.config().title),
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(screen.url(), Style::default().fg(TEXT_MUTED)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR)),
    );
    frame.render_widget(header, chunks[0]);

    match screen.state() {
        ScreenState::Loading => {
            frame.render_widget(message_widget("Loading details..."), chunks[1])
        }
        ScreenState::Empty => {
            frame.render_widget(message_widget("No details available."), chunks[1])
        }
        ScreenState::Loaded(_) => {
            let lines = screen.page().map(|page| detail_lines(&page)).unwrap_or_default();
            let content = Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(BORDER_COLOR)),
                )
                .style(Style::default().fg(TEXT_PRIMARY))
                .wrap(Wrap { trim: false })
                .scroll((screen.scroll(), 0));
            frame.render_widget(content, chunks[1]);
        }
    }

    render_footer(frame, chunks[2], DETAIL_CONTROLS);
}

/// Lines for a populated detail page
pub fn detail_lines(page: &DetailPage) -> Vec<Line<'static>> {
    let subtitle = Style::default()
        .fg(ACCENT_HIGHLIGHT)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            page.title.clone(),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (label, value) in &page.fields {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<width$}", format!("{}:", label), width = LABEL_WIDTH),
                Style::default()
                    .fg(ACCENT_LABEL)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(value.clone()),
        ]));
    }

    for (label, text) in &page.text_sections {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(*label, subtitle)));
        lines.extend(text.lines().map(|l| Line::from(l.to_string())));
    }

    for section in &page.references {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(section.label, subtitle)));
        let placeholder = section.items.is_empty();
        lines.extend(section.lines().into_iter().map(|entry| {
            if placeholder {
                Line::from(Span::styled(entry, Style::default().fg(TEXT_SECONDARY)))
            } else {
                Line::from(format!("  • {}", entry))
            }
        }));
    }

    lines
}

/// Centered status text inside a bordered block
fn message_widget(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR)),
    )
    .alignment(Alignment::Center)
}

const LIST_CONTROLS: &[(&str, &str)] = &[
    ("type ", "Search"),
    ("↑↓ ", "Move"),
    ("→/Enter ", "Details"),
    ("Tab ", "Next list"),
    ("F1 ", "Help"),
    ("Esc ", "Quit"),
];

const DETAIL_CONTROLS: &[(&str, &str)] = &[
    ("↑↓ ", "Scroll"),
    ("Esc ", "Back"),
    ("F1 ", "Help"),
    ("Ctrl+C ", "Quit"),
];

fn render_footer(frame: &mut Frame, area: Rect, controls: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (i, (key, label)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  │  "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(label.to_string(), Style::default().fg(TEXT_SECONDARY)));
    }

    let footer = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let help_area = centered_rect(60, 70, area);

    // Clear background
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let entry = |key: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:<10}", key), Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::raw(text),
        ])
    };

    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        entry("type", "Search the current list"),
        entry("Bksp", "Delete a search character"),
        entry("Ctrl+U", "Clear the search"),
        entry("↑ / ↓", "Move highlight / scroll"),
        entry("→", "Swipe the highlighted row"),
        entry("Enter", "Open details"),
        entry("Tab", "Next list (Shift+Tab: previous)"),
        entry("Esc", "Back (quits on a list)"),
        entry("F1", "Toggle help"),
        entry("Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Drag a row sideways with the mouse to swipe it.",
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceDetail;
    use crate::error::HolonetError;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::{json, Value};

    fn buffer_string(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn summaries(value: Value) -> Vec<ResourceSummary> {
        serde_json::from_value(value).unwrap()
    }

    fn draw_list(screen: &ListScreen, swipe: &SwipeTracker) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut animator = EntryAnimator::new(false);
        let config = screen.config();
        let now = Instant::now();
        animator.sync(screen.visible().iter().map(|s| s.row_key(config)), now);

        terminal
            .draw(|frame| render_list_screen(frame, screen, &animator, swipe, now))
            .unwrap();
        buffer_string(&terminal)
    }

    fn draw_detail(screen: &DetailScreen) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_detail_screen(frame, screen))
            .unwrap();
        buffer_string(&terminal)
    }

    mod list_render_tests {
        use super::*;

        #[test]
        fn test_render_loading() {
            let screen = ListScreen::new(EntityKind::Planets);
            let out = draw_list(&screen, &SwipeTracker::default());
            assert!(out.contains("Loading..."));
            assert!(out.contains("Search Planets"));
        }

        #[test]
        fn test_render_rows() {
            let mut screen = ListScreen::new(EntityKind::Planets);
            screen.apply_collection(Ok(summaries(json!([
                {"name": "Tatooine", "climate": "arid", "population": "200000", "url": "u1"},
                {"name": "Hoth", "climate": "frozen", "population": "unknown", "url": "u2"}
            ]))));
            let out = draw_list(&screen, &SwipeTracker::default());
            assert!(out.contains("Tatooine"));
            assert!(out.contains("Climate: arid"));
            assert!(out.contains("Population: 200000"));
            assert!(out.contains("Hoth"));
        }

        #[test]
        fn test_render_filtered_rows() {
            let mut screen = ListScreen::new(EntityKind::Planets);
            screen.apply_collection(Ok(summaries(json!([
                {"name": "Tatooine", "url": "u1"},
                {"name": "Hoth", "url": "u2"}
            ]))));
            screen.set_query("hot");
            let out = draw_list(&screen, &SwipeTracker::default());
            assert!(out.contains("Hoth"));
            assert!(!out.contains("Tatooine"));
            assert!(out.contains("hot"));
        }

        #[test]
        fn test_render_failure_as_no_results() {
            let mut screen = ListScreen::new(EntityKind::Films);
            screen.apply_collection(Err(HolonetError::Status(500)));
            let out = draw_list(&screen, &SwipeTracker::default());
            assert!(out.contains("No results."));
        }

        #[test]
        fn test_render_swipe_action() {
            let mut screen = ListScreen::new(EntityKind::Starships);
            screen.apply_collection(Ok(summaries(json!([
                {"name": "X-wing", "model": "T-65", "manufacturer": "Incom", "url": "s1"}
            ]))));
            let mut swipe = SwipeTracker::default();
            swipe.nudge(0, 40);
            let out = draw_list(&screen, &swipe);
            assert!(out.contains("Details"));
            assert!(out.contains("Model: T-65"));
        }

        #[test]
        fn test_row_at_follows_row_layout() {
            let mut screen = ListScreen::new(EntityKind::Planets);
            screen.apply_collection(Ok(summaries(json!([
                {"name": "Tatooine", "url": "u1"},
                {"name": "Alderaan", "url": "u2"},
                {"name": "Hoth", "url": "u3"}
            ]))));
            let [tabs, search, rows, footer] = list_layout(Rect::new(0, 0, 80, 30));
            assert_eq!(rows.y, 6);

            assert_eq!(row_at(rows, &screen, 10, rows.y), Some(0));
            assert_eq!(row_at(rows, &screen, 10, rows.y + ROW_HEIGHT - 1), Some(0));
            assert_eq!(row_at(rows, &screen, 10, rows.y + ROW_HEIGHT), Some(1));
            assert_eq!(row_at(rows, &screen, 10, rows.y + 2 * ROW_HEIGHT + 1), Some(2));
            // Below the last row
            assert_eq!(row_at(rows, &screen, 10, rows.y + 3 * ROW_HEIGHT), None);

            for area in [tabs, search, footer] {
                assert_eq!(row_at(rows, &screen, 10, area.y + 1), None);
            }
        }

        #[test]
        fn test_row_at_tracks_scrolled_window() {
            let names: Vec<Value> = (0..10)
                .map(|i| json!({"name": format!("Planet {}", i), "url": format!("u{}", i)}))
                .collect();
            let mut screen = ListScreen::new(EntityKind::Planets);
            screen.apply_collection(Ok(summaries(Value::Array(names))));
            for _ in 0..7 {
                screen.move_down();
            }
            // 12 lines hold three rows, so the window starts at row 5
            let rows = Rect::new(0, 6, 80, 12);
            assert_eq!(row_at(rows, &screen, 0, 6), Some(5));
            assert_eq!(row_at(rows, &screen, 0, 17), Some(7));
        }

        #[test]
        fn test_row_at_ignores_loading_screen() {
            let screen = ListScreen::new(EntityKind::Planets);
            let rows = list_layout(Rect::new(0, 0, 80, 30))[2];
            assert_eq!(row_at(rows, &screen, 10, rows.y), None);
        }

        #[test]
        fn test_render_tabs() {
            let screen = ListScreen::new(EntityKind::Films);
            let out = draw_list(&screen, &SwipeTracker::default());
            assert!(out.contains("Planets"));
            assert!(out.contains("Films"));
            assert!(out.contains("Spaceships"));
        }
    }

    mod detail_render_tests {
        use super::*;

        #[test]
        fn test_render_detail_loading() {
            let screen = DetailScreen::new(EntityKind::Planets, "u1");
            assert!(draw_detail(&screen).contains("Loading details..."));
        }

        #[test]
        fn test_render_detail_empty() {
            let mut screen = DetailScreen::new(EntityKind::Planets, "u1");
            screen.apply_detail(Err(HolonetError::UnexpectedShape("x".into())));
            assert!(draw_detail(&screen).contains("No details available."));
        }

        #[test]
        fn test_render_detail_page() {
            let mut screen = DetailScreen::new(EntityKind::Planets, "u1");
            let props = json!({
                "name": "Tatooine",
                "climate": "arid",
                "residents": [],
                "films": ["f1"]
            });
            screen.apply_detail(Ok(ResourceDetail::new(props.as_object().unwrap().clone())));
            let out = draw_detail(&screen);
            assert!(out.contains("Tatooine"));
            assert!(out.contains("Climate:"));
            assert!(out.contains("arid"));
            assert!(out.contains("No known residents."));
            assert!(out.contains("• f1"));
        }

        #[test]
        fn test_detail_lines_film_sections() {
            let props = json!({
                "title": "A New Hope",
                "opening_crawl": "It is a period\nof civil war."
            });
            let page = DetailPage::build(
                EntityKind::Films.config(),
                &ResourceDetail::new(props.as_object().unwrap().clone()),
            );
            let text: Vec<String> = detail_lines(&page)
                .iter()
                .map(|l| l.to_string())
                .collect();
            assert!(text.contains(&"Opening Crawl".to_string()));
            assert!(text.contains(&"of civil war.".to_string()));
            assert!(text.contains(&"No characters listed.".to_string()));
            assert!(text.contains(&"No planets listed.".to_string()));
        }
    }

    #[test]
    fn test_render_help_overlay() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_help_overlay(frame)).unwrap();
        let out = buffer_string(&terminal);
        assert!(out.contains("Help"));
        assert!(out.contains("Search the current list"));
    }
}
