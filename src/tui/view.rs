use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::navigator::{Navigator, Status, View};
use crate::records::DnsRecord;

const CONTENT_WIDTH: usize = 40;

const LIST_HELP: &str =
    "↑↓ select | a add | e edit | d delete | f filter | s sort | r refresh | q quit";

pub fn render<C>(frame: &mut Frame, navigator: &Navigator<C>) {
    let [title, body, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::styled(
            "Cloudflare DNS Manager",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        title,
    );

    match navigator.view() {
        View::List => render_list(frame, body, navigator),
        View::Add => render_add(frame, body),
        View::Edit { record } => render_edit(frame, body, record),
        View::Delete { target } => render_delete(frame, body, target),
        View::Filter { input } => render_filter(frame, body, input),
    }

    if let Some(message) = navigator.status() {
        let line = match message {
            Status::Info(text) => Line::styled(text.as_str(), Style::default().fg(Color::Green)),
            Status::Error(text) => Line::styled(text.as_str(), Style::default().fg(Color::Red)),
        };
        frame.render_widget(Paragraph::new(line), status);
    }
}

fn render_list<C>(frame: &mut Frame, area: Rect, navigator: &Navigator<C>) {
    let [summary, help, table_area, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let faint = Style::default().add_modifier(Modifier::DIM);
    let arrow = if navigator.ascending() { "↑" } else { "↓" };
    let mut text = format!(
        "Total: {} | Filtered: {} | Sort: {} {}",
        navigator.records().len(),
        navigator.filtered().len(),
        navigator.sort_key(),
        arrow
    );
    if !navigator.keyword().is_empty() {
        text.push_str(&format!(" | Filter: \"{}\"", navigator.keyword()));
    }
    frame.render_widget(Paragraph::new(Line::styled(text, faint)), summary);
    frame.render_widget(Paragraph::new(Line::styled(LIST_HELP, faint)), help);

    if navigator.filtered().is_empty() {
        frame.render_widget(Paragraph::new("No DNS records found"), table_area);
        return;
    }

    let (start, records) = navigator.page_records();
    let rows = records.iter().map(|record| {
        Row::new(vec![
            Cell::from(record.zone_name.clone()),
            Cell::from(record.name.clone()),
            Cell::from(record.record_type.clone()),
            Cell::from(truncate(&record.content, CONTENT_WIDTH)),
            Cell::from(record.ttl_label()),
            Cell::from(if record.proxied { "yes" } else { "no" }),
        ])
    });

    let header = Row::new(vec!["Zone", "Name", "Type", "Content", "TTL", "Proxied"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Length(20),
        Constraint::Length(24),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(6),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::TOP))
        .row_highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    // The table scrolls within the page when the area is shorter than a page.
    let mut state = TableState::default().with_selected(Some(navigator.cursor() - start));
    frame.render_stateful_widget(table, table_area, &mut state);

    if navigator.page_count() > 1 {
        let page = format!("Page {}/{}", navigator.page() + 1, navigator.page_count());
        frame.render_widget(Paragraph::new(Line::styled(page, faint)), footer);
    }
}

fn render_add(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("Add DNS record (Esc to go back)"),
        Line::from(""),
        Line::from("Records are added with the add command:"),
        Line::from("  cf-dns-manager add <zone> <name> <type> <content> --ttl <ttl> --proxied true"),
        Line::from(""),
        Line::from("Example:"),
        Line::from("  cf-dns-manager add example.com www A 192.168.1.1 --ttl 300 --proxied true"),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_edit(frame: &mut Frame, area: Rect, record: &DnsRecord) {
    let mut lines = vec![
        Line::from("Edit DNS record (Esc to go back)"),
        Line::from(""),
        Line::from("Records are edited with the update command:"),
        Line::from(
            "  cf-dns-manager update <record-id> <zone> <name> <type> <content> --ttl <ttl> --proxied true",
        ),
        Line::from(""),
    ];
    lines.extend(record_details(record));
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_delete(frame: &mut Frame, area: Rect, target: &DnsRecord) {
    let mut lines = vec![
        Line::from("Delete DNS record (Esc to cancel)"),
        Line::from(""),
        Line::from("Delete the following record?"),
        Line::from(""),
    ];
    lines.extend(record_details(target));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("y", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" to confirm, Esc to cancel"),
    ]));
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_filter(frame: &mut Frame, area: Rect, input: &str) {
    let lines = vec![
        Line::from("Filter records by name, zone or content (Enter to apply, Esc to cancel)"),
        Line::from(""),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(input.to_string(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn record_details(record: &DnsRecord) -> Vec<Line<'static>> {
    vec![
        Line::from(format!("Record ID: {}", record.id)),
        Line::from(format!("Zone:      {}", record.zone_name)),
        Line::from(format!("Name:      {}", record.name)),
        Line::from(format!("Type:      {}", record.record_type)),
        Line::from(format!("Content:   {}", record.content)),
    ]
}

/// Shortens `text` to at most `max` characters, ending in "..." when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 10), "abcdefghij");
        assert_eq!(truncate("abcdefghijk", 10), "abcdefg...");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }
}
