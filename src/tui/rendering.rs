use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use super::report_view::{BRIGHT, EMERALD, MUTED, RED, band_color, fallback_lines, report_lines};
use crate::filters::FilterExpr;
use crate::models::{AnalysisResult, HistoryEntry, ScoreBand};
use crate::utils::{first_line_preview, format_millis, strip_ansi_codes};

const STATUS_BG: Color = Color::Rgb(24, 24, 27);
const LIST_PREVIEW_CHARS: usize = 40;

/// Everything the status bar and panes need besides the entries
pub struct RenderState<'a> {
    pub search_query: &'a str,
    pub total_count: usize,
    pub risk_filter: &'a FilterExpr,
    pub filter_error: Option<&'a str>,
    pub status_message: Option<&'a StatusMessage>,
    pub preview_scroll: u16,
    pub confirm_clear: bool,
}

/// Render the entire UI
///
/// `report` is the full record of the selected entry; `None` shows the summary-only fallback.
pub fn render_ui(
    frame: &mut Frame,
    entries: &[&HistoryEntry],
    selected_idx: usize,
    report: Option<&AnalysisResult>,
    state: &RenderState,
) {
    let layout = AppLayout::new(frame.area());

    render_search(frame, layout.search_area, state.search_query);
    render_history_list(frame, layout.list_area, entries, selected_idx);
    render_report(frame, layout.report_area, entries.get(selected_idx).copied(), report, state);
    render_status_bar(frame, layout.status_area, entries.len(), selected_idx, state);
}

fn render_search(frame: &mut Frame, area: Rect, query: &str) {
    let line = Line::from(vec![
        Span::styled(" Search: ", Style::default().fg(MUTED)),
        Span::styled(query.to_string(), Style::default().fg(BRIGHT)),
        Span::styled("▏", Style::default().fg(EMERALD)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_history_list(
    frame: &mut Frame,
    area: Rect,
    entries: &[&HistoryEntry],
    selected_idx: usize,
) {
    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let score_style = Style::default().fg(band_color(ScoreBand::from_score(entry.score)));
            let content = Line::from(vec![
                Span::styled(format!("{:>3} ", entry.score), score_style),
                Span::raw(format!(
                    "{} | {} | {}",
                    format_millis(entry.timestamp),
                    strip_ansi_codes(&entry.file_name),
                    first_line_preview(&strip_ansi_codes(&entry.summary), LIST_PREVIEW_CHARS)
                )),
            ]);

            let style = if idx == selected_idx {
                Style::default().fg(BRIGHT).bg(EMERALD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(" History "),
    );

    frame.render_widget(list, area);
}

fn render_report(
    frame: &mut Frame,
    area: Rect,
    entry: Option<&HistoryEntry>,
    report: Option<&AnalysisResult>,
    state: &RenderState,
) {
    let (title, content) = match (entry, report) {
        (Some(entry), Some(report)) => (
            pane_title(entry),
            Text::from(report_lines(report, state.risk_filter)),
        ),
        (Some(entry), None) => (pane_title(entry), Text::from(fallback_lines(entry))),
        (None, _) => (" Report ".to_string(), Text::from("No analysis selected")),
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.preview_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn pane_title(entry: &HistoryEntry) -> String {
    format!(" {} ", strip_ansi_codes(&entry.file_name))
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    matched_count: usize,
    selected_idx: usize,
    state: &RenderState,
) {
    let error_style = Style::default().fg(RED).bg(STATUS_BG);
    let normal_style = Style::default().fg(BRIGHT).bg(STATUS_BG);

    let (status_text, style) = if state.confirm_clear {
        (
            format!(
                " Delete all {} analyses? Ctrl+X again to confirm, any other key cancels ",
                state.total_count
            ),
            error_style,
        )
    } else if let Some(error) = state.filter_error {
        (format!(" [ERROR] {} ", error), error_style)
    } else if let Some(message) = state.status_message {
        let style = match message.message_type {
            MessageType::Success => Style::default().fg(EMERALD).bg(STATUS_BG),
            MessageType::Error => error_style,
        };
        (format!(" {} ", message.text), style)
    } else if state.total_count == 0 {
        (" No analyses yet | Ctrl+C: quit ".to_string(), normal_style)
    } else {
        let mut parts = vec!["[HISTORY]".to_string()];

        if matched_count < state.total_count {
            parts.push(format!("{}/{} matched", matched_count, state.total_count));
        } else {
            parts.push(format!("{} entries", state.total_count));
        }
        if !state.risk_filter.is_empty() {
            let filter = state.search_query.split_once('|').map_or("", |(f, _)| f.trim());
            parts.push(format!("risks: {}", filter));
        }
        if matched_count > 0 {
            parts.push(format!("entry {}/{}", selected_idx + 1, matched_count));
        }
        parts.push("Enter: filter risks".to_string());
        parts.push("Ctrl+Y: copy email".to_string());
        parts.push("Ctrl+D: delete".to_string());
        parts.push("Ctrl+X: clear".to_string());
        parts.push("Ctrl+C: quit".to_string());

        (format!(" {} ", parts.join(" | ")), normal_style)
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
