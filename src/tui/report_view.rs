//! Styled report lines for the preview pane.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::filters::FilterExpr;
use crate::markdown::{Block, InlineSpan, blocks};
use crate::models::{AnalysisResult, HistoryEntry, RiskItem, ScoreBand, Severity};
use crate::report::{BULLET, FALLBACK_NOTICE, visible_risks};
use crate::utils::strip_ansi_codes;

pub const MUTED: Color = Color::Rgb(113, 113, 122);
pub const BRIGHT: Color = Color::Rgb(250, 250, 250);
pub const EMERALD: Color = Color::Rgb(16, 185, 129);
pub const AMBER: Color = Color::Rgb(245, 158, 11);
pub const RED: Color = Color::Rgb(239, 68, 68);
const SKY: Color = Color::Rgb(56, 189, 248);

pub fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Low => EMERALD,
        ScoreBand::Medium => AMBER,
        ScoreBand::High => RED,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical | Severity::Severe => RED,
        Severity::High => AMBER,
        Severity::Medium => SKY,
        Severity::Low | Severity::Unknown => MUTED,
    }
}

/// Full report for the preview pane
pub fn report_lines(result: &AnalysisResult, filter: &FilterExpr) -> Vec<Line<'static>> {
    let band = result.score_band();
    let counts = result.severity_counts();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("Score {}/100  ", result.score), bold),
            Span::styled(band.headline(), Style::default().fg(band_color(band))),
        ]),
        Line::styled(band.recommendation(), Style::default().fg(MUTED)),
        Line::default(),
        Line::from(vec![
            Span::styled(format!("{} critical  ", counts.critical), Style::default().fg(RED)),
            Span::styled(format!("{} high  ", counts.high), Style::default().fg(AMBER)),
            Span::styled(format!("{} medium", counts.medium), Style::default().fg(SKY)),
        ]),
        Line::default(),
    ];

    let risks = visible_risks(result, filter, "");
    lines.push(section_title(format!("Risks ({} of {})", risks.len(), result.risks.len())));
    if risks.is_empty() {
        let notice = "No risks match the current filters.";
        lines.push(Line::styled(notice, Style::default().fg(MUTED)));
    }
    for risk in risks {
        lines.extend(risk_lines(risk));
    }

    lines.push(Line::default());
    lines.push(section_title("Contract summary".to_string()));
    lines.extend(plain_lines(&result.contract_summary));

    if let Some(explanation) = result.explanation.as_deref().filter(|e| !e.trim().is_empty()) {
        lines.push(Line::default());
        lines.push(section_title("AI explanation".to_string()));
        lines.extend(markdown_lines(explanation));
    }

    if let Some(email) = result.negotiation_email.as_deref().filter(|e| !e.trim().is_empty()) {
        lines.push(Line::default());
        lines.push(section_title("Negotiation email (Ctrl+Y to copy)".to_string()));
        lines.extend(plain_lines(email.trim_end()));
    }

    lines
}

/// Summary and notice for an entry without a stored report
pub fn fallback_lines(entry: &HistoryEntry) -> Vec<Line<'static>> {
    let band = ScoreBand::from_score(entry.score);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Score {}/100  ", entry.score),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(band.headline(), Style::default().fg(band_color(band))),
        ]),
        Line::default(),
    ];
    lines.extend(plain_lines(&entry.summary));
    lines.push(Line::default());
    lines.push(Line::styled(
        FALLBACK_NOTICE,
        Style::default().fg(AMBER).add_modifier(Modifier::ITALIC),
    ));
    lines
}

fn section_title(title: String) -> Line<'static> {
    let style = Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    Line::styled(title, style)
}

fn risk_lines(risk: &RiskItem) -> [Line<'static>; 2] {
    let color = severity_color(risk.severity_level());
    let mut header = vec![
        Span::styled(
            format!("[{}] ", clean(&risk.severity)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(clean(&risk.category)),
        Span::styled(
            format!(" · {}", clean(&risk.expectation_check)),
            Style::default().fg(MUTED),
        ),
    ];
    if let Some(confidence) = risk.confidence {
        header.push(Span::styled(
            format!(" · {:.0}%", confidence * 100.0),
            Style::default().fg(MUTED),
        ));
    }
    [Line::from(header), Line::from(format!("  {}", clean(&risk.finding)))]
}

fn plain_lines(text: &str) -> Vec<Line<'static>> {
    text.lines().map(|line| Line::from(clean(line))).collect()
}

/// One styled line per markdown input line
pub fn markdown_lines(text: &str) -> Vec<Line<'static>> {
    blocks(text).map(|block| block_line(&block)).collect()
}

fn block_line(block: &Block) -> Line<'static> {
    match block {
        Block::LineBreak => Line::default(),
        Block::Heading { level, spans } => {
            let heading = match level {
                1 => Style::default().fg(EMERALD),
                2 => Style::default().fg(SKY),
                _ => Style::default().fg(BRIGHT),
            }
            .add_modifier(Modifier::BOLD);
            Line::from(inline_spans(spans, heading))
        }
        Block::ListItem(spans) => {
            let bullet = Span::styled(format!("  {} ", BULLET), Style::default().fg(MUTED));
            let mut line = vec![bullet];
            line.extend(inline_spans(spans, Style::default()));
            Line::from(line)
        }
        Block::Paragraph(spans) => Line::from(inline_spans(spans, Style::default())),
    }
}

fn inline_spans(spans: &[InlineSpan], base: Style) -> Vec<Span<'static>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        match span {
            InlineSpan::Text(s) => out.push(Span::styled(clean(s), base)),
            InlineSpan::Bold(s) => {
                out.push(Span::styled(clean(s), base.add_modifier(Modifier::BOLD)))
            }
            InlineSpan::Italic(s) => {
                out.push(Span::styled(clean(s), base.add_modifier(Modifier::ITALIC)))
            }
            InlineSpan::Code(s) => out.push(Span::styled(clean(s), base.fg(AMBER))),
            InlineSpan::Link { text, url } => {
                out.push(Span::styled(clean(text), base.add_modifier(Modifier::UNDERLINED)));
                out.push(Span::styled(format!(" ({})", clean(url)), Style::default().fg(MUTED)));
            }
        }
    }
    out
}

fn clean(text: &str) -> String {
    strip_ansi_codes(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_markdown_styles() {
        let lines = markdown_lines("Pay **now** or _later_, see `4.2` and [terms](https://x.io)");
        let spans = &lines[0].spans;
        assert_eq!(spans[1].content, "now");
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(spans[3].style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(spans[5].style.fg, Some(AMBER));
        assert!(spans[7].style.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(spans[8].content, " (https://x.io)");
    }

    #[test]
    fn test_heading_and_list_lines() {
        let lines = markdown_lines("# Title\n\n- item");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].spans[0].style.fg, Some(EMERALD));
        assert!(lines[1].spans.is_empty());
        assert_eq!(line_text(&lines[2]), "  • item");
    }

    #[test]
    fn test_report_lines_apply_filter() {
        let result = AnalysisResult {
            score: 85,
            risks: vec![
                RiskItem {
                    category: "Payment".into(),
                    severity: "High".into(),
                    finding: "Net 60".into(),
                    expectation_check: "Mismatch".into(),
                    confidence: Some(0.5),
                },
                RiskItem {
                    category: "IP".into(),
                    severity: "Medium".into(),
                    finding: "Broad licence".into(),
                    expectation_check: "AI Flagged".into(),
                    confidence: None,
                },
            ],
            contract_summary: "Summary".into(),
            explanation: None,
            negotiation_email: None,
        };

        let filter = crate::filters::parse_filter("severity:medium").unwrap();
        let text: Vec<String> = report_lines(&result, &filter).iter().map(line_text).collect();
        assert_eq!(text[0], "Score 85/100  Low risk - Contract looks fair");
        assert!(text.contains(&"Risks (1 of 2)".to_string()));
        assert!(text.contains(&"[Medium] IP · AI Flagged".to_string()));
        assert!(!text.iter().any(|l| l.contains("Payment")));
        assert!(!text.iter().any(|l| l.contains("Negotiation email")));
    }

    #[test]
    fn test_fallback_lines_show_notice() {
        let entry = HistoryEntry {
            id: "1".into(),
            timestamp: 0,
            file_name: "old.pdf".into(),
            score: 30,
            summary: "Old summary...".into(),
        };
        let lines = fallback_lines(&entry);
        assert_eq!(line_text(lines.last().unwrap()), FALLBACK_NOTICE);
        assert_eq!(line_text(&lines[2]), "Old summary...");
    }
}
