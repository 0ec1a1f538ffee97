//! Markdown-to-terminal rendering.
//!
//! A line-oriented transform from raw markdown to styled, word-wrapped
//! [`Text`]. It understands the subset that shows up in daily notes:
//! headings, bullet lists, block quotes, fenced code blocks, and inline
//! `code` / **bold** / *italic* spans. Everything else passes through as
//! plain text, so the result is never worse than the input.
//!
//! Callers treat this as an opaque transform: [`render`] returns `None` when
//! it cannot produce usable output (degenerate width), and the viewer falls
//! back to the raw content.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Renders `content` into styled lines wrapped at `width` columns.
///
/// Returns `None` when `width` is zero; callers show the raw content
/// instead.
pub fn render(content: &str, width: usize) -> Option<Text<'static>> {
    if width == 0 {
        return None;
    }

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut in_code_block = false;

    for raw_line in content.lines() {
        let trimmed = raw_line.trim_end();

        if trimmed.trim_start().starts_with("```") {
            in_code_block = !in_code_block;
            lines.push(Line::from(Span::styled(
                trimmed.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
            continue;
        }

        if in_code_block {
            // Code is shown verbatim; wrapping would mangle it.
            lines.push(Line::from(Span::styled(
                raw_line.to_string(),
                Style::default().fg(Color::Yellow),
            )));
            continue;
        }

        if trimmed.is_empty() {
            lines.push(Line::default());
            continue;
        }

        if let Some((level, heading)) = parse_heading(trimmed) {
            let style = heading_style(level);
            for wrapped in wrap(heading, width) {
                lines.push(Line::from(Span::styled(wrapped, style)));
            }
            continue;
        }

        if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            let hang_width = width.saturating_sub(2).max(1);
            for (i, wrapped) in wrap(item, hang_width).into_iter().enumerate() {
                let prefix = if i == 0 { "• " } else { "  " };
                let mut spans = vec![Span::styled(prefix, Style::default().fg(Color::Cyan))];
                spans.extend(parse_inline(&wrapped));
                lines.push(Line::from(spans));
            }
            continue;
        }

        if let Some(quoted) = trimmed.strip_prefix("> ") {
            for wrapped in wrap(quoted, width.saturating_sub(2).max(1)) {
                lines.push(Line::from(Span::styled(
                    format!("│ {}", wrapped),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            continue;
        }

        for wrapped in wrap(trimmed, width) {
            lines.push(Line::from(parse_inline(&wrapped)));
        }
    }

    Some(Text::from(lines))
}

fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) {
        if let Some(rest) = line[hashes..].strip_prefix(' ') {
            return Some((hashes, rest));
        }
    }
    None
}

fn heading_style(level: usize) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    if level == 1 {
        style.fg(Color::Cyan)
    } else {
        style.fg(Color::Blue)
    }
}

/// Splits a wrapped line into styled inline spans.
///
/// Markers without a matching closer are emitted literally, so unbalanced
/// input degrades to plain text instead of disappearing.
fn parse_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        let marker = [("`", 1), ("**", 2), ("*", 1)]
            .into_iter()
            .filter_map(|(m, len)| rest.find(m).map(|pos| (pos, m, len)))
            .min_by_key(|&(pos, _, _)| pos);

        let Some((pos, marker, marker_len)) = marker else {
            plain.push_str(rest);
            break;
        };

        let after = &rest[pos + marker_len..];
        let Some(end) = after.find(marker) else {
            plain.push_str(&rest[..pos + marker_len]);
            rest = after;
            continue;
        };

        plain.push_str(&rest[..pos]);
        if !plain.is_empty() {
            spans.push(Span::raw(std::mem::take(&mut plain)));
        }

        let inner = after[..end].to_string();
        let styled = match marker {
            "`" => Span::styled(inner, Style::default().fg(Color::Yellow)),
            "**" => Span::styled(inner, Style::default().add_modifier(Modifier::BOLD)),
            _ => Span::styled(inner, Style::default().add_modifier(Modifier::ITALIC)),
        };
        spans.push(styled);
        rest = &after[end + marker_len..];
    }

    if !plain.is_empty() {
        spans.push(Span::raw(plain));
    }
    if spans.is_empty() {
        spans.push(Span::raw(String::new()));
    }
    spans
}

/// Greedy word wrap at `width` display columns.
///
/// Words wider than the full width are hard-split so no line ever exceeds
/// the viewport.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_width = word.width();
        let current_width = current.width();

        if current.is_empty() {
            if word_width <= width {
                current.push_str(word);
            } else {
                hard_split(word, width, &mut out, &mut current);
            }
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            out.push(std::mem::take(&mut current));
            if word_width <= width {
                current.push_str(word);
            } else {
                hard_split(word, width, &mut out, &mut current);
            }
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

fn hard_split(word: &str, width: usize, out: &mut Vec<String>, current: &mut String) {
    let mut piece = String::new();
    for ch in word.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if piece.width() + ch_width > width && !piece.is_empty() {
            out.push(std::mem::take(&mut piece));
        }
        piece.push(ch);
    }
    *current = piece;
}
