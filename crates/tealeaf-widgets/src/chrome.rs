//! Helpers for drawing bounded, bordered blocks of text.
//!
//! Components render to [`Text`], so a parent that tiles several children
//! works line by line: [`fit`] clips or pads a child's output to an exact
//! rectangle, [`panel`] wraps it in a border with an inline title, and
//! [`join_horizontal`] places panels side by side.

use crate::runeutil::{display_width, take_width, truncate};
use ratatui::style::Style;
use ratatui::symbols::border;
use ratatui::text::{Line, Span, Text};

/// Suffix for lines cut at the right edge.
pub const ELLIPSIS: &str = "...";

/// Border weight of a [`panel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderKind {
    /// Heavy lines, used for the focused panel.
    Thick,
    /// Light lines with rounded corners.
    Rounded,
}

/// Fit `text` into exactly `height` lines of exactly `width` columns.
///
/// Lines past `height` are dropped, lines wider than `width` are cut and end
/// in [`ELLIPSIS`], and short lines and missing rows are padded with spaces.
pub fn fit(text: Text<'static>, width: usize, height: usize) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = text
        .lines
        .into_iter()
        .take(height)
        .map(|line| fit_line(line, width))
        .collect();
    while lines.len() < height {
        lines.push(Line::raw(" ".repeat(width)));
    }
    Text::from(lines)
}

/// Fit one line to exactly `width` columns, keeping span styles.
pub fn fit_line(line: Line<'static>, width: usize) -> Line<'static> {
    let line_style = line.style;
    let total: usize = line.spans.iter().map(|s| display_width(&s.content)).sum();

    let mut spans: Vec<Span<'static>> = Vec::with_capacity(line.spans.len() + 1);
    let mut used = 0;

    if total <= width {
        spans.extend(line.spans);
        used = total;
    } else {
        let tail = take_width(ELLIPSIS, width);
        let budget = width - display_width(&tail);
        let mut tail_style = Style::default();

        for span in line.spans {
            tail_style = span.style;
            let span_width = display_width(&span.content);
            if used + span_width <= budget {
                used += span_width;
                spans.push(span);
                continue;
            }
            let cut = take_width(&span.content, budget - used);
            used += display_width(&cut);
            if !cut.is_empty() {
                spans.push(Span::styled(cut, span.style));
            }
            break;
        }

        used += display_width(&tail);
        spans.push(Span::styled(tail, tail_style));
    }

    if used < width {
        spans.push(Span::raw(" ".repeat(width - used)));
    }
    Line::from(spans).style(line_style)
}

/// Wrap `content` in a border with `title` set into the top edge.
///
/// The content is first [`fit`] to `inner_width` x `inner_height`, so the
/// result is always `inner_height + 2` lines of `inner_width + 2` columns.
pub fn panel(
    content: Text<'static>,
    title: &str,
    kind: BorderKind,
    border_style: Style,
    inner_width: usize,
    inner_height: usize,
) -> Vec<Line<'static>> {
    let set = match kind {
        BorderKind::Thick => border::THICK,
        BorderKind::Rounded => border::ROUNDED,
    };
    let mut lines = Vec::with_capacity(inner_height + 2);

    lines.push(top_edge(
        title,
        [set.top_left, set.horizontal_top, set.top_right],
        border_style,
        inner_width,
    ));
    for line in fit(content, inner_width, inner_height).lines {
        let mut spans = Vec::with_capacity(line.spans.len() + 2);
        spans.push(Span::styled(set.vertical_left, border_style));
        spans.extend(line.spans.into_iter().map(|s| s.patch_style(line.style)));
        spans.push(Span::styled(set.vertical_right, border_style));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(vec![
        Span::styled(set.bottom_left, border_style),
        Span::styled(set.horizontal_bottom.repeat(inner_width), border_style),
        Span::styled(set.bottom_right, border_style),
    ]));
    lines
}

fn top_edge(
    title: &str,
    [left, rule, right]: [&'static str; 3],
    style: Style,
    inner_width: usize,
) -> Line<'static> {
    // "─ title " needs at least two columns of rule around it.
    let label = if inner_width > 3 && !title.is_empty() {
        format!(" {} ", truncate(title, inner_width - 3, ELLIPSIS))
    } else {
        String::new()
    };
    let lead = usize::from(!label.is_empty());
    let rest = inner_width.saturating_sub(lead + display_width(&label));

    Line::from(vec![
        Span::styled(left, style),
        Span::styled(rule.repeat(lead), style),
        Span::styled(label, style),
        Span::styled(rule.repeat(rest), style),
        Span::styled(right, style),
    ])
}

/// Concatenate two columns of lines row by row.
///
/// The shorter column is padded with blank rows of its own width.
pub fn join_horizontal(left: Vec<Line<'static>>, right: Vec<Line<'static>>) -> Vec<Line<'static>> {
    let left_width = left.iter().map(Line::width).max().unwrap_or(0);
    let rows = left.len().max(right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();

    (0..rows)
        .map(|_| {
            let mut spans = match left.next() {
                Some(line) => line.spans,
                None => vec![Span::raw(" ".repeat(left_width))],
            };
            if let Some(line) = right.next() {
                spans.extend(line.spans);
            }
            Line::from(spans)
        })
        .collect()
}

/// Plain text of a line, without styling.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
