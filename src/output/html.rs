//! Standalone HTML rendering.
//!
//! Similar delete/insert pairs get their differing characters wrapped in
//! `<mark>` using the engine's inline hints.

use crate::engine::{inline_hints, CompareResult, RowType};
use std::collections::HashMap;
use std::ops::Range;

fn row_style(row_type: RowType) -> &'static str {
    match row_type {
        RowType::Delete | RowType::Remove => "background:#5a1e1e;color:#ffaaaa",
        RowType::Insert | RowType::Add => "background:#1e5a24;color:#aaffaa",
        RowType::ChangeRemove | RowType::ChangeAdd => "background:#1e3a5a;color:#aad4ff",
        RowType::Reorder => "background:#4d4020;color:#ffd966",
        RowType::Ignore => "background:#2f2f2f;color:#5a5a5a",
        RowType::Empty => "background:#1a1a1a",
        RowType::Equal => "",
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn spans_at(marks: &HashMap<usize, Vec<Range<usize>>>, row: usize) -> &[Range<usize>] {
    marks.get(&row).map(Vec::as_slice).unwrap_or(&[])
}

/// Escape `line`, wrapping each character range of `spans` in `<mark>`
fn highlight(line: &str, spans: &[Range<usize>]) -> String {
    if spans.is_empty() {
        return escape_html(line);
    }

    let mut out = String::with_capacity(line.len() + spans.len() * 13);
    let mut spans = spans.iter().peekable();
    let mut open = false;

    for (i, c) in line.chars().enumerate() {
        if !open && spans.peek().is_some_and(|span| span.start == i) {
            out.push_str("<mark>");
            open = true;
        }
        let mut buf = [0u8; 4];
        out.push_str(&escape_html(c.encode_utf8(&mut buf)));
        if open && spans.peek().is_some_and(|span| span.end == i + 1) {
            out.push_str("</mark>");
            open = false;
            spans.next();
        }
    }
    if open {
        out.push_str("</mark>");
    }
    out
}

/// Two-column HTML table of the aligned rows with per-type inline styles
///
/// # Arguments
/// * `result` - A finished comparison
/// * `src_file` / `tgt_file` - Names shown in the header
/// * `inline_threshold` - Minimum similarity for character highlighting
pub fn format_html(result: &CompareResult, src_file: &str, tgt_file: &str, inline_threshold: f32) -> String {
    let src = escape_html(src_file);
    let tgt = escape_html(tgt_file);

    let mut source_marks: HashMap<usize, Vec<Range<usize>>> = HashMap::new();
    let mut target_marks: HashMap<usize, Vec<Range<usize>>> = HashMap::new();
    for hint in inline_hints(result, inline_threshold) {
        source_marks.insert(hint.source_row, hint.source_spans);
        target_marks.insert(hint.target_row, hint.target_spans);
    }

    let rows_html: Vec<String> = result
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            format!(
                "  <tr><td style=\"width:3em;text-align:right;padding:0 4px;color:#888\">{}</td>\
                 <td style=\"font-family:monospace;white-space:pre;{};padding:0 6px\">{}</td>\
                 <td style=\"font-family:monospace;white-space:pre;{};padding:0 6px\">{}</td></tr>",
                i + 1,
                row_style(result.source_types[i]),
                highlight(row.source_line, spans_at(&source_marks, i)),
                row_style(result.target_types[i]),
                highlight(row.target_line, spans_at(&target_marks, i)),
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n\
         <html><head><meta charset=\"utf-8\">\n\
         <title>Config Diff: {src} vs {tgt}</title>\n\
         <style>body{{background:#1e1e1e;color:#fff;font-family:sans-serif}}\
         table{{border-collapse:collapse;width:100%}}\
         th{{background:#333;padding:4px 8px;text-align:left}}\
         td{{border-bottom:1px solid #333}}\
         mark{{background:#b8860b;color:#000}}</style>\n\
         </head><body>\n\
         <table>\n\
         <thead><tr><th>#</th><th>Source: {src}</th><th>Target: {tgt}</th></tr></thead>\n\
         <tbody>\n{rows}\n</tbody></table>\n\
         </body></html>\n",
        src = src,
        tgt = tgt,
        rows = rows_html.join("\n"),
    )
}
