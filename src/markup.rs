//! Inline markup used by the news lines.
//!
//! The only markup is `**bold**` around vital data (amounts, dates, names).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*.*?\*\*").expect("valid bold regex");
    static ref NUMBERED: Regex = Regex::new(r"^\d+\.").expect("valid numbered regex");
}

/// A piece of a line, either plain text or an emphasised span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Bold(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(s) | Segment::Bold(s) => s,
        }
    }
}

/// Split `line` into plain and bold segments, stripping the `**` delimiters.
pub fn segments(line: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;

    for m in BOLD.find_iter(line) {
        if m.start() > last {
            out.push(Segment::Plain(&line[last..m.start()]));
        }
        let inner = &line[m.start() + 2..m.end() - 2];
        if !inner.is_empty() {
            out.push(Segment::Bold(inner));
        }
        last = m.end();
    }

    if last < line.len() {
        out.push(Segment::Plain(&line[last..]));
    }
    out
}

/// Strip bold delimiters, keeping the text.
pub fn plain_text(line: &str) -> String {
    segments(line).iter().map(Segment::text).collect()
}

/// Whether the line reads as a list item (`-`, `*` or `1.`).
pub fn is_bullet(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('-') || trimmed.starts_with('*') || NUMBERED.is_match(trimmed)
}
