//! Per-section grammars. Every handler takes the body of one `## ` section
//! (the text after its heading line) and degrades to an empty result instead
//! of failing.

pub mod action;
pub mod completed;
pub mod list;
pub mod skills;

use crate::table::{self, TableRow};

/// Body text meaning "nothing here".
pub const NONE_SENTINEL: &str = "なし";

const SUBSECTION_MARKER: &str = "### ";

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

/// Outcome of one grammar attempt over a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grammar<T> {
    Matched(Vec<T>),
    NoMatch,
}

impl<T> Grammar<T> {
    /// `Matched` when at least one item was recognized.
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Grammar::NoMatch
        } else {
            Grammar::Matched(items)
        }
    }

    /// Keep the matched items, or run `fallback` for a second attempt.
    pub fn or_else(self, fallback: impl FnOnce() -> Vec<T>) -> Vec<T> {
        match self {
            Grammar::Matched(items) => items,
            Grammar::NoMatch => fallback(),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared line helpers
// ---------------------------------------------------------------------------

/// A standalone horizontal rule: three or more dashes and nothing else.
pub fn is_rule_line(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

pub fn is_none_line(line: &str) -> bool {
    line.trim() == NONE_SENTINEL
}

/// A `### ` heading and the lines up to the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubBlock<'a> {
    pub heading: &'a str,
    pub lines: Vec<&'a str>,
}

impl SubBlock<'_> {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Split a section body on `### ` headings. Text before the first heading
/// is not part of any sub-block.
pub fn sub_blocks(body: &str) -> Vec<SubBlock<'_>> {
    body.lines().fold(Vec::new(), |mut blocks, line| {
        if let Some(heading) = line.strip_prefix(SUBSECTION_MARKER) {
            blocks.push(SubBlock {
                heading: heading.trim(),
                lines: Vec::new(),
            });
        } else if let Some(current) = blocks.last_mut() {
            current.lines.push(line);
        }
        blocks
    })
}

/// Plain table sections (`進行中`, `本日の戦果`): parse the table and map
/// column labels onto canonical keys.
pub fn status_table(body: &str) -> Vec<TableRow> {
    table::normalize_columns(table::parse_table(body))
}
