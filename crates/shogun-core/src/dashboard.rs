use crate::error::{DashboardError, Result};
use crate::heading::normalize_heading;
use crate::report::Report;
use crate::sections::{self, action, completed, list, skills};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const SECTION_MARKER: &str = "## ";

// ---------------------------------------------------------------------------
// Route table
// ---------------------------------------------------------------------------

/// Binds a heading label to the handler that fills one `Report` field.
/// A block is routed when its normalized heading starts with `label`.
pub struct Route {
    pub label: &'static str,
    pub field: &'static str,
    pub apply: fn(&str, &mut Report),
}

const ROUTE_COUNT: usize = 8;

pub static ROUTES: [Route; ROUTE_COUNT] = [
    Route {
        label: "要対応",
        field: "action_required",
        apply: |body, report| report.action_required = action::parse_action_required(body),
    },
    Route {
        label: "進行中",
        field: "in_progress",
        apply: |body, report| report.in_progress = sections::status_table(body),
    },
    Route {
        label: "本日の戦果",
        field: "completed_today",
        apply: |body, report| report.completed_today = sections::status_table(body),
    },
    Route {
        label: "本日の戦果",
        field: "completed_reports",
        apply: |body, report| {
            report.completed_reports = completed::parse_completed_reports(body)
        },
    },
    Route {
        label: "スキル化候補",
        field: "skill_candidates",
        apply: |body, report| report.skill_candidates = skills::parse_skill_candidates(body),
    },
    Route {
        label: "生成されたスキル",
        field: "generated_skills",
        apply: |body, report| report.generated_skills = skills::parse_generated_skills(body),
    },
    Route {
        label: "待機中",
        field: "waiting",
        apply: |body, report| report.waiting = list::parse_simple_list(body),
    },
    Route {
        label: "伺い事項",
        field: "inquiries",
        apply: |body, report| report.inquiries = list::parse_simple_list(body),
    },
];

// ---------------------------------------------------------------------------
// Document segmentation
// ---------------------------------------------------------------------------

/// One `## ` section: its heading text (marker removed) and everything up to
/// the next `## ` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub heading: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    pub preamble: &'a str,
    pub sections: Vec<Section<'a>>,
}

/// Split `text` on lines that start with `## `.
pub fn split_sections(text: &str) -> Document<'_> {
    let mut preamble_end = text.len();
    let mut sections: Vec<Section> = Vec::new();
    let mut body_start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let Some(heading) = line.strip_prefix(SECTION_MARKER) else {
            continue;
        };
        match sections.last_mut() {
            Some(prev) => prev.body = &text[body_start..line_start],
            None => preamble_end = line_start,
        }
        sections.push(Section {
            heading: heading.trim_end_matches(['\r', '\n']),
            body: "",
        });
        body_start = offset;
    }
    if let Some(last) = sections.last_mut() {
        last.body = &text[body_start..];
    }

    Document {
        preamble: &text[..preamble_end],
        sections,
    }
}

static LAST_UPDATED_RE: OnceLock<Regex> = OnceLock::new();

fn last_updated_re() -> &'static Regex {
    LAST_UPDATED_RE.get_or_init(|| Regex::new(r"最終更新[:：][ \t]*(.+)").unwrap())
}

/// The `最終更新: …` value from the preamble, first match wins.
pub fn find_last_updated(preamble: &str) -> Option<String> {
    preamble
        .lines()
        .find_map(|line| last_updated_re().captures(line))
        .map(|caps| caps[1].trim().to_string())
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

/// Parse dashboard text into a `Report`.
///
/// Unknown sections are skipped and malformed ones come back empty. Each
/// route fires at most once; a repeated heading after the first is ignored.
pub fn parse(text: &str) -> Report {
    let document = split_sections(text);
    let mut report = Report {
        last_updated: find_last_updated(document.preamble).unwrap_or_default(),
        ..Default::default()
    };

    let mut fired = [false; ROUTE_COUNT];
    for section in &document.sections {
        let label = normalize_heading(section.heading);
        let mut matched = false;
        for (i, route) in ROUTES.iter().enumerate() {
            if label.is_empty() || !label.starts_with(route.label) {
                continue;
            }
            matched = true;
            if fired[i] {
                tracing::debug!(
                    field = route.field,
                    heading = label,
                    "duplicate section ignored"
                );
                continue;
            }
            fired[i] = true;
            (route.apply)(section.body, &mut report);
            tracing::debug!(field = route.field, "section parsed");
        }
        if !matched {
            tracing::trace!(heading = section.heading, "unrecognized section skipped");
        }
    }

    report
}

/// Read and parse the dashboard at `path`.
pub fn parse_file(path: &Path) -> Result<Report> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DashboardError::DashboardNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(parse(&text))
}
