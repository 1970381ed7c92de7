use crate::report::CompletedReport;
use regex::Regex;
use std::sync::OnceLock;

static REPORT_HEADING_RE: OnceLock<Regex> = OnceLock::new();
static ORDER_RE: OnceLock<Regex> = OnceLock::new();
static RESULT_RE: OnceLock<Regex> = OnceLock::new();

fn report_heading_re() -> &'static Regex {
    REPORT_HEADING_RE.get_or_init(|| Regex::new(r"^###\s+(cmd_\d+)\s+完了報告").unwrap())
}

fn order_re() -> &'static Regex {
    ORDER_RE.get_or_init(|| Regex::new(r"\*\*指令\*\*\s*[:：]\s*(.+)").unwrap())
}

fn result_re() -> &'static Regex {
    RESULT_RE.get_or_init(|| Regex::new(r"\*\*結果\*\*\s*[:：]\s*(.+)").unwrap())
}

/// A report being scanned. A field stays `None` until its first line is
/// seen, so later lines never overwrite it, even when the first was blank.
struct OpenReport {
    cmd_id: String,
    order: Option<String>,
    result: Option<String>,
}

impl OpenReport {
    fn close(self) -> CompletedReport {
        CompletedReport {
            cmd_id: self.cmd_id,
            order: self.order.unwrap_or_default(),
            result: self.result.unwrap_or_default(),
        }
    }
}

fn first_capture(slot: &mut Option<String>, re: &Regex, line: &str) -> bool {
    if slot.is_some() {
        return false;
    }
    match re.captures(line) {
        Some(caps) => {
            *slot = Some(caps[1].trim().to_string());
            true
        }
        None => false,
    }
}

/// Detail blocks of the `本日の戦果` section, one per `### cmd_NNN 完了報告`
/// heading, in document order. Repeated ids are kept as separate reports.
pub fn parse_completed_reports(body: &str) -> Vec<CompletedReport> {
    let mut reports: Vec<OpenReport> = Vec::new();

    for line in body.lines() {
        if let Some(caps) = report_heading_re().captures(line) {
            reports.push(OpenReport {
                cmd_id: caps[1].to_string(),
                order: None,
                result: None,
            });
            continue;
        }
        let Some(report) = reports.last_mut() else {
            continue;
        };
        if !first_capture(&mut report.order, order_re(), line) {
            first_capture(&mut report.result, result_re(), line);
        }
    }

    reports.into_iter().map(OpenReport::close).collect()
}
