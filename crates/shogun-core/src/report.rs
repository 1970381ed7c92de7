use serde::Serialize;

pub use crate::table::TableRow;

/// Default `status` of a skill candidate awaiting review.
pub const PENDING_STATUS: &str = "承認待ち";

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Everything extracted from one dashboard snapshot.
///
/// Sections missing from the document stay empty; no field is ever omitted
/// from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub last_updated: String,
    pub action_required: Vec<ActionItem>,
    pub in_progress: Vec<TableRow>,
    pub completed_today: Vec<TableRow>,
    pub completed_reports: Vec<CompletedReport>,
    pub skill_candidates: Vec<SkillCandidate>,
    pub generated_skills: Vec<GeneratedSkill>,
    pub waiting: Vec<String>,
    pub inquiries: Vec<String>,
}

// ---------------------------------------------------------------------------
// Section entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionItem {
    pub title: String,
    pub content: String,
}

/// Detail block for one finished command (`### cmd_NNN 完了報告`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletedReport {
    pub cmd_id: String,
    pub order: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCandidate {
    pub name: String,
    pub description: String,
    pub source: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generality: Option<String>,
}

impl SkillCandidate {
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            source: String::new(),
            status: PENDING_STATUS.to_string(),
            generality: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedSkill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
