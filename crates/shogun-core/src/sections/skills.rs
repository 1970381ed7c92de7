use super::{is_none_line, sub_blocks, Grammar};
use crate::report::{GeneratedSkill, SkillCandidate};
use crate::table::key_value_pairs;
use regex::Regex;
use std::sync::OnceLock;

/// Sub-heading under which withdrawn candidates are archived.
pub const REJECTED_MARKER: &str = "### 却下済み";

const STRIKETHROUGH: &str = "~~";

static ANNOTATION_RE: OnceLock<Regex> = OnceLock::new();
static BULLET_CANDIDATE_RE: OnceLock<Regex> = OnceLock::new();

/// Trailing full-width annotation such as `（新規）`.
fn annotation_re() -> &'static Regex {
    ANNOTATION_RE.get_or_init(|| Regex::new(r"（.+）$").unwrap())
}

/// `- **name**(source) — description`, with ASCII or full-width parentheses
/// and an em dash, en dash, hyphen or colon before the description.
fn bullet_candidate_re() -> &'static Regex {
    BULLET_CANDIDATE_RE.get_or_init(|| {
        Regex::new(
            r"^[-*]\s+\*\*([^*]+)\*\*\s*(?:[(（]([^)）]*)[)）])?\s*(?:—|–|-|:|：)\s*(.+)$",
        )
        .unwrap()
    })
}

// ---------------------------------------------------------------------------
// スキル化候補
// ---------------------------------------------------------------------------

/// Parse the `スキル化候補` section.
///
/// Everything from `### 却下済み` on is discarded. A `なし` line empties the
/// whole section. Candidates are `### ` headings with a field table; bodies
/// written as a bullet list are read line by line instead.
pub fn parse_skill_candidates(body: &str) -> Vec<SkillCandidate> {
    let active = match body.find(REJECTED_MARKER) {
        Some(pos) => &body[..pos],
        None => body,
    };

    if active.lines().any(is_none_line) {
        return Vec::new();
    }

    headed_candidates(active).or_else(|| bulleted_candidates(active))
}

fn headed_candidates(text: &str) -> Grammar<SkillCandidate> {
    let items = sub_blocks(text)
        .into_iter()
        .map(|block| {
            let name = annotation_re().replace(block.heading, "");
            let mut candidate = SkillCandidate::pending(name.trim());
            let fields = block.text();
            for (key, value) in key_value_pairs(&fields) {
                match key {
                    "名前" => candidate.name = value.to_string(),
                    "説明" => candidate.description = value.to_string(),
                    "発見元" => candidate.source = value.to_string(),
                    "汎用性" => candidate.generality = Some(value.to_string()),
                    _ => {}
                }
            }
            candidate
        })
        .collect();
    Grammar::from_items(items)
}

fn bulleted_candidates(text: &str) -> Vec<SkillCandidate> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.contains(STRIKETHROUGH))
        .filter_map(|line| bullet_candidate_re().captures(line))
        .map(|caps| {
            let mut candidate = SkillCandidate::pending(caps[1].trim());
            candidate.source = caps
                .get(2)
                .map_or("", |m| m.as_str())
                .trim()
                .to_string();
            candidate.description = caps[3].trim().to_string();
            candidate
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 生成されたスキル
// ---------------------------------------------------------------------------

/// Parse the `生成されたスキル` section: one skill per `### ` heading, with
/// optional fields from the table beneath it.
pub fn parse_generated_skills(body: &str) -> Vec<GeneratedSkill> {
    sub_blocks(body)
        .into_iter()
        .map(|block| {
            let mut skill = GeneratedSkill {
                name: block.heading.to_string(),
                ..Default::default()
            };
            let fields = block.text();
            for (key, value) in key_value_pairs(&fields) {
                let slot = match key {
                    "設計書" => &mut skill.design_doc,
                    "説明" => &mut skill.description,
                    "対応言語" => &mut skill.languages,
                    "生成日" => &mut skill.created_at,
                    _ => continue,
                };
                *slot = Some(value.to_string());
            }
            skill
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::PENDING_STATUS;

    const HEADED: &str = "\
### retry-helper（新規）
| 項目 | 内容 |
|------|------|
| 名前 | retry-helper |
| 説明 | 失敗時リトライを自動化 |
| 発見元 | cmd_042 |
| 汎用性 | 高 |

### log-digest
| 項目 | 内容 |
|------|------|
| 説明 | ログ要約 |

### 却下済み
### old-skill（却下）
| 説明 | 不要 |
";

    #[test]
    fn headed_candidates_with_tables() {
        let items = parse_skill_candidates(HEADED);
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            SkillCandidate {
                name: "retry-helper".into(),
                description: "失敗時リトライを自動化".into(),
                source: "cmd_042".into(),
                status: PENDING_STATUS.into(),
                generality: Some("高".into()),
            }
        );
        assert_eq!(items[1].name, "log-digest");
        assert_eq!(items[1].description, "ログ要約");
        assert_eq!(items[1].generality, None);
    }

    #[test]
    fn annotation_stripped_from_heading_name() {
        let items = parse_skill_candidates("### deploy-check（新規・要確認）\n");
        assert_eq!(items[0].name, "deploy-check");
    }

    #[test]
    fn status_is_never_read_from_table() {
        let items = parse_skill_candidates("### x\n| 状態 | 承認済み |\n| status | done |\n");
        assert_eq!(items[0].status, PENDING_STATUS);
    }

    #[test]
    fn none_wins_over_rejected_subtree() {
        assert!(parse_skill_candidates("なし\n\n### 却下済み\n- **old**(cmd_1) — x\n").is_empty());
        assert!(parse_skill_candidates("  なし  \n").is_empty());
    }

    #[test]
    fn bulleted_candidates() {
        let body = "\
- **retry-helper**(cmd_042 / 足軽3)— 失敗時リトライを自動化
- **lint-fix**（cmd_050） - 自動整形
- ~~**dropped**(cmd_001) — 却下~~
- 説明だけの行
";
        let items = parse_skill_candidates(body);
        assert_eq!(
            items,
            vec![
                SkillCandidate {
                    name: "retry-helper".into(),
                    description: "失敗時リトライを自動化".into(),
                    source: "cmd_042 / 足軽3".into(),
                    status: PENDING_STATUS.into(),
                    generality: None,
                },
                SkillCandidate {
                    name: "lint-fix".into(),
                    description: "自動整形".into(),
                    source: "cmd_050".into(),
                    status: PENDING_STATUS.into(),
                    generality: None,
                },
            ]
        );
    }

    #[test]
    fn bullets_under_rejected_marker_are_dropped() {
        let items = parse_skill_candidates("- **a**(s) — d\n### 却下済み\n- **b**(s) — d\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "a");
    }

    #[test]
    fn generated_skills_fields() {
        let body = "\
### retry-helper
| 項目 | 内容 |
|------|------|
| 設計書 | docs/retry.md |
| 対応言語 | Rust, Python |
| 生成日 | 2024-01-02 |

### bare-skill（新規）
";
        let skills = parse_generated_skills(body);
        assert_eq!(skills.len(), 2);
        assert_eq!(
            skills[0],
            GeneratedSkill {
                name: "retry-helper".into(),
                design_doc: Some("docs/retry.md".into()),
                description: None,
                languages: Some("Rust, Python".into()),
                created_at: Some("2024-01-02".into()),
            }
        );
        assert_eq!(skills[1].name, "bare-skill（新規）");
        assert_eq!(skills[1].design_doc, None);
    }
}
