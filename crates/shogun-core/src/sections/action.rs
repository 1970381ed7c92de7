use super::{is_rule_line, sub_blocks, Grammar, NONE_SENTINEL};
use crate::report::ActionItem;
use regex::Regex;
use std::sync::OnceLock;

/// Title for free-text entries that carry no `**【…】…**` heading.
pub const GENERIC_TITLE: &str = "要対応";

static BOLD_TITLE_RE: OnceLock<Regex> = OnceLock::new();

fn bold_title_re() -> &'static Regex {
    BOLD_TITLE_RE.get_or_init(|| {
        Regex::new(r"^(?:[-*]\s+)?\*\*(【[^】]+】[^*]*)\*\*\s*(.*)$").unwrap()
    })
}

/// Parse the `要対応` section.
///
/// Entries are normally `### ` sub-headings. Sections written as prose fall
/// back to bold `**【label】…**` titles, and finally to a single generic
/// entry, so non-empty content is never dropped.
pub fn parse_action_required(body: &str) -> Vec<ActionItem> {
    headed_items(body).or_else(|| free_text_items(body))
}

fn headed_items(body: &str) -> Grammar<ActionItem> {
    let items = sub_blocks(body)
        .into_iter()
        .map(|block| ActionItem {
            title: block.heading.to_string(),
            content: content_of(block.lines.iter().copied()),
        })
        .collect();
    Grammar::from_items(items)
}

fn content_of<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_rule_line(l))
        .collect::<Vec<_>>()
        .join("\n")
}

struct OpenItem<'a> {
    title: String,
    lines: Vec<&'a str>,
}

impl OpenItem<'_> {
    fn close(self) -> ActionItem {
        ActionItem {
            title: self.title,
            content: self.lines.join("\n"),
        }
    }
}

fn free_text_items(body: &str) -> Vec<ActionItem> {
    let lines: Vec<&str> = body
        .lines()
        .take_while(|l| !is_rule_line(l))
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() || lines == [NONE_SENTINEL] {
        return Vec::new();
    }

    let mut leading: Vec<&str> = Vec::new();
    let mut open: Vec<OpenItem> = Vec::new();
    for &line in &lines {
        if let Some(caps) = bold_title_re().captures(line) {
            let mut item = OpenItem {
                title: caps[1].trim().to_string(),
                lines: Vec::new(),
            };
            let rest = caps
                .get(2)
                .map_or("", |m| m.as_str())
                .trim_start_matches([':', '：'])
                .trim();
            if !rest.is_empty() {
                item.lines.push(rest);
            }
            open.push(item);
        } else if let Some(current) = open.last_mut() {
            current.lines.push(line);
        } else {
            leading.push(line);
        }
    }

    if open.is_empty() {
        return vec![ActionItem {
            title: GENERIC_TITLE.to_string(),
            content: lines.join("\n"),
        }];
    }

    let mut items = Vec::with_capacity(open.len() + 1);
    if !leading.is_empty() {
        items.push(ActionItem {
            title: GENERIC_TITLE.to_string(),
            content: leading.join("\n"),
        });
    }
    items.extend(open.into_iter().map(OpenItem::close));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headed_entries() {
        let body = "### 【緊急】配備失敗\nサーバーAが応答しません\n---\n\n### 【確認】予算\n  承認が必要  \n\n- 期限: 本日\n";
        let items = parse_action_required(body);
        assert_eq!(
            items,
            vec![
                ActionItem {
                    title: "【緊急】配備失敗".into(),
                    content: "サーバーAが応答しません".into(),
                },
                ActionItem {
                    title: "【確認】予算".into(),
                    content: "承認が必要\n- 期限: 本日".into(),
                },
            ]
        );
    }

    #[test]
    fn none_body_is_empty() {
        assert!(parse_action_required("なし\n").is_empty());
        assert!(parse_action_required("\nなし\n\n---\n").is_empty());
        assert!(parse_action_required("").is_empty());
        assert!(parse_action_required("---\nafter the rule\n").is_empty());
    }

    #[test]
    fn bold_titles_start_entries() {
        let body = "\
**【要判断】cmd_010 の優先度**
北と南どちらを先に攻めるか
- 北: 補給線が短い
**【報告】偵察完了** 敵影なし
---
末尾は無視
";
        let items = parse_action_required(body);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "【要判断】cmd_010 の優先度");
        assert_eq!(items[0].content, "北と南どちらを先に攻めるか\n- 北: 補給線が短い");
        assert_eq!(items[1].title, "【報告】偵察完了");
        assert_eq!(items[1].content, "敵影なし");
    }

    #[test]
    fn bulleted_bold_title() {
        let items = parse_action_required("- **【承認】スキル化**: retry-helper を登録するか\n");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "【承認】スキル化");
        assert_eq!(items[0].content, "retry-helper を登録するか");
    }

    #[test]
    fn text_before_first_title_is_kept() {
        let items = parse_action_required("全体連絡あり\n**【緊急】停止**\n即時対応\n");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, GENERIC_TITLE);
        assert_eq!(items[0].content, "全体連絡あり");
        assert_eq!(items[1].title, "【緊急】停止");
    }

    #[test]
    fn plain_prose_becomes_one_entry() {
        let items = parse_action_required("足軽3が応答なし\n再起動を検討されたし\n");
        assert_eq!(
            items,
            vec![ActionItem {
                title: GENERIC_TITLE.into(),
                content: "足軽3が応答なし\n再起動を検討されたし".into(),
            }]
        );
    }
}
