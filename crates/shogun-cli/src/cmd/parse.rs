use crate::output::{print_json, print_table};
use anyhow::Context;
use shogun_core::Report;
use std::path::Path;

pub fn run(path: &Path, json: bool) -> anyhow::Result<()> {
    let report = shogun_core::parse_file(path)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    if json {
        return print_json(&report);
    }

    if report.last_updated.is_empty() {
        println!("最終更新: (none)");
    } else {
        println!("最終更新: {}", report.last_updated);
    }
    println!();
    print_table(&["SECTION", "ITEMS"], summary_rows(&report));

    if !report.action_required.is_empty() {
        println!();
        println!("要対応:");
        for item in &report.action_required {
            println!("  {}", item.title);
        }
    }
    Ok(())
}

fn summary_rows(report: &Report) -> Vec<Vec<String>> {
    [
        ("action_required", report.action_required.len()),
        ("in_progress", report.in_progress.len()),
        ("completed_today", report.completed_today.len()),
        ("completed_reports", report.completed_reports.len()),
        ("skill_candidates", report.skill_candidates.len()),
        ("generated_skills", report.generated_skills.len()),
        ("waiting", report.waiting.len()),
        ("inquiries", report.inquiries.len()),
    ]
    .into_iter()
    .map(|(field, count)| vec![field.to_string(), count.to_string()])
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_covers_every_section() {
        let report = shogun_core::parse("## ⏸️ 待機中\n- 足軽5\n- 足軽6\n");
        let rows = summary_rows(&report);
        assert_eq!(rows.len(), 8);
        assert!(rows.contains(&vec!["waiting".to_string(), "2".to_string()]));
        let total: usize = rows.iter().map(|r| r[1].parse::<usize>().unwrap()).sum();
        assert_eq!(total, 2);
    }
}
