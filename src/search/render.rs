//! Plain text and JSON rendering of search outcomes

use crate::search::controller::{SearchOutcome, SearchReport};
use crate::search::ranker::{HitView, group_by_name};
use crate::search::types::{RankedVersionEntry, SearchHit};

/// Marker placed in front of active versions
const ACTIVE_MARKER: &str = "*";

/// Render an outcome as terminal text, one card per hit
pub fn render_text(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Empty { query, dropped } => no_results(query, *dropped),
        SearchOutcome::Superseded { .. } => String::new(),
        SearchOutcome::Found(report) => report
            .hits
            .iter()
            .map(render_card)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Render an outcome as one block per package name
pub fn render_groups(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Empty { query, dropped } => no_results(query, *dropped),
        SearchOutcome::Superseded { .. } => String::new(),
        SearchOutcome::Found(report) => render_report_groups(report),
    }
}

/// Render an outcome as pretty-printed JSON
pub fn render_json(outcome: &SearchOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcome)
}

fn no_results(query: &str, dropped: usize) -> String {
    let mut text = format!("No packages found matching \"{}\"\n", query);
    if dropped > 0 {
        text.push_str(&format!("({} malformed records skipped)\n", dropped));
    }
    text
}

fn render_card(view: &HitView) -> String {
    let hit = &view.hit;
    let mut lines = vec![format!(
        "{} {} {} [{}]",
        hit.package.name,
        hit.package.version.label(),
        hit.package.arch,
        hit.repo
    )];

    if !hit.package.summary.is_empty() {
        lines.push(format!("    {}", hit.package.summary));
    }

    if let Some(versions) = &view.versions {
        lines.push(format!("    All Available Versions ({})", versions.len()));
        lines.extend(versions.iter().map(render_entry));
    }

    let mut card = lines.join("\n");
    card.push('\n');
    card
}

fn render_entry(entry: &RankedVersionEntry) -> String {
    let marker = if entry.is_active { ACTIVE_MARKER } else { " " };

    let mut label = format!("v{}", entry.package.version.label());
    if let Some(epoch) = entry.package.version.epoch {
        label.push_str(&format!(" (epoch: {})", epoch));
    }

    let mut line = format!("    {} {:<32} {}", marker, label, entry.repo);
    if !entry.tags.is_empty() {
        line.push_str(&format!(" [{}]", entry.tags.join(", ")));
    }
    line.trim_end().to_string()
}

fn render_report_groups(report: &SearchReport) -> String {
    let hits: Vec<SearchHit> = report.hits.iter().map(|view| view.hit.clone()).collect();

    group_by_name(&hits)
        .iter()
        .map(|(name, group)| {
            let mut lines = vec![format!(
                "{} ({} {})",
                name,
                group.len(),
                if group.len() == 1 { "hit" } else { "hits" }
            )];
            lines.extend(group.iter().map(|hit| {
                format!(
                    "  {} {} [{}]",
                    hit.package.version.label(),
                    hit.package.arch,
                    hit.repo
                )
            }));
            let mut block = lines.join("\n");
            block.push('\n');
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::controller::process;
    use crate::search::types::RawSearchResultSet;
    use crate::version::ordering::SortMode;
    use serde_json::json;

    fn outcome(value: serde_json::Value) -> SearchOutcome {
        let raw: RawSearchResultSet = serde_json::from_value(value).unwrap();
        process(raw, SortMode::Legacy)
    }

    #[test]
    fn render_text_reports_no_matches_for_empty_outcome() {
        let outcome = SearchOutcome::Empty {
            query: "xyz".to_string(),
            dropped: 0,
        };

        assert_eq!(render_text(&outcome), "No packages found matching \"xyz\"\n");
        assert_eq!(render_groups(&outcome), "No packages found matching \"xyz\"\n");
    }

    #[test]
    fn render_text_mentions_skipped_records_when_every_hit_was_malformed() {
        let outcome = outcome(json!({
            "query": "foo",
            "hits": [
                { "repo": "a", "package": { "name": "foo", "version": { "ver": 2 } } },
                { "repo": "b", "package": { "name": "foo", "version": { "ver": "" } } }
            ]
        }));

        assert_eq!(
            render_text(&outcome),
            "No packages found matching \"foo\"\n(2 malformed records skipped)\n"
        );
    }

    #[test]
    fn render_text_prints_nothing_for_superseded_search() {
        let outcome = SearchOutcome::Superseded {
            query: "xyz".to_string(),
        };

        assert_eq!(render_text(&outcome), "");
    }

    #[test]
    fn render_text_lists_ranked_versions_with_active_marker() {
        let outcome = outcome(json!({
            "query": "foo",
            "hits": [{
                "repo": "core",
                "package": { "name": "foo", "version": { "ver": "2.0", "rel": "1" }, "arch": "x86_64", "summary": "Foo tool" },
                "all_versions": [
                    { "repo": "extra", "package": { "name": "foo", "version": { "epoch": "1", "ver": "1.5", "rel": "3" } }, "version_tags": ["stable", null] },
                    { "repo": "core", "package": { "name": "foo", "version": { "ver": "2.0", "rel": "1" } } }
                ]
            }]
        }));

        let text = render_text(&outcome);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "foo 2.0-1 x86_64 [core]");
        assert_eq!(lines[1], "    Foo tool");
        assert_eq!(lines[2], "    All Available Versions (2)");
        assert!(lines[3].starts_with("    * v2.0-1 "));
        assert!(lines[3].ends_with(" core"));
        assert!(lines[4].starts_with("      v1.5-3 (epoch: 1) "));
        assert!(lines[4].ends_with(" extra [stable]"));
    }

    #[test]
    fn render_text_omits_version_list_for_single_version_hit() {
        let outcome = outcome(json!({
            "query": "bash",
            "hits": [{
                "repo": "baseos",
                "package": { "name": "bash", "version": { "ver": "5.1.8", "rel": "6.el9" }, "arch": "x86_64" }
            }]
        }));

        assert_eq!(render_text(&outcome), "bash 5.1.8-6.el9 x86_64 [baseos]\n");
    }

    #[test]
    fn render_groups_collects_hits_by_name() {
        let outcome = outcome(json!({
            "query": "bash",
            "hits": [
                { "repo": "baseos", "package": { "name": "bash", "version": { "ver": "5.1.8", "rel": "6" }, "arch": "x86_64" } },
                { "repo": "epel", "package": { "name": "bash-completion", "version": { "ver": "2.11", "rel": "5" }, "arch": "noarch" } },
                { "repo": "appstream", "package": { "name": "bash", "version": { "ver": "5.1.8", "rel": "4" }, "arch": "x86_64" } }
            ]
        }));

        assert_eq!(
            render_groups(&outcome),
            "bash (2 hits)\n  5.1.8-6 x86_64 [baseos]\n  5.1.8-4 x86_64 [appstream]\n\
             \nbash-completion (1 hit)\n  2.11-5 noarch [epel]\n"
        );
    }

    #[test]
    fn render_json_tags_outcome_status() {
        let outcome = SearchOutcome::Empty {
            query: "xyz".to_string(),
            dropped: 0,
        };

        let value: serde_json::Value =
            serde_json::from_str(&render_json(&outcome).unwrap()).unwrap();

        assert_eq!(value, json!({ "status": "empty", "query": "xyz", "dropped": 0 }));
    }
}
