// SPDX-FileCopyrightText: 2026 Dexter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dexter stats` command implementation.

use dexter_config::DexterConfig;
use dexter_core::types::DashboardStats;
use dexter_core::{DexterError, StorageAdapter};

use crate::open_store;

/// Print dashboard statistics, as text or JSON.
pub async fn run_stats(config: &DexterConfig, json: bool) -> Result<(), DexterError> {
    let store = open_store(config).await?;
    let stats = store.dashboard_stats().await?;

    if json {
        let out = serde_json::to_string_pretty(&stats)
            .map_err(|e| DexterError::Internal(format!("failed to serialize stats: {e}")))?;
        println!("{out}");
    } else {
        print!("{}", render_text(&stats));
    }

    store.close().await
}

fn render_text(stats: &DashboardStats) -> String {
    let mut out = String::new();
    out.push_str("\n  dexter stats\n");
    out.push_str(&format!("  {}\n", "-".repeat(35)));
    out.push_str(&format!("    Documents: {}\n", stats.document_count));

    if let (Some(from), Some(to)) = (stats.date_from, stats.date_to) {
        out.push_str(&format!(
            "    Published: {} to {}\n",
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d")
        ));
    }

    if !stats.group_counts.is_empty() {
        out.push_str("    Entities:\n");
        for (group, count) in &stats.group_counts {
            out.push_str(&format!("      {group:<14} {count}\n"));
        }
    }

    if !stats.media_counts.is_empty() {
        out.push_str("    Media:\n");
        for m in &stats.media_counts {
            out.push_str(&format!("      {:<14} {}\n", m.medium, m.documents));
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_config;
    use chrono::{TimeZone, Utc};
    use dexter_core::types::MediumCount;
    use std::collections::BTreeMap;

    #[test]
    fn render_text_lists_sections() {
        let stats = DashboardStats {
            document_count: 12,
            date_from: Some(Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap()),
            date_to: Some(Utc.with_ymd_and_hms(2026, 3, 4, 0, 0, 0).unwrap()),
            group_counts: BTreeMap::from([("person".to_string(), 5)]),
            media_counts: vec![MediumCount {
                medium: "Daily".to_string(),
                documents: 12,
            }],
        };
        let text = render_text(&stats);
        assert!(text.contains("Documents: 12"));
        assert!(text.contains("Published: 2026-01-02 to 2026-03-04"));
        assert!(text.contains("person         5"));
        assert!(text.contains("Daily          12"));
    }

    #[test]
    fn render_text_skips_empty_sections() {
        let stats = DashboardStats {
            document_count: 0,
            date_from: None,
            date_to: None,
            group_counts: BTreeMap::new(),
            media_counts: Vec::new(),
        };
        let text = render_text(&stats);
        assert!(!text.contains("Published"));
        assert!(!text.contains("Entities"));
    }

    #[tokio::test]
    async fn stats_json_on_fresh_database() {
        let (_dir, config) = temp_config();
        run_stats(&config, true).await.unwrap();
    }
}
