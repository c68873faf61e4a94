// Copyright 2025 Cortex Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Narrative report rendering
//!
//! Renders a batch of narratives into a display artifact for downstream
//! consumption. Read-only over the narrative values.

use cortex_core::{TimelineKind, UnifiedNarrative};
use serde::{Deserialize, Serialize};

/// Output format for a narrative report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Markdown sections per narrative
    #[default]
    Markdown,
    /// JSON array of narratives
    Json,
    /// Plain text, one line per narrative
    Text,
}

/// Renders unified narratives for display
#[derive(Debug, Clone, Default)]
pub struct NarrativeReport {
    format: ReportFormat,
}

impl NarrativeReport {
    /// Create a report renderer for a format
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Render a batch of narratives
    pub fn render(&self, narratives: &[UnifiedNarrative]) -> String {
        match self.format {
            ReportFormat::Markdown => self.render_markdown(narratives),
            ReportFormat::Json => {
                serde_json::to_string_pretty(narratives).unwrap_or_default()
            }
            ReportFormat::Text => narratives
                .iter()
                .map(|n| n.summary.clone())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn render_markdown(&self, narratives: &[UnifiedNarrative]) -> String {
        let mut out = String::from("# Fusion narratives\n");

        if narratives.is_empty() {
            out.push_str("\nNo correlated activity in the recent window.\n");
            return out;
        }

        for narrative in narratives {
            out.push_str(&format!("\n## {}\n\n", narrative.summary));
            out.push_str(&format!("- outcome: {}\n", narrative.outcome.as_str()));
            out.push_str(&format!(
                "- learning value: {}\n",
                narrative.learning_value.as_str()
            ));
            out.push_str("- timeline:\n");
            for entry in &narrative.timeline {
                let kind = match entry.kind {
                    TimelineKind::Conversation => "conversation",
                    TimelineKind::Execution => "execution",
                };
                let detail = match entry.kind {
                    TimelineKind::Conversation => entry
                        .payload
                        .get("intent")
                        .and_then(|v| v.as_str())
                        .unwrap_or("turn")
                        .to_string(),
                    TimelineKind::Execution => {
                        let operation = entry
                            .payload
                            .get("operation")
                            .and_then(|v| v.as_str())
                            .unwrap_or("operation");
                        let success = entry
                            .payload
                            .get("success")
                            .and_then(|v| v.as_bool())
                            .unwrap_or(false);
                        format!("{} ({})", operation, if success { "ok" } else { "failed" })
                    }
                };
                out.push_str(&format!(
                    "  - {} [{}] {}\n",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    kind,
                    detail
                ));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cortex_core::{ConversationTurn, ExecutionEvent};

    use crate::correlator::Correlator;

    fn sample_narratives() -> Vec<UnifiedNarrative> {
        let t = Utc::now();
        let turns = vec![ConversationTurn::new()
            .user("ship the fix")
            .assistant("shipped")
            .intent("deploy")
            .at(t)];
        let events = vec![ExecutionEvent::new("deploy").success(true).at(t)];
        Correlator::new(30).correlate(&turns, &events)
    }

    #[test]
    fn test_markdown_report() {
        let narratives = sample_narratives();
        let report = NarrativeReport::new(ReportFormat::Markdown).render(&narratives);

        assert!(report.contains("# Fusion narratives"));
        assert!(report.contains("outcome: successful"));
        assert!(report.contains("deploy (ok)"));
    }

    #[test]
    fn test_empty_markdown_report() {
        let report = NarrativeReport::new(ReportFormat::Markdown).render(&[]);
        assert!(report.contains("No correlated activity"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let narratives = sample_narratives();
        let report = NarrativeReport::new(ReportFormat::Json).render(&narratives);

        let parsed: Vec<UnifiedNarrative> = serde_json::from_str(&report).unwrap();
        assert_eq!(parsed.len(), narratives.len());
        assert_eq!(parsed[0].outcome, narratives[0].outcome);
    }

    #[test]
    fn test_text_report() {
        let narratives = sample_narratives();
        let report = NarrativeReport::new(ReportFormat::Text).render(&narratives);
        assert!(report.contains("outcome successful"));
    }
}
