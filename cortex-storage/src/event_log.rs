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

//! Traditional channel store
//!
//! Append-only log of direct-execution events, line-delimited JSON on disk
//! with an in-memory index for reads. Records are read-only once written.

use crate::channel::ExecutionChannel;
use crate::conversation::append_record;
use async_trait::async_trait;
use cortex_core::{CortexResult, EventId, ExecutionEvent};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Event log file name
const EVENT_LOG: &str = "events.jsonl";

#[derive(Debug, Default)]
struct LogState {
    /// Events by ID
    events: HashMap<String, ExecutionEvent>,
    /// Insertion order of event IDs, oldest first
    order: Vec<String>,
}

/// Durable append-only log for the traditional channel
#[derive(Debug)]
pub struct ExecutionLog {
    path: PathBuf,
    state: RwLock<LogState>,
}

impl ExecutionLog {
    /// Open a log rooted at `path`, replaying any existing records
    pub async fn open(path: impl AsRef<Path>) -> CortexResult<Self> {
        let path = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&path)?;

        let mut state = LogState::default();
        let log_path = path.join(EVENT_LOG);
        if log_path.exists() {
            let content = std::fs::read_to_string(&log_path)?;
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                match serde_json::from_str::<ExecutionEvent>(line) {
                    Ok(event) => {
                        let id = event.id.0.clone();
                        if state.events.insert(id.clone(), event).is_none() {
                            state.order.push(id);
                        }
                    }
                    Err(e) => warn!(error = %e, "skipping unreadable event record"),
                }
            }
        }

        info!(
            events = state.order.len(),
            path = %path.display(),
            "execution log opened"
        );

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Validate and append an event; returns the assigned ID
    pub async fn append(&self, event: ExecutionEvent) -> CortexResult<EventId> {
        event.validate()?;

        let mut state = self.state.write().await;
        append_record(&self.path.join(EVENT_LOG), &event)?;

        let id = event.id.clone();
        state.events.insert(id.0.clone(), event);
        state.order.push(id.0.clone());
        debug!(event_id = %id, "event appended");

        Ok(id)
    }

    /// Get an event by ID
    pub async fn get(&self, id: &EventId) -> CortexResult<Option<ExecutionEvent>> {
        let state = self.state.read().await;
        Ok(state.events.get(&id.0).cloned())
    }

    /// The most recent `limit` events, newest first
    pub async fn recent(&self, limit: usize) -> CortexResult<Vec<ExecutionEvent>> {
        let state = self.state.read().await;
        Ok(state
            .order
            .iter()
            .rev()
            .take(limit)
            .filter_map(|id| state.events.get(id).cloned())
            .collect())
    }

    /// Number of recorded events
    pub async fn len(&self) -> usize {
        self.state.read().await.order.len()
    }

    /// Whether the log is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ExecutionChannel for ExecutionLog {
    async fn append(&self, event: ExecutionEvent) -> CortexResult<EventId> {
        ExecutionLog::append(self, event).await
    }

    async fn get(&self, id: &EventId) -> CortexResult<Option<ExecutionEvent>> {
        ExecutionLog::get(self, id).await
    }

    async fn recent(&self, limit: usize) -> CortexResult<Vec<ExecutionEvent>> {
        ExecutionLog::recent(self, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_core::CortexError;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_append_and_recent() {
        let dir = tempdir().unwrap();
        let log = ExecutionLog::open(dir.path()).await.unwrap();

        for i in 0..4i64 {
            log.append(
                ExecutionEvent::new(format!("op-{}", i))
                    .duration_ms(i * 10)
                    .success(i % 2 == 0),
            )
            .await
            .unwrap();
        }

        assert_eq!(log.len().await, 4);
        let recent = log.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].operation, "op-3");
        assert_eq!(recent[1].operation, "op-2");
    }

    #[tokio::test]
    async fn test_negative_duration_rejected_before_write() {
        let dir = tempdir().unwrap();
        let log = ExecutionLog::open(dir.path()).await.unwrap();

        let err = log
            .append(ExecutionEvent::new("build").duration_ms(-5))
            .await
            .unwrap_err();
        assert!(matches!(err, CortexError::Validation(_)));
        assert!(log.is_empty().await);
        assert!(!dir.path().join(EVENT_LOG).exists());
    }

    #[tokio::test]
    async fn test_reload_from_disk() {
        let dir = tempdir().unwrap();
        let id = {
            let log = ExecutionLog::open(dir.path()).await.unwrap();
            log.append(
                ExecutionEvent::new("deploy")
                    .parameter("env", "staging")
                    .duration_ms(840)
                    .success(true),
            )
            .await
            .unwrap()
        };

        let reopened = ExecutionLog::open(dir.path()).await.unwrap();
        let loaded = reopened.get(&id).await.unwrap().unwrap();
        assert_eq!(loaded.operation, "deploy");
        assert_eq!(loaded.duration_ms, 840);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let dir = tempdir().unwrap();
        let log = ExecutionLog::open(dir.path()).await.unwrap();
        assert!(log.get(&EventId::new()).await.unwrap().is_none());
    }
}
