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

//! Conversational channel store
//!
//! Durably records conversation turns as line-delimited JSON with an
//! in-memory index for reads. The store is the only writer of its backing
//! files; the write lock serializes concurrent writers so at most one
//! in-flight write commits at a time. Turns are never deleted, only
//! relocated to the archive log.

use crate::channel::ConversationChannel;
use async_trait::async_trait;
use chrono::Utc;
use cortex_core::{
    ConversationTurn, CortexError, CortexResult, TurnId, TurnQuery, TurnQualityMetrics,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Active log file name
const TURN_LOG: &str = "conversations.jsonl";
/// Archive log file name
const ARCHIVE_LOG: &str = "conversations_archive.jsonl";

#[derive(Debug, Default)]
struct StoreState {
    /// Active turns by ID
    turns: HashMap<String, ConversationTurn>,
    /// Insertion order of active turn IDs, oldest first
    order: Vec<String>,
    /// Number of turns relocated to the archive
    archived: usize,
}

/// Durable store for the conversational channel
#[derive(Debug)]
pub struct ConversationStore {
    path: PathBuf,
    metrics: TurnQualityMetrics,
    state: RwLock<StoreState>,
}

impl ConversationStore {
    /// Open a store rooted at `path`, replaying any existing logs
    pub async fn open(path: impl AsRef<Path>) -> CortexResult<Self> {
        let path = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&path)?;

        let mut state = StoreState::default();

        let archived_ids = load_archive_ids(&path.join(ARCHIVE_LOG))?;
        state.archived = archived_ids.len();

        let log_path = path.join(TURN_LOG);
        if log_path.exists() {
            let content = std::fs::read_to_string(&log_path)?;
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                match serde_json::from_str::<ConversationTurn>(line) {
                    Ok(turn) => {
                        let id = turn.id.0.clone();
                        if archived_ids.contains(&id) {
                            continue;
                        }
                        if state.turns.insert(id.clone(), turn).is_none() {
                            state.order.push(id);
                        }
                    }
                    Err(e) => warn!(error = %e, "skipping unreadable turn record"),
                }
            }
        }

        info!(
            active = state.order.len(),
            archived = state.archived,
            path = %path.display(),
            "conversation store opened"
        );

        Ok(Self {
            path,
            metrics: TurnQualityMetrics::default(),
            state: RwLock::new(state),
        })
    }

    /// Validate, score, and append a turn; returns the assigned ID
    pub async fn store(&self, mut turn: ConversationTurn) -> CortexResult<TurnId> {
        turn.validate()?;
        turn.normalize();
        turn.quality_score = self.metrics.score(&turn.messages).overall;

        let mut state = self.state.write().await;
        append_record(&self.path.join(TURN_LOG), &turn)?;

        let id = turn.id.clone();
        state.turns.insert(id.0.clone(), turn);
        state.order.push(id.0.clone());
        debug!(turn_id = %id, "turn stored");

        Ok(id)
    }

    /// Get a turn by ID
    pub async fn get(&self, id: &TurnId) -> CortexResult<Option<ConversationTurn>> {
        let state = self.state.read().await;
        Ok(state.turns.get(&id.0).cloned())
    }

    /// Substring search, newest first
    pub async fn search(&self, text: &str, limit: usize) -> CortexResult<Vec<ConversationTurn>> {
        self.query(&TurnQuery::text(text).limit(limit)).await
    }

    /// Filtered retrieval, newest first
    pub async fn query(&self, query: &TurnQuery) -> CortexResult<Vec<ConversationTurn>> {
        let state = self.state.read().await;
        let limit = query.limit.unwrap_or(usize::MAX);

        let mut results = Vec::new();
        for id in state.order.iter().rev() {
            if results.len() >= limit {
                break;
            }
            if let Some(turn) = state.turns.get(id) {
                if query.matches(turn) {
                    results.push(turn.clone());
                }
            }
        }
        Ok(results)
    }

    /// The most recent `limit` turns, newest first
    pub async fn recent(&self, limit: usize) -> CortexResult<Vec<ConversationTurn>> {
        let state = self.state.read().await;
        Ok(state
            .order
            .iter()
            .rev()
            .take(limit)
            .filter_map(|id| state.turns.get(id).cloned())
            .collect())
    }

    /// Relocate a turn to the archive log
    ///
    /// The turn stops appearing in reads of the active store. Returns
    /// `false` if the ID is unknown.
    pub async fn archive(&self, id: &TurnId) -> CortexResult<bool> {
        let mut state = self.state.write().await;

        let Some(mut turn) = state.turns.remove(&id.0) else {
            return Ok(false);
        };
        turn.archived_at = Some(Utc::now());

        if let Err(e) = append_record(&self.path.join(ARCHIVE_LOG), &turn) {
            // Archive write failed: put the record back so nothing is lost.
            turn.archived_at = None;
            state.turns.insert(id.0.clone(), turn);
            return Err(e);
        }

        state.order.retain(|t| t != &id.0);
        state.archived += 1;
        debug!(turn_id = %id, "turn archived");
        Ok(true)
    }

    /// Storage statistics
    pub async fn stats(&self) -> StoreStats {
        let state = self.state.read().await;
        StoreStats {
            active_turns: state.order.len(),
            archived_turns: state.archived,
        }
    }
}

#[async_trait]
impl ConversationChannel for ConversationStore {
    async fn store(&self, turn: ConversationTurn) -> CortexResult<TurnId> {
        ConversationStore::store(self, turn).await
    }

    async fn get(&self, id: &TurnId) -> CortexResult<Option<ConversationTurn>> {
        ConversationStore::get(self, id).await
    }

    async fn search(&self, text: &str, limit: usize) -> CortexResult<Vec<ConversationTurn>> {
        ConversationStore::search(self, text, limit).await
    }

    async fn query(&self, query: &TurnQuery) -> CortexResult<Vec<ConversationTurn>> {
        ConversationStore::query(self, query).await
    }

    async fn recent(&self, limit: usize) -> CortexResult<Vec<ConversationTurn>> {
        ConversationStore::recent(self, limit).await
    }

    async fn archive(&self, id: &TurnId) -> CortexResult<bool> {
        ConversationStore::archive(self, id).await
    }
}

/// Storage statistics for the conversational channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub active_turns: usize,
    pub archived_turns: usize,
}

fn load_archive_ids(path: &Path) -> CortexResult<HashSet<String>> {
    let mut ids = HashSet::new();
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            match serde_json::from_str::<ConversationTurn>(line) {
                Ok(turn) => {
                    ids.insert(turn.id.0);
                }
                Err(e) => warn!(error = %e, "skipping unreadable archive record"),
            }
        }
    }
    Ok(ids)
}

/// Append one serialized record as a single line
pub(crate) fn append_record<T: Serialize>(path: &Path, record: &T) -> CortexResult<()> {
    let line = serde_json::to_string(record)?;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CortexError::Storage(format!("cannot open {}: {}", path.display(), e)))?;
    writeln!(file, "{}", line)
        .map_err(|e| CortexError::Storage(format!("cannot append to {}: {}", path.display(), e)))?;
    Ok(())
}
