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

//! Fusion configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default correlation window in minutes
pub const DEFAULT_WINDOW_MINUTES: i64 = 30;

/// Default number of recent turns fetched for correlation
pub const DEFAULT_RECENT_TURNS: usize = 20;

/// Default number of recent events fetched for correlation
pub const DEFAULT_RECENT_EVENTS: usize = 20;

/// Configuration for the fusion engine and its channels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Data directory for the channel logs
    pub data_dir: PathBuf,

    /// Correlation window in minutes; an event within this distance of a
    /// turn is considered related to it
    pub window_minutes: i64,

    /// How many recent turns the correlator fetches
    pub recent_turns: usize,

    /// How many recent events the correlator fetches
    pub recent_events: usize,
}

impl Default for FusionConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cortex")
            .join("memory");

        Self {
            data_dir,
            window_minutes: DEFAULT_WINDOW_MINUTES,
            recent_turns: DEFAULT_RECENT_TURNS,
            recent_events: DEFAULT_RECENT_EVENTS,
        }
    }
}

impl FusionConfig {
    /// Create a config rooted at an explicit data directory
    pub fn at(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Set the correlation window
    pub fn window_minutes(mut self, window_minutes: i64) -> Self {
        self.window_minutes = window_minutes;
        self
    }

    /// Set the recent-history bounds for correlation
    pub fn recent_bounds(mut self, turns: usize, events: usize) -> Self {
        self.recent_turns = turns;
        self.recent_events = events;
        self
    }
}
