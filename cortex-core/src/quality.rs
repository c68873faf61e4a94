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

//! Turn quality scoring
//!
//! Scores a turn's messages on a fixed set of weighted dimensions and maps
//! the result into [0, 10]. The score is deterministic for identical input:
//! storing the same messages twice yields the same score.
//!
//! # Quality Dimensions
//!
//! - **Substance**: enough content to be worth recalling later
//! - **Code**: presence of code-formatted content
//! - **Dialogue**: a real exchange, both roles present

use crate::conversation::{Message, Role};
use serde::{Deserialize, Serialize};

/// Quality score for a turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityScore {
    /// Overall score in [0, 10]
    pub overall: f64,
    /// Individual dimension scores
    pub dimensions: Vec<DimensionScore>,
}

/// Individual dimension score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Dimension name
    pub name: String,
    /// Score in [0.0, 1.0]
    pub score: f64,
    /// Weight in the overall calculation
    pub weight: f64,
}

/// Quality metrics calculator for conversation turns
#[derive(Debug, Clone)]
pub struct TurnQualityMetrics {
    /// Weight of the substance dimension
    pub substance_weight: f64,
    /// Weight of the code dimension
    pub code_weight: f64,
    /// Weight of the dialogue dimension
    pub dialogue_weight: f64,
    /// Character count at which substance saturates
    pub substance_target_chars: usize,
}

impl Default for TurnQualityMetrics {
    fn default() -> Self {
        Self {
            substance_weight: 0.5,
            code_weight: 0.3,
            dialogue_weight: 0.2,
            substance_target_chars: 400,
        }
    }
}

impl TurnQualityMetrics {
    /// Score a turn's messages
    pub fn score(&self, messages: &[Message]) -> QualityScore {
        let substance = self.score_substance(messages);
        let code = self.score_code(messages);
        let dialogue = self.score_dialogue(messages);

        let dimensions = vec![
            DimensionScore {
                name: "substance".to_string(),
                score: substance,
                weight: self.substance_weight,
            },
            DimensionScore {
                name: "code".to_string(),
                score: code,
                weight: self.code_weight,
            },
            DimensionScore {
                name: "dialogue".to_string(),
                score: dialogue,
                weight: self.dialogue_weight,
            },
        ];

        let total_weight: f64 = dimensions.iter().map(|d| d.weight).sum();
        let weighted: f64 = dimensions.iter().map(|d| d.score * d.weight).sum();
        let overall = (weighted / total_weight * 10.0).clamp(0.0, 10.0);

        QualityScore { overall, dimensions }
    }

    fn score_substance(&self, messages: &[Message]) -> f64 {
        let chars: usize = messages.iter().map(|m| m.content.len()).sum();
        (chars as f64 / self.substance_target_chars as f64).min(1.0)
    }

    fn score_code(&self, messages: &[Message]) -> f64 {
        if messages.iter().any(|m| m.content.contains("```")) {
            1.0
        } else if messages.iter().any(|m| m.content.contains('`')) {
            0.5
        } else {
            0.0
        }
    }

    fn score_dialogue(&self, messages: &[Message]) -> f64 {
        let has_user = messages.iter().any(|m| m.role == Role::User);
        let has_assistant = messages.iter().any(|m| m.role == Role::Assistant);
        match (has_user, has_assistant) {
            (true, true) => 1.0,
            (true, false) | (false, true) => 0.5,
            (false, false) => 0.0,
        }
    }
}
