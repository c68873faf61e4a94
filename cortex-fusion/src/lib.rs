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

//! Cortex Fusion
//!
//! Joins the conversational and traditional memory channels into unified
//! narratives by wall-clock proximity.
//!
//! # Example
//!
//! ```rust,ignore
//! use cortex_core::{ConversationTurn, ExecutionEvent, FusionConfig};
//! use cortex_fusion::FusionEngine;
//!
//! #[tokio::main]
//! async fn main() -> cortex_core::CortexResult<()> {
//!     let engine = FusionEngine::open(FusionConfig::default()).await?;
//!
//!     engine
//!         .store_conversation(
//!             ConversationTurn::new()
//!                 .user("implement the importer")
//!                 .assistant("done, see src/import.rs")
//!                 .intent("implement"),
//!         )
//!         .await?;
//!     engine
//!         .store_execution(ExecutionEvent::new("build").success(true).duration_ms(950))
//!         .await?;
//!
//!     let narratives = engine.unified_narratives(None).await?;
//!     for narrative in &narratives {
//!         println!("{}", narrative.summary);
//!     }
//!     Ok(())
//! }
//! ```

pub mod correlator;
pub mod engine;
pub mod report;

// Re-exports
pub use correlator::Correlator;
pub use engine::FusionEngine;
pub use report::{NarrativeReport, ReportFormat};
