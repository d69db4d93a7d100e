// Copyright 2025 AgentReplay (https://github.com/agentreplay)
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

//! Ontobrowse Query
//!
//! System-resource classification and batched label resolution against a
//! GraphDB repository.
//!
//! Typical request flow:
//!
//! ```text
//! rows -> collect_uris -> LabelResolver::fetch_labels_for_uris -> LabelMap
//! rows -> UriClassifier::filter_system_resources -> rows shown to the user
//! ```

pub mod batch;
pub mod classifier;
pub mod client;
pub mod labels;
pub mod sparql;

pub use classifier::{collect_uris, UriClassifier};
pub use client::{GraphDbClient, SparqlExecutor};
pub use labels::{BatchFailure, LabelCandidates, LabelResolution, LabelResolver};
