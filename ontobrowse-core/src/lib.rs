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

//! Ontobrowse Core
//!
//! RDF term model, SPARQL-JSON results parsing and configuration shared by
//! the classifier and label resolver.

pub mod config;
pub mod error;
pub mod results;
pub mod term;
pub mod vocab;

pub use config::{
    BrowserConfig, EndpointConfig, ResolverConfig, VocabularyConfig, DEFAULT_BATCH_SIZE,
    DEFAULT_FILTER_THRESHOLD, DEFAULT_TIMEOUT_SECS,
};
pub use error::{ConfigError, QueryError, QueryResult, ResultsError};
pub use results::{parse_results, parse_select, SelectResults, SPARQL_RESULTS_JSON};
pub use term::{label_or_fallback, last_path_segment, BindingRow, LabelMap, RdfTerm};
