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

//! Error types shared across the workspace

use thiserror::Error;

/// Result type for SPARQL query execution
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while converting a SPARQL-JSON document into binding rows
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResultsError {
    /// Body is not valid JSON or not a results document
    #[error("Invalid SPARQL results JSON: {0}")]
    Json(String),

    /// Document has no `results.bindings` array
    #[error("SPARQL results document has no results.bindings array")]
    MissingBindings,

    /// A cell could not be converted into an RDF term
    #[error("Invalid term for ?{var} in row {row}: {reason}")]
    InvalidTerm {
        row: usize,
        var: String,
        reason: String,
    },
}

/// Errors that can occur when querying the external store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Connection or transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout
    #[error("Query timed out after {0}s")]
    Timeout(u64),

    /// Endpoint answered with a non-2xx status
    #[error("Endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error(transparent)]
    Results(#[from] ResultsError),

    /// HTTP client could not be constructed
    #[error("Client error: {0}")]
    Client(String),
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantically invalid configuration
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for ResultsError {
    fn from(e: serde_json::Error) -> Self {
        ResultsError::Json(e.to_string())
    }
}
