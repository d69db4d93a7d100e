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

//! SPARQL 1.1 Query Results JSON parsing
//!
//! The wire document is deserialized into loose structs first and then
//! validated into [`BindingRow`]s. Anything that does not conform is
//! reported as a [`ResultsError`] so callers can treat it as a recoverable
//! per-query failure.
//!
//! ```text
//! { "head": { "vars": [...] },
//!   "results": { "bindings": [ { "<var>": { "type": "uri", "value": "..." } } ] } }
//! ```

use crate::error::ResultsError;
use crate::term::{BindingRow, RdfTerm};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Media type requested from the endpoint
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireResults {
    #[serde(default)]
    pub head: WireHead,
    #[serde(default)]
    pub results: Option<WireBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireBody {
    #[serde(default)]
    pub bindings: Option<Vec<HashMap<String, WireTerm>>>,
}

/// A single result cell exactly as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTerm {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, rename = "xml:lang", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl WireTerm {
    fn into_term(self) -> Result<RdfTerm, String> {
        match self.kind.as_str() {
            "uri" => Ok(RdfTerm::uri(self.value)),
            "bnode" => Ok(RdfTerm::blank(self.value)),
            // "typed-literal" is the pre-1.1 spelling some stores still emit
            "literal" | "typed-literal" => Ok(match (self.lang, self.datatype) {
                (Some(lang), _) if !lang.is_empty() => RdfTerm::lang_literal(self.value, lang),
                (_, Some(datatype)) => RdfTerm::typed_literal(self.value, datatype),
                _ => RdfTerm::literal(self.value),
            }),
            other => Err(format!("unknown term type '{}'", other)),
        }
    }
}

impl From<&RdfTerm> for WireTerm {
    fn from(term: &RdfTerm) -> Self {
        match term {
            RdfTerm::Uri { value } => Self {
                kind: "uri".to_string(),
                value: value.clone(),
                lang: None,
                datatype: None,
            },
            RdfTerm::Literal {
                value,
                lang,
                datatype,
            } => Self {
                kind: "literal".to_string(),
                value: value.clone(),
                lang: lang.clone(),
                datatype: datatype.clone(),
            },
            RdfTerm::Blank { value } => Self {
                kind: "bnode".to_string(),
                value: value.clone(),
                lang: None,
                datatype: None,
            },
        }
    }
}

/// Parsed `SELECT` result: projected variables and solutions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectResults {
    pub vars: Vec<String>,
    pub rows: Vec<BindingRow>,
}

/// Parse and validate a SPARQL-JSON body into binding rows.
pub fn parse_results(body: &str) -> Result<Vec<BindingRow>, ResultsError> {
    parse_select(body).map(|results| results.rows)
}

/// Like [`parse_results`] but also keeps `head.vars`.
pub fn parse_select(body: &str) -> Result<SelectResults, ResultsError> {
    let wire: WireResults = serde_json::from_str(body)?;
    from_wire(wire)
}

/// Validate an already-deserialized document.
pub fn from_wire(wire: WireResults) -> Result<SelectResults, ResultsError> {
    let bindings = wire
        .results
        .and_then(|body| body.bindings)
        .ok_or(ResultsError::MissingBindings)?;

    let mut rows = Vec::with_capacity(bindings.len());
    for (row_idx, cells) in bindings.into_iter().enumerate() {
        let mut row = BindingRow::new();
        for (var, cell) in cells {
            let term = cell.into_term().map_err(|reason| ResultsError::InvalidTerm {
                row: row_idx,
                var: var.clone(),
                reason,
            })?;
            row.insert(var, term);
        }
        rows.push(row);
    }

    Ok(SelectResults {
        vars: wire.head.vars,
        rows,
    })
}

/// Serialize rows back into a SPARQL-JSON document.
pub fn to_wire(vars: &[String], rows: &[BindingRow]) -> WireResults {
    let bindings = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|(var, term)| (var.to_string(), WireTerm::from(term)))
                .collect()
        })
        .collect();

    WireResults {
        head: WireHead {
            vars: vars.to_vec(),
        },
        results: Some(WireBody {
            bindings: Some(bindings),
        }),
    }
}
