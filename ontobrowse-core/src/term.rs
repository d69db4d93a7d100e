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

//! RDF term and binding-row model
//!
//! Values produced by parsing SPARQL-JSON results. Terms are immutable once
//! constructed; a [`BindingRow`] maps each projected variable of one query
//! solution to its term.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single RDF term as returned in a query solution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RdfTerm {
    /// IRI reference
    Uri { value: String },
    /// Plain, language-tagged or typed literal
    Literal {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        datatype: Option<String>,
    },
    /// Blank node label
    Blank { value: String },
}

impl RdfTerm {
    pub fn uri(value: impl Into<String>) -> Self {
        Self::Uri {
            value: value.into(),
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            lang: None,
            datatype: None,
        }
    }

    /// Language-tagged literal. An empty tag is stored as no tag.
    pub fn lang_literal(value: impl Into<String>, lang: impl Into<String>) -> Self {
        let lang = lang.into();
        Self::Literal {
            value: value.into(),
            lang: if lang.is_empty() { None } else { Some(lang) },
            datatype: None,
        }
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            lang: None,
            datatype: Some(datatype.into()),
        }
    }

    pub fn blank(value: impl Into<String>) -> Self {
        Self::Blank {
            value: value.into(),
        }
    }

    /// Lexical value regardless of kind.
    pub fn value(&self) -> &str {
        match self {
            Self::Uri { value } | Self::Literal { value, .. } | Self::Blank { value } => value,
        }
    }

    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri { value } => Some(value),
            _ => None,
        }
    }

    pub fn is_uri(&self) -> bool {
        matches!(self, Self::Uri { .. })
    }

    /// Language tag of a literal, `None` for untagged literals and non-literals.
    pub fn lang(&self) -> Option<&str> {
        match self {
            Self::Literal { lang, .. } => lang.as_deref(),
            _ => None,
        }
    }
}

/// One solution of a `SELECT` query: variable name to bound term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingRow {
    cells: HashMap<String, RdfTerm>,
}

impl BindingRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures.
    pub fn with(mut self, var: impl Into<String>, term: RdfTerm) -> Self {
        self.cells.insert(var.into(), term);
        self
    }

    pub fn insert(&mut self, var: impl Into<String>, term: RdfTerm) -> Option<RdfTerm> {
        self.cells.insert(var.into(), term)
    }

    pub fn get(&self, var: &str) -> Option<&RdfTerm> {
        self.cells.get(var)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RdfTerm)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Values of every URI-typed cell in the row.
    pub fn uri_cells(&self) -> impl Iterator<Item = &str> {
        self.cells.values().filter_map(RdfTerm::as_uri)
    }
}

impl FromIterator<(String, RdfTerm)> for BindingRow {
    fn from_iter<T: IntoIterator<Item = (String, RdfTerm)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Resolved display label per URI.
///
/// A URI missing from the map is displayed as its last path segment, see
/// [`label_or_fallback`].
pub type LabelMap = HashMap<String, String>;

/// Remainder after the last `/` or `#`, or the whole URI when that
/// remainder is empty or there is no separator.
pub fn last_path_segment(uri: &str) -> &str {
    match uri.rfind(['/', '#']) {
        Some(idx) if idx + 1 < uri.len() => &uri[idx + 1..],
        _ => uri,
    }
}

/// Label for `uri`, falling back to its last path segment.
pub fn label_or_fallback<'a>(labels: &'a LabelMap, uri: &'a str) -> &'a str {
    labels
        .get(uri)
        .map(String::as_str)
        .unwrap_or_else(|| last_path_segment(uri))
}
