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

//! System-resource classification
//!
//! Decides whether a URI is vocabulary infrastructure (hidden by default) or
//! domain content. Precedence is fixed:
//!
//! 1. exact match against the core-resource allow-list → domain
//! 2. contains a domain marker substring → domain
//! 3. starts with a system namespace → system
//! 4. anything else → domain

use ontobrowse_core::{BindingRow, VocabularyConfig, DEFAULT_FILTER_THRESHOLD};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct UriClassifier {
    vocabulary: Arc<VocabularyConfig>,
    filter_threshold: usize,
}

impl UriClassifier {
    pub fn new(vocabulary: Arc<VocabularyConfig>) -> Self {
        Self {
            vocabulary,
            filter_threshold: DEFAULT_FILTER_THRESHOLD,
        }
    }

    /// Row count at or below which [`filter_system_resources`](Self::filter_system_resources)
    /// returns its input untouched.
    pub fn with_filter_threshold(mut self, threshold: usize) -> Self {
        self.filter_threshold = threshold;
        self
    }

    pub fn vocabulary(&self) -> &VocabularyConfig {
        &self.vocabulary
    }

    pub fn filter_threshold(&self) -> usize {
        self.filter_threshold
    }

    /// True if `uri` is a system resource that should be hidden.
    pub fn is_system_resource(&self, uri: &str) -> bool {
        if uri.is_empty() {
            return false;
        }

        let vocab = &*self.vocabulary;
        if vocab.core_resources.iter().any(|core| core == uri) {
            return false;
        }
        if vocab.domain_markers.iter().any(|marker| uri.contains(marker.as_str())) {
            return false;
        }

        vocab
            .system_namespaces
            .iter()
            .any(|ns| uri.starts_with(ns.as_str()))
    }

    /// Drop rows whose URI cells are all system resources.
    ///
    /// Rows without URI cells are kept. Inputs of at most `filter_threshold`
    /// rows are returned unchanged, and so is any input that would otherwise
    /// be emptied completely.
    pub fn filter_system_resources(&self, rows: Vec<BindingRow>) -> Vec<BindingRow> {
        if rows.len() <= self.filter_threshold {
            return rows;
        }

        let keep: Vec<bool> = rows.iter().map(|row| self.keeps_row(row)).collect();
        let kept = keep.iter().filter(|k| **k).count();

        if kept == 0 {
            warn!(
                "System filter would remove all {} rows, returning them unfiltered",
                rows.len()
            );
            return rows;
        }

        debug!("System filter kept {} of {} rows", kept, rows.len());
        rows.into_iter()
            .zip(keep)
            .filter_map(|(row, keep)| keep.then_some(row))
            .collect()
    }

    fn keeps_row(&self, row: &BindingRow) -> bool {
        let mut uris = row.uri_cells().peekable();
        if uris.peek().is_none() {
            return true;
        }
        uris.any(|uri| !self.is_system_resource(uri))
    }

    /// Deduplicate `uris` (first occurrence wins) and drop system resources.
    pub fn retain_domain_uris<I, S>(&self, uris: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        uris.into_iter()
            .filter_map(|uri| {
                let uri = uri.as_ref();
                if seen.contains(uri) || self.is_system_resource(uri) {
                    return None;
                }
                seen.insert(uri.to_string());
                Some(uri.to_string())
            })
            .collect()
    }
}

/// Every distinct URI cell in a result set, in first-seen order.
pub fn collect_uris(rows: &[BindingRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut uris = Vec::new();
    for row in rows {
        let mut cells: Vec<&str> = row.uri_cells().collect();
        // cell order within a row is a hash order, sort for stable output
        cells.sort_unstable();
        for uri in cells {
            if seen.insert(uri) {
                uris.push(uri.to_string());
            }
        }
    }
    uris
}
