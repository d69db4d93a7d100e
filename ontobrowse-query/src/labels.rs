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

//! Label resolution
//!
//! Maps arbitrary URIs to human-readable labels:
//!
//! ```text
//! dedup -> drop system URIs -> batches of N -> (query -> merge)* -> finalize
//! ```
//!
//! Per URI, literals are merged into three slots (primary language,
//! secondary language, untagged). The final label is the first filled slot,
//! else the last path segment of the URI, else the URI itself. The resolver
//! never fails: a failed batch only costs its URIs their real labels, and a
//! panic anywhere in the pipeline degrades to fallback labels for everything.

use crate::batch;
use crate::classifier::UriClassifier;
use crate::client::SparqlExecutor;
use crate::sparql::{self, VAR_LABEL, VAR_LANG, VAR_URI};
use futures::FutureExt;
use ontobrowse_core::{
    last_path_segment, BindingRow, BrowserConfig, LabelMap, QueryError, RdfTerm,
    VocabularyConfig, DEFAULT_BATCH_SIZE,
};
use std::collections::{HashMap, HashSet};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Label candidates collected for one URI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCandidates {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub untagged: Option<String>,
}

impl LabelCandidates {
    /// Merge one literal.
    ///
    /// Primary-language values always overwrite. A secondary value is taken
    /// only while no primary value exists, an untagged one only while both
    /// are empty. Other languages are ignored.
    pub fn offer(&mut self, value: &str, lang: Option<&str>, primary: &str, secondary: &str) {
        match lang.unwrap_or("") {
            l if l == primary => self.primary = Some(value.to_string()),
            l if l == secondary => {
                if self.primary.is_none() {
                    self.secondary = Some(value.to_string());
                }
            }
            "" => {
                if self.primary.is_none() && self.secondary.is_none() {
                    self.untagged = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    pub fn best(&self) -> Option<&str> {
        self.primary
            .as_deref()
            .or(self.secondary.as_deref())
            .or(self.untagged.as_deref())
    }
}

/// A batch whose query failed; its URIs received fallback labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub batch_index: usize,
    pub uris: Vec<String>,
    pub error: QueryError,
}

/// Labels plus diagnostics for one resolution
#[derive(Debug, Clone, Default)]
pub struct LabelResolution {
    pub labels: LabelMap,
    pub failures: Vec<BatchFailure>,
    pub queries_issued: usize,
    /// The pipeline panicked and every label is a fallback
    pub degraded: bool,
}

impl LabelResolution {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && !self.degraded
    }
}

pub struct LabelResolver {
    executor: Arc<dyn SparqlExecutor>,
    classifier: UriClassifier,
    batch_size: usize,
}

impl LabelResolver {
    pub fn new(executor: Arc<dyn SparqlExecutor>, classifier: UriClassifier) -> Self {
        Self {
            executor,
            classifier,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn from_config(executor: Arc<dyn SparqlExecutor>, config: &BrowserConfig) -> Self {
        let classifier = UriClassifier::new(Arc::new(config.vocabulary.clone()))
            .with_filter_threshold(config.resolver.filter_threshold);
        Self::new(executor, classifier).with_batch_size(config.resolver.batch_size)
    }

    /// URIs per query; 0 is treated as 1.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn classifier(&self) -> &UriClassifier {
        &self.classifier
    }

    /// Best-effort label for every non-system URI in `uris`.
    pub async fn fetch_labels_for_uris<I, S>(&self, uris: I) -> LabelMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.resolve(uris).await.labels
    }

    /// Like [`fetch_labels_for_uris`](Self::fetch_labels_for_uris) but keeps
    /// per-batch failures.
    pub async fn resolve<I, S>(&self, uris: I) -> LabelResolution
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: Vec<String> = uris.into_iter().map(|u| u.as_ref().to_string()).collect();

        match AssertUnwindSafe(self.resolve_batches(&requested))
            .catch_unwind()
            .await
        {
            Ok(resolution) => resolution,
            Err(_) => {
                error!(
                    "Label resolution panicked, using fallback labels for {} URIs",
                    requested.len()
                );
                LabelResolution {
                    labels: self.fallback_labels(&requested),
                    failures: Vec::new(),
                    queries_issued: 0,
                    degraded: true,
                }
            }
        }
    }

    async fn resolve_batches(&self, requested: &[String]) -> LabelResolution {
        let start = Instant::now();
        let uris = self.classifier.retain_domain_uris(requested);
        if uris.is_empty() {
            debug!("No domain URIs among {} requested", requested.len());
            return LabelResolution::default();
        }

        let vocab = self.classifier.vocabulary();
        let wanted: HashSet<&str> = uris.iter().map(String::as_str).collect();
        let mut candidates: HashMap<String, LabelCandidates> = HashMap::new();
        let mut failures = Vec::new();
        let mut queries_issued = 0;

        let outcomes = batch::run_sequential(&uris, self.batch_size, |_, batch| {
            self.query_batch(vocab, batch)
        })
        .await;

        for outcome in outcomes {
            match outcome.result {
                Ok(Some(rows)) => {
                    queries_issued += 1;
                    merge_rows(&rows, &wanted, vocab, &mut candidates);
                }
                Ok(None) => {}
                Err(error) => {
                    queries_issued += 1;
                    warn!(
                        "Label batch {} ({} URIs) failed: {}",
                        outcome.index,
                        outcome.items.len(),
                        error
                    );
                    failures.push(BatchFailure {
                        batch_index: outcome.index,
                        uris: outcome.items.to_vec(),
                        error,
                    });
                }
            }
        }

        let labels: LabelMap = uris
            .iter()
            .map(|uri| {
                let label = candidates
                    .get(uri)
                    .and_then(LabelCandidates::best)
                    .unwrap_or_else(|| last_path_segment(uri));
                (uri.clone(), label.to_string())
            })
            .collect();

        info!(
            "Resolved {} labels ({} from store) in {} queries, {} failed, {}ms",
            labels.len(),
            candidates.len(),
            queries_issued,
            failures.len(),
            start.elapsed().as_millis()
        );

        LabelResolution {
            labels,
            failures,
            queries_issued,
            degraded: false,
        }
    }

    /// `Ok(None)` when no URI of the batch can be put into a query.
    async fn query_batch(
        &self,
        vocab: &VocabularyConfig,
        uris: &[String],
    ) -> Result<Option<Vec<BindingRow>>, QueryError> {
        let languages = [
            vocab.primary_language.as_str(),
            vocab.secondary_language.as_str(),
        ];
        let Some(query) = sparql::label_query(uris, &vocab.label_predicates, &languages) else {
            debug!("Skipping batch of {} URIs with nothing to query", uris.len());
            return Ok(None);
        };
        self.executor.select(&query).await.map(Some)
    }

    fn fallback_labels(&self, requested: &[String]) -> LabelMap {
        let uris = std::panic::catch_unwind(AssertUnwindSafe(|| {
            self.classifier.retain_domain_uris(requested)
        }))
        .unwrap_or_else(|_| requested.to_vec());

        uris.into_iter()
            .map(|uri| {
                let label = last_path_segment(&uri).to_string();
                (uri, label)
            })
            .collect()
    }
}

fn merge_rows(
    rows: &[BindingRow],
    wanted: &HashSet<&str>,
    vocab: &VocabularyConfig,
    candidates: &mut HashMap<String, LabelCandidates>,
) {
    for row in rows {
        let Some(uri) = row.get(VAR_URI).and_then(RdfTerm::as_uri) else {
            continue;
        };
        if !wanted.contains(uri) {
            continue;
        }
        let Some(RdfTerm::Literal { value, lang, .. }) = row.get(VAR_LABEL) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }

        // the literal's own tag wins, ?lang covers stores that drop xml:lang
        let lang = lang
            .as_deref()
            .or_else(|| row.get(VAR_LANG).map(RdfTerm::value))
            .filter(|l| !l.is_empty());

        candidates.entry(uri.to_string()).or_default().offer(
            value,
            lang,
            &vocab.primary_language,
            &vocab.secondary_language,
        );
    }
}
