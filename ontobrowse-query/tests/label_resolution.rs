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

//! Label resolver scenarios against an in-memory store

use async_trait::async_trait;
use ontobrowse_core::{
    last_path_segment, vocab, BindingRow, BrowserConfig, QueryError, QueryResult, RdfTerm,
};
use ontobrowse_query::{LabelResolver, SparqlExecutor};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

type Labels = HashMap<String, Vec<(String, Option<String>)>>;

/// Answers label queries from a fixed table and records every query.
#[derive(Default)]
struct MemoryStore {
    labels: Labels,
    /// Zero-based call numbers that fail
    failing_calls: HashSet<usize>,
    /// Extra rows appended to the response of a given call
    extra_rows: HashMap<usize, Vec<BindingRow>>,
    panic_on_call: Option<usize>,
    queries: Mutex<Vec<String>>,
}

impl MemoryStore {
    fn with_label(mut self, uri: &str, label: &str, lang: Option<&str>) -> Self {
        self.labels
            .entry(uri.to_string())
            .or_default()
            .push((label.to_string(), lang.map(str::to_string)));
        self
    }

    fn failing(mut self, call: usize) -> Self {
        self.failing_calls.insert(call);
        self
    }

    fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

fn values_uris(query: &str) -> Vec<String> {
    let line = query
        .lines()
        .find(|l| l.trim_start().starts_with("VALUES ?uri"))
        .expect("query has VALUES ?uri");
    line.split('<')
        .skip(1)
        .filter_map(|part| part.split('>').next())
        .map(str::to_string)
        .collect()
}

fn label_row(uri: &str, label: &str, lang: Option<&str>) -> BindingRow {
    let literal = match lang {
        Some(lang) => RdfTerm::lang_literal(label, lang),
        None => RdfTerm::literal(label),
    };
    BindingRow::new()
        .with("uri", RdfTerm::uri(uri))
        .with("label", literal)
        .with("lang", RdfTerm::literal(lang.unwrap_or("")))
}

#[async_trait]
impl SparqlExecutor for MemoryStore {
    async fn select(&self, query: &str) -> QueryResult<Vec<BindingRow>> {
        let call = {
            let mut queries = self.queries.lock().unwrap();
            queries.push(query.to_string());
            queries.len() - 1
        };

        if self.panic_on_call == Some(call) {
            panic!("store exploded");
        }
        if self.failing_calls.contains(&call) {
            return Err(QueryError::Transport("connection refused".into()));
        }

        let mut rows = Vec::new();
        for uri in values_uris(query) {
            for (label, lang) in self.labels.get(&uri).into_iter().flatten() {
                rows.push(label_row(&uri, label, lang.as_deref()));
            }
        }
        rows.extend(self.extra_rows.get(&call).cloned().unwrap_or_default());
        Ok(rows)
    }
}

fn resolver(store: Arc<MemoryStore>) -> LabelResolver {
    LabelResolver::from_config(store, &BrowserConfig::default())
}

#[tokio::test]
async fn test_empty_input_issues_no_query() {
    let store = Arc::new(MemoryStore::default());
    let labels = resolver(store.clone())
        .fetch_labels_for_uris(Vec::<String>::new())
        .await;

    assert!(labels.is_empty());
    assert_eq!(store.query_count(), 0);
}

#[tokio::test]
async fn test_only_system_uris_issues_no_query() {
    let store = Arc::new(MemoryStore::default());
    let uris = [
        format!("{}label", vocab::RDFS),
        format!("{}sameAs", vocab::OWL),
    ];
    let labels = resolver(store.clone()).fetch_labels_for_uris(&uris).await;

    assert!(labels.is_empty());
    assert_eq!(store.query_count(), 0);
}

#[tokio::test]
async fn test_swedish_beats_english() {
    let store = Arc::new(
        MemoryStore::default()
            .with_label("http://ex/A", "Alph-en", Some("en"))
            .with_label("http://ex/A", "Alpha", Some("sv")),
    );
    let labels = resolver(store)
        .fetch_labels_for_uris(["http://ex/A"])
        .await;

    assert_eq!(labels["http://ex/A"], "Alpha");
}

#[tokio::test]
async fn test_swedish_beats_english_across_batches() {
    let uris: Vec<String> = (0..25).map(|i| format!("http://ex/item{}", i)).collect();
    let mut store = MemoryStore::default().with_label("http://ex/A", "Alph-en", Some("en"));
    store
        .extra_rows
        .insert(1, vec![label_row("http://ex/A", "Alpha", Some("sv"))]);

    let mut requested = vec!["http://ex/A".to_string()];
    requested.extend(uris);

    let labels = resolver(Arc::new(store))
        .fetch_labels_for_uris(&requested)
        .await;

    assert_eq!(labels["http://ex/A"], "Alpha");
    assert_eq!(labels.len(), 26);
}

#[tokio::test]
async fn test_english_only() {
    let store = Arc::new(MemoryStore::default().with_label("http://ex/B", "Beta", Some("en")));
    let labels = resolver(store).fetch_labels_for_uris(["http://ex/B"]).await;

    assert_eq!(labels["http://ex/B"], "Beta");
}

#[tokio::test]
async fn test_untagged_used_when_no_language_match() {
    let store = Arc::new(
        MemoryStore::default()
            .with_label("http://ex/C", "gamma", None)
            .with_label("http://ex/C", "Gamma auf Deutsch", Some("de")),
    );
    let labels = resolver(store).fetch_labels_for_uris(["http://ex/C"]).await;

    assert_eq!(labels["http://ex/C"], "gamma");
}

#[tokio::test]
async fn test_unlabelled_uris_get_last_path_segment() {
    let store = Arc::new(MemoryStore::default());
    let uris = [
        "http://ex.org/things/Widget",
        "http://ex.org/vocab#Gadget",
        "http://ex.org/things/",
    ];
    let labels = resolver(store).fetch_labels_for_uris(uris).await;

    assert_eq!(labels.len(), 3);
    for uri in uris {
        assert_eq!(labels[uri], last_path_segment(uri));
    }
    assert_eq!(labels["http://ex.org/things/"], "http://ex.org/things/");
}

#[tokio::test]
async fn test_duplicates_are_queried_once() {
    let store = Arc::new(MemoryStore::default().with_label("http://ex/A", "Alpha", Some("sv")));
    let labels = resolver(store.clone())
        .fetch_labels_for_uris(["http://ex/A", "http://ex/A", "http://ex/A"])
        .await;

    assert_eq!(labels.len(), 1);
    assert_eq!(store.query_count(), 1);
    let queries = store.queries.lock().unwrap();
    assert_eq!(values_uris(&queries[0]), vec!["http://ex/A"]);
}

#[tokio::test]
async fn test_failed_batch_falls_back_without_affecting_others() {
    let uris: Vec<String> = (0..45).map(|i| format!("http://ex/item{}", i)).collect();
    let mut store = MemoryStore::default().failing(1);
    for uri in &uris {
        let name = format!("Sak {}", last_path_segment(uri));
        store = store.with_label(uri, &name, Some("sv"));
    }
    let store = Arc::new(store);

    let resolution = resolver(store.clone()).resolve(&uris).await;

    assert_eq!(store.query_count(), 3);
    assert_eq!(resolution.queries_issued, 3);
    assert_eq!(resolution.labels.len(), 45);
    assert_eq!(resolution.failures.len(), 1);
    assert!(!resolution.is_complete());

    let failure = &resolution.failures[0];
    assert_eq!(failure.batch_index, 1);
    assert_eq!(failure.uris, uris[20..40].to_vec());
    assert!(matches!(failure.error, QueryError::Transport(_)));

    for uri in &uris[20..40] {
        assert_eq!(resolution.labels[uri], last_path_segment(uri));
    }
    for uri in uris[..20].iter().chain(&uris[40..]) {
        assert_eq!(resolution.labels[uri], format!("Sak {}", last_path_segment(uri)));
    }
}

#[tokio::test]
async fn test_end_to_end_batching() {
    let mut uris: Vec<String> = (0..42).map(|i| format!("http://ex.org/item/{}", i)).collect();
    uris.insert(5, format!("{}type", vocab::RDF));
    uris.insert(17, format!("{}comment", vocab::RDFS));
    uris.push(format!("{}integer", vocab::XSD));
    assert_eq!(uris.len(), 45);

    let store = Arc::new(MemoryStore::default());
    let resolution = resolver(store.clone()).resolve(&uris).await;

    assert_eq!(store.query_count(), 3);
    let batch_sizes: Vec<usize> = store
        .queries
        .lock()
        .unwrap()
        .iter()
        .map(|q| values_uris(q).len())
        .collect();
    assert_eq!(batch_sizes, vec![20, 20, 2]);

    assert_eq!(resolution.labels.len(), 42);
    assert!(resolution.is_complete());
    assert!(!resolution.labels.contains_key(&format!("{}type", vocab::RDF)));
}

#[tokio::test]
async fn test_panic_degrades_to_fallback_labels() {
    let store = MemoryStore {
        panic_on_call: Some(0),
        ..MemoryStore::default()
    }
    .with_label("http://ex/A", "Alpha", Some("sv"));
    let uris = [
        "http://ex/A".to_string(),
        "http://ex/path/B".to_string(),
        format!("{}sameAs", vocab::OWL),
    ];

    let resolution = resolver(Arc::new(store)).resolve(&uris).await;

    assert!(resolution.degraded);
    assert_eq!(resolution.labels.len(), 2);
    assert_eq!(resolution.labels["http://ex/A"], "A");
    assert_eq!(resolution.labels["http://ex/path/B"], "B");
}

#[tokio::test]
async fn test_custom_batch_size() {
    let uris: Vec<String> = (0..10).map(|i| format!("http://ex/n{}", i)).collect();
    let store = Arc::new(MemoryStore::default());
    let mut config = BrowserConfig::default();
    config.resolver.batch_size = 4;

    let labels = LabelResolver::from_config(store.clone(), &config)
        .fetch_labels_for_uris(&uris)
        .await;

    assert_eq!(labels.len(), 10);
    assert_eq!(store.query_count(), 3);
}
