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

//! GraphDB client against a mocked SPARQL endpoint

use ontobrowse_core::{BrowserConfig, EndpointConfig, QueryError, RdfTerm};
use ontobrowse_query::{GraphDbClient, LabelResolver, SparqlExecutor};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(server: &MockServer) -> EndpointConfig {
    EndpointConfig {
        base_url: server.uri(),
        repository: "products".to_string(),
        ..EndpointConfig::default()
    }
}

fn results_body() -> serde_json::Value {
    json!({
        "head": { "vars": ["uri", "label", "lang"] },
        "results": { "bindings": [
            {
                "uri": { "type": "uri", "value": "http://ex.org/A" },
                "label": { "type": "literal", "value": "Alfa", "xml:lang": "sv" },
                "lang": { "type": "literal", "value": "sv" }
            }
        ] }
    })
}

#[tokio::test]
async fn test_select_sends_sparql_protocol_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/products"))
        .and(query_param("query", "SELECT * WHERE { ?s ?p ?o }"))
        .and(header("accept", "application/sparql-results+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = GraphDbClient::new(&endpoint(&server)).unwrap();
    let rows = client.select("SELECT * WHERE { ?s ?p ?o }").await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("label"),
        Some(&RdfTerm::lang_literal("Alfa", "sv"))
    );
}

#[tokio::test]
async fn test_basic_auth_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = endpoint(&server);
    config.username = Some("reader".to_string());
    config.password = Some("secret".to_string());

    let client = GraphDbClient::new(&config).unwrap();
    assert!(client.select("ASK {}").await.is_ok());
}

#[tokio::test]
async fn test_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("repository offline"))
        .mount(&server)
        .await;

    let client = GraphDbClient::new(&endpoint(&server)).unwrap();
    let err = client.select("SELECT * {}").await.unwrap_err();

    assert_eq!(
        err,
        QueryError::Status {
            status: 503,
            body: "repository offline".to_string()
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_recoverable_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "boolean": true })))
        .mount(&server)
        .await;

    let client = GraphDbClient::new(&endpoint(&server)).unwrap();
    let err = client.select("SELECT * {}").await.unwrap_err();

    assert!(matches!(err, QueryError::Results(_)));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(results_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = endpoint(&server);
    config.timeout_secs = 1;

    let client = GraphDbClient::new(&config).unwrap();
    let err = client.select("SELECT * {}").await.unwrap_err();

    assert_eq!(err, QueryError::Timeout(1));
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let config = EndpointConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..EndpointConfig::default()
    };

    let client = GraphDbClient::new(&config).unwrap();
    let err = client.select("SELECT * {}").await.unwrap_err();

    assert!(matches!(
        err,
        QueryError::Transport(_) | QueryError::Timeout(_)
    ));
}

#[tokio::test]
async fn test_resolver_over_http_with_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = BrowserConfig {
        endpoint: endpoint(&server),
        ..BrowserConfig::default()
    };
    let client = Arc::new(GraphDbClient::new(&config.endpoint).unwrap());
    let resolver = LabelResolver::from_config(client, &config);

    let resolution = resolver
        .resolve(["http://ex.org/A", "http://ex.org/things/Widget"])
        .await;

    assert_eq!(resolution.failures.len(), 1);
    assert_eq!(resolution.labels["http://ex.org/A"], "A");
    assert_eq!(resolution.labels["http://ex.org/things/Widget"], "Widget");
}

#[tokio::test]
async fn test_resolver_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = BrowserConfig {
        endpoint: endpoint(&server),
        ..BrowserConfig::default()
    };
    let client = Arc::new(GraphDbClient::new(&config.endpoint).unwrap());
    let labels = LabelResolver::from_config(client, &config)
        .fetch_labels_for_uris(["http://ex.org/A", "http://ex.org/B"])
        .await;

    assert_eq!(labels["http://ex.org/A"], "Alfa");
    assert_eq!(labels["http://ex.org/B"], "B");
}
