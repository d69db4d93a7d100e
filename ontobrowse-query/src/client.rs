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

//! SPARQL protocol client for GraphDB repositories

use async_trait::async_trait;
use ontobrowse_core::{
    parse_results, BindingRow, EndpointConfig, QueryError, QueryResult, SPARQL_RESULTS_JSON,
};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

/// Longest error body kept in [`QueryError::Status`]
const MAX_ERROR_BODY: usize = 512;

/// Anything that can answer a SPARQL `SELECT` with binding rows
#[async_trait]
pub trait SparqlExecutor: Send + Sync {
    async fn select(&self, query: &str) -> QueryResult<Vec<BindingRow>>;
}

/// HTTP client for `GET {base}/repositories/{repo}?query=...`
pub struct GraphDbClient {
    client: Client,
    query_url: String,
    username: Option<String>,
    password: Option<String>,
    timeout_secs: u64,
}

impl GraphDbClient {
    pub fn new(config: &EndpointConfig) -> QueryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| QueryError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            query_url: config.query_url(),
            username: config.username.clone(),
            password: config.password.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> QueryError {
        if e.is_timeout() {
            QueryError::Timeout(self.timeout_secs)
        } else {
            QueryError::Transport(format!("Failed to send request to {}: {}", self.query_url, e))
        }
    }
}

#[async_trait]
impl SparqlExecutor for GraphDbClient {
    async fn select(&self, query: &str) -> QueryResult<Vec<BindingRow>> {
        let start = Instant::now();
        debug!("SPARQL query to {}:\n{}", self.query_url, query);

        let mut request = self
            .client
            .get(&self.query_url)
            .query(&[("query", query)])
            .header(ACCEPT, SPARQL_RESULTS_JSON);
        if let Some(user) = &self.username {
            request = request.basic_auth(user, self.password.as_ref());
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(QueryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows = parse_results(&body)?;
        debug!(
            "SPARQL query returned {} rows in {}ms",
            rows.len(),
            start.elapsed().as_millis()
        );
        Ok(rows)
    }
}
