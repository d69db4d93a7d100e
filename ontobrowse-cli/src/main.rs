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

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ontobrowse_core::{label_or_fallback, parse_select, BrowserConfig};
use ontobrowse_query::{GraphDbClient, LabelResolver, UriClassifier};
use std::io::{BufRead, Read};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, env = "ONTOBROWSE_CONFIG")]
    config: Option<PathBuf>,

    /// GraphDB base URL (overrides config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Repository id (overrides config file)
    #[arg(long)]
    repository: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print whether each URI is a system or domain resource
    Classify {
        #[arg(required = true)]
        uris: Vec<String>,
    },
    /// Resolve display labels; reads URIs from stdin when none are given
    Labels { uris: Vec<String> },
    /// Filter system rows out of a SPARQL-JSON result document (stdin if no file)
    Filter { file: Option<PathBuf> },
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ontobrowse=info,ontobrowse_query=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // logs go to stderr so stdout stays machine-readable
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_uris_from_stdin() -> Result<Vec<String>> {
    let mut uris = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read URIs from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            uris.push(line.to_string());
        }
    }
    Ok(uris)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    // Load configuration
    let mut config = BrowserConfig::load(args.config)?;

    // Apply CLI overrides
    if let Some(endpoint) = args.endpoint {
        config.endpoint.base_url = endpoint;
    }
    if let Some(repository) = args.repository {
        config.endpoint.repository = repository;
    }
    config.validate()?;

    let classifier = UriClassifier::new(Arc::new(config.vocabulary.clone()))
        .with_filter_threshold(config.resolver.filter_threshold);

    match args.command {
        Command::Classify { uris } => {
            for uri in uris {
                let kind = if classifier.is_system_resource(&uri) {
                    "system"
                } else {
                    "domain"
                };
                println!("{}\t{}", kind, uri);
            }
        }
        Command::Labels { uris } => {
            let uris = if uris.is_empty() {
                read_uris_from_stdin()?
            } else {
                uris
            };

            let client = Arc::new(GraphDbClient::new(&config.endpoint)?);
            tracing::info!("Resolving {} URIs against {}", uris.len(), client.query_url());
            let resolver = LabelResolver::from_config(client, &config);
            let resolution = resolver.resolve(&uris).await;

            for failure in &resolution.failures {
                tracing::warn!(
                    "Batch {} fell back to URI segments: {}",
                    failure.batch_index,
                    failure.error
                );
            }

            // system URIs are absent from the map, show them by segment too
            let output: serde_json::Map<String, serde_json::Value> = uris
                .iter()
                .map(|uri| {
                    let label = label_or_fallback(&resolution.labels, uri);
                    (uri.clone(), serde_json::Value::String(label.to_string()))
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Filter { file } => {
            let body = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {:?}", path))?,
                None => {
                    let mut body = String::new();
                    std::io::stdin().read_to_string(&mut body)?;
                    body
                }
            };

            let results = parse_select(&body)?;
            let total = results.rows.len();
            let kept = classifier.filter_system_resources(results.rows);
            eprintln!("kept {} of {} rows", kept.len(), total);

            let document = ontobrowse_core::results::to_wire(&results.vars, &kept);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}
