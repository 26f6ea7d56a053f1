//! Test cases.

use crate::infra::{self, cli};

pub mod example_config;
pub mod sequential_auction;

/// Runs a command and returns the JSON documents it printed.
async fn run(command: cli::Command, config: &infra::Config) -> Vec<serde_json::Value> {
    observe::tracing::initialize_reentrant("seller=debug");
    observe::metrics::setup_registry_reentrant(
        Some(infra::observe::metrics::PREFIX.to_owned()),
        None,
    );
    let mut out = Vec::new();
    crate::run::execute(command, config, &mut out).await.unwrap();
    serde_json::Deserializer::from_slice(&out)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .unwrap()
}
