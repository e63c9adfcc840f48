//! Production generator: the fallback chain followed by the filter pipeline.

use async_trait::async_trait;

use crate::config::Config;
use crate::router::Generator;

use super::chain::{ChainExhausted, run_chain};
use super::filter::run_filters;
use super::invoke::ProcessRunner;
use super::spec::BackendDescriptor;

/// Wires the chain and the pipeline to the real process runner.
pub struct Engine {
    models: Vec<BackendDescriptor>,
    filters: Vec<BackendDescriptor>,
    report_unavailable_models: bool,
    report_unavailable_filters: bool,
}

impl Engine {
    pub fn new(
        models: Vec<BackendDescriptor>,
        filters: Vec<BackendDescriptor>,
        config: &Config,
    ) -> Self {
        Self {
            models,
            filters,
            report_unavailable_models: config.report_unavailable_models,
            report_unavailable_filters: config.report_unavailable_filters,
        }
    }
}

#[async_trait]
impl Generator for Engine {
    async fn generate(&self, prompt: &str) -> Result<String, ChainExhausted> {
        let raw = run_chain(
            &self.models,
            prompt,
            self.report_unavailable_models,
            &ProcessRunner,
        )
        .await?;

        Ok(run_filters(
            &self.filters,
            raw,
            self.report_unavailable_filters,
            &ProcessRunner,
        )
        .await)
    }
}
