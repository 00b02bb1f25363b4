use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pipeline::ComponentPipeline;

/// One document to process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchInput {
    /// Caller's identifier, echoed in the result.
    pub id: String,
    /// Processed content with `<component>` placeholders.
    pub processed: String,
    /// Raw content with `<pcc-component>` tags, if available.
    #[serde(default)]
    pub raw: Option<String>,
}

/// Options for [`ComponentPipeline::process_batch`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchOptions {
    /// Run the content enhancer before merging.
    pub enhance: bool,
    /// Size of a dedicated thread pool; the global pool is used when unset.
    pub max_threads: Option<u32>,
}

/// Result for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Identifier from the input.
    pub id: String,
    /// Final HTML.
    pub content: String,
    /// Number of component records found in the raw content.
    pub component_count: u32,
}

/// Aggregate statistics for a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Number of documents.
    pub total: u32,
    /// Documents that contained at least one component.
    pub with_components: u32,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Results in input order plus statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    /// Per-document results.
    pub results: Vec<BatchResult>,
    /// Aggregate statistics.
    pub stats: BatchStats,
}

impl ComponentPipeline<'_> {
    /// Processes many documents in parallel on the rayon thread pool.
    pub fn process_batch(&self, inputs: Vec<BatchInput>, options: &BatchOptions) -> BatchOutput {
        let start = Instant::now();
        let total = inputs.len() as u32;
        let with_components = AtomicU32::new(0);

        let pool = options.max_threads.and_then(|threads| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads as usize)
                .build()
                .map_err(|err| log::warn!("Falling back to the global thread pool: {}", err))
                .ok()
        });

        let process_input = |input: BatchInput| -> BatchResult {
            let records = input
                .raw
                .as_deref()
                .map(|raw| self.extract_components(raw))
                .unwrap_or_default();
            if !records.is_empty() {
                with_components.fetch_add(1, Ordering::Relaxed);
            }

            let processed = if options.enhance {
                cpub_core::enhance(&input.processed)
            } else {
                input.processed
            };
            let content = if records.is_empty() {
                processed
            } else {
                self.merge_placeholders(&processed, &records)
            };

            BatchResult {
                id: input.id,
                content,
                component_count: records.len() as u32,
            }
        };

        let results: Vec<BatchResult> = match pool {
            Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
            None => inputs.into_par_iter().map(process_input).collect(),
        };

        BatchOutput {
            results,
            stats: BatchStats {
                total,
                with_components: with_components.load(Ordering::Relaxed),
                processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            },
        }
    }
}
