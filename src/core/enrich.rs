use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::core::api::{Query, ResourceClient, segment};
use crate::core::error::AzaError;

/// Default number of detail fetches kept in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Fetches the full record for one identifier.
#[async_trait]
pub trait DetailFetcher: Send + Sync {
    async fn fetch_detail(&self, id: &str) -> Result<Value, AzaError>;
}

/// Detail lookup at `<prefix>/<id>` through a [`ResourceClient`].
pub struct PathDetailFetcher {
    client: Arc<dyn ResourceClient>,
    prefix: String,
}

impl PathDetailFetcher {
    pub fn new(client: Arc<dyn ResourceClient>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl DetailFetcher for PathDetailFetcher {
    async fn fetch_detail(&self, id: &str) -> Result<Value, AzaError> {
        let path = format!("{}/{}", self.prefix.trim_end_matches('/'), segment(id));
        self.client.fetch(&path, &Query::new()).await
    }
}

/// Overlay `detail` onto `summary`; detail wins on key collisions.
///
/// Returns `None` when either side is not an object, meaning "no enrichment".
pub fn merge(summary: &Value, detail: &Value) -> Option<Value> {
    let (Value::Object(base), Value::Object(extra)) = (summary, detail) else {
        return None;
    };
    let mut merged = base.clone();
    for (key, value) in extra {
        merged.insert(key.clone(), value.clone());
    }
    Some(Value::Object(merged))
}

fn record_id(record: &Value) -> Option<&str> {
    record
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// Bounded fan-out of detail fetches over a batch of summaries.
#[derive(Debug, Clone, Copy)]
pub struct Enricher {
    concurrency: usize,
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl Enricher {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Merge each summary with its detail, keeping input length and order.
    ///
    /// Workers claim indices from a shared counter and write into a slot per
    /// input position, so completion order never affects the output. A failed
    /// fetch leaves that one record as its bare summary.
    pub async fn enrich(
        &self,
        summaries: Vec<Value>,
        fetcher: Arc<dyn DetailFetcher>,
    ) -> Vec<Value> {
        let total = summaries.len();
        if total == 0 {
            return Vec::new();
        }
        let workers = self.concurrency.min(total);
        debug!("Enriching {} records with {} workers", total, workers);

        let summaries = Arc::new(summaries);
        let next = Arc::new(AtomicUsize::new(0));
        let slots: Arc<Mutex<Vec<Option<Value>>>> = Arc::new(Mutex::new(vec![None; total]));

        let mut tasks = JoinSet::new();
        for worker in 0..workers {
            let summaries = Arc::clone(&summaries);
            let next = Arc::clone(&next);
            let slots = Arc::clone(&slots);
            let fetcher = Arc::clone(&fetcher);
            tasks.spawn(async move {
                loop {
                    let index = next.fetch_add(1, Ordering::SeqCst);
                    if index >= total {
                        break;
                    }
                    let summary = &summaries[index];
                    let Some(id) = record_id(summary) else {
                        continue;
                    };
                    match fetcher.fetch_detail(id).await {
                        Ok(detail) => match merge(summary, &detail) {
                            Some(merged) => slots.lock().await[index] = Some(merged),
                            None => debug!("Detail for {} is not an object, skipped", id),
                        },
                        Err(e) => warn!("Could not fetch detail for {} (worker {}): {}", id, worker, e),
                    }
                }
            });
        }
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!("Enrichment worker stopped early: {}", e);
            }
        }

        let slots = std::mem::take(&mut *slots.lock().await);
        slots
            .into_iter()
            .zip(summaries.iter())
            .map(|(slot, summary)| slot.unwrap_or_else(|| summary.clone()))
            .collect()
    }
}
