use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::core::api::ResourceClient;
use crate::core::enrich::{Enricher, PathDetailFetcher};
use crate::core::error::AzaError;
use crate::core::paginate::{self, PageRequest, SortOrder};
use crate::core::present::{OutputMode, Presented, Presenter, ResourceKind};

/// Where per-item detail for a listing comes from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DetailSource {
    pub prefix: &'static str,
}

/// Everything a command needs to fetch and present resources.
pub(crate) struct CommandContext {
    client: Arc<dyn ResourceClient>,
    mode: OutputMode,
    page: PageRequest,
    enricher: Enricher,
}

impl CommandContext {
    pub(crate) fn new(
        client: Arc<dyn ResourceClient>,
        mode: OutputMode,
        page: PageRequest,
        enricher: Enricher,
    ) -> Self {
        Self {
            client,
            mode,
            page,
            enricher,
        }
    }

    fn presenter(&self, kind: ResourceKind) -> Presenter {
        Presenter::new(self.mode, kind, self.page.order.unwrap_or(SortOrder::Desc))
    }

    /// List a collection. Raw mode shows the first page exactly as served;
    /// other modes walk every page and optionally enrich each item.
    pub(crate) async fn list(
        &self,
        kind: ResourceKind,
        path: &str,
        detail: Option<DetailSource>,
    ) -> Result<Presented, AzaError> {
        let presenter = self.presenter(kind);
        if presenter.mode() == OutputMode::Raw {
            let payload = paginate::fetch_page(self.client.as_ref(), path, &self.page).await?;
            return Ok(presenter.present_list(payload));
        }

        let plural_key = kind.listing().plural_key;
        let payload =
            paginate::collect_all(self.client.as_ref(), path, Some(plural_key), &self.page)
                .await?;
        if !payload.is_collection() {
            debug!("{} did not return a collection, showing it as one item", path);
            let item = payload.into_items().pop().unwrap_or(Value::Null);
            return Ok(presenter.present_item(item));
        }
        let mut items = payload.into_items();
        debug!("{} returned {} items", path, items.len());

        if let Some(detail) = detail {
            items = self.enrich(items, detail).await;
        }
        Ok(presenter.present_list(Value::Array(items)))
    }

    /// Show one resource, optionally overlaid with its detail record.
    pub(crate) async fn show(
        &self,
        kind: ResourceKind,
        path: &str,
        detail: Option<DetailSource>,
    ) -> Result<Presented, AzaError> {
        let presenter = self.presenter(kind);
        let mut item = self.client.fetch(path, &Default::default()).await?;

        if let Some(detail) = detail.filter(|_| presenter.mode() != OutputMode::Raw) {
            item = self
                .enrich(vec![item], detail)
                .await
                .pop()
                .unwrap_or(Value::Null);
        }
        Ok(presenter.present_item(item))
    }

    async fn enrich(&self, items: Vec<Value>, detail: DetailSource) -> Vec<Value> {
        debug!(
            "Filling {} items from {}/ ({} at a time)",
            items.len(),
            detail.prefix,
            self.enricher.concurrency()
        );
        let fetcher = Arc::new(PathDetailFetcher::new(
            Arc::clone(&self.client),
            detail.prefix,
        ));
        self.enricher.enrich(items, fetcher).await
    }
}
