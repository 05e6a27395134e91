//! Record store seam.
//!
//! The aggregation never talks to storage itself. Collaborators implement
//! `TaxLineSource`; the service fetches through it and aggregates the fully
//! materialized result.

use std::future::Future;

use declara_shared::DeclarationSettings;

use super::error::DeclarationError;
use super::intake::{AdjustmentDocument, PurchaseLine, SalesLine};
use super::types::DeclarationRequest;

/// Supplies the raw records of one (tenant, period, legal entity) key.
pub trait TaxLineSource: Send + Sync {
    /// Posted sales lines whose tax-relevant date falls in the period.
    fn sales_lines(
        &self,
        request: &DeclarationRequest,
    ) -> impl Future<Output = Result<Vec<SalesLine>, DeclarationError>> + Send;

    /// Approved purchase lines whose tax-relevant date falls in the period.
    fn purchase_lines(
        &self,
        request: &DeclarationRequest,
    ) -> impl Future<Output = Result<Vec<PurchaseLine>, DeclarationError>> + Send;

    /// Approved adjustment documents whose tax-relevant date falls in the period.
    fn adjustment_documents(
        &self,
        request: &DeclarationRequest,
    ) -> impl Future<Output = Result<Vec<AdjustmentDocument>, DeclarationError>> + Send;
}

/// Fetches records for `ids` in chunks of at most `fetch_batch_size`
/// identifiers, as configured in `settings`.
///
/// Chunks are fetched one after another and concatenated in order; the first
/// failing chunk aborts the whole fetch.
pub async fn fetch_in_batches<Id, T, F, Fut>(
    ids: &[Id],
    settings: &DeclarationSettings,
    mut fetch: F,
) -> Result<Vec<T>, DeclarationError>
where
    Id: Clone,
    F: FnMut(Vec<Id>) -> Fut,
    Fut: Future<Output = Result<Vec<T>, DeclarationError>>,
{
    let mut records = Vec::with_capacity(ids.len());
    for (index, chunk) in ids.chunks(settings.fetch_batch_size.max(1)).enumerate() {
        tracing::debug!(batch = index, size = chunk.len(), "fetching record batch");
        records.extend(fetch(chunk.to_vec()).await?);
    }
    Ok(records)
}
