//! Reverse-charge ledger repository.
//!
//! Entries are written once per approved purchase document, in a single
//! transaction, and never updated.

use chrono::Utc;
use declara_core::declaration::{ReverseChargeMap, TaxPeriod};
use declara_core::ledger::{ApprovedPurchaseDocument, ReverseChargeLedger, ReverseChargeLedgerEntry};
use declara_shared::AppError;
use declara_shared::types::{
    LedgerEntryId, LegalEntityId, SourceDocumentId, SourceLineId, TenantId,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Select, Set,
    TransactionTrait,
};
use tracing::{error, info};

use crate::entities::reverse_charge_ledger_entries;

/// Error types for ledger writes.
#[derive(Debug, thiserror::Error)]
pub enum LedgerWriteError {
    /// Database error; nothing was written.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LedgerWriteError> for AppError {
    fn from(err: LedgerWriteError) -> Self {
        match err {
            LedgerWriteError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Reverse-charge ledger repository.
#[derive(Debug, Clone)]
pub struct ReverseChargeLedgerRepository {
    db: DatabaseConnection,
}

impl ReverseChargeLedgerRepository {
    /// Creates a new reverse-charge ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records the reverse-charge lines of an approved purchase document.
    ///
    /// Documents without qualifying lines touch nothing. Otherwise all entries
    /// are inserted in one batch and committed together.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert or the commit fails. No entries are
    /// persisted in that case.
    pub async fn record_document(
        &self,
        document: &ApprovedPurchaseDocument,
        map: &ReverseChargeMap,
    ) -> Result<Vec<ReverseChargeLedgerEntry>, LedgerWriteError> {
        let entries = ReverseChargeLedger::entries_for(document, map);
        if entries.is_empty() {
            return Ok(entries);
        }

        let now: DateTimeWithTimeZone = Utc::now().into();
        let models = entries.iter().map(|entry| reverse_charge_ledger_entries::ActiveModel {
            id: Set(entry.id.into_inner()),
            tenant_id: Set(entry.tenant_id.into_inner()),
            legal_entity_id: Set(entry.legal_entity_id.map(LegalEntityId::into_inner)),
            source_document_id: Set(entry.source_document_id.into_inner()),
            source_line_id: Set(entry.source_line_id.into_inner()),
            input_field_code: Set(entry.input_field_code.clone()),
            output_field_code: Set(entry.output_field_code.clone()),
            base_amount: Set(entry.base_amount),
            tax_amount: Set(entry.tax_amount),
            tax_date: Set(entry.tax_date),
            created_at: Set(now),
        });

        let txn = self.db.begin().await?;
        reverse_charge_ledger_entries::Entity::insert_many(models)
            .exec_without_returning(&txn)
            .await
            .inspect_err(|e| {
                error!(document_id = %document.document_id, "Failed to write reverse-charge entries: {e}");
            })?;
        txn.commit().await?;

        info!(
            tenant_id = %document.tenant_id,
            document_id = %document.document_id,
            entries = entries.len(),
            "Recorded reverse-charge ledger entries"
        );
        Ok(entries)
    }

    /// Lists the entries written for one purchase document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_document(
        &self,
        document_id: SourceDocumentId,
    ) -> Result<Vec<ReverseChargeLedgerEntry>, DbErr> {
        let models = reverse_charge_ledger_entries::Entity::find()
            .filter(reverse_charge_ledger_entries::Column::SourceDocumentId.eq(document_id.into_inner()))
            .order_by_asc(reverse_charge_ledger_entries::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(into_entry).collect())
    }

    /// Lists a tenant's entries whose tax date falls in the period.
    ///
    /// Without a legal entity, entries of every entity are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_period(
        &self,
        tenant_id: TenantId,
        legal_entity_id: Option<LegalEntityId>,
        period: &TaxPeriod,
    ) -> Result<Vec<ReverseChargeLedgerEntry>, DbErr> {
        let models = period_query(tenant_id, legal_entity_id, period)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(into_entry).collect())
    }
}

/// Selects a tenant's entries dated within the period, oldest first.
fn period_query(
    tenant_id: TenantId,
    legal_entity_id: Option<LegalEntityId>,
    period: &TaxPeriod,
) -> Select<reverse_charge_ledger_entries::Entity> {
    let mut query = reverse_charge_ledger_entries::Entity::find()
        .filter(reverse_charge_ledger_entries::Column::TenantId.eq(tenant_id.into_inner()))
        .filter(reverse_charge_ledger_entries::Column::TaxDate.gte(period.start()))
        .filter(reverse_charge_ledger_entries::Column::TaxDate.lte(period.end()));

    if let Some(entity_id) = legal_entity_id {
        query = query
            .filter(reverse_charge_ledger_entries::Column::LegalEntityId.eq(entity_id.into_inner()));
    }

    query
        .order_by_asc(reverse_charge_ledger_entries::Column::TaxDate)
        .order_by_asc(reverse_charge_ledger_entries::Column::Id)
}

fn into_entry(model: reverse_charge_ledger_entries::Model) -> ReverseChargeLedgerEntry {
    ReverseChargeLedgerEntry {
        id: LedgerEntryId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        legal_entity_id: model.legal_entity_id.map(LegalEntityId::from_uuid),
        source_document_id: SourceDocumentId::from_uuid(model.source_document_id),
        source_line_id: SourceLineId::from_uuid(model.source_line_id),
        input_field_code: model.input_field_code,
        output_field_code: model.output_field_code,
        base_amount: model.base_amount,
        tax_amount: model.tax_amount,
        tax_date: model.tax_date,
    }
}
