//! Reverse-charge ledger migration.
//!
//! Creates the append-only table of reverse-charge entries written when a
//! purchase document is approved.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(LEDGER_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS reverse_charge_ledger_entries CASCADE;")
            .await?;
        Ok(())
    }
}

const LEDGER_SQL: &str = r"
CREATE TABLE reverse_charge_ledger_entries (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    legal_entity_id UUID,
    source_document_id UUID NOT NULL,
    source_line_id UUID NOT NULL,
    input_field_code VARCHAR(16) NOT NULL,
    output_field_code VARCHAR(16) NOT NULL,
    base_amount NUMERIC(19, 4) NOT NULL,
    tax_amount NUMERIC(19, 4) NOT NULL,
    tax_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Lookup of all entries written for one document
CREATE INDEX idx_rc_ledger_document ON reverse_charge_ledger_entries(source_document_id);

-- Period listing per tenant
CREATE INDEX idx_rc_ledger_tenant_date ON reverse_charge_ledger_entries(tenant_id, tax_date);
";
