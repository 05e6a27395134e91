//! `SeaORM` Entity for reverse_charge_ledger_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reverse_charge_ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub legal_entity_id: Option<Uuid>,
    pub source_document_id: Uuid,
    pub source_line_id: Uuid,
    pub input_field_code: String,
    pub output_field_code: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub base_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub tax_amount: Decimal,
    pub tax_date: Date,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
