//! Invoice primitives.
//!
//! An `Invoice` bills one customer for an amount in cents. It is created with
//! today's date, edited in place (customer, amount, status) and deleted by id.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{MoneyCents, StoreError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }

    /// Exact match only: `"Paid"` or `" paid"` are not statuses.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub amount: MoneyCents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Row values for an INSERT; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: MoneyCents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// The mutable columns written by an UPDATE. `date` is not among them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount: MoneyCents,
    pub status: InvoiceStatus,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: String,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl NewInvoice {
    pub(crate) fn into_active_model(self, id: String) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::Set(id),
            customer_id: ActiveValue::Set(self.customer_id),
            amount: ActiveValue::Set(self.amount.cents()),
            status: ActiveValue::Set(self.status.as_str().to_string()),
            date: ActiveValue::Set(self.date),
        }
    }
}

impl TryFrom<Model> for Invoice {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status = InvoiceStatus::parse(&model.status).ok_or_else(|| {
            StoreError::Backend(format!(
                "invoice {} has unknown status {:?}",
                model.id, model.status
            ))
        })?;
        Ok(Self {
            id: model.id,
            customer_id: model.customer_id,
            amount: MoneyCents::new(model.amount),
            status,
            date: model.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_exact() {
        assert_eq!(InvoiceStatus::parse("pending"), Some(InvoiceStatus::Pending));
        assert_eq!(InvoiceStatus::parse("paid"), Some(InvoiceStatus::Paid));
        assert_eq!(InvoiceStatus::parse("Paid"), None);
        assert_eq!(InvoiceStatus::parse(" paid"), None);
        assert_eq!(InvoiceStatus::parse("overdue"), None);
    }

    #[test]
    fn row_with_unknown_status_is_a_store_error() {
        let model = Model {
            id: "42".to_string(),
            customer_id: "c1".to_string(),
            amount: 100,
            status: "void".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        };
        assert!(matches!(
            Invoice::try_from(model),
            Err(StoreError::Backend(_))
        ));
    }
}
