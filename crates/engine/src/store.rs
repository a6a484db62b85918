//! The persistence collaborator.
//!
//! [`InvoiceStore`] is the seam the mutation pipeline writes through. Each
//! call is one statement; atomicity beyond that is up to the backend.
//! [`SeaOrmInvoiceStore`] is the database-backed implementation.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, QueryFilter, QueryOrder, sea_query::Expr, prelude::*};
use uuid::Uuid;

use crate::{
    Invoice, StoreError,
    invoices::{self, InvoiceChanges, NewInvoice},
};

pub type ResultStore<T> = Result<T, StoreError>;

#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// INSERT a row; returns the id assigned to it.
    async fn insert(&self, invoice: NewInvoice) -> ResultStore<String>;

    /// UPDATE the mutable columns of the row matching `id`.
    async fn update(&self, id: &str, changes: InvoiceChanges) -> ResultStore<()>;

    /// DELETE the row matching `id`.
    async fn delete(&self, id: &str) -> ResultStore<()>;

    /// Every invoice, newest first.
    async fn list(&self) -> ResultStore<Vec<Invoice>>;
}

#[derive(Clone, Debug)]
pub struct SeaOrmInvoiceStore {
    database: DatabaseConnection,
}

impl SeaOrmInvoiceStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl InvoiceStore for SeaOrmInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> ResultStore<String> {
        let id = Uuid::new_v4().to_string();
        invoices::Entity::insert(invoice.into_active_model(id.clone()))
            .exec_without_returning(&self.database)
            .await?;
        Ok(id)
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> ResultStore<()> {
        // Matching no row is not an error: same as a bare UPDATE ... WHERE id = ?.
        invoices::Entity::update_many()
            .col_expr(invoices::Column::CustomerId, Expr::value(changes.customer_id))
            .col_expr(invoices::Column::Amount, Expr::value(changes.amount.cents()))
            .col_expr(
                invoices::Column::Status,
                Expr::value(changes.status.as_str()),
            )
            .filter(invoices::Column::Id.eq(id))
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> ResultStore<()> {
        invoices::Entity::delete_many()
            .filter(invoices::Column::Id.eq(id))
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn list(&self) -> ResultStore<Vec<Invoice>> {
        invoices::Entity::find()
            .order_by_desc(invoices::Column::Date)
            .order_by_asc(invoices::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Invoice::try_from)
            .collect()
    }
}
