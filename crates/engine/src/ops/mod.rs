use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{Clock, EngineError, InvoiceStore, ResultEngine, SeaOrmInvoiceStore, ViewCache, ZonedClock};

mod invoices;

/// View path of the invoice listing: invalidated after every successful
/// mutation and the target of create/update navigation.
pub const INVOICES_VIEW: &str = "/dashboard/invoices";

pub struct Engine {
    store: Arc<dyn InvoiceStore>,
    cache: Arc<dyn ViewCache>,
    clock: Arc<dyn Clock>,
    listing_view: String,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("listing_view", &self.listing_view)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn listing_view(&self) -> &str {
        &self.listing_view
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn InvoiceStore>>,
    cache: Option<Arc<dyn ViewCache>>,
    clock: Option<Arc<dyn Clock>>,
    listing_view: Option<String>,
}

impl EngineBuilder {
    /// Pass the required database; invoices are stored through sea-orm.
    pub fn database(self, db: DatabaseConnection) -> EngineBuilder {
        self.store(Arc::new(SeaOrmInvoiceStore::new(db)))
    }

    /// Pass any persistence collaborator.
    pub fn store(mut self, store: Arc<dyn InvoiceStore>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Pass the required view cache.
    pub fn cache(mut self, cache: Arc<dyn ViewCache>) -> EngineBuilder {
        self.cache = Some(cache);
        self
    }

    /// Override the clock (defaults to UTC wall time).
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> EngineBuilder {
        self.clock = Some(clock);
        self
    }

    /// Override the listing view path (defaults to [`INVOICES_VIEW`]).
    pub fn listing_view(mut self, path: impl Into<String>) -> EngineBuilder {
        self.listing_view = Some(path.into());
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            store: self.store.ok_or(EngineError::MissingCollaborator("store"))?,
            cache: self
                .cache
                .ok_or(EngineError::MissingCollaborator("view cache"))?,
            clock: self.clock.unwrap_or_else(|| Arc::new(ZonedClock::utc())),
            listing_view: self
                .listing_view
                .unwrap_or_else(|| INVOICES_VIEW.to_string()),
        })
    }
}
