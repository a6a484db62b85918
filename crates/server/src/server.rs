use axum::{Router, routing::{get, post}};

use std::sync::Arc;

use api_types::invoice::InvoiceListResponse;
use engine::{Engine, EngineBuilder, ResultEngine, SignIn};

use crate::{invoices, user, views::ViewCacheStore};

#[derive(Clone)]
pub struct ServerState {
    pub(crate) engine: Arc<Engine>,
    pub(crate) signer: Arc<dyn SignIn>,
    pub(crate) views: Arc<ViewCacheStore<InvoiceListResponse>>,
}

impl ServerState {
    /// Build the engine with the view cache the listing route reads from, so
    /// every mutation invalidates what the handlers serve. A cache already set
    /// on `engine` is replaced.
    pub async fn new(engine: EngineBuilder, signer: Arc<dyn SignIn>) -> ResultEngine<Self> {
        let views: Arc<ViewCacheStore<InvoiceListResponse>> = Arc::new(ViewCacheStore::default());
        let engine = engine.cache(views.clone()).build().await?;

        Ok(Self {
            engine: Arc::new(engine),
            signer,
            views,
        })
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/dashboard/invoices", get(invoices::list))
        .route("/dashboard/invoices/create", post(invoices::create))
        .route("/dashboard/invoices/{id}/edit", post(invoices::update))
        .route("/dashboard/invoices/{id}/delete", post(invoices::delete))
        .route("/login", post(user::login))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
