use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post, put},
    serve, Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use stockroom_types::ports::Store;

use crate::application::dashboard_service::DashboardService;
use crate::application::order_service::OrderService;
use crate::application::product_service::ProductService;
use crate::application::supplier_service::SupplierService;
use crate::application::user_service::UserService;
use crate::auth::TokenSigner;

use super::middleware::{authenticate, AuthState};
use super::uploads::ImageStore;
use super::{dashboard, orders, products, suppliers, users};

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
    pub upload_dir: PathBuf,
    /// Base for public image URLs; derived from the port when unset.
    pub public_url: Option<String>,
}

pub struct AppState<S: Store> {
    pub orders: Arc<OrderService<S>>,
    pub products: Arc<ProductService<S>>,
    pub suppliers: Arc<SupplierService<S>>,
    pub users: Arc<UserService<S>>,
    pub dashboard: Arc<DashboardService<S>>,
    pub signer: Arc<TokenSigner>,
    pub images: Arc<ImageStore>,
}

impl<S: Store> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            orders: self.orders.clone(),
            products: self.products.clone(),
            suppliers: self.suppliers.clone(),
            users: self.users.clone(),
            dashboard: self.dashboard.clone(),
            signer: self.signer.clone(),
            images: self.images.clone(),
        }
    }
}

pub struct HttpServer<S: Store> {
    state: AppState<S>,
    config: HttpServerConfig,
}

impl<S: Store> HttpServer<S> {
    pub async fn new(
        store: S,
        signer: TokenSigner,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        let public_base = config
            .public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", config.port));
        let signer = Arc::new(signer);
        let state = AppState {
            orders: Arc::new(OrderService::new(store.clone())),
            products: Arc::new(ProductService::new(store.clone())),
            suppliers: Arc::new(SupplierService::new(store.clone())),
            users: Arc::new(UserService::new(store.clone(), signer.clone())),
            dashboard: Arc::new(DashboardService::new(store)),
            signer,
            images: Arc::new(ImageStore::new(config.upload_dir.clone(), public_base)),
        };
        Ok(Self { state, config })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let auth = AuthState {
            signer: self.state.signer.clone(),
        };

        // Everything except login, health, and the static images sits behind
        // the bearer-token gate.
        let protected = Router::new()
            .route("/users/logout", post(users::logout))
            .merge(users::admin_routes::<S>())
            .route(
                "/products",
                get(products::list_products::<S>).post(products::create_product::<S>),
            )
            .route(
                "/products/{id}",
                put(products::update_product::<S>).delete(products::delete_product::<S>),
            )
            .route(
                "/suppliers",
                get(suppliers::list_suppliers::<S>).post(suppliers::create_supplier::<S>),
            )
            .route(
                "/suppliers/{id}",
                put(suppliers::update_supplier::<S>).delete(suppliers::delete_supplier::<S>),
            )
            .route(
                "/orders",
                get(orders::list_orders::<S>).post(orders::place_order::<S>),
            )
            .route(
                "/orders/{id}",
                put(orders::correct_order::<S>).delete(orders::delete_order::<S>),
            )
            .route("/dashboard", get(dashboard::summary::<S>))
            .route_layer(axum::middleware::from_fn_with_state(auth, authenticate));

        Router::new()
            .route("/health", get(health))
            .route("/users/login", post(users::login::<S>))
            .nest_service("/uploads", ServeDir::new(&self.config.upload_dir))
            .merge(protected)
            .layer(CorsLayer::permissive())
            .layer(trace_layer)
            .with_state(self.state.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        let app = self.router();
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}
