//! Query gateway service: HTTP adapter over the action dispatcher.
//!
//! Every dispatched request answers HTTP 200 with a response envelope;
//! errors travel inside the envelope, never as HTTP status codes.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, DefaultBodyLimit, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::domain::config::GatewayConfig;
use crate::domain::envelope::ResponseEnvelope;
use crate::domain::error::{ApiError, GatewayError};
use crate::domain::methods::{
    get_method_info, get_methods_by_category, is_method_supported, MethodCategory,
    METHOD_REGISTRY,
};
use crate::domain::requests::ParamRecord;
use crate::middleware::{create_cors_layer, GatewayMetrics};
use crate::ports::{LedgerReader, PeerStatus, TransactionRelay};
use crate::router::{AppState, Dispatcher};
use crate::rpc::RpcHandlers;

/// Query gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<GatewayMetrics>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<()>>,
}

impl ApiGatewayService {
    /// Create a new service over the given ledger, relay, and peer view
    pub fn new(
        config: GatewayConfig,
        ledger: Arc<dyn LedgerReader>,
        relay: Arc<dyn TransactionRelay>,
        peers: Arc<dyn PeerStatus>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;

        let metrics = Arc::new(GatewayMetrics::new());
        let handlers = RpcHandlers::new(&config, ledger, relay, peers);
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::new(handlers),
            config.forum.clone(),
            Arc::clone(&metrics),
        ));

        Ok(Self {
            config,
            dispatcher,
            metrics,
            shutdown_tx: None,
            server: None,
        })
    }

    /// Bind the HTTP listener and serve in the background.
    ///
    /// Returns the bound address, which differs from the configured one
    /// when port 0 was requested.
    pub async fn start(&mut self) -> Result<SocketAddr, GatewayError> {
        if !self.config.http.enabled {
            return Err(GatewayError::Bind("http server disabled".to_string()));
        }
        if self.server.is_some() {
            return Err(GatewayError::Bind("already started".to_string()));
        }

        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = self.router();
        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
            }
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.server = Some(handle);
        info!(
            addr = %local_addr,
            network = %self.config.chain.network_name,
            "Query gateway listening"
        );
        Ok(local_addr)
    }

    /// Trigger graceful shutdown and wait for in-flight requests
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "HTTP server task ended abnormally");
            }
            info!("Query gateway stopped");
        }
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Build the HTTP router with its middleware stack
    pub fn router(&self) -> Router {
        let state = AppState {
            dispatcher: Arc::clone(&self.dispatcher),
            metrics: Arc::clone(&self.metrics),
            chain: self.config.chain.clone(),
        };

        let middleware = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(create_cors_layer(&self.config.cors))
            .layer(TimeoutLayer::new(self.config.timeouts.request))
            .layer(DefaultBodyLimit::max(self.config.limits.max_request_size));

        Router::new()
            .route("/api/v1", get(list_actions))
            .route("/api/v1/:action", get(handle_get).post(handle_post))
            .route("/health", get(health_check))
            .route("/metrics", get(metrics_handler))
            .layer(middleware)
            .with_state(state)
    }
}

/// GET: the query string is the parameter record
async fn handle_get(
    State(state): State<AppState>,
    Path(action): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<ResponseEnvelope> {
    let params = query
        .map_err(|e| ApiError::invalid_params(format!("malformed query string: {}", e)))
        .and_then(|Query(pairs)| ParamRecord::from_query_pairs(pairs));
    Json(dispatch_or_reject(state, action, params).await)
}

/// POST: the JSON body is the parameter record; an empty body means no params
async fn handle_post(
    State(state): State<AppState>,
    Path(action): Path<String>,
    body: String,
) -> Json<ResponseEnvelope> {
    let params = if body.trim().is_empty() {
        Ok(ParamRecord::new())
    } else {
        serde_json::from_str(&body)
            .map_err(|e| ApiError::invalid_params(format!("malformed JSON body: {}", e)))
            .and_then(ParamRecord::from_json)
    };
    Json(dispatch_or_reject(state, action, params).await)
}

/// An unknown action wins over a parameter record that failed to parse.
async fn dispatch_or_reject(
    state: AppState,
    action: String,
    params: Result<ParamRecord, ApiError>,
) -> ResponseEnvelope {
    match params {
        Ok(params) => run_dispatch(state, action, params).await,
        Err(_) if !is_method_supported(&action) => {
            run_dispatch(state, action, ParamRecord::new()).await
        }
        Err(err) => {
            let is_write = get_method_info(&action).is_some_and(|m| m.is_write);
            state.metrics.record_request(false, is_write, 0);
            ResponseEnvelope::failure(action.to_lowercase(), &err)
        }
    }
}

/// Ledger reads are synchronous, so dispatch runs on the blocking pool.
async fn run_dispatch(state: AppState, action: String, params: ParamRecord) -> ResponseEnvelope {
    let dispatcher = Arc::clone(&state.dispatcher);
    let name = action.to_lowercase();
    match tokio::task::spawn_blocking(move || dispatcher.dispatch(&action, &params)).await {
        Ok(envelope) => envelope,
        Err(e) => {
            error!(action = %name, error = %e, "dispatch task failed");
            ResponseEnvelope::failure(name, &ApiError::internal("dispatch task failed"))
        }
    }
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.to_json())
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "network": state.chain.network_name,
        "version": state.chain.node_version,
        "actions": METHOD_REGISTRY.len(),
    }))
}

/// Action index, grouped by category
async fn list_actions() -> impl IntoResponse {
    let groups: serde_json::Map<String, serde_json::Value> = MethodCategory::ALL
        .iter()
        .map(|category| {
            let actions: Vec<_> = get_methods_by_category(*category)
                .into_iter()
                .filter_map(get_method_info)
                .map(|info| {
                    serde_json::json!({
                        "Action": info.name,
                        "Params": info.params,
                        "Description": info.description,
                    })
                })
                .collect();
            (category.as_str().to_string(), serde_json::Value::from(actions))
        })
        .collect();
    Json(serde_json::Value::Object(groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryLedger, RecordingRelay, StaticPeers};

    fn service(config: GatewayConfig) -> Result<ApiGatewayService, GatewayError> {
        ApiGatewayService::new(
            config,
            Arc::new(InMemoryLedger::new()),
            Arc::new(RecordingRelay::accepting()),
            Arc::new(StaticPeers::new(0)),
        )
    }

    #[test]
    fn test_config_validation() {
        let mut config = GatewayConfig::default();
        config.limits.max_request_size = 0;
        assert!(matches!(service(config), Err(GatewayError::Config(_))));
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let mut config = GatewayConfig::default();
        config.http.host = std::net::Ipv4Addr::LOCALHOST.into();
        config.http.port = 0;
        let mut svc = service(config).unwrap();
        let addr = svc.start().await.unwrap();
        assert_ne!(addr.port(), 0);
        assert!(svc.start().await.is_err());
        svc.stop().await;
    }

    #[tokio::test]
    async fn test_disabled_http_refuses_to_start() {
        let mut config = GatewayConfig::default();
        config.http.enabled = false;
        let mut svc = service(config).unwrap();
        assert!(matches!(svc.start().await, Err(GatewayError::Bind(_))));
    }
}
