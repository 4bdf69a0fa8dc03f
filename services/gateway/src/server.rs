//! AfriSwap gateway server implementation

use anyhow::Result;
use auth_service::{AuthService, InMemoryAuthService};
use axum::{
    Router,
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::{HeaderValue, header},
    middleware,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use trade_ledger::TradeLedger;
use tracing::{debug, error, info, warn};
use wallet_ledger::WalletLedger;

use crate::{
    advisory::{OfflineAdvisor, RatePredictor, TradeAdvisor, TrendPredictor},
    config::GatewayConfig,
    handlers::{advisory, auth, health, trades, wallet},
    middleware::{
        RateLimitState, create_cors_layer, handle_panic, handle_timeout_error,
        logging_middleware, method_not_allowed_envelope, rate_limit_middleware,
    },
    rate_limiter::RateLimiter,
};

/// How often idle per-client rate limit buckets are dropped
const LIMITER_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub wallets: Arc<WalletLedger>,
    pub trades: Arc<TradeLedger>,
    pub auth: Arc<dyn AuthService>,
    pub advisor: Arc<dyn TradeAdvisor>,
    pub predictor: Arc<dyn RatePredictor>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("wallets", &self.wallets.wallet_count())
            .field("rate_limiter", &self.rate_limiter)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Fresh in-memory stores wired from `config`
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            wallets: Arc::new(WalletLedger::new()),
            trades: Arc::new(TradeLedger::new()),
            auth: Arc::new(InMemoryAuthService::new(&config.auth)),
            advisor: Arc::new(OfflineAdvisor),
            predictor: Arc::new(TrendPredictor),
            rate_limiter: Arc::new(RateLimiter::new(config.rate_limiting.clone())),
        }
    }
}

/// Build the application router with every route and middleware layer
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let rate_limit_state = RateLimitState {
        limiter: Arc::clone(&state.rate_limiter),
    };

    let mut app = Router::new()
        // System
        .route("/", get(health::landing_page))
        .route(&config.monitoring.health_path, get(health::health_check))
        .route("/api-docs", get(health::api_docs))
        // Wallet
        .route("/api/wallet", get(wallet::module_info))
        .route("/api/wallet/:user_id", get(wallet::get_balance))
        .route("/api/wallet/:user_id/deposit", post(wallet::deposit))
        .route("/api/wallet/:user_id/withdraw", post(wallet::withdraw))
        .route(
            "/api/wallet/:user_id/transactions",
            get(wallet::list_transactions),
        )
        // Auth
        .route("/api/auth", get(auth::module_info))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        // Trades
        .route(
            "/api/trades",
            get(trades::list_trades).post(trades::create_trade),
        )
        .route(
            "/api/trades/:id",
            get(trades::get_trade).put(trades::update_trade),
        )
        // Assistant
        .route("/api/ai", get(advisory::module_info))
        .route("/api/ai/assistant", post(advisory::assistant))
        .route("/api/ai/rate-prediction", post(advisory::rate_prediction))
        .fallback(health::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::map_response(method_not_allowed_envelope))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(Duration::from_secs(config.server.timeout_seconds)),
        )
        .layer(middleware::from_fn_with_state(
            rate_limit_state,
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ));

    if config.monitoring.tracing_enabled {
        app = app.layer(TraceLayer::new_for_http());
    }
    if config.server.compression {
        app = app.layer(CompressionLayer::new());
    }
    if let Some(cors) = create_cors_layer(&config.cors) {
        app = app.layer(cors);
    }

    app
}

/// AfriSwap gateway server
pub struct ApiGatewayServer {
    config: GatewayConfig,
    state: AppState,
}

impl ApiGatewayServer {
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            address = %config.server_address(),
            cors = config.cors.enabled,
            rate_limiting = config.rate_limiting.enabled,
            tracing = config.monitoring.tracing_enabled,
            compression = config.server.compression,
            "Initializing AfriSwap gateway"
        );
        if config.auth.jwt_secret == auth_service::AuthConfig::default().jwt_secret {
            warn!("Using the built-in development JWT secret");
        }

        let state = AppState::new(&config);
        Self { config, state }
    }

    /// Bind and serve until Ctrl-C or SIGTERM
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self.config.server_address().parse().map_err(|e| {
            error!(
                "Invalid server address '{}': {}",
                self.config.server_address(),
                e
            );
            anyhow::anyhow!("Invalid server address: {e}")
        })?;

        let limiter = Arc::clone(&self.state.rate_limiter);
        let cleanup = tokio::spawn(async move {
            let mut interval = tokio::time::interval(LIMITER_CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                limiter.retain_recent();
                debug!(stats = ?limiter.stats(), "Rate limiter buckets pruned");
            }
        });

        let app = build_router(self.state, &self.config);
        info!("Application routes and middleware configured");

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            error!("Failed to bind TCP listener to {}: {}", addr, e);
            anyhow::anyhow!("Failed to bind to address {addr}: {e}")
        })?;
        info!("AfriSwap gateway listening on {}", addr);

        let served = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await;

        cleanup.abort();
        if let Err(e) = served {
            error!("Server encountered a fatal error: {}", e);
            return Err(anyhow::anyhow!("Server error: {e}"));
        }

        info!("AfriSwap gateway stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// API route documentation
pub fn print_routes() {
    println!("AfriSwap Gateway Routes:");
    println!("========================");
    println!();
    println!("System:");
    println!("  GET  /                                  - Landing page");
    println!("  GET  /health                            - Health check");
    println!("  GET  /api-docs                          - API overview");
    println!();
    println!("Wallet:");
    println!("  GET  /api/wallet/:userId                - Wallet balance");
    println!("  POST /api/wallet/:userId/deposit        - Deposit funds");
    println!("  POST /api/wallet/:userId/withdraw       - Withdraw funds");
    println!("  GET  /api/wallet/:userId/transactions   - Transaction history");
    println!();
    println!("Authentication:");
    println!("  POST /api/auth/signup                   - Register");
    println!("  POST /api/auth/login                    - Login");
    println!("  POST /api/auth/logout                   - Logout");
    println!("  GET  /api/auth/me                       - Current user");
    println!();
    println!("Trades:");
    println!("  GET  /api/trades                        - List trades");
    println!("  POST /api/trades                        - Create trade");
    println!("  GET  /api/trades/:id                    - Get trade");
    println!("  PUT  /api/trades/:id                    - Update trade");
    println!();
    println!("Assistant:");
    println!("  POST /api/ai/assistant                  - Ask the trade assistant");
    println!("  POST /api/ai/rate-prediction            - Forecast an exchange rate");
    println!();
    println!("All endpoints support:");
    println!("- JSON request/response bodies");
    println!("- Rate limiting");
    println!("- CORS");
    println!("- Compression");
    println!("- Request tracing");
}
