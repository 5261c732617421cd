use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::database::AccountStore;
use crate::handlers::{protected::accounts, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::AccountService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub store: Arc<dyn AccountStore>,
    pub jwt_secret: Arc<str>,
    pub request_logging: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn AccountStore>, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            accounts: AccountService::new(store.clone()),
            store,
            jwt_secret: jwt_secret.into(),
            request_logging: true,
        }
    }

    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.request_logging = enabled;
        self
    }
}

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected API
        .merge(account_routes(state.clone()));

    let router = if state.request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn account_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/api/accounts/:id",
            put(accounts::update).delete(accounts::delete),
        )
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}
