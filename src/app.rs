// src/app.rs

use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::jwt::JwtManager;
use crate::auth::services::IdentityService;
use crate::db::store::Store;
use crate::handlers::{activity, auth, health::health, items, messages, requests, users};
use crate::services::activity::ActivityService;
use crate::services::catalog::CatalogService;
use crate::services::conversations::ConversationService;
use crate::services::lending::LendingService;

/// Services partagés par tous les handlers, construits autour d'un seul `Store`.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub catalog: Arc<CatalogService>,
    pub lending: Arc<LendingService>,
    pub conversations: Arc<ConversationService>,
    pub activity: Arc<ActivityService>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_manager: JwtManager) -> Self {
        Self {
            identity: Arc::new(IdentityService::new(store.clone(), jwt_manager)),
            catalog: Arc::new(CatalogService::new(store.clone())),
            lending: Arc::new(LendingService::new(store.clone())),
            conversations: Arc::new(ConversationService::new(store.clone())),
            activity: Arc::new(ActivityService::new(store)),
        }
    }
}

impl FromRef<AppState> for Arc<IdentityService> {
    fn from_ref(state: &AppState) -> Self {
        state.identity.clone()
    }
}

impl FromRef<AppState> for Arc<CatalogService> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for Arc<LendingService> {
    fn from_ref(state: &AppState) -> Self {
        state.lending.clone()
    }
}

impl FromRef<AppState> for Arc<ConversationService> {
    fn from_ref(state: &AppState) -> Self {
        state.conversations.clone()
    }
}

impl FromRef<AppState> for Arc<ActivityService> {
    fn from_ref(state: &AppState) -> Self {
        state.activity.clone()
    }
}

/// Configure les routes d'authentification (publiques)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/my-listings", get(items::my_listings))
        .route(
            "/items/{id}",
            put(items::update_item).delete(items::delete_item),
        )
}

fn request_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/requests",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/requests/{id}", put(requests::update_request_status))
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(messages::send_message))
        .route("/messages/conversations", get(messages::list_conversations))
        .route("/messages/{email}", get(messages::get_thread))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/search", get(users::search_users))
        .route("/users/{id}", get(users::get_user).put(users::update_user))
}

fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(activity::stats))
        .route("/login-logs", get(activity::my_login_logs))
        .route("/login-logs/all", get(activity::all_login_logs))
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            tracing::warn!(frontend_url, error = %e, "Invalid FRONTEND_URL, CORS disabled");
            cors
        }
    }
}

/// Construit l'application complète
pub fn build_router(state: AppState, frontend_url: &str) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(item_routes())
        .merge(request_routes())
        .merge(message_routes())
        .merge(user_routes())
        .merge(activity_routes());

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors_layer(frontend_url))
        // Middleware global de tracing
        .layer(TraceLayer::new_for_http())
}
