use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin;
use super::handlers::auth as auth_handlers;
use super::handlers::books;
use super::handlers::cart;
use super::handlers::favorites;
use super::handlers::orders;
use super::handlers::registration;
use super::handlers::reviews;
use super::handlers::users;
use super::handlers::welcome::welcome;
use super::middleware::authenticate as auth_middleware;
use crate::config::Config;
use crate::domain::account::models::SuperadminCredentials;
use crate::domain::account::service::AccountService;
use crate::domain::book::service::BookService;
use crate::domain::cart::service::CartService;
use crate::domain::favorite::service::FavoriteService;
use crate::domain::order::service::OrderService;
use crate::domain::review::service::ReviewService;
use crate::outbound::notifications::KafkaVerificationNotifier;
use crate::outbound::repositories::PostgresAdminRepository;
use crate::outbound::repositories::PostgresBookRepository;
use crate::outbound::repositories::PostgresCartRepository;
use crate::outbound::repositories::PostgresFavoriteRepository;
use crate::outbound::repositories::PostgresOrderRepository;
use crate::outbound::repositories::PostgresReviewRepository;
use crate::outbound::repositories::PostgresUserRepository;

pub type AppAccountService =
    AccountService<PostgresUserRepository, PostgresAdminRepository, KafkaVerificationNotifier>;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AppAccountService>,
    pub book_service: Arc<BookService<PostgresBookRepository>>,
    pub order_service: Arc<OrderService<PostgresOrderRepository>>,
    pub review_service: Arc<ReviewService<PostgresReviewRepository>>,
    pub cart_service: Arc<CartService<PostgresCartRepository>>,
    pub favorite_service: Arc<FavoriteService<PostgresFavoriteRepository>>,
    pub frontend_url: String,
}

impl AppState {
    /// Wire every service to its PostgreSQL repository and the Kafka notifier.
    pub fn new(config: &Config, pool: PgPool) -> Result<Self, anyhow::Error> {
        let authenticator = Arc::new(Authenticator::new(
            config.jwt.secret.as_bytes(),
            chrono::Duration::minutes(config.jwt.expiration_minutes),
            chrono::Duration::hours(config.mail.verification_expiration_hours),
        ));
        let superadmin = config
            .superadmin
            .as_ref()
            .map(|s| SuperadminCredentials::new(s.email.clone(), s.password.clone()));
        if superadmin.is_none() {
            tracing::warn!("No superadmin configured; superadmin login is disabled");
        }

        let notifier = Arc::new(KafkaVerificationNotifier::new(config)?);

        let account_service = AccountService::new(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresAdminRepository::new(pool.clone())),
            notifier,
            authenticator,
            superadmin,
        );

        Ok(Self {
            account_service: Arc::new(account_service),
            book_service: Arc::new(BookService::new(Arc::new(PostgresBookRepository::new(
                pool.clone(),
            )))),
            order_service: Arc::new(OrderService::new(Arc::new(
                PostgresOrderRepository::new(pool.clone()),
            ))),
            review_service: Arc::new(ReviewService::new(Arc::new(
                PostgresReviewRepository::new(pool.clone()),
            ))),
            cart_service: Arc::new(CartService::new(Arc::new(PostgresCartRepository::new(
                pool.clone(),
            )))),
            favorite_service: Arc::new(FavoriteService::new(Arc::new(
                PostgresFavoriteRepository::new(pool),
            ))),
            frontend_url: config.mail.frontend_url.clone(),
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(welcome))
        .route("/api/auth/login", post(auth_handlers::login))
        .route("/api/auth/logout", post(auth_handlers::logout))
        .route("/api/register", post(registration::register))
        .route("/api/verify/:token", get(registration::verify))
        .route("/api/books", get(books::list_books))
        .route("/api/books/:book_id", get(books::get_book))
        .route("/api/reviews/:id", get(reviews::list_for_book));

    let protected_routes = Router::new()
        // Admin management
        .route("/api/auth/admins", get(auth_handlers::list_admins))
        .route("/api/auth/add-admin", post(auth_handlers::add_admin))
        .route("/api/auth/admins/:admin_id", delete(auth_handlers::delete_admin))
        // Users
        .route("/api/users", get(users::list_users))
        .route(
            "/api/users/:user_id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Admin dashboard
        .route(
            "/api/admin/users",
            get(users::list_users).post(admin::create_user),
        )
        .route("/api/admin/users/:user_id", delete(admin::delete_user))
        .route("/api/admin/users/:user_id/promote", put(admin::promote_user))
        .route("/api/admin/users/:user_id/demote", put(admin::demote_user))
        .route("/api/admin/stats", get(admin::stats))
        // Catalog
        .route("/api/books", post(books::create_book))
        .route(
            "/api/books/:book_id",
            put(books::replace_book).delete(books::delete_book),
        )
        .route("/api/books/:book_id/approve", put(books::approve_book))
        .route("/api/books/:book_id/reject", put(books::reject_book))
        // Orders
        .route("/api/orders", post(orders::place_order))
        .route("/api/orders/my-orders", get(orders::my_orders))
        .route("/api/orders/admin/all", get(orders::list_all_orders))
        .route("/api/orders/:order_id", delete(orders::cancel_order))
        // Reviews
        .route("/api/reviews", post(reviews::create_review))
        .route(
            "/api/reviews/:id",
            put(reviews::update_review).delete(reviews::delete_review),
        )
        // Cart and favorites
        .route("/api/cart", get(cart::list_cart).post(cart::add_to_cart))
        .route("/api/cart/:book_id", delete(cart::remove_from_cart))
        .route(
            "/api/favorites",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route("/api/favorites/:book_id", delete(favorites::remove_favorite))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
