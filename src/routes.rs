use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::auth;
use crate::handlers;
use crate::AppState;

pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let community_writes = middleware::from_fn_with_state(
        state.clone(),
        auth::rate_limit::rate_limit_community,
    );

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        // Quiz (guest mode)
        .route("/api/quiz/questions", get(handlers::quiz::get_questions))
        .route("/api/quiz/evaluate", post(handlers::quiz::evaluate))
        // Resource library
        .route("/api/resources", get(handlers::resources::list_resources))
        .route(
            "/api/resources/categories",
            get(handlers::resources::list_categories),
        )
        .route(
            "/api/resources/helplines",
            get(handlers::resources::list_helplines),
        );

    let protected_routes = Router::new()
        // Quiz sessions
        .route("/api/quiz/sessions", post(handlers::quiz::start_session))
        .route("/api/quiz/sessions/:id", get(handlers::quiz::get_session))
        .route(
            "/api/quiz/sessions/:id",
            delete(handlers::quiz::abandon_session),
        )
        .route("/api/quiz/sessions/:id/answer", post(handlers::quiz::answer))
        .route(
            "/api/quiz/sessions/:id/previous",
            post(handlers::quiz::go_back),
        )
        .route(
            "/api/quiz/sessions/:id/save",
            post(handlers::quiz::save_session),
        )
        // Mood
        .route("/api/mood", post(handlers::mood::upsert_mood))
        .route("/api/mood", get(handlers::mood::list_mood))
        .route("/api/mood/stats", get(handlers::mood::mood_stats))
        .route("/api/mood/trends", get(handlers::mood::mood_trend))
        // Journal
        .route("/api/journal", post(handlers::journal::create_entry))
        .route("/api/journal", get(handlers::journal::list_entries))
        .route("/api/journal/tags", get(handlers::journal::tag_counts))
        .route("/api/journal/:id", get(handlers::journal::get_entry))
        .route("/api/journal/:id", delete(handlers::journal::delete_entry))
        // Profile
        .route("/api/profile", get(handlers::profile::get_profile))
        .route("/api/profile", put(handlers::profile::update_profile))
        // Community
        .route(
            "/api/community/posts",
            get(handlers::community::list_posts),
        )
        .route(
            "/api/community/posts",
            post(handlers::community::create_post).layer(community_writes.clone()),
        )
        .route(
            "/api/community/posts/:id/like",
            post(handlers::community::toggle_like),
        )
        .route(
            "/api/community/posts/:id/comments",
            get(handlers::community::list_comments),
        )
        .route(
            "/api/community/posts/:id/comments",
            post(handlers::community::create_comment).layer(community_writes),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let mut allowed_origins = vec![state
        .config
        .frontend_url
        .parse::<HeaderValue>()
        .context("FRONTEND_URL is not a valid origin")?];
    for origin in &state.config.cors_extra_origins {
        match origin.parse::<HeaderValue>() {
            Ok(hv) => allowed_origins.push(hv),
            Err(_) => tracing::warn!(origin = %origin, "Ignoring invalid CORS origin"),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
