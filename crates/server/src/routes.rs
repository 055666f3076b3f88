use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod articles;
pub mod auth;
pub mod bookmarks;
pub mod chatbot;
pub mod mentors;
pub mod opportunities;
pub mod users;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public health check and docs, token
/// middleware over everything else, and a role gate on admin routes.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let admin = || middleware::from_fn(auth::require_admin);

    let user_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/role/student", get(users::list_students))
        .route("/:uid", get(users::get_user).put(users::update_user))
        .route("/:uid/avatar", patch(users::update_avatar))
        .merge(
            Router::new()
                .route("/", get(users::list_users))
                .route("/role/admin", get(users::list_admins))
                .route("/:uid", delete(users::delete_user))
                .route_layer(admin()),
        );

    let mentor_routes = Router::new()
        .route("/", get(mentors::list_mentors))
        .route("/search", get(mentors::search_mentors))
        .route("/:id", get(mentors::get_mentor))
        .merge(
            Router::new()
                .route("/create", post(mentors::create_mentor))
                .route("/:id", put(mentors::update_mentor).delete(mentors::delete_mentor))
                .route_layer(admin()),
        );

    let opportunity_routes = Router::new()
        .route("/", get(opportunities::list_opportunities))
        .route("/type/:kind", get(opportunities::list_by_kind))
        .route("/:id", get(opportunities::get_opportunity))
        .merge(
            Router::new()
                .route("/create", post(opportunities::create_opportunity))
                .route("/createMany", post(opportunities::create_many))
                .route(
                    "/:id",
                    put(opportunities::update_opportunity).delete(opportunities::delete_opportunity),
                )
                .route_layer(admin()),
        );

    let article_routes = Router::new()
        .route("/", get(articles::list_articles))
        .route("/:id", get(articles::get_article))
        .merge(
            Router::new()
                .route("/create", post(articles::create_article))
                .route("/bulk", post(articles::bulk_create))
                .route("/:id", put(articles::update_article).delete(articles::delete_article))
                .route_layer(admin()),
        );

    let bookmark_routes = Router::new()
        .route("/add", post(bookmarks::add_bookmark))
        .route("/remove", delete(bookmarks::remove_bookmark))
        .route("/check", get(bookmarks::check_bookmark))
        .route("/user/:uid", get(bookmarks::list_for_user));

    let chatbot_routes = Router::new().route("/ask", post(chatbot::ask));

    let api = Router::new()
        .nest("/user", user_routes)
        .nest("/mentor", mentor_routes)
        .nest("/opportunity", opportunity_routes)
        .nest("/article", article_routes)
        .nest("/bookmark", bookmark_routes)
        .nest("/chatbot", chatbot_routes);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_firebase_token))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
