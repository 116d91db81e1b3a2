use crate::handlers::{epochs, feed, now};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/epochs", get(epochs::list_epochs))
        .route("/epochs/{epoch}", get(epochs::get_epoch))
        .route("/epochs/{epoch}/speed", get(epochs::get_epoch_speed))
        .route("/epochs/{epoch}/location", get(epochs::get_epoch_location))
        .route("/now", get(now::get_now))
        .route("/comment", get(feed::get_comments))
        .route("/header", get(feed::get_header))
        .route("/metadata", get(feed::get_metadata))
        .route("/reload", post(feed::reload))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
