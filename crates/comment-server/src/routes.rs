use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::auth::auth_middleware;
use crate::handlers::{comments as comment_handlers, seller as seller_handlers};
use crate::service::CommentService;
use crate::store::Database;
use crate::Config;

#[derive(Clone)]
pub struct AppState<D> {
    pub comments: CommentService<D>,
    pub config: Config,
}

pub fn create_router<D: Database>(db: D, config: Config) -> Router {
    let state = AppState {
        comments: CommentService::new(db),
        config,
    };

    // Comment author routes
    let user_routes = Router::new()
        .route("/videos/:video_id/comments", post(comment_handlers::create_comment::<D>))
        .route("/comments/:comment_id", patch(comment_handlers::update_comment::<D>))
        .route("/comments/:comment_id", delete(comment_handlers::delete_comment::<D>))
        .route("/users/me/comments", get(comment_handlers::list_my_comments::<D>));

    // Seller routes, the token subject is the seller ID
    let seller_routes = Router::new()
        .route("/videos/:video_id/comments", get(seller_handlers::list_video_comments::<D>))
        .route("/comments/:comment_id", delete(seller_handlers::delete_comment::<D>));

    let protected_routes = Router::new()
        .merge(user_routes)
        .nest("/seller", seller_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<D>,
        ));

    // Added after route_layer so reading a video's comments stays public
    let api_routes = protected_routes.route(
        "/videos/:video_id/comments",
        get(comment_handlers::list_video_comments::<D>),
    );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
