use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use comment_shared::{
    api::{Page, PageParams},
    CommentView,
};

use super::page_and_size;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::routes::AppState;
use crate::store::Database;

/// GET /api/v1/seller/videos/:video_id/comments
pub async fn list_video_comments<D: Database>(
    State(state): State<AppState<D>>,
    Extension(seller): Extension<AuthUser>,
    Path(video_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<CommentView>>, AppError> {
    let (page, size) = page_and_size(&params);
    let comments = state
        .comments
        .seller_video_get_comments(&video_id, &seller.id, page, size)
        .await?;

    Ok(Json(comments))
}

/// DELETE /api/v1/seller/comments/:comment_id
pub async fn delete_comment<D: Database>(
    State(state): State<AppState<D>>,
    Extension(seller): Extension<AuthUser>,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .comments
        .seller_delete_comment(&comment_id, &seller.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
