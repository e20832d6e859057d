use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use comment_shared::{
    api::{
        CommentCreateResponse, CommentUpdateResponse, CreateCommentRequest, Page, PageParams,
        UpdateCommentRequest,
    },
    CommentView,
};
use uuid::Uuid;

use super::page_and_size;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::routes::AppState;
use crate::store::Database;

/// GET /api/v1/videos/:video_id/comments
pub async fn list_video_comments<D: Database>(
    State(state): State<AppState<D>>,
    Path(video_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<CommentView>>, AppError> {
    let (page, size) = page_and_size(&params);
    let comments = state
        .comments
        .user_video_get_comments(&video_id, page, size)
        .await?;

    Ok(Json(comments))
}

/// POST /api/v1/videos/:video_id/comments
pub async fn create_comment<D: Database>(
    State(state): State<AppState<D>>,
    Extension(user): Extension<AuthUser>,
    Path(video_id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentCreateResponse>), AppError> {
    let comment_id = Uuid::new_v4().to_string();
    let content = req.content.unwrap_or_default();

    let created = state
        .comments
        .create_comment(&comment_id, &video_id, &user.id, &content)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/v1/comments/:comment_id
pub async fn update_comment<D: Database>(
    State(state): State<AppState<D>>,
    Extension(user): Extension<AuthUser>,
    Path(comment_id): Path<String>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<CommentUpdateResponse>, AppError> {
    let content = req.content.unwrap_or_default();

    let updated = state
        .comments
        .update_comment(&comment_id, &user.id, &content)
        .await?;

    Ok(Json(updated))
}

/// DELETE /api/v1/comments/:comment_id
pub async fn delete_comment<D: Database>(
    State(state): State<AppState<D>>,
    Extension(user): Extension<AuthUser>,
    Path(comment_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .comments
        .user_delete_comment(&comment_id, &user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/me/comments
pub async fn list_my_comments<D: Database>(
    State(state): State<AppState<D>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<CommentView>>, AppError> {
    let (page, size) = page_and_size(&params);
    let comments = state
        .comments
        .user_get_comments(&user.id, page, size)
        .await?;

    Ok(Json(comments))
}
