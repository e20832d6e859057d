//! Business rules for video comments.

mod error;

use chrono::Utc;
use comment_shared::api::{CommentCreateResponse, CommentUpdateResponse, Page};
use comment_shared::{Comment, CommentView, MAX_COMMENT_CHARS};

use crate::store::{CommentStore, Database, PageRequest, Transaction, UserStore, VideoStore};

pub use error::CommentError;

pub type CommentResult<T> = Result<T, CommentError>;

#[derive(Clone)]
pub struct CommentService<D> {
    db: D,
}

fn require_id(value: &str, message: &str) -> CommentResult<()> {
    if value.is_empty() {
        return Err(CommentError::invalid(message));
    }
    Ok(())
}

fn validate_content(content: &str) -> CommentResult<()> {
    if content.is_empty() {
        return Err(CommentError::invalid("Content is empty"));
    }
    if content.chars().count() > MAX_COMMENT_CHARS {
        return Err(CommentError::invalid(
            "Content should not exceed 140 characters",
        ));
    }
    Ok(())
}

fn page_request(page: u32, size: u32) -> CommentResult<PageRequest> {
    PageRequest::new(page, size)
        .ok_or_else(|| CommentError::invalid("Page size must be greater than zero"))
}

impl<D: Database> CommentService<D> {
    pub fn new(db: D) -> Self {
        Self { db }
    }

    pub async fn create_comment(
        &self,
        comment_id: &str,
        video_id: &str,
        user_id: &str,
        content: &str,
    ) -> CommentResult<CommentCreateResponse> {
        require_id(comment_id, "Comment ID is empty")?;
        require_id(user_id, "User ID is empty")?;
        validate_content(content)?;

        let mut tx = self
            .db
            .begin()
            .await
            .map_err(CommentError::persistence("Failed to save comment"))?;

        UserStore::find_by_user_id(&mut tx, user_id)
            .await
            .map_err(CommentError::persistence("Failed to load user"))?
            .ok_or_else(|| CommentError::not_found("User not found"))?;

        VideoStore::find_by_video_id(&mut tx, video_id)
            .await
            .map_err(CommentError::persistence("Failed to load video"))?
            .ok_or_else(|| CommentError::not_found("Video not found"))?;

        let comment = Comment {
            comment_id: comment_id.to_string(),
            video_id: video_id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        };

        let inserted = tx
            .insert(&comment)
            .await
            .map_err(CommentError::persistence("Failed to save comment"))?;
        if !inserted {
            return Err(CommentError::invalid("Comment ID already exists"));
        }
        tx.commit()
            .await
            .map_err(CommentError::persistence("Failed to save comment"))?;

        tracing::debug!("Comment {} created on video {}", comment.comment_id, video_id);

        Ok(CommentCreateResponse {
            comment_id: comment.comment_id,
            created_at: comment.created_at,
        })
    }

    pub async fn update_comment(
        &self,
        comment_id: &str,
        user_id: &str,
        content: &str,
    ) -> CommentResult<CommentUpdateResponse> {
        require_id(user_id, "User ID is empty")?;
        validate_content(content)?;

        let mut tx = self
            .db
            .begin()
            .await
            .map_err(CommentError::persistence("Failed to update comment"))?;

        let mut comment = tx
            .find_by_comment_id_and_user_id(comment_id, user_id)
            .await
            .map_err(CommentError::persistence("Failed to load comment"))?
            .ok_or_else(|| CommentError::not_found("Comment not found"))?;

        let now = Utc::now();
        comment.update_content(content.to_string(), now);

        tx.update(&comment)
            .await
            .map_err(CommentError::persistence("Failed to update comment"))?;
        tx.commit()
            .await
            .map_err(CommentError::persistence("Failed to update comment"))?;

        Ok(CommentUpdateResponse {
            comment_id: comment.comment_id,
            updated_at: now,
        })
    }

    pub async fn user_delete_comment(&self, comment_id: &str, user_id: &str) -> CommentResult<()> {
        require_id(user_id, "User ID is empty")?;

        let mut tx = self
            .db
            .begin()
            .await
            .map_err(CommentError::persistence("Failed to delete comment"))?;

        let comment = tx
            .find_by_comment_id_and_user_id(comment_id, user_id)
            .await
            .map_err(CommentError::persistence("Failed to load comment"))?
            .ok_or_else(|| CommentError::not_found("Comment not found"))?;

        tx.delete(&comment)
            .await
            .map_err(CommentError::persistence("Failed to delete comment"))?;
        tx.commit()
            .await
            .map_err(CommentError::persistence("Failed to delete comment"))?;

        Ok(())
    }

    pub async fn seller_delete_comment(
        &self,
        comment_id: &str,
        seller_id: &str,
    ) -> CommentResult<()> {
        require_id(seller_id, "Seller ID is empty")?;

        let mut tx = self
            .db
            .begin()
            .await
            .map_err(CommentError::persistence("Failed to delete comment"))?;

        let comment = tx
            .find_by_comment_id(comment_id)
            .await
            .map_err(CommentError::persistence("Failed to load comment"))?
            .ok_or_else(|| CommentError::not_found("Comment not found"))?;

        let video = VideoStore::find_by_video_id(&mut tx, &comment.video_id)
            .await
            .map_err(CommentError::persistence("Failed to load video"))?
            .ok_or_else(|| CommentError::not_found("Video not found"))?;

        if !video.is_owned_by(seller_id) {
            return Err(CommentError::invalid("Seller ID does not match"));
        }

        tx.delete(&comment)
            .await
            .map_err(CommentError::persistence("Failed to delete comment"))?;
        tx.commit()
            .await
            .map_err(CommentError::persistence("Failed to delete comment"))?;

        Ok(())
    }

    pub async fn seller_video_get_comments(
        &self,
        video_id: &str,
        seller_id: &str,
        page: u32,
        size: u32,
    ) -> CommentResult<Page<CommentView>> {
        let page = page_request(page, size)?;
        let mut tx = self
            .db
            .begin()
            .await
            .map_err(CommentError::persistence("Failed to load comments"))?;

        let rows = tx
            .find_by_video_id_and_seller_id(video_id, seller_id, page)
            .await
            .map_err(CommentError::persistence("Failed to load comments"))?;

        Ok(rows.map(CommentView::for_video))
    }

    pub async fn user_video_get_comments(
        &self,
        video_id: &str,
        page: u32,
        size: u32,
    ) -> CommentResult<Page<CommentView>> {
        let page = page_request(page, size)?;
        let mut tx = self
            .db
            .begin()
            .await
            .map_err(CommentError::persistence("Failed to load comments"))?;

        let rows = CommentStore::find_by_video_id(&mut tx, video_id, page)
            .await
            .map_err(CommentError::persistence("Failed to load comments"))?;

        Ok(rows.map(CommentView::for_video))
    }

    pub async fn user_get_comments(
        &self,
        user_id: &str,
        page: u32,
        size: u32,
    ) -> CommentResult<Page<CommentView>> {
        let page = page_request(page, size)?;
        let mut tx = self
            .db
            .begin()
            .await
            .map_err(CommentError::persistence("Failed to load comments"))?;

        let rows = CommentStore::find_by_user_id(&mut tx, user_id, page)
            .await
            .map_err(CommentError::persistence("Failed to load comments"))?;

        Ok(rows.map(CommentView::for_user))
    }
}
