use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest comment body accepted, counted in characters.
pub const MAX_COMMENT_CHARS: usize = 140;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Comment {
    pub comment_id: String,
    pub video_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Unset until the first edit.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn update_content(&mut self, content: String, now: DateTime<Utc>) {
        self.content = content;
        self.updated_at = Some(now);
    }
}

/// Comment row joined with its author's nickname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CommentWithAuthor {
    pub comment_id: String,
    pub video_id: String,
    pub user_id: String,
    pub nickname: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Comment as returned by the listing endpoints.
///
/// `video_id` is only filled in when listing a user's comments across
/// videos; per-video listings leave it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub comment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub user_id: String,
    pub nickname: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CommentView {
    pub fn for_video(row: CommentWithAuthor) -> Self {
        Self {
            comment_id: row.comment_id,
            video_id: None,
            user_id: row.user_id,
            nickname: row.nickname,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    pub fn for_user(row: CommentWithAuthor) -> Self {
        Self {
            video_id: Some(row.video_id.clone()),
            ..Self::for_video(row)
        }
    }
}
