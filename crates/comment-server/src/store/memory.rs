//! In-memory [`Database`] used by the service and router tests.
//!
//! A transaction holds the table lock for its whole lifetime and works on a
//! staged copy, so uncommitted writes vanish when it is dropped.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use comment_shared::api::Page;
use comment_shared::{Comment, CommentWithAuthor, User, Video};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{
    CommentStore, Database, PageRequest, StoreResult, Transaction, UserStore, VideoStore,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: HashMap<String, User>,
    videos: HashMap<String, Video>,
    comments: HashMap<String, Comment>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user_id: &str, nickname: &str) {
        let user = User {
            user_id: user_id.to_string(),
            nickname: nickname.to_string(),
        };
        self.tables.lock().await.users.insert(user.user_id.clone(), user);
    }

    pub async fn insert_video(&self, video_id: &str, seller_id: &str) {
        let video = Video {
            video_id: video_id.to_string(),
            seller_id: seller_id.to_string(),
        };
        self.tables.lock().await.videos.insert(video.video_id.clone(), video);
    }

    pub async fn insert_comment(&self, comment: Comment) {
        self.tables
            .lock()
            .await
            .comments
            .insert(comment.comment_id.clone(), comment);
    }

    pub async fn comment(&self, comment_id: &str) -> Option<Comment> {
        self.tables.lock().await.comments.get(comment_id).cloned()
    }

    pub async fn comment_count(&self) -> usize {
        self.tables.lock().await.comments.len()
    }

    /// Makes every subsequent `insert`, `update`, `delete` and `commit` fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Database for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> StoreResult<MemoryTx> {
        let guard = self.tables.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(MemoryTx {
            guard,
            staged,
            fail_writes: self.fail_writes.load(Ordering::SeqCst),
        })
    }
}

pub struct MemoryTx {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
    fail_writes: bool,
}

impl MemoryTx {
    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(())
    }

    fn page_of(
        &self,
        page: PageRequest,
        mut matches: impl FnMut(&Comment) -> bool,
    ) -> Page<CommentWithAuthor> {
        let mut rows: Vec<CommentWithAuthor> = self
            .staged
            .comments
            .values()
            .filter(|c| matches(*c))
            .filter_map(|c| {
                let author = self.staged.users.get(&c.user_id)?;
                Some(CommentWithAuthor {
                    comment_id: c.comment_id.clone(),
                    video_id: c.video_id.clone(),
                    user_id: c.user_id.clone(),
                    nickname: author.nickname.clone(),
                    content: c.content.clone(),
                    created_at: c.created_at,
                    updated_at: c.updated_at,
                })
            })
            .collect();

        rows.sort_by_key(|row| Reverse((row.created_at, row.comment_id.clone())));
        let total = rows.len() as i64;

        let content = rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        page.to_page(content, total)
    }
}

impl UserStore for MemoryTx {
    async fn find_by_user_id(&mut self, user_id: &str) -> StoreResult<Option<User>> {
        Ok(self.staged.users.get(user_id).cloned())
    }
}

impl VideoStore for MemoryTx {
    async fn find_by_video_id(&mut self, video_id: &str) -> StoreResult<Option<Video>> {
        Ok(self.staged.videos.get(video_id).cloned())
    }
}

impl CommentStore for MemoryTx {
    async fn find_by_comment_id(&mut self, comment_id: &str) -> StoreResult<Option<Comment>> {
        Ok(self.staged.comments.get(comment_id).cloned())
    }

    async fn find_by_comment_id_and_user_id(
        &mut self,
        comment_id: &str,
        user_id: &str,
    ) -> StoreResult<Option<Comment>> {
        Ok(self
            .staged
            .comments
            .get(comment_id)
            .filter(|c| c.user_id == user_id)
            .cloned())
    }

    async fn find_by_video_id(
        &mut self,
        video_id: &str,
        page: PageRequest,
    ) -> StoreResult<Page<CommentWithAuthor>> {
        Ok(self.page_of(page, |c| c.video_id == video_id))
    }

    async fn find_by_video_id_and_seller_id(
        &mut self,
        video_id: &str,
        seller_id: &str,
        page: PageRequest,
    ) -> StoreResult<Page<CommentWithAuthor>> {
        let owned = self
            .staged
            .videos
            .get(video_id)
            .is_some_and(|v| v.seller_id == seller_id);

        Ok(self.page_of(page, |c| owned && c.video_id == video_id))
    }

    async fn find_by_user_id(
        &mut self,
        user_id: &str,
        page: PageRequest,
    ) -> StoreResult<Page<CommentWithAuthor>> {
        Ok(self.page_of(page, |c| c.user_id == user_id))
    }

    async fn insert(&mut self, comment: &Comment) -> StoreResult<bool> {
        self.check_writable()?;

        if self.staged.comments.contains_key(&comment.comment_id) {
            return Ok(false);
        }
        self.staged
            .comments
            .insert(comment.comment_id.clone(), comment.clone());
        Ok(true)
    }

    async fn update(&mut self, comment: &Comment) -> StoreResult<()> {
        self.check_writable()?;

        let existing = self
            .staged
            .comments
            .get_mut(&comment.comment_id)
            .filter(|c| c.user_id == comment.user_id)
            .ok_or(sqlx::Error::RowNotFound)?;
        existing.content = comment.content.clone();
        existing.updated_at = comment.updated_at;
        Ok(())
    }

    async fn delete(&mut self, comment: &Comment) -> StoreResult<()> {
        self.check_writable()?;

        self.staged
            .comments
            .remove(&comment.comment_id)
            .map(|_| ())
            .ok_or(sqlx::Error::RowNotFound)
    }
}

impl Transaction for MemoryTx {
    async fn commit(mut self) -> StoreResult<()> {
        self.check_writable()?;
        *self.guard = std::mem::take(&mut self.staged);
        Ok(())
    }
}
