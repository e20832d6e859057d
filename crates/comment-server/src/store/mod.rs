//! Persistence seams for the comment service.
//!
//! Every service operation opens one [`Transaction`] through a [`Database`],
//! runs its lookups and writes against it, and commits. Dropping a
//! transaction without calling [`Transaction::commit`] rolls it back.

use std::future::Future;

use comment_shared::api::{Page, MAX_PAGE_SIZE};
use comment_shared::{Comment, CommentWithAuthor, User, Video};

#[cfg(test)]
pub mod memory;
mod postgres;

pub use postgres::{PgStore, PgTx};

pub type StoreResult<T> = Result<T, sqlx::Error>;

/// Validated 0-based page request. Results are always ordered by
/// `created_at DESC, comment_id DESC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Returns `None` for an empty page size. Sizes above
    /// [`MAX_PAGE_SIZE`] are clamped.
    pub fn new(page: u32, size: u32) -> Option<Self> {
        if size == 0 {
            return None;
        }
        Some(Self {
            page,
            size: size.min(MAX_PAGE_SIZE),
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn to_page<T>(&self, content: Vec<T>, total_elements: i64) -> Page<T> {
        Page::new(content, self.page, self.size, total_elements)
    }
}

pub trait UserStore {
    fn find_by_user_id(
        &mut self,
        user_id: &str,
    ) -> impl Future<Output = StoreResult<Option<User>>> + Send;
}

pub trait VideoStore {
    fn find_by_video_id(
        &mut self,
        video_id: &str,
    ) -> impl Future<Output = StoreResult<Option<Video>>> + Send;
}

pub trait CommentStore {
    /// Locks the returned row until the transaction ends.
    fn find_by_comment_id(
        &mut self,
        comment_id: &str,
    ) -> impl Future<Output = StoreResult<Option<Comment>>> + Send;

    /// Ownership-filtered lookup: a comment written by someone else is
    /// reported exactly like a missing one. Locks the returned row until the
    /// transaction ends.
    fn find_by_comment_id_and_user_id(
        &mut self,
        comment_id: &str,
        user_id: &str,
    ) -> impl Future<Output = StoreResult<Option<Comment>>> + Send;

    fn find_by_video_id(
        &mut self,
        video_id: &str,
        page: PageRequest,
    ) -> impl Future<Output = StoreResult<Page<CommentWithAuthor>>> + Send;

    /// Comments on `video_id`, only if that video belongs to `seller_id`.
    fn find_by_video_id_and_seller_id(
        &mut self,
        video_id: &str,
        seller_id: &str,
        page: PageRequest,
    ) -> impl Future<Output = StoreResult<Page<CommentWithAuthor>>> + Send;

    fn find_by_user_id(
        &mut self,
        user_id: &str,
        page: PageRequest,
    ) -> impl Future<Output = StoreResult<Page<CommentWithAuthor>>> + Send;

    /// Inserts a new comment. Returns `false`, leaving the existing row
    /// untouched, when `comment_id` is already taken.
    fn insert(&mut self, comment: &Comment) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Writes back `content` and `updated_at`. Fails with
    /// [`sqlx::Error::RowNotFound`] if the row is gone.
    fn update(&mut self, comment: &Comment) -> impl Future<Output = StoreResult<()>> + Send;

    fn delete(&mut self, comment: &Comment) -> impl Future<Output = StoreResult<()>> + Send;
}

pub trait Transaction: UserStore + VideoStore + CommentStore + Send {
    fn commit(self) -> impl Future<Output = StoreResult<()>> + Send;
}

pub trait Database: Clone + Send + Sync + 'static {
    type Tx: Transaction;

    fn begin(&self) -> impl Future<Output = StoreResult<Self::Tx>> + Send;
}
