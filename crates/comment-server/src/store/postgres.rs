use comment_shared::api::Page;
use comment_shared::{Comment, CommentWithAuthor, User, Video};
use sqlx::Postgres;

use super::{
    CommentStore, Database, PageRequest, StoreResult, Transaction, UserStore, VideoStore,
};
use crate::db::DbPool;

const COMMENT_COLUMNS: &str = "comment_id, video_id, user_id, content, created_at, updated_at";

/// PostgreSQL-backed [`Database`].
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl Database for PgStore {
    type Tx = PgTx;

    async fn begin(&self) -> StoreResult<PgTx> {
        let tx = self.pool.begin().await?;
        Ok(PgTx { tx })
    }
}

pub struct PgTx {
    tx: sqlx::Transaction<'static, Postgres>,
}

impl PgTx {
    async fn fetch_comment_page(
        &mut self,
        filter: &str,
        binds: &[&str],
        page: PageRequest,
    ) -> StoreResult<Page<CommentWithAuthor>> {
        let count_query = format!(
            r#"
            SELECT COUNT(*)
            FROM comments c
            JOIN videos v ON v.video_id = c.video_id
            WHERE {}
            "#,
            filter
        );

        let mut count_builder = sqlx::query_as::<_, (i64,)>(&count_query);
        for value in binds {
            count_builder = count_builder.bind(*value);
        }
        let (total,) = count_builder.fetch_one(&mut *self.tx).await?;

        let select_query = format!(
            r#"
            SELECT c.comment_id, c.video_id, c.user_id, u.nickname, c.content,
                   c.created_at, c.updated_at
            FROM comments c
            JOIN users u ON u.user_id = c.user_id
            JOIN videos v ON v.video_id = c.video_id
            WHERE {}
            ORDER BY c.created_at DESC, c.comment_id DESC
            LIMIT ${} OFFSET ${}
            "#,
            filter,
            binds.len() + 1,
            binds.len() + 2
        );

        let mut select_builder = sqlx::query_as::<_, CommentWithAuthor>(&select_query);
        for value in binds {
            select_builder = select_builder.bind(*value);
        }
        let rows = select_builder
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *self.tx)
            .await?;

        Ok(page.to_page(rows, total))
    }
}

impl UserStore for PgTx {
    async fn find_by_user_id(&mut self, user_id: &str) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT user_id, nickname FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *self.tx)
            .await
    }
}

impl VideoStore for PgTx {
    async fn find_by_video_id(&mut self, video_id: &str) -> StoreResult<Option<Video>> {
        sqlx::query_as::<_, Video>("SELECT video_id, seller_id FROM videos WHERE video_id = $1")
            .bind(video_id)
            .fetch_optional(&mut *self.tx)
            .await
    }
}

impl CommentStore for PgTx {
    async fn find_by_comment_id(&mut self, comment_id: &str) -> StoreResult<Option<Comment>> {
        let query = format!(
            "SELECT {} FROM comments WHERE comment_id = $1 FOR UPDATE",
            COMMENT_COLUMNS
        );

        sqlx::query_as::<_, Comment>(&query)
            .bind(comment_id)
            .fetch_optional(&mut *self.tx)
            .await
    }

    async fn find_by_comment_id_and_user_id(
        &mut self,
        comment_id: &str,
        user_id: &str,
    ) -> StoreResult<Option<Comment>> {
        let query = format!(
            "SELECT {} FROM comments WHERE comment_id = $1 AND user_id = $2 FOR UPDATE",
            COMMENT_COLUMNS
        );

        sqlx::query_as::<_, Comment>(&query)
            .bind(comment_id)
            .bind(user_id)
            .fetch_optional(&mut *self.tx)
            .await
    }

    async fn find_by_video_id(
        &mut self,
        video_id: &str,
        page: PageRequest,
    ) -> StoreResult<Page<CommentWithAuthor>> {
        self.fetch_comment_page("c.video_id = $1", &[video_id], page)
            .await
    }

    async fn find_by_video_id_and_seller_id(
        &mut self,
        video_id: &str,
        seller_id: &str,
        page: PageRequest,
    ) -> StoreResult<Page<CommentWithAuthor>> {
        self.fetch_comment_page("c.video_id = $1 AND v.seller_id = $2", &[video_id, seller_id], page)
            .await
    }

    async fn find_by_user_id(
        &mut self,
        user_id: &str,
        page: PageRequest,
    ) -> StoreResult<Page<CommentWithAuthor>> {
        self.fetch_comment_page("c.user_id = $1", &[user_id], page)
            .await
    }

    async fn insert(&mut self, comment: &Comment) -> StoreResult<bool> {
        // Waits for a concurrent insert of the same ID to finish, then skips
        let result = sqlx::query(
            r#"
            INSERT INTO comments (comment_id, video_id, user_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (comment_id) DO NOTHING
            "#,
        )
        .bind(&comment.comment_id)
        .bind(&comment.video_id)
        .bind(&comment.user_id)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update(&mut self, comment: &Comment) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET content = $1, updated_at = $2
            WHERE comment_id = $3 AND user_id = $4
            "#,
        )
        .bind(&comment.content)
        .bind(comment.updated_at)
        .bind(&comment.comment_id)
        .bind(&comment.user_id)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }

    async fn delete(&mut self, comment: &Comment) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(&comment.comment_id)
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}

impl Transaction for PgTx {
    async fn commit(self) -> StoreResult<()> {
        self.tx.commit().await
    }
}
