use serde::{Deserialize, Serialize};

/// A commenting account, owned by the user-management system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub user_id: String,
    pub nickname: String,
}
