use serde::{Deserialize, Serialize};

/// A catalog video and the seller that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub video_id: String,
    pub seller_id: String,
}

impl Video {
    pub fn is_owned_by(&self, seller_id: &str) -> bool {
        self.seller_id == seller_id
    }
}
