mod comments;
mod pagination;

pub use comments::*;
pub use pagination::*;
