mod comment;
mod user;
mod video;

pub use comment::*;
pub use user::*;
pub use video::*;
