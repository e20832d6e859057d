pub mod comments;
pub mod seller;

use comment_shared::api::{PageParams, DEFAULT_PAGE_SIZE};

/// Resolves optional query parameters to `(page, size)`.
pub(crate) fn page_and_size(params: &PageParams) -> (u32, u32) {
    (
        params.page.unwrap_or(0),
        params.size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
}
