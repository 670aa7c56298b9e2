mod blog_service;
mod comments;
mod inquiry_service;

pub use blog_service::{BlogService, ListPostsParams, RELATED_POSTS_LIMIT};
pub use comments::build_comment_tree;
pub use inquiry_service::InquiryService;
