mod comment;
mod inquiry;
mod locale;
mod post;
mod query;
mod taxonomy;

pub use comment::Comment;
pub use inquiry::{Inquiry, InquiryPayload, InquiryType, NewInquiry};
pub use locale::Localized;
pub use post::{AuthorRef, CategoryRef, CommentThread, PostDetail, PostRecord, PostSummary};
pub use query::{Page, Paginated, PostFilter, SearchTerm};
pub use taxonomy::{
    Author, AuthorPosts, Category, CategoryPosts, CategoryWithCount, Tag, TagPosts, TagWithCount,
};
