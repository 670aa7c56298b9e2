mod postgres_repository;
mod r#trait;

pub use postgres_repository::PostgresBlogRepository;
pub use r#trait::{BlogRepository, InquiryRepository};

#[cfg(test)]
pub use r#trait::{MockBlogRepository, MockInquiryRepository};
