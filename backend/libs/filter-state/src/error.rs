use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Page numbers start at 1")]
    InvalidPage,

    #[error("Invalid location '{0}': expected an absolute path")]
    InvalidLocation(String),

    #[error("Debouncer has shut down")]
    DebouncerClosed,
}
