//! Filter State Synchronizer
//!
//! Keeps a listing page's filters (search, category, project scale,
//! technologies, page) and its URL query string in agreement.
//!
//! **Read**: the query string is parsed into a typed [`FilterState`].
//! Absent or malformed parameters take their defaults.
//!
//! **Write**: a partial [`FilterUpdate`] is merged over the current
//! parameters. Fields equal to their default are removed from the URL and
//! parameters this crate does not own are left untouched. Changing any
//! filter other than `page` sends the listing back to page 1.
//!
//! ```rust
//! use filter_state::{FilterSync, FilterUpdate};
//!
//! let mut sync = FilterSync::new("/projects?page=4&ref=nav").unwrap();
//! let nav = sync.update(FilterUpdate::new().search("logo")).unwrap();
//! assert_eq!(nav.href, "/projects?ref=nav&search=logo");
//! assert!(!nav.scroll);
//! ```
//!
//! Free-text search is usually committed through a [`Debouncer`] so only
//! the last keystroke of a burst reaches the URL.

mod debounce;
mod error;
mod query;
mod state;
mod sync;

pub use debounce::{search_input, Debouncer, DEFAULT_SEARCH_DEBOUNCE};
pub use error::FilterError;
pub use query::QueryParams;
pub use state::{FilterState, ALL_CATEGORIES};
pub use sync::{FilterSync, FilterUpdate, Navigation};
