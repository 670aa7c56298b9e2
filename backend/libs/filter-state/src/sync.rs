use tracing::debug;

use crate::error::FilterError;
use crate::query::QueryParams;
use crate::state::{
    FilterState, ALL_CATEGORIES, CATEGORY, PAGE, PROJECT_SCALE, SEARCH, TECHNOLOGIES,
};

/// Partial change to the filters. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub category: Option<String>,
    pub project_scale: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub page: Option<u32>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn project_scale(mut self, scale: impl Into<String>) -> Self {
        self.project_scale = Some(scale.into());
        self
    }

    /// Technologies share one comma-separated parameter, so commas inside
    /// an entry are replaced by spaces when the URL is written.
    pub fn technologies<I, S>(mut self, technologies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.technologies = Some(technologies.into_iter().map(Into::into).collect());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    fn touches_filters(&self) -> bool {
        self.search.is_some()
            || self.category.is_some()
            || self.project_scale.is_some()
            || self.technologies.is_some()
    }
}

/// Client-side navigation to perform after a filter change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
    /// Filter changes keep the scroll position.
    pub scroll: bool,
}

/// Owns the current location and rewrites its query string as filters
/// change.
#[derive(Debug, Clone)]
pub struct FilterSync {
    path: String,
    params: QueryParams,
}

impl FilterSync {
    /// `location` is a path with an optional query, e.g. `/projects?page=2`.
    /// Any `#fragment` is dropped.
    pub fn new(location: &str) -> Result<Self, FilterError> {
        let location = location.split('#').next().unwrap_or_default();
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        if !path.starts_with('/') {
            return Err(FilterError::InvalidLocation(location.to_string()));
        }

        Ok(Self {
            path: path.to_string(),
            params: QueryParams::parse(query),
        })
    }

    pub fn filters(&self) -> FilterState {
        FilterState::from_params(&self.params)
    }

    pub fn href(&self) -> String {
        if self.params.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.params.to_query_string())
        }
    }

    /// Merge `update` into the URL.
    ///
    /// Touching any filter other than `page` resets to page 1 unless the
    /// same update also sets `page`.
    pub fn update(&mut self, update: FilterUpdate) -> Result<Navigation, FilterError> {
        if update.page == Some(0) {
            return Err(FilterError::InvalidPage);
        }

        let reset_page = update.touches_filters() && update.page.is_none();

        if let Some(search) = update.search {
            self.set_or_remove(SEARCH, search);
        }
        if let Some(category) = update.category {
            let category = if category == ALL_CATEGORIES {
                String::new()
            } else {
                category
            };
            self.set_or_remove(CATEGORY, category);
        }
        if let Some(scale) = update.project_scale {
            self.set_or_remove(PROJECT_SCALE, scale);
        }
        if let Some(technologies) = update.technologies {
            let joined = technologies
                .iter()
                .map(|t| without_commas(t))
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(",");
            self.set_or_remove(TECHNOLOGIES, joined);
        }

        match update.page {
            Some(page) if page > 1 => self.params.set(PAGE, page.to_string()),
            Some(_) => self.params.remove(PAGE),
            None if reset_page => self.params.remove(PAGE),
            None => {}
        }

        let href = self.href();
        debug!(%href, "Filters updated");
        Ok(Navigation {
            href,
            scroll: false,
        })
    }

    /// Drop every filter parameter, keeping unrelated ones.
    pub fn clear(&mut self) -> Navigation {
        for key in [SEARCH, CATEGORY, PROJECT_SCALE, TECHNOLOGIES, PAGE] {
            self.params.remove(key);
        }
        Navigation {
            href: self.href(),
            scroll: false,
        }
    }

    fn set_or_remove(&mut self, key: &str, value: String) {
        if value.is_empty() {
            self.params.remove(key);
        } else {
            self.params.set(key, value);
        }
    }
}

fn without_commas(technology: &str) -> String {
    technology
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
