use serde::Serialize;

use crate::query::QueryParams;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

pub(crate) const SEARCH: &str = "search";
pub(crate) const CATEGORY: &str = "category";
pub(crate) const PROJECT_SCALE: &str = "projectScale";
pub(crate) const TECHNOLOGIES: &str = "technologies";
pub(crate) const PAGE: &str = "page";

/// Filters currently reflected in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search: String,
    pub category: String,
    pub project_scale: String,
    pub technologies: Vec<String>,
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            project_scale: String::new(),
            technologies: Vec::new(),
            page: 1,
        }
    }
}

impl FilterState {
    pub fn from_query(query: &str) -> Self {
        Self::from_params(&QueryParams::parse(query))
    }

    pub fn from_params(params: &QueryParams) -> Self {
        let defaults = Self::default();
        Self {
            search: params.get(SEARCH).unwrap_or_default().to_string(),
            category: params
                .get(CATEGORY)
                .filter(|c| !c.is_empty())
                .map_or(defaults.category, str::to_string),
            project_scale: params.get(PROJECT_SCALE).unwrap_or_default().to_string(),
            technologies: params
                .get(TECHNOLOGIES)
                .map(split_list)
                .unwrap_or_default(),
            page: params
                .get(PAGE)
                .and_then(|p| p.trim().parse::<u32>().ok())
                .filter(|p| *p > 0)
                .unwrap_or(defaults.page),
        }
    }

    /// True when any field differs from its default. A page other than 1
    /// counts, so `?page=2` is active even though its badge count is 0.
    pub fn has_active_filters(&self) -> bool {
        *self != Self::default()
    }

    /// Badge count: one per text filter in use, one per selected technology.
    /// Page is not a filter.
    pub fn active_filter_count(&self) -> usize {
        usize::from(!self.search.is_empty())
            + usize::from(self.category != ALL_CATEGORIES)
            + usize::from(!self.project_scale.is_empty())
            + self.technologies.len()
    }
}

pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
