use serde::Deserialize;

use crate::config::PaginationConfig;
use crate::models::Page;

/// Raw `page`/`limit` query values. Kept as strings so malformed numbers fall
/// back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn resolve(&self, config: &PaginationConfig) -> Page {
        let page = parse_positive(self.page.as_deref()).unwrap_or(1);
        let limit = parse_positive(self.limit.as_deref())
            .unwrap_or(config.default_limit)
            .min(config.max_limit);
        Page::new(page, limit)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    #[serde(flatten)]
    pub paging: PageQuery,
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<String>,
    pub locale: Option<String>,
}

impl PostListQuery {
    pub fn search_term(&self) -> Option<&str> {
        non_empty(self.search.as_deref())
    }

    pub fn category_slug(&self) -> Option<&str> {
        non_empty(self.category.as_deref())
    }

    pub fn tag_slug(&self) -> Option<&str> {
        non_empty(self.tag.as_deref())
    }

    /// `"true"`/`"false"`; any other value means no featured filter.
    pub fn featured(&self) -> Option<bool> {
        match self.featured.as_deref().map(str::trim) {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }
}

fn parse_positive(value: Option<&str>) -> Option<u32> {
    value?.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
