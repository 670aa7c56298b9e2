use uuid::Uuid;

/// 1-based page window. Construct through [`Page::new`] so `page >= 1` and
/// `limit > 0` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    limit: u32,
}

impl Page {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        let limit = i64::from(self.limit);
        (total + limit - 1) / limit
    }
}

/// Case-insensitive substring search over one locale of title and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    pub term: String,
    pub locale: String,
}

/// Predicates applied to published posts before pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub search: Option<SearchTerm>,
    pub category_slug: Option<String>,
    pub category_id: Option<Uuid>,
    pub tag_slug: Option<String>,
    pub author_id: Option<Uuid>,
    pub post_ids: Option<Vec<Uuid>>,
    pub featured: Option<bool>,
}

/// One page of results plus the unpaginated row count.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: T,
    pub page: Page,
    pub total: i64,
}
