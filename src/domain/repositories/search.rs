//! Generic filter + sort + paginate contract shared by searchable repositories.
//!
//! [`SearchParams`] normalizes raw caller input once, so every repository
//! sees the same defaults. [`SearchResult`] carries one page of items
//! together with the pagination metadata computed from the pre-pagination
//! total.

use serde::{Deserialize, Serialize};

/// Page used when none (or a non-positive one) is requested.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when none (or a non-positive one) is requested.
pub const DEFAULT_PER_PAGE: u64 = 15;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive parse; anything other than `asc`/`desc` is `Desc`.
    pub fn parse_lenient(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A filter value that can be "empty" (and is then ignored).
pub trait SearchFilter: Clone + Send + Sync {
    fn is_blank(&self) -> bool;
}

impl SearchFilter for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Raw, un-normalized search request as a caller supplies it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchInput<F = String> {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort: Option<String>,
    pub sort_dir: Option<String>,
    pub filter: Option<F>,
}

impl<F> Default for SearchInput<F> {
    fn default() -> Self {
        Self {
            page: None,
            per_page: None,
            sort: None,
            sort_dir: None,
            filter: None,
        }
    }
}

/// Normalized search request.
///
/// # Normalization
///
/// - `page`: defaults to 1; non-positive values become 1
/// - `per_page`: defaults to 15; non-positive values become 15
/// - `sort`: `None` unless a non-empty field name is given
/// - `sort_dir`: always `None` without a sort field; otherwise `asc`/`desc`
///   (case-insensitive), any other value meaning `desc`
/// - `filter`: `None` unless a non-blank value is given
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams<F = String> {
    page: u64,
    per_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<F>,
}

impl<F: SearchFilter> SearchParams<F> {
    pub fn new(input: SearchInput<F>) -> Self {
        let sort = input.sort.filter(|field| !field.is_empty());
        let sort_dir = sort.as_ref().map(|_| {
            input
                .sort_dir
                .as_deref()
                .map_or(SortDirection::Desc, SortDirection::parse_lenient)
        });

        Self {
            page: positive_or(input.page, DEFAULT_PAGE),
            per_page: positive_or(input.per_page, DEFAULT_PER_PAGE),
            sort,
            sort_dir,
            filter: input.filter.filter(|value| !value.is_blank()),
        }
    }
}

impl<F> SearchParams<F> {
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&F> {
        self.filter.as_ref()
    }

    /// Number of items skipped before the requested page.
    ///
    /// Capped at `i64::MAX` so it always fits a SQL `OFFSET`.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.per_page)
            .min(i64::MAX as u64)
    }

    /// Sort actually applied: the requested field when it is in `sortable`,
    /// otherwise `fallback`.
    pub fn effective_sort(
        &self,
        sortable: &'static [&'static str],
        fallback: (&'static str, SortDirection),
    ) -> (&'static str, SortDirection) {
        let requested = self
            .sort
            .as_deref()
            .and_then(|field| sortable.iter().copied().find(|allowed| *allowed == field));

        match requested {
            Some(field) => (field, self.sort_dir.unwrap_or(SortDirection::Desc)),
            None => fallback,
        }
    }
}

impl<F: SearchFilter> Default for SearchParams<F> {
    fn default() -> Self {
        Self::new(SearchInput::default())
    }
}

fn positive_or(value: Option<i64>, default: u64) -> u64 {
    match value {
        Some(v) if v > 0 => v as u64,
        _ => default,
    }
}

/// One page of search results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<E, F = String> {
    pub items: Vec<E>,
    /// Number of matches before pagination.
    pub total: u64,
    pub current_page: u64,
    pub per_page: u64,
    /// `ceil(total / per_page)`; zero when nothing matched.
    pub last_page: u64,
    pub sort: Option<String>,
    pub sort_dir: Option<SortDirection>,
    pub filter: Option<F>,
}

impl<E, F> SearchResult<E, F> {
    /// Builds a result for `params`, echoing its paging, sort and filter.
    pub fn new(items: Vec<E>, total: u64, params: SearchParams<F>) -> Self {
        Self {
            items,
            total,
            current_page: params.page,
            per_page: params.per_page,
            last_page: total.div_ceil(params.per_page),
            sort: params.sort,
            sort_dir: params.sort_dir,
            filter: params.filter,
        }
    }

    /// Converts every item, keeping the metadata.
    pub fn map_items<T>(self, f: impl FnMut(E) -> T) -> SearchResult<T, F> {
        SearchResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
            sort: self.sort,
            sort_dir: self.sort_dir,
            filter: self.filter,
        }
    }
}
