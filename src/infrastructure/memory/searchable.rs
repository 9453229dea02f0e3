//! Filter, sort and paginate over an in-memory collection.

use std::cmp::Ordering;

use crate::domain::repositories::{SearchParams, SearchResult, SortDirection};

/// An entity the in-memory search engine can filter and order.
pub trait Searchable: Clone {
    /// Returns true if the entity matches a non-blank filter value.
    fn matches_filter(&self, filter: &str) -> bool;

    /// Compares two entities on a field from the sortable allow-list.
    fn compare_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Runs a search over `items`.
///
/// Steps, in this order: filter, count, sort, slice the page. Sorting is
/// stable, so items comparing equal keep their order in `items`. A sort
/// field outside `sortable` falls back to `fallback`.
pub fn search_in_memory<E: Searchable>(
    items: &[E],
    params: SearchParams,
    sortable: &'static [&'static str],
    fallback: (&'static str, SortDirection),
) -> SearchResult<E> {
    let mut matches: Vec<&E> = match params.filter() {
        Some(filter) => items.iter().filter(|e| e.matches_filter(filter)).collect(),
        None => items.iter().collect(),
    };
    let total = matches.len() as u64;

    let (field, direction) = params.effective_sort(sortable, fallback);
    matches.sort_by(|a, b| {
        let ordering = a.compare_field(b, field);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let page = matches
        .into_iter()
        .skip(usize::try_from(params.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(params.per_page()).unwrap_or(usize::MAX))
        .cloned()
        .collect();

    SearchResult::new(page, total, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::SearchInput;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        rank: u32,
    }

    impl Searchable for Item {
        fn matches_filter(&self, filter: &str) -> bool {
            self.name.to_lowercase().contains(&filter.to_lowercase())
        }

        fn compare_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "rank" => self.rank.cmp(&other.rank),
                _ => self.name.cmp(other.name),
            }
        }
    }

    const SORTABLE: &[&str] = &["name", "rank"];
    const FALLBACK: (&str, SortDirection) = ("rank", SortDirection::Desc);

    fn items() -> Vec<Item> {
        vec![
            Item { name: "alpha", rank: 2 },
            Item { name: "Beta", rank: 1 },
            Item { name: "gamma", rank: 2 },
            Item { name: "delta", rank: 3 },
        ]
    }

    fn names(result: &SearchResult<Item>) -> Vec<&'static str> {
        result.items.iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_fallback_sort_is_stable() {
        let result = search_in_memory(&items(), SearchParams::default(), SORTABLE, FALLBACK);

        assert_eq!(names(&result), ["delta", "alpha", "gamma", "Beta"]);
        assert_eq!(result.total, 4);
        assert_eq!(result.sort, None);
    }

    #[test]
    fn test_requested_sort() {
        let params = SearchParams::new(SearchInput {
            sort: Some("name".to_string()),
            sort_dir: Some("asc".to_string()),
            ..Default::default()
        });

        let result = search_in_memory(&items(), params, SORTABLE, FALLBACK);

        assert_eq!(names(&result), ["Beta", "alpha", "delta", "gamma"]);
    }

    #[test]
    fn test_unknown_sort_falls_back_but_is_echoed() {
        let params = SearchParams::new(SearchInput {
            sort: Some("colour".to_string()),
            sort_dir: Some("asc".to_string()),
            ..Default::default()
        });

        let result = search_in_memory(&items(), params, SORTABLE, FALLBACK);

        assert_eq!(names(&result), ["delta", "alpha", "gamma", "Beta"]);
        assert_eq!(result.sort.as_deref(), Some("colour"));
        assert_eq!(result.sort_dir, Some(SortDirection::Asc));
    }

    #[test]
    fn test_largest_page_is_empty() {
        let params = SearchParams::new(SearchInput {
            page: Some(i64::MAX),
            ..Default::default()
        });

        let result = search_in_memory(&items(), params, SORTABLE, FALLBACK);

        assert!(result.items.is_empty());
        assert_eq!(result.total, 4);
        assert_eq!(result.current_page, i64::MAX as u64);
    }

    #[test]
    fn test_filter_runs_before_count_and_paging() {
        let params = SearchParams::new(SearchInput {
            per_page: Some(1),
            page: Some(2),
            filter: Some("A".to_string()),
            sort: Some("name".to_string()),
            sort_dir: Some("asc".to_string()),
        });

        let result = search_in_memory(&items(), params, SORTABLE, FALLBACK);

        // every name contains an "a": Beta, alpha, delta, gamma
        assert_eq!(result.total, 4);
        assert_eq!(result.last_page, 4);
        assert_eq!(names(&result), ["alpha"]);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let params = SearchParams::new(SearchInput {
            page: Some(9),
            ..Default::default()
        });

        let result = search_in_memory(&items(), params, SORTABLE, FALLBACK);

        assert!(result.items.is_empty());
        assert_eq!(result.total, 4);
        assert_eq!(result.current_page, 9);
        assert_eq!(result.last_page, 1);
    }

    #[test]
    fn test_no_match() {
        let params = SearchParams::new(SearchInput {
            filter: Some("zzz".to_string()),
            ..Default::default()
        });

        let result = search_in_memory(&items(), params, SORTABLE, FALLBACK);

        assert!(result.items.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.last_page, 0);
    }
}
