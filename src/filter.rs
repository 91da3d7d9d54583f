//! Client-side filtering and page windowing
//!
//! Both steps are pure and recomputed on every render. Filtering keeps the
//! original order; windowing never resets the page.

use crate::product::Product;
use std::ops::Range;

/// Check if a product matches an already-lowercased query.
///
/// Title, description and the printed price are searched by plain
/// substring, so `"1"` matches a price of `10` or `1.99`.
pub fn matches(product: &Product, query_lower: &str) -> bool {
    if query_lower.is_empty() {
        return true;
    }
    product.title.to_lowercase().contains(query_lower)
        || product.description.to_lowercase().contains(query_lower)
        || product.price_text().to_lowercase().contains(query_lower)
}

/// Products matching `query` (case-insensitive), in their original order
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query_lower = query.to_lowercase();
    products
        .iter()
        .filter(|p| matches(p, &query_lower))
        .collect()
}

/// Index range `[(page-1)*page_size, page*page_size)` for a 1-based page.
///
/// Page 0 has no window.
pub fn page_window(page: usize, page_size: usize) -> Range<usize> {
    if page == 0 {
        return 0..0;
    }
    let end = page.saturating_mul(page_size);
    end.saturating_sub(page_size)..end
}

/// Slice the page window out of `items`; a window past the end is empty
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let window = page_window(page, page_size);
    let start = window.start.min(items.len());
    let end = window.end.min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
