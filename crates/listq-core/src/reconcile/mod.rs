//! Merging server-reported pagination with what was requested locally.
use listq_model::{Filters, PageRequest, Pagination, ServerPagination};

/// Authoritative pagination for a fetched page.
///
/// Fields reported by the server win. Missing fields fall back to the
/// requested page/size, `item_count` for the total, and a computed page count.
/// Server values that would break `page_index >= 1` / `page_size > 0` are
/// treated as missing.
pub fn reconcile(
    requested: PageRequest,
    server: Option<&ServerPagination>,
    item_count: usize,
) -> Pagination {
    let server = server.cloned().unwrap_or_default();

    let page_index = server
        .current_page
        .filter(|p| *p >= 1)
        .unwrap_or(requested.index);
    let page_size = server.limit.filter(|l| *l > 0).unwrap_or(requested.size);
    let total_items = server.total_items.unwrap_or(item_count);
    let total_pages = server
        .total_pages
        .unwrap_or_else(|| Pagination::pages_for(total_items, page_size));

    Pagination {
        page_index,
        page_size,
        total_items,
        total_pages,
    }
}

/// Structural comparison of two normalized filter sets.
#[inline]
pub fn filters_changed(prev: &Filters, next: &Filters) -> bool {
    prev != next
}

/// Writes `next` into `slot` only when it differs. Returns whether it wrote.
pub fn replace_if_changed(slot: &mut Pagination, next: Pagination) -> bool {
    if *slot == next {
        return false;
    }
    *slot = next;
    true
}
