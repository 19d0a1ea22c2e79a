use serde::Serialize;

/// Rows per page when nothing else is configured.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Pages shown on each side of the current one.
const PAGE_WINDOW_RADIUS: usize = 2;

/// Page buttons to show: first and last page plus a window around the
/// current one. `None` marks an ellipsis.
fn page_window(total_pages: usize, current_page: usize, radius: usize) -> Vec<Option<usize>> {
    let mut pages = Vec::new();
    let mut last_shown = 0;

    for page in 1..=total_pages {
        let visible = page == 1 || page == total_pages || page.abs_diff(current_page) <= radius;
        if !visible {
            continue;
        }
        if page > last_shown + 1 {
            pages.push(None);
        }
        pages.push(Some(page));
        last_shown = page;
    }

    pages
}

/// One page of items plus what the pager needs to render itself.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    /// 1-based current page.
    pub page: usize,
    pub per_page: usize,
    /// Zero when there are no items.
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Paginated<T> {
    pub fn new(
        items: Vec<T>,
        current_page: usize,
        per_page: usize,
        total_items: usize,
    ) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };
        let per_page = per_page.max(1);
        let total_pages = total_items.div_ceil(per_page);

        let pages = page_window(total_pages, current_page, PAGE_WINDOW_RADIUS);

        Self {
            items,
            pages,
            page: current_page,
            per_page,
            total_pages,
            total_items,
        }
    }

    /// 1-based positions of the first and last item on this page.
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.per_page + 1;
        Some((first, first + self.items.len() - 1))
    }
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self::new(Vec::new(), 1, DEFAULT_ITEMS_PER_PAGE, 0)
    }
}
