//! List Query State
//!
//! Coordinates a search bar, a server-driven page cursor and the derived
//! display fields (row numbering, visible range) of a paginated list page.
//!
//! The state is pure: the caller turns [`ListQuery::request`] into a network
//! call and feeds the server's answer back through [`ListQuery::apply`].
//! Every mutating operation reports whether a new fetch is due.

use std::collections::BTreeMap;

/// Rows per page when the caller has no preference
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page sizes offered by the pagination widget
pub const PAGE_SIZE_CHOICES: &[u32] = &[10, 25, 50, 100];

/// Snapshot of one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Sequence number used to match the response to this request
    pub seq: u64,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl PageRequest {
    /// Query parameters in wire order, skipping filters that the caller
    /// already placed in the URL path.
    pub fn query_pairs(&self, exclude: &[&str]) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.page_size.to_string()),
        ];
        if let Some(term) = &self.search {
            pairs.push(("search".to_string(), term.clone()));
        }
        for (key, value) in &self.filters {
            if !exclude.contains(&key.as_str()) {
                pairs.push((key.clone(), value.clone()));
            }
        }
        pairs
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }
}

/// Pagination facts reported by the server for one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMeta {
    /// Rows actually returned
    pub rows: usize,
    pub total_pages: Option<u32>,
    pub total_count: Option<u64>,
}

/// Result of feeding a response back into the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Rows belong to the current cursor; display them
    Applied,
    /// Cursor was past the last page and has been moved back; fetch again
    Refetch,
    /// Response to an older request; drop it
    Stale,
}

/// One entry of the pagination button strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLink {
    Page(u32),
    Gap,
}

/// Total pages, falling back to what the received page implies when the
/// server leaves the total out.
///
/// A full page means there may be more (open-ended), a partial page is the
/// last one, and an empty page means the previous page was the last.
pub fn derive_total_pages(
    total_pages: Option<u32>,
    total_count: Option<u64>,
    page: u32,
    page_size: u32,
    rows: usize,
) -> u32 {
    if let Some(total) = total_pages {
        return total;
    }
    if let Some(count) = total_count {
        if page_size == 0 {
            return 0;
        }
        let size = u64::from(page_size);
        return u32::try_from(count.div_ceil(size)).unwrap_or(u32::MAX);
    }
    if rows == 0 {
        page.saturating_sub(1)
    } else if rows >= page_size as usize {
        page.saturating_add(1)
    } else {
        page
    }
}

/// Search, filter and page cursor of one list page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    page_size: u32,
    search_input: String,
    search: String,
    filters: BTreeMap<String, String>,
    total_pages: u32,
    total_count: Option<u64>,
    row_count: usize,
    loaded: bool,
    next_seq: u64,
    pending: Option<u64>,
    /// Lowest page seen empty while the server sends no totals. Caps the
    /// inferred page count until the query changes.
    empty_from: Option<u32>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search_input: String::new(),
            search: String::new(),
            filters: BTreeMap::new(),
            total_pages: 0,
            total_count: None,
            row_count: 0,
            loaded: false,
            next_seq: 0,
            pending: None,
            empty_from: None,
        }
    }

    /// Builder form of [`ListQuery::set_filter`]
    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.set_filter(key, value);
        self
    }

    // ========================
    // Accessors
    // ========================

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Term currently applied to the server query (may differ from the bar)
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// True once any response has been applied
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    // ========================
    // Search and filters
    // ========================

    /// Edit the search bar contents without requesting anything
    pub fn set_search_input(&mut self, text: &str) {
        self.search_input = text.to_string();
    }

    /// Apply the bar contents. Returns true when the applied term changed,
    /// in which case the cursor is back on page 1.
    pub fn submit_search(&mut self) -> bool {
        let term = self.search_input.trim();
        if term == self.search {
            return false;
        }
        self.search = term.to_string();
        self.restart();
        true
    }

    pub fn clear_search(&mut self) -> bool {
        self.search_input.clear();
        self.submit_search()
    }

    /// Set or (with an empty value) remove a filter
    pub fn set_filter(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        let changed = if value.is_empty() {
            self.filters.remove(key).is_some()
        } else if self.filter(key) == Some(value) {
            false
        } else {
            self.filters.insert(key.to_string(), value.to_string());
            true
        };
        if changed {
            self.restart();
        }
        changed
    }

    // ========================
    // Cursor
    // ========================

    /// Move to `page`, clamped to the known page range
    pub fn go_to(&mut self, page: u32) -> bool {
        let mut target = page.max(1);
        if self.total_pages > 0 {
            target = target.min(self.total_pages);
        }
        if target == self.page {
            return false;
        }
        self.page = target;
        true
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn next(&mut self) -> bool {
        self.has_next() && self.go_to(self.page + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.has_prev() && self.go_to(self.page - 1)
    }

    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    pub fn last(&mut self) -> bool {
        self.total_pages > 0 && self.go_to(self.total_pages)
    }

    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        if page_size == 0 || page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.restart();
        true
    }

    // ========================
    // Request / response
    // ========================

    /// Snapshot the current query and mark it in flight. Any response to an
    /// earlier request becomes stale.
    pub fn request(&mut self) -> PageRequest {
        self.next_seq += 1;
        self.pending = Some(self.next_seq);
        let search = (!self.search.is_empty()).then(|| self.search.clone());
        PageRequest {
            seq: self.next_seq,
            page: self.page,
            page_size: self.page_size,
            search,
            filters: self.filters.clone(),
        }
    }

    pub fn apply(&mut self, seq: u64, meta: PageMeta) -> Outcome {
        if self.pending != Some(seq) {
            return Outcome::Stale;
        }
        self.pending = None;
        self.loaded = true;
        self.row_count = meta.rows;

        let inferred = meta.total_pages.is_none() && meta.total_count.is_none();
        if inferred {
            self.track_empty_pages(meta.rows);
        }
        let mut total_pages = derive_total_pages(
            meta.total_pages,
            meta.total_count,
            self.page,
            self.page_size,
            meta.rows,
        );
        if let (true, Some(empty)) = (inferred, self.empty_from) {
            total_pages = total_pages.min(empty - 1);
        }
        self.total_pages = total_pages;
        self.total_count = meta.total_count.or_else(|| self.implied_total(meta.rows));

        if meta.rows == 0 && self.page > 1 && self.page > self.total_pages {
            self.page = self.total_pages.max(1);
            return Outcome::Refetch;
        }
        Outcome::Applied
    }

    /// The latest request failed; stop showing it as loading
    pub fn fail(&mut self, seq: u64) {
        if self.pending == Some(seq) {
            self.pending = None;
        }
    }

    /// Back to page 1 of a new result set
    fn restart(&mut self) {
        self.page = 1;
        self.empty_from = None;
    }

    fn track_empty_pages(&mut self, rows: usize) {
        if rows == 0 && self.page > 1 {
            self.empty_from = Some(self.empty_from.map_or(self.page, |p| p.min(self.page)));
        }
    }

    /// Exact total known when the server omits the count: from a short
    /// page, or a full page whose next page came back empty
    fn implied_total(&self, rows: usize) -> Option<u64> {
        let short = rows < self.page_size as usize;
        let empty_tail = rows == 0 && self.page > 1;
        let full_before_empty = !short && self.empty_from == Some(self.page + 1);
        ((short && !empty_tail) || full_before_empty).then(|| self.offset() + rows as u64)
    }

    // ========================
    // Derived display fields
    // ========================

    fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// 1-based serial number of the row at `index` on the current page
    pub fn serial(&self, index: usize) -> u64 {
        self.offset() + index as u64 + 1
    }

    /// First and last serial numbers on the current page
    pub fn visible_range(&self) -> Option<(u64, u64)> {
        if self.row_count == 0 {
            return None;
        }
        let start = self.serial(0);
        Some((start, start + self.row_count as u64 - 1))
    }

    pub fn range_label(&self) -> String {
        match (self.visible_range(), self.total_count) {
            (None, _) => "No records found".to_string(),
            (Some((start, end)), Some(total)) => format!("Showing {start}-{end} of {total}"),
            (Some((start, end)), None) => format!("Showing {start}-{end}"),
        }
    }

    /// Page buttons around the cursor, always including the first and last
    /// page, with gaps where pages are skipped.
    pub fn page_window(&self, width: u32) -> Vec<PageLink> {
        let total = self.total_pages;
        if total == 0 {
            return Vec::new();
        }
        let width = width.max(1);
        let mut start = self.page.saturating_sub(width / 2).max(1);
        let end = (start + width - 1).min(total);
        start = end.saturating_sub(width - 1).max(1);

        let mut links = Vec::new();
        if start > 1 {
            links.push(PageLink::Page(1));
            if start > 2 {
                links.push(PageLink::Gap);
            }
        }
        links.extend((start..=end).map(PageLink::Page));
        if end < total {
            if end + 1 < total {
                links.push(PageLink::Gap);
            }
            links.push(PageLink::Page(total));
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(page_size: u32, total_pages: u32, total_count: u64) -> ListQuery {
        let mut q = ListQuery::new(page_size);
        let req = q.request();
        q.apply(
            req.seq,
            PageMeta {
                rows: page_size as usize,
                total_pages: Some(total_pages),
                total_count: Some(total_count),
            },
        );
        q
    }

    /// Request the current page and answer it with `rows` and no totals
    fn answer_without_totals(q: &mut ListQuery, rows: usize) -> Outcome {
        let req = q.request();
        q.apply(req.seq, PageMeta { rows, ..Default::default() })
    }

    #[test]
    fn empty_page_caps_inferred_total_after_stepping_back() {
        let mut q = ListQuery::new(10);
        assert_eq!(answer_without_totals(&mut q, 10), Outcome::Applied);
        assert!(q.has_next());

        assert!(q.next());
        assert_eq!(answer_without_totals(&mut q, 0), Outcome::Refetch);
        assert_eq!(q.page(), 1);

        assert_eq!(answer_without_totals(&mut q, 10), Outcome::Applied);
        assert_eq!(q.total_pages(), 1);
        assert!(!q.has_next());
        assert_eq!(q.total_count(), Some(10));
        assert_eq!(q.range_label(), "Showing 1-10 of 10");
    }

    #[test]
    fn empty_page_bound_resets_with_new_query() {
        let mut q = ListQuery::new(10);
        answer_without_totals(&mut q, 10);
        q.next();
        answer_without_totals(&mut q, 0);
        answer_without_totals(&mut q, 10);
        assert!(!q.has_next());

        q.set_search_input("shah");
        assert!(q.submit_search());
        answer_without_totals(&mut q, 10);
        assert_eq!(q.total_pages(), 2);
        assert!(q.has_next());
    }

    #[test]
    fn reload_repeats_the_same_page_and_drops_the_older_answer() {
        let mut q = loaded(10, 5, 45).with_filter("status", "booked");
        assert!(q.go_to(3));
        let first = q.request();
        let again = q.request();
        assert!(again.seq > first.seq);
        assert_eq!(again.page, 3);
        assert_eq!(again.query_pairs(&[]), first.query_pairs(&[]));

        let meta = PageMeta { rows: 10, total_pages: Some(5), total_count: Some(45) };
        assert_eq!(q.apply(first.seq, meta), Outcome::Stale);
        assert_eq!(q.apply(again.seq, meta), Outcome::Applied);
        assert_eq!(q.page(), 3);
    }

    #[test]
    fn submit_search_resets_page_and_trims() {
        let mut q = loaded(10, 5, 45);
        assert!(q.go_to(3));
        q.set_search_input("  acme ");
        assert!(q.submit_search());
        assert_eq!(q.page(), 1);
        assert_eq!(q.search(), "acme");

        // Same term again is not a new query
        q.set_search_input("acme");
        assert!(!q.submit_search());
    }

    #[test]
    fn typing_alone_does_not_change_applied_search() {
        let mut q = ListQuery::new(10);
        q.set_search_input("pune");
        assert_eq!(q.search(), "");
        assert_eq!(q.request().search, None);
    }

    #[test]
    fn clear_search_only_refetches_when_something_was_applied() {
        let mut q = ListQuery::new(10);
        assert!(!q.clear_search());
        q.set_search_input("x");
        q.submit_search();
        assert!(q.clear_search());
        assert_eq!(q.search_input(), "");
    }

    #[test]
    fn filters_reset_page_and_empty_value_removes() {
        let mut q = loaded(10, 4, 40);
        q.go_to(2);
        assert!(q.set_filter("date", "2024-03-05"));
        assert_eq!(q.page(), 1);
        assert!(!q.set_filter("date", "2024-03-05"));
        assert!(q.set_filter("date", ""));
        assert_eq!(q.filter("date"), None);
        assert!(!q.set_filter("date", "  "));
    }

    #[test]
    fn go_to_clamps_to_known_pages() {
        let mut q = loaded(10, 3, 25);
        assert!(q.go_to(99));
        assert_eq!(q.page(), 3);
        assert!(!q.next());
        assert!(q.go_to(0));
        assert_eq!(q.page(), 1);
        assert!(!q.prev());
        assert!(q.last());
        assert_eq!(q.page(), 3);
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let mut q = loaded(10, 3, 25);
        q.go_to(2);
        assert!(q.set_page_size(25));
        assert_eq!(q.page(), 1);
        assert!(!q.set_page_size(25));
        assert!(!q.set_page_size(0));
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut q = ListQuery::new(10);
        let first = q.request();
        q.set_search_input("abc");
        q.submit_search();
        let second = q.request();

        let meta = PageMeta { rows: 3, total_pages: Some(1), total_count: Some(3) };
        assert_eq!(q.apply(first.seq, meta), Outcome::Stale);
        assert!(q.is_loading());
        assert_eq!(q.apply(second.seq, meta), Outcome::Applied);
        assert!(!q.is_loading());
        assert_eq!(q.row_count(), 3);
    }

    #[test]
    fn failing_an_old_request_keeps_the_new_one_loading() {
        let mut q = ListQuery::new(10);
        let first = q.request();
        let second = q.request();
        q.fail(first.seq);
        assert!(q.is_loading());
        q.fail(second.seq);
        assert!(!q.is_loading());
    }

    #[test]
    fn total_pages_fallbacks() {
        assert_eq!(derive_total_pages(Some(7), Some(1000), 1, 10, 10), 7);
        assert_eq!(derive_total_pages(None, Some(45), 1, 10, 10), 5);
        assert_eq!(derive_total_pages(None, Some(40), 1, 10, 10), 4);
        assert_eq!(derive_total_pages(None, Some(0), 1, 10, 0), 0);
        // No totals at all: infer from the page we got
        assert_eq!(derive_total_pages(None, None, 2, 10, 10), 3);
        assert_eq!(derive_total_pages(None, None, 2, 10, 4), 2);
        assert_eq!(derive_total_pages(None, None, 3, 10, 0), 2);
        assert_eq!(derive_total_pages(None, None, 1, 10, 0), 0);
    }

    #[test]
    fn empty_page_past_the_end_steps_back() {
        // Last row of page 3 was deleted; server now has 2 pages
        let mut q = loaded(10, 3, 21);
        q.go_to(3);
        let req = q.request();
        let outcome = q.apply(req.seq, PageMeta { rows: 0, total_pages: Some(2), total_count: Some(20) });
        assert_eq!(outcome, Outcome::Refetch);
        assert_eq!(q.page(), 2);
    }

    #[test]
    fn serials_follow_page_offset() {
        let mut q = loaded(10, 5, 45);
        assert_eq!(q.serial(0), 1);
        q.go_to(3);
        let req = q.request();
        q.apply(req.seq, PageMeta { rows: 10, total_pages: Some(5), total_count: Some(45) });
        assert_eq!(q.serial(0), 21);
        assert_eq!(q.serial(9), 30);
        assert_eq!(q.visible_range(), Some((21, 30)));
        assert_eq!(q.range_label(), "Showing 21-30 of 45");
    }

    #[test]
    fn range_label_without_server_count() {
        let mut q = ListQuery::new(10);
        q.go_to(2);
        let req = q.request();
        q.apply(req.seq, PageMeta { rows: 10, total_pages: None, total_count: None });
        assert_eq!(q.range_label(), "Showing 11-20");
        assert!(q.has_next());

        // A short page pins down the total
        q.next();
        let req = q.request();
        q.apply(req.seq, PageMeta { rows: 4, total_pages: None, total_count: None });
        assert_eq!(q.total_count(), Some(24));
        assert_eq!(q.range_label(), "Showing 21-24 of 24");
        assert!(!q.has_next());
    }

    #[test]
    fn empty_result_label() {
        let mut q = ListQuery::new(10);
        let req = q.request();
        q.apply(req.seq, PageMeta::default());
        assert_eq!(q.range_label(), "No records found");
        assert_eq!(q.total_pages(), 0);
        assert!(q.page_window(5).is_empty());
    }

    #[test]
    fn query_pairs_skip_path_filters() {
        let mut q = ListQuery::new(25)
            .with_filter("date", "2024-01-31")
            .with_filter("warehouse", "PUN");
        q.set_search_input("LR-1");
        q.submit_search();
        let req = q.request();
        assert_eq!(req.filter("date"), Some("2024-01-31"));
        let pairs = req.query_pairs(&["date"]);
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["page", "limit", "search", "warehouse"]);
        assert_eq!(pairs[1].1, "25");
    }

    #[test]
    fn page_window_with_gaps() {
        use PageLink::{Gap, Page};

        let mut q = loaded(10, 10, 100);
        q.go_to(5);
        assert_eq!(q.page_window(3), vec![Page(1), Gap, Page(4), Page(5), Page(6), Gap, Page(10)]);

        q.first();
        assert_eq!(q.page_window(3), vec![Page(1), Page(2), Page(3), Gap, Page(10)]);

        q.last();
        assert_eq!(q.page_window(3), vec![Page(1), Gap, Page(8), Page(9), Page(10)]);

        let small = loaded(10, 2, 15);
        assert_eq!(small.page_window(5), vec![Page(1), Page(2)]);
    }
}
