// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::request::{AsyncRequestState, RequestPhase, RequestToken};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Query-string pairs in the order the backend documents them:
    /// `page`, `limit`, then filters by name.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_owned(), self.page.to_string()),
            ("limit".to_owned(), self.page_size.to_string()),
        ];
        params.extend(
            self.filters
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub token: RequestToken,
    pub query: ListQuery,
}

/// One page as reported by a list endpoint, after the adapter folded the
/// backend's response shapes together.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total_pages: Option<u32>,
    pub total: Option<u64>,
}

impl<T> ListPage<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            total_pages: None,
            total: None,
        }
    }

    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.total_pages = Some(total_pages);
        self
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Reported page count, else derived from the item total, else one.
    pub fn page_count(&self, page_size: u32) -> u32 {
        let derived = self.total.map(|total| {
            let size = u64::from(page_size.max(1));
            u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX)
        });
        self.total_pages.or(derived).unwrap_or(1).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub total_pages: u32,
    pub total: Option<u64>,
}

/// Issues list fetches. Replies come back later through
/// [`ListResource::apply`].
pub trait ListEndpoint<T> {
    fn fetch(&mut self, request: ListRequest);
}

/// Anything that can re-issue its current fetch.
pub trait Refresh {
    fn refresh(&mut self) -> RequestToken;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListUpdate {
    Loaded,
    /// The reply reported fewer pages than the current page; a fetch for
    /// the last existing page has been issued.
    Clamped {
        page: u32,
        token: RequestToken,
    },
    Failed,
    Stale,
}

pub struct ListResource<T, E> {
    endpoint: E,
    items: Vec<T>,
    page: u32,
    page_size: u32,
    total_pages: Option<u32>,
    filters: BTreeMap<String, String>,
    request: AsyncRequestState<PageInfo>,
    stale: bool,
    failure_message: String,
}

impl<T, E: ListEndpoint<T>> ListResource<T, E> {
    pub fn new(endpoint: E, page_size: u32) -> Self {
        Self {
            endpoint,
            items: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            total_pages: None,
            filters: BTreeMap::new(),
            request: AsyncRequestState::new(),
            stale: false,
            failure_message: "Failed to fetch items".to_owned(),
        }
    }

    pub fn with_failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = message.into();
        self
    }

    /// Returns `None` for page zero or the page already shown. Once the
    /// page count is known, larger pages clamp to the last one.
    pub fn set_page(&mut self, page: u32) -> Option<RequestToken> {
        let page = self.total_pages.map_or(page, |total| page.min(total));
        if page < 1 || page == self.page {
            return None;
        }
        self.page = page;
        Some(self.fetch())
    }

    pub fn next_page(&mut self) -> Option<RequestToken> {
        if !self.has_next_page() {
            return None;
        }
        self.set_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<RequestToken> {
        if !self.has_prev_page() {
            return None;
        }
        self.set_page(self.page - 1)
    }

    /// Page numbering shifts with the size, so this goes back to page 1.
    pub fn set_page_size(&mut self, page_size: u32) -> Option<RequestToken> {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return None;
        }
        self.page_size = page_size;
        self.page = 1;
        self.total_pages = None;
        Some(self.fetch())
    }

    pub fn set_filter(&mut self, name: &str, value: impl Into<String>) -> RequestToken {
        self.filters.insert(name.to_owned(), value.into());
        self.page = 1;
        self.fetch()
    }

    pub fn clear_filter(&mut self, name: &str) -> Option<RequestToken> {
        self.filters.remove(name)?;
        self.page = 1;
        Some(self.fetch())
    }

    pub fn refresh(&mut self) -> RequestToken {
        self.fetch()
    }

    pub fn apply(&mut self, token: RequestToken, result: Result<ListPage<T>, ApiError>) -> ListUpdate {
        if !self.request.is_current(token) {
            tracing::debug!(%token, current = %self.request.token(), "dropping stale list reply");
            return ListUpdate::Stale;
        }

        match result {
            Ok(page) => {
                let total_pages = page.page_count(self.page_size);
                self.total_pages = Some(total_pages);
                if self.page > total_pages {
                    self.page = total_pages;
                    let token = self.fetch();
                    return ListUpdate::Clamped {
                        page: total_pages,
                        token,
                    };
                }
                self.request.resolve(
                    token,
                    PageInfo {
                        total_pages,
                        total: page.total,
                    },
                );
                self.items = page.items;
                self.stale = false;
                ListUpdate::Loaded
            }
            Err(error) => {
                let message = error.user_message(&self.failure_message);
                tracing::debug!(%token, %error, "list fetch failed");
                self.request.reject(token, message);
                ListUpdate::Failed
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// One until a reply says otherwise.
    pub fn total_pages(&self) -> u32 {
        self.total_pages.unwrap_or(1)
    }

    pub fn total(&self) -> Option<u64> {
        self.request.data().and_then(|info| info.total)
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    pub fn phase(&self) -> RequestPhase {
        self.request.phase()
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_pending()
    }

    /// Items belong to an older query than the one on screen.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn error_message(&self) -> Option<&str> {
        self.request.error_message()
    }

    pub fn dismiss_error(&mut self) -> bool {
        self.request.dismiss_error()
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            page_size: self.page_size,
            filters: self.filters.clone(),
        }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn endpoint_mut(&mut self) -> &mut E {
        &mut self.endpoint
    }

    fn fetch(&mut self) -> RequestToken {
        let token = self.request.start();
        self.stale = true;
        let query = self.query();
        tracing::debug!(%token, page = query.page, limit = query.page_size, "list fetch");
        self.endpoint.fetch(ListRequest { token, query });
        token
    }
}

impl<T, E: ListEndpoint<T>> Refresh for ListResource<T, E> {
    fn refresh(&mut self) -> RequestToken {
        self.fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::{ListEndpoint, ListPage, ListQuery, ListRequest, ListResource, ListUpdate};
    use crate::error::ApiError;
    use crate::request::RequestPhase;
    use std::collections::BTreeMap;

    #[derive(Debug, Default)]
    struct Recorder {
        requests: Vec<ListRequest>,
    }

    impl ListEndpoint<u32> for Recorder {
        fn fetch(&mut self, request: ListRequest) {
            self.requests.push(request);
        }
    }

    fn resource() -> ListResource<u32, Recorder> {
        ListResource::new(Recorder::default(), 10)
    }

    #[test]
    fn params_put_page_and_limit_first() {
        let mut filters = BTreeMap::new();
        filters.insert("status".to_owned(), "approved".to_owned());
        filters.insert("search".to_owned(), "acme".to_owned());
        let query = ListQuery {
            page: 2,
            page_size: 10,
            filters,
        };
        let params = query.params();
        assert_eq!(params[0], ("page".to_owned(), "2".to_owned()));
        assert_eq!(params[1], ("limit".to_owned(), "10".to_owned()));
        assert_eq!(params[2].0, "search");
        assert_eq!(params[3].0, "status");
    }

    #[test]
    fn page_count_prefers_reported_pages_then_total() {
        assert_eq!(ListPage::<u32>::new(vec![]).with_total_pages(3).page_count(10), 3);
        assert_eq!(ListPage::<u32>::new(vec![]).with_total(21).page_count(10), 3);
        assert_eq!(ListPage::<u32>::new(vec![]).with_total(0).page_count(10), 1);
        assert_eq!(ListPage::<u32>::new(vec![]).page_count(10), 1);
    }

    #[test]
    fn same_page_and_page_zero_are_no_ops() {
        let mut list = resource();
        assert!(list.set_page(1).is_none());
        assert!(list.set_page(0).is_none());
        assert!(list.endpoint().requests.is_empty());
    }

    #[test]
    fn set_filter_resets_to_first_page() {
        let mut list = resource();
        let token = list.refresh();
        list.apply(token, Ok(ListPage::new(vec![1]).with_total_pages(5)));
        list.set_page(4);

        list.set_filter("status", "blocked");
        assert_eq!(list.page(), 1);
        let last = list.endpoint().requests.last().cloned();
        let query = last.map(|request| request.query);
        assert_eq!(
            query.and_then(|query| query.filters.get("status").cloned()),
            Some("blocked".to_owned())
        );
    }

    #[test]
    fn clear_filter_only_fetches_when_filter_was_set() {
        let mut list = resource();
        assert!(list.clear_filter("status").is_none());
        list.set_filter("status", "pending");
        assert!(list.clear_filter("status").is_some());
        assert_eq!(list.endpoint().requests.len(), 2);
        assert!(list.filter("status").is_none());
    }

    #[test]
    fn failure_keeps_previous_items_visible() {
        let mut list = resource();
        let token = list.refresh();
        list.apply(token, Ok(ListPage::new(vec![1, 2, 3])));

        let token = list.refresh();
        assert!(list.is_stale());
        let update = list.apply(token, Err(ApiError::Network("timed out".to_owned())));
        assert_eq!(update, ListUpdate::Failed);
        assert_eq!(list.items(), &[1, 2, 3]);
        assert_eq!(list.error_message(), Some("Network error"));
        assert_eq!(list.phase(), RequestPhase::Failed);
    }

    #[test]
    fn page_beyond_new_total_is_clamped_and_refetched() {
        let mut list = resource();
        let token = list.refresh();
        list.apply(token, Ok(ListPage::new(vec![1]).with_total_pages(5)));
        let token = list.set_page(5).unwrap_or_default();

        let update = list.apply(token, Ok(ListPage::new(vec![]).with_total_pages(2)));
        let ListUpdate::Clamped { page, token } = update else {
            panic!("expected clamp, got {update:?}");
        };
        assert_eq!(page, 2);
        assert_eq!(list.page(), 2);
        assert!(list.is_loading());

        let last = list.endpoint().requests.last().cloned();
        assert_eq!(last.map(|request| (request.token, request.query.page)), Some((token, 2)));
    }

    #[test]
    fn oversized_page_clamps_to_known_total() {
        let mut list = resource();
        let token = list.refresh();
        list.apply(token, Ok(ListPage::new(vec![1]).with_total_pages(5)));

        assert!(list.set_page(99).is_some());
        assert_eq!(list.page(), 5);
        assert!(list.page() <= list.total_pages());
        let last = list.endpoint().requests.last().cloned();
        assert_eq!(last.map(|request| request.query.page), Some(5));

        assert!(list.set_page(42).is_none());
        assert_eq!(list.endpoint().requests.len(), 2);
    }

    #[test]
    fn next_page_stops_at_last_page() {
        let mut list = resource();
        let token = list.refresh();
        list.apply(token, Ok(ListPage::new(vec![1]).with_total_pages(2)));

        assert!(list.next_page().is_some());
        assert!(list.next_page().is_none());
        assert!(list.prev_page().is_some());
        assert!(list.prev_page().is_none());
    }
}
