//! Incident list: filter, sort and page state plus its fetch lifecycle.

use crate::api::IncidentApi;
use crate::debounce::{Debouncer, Ticket, SEARCH_DEBOUNCE};
use crate::error::{messages, ApiError};
use crate::query::{Pager, QueryState, SortField};
use crate::request::{RequestId, RequestTracker};
use incident_model::{Incident, PageResult, Service, Severity, Status};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum ListView {
    Loading,
    Failed(&'static str),
    Loaded(Vec<Incident>),
}

/// A list request ready to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchTicket {
    pub id: RequestId,
    pub query: QueryState,
}

/// Owns the list view's state for as long as the view is mounted.
///
/// Mutations only mark the query dirty; [`ListController::poll_fetch`] turns
/// a dirty query into exactly one request, so several mutations made in one
/// event handler cost one fetch.
#[derive(Clone, Debug)]
pub struct ListController {
    query: QueryState,
    search_input: String,
    search: Debouncer<String>,
    requests: RequestTracker,
    view: ListView,
    total_pages: u32,
    dirty: bool,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(QueryState::default())
    }
}

impl ListController {
    pub fn new(query: QueryState) -> Self {
        Self {
            search_input: query.search.clone(),
            query,
            search: Debouncer::new(SEARCH_DEBOUNCE),
            requests: RequestTracker::new(),
            view: ListView::Loading,
            total_pages: 0,
            dirty: true,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// Raw search text as typed, ahead of the debounced query value.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn search_delay(&self) -> Duration {
        self.search.delay()
    }

    pub fn pager(&self) -> Pager {
        Pager {
            page: self.query.page,
            total_pages: self.total_pages,
        }
    }

    pub fn can_clear(&self) -> bool {
        !self.search_input.is_empty() || self.query.has_filters()
    }

    fn mutate(&mut self, f: impl FnOnce(&mut QueryState)) {
        let before = self.query.clone();
        f(&mut self.query);
        if self.query != before {
            self.dirty = true;
        }
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.mutate(|q| q.toggle_sort(field));
    }

    pub fn set_page(&mut self, page: u32) {
        self.mutate(|q| q.page = page);
    }

    pub fn next_page(&mut self) {
        if self.pager().can_next() {
            self.set_page(self.query.page + 1);
        }
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.query.page.saturating_sub(1));
    }

    pub fn set_size(&mut self, size: u32) {
        self.mutate(|q| q.set_size(size));
    }

    pub fn set_service(&mut self, service: Option<Service>) {
        self.mutate(|q| q.set_service(service));
    }

    pub fn set_severity(&mut self, severity: Option<Severity>) {
        self.mutate(|q| q.set_severity(severity));
    }

    pub fn set_status(&mut self, status: Option<Status>) {
        self.mutate(|q| q.set_status(status));
    }

    /// Records a keystroke. The query only changes once the returned ticket
    /// is settled after the debounce delay.
    pub fn input_search(&mut self, text: String, now: Duration) -> Ticket {
        self.search_input = text.clone();
        self.search.input(text, now)
    }

    pub fn settle_search(&mut self, ticket: Ticket) {
        if let Some(text) = self.search.fire(ticket) {
            self.mutate(|q| q.set_search(text));
        }
    }

    pub fn poll_search(&mut self, now: Duration) {
        if let Some(text) = self.search.poll(now) {
            self.mutate(|q| q.set_search(text));
        }
    }

    /// Empties search and filters and returns to the first page in a single
    /// transition. A search still waiting on its debounce is dropped.
    pub fn clear_filters(&mut self) {
        self.search.cancel();
        self.search_input.clear();
        self.mutate(QueryState::clear_filters);
    }

    /// Issues the request for the current query if it changed since the
    /// last one.
    pub fn poll_fetch(&mut self) -> Option<FetchTicket> {
        if !self.dirty || self.requests.is_disposed() {
            return None;
        }
        self.dirty = false;
        self.view = ListView::Loading;
        let id = self.requests.issue();
        tracing::debug!(?id, params = ?self.query.to_params(), "fetching incidents");
        Some(FetchTicket {
            id,
            query: self.query.clone(),
        })
    }

    /// Applies a response. Returns `false` when the response was superseded
    /// or the view is gone.
    pub fn finish(&mut self, id: RequestId, result: Result<PageResult, ApiError>) -> bool {
        if !self.requests.is_current(id) {
            tracing::debug!(?id, "discarding stale incident list response");
            return false;
        }
        match result {
            Ok(page) => {
                self.total_pages = page.total_pages;
                self.view = ListView::Loaded(page.content);
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch incidents");
                self.view = ListView::Failed(messages::LIST_FAILED);
            }
        }
        true
    }

    /// Fetches if the query is dirty. Returns whether a request was made.
    pub async fn refresh<A: IncidentApi>(&mut self, api: &A) -> bool {
        let Some(ticket) = self.poll_fetch() else {
            return false;
        };
        let result = api.list_incidents(&ticket.query).await;
        self.finish(ticket.id, result);
        true
    }

    pub fn dispose(&mut self) {
        self.search.cancel();
        self.requests.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortDirection;
    use crate::testing::{incident, FakeApi};
    use futures::executor::block_on;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn loaded_ids(controller: &ListController) -> Vec<String> {
        match controller.view() {
            ListView::Loaded(rows) => rows.iter().map(|r| r.id.to_string()).collect(),
            other => panic!("expected loaded view, got {other:?}"),
        }
    }

    #[test]
    fn mount_fetches_once_with_defaults() {
        let api = FakeApi::with_incidents((1..=3).map(|i| incident(&i.to_string())).collect());
        let mut list = ListController::default();
        assert_eq!(list.view(), &ListView::Loading);

        assert!(block_on(list.refresh(&api)));
        assert!(!block_on(list.refresh(&api)));

        let calls = api.list_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], QueryState::default());
        assert_eq!(loaded_ids(&list), vec!["1", "2", "3"]);
    }

    #[test]
    fn each_change_issues_exactly_one_fetch() {
        let api = FakeApi::default();
        let mut list = ListController::default();
        block_on(list.refresh(&api));

        list.toggle_sort(SortField::Service);
        assert!(block_on(list.refresh(&api)));
        assert_eq!(api.list_calls().last().unwrap().sort.param(), "service,asc");

        list.toggle_sort(SortField::Service);
        block_on(list.refresh(&api));
        assert_eq!(
            api.list_calls().last().unwrap().sort.direction,
            SortDirection::Desc
        );

        list.set_service(Some(Service::Auth));
        list.set_severity(Some(Severity::Sev1));
        block_on(list.refresh(&api));

        // Re-selecting the active value is not a change.
        list.set_service(Some(Service::Auth));
        assert!(!block_on(list.refresh(&api)));

        assert_eq!(api.list_calls().len(), 4);
        let last = api.list_calls().pop().unwrap();
        assert_eq!(last.service, Some(Service::Auth));
        assert_eq!(last.severity, Some(Severity::Sev1));
    }

    #[test]
    fn debounced_search_fetches_once_with_final_text() {
        let api = FakeApi::default();
        let mut list = ListController::default();
        block_on(list.refresh(&api));

        for (at, text) in [(0, "p"), (90, "pa"), (180, "pay")] {
            list.input_search(text.into(), ms(at));
            list.poll_search(ms(at + 50));
            assert!(!block_on(list.refresh(&api)));
        }
        assert_eq!(list.search_input(), "pay");
        assert_eq!(list.query().search, "");

        list.poll_search(ms(680));
        assert!(block_on(list.refresh(&api)));
        assert_eq!(api.list_calls().len(), 2);
        assert_eq!(api.list_calls()[1].search, "pay");
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut list = ListController::default();
        let first = list.poll_fetch().expect("first");
        list.set_status(Some(Status::Open));
        let second = list.poll_fetch().expect("second");

        let fresh = PageResult {
            content: vec![incident("new")],
            total_pages: 1,
            ..PageResult::default()
        };
        let stale = PageResult {
            content: vec![incident("old")],
            total_pages: 9,
            ..PageResult::default()
        };

        assert!(list.finish(second.id, Ok(fresh)));
        assert!(!list.finish(first.id, Ok(stale)));
        assert_eq!(loaded_ids(&list), vec!["new"]);
        assert_eq!(list.pager().total_pages, 1);
    }

    #[test]
    fn failure_shows_message_and_keeps_filters_editable() {
        let api = FakeApi::default();
        api.fail_next_list();
        let mut list = ListController::default();
        block_on(list.refresh(&api));
        assert_eq!(list.view(), &ListView::Failed(messages::LIST_FAILED));

        list.set_status(Some(Status::Mitigated));
        block_on(list.refresh(&api));
        assert_eq!(list.view(), &ListView::Loaded(Vec::new()));
    }

    #[test]
    fn clear_filters_is_one_transition() {
        let api = FakeApi::with_incidents((0..25).map(|i| incident(&i.to_string())).collect());
        let mut list = ListController::default();
        list.set_service(Some(Service::Backend));
        list.set_status(Some(Status::Open));
        let ticket = list.input_search("disk".into(), ms(0));
        list.settle_search(ticket);
        block_on(list.refresh(&api));
        list.next_page();
        block_on(list.refresh(&api));
        assert_eq!(list.query().page, 1);

        list.input_search("disk full".into(), ms(1_000));
        assert!(list.can_clear());
        list.clear_filters();
        assert!(!list.can_clear());
        list.poll_search(ms(10_000));

        let before = api.list_calls().len();
        assert!(block_on(list.refresh(&api)));
        assert_eq!(api.list_calls().len(), before + 1);

        let last = api.list_calls().pop().unwrap();
        assert_eq!(last.page, 0);
        assert!(!last.has_filters());
        assert_eq!(list.search_input(), "");
    }

    #[test]
    fn paging_respects_bounds() {
        let api = FakeApi::with_incidents((0..25).map(|i| incident(&i.to_string())).collect());
        let mut list = ListController::default();
        block_on(list.refresh(&api));
        assert_eq!(list.pager().total_pages, 3);

        list.previous_page();
        assert!(!block_on(list.refresh(&api)));

        list.next_page();
        block_on(list.refresh(&api));
        list.next_page();
        block_on(list.refresh(&api));
        assert_eq!(list.query().page, 2);
        assert!(!list.pager().can_next());

        list.next_page();
        assert!(!block_on(list.refresh(&api)));
        assert_eq!(loaded_ids(&list), vec!["20", "21", "22", "23", "24"]);
    }

    #[test]
    fn dispose_stops_fetching_and_ignores_late_results() {
        let mut list = ListController::default();
        let pending = list.poll_fetch().expect("ticket");
        list.dispose();

        assert!(!list.finish(pending.id, Ok(PageResult::default())));
        assert_eq!(list.view(), &ListView::Loading);

        list.set_page(3);
        assert!(list.poll_fetch().is_none());
    }
}
