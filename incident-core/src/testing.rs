//! In-memory stand-in for the incident service.

use crate::api::IncidentApi;
use crate::error::ApiError;
use crate::query::QueryState;
use incident_model::timestamp;
use incident_model::{
    Incident, IncidentId, IncidentUpdate, NewIncident, PageResult, Service, Severity, Status,
};
use std::cell::{Cell, RefCell};

pub(crate) fn incident(id: &str) -> Incident {
    Incident {
        id: IncidentId::new(id),
        title: format!("incident {id}"),
        service: Service::Auth,
        severity: Severity::Sev3,
        status: Status::Open,
        owner: None,
        summary: None,
        created_at: None,
        updated_at: None,
    }
}

#[derive(Default)]
pub(crate) struct FakeApi {
    incidents: RefCell<Vec<Incident>>,
    list_calls: RefCell<Vec<QueryState>>,
    updates: RefCell<Vec<(IncidentId, IncidentUpdate)>>,
    creates: RefCell<Vec<NewIncident>>,
    fail_list: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl FakeApi {
    pub(crate) fn with_incidents(incidents: Vec<Incident>) -> Self {
        Self {
            incidents: RefCell::new(incidents),
            ..Self::default()
        }
    }

    pub(crate) fn fail_next_list(&self) {
        self.fail_list.set(true);
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub(crate) fn list_calls(&self) -> Vec<QueryState> {
        self.list_calls.borrow().clone()
    }

    pub(crate) fn updates(&self) -> Vec<(IncidentId, IncidentUpdate)> {
        self.updates.borrow().clone()
    }

    pub(crate) fn creates(&self) -> Vec<NewIncident> {
        self.creates.borrow().clone()
    }

    fn rejected() -> ApiError {
        ApiError::Status {
            status: 400,
            body: "rejected".into(),
        }
    }
}

// Filters are not evaluated; every incident is on every page listing.
impl IncidentApi for FakeApi {
    async fn list_incidents(&self, query: &QueryState) -> Result<PageResult, ApiError> {
        self.list_calls.borrow_mut().push(query.clone());
        if self.fail_list.replace(false) {
            return Err(ApiError::Transport("connection refused".into()));
        }
        let all = self.incidents.borrow();
        let size = query.size.max(1) as usize;
        let content = all
            .iter()
            .skip(query.page as usize * size)
            .take(size)
            .cloned()
            .collect();
        Ok(PageResult {
            content,
            total_pages: all.len().div_ceil(size) as u32,
            number: query.page,
            total_elements: Some(all.len() as u64),
        })
    }

    async fn get_incident(&self, id: &IncidentId) -> Result<Incident, ApiError> {
        self.incidents
            .borrow()
            .iter()
            .find(|i| &i.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: format!("Incident not found with id: {id}"),
            })
    }

    async fn create_incident(&self, payload: &NewIncident) -> Result<Incident, ApiError> {
        if self.fail_writes.get() {
            return Err(Self::rejected());
        }
        self.creates.borrow_mut().push(payload.clone());
        let mut created = incident(&format!("new-{}", self.creates.borrow().len()));
        created.title = payload.title.clone();
        created.service = payload.service;
        created.severity = payload.severity;
        created.status = payload.status;
        self.incidents.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update_incident(
        &self,
        id: &IncidentId,
        payload: &IncidentUpdate,
    ) -> Result<Incident, ApiError> {
        if self.fail_writes.get() {
            return Err(Self::rejected());
        }
        self.updates.borrow_mut().push((id.clone(), payload.clone()));
        let mut incidents = self.incidents.borrow_mut();
        let target = incidents
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: String::new(),
            })?;
        if let Some(status) = payload.status {
            target.status = status;
        }
        if let Some(severity) = payload.severity {
            target.severity = severity;
        }
        if let Some(owner) = &payload.owner {
            target.owner = Some(owner.clone());
        }
        if let Some(summary) = &payload.summary {
            target.summary = Some(summary.clone());
        }
        target.updated_at = timestamp::parse("2024-03-01T09:00:00");
        Ok(target.clone())
    }
}
