use crate::error::ApiError;
use crate::query::QueryState;
use incident_model::{Incident, IncidentId, IncidentUpdate, NewIncident, PageResult};
use std::future::Future;

pub const DEFAULT_BASE_URL: &str = "/api";

/// Where the incident service lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn incidents_url(&self) -> String {
        format!("{}/incidents", self.base_url)
    }

    pub fn incident_url(&self, id: &IncidentId) -> String {
        format!("{}/incidents/{}", self.base_url, id)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// The four calls the views make against the incident service.
///
/// Implementations are stateless transports: no retries, no caching, no
/// deadlines beyond what the transport imposes.
pub trait IncidentApi {
    fn list_incidents(
        &self,
        query: &QueryState,
    ) -> impl Future<Output = Result<PageResult, ApiError>>;

    fn get_incident(&self, id: &IncidentId) -> impl Future<Output = Result<Incident, ApiError>>;

    fn create_incident(
        &self,
        payload: &NewIncident,
    ) -> impl Future<Output = Result<Incident, ApiError>>;

    fn update_incident(
        &self,
        id: &IncidentId,
        payload: &IncidentUpdate,
    ) -> impl Future<Output = Result<Incident, ApiError>>;
}
