//! Native transport for the incident service.

use incident_core::{ApiConfig, ApiError, IncidentApi, QueryState};
use incident_model::{Incident, IncidentId, IncidentUpdate, NewIncident, PageResult};
use reqwest::header::ACCEPT;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

#[derive(Clone, Debug, Default)]
pub struct HttpIncidentApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpIncidentApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, ApiError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(%status, url = %response.url(), "incident service response");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl IncidentApi for HttpIncidentApi {
    async fn list_incidents(&self, query: &QueryState) -> Result<PageResult, ApiError> {
        let request = self
            .client
            .get(self.config.incidents_url())
            .query(&query.to_params());
        self.send(request).await
    }

    async fn get_incident(&self, id: &IncidentId) -> Result<Incident, ApiError> {
        self.send(self.client.get(self.config.incident_url(id))).await
    }

    async fn create_incident(&self, payload: &NewIncident) -> Result<Incident, ApiError> {
        self.send(self.client.post(self.config.incidents_url()).json(payload))
            .await
    }

    async fn update_incident(
        &self,
        id: &IncidentId,
        payload: &IncidentUpdate,
    ) -> Result<Incident, ApiError> {
        self.send(self.client.patch(self.config.incident_url(id)).json(payload))
            .await
    }
}
