//! Incident service calls over the browser's fetch API.

use incident_core::{ApiConfig, ApiError, IncidentApi, QueryState};
use incident_model::{Incident, IncidentId, IncidentUpdate, NewIncident, PageResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, UrlSearchParams};

#[derive(Clone, Debug, Default)]
pub struct HttpBridge {
    config: ApiConfig,
}

impl HttpBridge {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    async fn call<B, R>(&self, method: &str, url: String, body: Option<&B>) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let window = web_sys::window().ok_or_else(|| ApiError::Transport("window not available".into()))?;

        let init = RequestInit::new();
        init.set_method(method);
        if let Some(body) = body {
            let json = serde_json::to_string(body)
                .map_err(|e| ApiError::Transport(format!("encode request body: {e}")))?;
            init.set_body(&JsValue::from_str(&json));
        }

        let request = Request::new_with_str_and_init(&url, &init).map_err(transport)?;
        let headers = request.headers();
        headers.set("Accept", "application/json").map_err(transport)?;
        if body.is_some() {
            headers.set("Content-Type", "application/json").map_err(transport)?;
        }

        tracing::debug!(method, %url, "incident service request");
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let response: Response = response.dyn_into().map_err(transport)?;

        if !response.ok() {
            let body = match response.text() {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .ok()
                    .and_then(|v| v.as_string())
                    .unwrap_or_default(),
                Err(_) => String::new(),
            };
            return Err(ApiError::Status {
                status: response.status(),
                body,
            });
        }

        let json = JsFuture::from(response.json().map_err(decode)?)
            .await
            .map_err(decode)?;
        serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn transport(err: JsValue) -> ApiError {
    ApiError::Transport(format!("{err:?}"))
}

fn decode(err: JsValue) -> ApiError {
    ApiError::Decode(format!("{err:?}"))
}

impl IncidentApi for HttpBridge {
    async fn list_incidents(&self, query: &QueryState) -> Result<PageResult, ApiError> {
        let params = UrlSearchParams::new().map_err(transport)?;
        for (key, value) in query.to_params() {
            params.append(key, &value);
        }
        let url = format!("{}?{}", self.config.incidents_url(), String::from(params.to_string()));
        self.call::<(), _>("GET", url, None).await
    }

    async fn get_incident(&self, id: &IncidentId) -> Result<Incident, ApiError> {
        self.call::<(), _>("GET", self.config.incident_url(id), None).await
    }

    async fn create_incident(&self, payload: &NewIncident) -> Result<Incident, ApiError> {
        self.call("POST", self.config.incidents_url(), Some(payload)).await
    }

    async fn update_incident(
        &self,
        id: &IncidentId,
        payload: &IncidentUpdate,
    ) -> Result<Incident, ApiError> {
        self.call("PATCH", self.config.incident_url(id), Some(payload)).await
    }
}
