//! New incident form.

use crate::api::IncidentApi;
use crate::error::{messages, ApiError};
use crate::route::Route;
use incident_model::{DraftError, Incident, IncidentDraft, NewIncident, Service, Severity, Status};

#[derive(Clone, Debug, Default)]
pub struct CreateController {
    draft: IncidentDraft,
    submitting: bool,
    error: Option<&'static str>,
}

impl CreateController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &IncidentDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Creating..."
        } else {
            "Create Incident"
        }
    }

    pub fn set_title(&mut self, title: String) {
        self.draft.title = title;
    }

    pub fn set_service(&mut self, service: Option<Service>) {
        self.draft.service = service;
    }

    pub fn set_severity(&mut self, severity: Severity) {
        self.draft.severity = severity;
    }

    pub fn set_status(&mut self, status: Status) {
        self.draft.status = status;
    }

    pub fn set_owner(&mut self, owner: String) {
        self.draft.owner = owner;
    }

    pub fn set_summary(&mut self, summary: String) {
        self.draft.summary = summary;
    }

    /// Validates the draft and enters the submitting state. A rejected draft
    /// raises the same banner as a rejected request.
    pub fn begin_submit(&mut self) -> Result<NewIncident, DraftError> {
        let payload = match self.draft.validate() {
            Ok(payload) => payload,
            Err(err) => {
                self.error = Some(messages::CREATE_FAILED);
                return Err(err);
            }
        };
        self.submitting = true;
        self.error = None;
        Ok(payload)
    }

    /// Where to go next, or `None` to stay on the form with the error banner.
    pub fn finish_submit(&mut self, result: Result<Incident, ApiError>) -> Option<Route> {
        self.submitting = false;
        match result {
            Ok(created) => {
                tracing::info!(id = %created.id, "incident created");
                Some(Route::List)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to create incident");
                self.error = Some(messages::CREATE_FAILED);
                None
            }
        }
    }

    pub async fn submit<A: IncidentApi>(&mut self, api: &A) -> Result<Option<Route>, DraftError> {
        let payload = self.begin_submit()?;
        let result = api.create_incident(&payload).await;
        Ok(self.finish_submit(result))
    }
}
