//! Single incident: load, edit in place, save.

use crate::api::IncidentApi;
use crate::error::{messages, ApiError};
use crate::request::{RequestId, RequestTracker};
use crate::route::Route;
use incident_model::{Incident, IncidentId, IncidentUpdate, Severity, Status};

/// The loaded record next to the copy the user is editing.
#[derive(Clone, Debug, PartialEq)]
pub struct EditSession {
    pub original: Incident,
    pub edited: Incident,
    pub saving: bool,
}

impl EditSession {
    pub fn is_dirty(&self) -> bool {
        self.original != self.edited
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DetailState {
    Loading,
    Failed(&'static str),
    Ready(EditSession),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Navigate(Route),
    /// Blocking alert; the edits stay in place for another attempt.
    Alert(&'static str),
}

/// A save ready to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct SaveTicket {
    pub request: RequestId,
    pub id: IncidentId,
    pub update: IncidentUpdate,
}

#[derive(Clone, Debug)]
pub struct DetailController {
    id: IncidentId,
    requests: RequestTracker,
    state: DetailState,
}

impl DetailController {
    pub fn new(id: IncidentId) -> Self {
        Self {
            id,
            requests: RequestTracker::new(),
            state: DetailState::Loading,
        }
    }

    pub fn id(&self) -> &IncidentId {
        &self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            DetailState::Ready(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.session().is_some_and(|s| s.saving)
    }

    pub fn save_label(&self) -> &'static str {
        if self.is_saving() {
            "Saving..."
        } else {
            "Save Changes"
        }
    }

    pub fn begin_load(&mut self) -> RequestId {
        self.state = DetailState::Loading;
        self.requests.issue()
    }

    /// Switches to `id` and starts loading it. Responses for the previously
    /// opened record no longer apply.
    pub fn open(&mut self, id: IncidentId) -> RequestId {
        self.id = id;
        self.begin_load()
    }

    pub fn finish_load(&mut self, id: RequestId, result: Result<Incident, ApiError>) -> bool {
        if !self.requests.is_current(id) {
            return false;
        }
        self.state = match result {
            Ok(incident) => DetailState::Ready(EditSession {
                original: incident.clone(),
                edited: incident,
                saving: false,
            }),
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "failed to load incident");
                DetailState::Failed(messages::DETAIL_FAILED)
            }
        };
        true
    }

    pub async fn load<A: IncidentApi>(&mut self, api: &A) {
        let request = self.begin_load();
        let result = api.get_incident(&self.id).await;
        self.finish_load(request, result);
    }

    fn edit(&mut self, f: impl FnOnce(&mut Incident)) {
        if let DetailState::Ready(session) = &mut self.state {
            f(&mut session.edited);
        }
    }

    pub fn set_severity(&mut self, severity: Severity) {
        self.edit(|i| i.severity = severity);
    }

    pub fn set_status(&mut self, status: Status) {
        self.edit(|i| i.status = status);
    }

    pub fn set_owner(&mut self, owner: String) {
        self.edit(|i| i.owner = Some(owner));
    }

    pub fn set_summary(&mut self, summary: String) {
        self.edit(|i| i.summary = Some(summary));
    }

    /// Marks the session as saving and returns the full edited record as an
    /// update. `None` when nothing is loaded or a save is already running.
    pub fn begin_save(&mut self) -> Option<SaveTicket> {
        let DetailState::Ready(session) = &mut self.state else {
            return None;
        };
        if session.saving {
            return None;
        }
        session.saving = true;
        let update = IncidentUpdate::full(&session.edited);
        Some(SaveTicket {
            request: self.requests.issue(),
            id: self.id.clone(),
            update,
        })
    }

    /// `None` once the view has been disposed or another record was opened
    /// while the save was in flight. On success the session holds the record
    /// as the service returned it.
    pub fn finish_save(
        &mut self,
        request: RequestId,
        result: Result<Incident, ApiError>,
    ) -> Option<SaveOutcome> {
        if !self.requests.is_current(request) {
            tracing::debug!(?request, "discarding stale save response");
            return None;
        }
        let DetailState::Ready(session) = &mut self.state else {
            return None;
        };
        session.saving = false;
        match result {
            Ok(updated) => {
                tracing::info!(id = %updated.id, "incident updated");
                session.original = updated.clone();
                session.edited = updated;
                Some(SaveOutcome::Navigate(Route::List))
            }
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "failed to save incident");
                Some(SaveOutcome::Alert(messages::SAVE_FAILED))
            }
        }
    }

    pub async fn save<A: IncidentApi>(&mut self, api: &A) -> Option<SaveOutcome> {
        let ticket = self.begin_save()?;
        let result = api.update_incident(&ticket.id, &ticket.update).await;
        self.finish_save(ticket.request, result)
    }

    pub fn dispose(&mut self) {
        self.requests.dispose();
    }
}
