//! Subcommand bodies, driven through the same controllers as the browser
//! views.

use anyhow::bail;
use incident_core::{
    CreateController, DetailController, DetailState, IncidentApi, ListController, ListView, Pager,
    QueryState, SaveOutcome,
};
use incident_model::{Incident, IncidentDraft, IncidentId, Severity, Status};

/// Field changes requested by `incident update`.
#[derive(Clone, Debug, Default)]
pub struct Edits {
    pub severity: Option<Severity>,
    pub status: Option<Status>,
    pub owner: Option<String>,
    pub summary: Option<String>,
}

pub async fn list<A: IncidentApi>(api: &A, query: QueryState) -> anyhow::Result<(Vec<Incident>, Pager)> {
    let mut list = ListController::new(query);
    list.refresh(api).await;
    match list.view() {
        ListView::Loaded(rows) => Ok((rows.clone(), list.pager())),
        ListView::Failed(message) => bail!(*message),
        ListView::Loading => bail!("incident list did not load"),
    }
}

pub async fn create<A: IncidentApi>(api: &A, draft: IncidentDraft) -> anyhow::Result<Incident> {
    let mut form = CreateController::new();
    form.set_title(draft.title);
    form.set_service(draft.service);
    form.set_severity(draft.severity);
    form.set_status(draft.status);
    form.set_owner(draft.owner);
    form.set_summary(draft.summary);

    let payload = form.begin_submit()?;
    match api.create_incident(&payload).await {
        Ok(created) => {
            form.finish_submit(Ok(created.clone()));
            Ok(created)
        }
        Err(err) => {
            form.finish_submit(Err(err));
            bail!(form.error().unwrap_or("incident was not created"))
        }
    }
}

/// Loads the record, applies `edits` on top of it and saves the full record.
/// Returns the record as the service stored it.
pub async fn update<A: IncidentApi>(api: &A, id: IncidentId, edits: Edits) -> anyhow::Result<Incident> {
    let mut detail = DetailController::new(id);
    detail.load(api).await;
    if let DetailState::Failed(message) = detail.state() {
        bail!(*message);
    }

    if let Some(severity) = edits.severity {
        detail.set_severity(severity);
    }
    if let Some(status) = edits.status {
        detail.set_status(status);
    }
    if let Some(owner) = edits.owner {
        detail.set_owner(owner);
    }
    if let Some(summary) = edits.summary {
        detail.set_summary(summary);
    }
    if !detail.session().is_some_and(|s| s.is_dirty()) {
        tracing::info!(id = %detail.id(), "no changes requested, saving record as loaded");
    }

    match detail.save(api).await {
        Some(SaveOutcome::Navigate(_)) => match detail.session() {
            Some(session) => Ok(session.edited.clone()),
            None => bail!("incident was not saved"),
        },
        Some(SaveOutcome::Alert(message)) => bail!(message),
        None => bail!("incident was not saved"),
    }
}
