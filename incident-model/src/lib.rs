//! Incident records as exchanged with the incident service.

pub mod incident;
pub mod page;
pub mod schema;
pub mod timestamp;

pub use incident::{DraftError, Incident, IncidentDraft, IncidentId, IncidentUpdate, NewIncident};
pub use page::PageResult;
pub use schema::{Choice, Service, Severity, Status, UnknownChoice};
pub use timestamp::DisplayStyle;
