//! View controllers for the incident tracker, independent of any renderer.
//!
//! Each controller owns the state of one view for the lifetime of that view
//! and talks to the incident service through [`api::IncidentApi`].

pub mod api;
pub mod create;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod list;
pub mod query;
pub mod request;
pub mod route;

#[cfg(test)]
mod testing;

pub use api::{ApiConfig, IncidentApi};
pub use create::CreateController;
pub use detail::{DetailController, DetailState, EditSession, SaveOutcome, SaveTicket};
pub use error::{messages, ApiError};
pub use list::{FetchTicket, ListController, ListView};
pub use query::{Pager, QueryState, Sort, SortDirection, SortField};
pub use route::Route;
