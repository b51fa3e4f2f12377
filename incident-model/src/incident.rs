use crate::schema::{Service, Severity, Status};
use crate::timestamp::{self, DisplayStyle};
use chrono::NaiveDateTime;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Backend-assigned identifier. Opaque to the client.
///
/// Decodes from a JSON string or an integer; integers keep their decimal
/// spelling. Always encodes as a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IncidentId(String);

impl IncidentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = IncidentId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer incident id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(IncidentId::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(IncidentId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(IncidentId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(IncidentId(v.to_string()))
    }

    // JS numbers arrive as floats in the browser.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 {
            Ok(IncidentId((v as i64).to_string()))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for IncidentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IdVisitor)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: IncidentId,
    pub title: String,
    pub service: Service,
    pub severity: Severity,
    pub status: Status,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Incident {
    pub fn owner_or_dash(&self) -> &str {
        match self.owner.as_deref() {
            Some(owner) if !owner.is_empty() => owner,
            _ => "-",
        }
    }

    pub fn created_display(&self, style: DisplayStyle) -> String {
        timestamp::format(self.created_at.as_ref(), style)
    }
}

/// Body of `POST /incidents`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewIncident {
    pub title: String,
    pub service: Service,
    pub severity: Severity,
    pub status: Status,
    pub owner: String,
    pub summary: String,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("title is required")]
    MissingTitle,
    #[error("service is required")]
    MissingService,
}

/// Create form contents before validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IncidentDraft {
    pub title: String,
    pub service: Option<Service>,
    pub severity: Severity,
    pub status: Status,
    pub owner: String,
    pub summary: String,
}

impl IncidentDraft {
    pub fn validate(&self) -> Result<NewIncident, DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        let service = self.service.ok_or(DraftError::MissingService)?;
        Ok(NewIncident {
            title: self.title.clone(),
            service,
            severity: self.severity,
            status: self.status,
            owner: self.owner.clone(),
            summary: self.summary.clone(),
        })
    }
}

/// Body of `PATCH /incidents/{id}`. Absent fields are left untouched by the
/// backend. Identity and timestamps are never part of it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl IncidentUpdate {
    /// Every mutable field of `incident`.
    pub fn full(incident: &Incident) -> Self {
        Self {
            title: Some(incident.title.clone()),
            service: Some(incident.service),
            severity: Some(incident.severity),
            status: Some(incident.status),
            owner: incident.owner.clone(),
            summary: incident.summary.clone(),
        }
    }
}
