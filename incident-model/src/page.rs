use crate::incident::Incident;
use serde::{Deserialize, Serialize};

/// One server-paginated slice of incidents.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPage", rename_all = "camelCase")]
pub struct PageResult {
    pub content: Vec<Incident>,
    pub total_pages: u32,
    pub number: u32,
    pub total_elements: Option<u64>,
}

// Spring-style pages carry `content`; older deployments answer with
// `incidents`. Either may omit the counters.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage {
    content: Option<Vec<Incident>>,
    incidents: Option<Vec<Incident>>,
    total_pages: Option<u32>,
    #[serde(alias = "page")]
    number: Option<u32>,
    total_elements: Option<u64>,
}

impl From<RawPage> for PageResult {
    fn from(raw: RawPage) -> Self {
        Self {
            content: raw.content.or(raw.incidents).unwrap_or_default(),
            total_pages: raw.total_pages.unwrap_or(0),
            number: raw.number.unwrap_or(0),
            total_elements: raw.total_elements,
        }
    }
}
