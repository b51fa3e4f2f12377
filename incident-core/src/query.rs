//! List query state and the request parameters derived from it.

use incident_model::{Choice, Service, Severity, Status};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    Title,
    Service,
    Severity,
    Status,
    CreatedAt,
    Owner,
}

impl SortField {
    /// Columns the list view lets the user sort by.
    pub const COLUMNS: [SortField; 4] = [
        SortField::Service,
        SortField::Severity,
        SortField::Status,
        SortField::CreatedAt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Service => "service",
            SortField::Severity => "severity",
            SortField::Status => "status",
            SortField::CreatedAt => "createdAt",
            SortField::Owner => "owner",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortField::Title => "Title",
            SortField::Service => "Service",
            SortField::Severity => "Severity",
            SortField::Status => "Status",
            SortField::CreatedAt => "Created At",
            SortField::Owner => "Owner",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort field '{0}'")]
pub struct UnknownSortField(String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "service" => Ok(SortField::Service),
            "severity" => Ok(SortField::Severity),
            "status" => Ok(SortField::Status),
            "createdat" | "created_at" => Ok(SortField::CreatedAt),
            "owner" => Ok(SortField::Owner),
            _ => Err(UnknownSortField(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Exactly one field is sorted at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    /// Header click: flip direction on the active field, otherwise switch
    /// field and start ascending.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Sort {
                field,
                direction: self.direction.toggled(),
            }
        } else {
            Sort {
                field,
                direction: SortDirection::Asc,
            }
        }
    }

    /// `field,direction` as the backend expects it.
    pub fn param(&self) -> String {
        format!("{},{}", self.field.as_str(), self.direction.as_str())
    }
}

impl Default for Sort {
    fn default() -> Self {
        Sort {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
    /// Applied (debounced) search text.
    pub search: String,
    pub service: Option<Service>,
    pub severity: Option<Severity>,
    pub status: Option<Status>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
            search: String::new(),
            service: None,
            severity: None,
            status: None,
        }
    }
}

impl QueryState {
    pub fn has_filters(&self) -> bool {
        !self.search.is_empty()
            || self.service.is_some()
            || self.severity.is_some()
            || self.status.is_some()
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = self.sort.toggle(field);
    }

    pub fn set_size(&mut self, size: u32) {
        let size = size.max(1);
        if self.size != size {
            self.size = size;
            self.page = 0;
        }
    }

    pub fn set_search(&mut self, search: String) {
        if self.search != search {
            self.search = search;
            self.page = 0;
        }
    }

    pub fn set_service(&mut self, service: Option<Service>) {
        if self.service != service {
            self.service = service;
            self.page = 0;
        }
    }

    pub fn set_severity(&mut self, severity: Option<Severity>) {
        if self.severity != severity {
            self.severity = severity;
            self.page = 0;
        }
    }

    pub fn set_status(&mut self, status: Option<Status>) {
        if self.status != status {
            self.status = status;
            self.page = 0;
        }
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.service = None;
        self.severity = None;
        self.status = None;
        self.page = 0;
    }

    /// Request parameters for `GET /incidents`. Empty filters are left out
    /// rather than sent as empty strings.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort.param()),
        ];
        if !self.search.is_empty() {
            params.push(("title", self.search.clone()));
        }
        if let Some(service) = self.service {
            params.push(("service", service.as_str().to_string()));
        }
        if let Some(severity) = self.severity {
            params.push(("severity", severity.as_str().to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params
    }
}

/// Previous/next availability for a zero-indexed page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub total_pages: u32,
}

impl Pager {
    pub fn can_previous(&self) -> bool {
        self.page > 0
    }

    pub fn can_next(&self) -> bool {
        i64::from(self.page) < i64::from(self.total_pages) - 1
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages.max(1))
    }
}
