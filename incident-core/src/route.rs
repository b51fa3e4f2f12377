use incident_model::IncidentId;

pub const LIST_PATH: &str = "/";
pub const CREATE_PATH: &str = "/create";
pub const DETAIL_PATTERN: &str = "/incidents/:id";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Detail(IncidentId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => LIST_PATH.to_string(),
            Route::Create => CREATE_PATH.to_string(),
            Route::Detail(id) => format!("/incidents/{id}"),
        }
    }
}
