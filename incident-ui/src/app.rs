use crate::bridge::HttpBridge;
use crate::components::create_incident::CreateIncident;
use crate::components::incident_detail::IncidentDetail;
use crate::components::incident_list::IncidentList;
use crate::components::layout::Layout;
use incident_core::route::{CREATE_PATH, DETAIL_PATTERN, LIST_PATH};
use incident_core::ApiConfig;
use leptos::*;
use leptos_router::{Route, Router, Routes};

#[component]
pub fn App() -> impl IntoView {
    provide_context(HttpBridge::new(ApiConfig::default()));

    view! {
      <Router>
        <Layout>
          <Routes>
            <Route path=LIST_PATH view=IncidentList/>
            <Route path=CREATE_PATH view=CreateIncident/>
            <Route path=DETAIL_PATTERN view=IncidentDetail/>
          </Routes>
        </Layout>
      </Router>
    }
}
