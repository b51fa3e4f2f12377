mod app;
mod bridge;
mod hooks;

pub mod components {
    pub mod choice;
    pub mod create_incident;
    pub mod incident_detail;
    pub mod incident_list;
    pub mod layout;
}

use app::App;
use leptos::*;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(tracing_web::MakeWebConsoleWriter::new());
    let filter = Targets::new()
        .with_target("incident_core", Level::DEBUG)
        .with_target("incident_ui", Level::DEBUG)
        .with_default(Level::WARN);
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn main() {
    init_tracing();
    mount_to_body(|| view! { <App/> });
}
