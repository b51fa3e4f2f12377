use incident_core::Route;
use leptos::*;
use leptos_router::A;

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
      <div class="shell">
        <header class="header">
          <div class="container header-bar">
            <A href=Route::List.path() class="brand">"Incident Tracker"</A>
          </div>
        </header>
        <main class="container content">{children()}</main>
      </div>
    }
}
