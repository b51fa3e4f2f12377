use crate::bridge::HttpBridge;
use crate::components::choice::choice_options;
use incident_core::{CreateController, IncidentApi, Route};
use incident_model::{Choice, Service, Severity, Status};
use leptos::*;
use leptos_router::use_navigate;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn CreateIncident() -> impl IntoView {
    let api = store_value(expect_context::<HttpBridge>());
    let navigate = use_navigate();
    let form = create_rw_signal(CreateController::default());

    let submit = {
        let navigate = navigate.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            if form.with_untracked(CreateController::is_submitting) {
                return;
            }
            let new_incident = match form.try_update(CreateController::begin_submit) {
                Some(Ok(new_incident)) => new_incident,
                Some(Err(err)) => {
                    tracing::debug!(%err, "draft rejected");
                    return;
                }
                None => return,
            };
            let api = api.get_value();
            let navigate = navigate.clone();
            spawn_local(async move {
                let result = api.create_incident(&new_incident).await;
                if let Some(Some(route)) = form.try_update(|f| f.finish_submit(result)) {
                    navigate(&route.path(), Default::default());
                }
            });
        }
    };
    let cancel = move |_: ev::MouseEvent| navigate(&Route::List.path(), Default::default());

    let service = move || form.with(|f| f.draft().service);
    let status = move || form.with(|f| Some(f.draft().status));
    let submitting = move || form.with(CreateController::is_submitting);

    let severity_option = move |choice: Severity| {
        view! {
          <label class="radio">
            <input
              type="radio"
              name="severity"
              value=choice.as_str()
              prop:checked=move || form.with(|f| f.draft().severity == choice)
              on:change=move |_| form.update(|f| f.set_severity(choice))
            />
            <span class=choice.badge_class()>{choice.as_str()}</span>
          </label>
        }
    };

    view! {
      <div class="stack narrow">
        <h1>"Create New Incident"</h1>

        <Show when=move || form.with(|f| f.error().is_some())>
          <div class="alert">{move || form.with(|f| f.error().unwrap_or_default())}</div>
        </Show>

        <form class="panel form" on:submit=submit>
          <div>
            <label>"Title *"</label>
            <input
              type="text"
              class="input"
              required
              placeholder="Brief description of the incident"
              prop:value=move || form.with(|f| f.draft().title.clone())
              on:input=move |ev| form.update(|f| f.set_title(event_target_value(&ev)))
            />
          </div>

          <div>
            <label>"Service *"</label>
            <select class="input" required on:change=move |ev| {
              form.update(|f| f.set_service(Service::parse_optional(&event_target_value(&ev))));
            }>
              <option value="" prop:selected=move || service().is_none()>"Select Service"</option>
              {choice_options(service)}
            </select>
          </div>

          <div>
            <label>"Severity *"</label>
            <div class="row">
              {Severity::ALL.iter().copied().map(severity_option).collect_view()}
            </div>
          </div>

          <div>
            <label>"Status"</label>
            <select class="input" on:change=move |ev| {
              if let Some(value) = Status::parse(&event_target_value(&ev)) {
                  form.update(|f| f.set_status(value));
              }
            }>
              {choice_options(status)}
            </select>
          </div>

          <div>
            <label>"Owner"</label>
            <input
              type="text"
              class="input"
              placeholder="Assign to..."
              prop:value=move || form.with(|f| f.draft().owner.clone())
              on:input=move |ev| form.update(|f| f.set_owner(event_target_value(&ev)))
            />
          </div>

          <div>
            <label>"Summary"</label>
            <textarea
              rows="4"
              class="input"
              placeholder="Detailed description of the incident..."
              prop:value=move || form.with(|f| f.draft().summary.clone())
              on:input=move |ev| form.update(|f| f.set_summary(event_target_value(&ev)))
            />
          </div>

          <div class="actions">
            <button type="button" class="btn btn-secondary" on:click=cancel>"Cancel"</button>
            <button type="submit" class="btn btn-primary" disabled=submitting>
              {move || form.with(CreateController::submit_label)}
            </button>
          </div>
        </form>
      </div>
    }
}
