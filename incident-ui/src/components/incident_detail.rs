use crate::bridge::HttpBridge;
use crate::components::choice::choice_options;
use incident_core::{DetailController, DetailState, IncidentApi, Route, SaveOutcome};
use incident_model::{Choice, DisplayStyle, Incident, IncidentId, Severity, Status};
use leptos::*;
use leptos_router::{use_navigate, use_params_map};
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Loading,
    Failed(&'static str),
    Ready,
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[component]
pub fn IncidentDetail() -> impl IntoView {
    let api = store_value(expect_context::<HttpBridge>());
    let params = use_params_map();
    let navigate = use_navigate();

    let initial = params.with_untracked(|p| p.get("id").cloned().unwrap_or_default());
    let detail = create_rw_signal(DetailController::new(IncidentId::new(initial)));

    create_effect(move |_| {
        let id = IncidentId::new(params.with(|p| p.get("id").cloned().unwrap_or_default()));
        let Some(request) = detail.try_update(|d| d.open(id.clone())) else {
            return;
        };
        let api = api.get_value();
        spawn_local(async move {
            let result = api.get_incident(&id).await;
            detail.try_update(|d| d.finish_load(request, result));
        });
    });

    on_cleanup(move || {
        detail.try_update_untracked(DetailController::dispose);
    });

    let phase = create_memo(move |_| {
        detail.with(|d| match d.state() {
            DetailState::Loading => Phase::Loading,
            DetailState::Failed(message) => Phase::Failed(*message),
            DetailState::Ready(_) => Phase::Ready,
        })
    });

    let read = move |f: fn(&Incident) -> String| {
        move || detail.with(|d| d.session().map(|s| f(&s.edited)).unwrap_or_default())
    };
    let severity = move || detail.with(|d| d.session().map(|s| s.edited.severity));
    let status = move || detail.with(|d| d.session().map(|s| s.edited.status));
    let saving = move || detail.with(DetailController::is_saving);

    let save = {
        let navigate = navigate.clone();
        move |_: ev::MouseEvent| {
            let Some(ticket) = detail.try_update(DetailController::begin_save).flatten() else {
                return;
            };
            let api = api.get_value();
            let navigate = navigate.clone();
            spawn_local(async move {
                let result = api.update_incident(&ticket.id, &ticket.update).await;
                match detail.try_update(|d| d.finish_save(ticket.request, result)).flatten() {
                    Some(SaveOutcome::Navigate(route)) => navigate(&route.path(), Default::default()),
                    Some(SaveOutcome::Alert(message)) => alert(message),
                    None => {}
                }
            });
        }
    };
    let cancel = move |_: ev::MouseEvent| navigate(&Route::List.path(), Default::default());

    let editor = move || {
        let save = save.clone();
        let cancel = cancel.clone();
        view! {
          <div class="panel form">
            <div class="detail-header">
              <div>
                <h2>{read(|i| i.title.clone())}</h2>
                <p class="muted">"ID: " {read(|i| i.id.to_string())}</p>
              </div>
              <span class=read(|i| i.status.badge_class())>{read(|i| i.status.as_str().to_string())}</span>
            </div>

            <div class="grid">
              <div>
                <label>"Service"</label>
                <div class="readonly">{read(|i| i.service.as_str().to_string())}</div>
              </div>
              <div>
                <label>"Occurred At"</label>
                <div class="readonly">{read(|i| i.created_display(DisplayStyle::Long))}</div>
              </div>
              <div>
                <label>"Severity"</label>
                <select class="input" on:change=move |ev| {
                  if let Some(value) = Severity::parse(&event_target_value(&ev)) {
                    detail.update(|d| d.set_severity(value));
                  }
                }>
                  {choice_options(severity)}
                </select>
              </div>
              <div>
                <label>"Status"</label>
                <select class="input" on:change=move |ev| {
                  if let Some(value) = Status::parse(&event_target_value(&ev)) {
                    detail.update(|d| d.set_status(value));
                  }
                }>
                  {choice_options(status)}
                </select>
              </div>
              <div class="wide">
                <label>"Assigned To"</label>
                <input
                  type="text"
                  class="input"
                  placeholder="Assign to..."
                  prop:value=read(|i| i.owner.clone().unwrap_or_default())
                  on:input=move |ev| detail.update(|d| d.set_owner(event_target_value(&ev)))
                />
              </div>
            </div>

            <div>
              <label>"Summary"</label>
              <textarea
                rows="6"
                class="input"
                placeholder="Detailed description of the incident..."
                prop:value=read(|i| i.summary.clone().unwrap_or_default())
                on:input=move |ev| detail.update(|d| d.set_summary(event_target_value(&ev)))
              />
            </div>

            <div class="actions">
              <button class="btn btn-secondary" disabled=saving on:click=cancel>"Cancel"</button>
              <button class="btn btn-primary" disabled=saving on:click=save>
                {move || detail.with(DetailController::save_label)}
              </button>
            </div>
          </div>
        }
    };

    move || match phase.get() {
        Phase::Loading => view! { <div class="panel muted center">"Loading incident details..."</div> }.into_view(),
        Phase::Failed(message) => view! { <div class="alert">{message}</div> }.into_view(),
        Phase::Ready => editor().into_view(),
    }
}
