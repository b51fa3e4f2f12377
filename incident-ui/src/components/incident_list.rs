use crate::bridge::HttpBridge;
use crate::components::choice::choice_options;
use crate::hooks::{now, TimerSlot};
use incident_core::{messages, IncidentApi, ListController, ListView, Route, SortDirection, SortField};
use incident_model::{Choice, DisplayStyle, Incident, Service, Severity, Status};
use leptos::*;
use leptos_router::A;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn IncidentList() -> impl IntoView {
    let api = store_value(expect_context::<HttpBridge>());
    let list = create_rw_signal(ListController::default());
    let search_timer = TimerSlot::new();

    let fetch = move || {
        let Some(ticket) = list.try_update(ListController::poll_fetch).flatten() else {
            return;
        };
        let api = api.get_value();
        spawn_local(async move {
            let result = api.list_incidents(&ticket.query).await;
            list.try_update(|c| c.finish(ticket.id, result));
        });
    };

    on_cleanup(move || {
        list.try_update_untracked(ListController::dispose);
    });
    fetch();

    let on_search = move |ev: ev::Event| {
        let text = event_target_value(&ev);
        let Some((ticket, delay)) = list.try_update(|c| (c.input_search(text, now()), c.search_delay())) else {
            return;
        };
        search_timer.arm(delay, move || {
            list.try_update(|c| c.settle_search(ticket));
            fetch();
        });
    };

    let clear = move |_: ev::MouseEvent| {
        search_timer.clear();
        list.update(ListController::clear_filters);
        fetch();
    };

    let service = move || list.with(|c| c.query().service);
    let severity = move || list.with(|c| c.query().severity);
    let status = move || list.with(|c| c.query().status);

    let view_state = create_memo(move |_| list.with(|c| c.view().clone()));

    let header = move |field: SortField| {
        let indicator = move || {
            list.with(|c| {
                let sort = c.query().sort;
                if sort.field != field {
                    ""
                } else if sort.direction == SortDirection::Asc {
                    "▲"
                } else {
                    "▼"
                }
            })
        };
        view! {
          <th class="sortable" on:click=move |_| {
            list.update(|c| c.toggle_sort(field));
            fetch();
          }>
            {field.label()} " " <span class="sort-indicator">{indicator}</span>
          </th>
        }
    };

    view! {
      <div class="stack">
        <div class="toolbar">
          <h1>"Incident Tracker"</h1>
          <A href=Route::Create.path() class="btn btn-primary">"+ New Incident"</A>
        </div>

        <div class="panel filters">
          <input
            type="text"
            class="input search"
            placeholder="Search incidents..."
            prop:value=move || list.with(|c| c.search_input().to_string())
            on:input=on_search
          />
          <select class="input" on:change=move |ev| {
            list.update(|c| c.set_service(Service::parse_optional(&event_target_value(&ev))));
            fetch();
          }>
            <option value="" prop:selected=move || service().is_none()>"All Services"</option>
            {choice_options(service)}
          </select>
          <select class="input" on:change=move |ev| {
            list.update(|c| c.set_severity(Severity::parse_optional(&event_target_value(&ev))));
            fetch();
          }>
            <option value="" prop:selected=move || severity().is_none()>"All Severities"</option>
            {choice_options(severity)}
          </select>
          <select class="input" on:change=move |ev| {
            list.update(|c| c.set_status(Status::parse_optional(&event_target_value(&ev))));
            fetch();
          }>
            <option value="" prop:selected=move || status().is_none()>"All Statuses"</option>
            {choice_options(status)}
          </select>
          <Show when=move || list.with(ListController::can_clear)>
            <button class="link" on:click=clear>"Clear Filters"</button>
          </Show>
        </div>

        {move || match view_state.get() {
          ListView::Failed(message) => view! { <div class="alert">{message}</div> }.into_view(),
          ListView::Loading => view! { <div class="panel muted center">"Loading incidents..."</div> }.into_view(),
          ListView::Loaded(rows) => view! {
            <div class="panel">
              <table class="table">
                <thead>
                  <tr>
                    <th>"Title"</th>
                    {SortField::COLUMNS.into_iter().map(header).collect_view()}
                    <th>"Owner"</th>
                    <th>"Actions"</th>
                  </tr>
                </thead>
                <tbody>{incident_rows(rows)}</tbody>
              </table>
              <div class="pager">
                <span class="muted">{move || list.with(|c| c.pager().label())}</span>
                <div class="row">
                  <button
                    class="btn btn-secondary"
                    disabled=move || list.with(|c| !c.pager().can_previous())
                    on:click=move |_| {
                      list.update(ListController::previous_page);
                      fetch();
                    }
                  >"Previous"</button>
                  <button
                    class="btn btn-secondary"
                    disabled=move || list.with(|c| !c.pager().can_next())
                    on:click=move |_| {
                      list.update(ListController::next_page);
                      fetch();
                    }
                  >"Next"</button>
                </div>
              </div>
            </div>
          }.into_view(),
        }}
      </div>
    }
}

fn incident_rows(rows: Vec<Incident>) -> View {
    if rows.is_empty() {
        return view! {
          <tr><td colspan="7" class="empty">{messages::NO_RESULTS}</td></tr>
        }
        .into_view();
    }
    rows.into_iter()
        .map(|incident| {
            let href = Route::Detail(incident.id.clone()).path();
            let created = incident.created_display(DisplayStyle::Short);
            let owner = incident.owner_or_dash().to_string();
            view! {
              <tr>
                <td class="strong">{incident.title}</td>
                <td>{incident.service.as_str()}</td>
                <td><span class=incident.severity.badge_class()>{incident.severity.as_str()}</span></td>
                <td><span class=incident.status.badge_class()>{incident.status.as_str()}</span></td>
                <td class="muted">{created}</td>
                <td class="muted">{owner}</td>
                <td><A href=href class="link">"Edit"</A></td>
              </tr>
            }
        })
        .collect_view()
}
