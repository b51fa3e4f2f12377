use incident_model::Choice;
use leptos::*;

/// `<option>` elements for every value of `T`, with `current` selected.
pub fn choice_options<T: Choice>(current: impl Fn() -> Option<T> + Copy + 'static) -> View {
    T::ALL
        .iter()
        .copied()
        .map(|choice| {
            view! {
              <option value=choice.as_str() prop:selected=move || current() == Some(choice)>
                {choice.as_str()}
              </option>
            }
        })
        .collect_view()
}
