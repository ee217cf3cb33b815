//! Search Box Component

use leptos::prelude::*;

/// Raw search input; pages debounce the value before filtering
#[component]
pub fn SearchBox(
    query: RwSignal<String>,
    #[prop(into)] placeholder: String,
) -> impl IntoView {
    view! {
        <div class="search-box">
            <input
                type="search"
                placeholder=placeholder
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <Show when=move || !query.get().is_empty()>
                <button class="search-clear" on:click=move |_| query.set(String::new())>"×"</button>
            </Show>
        </div>
    }
}
