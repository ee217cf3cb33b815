//! Toast Stack Component

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_app_context();
    let toasts = ctx.toasts();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class() on:click=move |_| ctx.dismiss(id)>
                            {toast.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
