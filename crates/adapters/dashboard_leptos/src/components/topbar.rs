use leptos::prelude::*;

#[component]
pub fn Topbar() -> impl IntoView {
    view! {
        <header class="topbar">
            <strong>"purgehub"</strong>
            <a href="/logout" rel="external">"Log out"</a>
        </header>
    }
}
