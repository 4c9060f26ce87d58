use leptos::prelude::*;

use crate::workflow::Tab;

/// Tab strip; exactly one tab is active.
#[component]
pub fn Tabs(active: RwSignal<Tab>, #[prop(into)] on_switch: Callback<Tab>) -> impl IntoView {
    view! {
        <div class="tabs">
            {Tab::ALL
                .into_iter()
                .map(|tab| {
                    view! {
                        <button
                            type="button"
                            class="tab-btn"
                            class:active=move || active.get() == tab
                            data-tab=tab.id()
                            on:click=move |_| on_switch.run(tab)
                        >
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
