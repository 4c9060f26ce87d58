use leptos::prelude::*;

use crate::components::{ConfigModal, ConfigTable, PurgeForm, Tabs, Topbar};
use crate::state::DashboardState;
use crate::workflow::Tab;

/// Configuration management and purge submission, one tab each.
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = DashboardState::new();
    state.reload_configs();
    state.reload_selector();

    let editor_open = move || state.editor.with(|e| e.open);

    view! {
        <Topbar/>
        <main>
            <Tabs active=state.tab on_switch=move |tab: Tab| state.switch_tab(tab)/>
            <Show when=move || state.tab.get() == Tab::Configs>
                <section id="configs">
                    <p>
                        <button type="button" class="btn btn-primary" on:click=move |_| state.open_create()>
                            "Add Configuration"
                        </button>
                    </p>
                    <ConfigTable state=state/>
                </section>
            </Show>
            <Show when=move || state.tab.get() == Tab::Purge>
                <section id="purge">
                    <PurgeForm state=state/>
                </section>
            </Show>
            <Show when=editor_open>
                <ConfigModal state=state/>
            </Show>
        </main>
    }
}
