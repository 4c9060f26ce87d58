//! Create/edit modal for a configuration.

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use purgehub_domain::config::Region;

use crate::state::DashboardState;

/// Modal form bound to [`DashboardState::editor`].
///
/// Mounted only while the editor is open. A pointer-down whose target is
/// the backdrop itself closes it.
#[component]
pub fn ConfigModal(state: DashboardState) -> impl IntoView {
    let editor = state.editor;
    let backdrop = NodeRef::<html::Div>::new();

    let handle = window_event_listener(ev::pointerdown, move |event| {
        let (Some(target), Some(element)) = (event.target(), backdrop.get_untracked()) else {
            return;
        };
        if js_sys::Object::is(&target, &element) {
            state.close_editor();
        }
    });
    on_cleanup(move || handle.remove());

    let on_submit = move |event: ev::SubmitEvent| {
        event.prevent_default();
        state.save();
    };

    view! {
        <div class="modal" node_ref=backdrop>
            <div class="modal-content">
                <h2>{move || editor.with(|e| e.title())}</h2>
                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="configName">"Name"</label>
                        <input
                            id="configName"
                            type="text"
                            prop:value=move || editor.with(|e| e.draft.name.clone().unwrap_or_default())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                editor.update(|e| e.draft.name = Some(value));
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="secretId">"SecretId"</label>
                        <input
                            id="secretId"
                            type="text"
                            required
                            prop:value=move || editor.with(|e| e.draft.secret_id.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                editor.update(|e| e.draft.secret_id = value);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="secretKey">"SecretKey"</label>
                        <input
                            id="secretKey"
                            type="text"
                            required
                            prop:value=move || editor.with(|e| e.draft.secret_key.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                editor.update(|e| e.draft.secret_key = value);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="zoneId">"Zone ID"</label>
                        <input
                            id="zoneId"
                            type="text"
                            required
                            prop:value=move || editor.with(|e| e.draft.zone_id.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                editor.update(|e| e.draft.zone_id = value);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="region">"Region"</label>
                        <select
                            id="region"
                            prop:value=move || editor.with(|e| e.draft.region.as_str().to_string())
                            on:change=move |ev| {
                                let region = Region::from(event_target_value(&ev));
                                editor.update(|e| e.draft.region = region);
                            }
                        >
                            {Region::ALL
                                .into_iter()
                                .map(|region| {
                                    view! { <option value=region.as_str()>{region.label()}</option> }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <button type="submit" class="btn btn-primary">"Save"</button>
                    " "
                    <button type="button" class="btn" on:click=move |_| state.close_editor()>
                        "Cancel"
                    </button>
                </form>
            </div>
        </div>
    }
}
