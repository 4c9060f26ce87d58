//! Purge submission form.

use leptos::ev;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use purgehub_domain::purge::{PurgeMethod, PurgeType};

use crate::api;
use crate::state::DashboardState;
use crate::workflow::{self, PurgeStatus};

#[component]
pub fn PurgeForm(state: DashboardState) -> impl IntoView {
    let form = RwSignal::new(workflow::PurgeForm::default());
    let status = RwSignal::new(PurgeStatus::default());

    let on_submit = move |event: ev::SubmitEvent| {
        event.prevent_default();
        status.set(PurgeStatus::Submitting);
        let request = match form.with_untracked(workflow::PurgeForm::to_request) {
            Ok(request) => request,
            Err(message) => {
                status.set(PurgeStatus::Failed(message));
                return;
            }
        };
        spawn_local(async move {
            match api::submit_purge(&request).await {
                Ok(reply) => {
                    if reply.success {
                        form.update(workflow::PurgeForm::reset);
                    }
                    status.set(PurgeStatus::from_reply(&reply));
                }
                Err(err) => {
                    warn!("purge failed: {err}");
                    status.set(PurgeStatus::network(&err.message));
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit>
            <div class="form-group">
                <label for="purgeConfig">"Configuration"</label>
                <select
                    id="purgeConfig"
                    required
                    prop:value=move || {
                        state.selector.track();
                        form.with(workflow::PurgeForm::config_value)
                    }
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.config_id = value);
                    }
                >
                    {move || {
                        state
                            .selector
                            .get()
                            .into_iter()
                            .map(|option| {
                                view! { <option value=option.value>{option.label}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </div>
            <div class="form-group">
                <label for="purgeType">"Purge type"</label>
                <select
                    id="purgeType"
                    prop:value=move || form.with(workflow::PurgeForm::purge_type_value)
                    on:change=move |ev| {
                        let code = event_target_value(&ev);
                        let purge_type = PurgeType::from_code(&code).unwrap_or_default();
                        form.update(|f| f.purge_type = purge_type);
                    }
                >
                    {PurgeType::ALL
                        .into_iter()
                        .map(|purge_type| {
                            view! { <option value=purge_type.as_str()>{purge_type.label()}</option> }
                        })
                        .collect_view()}
                </select>
            </div>
            <div class="form-group">
                <label for="purgeMethod">"Method"</label>
                <select
                    id="purgeMethod"
                    prop:value=move || form.with(workflow::PurgeForm::method_value)
                    on:change=move |ev| {
                        let code = event_target_value(&ev);
                        let method = PurgeMethod::from_code(&code).unwrap_or_default();
                        form.update(|f| f.method = method);
                    }
                >
                    {PurgeMethod::ALL
                        .into_iter()
                        .map(|method| {
                            view! { <option value=method.as_str()>{method.label()}</option> }
                        })
                        .collect_view()}
                </select>
            </div>
            <div
                class="form-group"
                style:display=move || if form.with(workflow::PurgeForm::targets_visible) { "flex" } else { "none" }
            >
                <label for="targets">"Targets (one per line)"</label>
                <textarea
                    id="targets"
                    rows="6"
                    prop:value=move || form.with(|f| f.targets.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.targets = value);
                    }
                ></textarea>
            </div>
            <button type="submit" class="btn btn-primary">"Submit"</button>
            <div class=move || status.with(PurgeStatus::class)>{move || status.with(PurgeStatus::text)}</div>
        </form>
    }
}
