use leptos::ev;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::browser;
use crate::workflow::{self, LoginOutcome};

/// Credential form. Navigates to the server-supplied redirect on success.
#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());

    let on_submit = move |event: ev::SubmitEvent| {
        event.prevent_default();
        error.set(String::new());
        let (user, pass) = (username.get_untracked(), password.get_untracked());
        spawn_local(async move {
            match api::login(&user, &pass).await {
                Ok(reply) => match LoginOutcome::from_reply(&reply) {
                    LoginOutcome::Navigate(target) => browser::navigate(&target),
                    LoginOutcome::ShowError(message) => error.set(message),
                },
                Err(err) => {
                    warn!("login failed: {err}");
                    error.set(workflow::LOGIN_NETWORK_ERROR.to_string());
                }
            }
        });
    };

    view! {
        <div class="login-box">
            <h1>"purgehub"</h1>
            <form on:submit=on_submit>
                <div class="form-group">
                    <label for="username">"Username"</label>
                    <input
                        id="username"
                        name="username"
                        type="text"
                        required
                        autocomplete="username"
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        name="password"
                        type="password"
                        required
                        autocomplete="current-password"
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary">"Log in"</button>
                <div id="errorMessage" class="error-message">{move || error.get()}</div>
            </form>
        </div>
    }
}
