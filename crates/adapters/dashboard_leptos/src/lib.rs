use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

pub mod api;
mod browser;
mod components;
mod pages;
mod state;
pub mod workflow;

use pages::{Dashboard, LoginPage, NotFound};

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=path!("/login") view=LoginPage/>
                <Route path=path!("/dashboard") view=Dashboard/>
            </Routes>
        </Router>
    }
}
