//! State owned by the dashboard view.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use purgehub_domain::config::PurgeConfig;
use purgehub_domain::id::ConfigId;

use crate::api;
use crate::browser;
use crate::workflow::{self, AfterMutation, EditorState, SelectorOption, Tab};

/// Reactive state shared by the dashboard components.
///
/// `configs` is only ever replaced wholesale by [`DashboardState::reload_configs`].
#[derive(Clone, Copy)]
pub struct DashboardState {
    pub configs: RwSignal<Vec<PurgeConfig>>,
    pub selector: RwSignal<Vec<SelectorOption>>,
    pub editor: RwSignal<EditorState>,
    pub tab: RwSignal<Tab>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            configs: RwSignal::new(Vec::new()),
            selector: RwSignal::new(workflow::selector_options(&[])),
            editor: RwSignal::new(EditorState::default()),
            tab: RwSignal::new(Tab::default()),
        }
    }

    /// Refetch the table. A failed fetch keeps the current rows.
    pub fn reload_configs(self) {
        spawn_local(async move {
            let fetched = api::fetch_configs().await;
            let mut failure = None;
            self.configs
                .maybe_update(|configs| match workflow::apply_fetch(configs, fetched) {
                    Ok(()) => true,
                    Err(err) => {
                        failure = Some(err);
                        false
                    }
                });
            if let Some(err) = failure {
                warn!("load configs failed: {err}");
            }
        });
    }

    /// Refetch the purge selector options.
    pub fn reload_selector(self) {
        spawn_local(async move {
            match api::fetch_configs().await {
                Ok(configs) => self.selector.set(workflow::selector_options(&configs)),
                Err(err) => warn!("load purge selector failed: {err}"),
            }
        });
    }

    pub fn open_create(self) {
        self.editor.set(EditorState::create());
    }

    /// Fetch the record in plaintext, then open the modal on it.
    pub fn open_edit(self, id: ConfigId) {
        spawn_local(async move {
            match api::fetch_config(id).await {
                Ok(config) => self.editor.set(EditorState::edit(&config)),
                Err(err) => {
                    warn!("load config {id} failed: {err}");
                    browser::alert(&format!("Loading configuration failed: {err}"));
                }
            }
        });
    }

    pub fn close_editor(self) {
        self.editor.update(EditorState::close);
    }

    /// Save the modal form; on success close it and refresh what changed.
    pub fn save(self) {
        let (target, draft) = self
            .editor
            .with_untracked(|editor| (editor.save_target(), editor.draft.clone()));
        spawn_local(async move {
            let outcome = match api::save_config(target, &draft).await {
                Ok(reply) => AfterMutation::saved(target, &reply),
                Err(err) => {
                    warn!("save config failed: {err}");
                    AfterMutation::network("Save", &err.to_string())
                }
            };
            if matches!(outcome, AfterMutation::Refresh { .. }) {
                self.close_editor();
            }
            self.finish(outcome);
        });
    }

    /// Delete after confirmation. Declining sends nothing.
    pub fn delete(self, id: ConfigId) {
        let Some(id) = workflow::delete_request(browser::confirm(workflow::DELETE_PROMPT), id)
        else {
            return;
        };
        spawn_local(async move {
            let outcome = match api::delete_config(id).await {
                Ok(reply) => AfterMutation::deleted(&reply),
                Err(err) => {
                    warn!("delete config {id} failed: {err}");
                    AfterMutation::network("Delete", &err.to_string())
                }
            };
            self.finish(outcome);
        });
    }

    /// Refetch what a mutation changed, or report why it did not happen.
    fn finish(self, outcome: AfterMutation) {
        match outcome {
            AfterMutation::Refresh { selector } => {
                self.reload_configs();
                if selector {
                    self.reload_selector();
                }
            }
            AfterMutation::Alert(text) => browser::alert(&text),
        }
    }

    pub fn switch_tab(self, tab: Tab) {
        self.tab.set(tab);
        if tab.refreshes_selector() {
            self.reload_selector();
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
