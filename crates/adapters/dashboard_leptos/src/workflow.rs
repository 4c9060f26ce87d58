//! View models for the dashboard.
//!
//! Everything here is plain Rust with no DOM access, so the rules the
//! components follow (which rows to draw, where a save goes, what a purge
//! submission sends) are unit-tested natively.

use purgehub_domain::config::{ConfigDraft, PurgeConfig};
use purgehub_domain::id::ConfigId;
use purgehub_domain::purge::{PurgeMethod, PurgeRequest, PurgeType};
use purgehub_domain::reply::ActionReply;
use purgehub_domain::time;

/// Text of the single row shown when no configuration exists.
pub const EMPTY_TABLE: &str = "No configurations yet. Add one to get started.";

/// Column count of the configuration table.
pub const TABLE_COLUMNS: u32 = 6;

/// Text of the blank first selector option.
pub const SELECT_PROMPT: &str = "Select a configuration";

/// Question asked before deleting a configuration.
pub const DELETE_PROMPT: &str = "Delete this configuration?";

const UNKNOWN_ERROR: &str = "unknown error";
const PURGE_SUBMITTED: &str = "Cache purge task submitted";
const PURGE_FAILED: &str = "Submission failed";
const LOGIN_FAILED: &str = "Login failed, please try again";

/// Shown on the login page when the request itself failed.
pub const LOGIN_NETWORK_ERROR: &str = "Network error, please try again";

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Configs,
    Purge,
}

impl Tab {
    pub const ALL: [Self; 2] = [Self::Configs, Self::Purge];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Configs => "configs",
            Self::Purge => "purge",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Configs => "Configurations",
            Self::Purge => "Purge cache",
        }
    }

    /// Whether entering this tab must refetch the purge selector options.
    #[must_use]
    pub fn refreshes_selector(self) -> bool {
        self == Self::Purge
    }
}

/// Where a configuration form is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update(ConfigId),
}

impl SaveTarget {
    #[must_use]
    pub fn url(self) -> String {
        match self {
            Self::Create => "/api/configs".to_string(),
            Self::Update(id) => format!("/api/configs/{id}"),
        }
    }

    /// Only a new configuration changes what the purge selector offers.
    #[must_use]
    pub fn refreshes_selector(self) -> bool {
        self == Self::Create
    }
}

/// State of the create/edit modal.
///
/// `editing` is `None` in create mode. It is set when the modal opens on an
/// existing record and cleared whenever the modal closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub open: bool,
    pub editing: Option<ConfigId>,
    pub draft: ConfigDraft,
}

impl EditorState {
    /// Open on an empty form.
    #[must_use]
    pub fn create() -> Self {
        Self {
            open: true,
            editing: None,
            draft: ConfigDraft::default(),
        }
    }

    /// Open pre-filled from a fetched record, secrets included.
    #[must_use]
    pub fn edit(config: &PurgeConfig) -> Self {
        Self {
            open: true,
            editing: Some(config.id),
            draft: ConfigDraft::from_config(config),
        }
    }

    /// Close and forget which record was being edited.
    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Configuration"
        } else {
            "Add Configuration"
        }
    }

    #[must_use]
    pub fn save_target(&self) -> SaveTarget {
        self.editing.map_or(SaveTarget::Create, SaveTarget::Update)
    }
}

/// One rendered row of the configuration table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRow {
    pub id: ConfigId,
    pub name: String,
    pub secret_id: String,
    pub zone_id: String,
    pub region: &'static str,
    /// RFC 3339 text with millisecond precision, localised by the view.
    pub updated_at: String,
}

impl From<&PurgeConfig> for ConfigRow {
    fn from(config: &PurgeConfig) -> Self {
        Self {
            id: config.id,
            name: config.display_name().to_string(),
            secret_id: config.secret_id.clone(),
            zone_id: config.zone_id.clone(),
            region: config.region.label(),
            updated_at: time::format_millis(config.updated_at),
        }
    }
}

/// Body of the configuration table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Placeholder,
    Rows(Vec<ConfigRow>),
}

impl TableBody {
    #[must_use]
    pub fn from_configs(configs: &[PurgeConfig]) -> Self {
        if configs.is_empty() {
            Self::Placeholder
        } else {
            Self::Rows(configs.iter().map(ConfigRow::from).collect())
        }
    }

    /// Number of `<tr>` elements the body renders.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self {
            Self::Placeholder => 1,
            Self::Rows(rows) => rows.len(),
        }
    }
}

/// An `<option>` of the purge configuration selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub value: String,
    pub label: String,
}

/// Selector options: a blank prompt followed by one entry per configuration.
#[must_use]
pub fn selector_options(configs: &[PurgeConfig]) -> Vec<SelectorOption> {
    let prompt = SelectorOption {
        value: String::new(),
        label: SELECT_PROMPT.to_string(),
    };
    std::iter::once(prompt)
        .chain(configs.iter().map(|config| SelectorOption {
            value: config.id.to_string(),
            label: format!("{} ({})", config.display_name(), config.zone_id),
        }))
        .collect()
}

/// The purge form as the user filled it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeForm {
    /// Selected option value; empty when nothing is selected.
    pub config_id: String,
    pub purge_type: PurgeType,
    pub method: PurgeMethod,
    /// Raw textarea content, one target per line.
    pub targets: String,
}

impl PurgeForm {
    #[must_use]
    pub fn targets_visible(&self) -> bool {
        self.purge_type.takes_targets()
    }

    /// Build the request to send.
    ///
    /// # Errors
    ///
    /// Returns a message when no configuration is selected.
    pub fn to_request(&self) -> Result<PurgeRequest, String> {
        let config_id: ConfigId = self
            .config_id
            .parse()
            .map_err(|_| "Select a configuration first".to_string())?;
        Ok(PurgeRequest::from_form(
            config_id,
            self.purge_type,
            self.method,
            &self.targets,
        ))
    }

    /// `value` the purge-type `<select>` must show.
    #[must_use]
    pub fn purge_type_value(&self) -> String {
        self.purge_type.as_str().to_string()
    }

    /// `value` the method `<select>` must show.
    #[must_use]
    pub fn method_value(&self) -> String {
        self.method.as_str().to_string()
    }

    /// `value` the configuration `<select>` must show.
    #[must_use]
    pub fn config_value(&self) -> String {
        self.config_id.clone()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Content of the purge result area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PurgeStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl PurgeStatus {
    /// Interpret a purge reply.
    #[must_use]
    pub fn from_reply(reply: &ActionReply) -> Self {
        if reply.success {
            Self::Succeeded(reply.message_or(PURGE_SUBMITTED).to_string())
        } else {
            Self::Failed(reply.message_or(PURGE_FAILED).to_string())
        }
    }

    /// The request never produced a reply.
    #[must_use]
    pub fn network(error: &str) -> Self {
        Self::Failed(format!("Network error: {error}"))
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Idle | Self::Submitting => "result-message",
            Self::Succeeded(_) => "result-message success",
            Self::Failed(_) => "result-message error",
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Submitting => "Submitting...".to_string(),
            Self::Succeeded(message) => format!("\u{2713} {message}"),
            Self::Failed(message) => format!("\u{2717} {message}"),
        }
    }
}

/// Alert text for a failed mutation, e.g. `Save failed: zone_id is required`.
#[must_use]
pub fn failure_alert(action: &str, reply: &ActionReply) -> String {
    format!("{action} failed: {}", reply.message_or(UNKNOWN_ERROR))
}

/// Id to send a delete for, or `None` when the user declined.
#[must_use]
pub fn delete_request(confirmed: bool, id: ConfigId) -> Option<ConfigId> {
    confirmed.then_some(id)
}

/// What the dashboard does once a save or delete has been answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AfterMutation {
    /// Refetch the table, and the purge selector too when `selector` is set.
    Refresh { selector: bool },
    /// Leave local state untouched and tell the user.
    Alert(String),
}

impl AfterMutation {
    #[must_use]
    pub fn saved(target: SaveTarget, reply: &ActionReply) -> Self {
        if reply.success {
            Self::Refresh {
                selector: target.refreshes_selector(),
            }
        } else {
            Self::Alert(failure_alert("Save", reply))
        }
    }

    #[must_use]
    pub fn deleted(reply: &ActionReply) -> Self {
        if reply.success {
            Self::Refresh { selector: true }
        } else {
            Self::Alert(failure_alert("Delete", reply))
        }
    }

    /// The request never produced a reply.
    #[must_use]
    pub fn network(action: &str, error: &str) -> Self {
        Self::Alert(format!("{action} failed: {error}"))
    }
}

/// Apply a table fetch. Success replaces the list wholesale; failure leaves
/// it as it was and hands the error back.
///
/// # Errors
///
/// Returns the fetch error unchanged.
pub fn apply_fetch<E>(
    configs: &mut Vec<PurgeConfig>,
    fetched: Result<Vec<PurgeConfig>, E>,
) -> Result<(), E> {
    *configs = fetched?;
    Ok(())
}

/// What the login page does with a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Navigate(String),
    ShowError(String),
}

impl LoginOutcome {
    #[must_use]
    pub fn from_reply(reply: &ActionReply) -> Self {
        match (&reply.redirect, reply.success) {
            (Some(target), true) => Self::Navigate(target.clone()),
            _ => Self::ShowError(reply.message_or(LOGIN_FAILED).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use purgehub_domain::config::Region;

    fn config(id: i64, name: Option<&str>, zone: &str) -> PurgeConfig {
        let at = time::parse("2024-05-01T08:30:00Z").unwrap();
        PurgeConfig {
            id: ConfigId::new(id),
            name: name.map(str::to_string),
            secret_id: "AKIDabcd***".to_string(),
            secret_key: "***".to_string(),
            zone_id: zone.to_string(),
            region: Region::from("cn"),
            created_at: at,
            updated_at: at,
        }
    }

    fn reply(success: bool, message: Option<&str>) -> ActionReply {
        ActionReply {
            success,
            message: message.map(str::to_string),
            ..ActionReply::default()
        }
    }

    #[test]
    fn should_render_one_row_per_config() {
        let configs = vec![config(1, Some("prod"), "z1"), config(2, None, "z2")];
        let body = TableBody::from_configs(&configs);
        assert_eq!(body.row_count(), 2);

        let TableBody::Rows(rows) = body else {
            panic!("expected rows");
        };
        assert_eq!(rows[1].name, "Unnamed");
        assert_eq!(rows[0].region, "Domestic");
        assert_eq!(rows[0].updated_at, "2024-05-01T08:30:00.000Z");
    }

    #[test]
    fn should_render_single_placeholder_row_when_empty() {
        let body = TableBody::from_configs(&[]);
        assert_eq!(body, TableBody::Placeholder);
        assert_eq!(body.row_count(), 1);
    }

    #[test]
    fn should_lead_selector_with_blank_prompt() {
        let options = selector_options(&[config(3, None, "zone-x")]);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "");
        assert_eq!(options[1].value, "3");
        assert_eq!(options[1].label, "Unnamed (zone-x)");
    }

    #[test]
    fn should_target_collection_when_creating_and_record_when_editing() {
        let create = EditorState::create();
        assert_eq!(create.title(), "Add Configuration");
        assert_eq!(create.save_target().url(), "/api/configs");
        assert!(create.save_target().refreshes_selector());

        let edit = EditorState::edit(&config(7, Some("prod"), "z"));
        assert_eq!(edit.title(), "Edit Configuration");
        assert_eq!(edit.save_target(), SaveTarget::Update(ConfigId::new(7)));
        assert_eq!(edit.save_target().url(), "/api/configs/7");
        assert!(!edit.save_target().refreshes_selector());
    }

    #[test]
    fn should_prefill_edit_form_and_clear_marker_on_close() {
        let mut editor = EditorState::edit(&config(7, Some("prod"), "zone-7"));
        assert_eq!(editor.draft.zone_id, "zone-7");
        assert_eq!(editor.draft.name.as_deref(), Some("prod"));

        editor.close();

        assert!(!editor.open);
        assert_eq!(editor.editing, None);
    }

    #[test]
    fn should_reset_form_when_opening_create_after_edit() {
        let mut editor = EditorState::edit(&config(7, Some("prod"), "zone-7"));
        editor.close();
        editor = EditorState::create();
        assert_eq!(editor.draft, ConfigDraft::default());
        assert!(editor.open);
    }

    #[test]
    fn should_hide_targets_and_send_none_for_purge_all() {
        let form = PurgeForm {
            config_id: "4".to_string(),
            purge_type: PurgeType::PurgeAll,
            method: PurgeMethod::Delete,
            targets: "https://example.com/a".to_string(),
        };
        assert!(!form.targets_visible());
        let request = form.to_request().unwrap();
        assert!(request.targets.is_empty());
        assert_eq!(request.config_id, ConfigId::new(4));
    }

    #[test]
    fn should_show_and_parse_targets_for_targeted_purge() {
        let form = PurgeForm {
            config_id: "4".to_string(),
            purge_type: PurgeType::PurgeUrl,
            method: PurgeMethod::Invalidate,
            targets: "a\n b \n\nc".to_string(),
        };
        assert!(form.targets_visible());
        assert_eq!(form.to_request().unwrap().targets, vec!["a", "b", "c"]);
    }

    #[test]
    fn should_refuse_request_without_selected_config() {
        assert!(PurgeForm::default().to_request().is_err());
    }

    #[test]
    fn should_reset_purge_form_to_hidden_targets() {
        let mut form = PurgeForm {
            config_id: "1".to_string(),
            purge_type: PurgeType::PurgeHost,
            method: PurgeMethod::Invalidate,
            targets: "example.com".to_string(),
        };
        form.reset();
        assert_eq!(form, PurgeForm::default());
        assert!(!form.targets_visible());
    }

    #[test]
    fn should_point_selects_back_at_defaults_after_reset() {
        let mut form = PurgeForm {
            config_id: "2".to_string(),
            purge_type: PurgeType::PurgeUrl,
            method: PurgeMethod::Delete,
            targets: "https://example.com/a".to_string(),
        };
        assert_eq!(form.purge_type_value(), "purge_url");
        assert_eq!(form.config_value(), "2");

        form.reset();

        assert_eq!(form.purge_type_value(), PurgeType::PurgeAll.as_str());
        assert_eq!(form.method_value(), PurgeMethod::default().as_str());
        assert_eq!(form.config_value(), "");
        assert_eq!(form.to_request().unwrap_err(), "Select a configuration first");
    }

    #[test]
    fn should_surface_server_message_in_purge_status() {
        let ok = PurgeStatus::from_reply(&reply(true, Some("Purge task submitted (delete)")));
        assert_eq!(ok.text(), "\u{2713} Purge task submitted (delete)");
        assert_eq!(ok.class(), "result-message success");

        let failed = PurgeStatus::from_reply(&reply(false, Some("zone not found")));
        assert!(failed.text().contains("zone not found"));
        assert_eq!(failed.class(), "result-message error");

        let fallback = PurgeStatus::from_reply(&reply(false, None));
        assert!(fallback.text().contains("Submission failed"));
    }

    #[test]
    fn should_prefix_network_errors() {
        let status = PurgeStatus::network("connection refused");
        assert_eq!(status.text(), "\u{2717} Network error: connection refused");
        assert_eq!(PurgeStatus::Submitting.text(), "Submitting...");
    }

    #[test]
    fn should_read_failure_reply_without_optional_fields() {
        let reply: ActionReply =
            serde_json::from_str(r#"{"success":false,"message":"login required"}"#).unwrap();
        assert!(!reply.success);
        assert_eq!(failure_alert("Save", &reply), "Save failed: login required");
    }

    #[test]
    fn should_include_server_message_in_failure_alert() {
        assert_eq!(
            failure_alert("Save", &reply(false, Some("X"))),
            "Save failed: X"
        );
        assert_eq!(
            failure_alert("Delete", &reply(false, None)),
            "Delete failed: unknown error"
        );
    }

    #[test]
    fn should_send_nothing_when_delete_is_declined() {
        assert_eq!(delete_request(false, ConfigId::new(3)), None);
        assert_eq!(
            delete_request(true, ConfigId::new(3)),
            Some(ConfigId::new(3))
        );
    }

    #[test]
    fn should_refresh_after_successful_mutation() {
        assert_eq!(
            AfterMutation::saved(SaveTarget::Create, &ActionReply::ok()),
            AfterMutation::Refresh { selector: true }
        );
        assert_eq!(
            AfterMutation::saved(SaveTarget::Update(ConfigId::new(1)), &ActionReply::ok()),
            AfterMutation::Refresh { selector: false }
        );
        assert_eq!(
            AfterMutation::deleted(&ActionReply::ok()),
            AfterMutation::Refresh { selector: true }
        );
    }

    #[test]
    fn should_only_alert_after_failed_mutation() {
        assert_eq!(
            AfterMutation::saved(SaveTarget::Create, &reply(false, Some("zone_id is required"))),
            AfterMutation::Alert("Save failed: zone_id is required".to_string())
        );
        assert_eq!(
            AfterMutation::deleted(&reply(false, None)),
            AfterMutation::Alert("Delete failed: unknown error".to_string())
        );
        assert_eq!(
            AfterMutation::network("Delete", "connection refused"),
            AfterMutation::Alert("Delete failed: connection refused".to_string())
        );
    }

    #[test]
    fn should_keep_config_list_when_fetch_fails() {
        let mut configs = vec![config(1, Some("prod"), "z1")];

        let result = apply_fetch(&mut configs, Err("offline"));

        assert_eq!(result, Err("offline"));
        assert_eq!(configs, vec![config(1, Some("prod"), "z1")]);
    }

    #[test]
    fn should_replace_config_list_when_fetch_succeeds() {
        let mut configs = vec![config(1, Some("prod"), "z1")];

        apply_fetch::<()>(&mut configs, Ok(vec![config(2, None, "z2")])).unwrap();

        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].id, ConfigId::new(2));
    }

    #[test]
    fn should_navigate_only_on_successful_login_with_redirect() {
        let signed_in = ActionReply::ok().with_redirect("/dashboard");
        assert_eq!(
            LoginOutcome::from_reply(&signed_in),
            LoginOutcome::Navigate("/dashboard".to_string())
        );
        assert_eq!(
            LoginOutcome::from_reply(&reply(false, Some("invalid username or password"))),
            LoginOutcome::ShowError("invalid username or password".to_string())
        );
        assert_eq!(
            LoginOutcome::from_reply(&reply(false, None)),
            LoginOutcome::ShowError(LOGIN_FAILED.to_string())
        );
    }

    #[test]
    fn should_refresh_selector_only_when_entering_purge_tab() {
        assert!(Tab::Purge.refreshes_selector());
        assert!(!Tab::Configs.refreshes_selector());
        assert_eq!(Tab::default(), Tab::Configs);
    }
}
