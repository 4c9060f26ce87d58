mod config_modal;
mod config_table;
mod purge_form;
mod tabs;
mod topbar;

pub use config_modal::ConfigModal;
pub use config_table::ConfigTable;
pub use purge_form::PurgeForm;
pub use tabs::Tabs;
pub use topbar::Topbar;
