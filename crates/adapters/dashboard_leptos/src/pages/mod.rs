mod dashboard;
mod login;
mod not_found;

pub use dashboard::Dashboard;
pub use login::LoginPage;
pub use not_found::NotFound;
