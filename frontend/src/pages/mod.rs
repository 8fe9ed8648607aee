pub mod admin;
pub mod mobile;
pub mod vacations;

pub use admin::AdminPage;
pub use mobile::MobileVacationsPage;
pub use vacations::VacationsPage;
