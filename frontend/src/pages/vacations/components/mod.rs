pub mod calendar;
pub mod delete_dialog;
pub mod detail;
pub mod filter;
pub mod form;
pub mod list;
pub mod status_badge;
pub mod user_lookup;
