pub mod calendar;
pub mod components;
pub mod form;
pub mod layout;
pub mod lookup;
pub mod panel;
pub mod repository;
pub mod types;
pub mod utils;
pub mod view_model;

pub use panel::VacationsPage;
