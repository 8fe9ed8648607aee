pub mod client;
pub mod session;
pub mod types;
mod users;
mod vacations;

pub use client::*;
pub use session::Session;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests;
