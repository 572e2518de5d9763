pub mod config;
pub mod domain;

pub use domain::account;
pub use domain::clock;
