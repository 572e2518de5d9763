pub mod account;
pub mod clock;
