pub mod api;
pub mod config;
pub mod core_state;
pub mod ledger;
pub mod pipeline;
