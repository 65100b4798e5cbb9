pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod cookie;
pub mod error;
pub mod identity;
pub mod state;
pub mod workflow;
