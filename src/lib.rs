pub mod assessment;
pub mod chat;
pub mod config;
pub mod education;
pub mod error;
pub mod session;
pub mod telemetry;
