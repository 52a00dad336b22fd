pub mod backend;
pub mod config;
pub mod discovery;
pub mod error;
pub mod session;
pub mod signup;
pub mod telemetry;
