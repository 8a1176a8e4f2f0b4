// Library surface for headless/integration tests and reuse.
// Rendering stays in the binary; everything here runs without a terminal.
pub mod aim;
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod ranking;
pub mod results;
pub mod runtime;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod typing;

pub use error::{ReflexError, Result};
