pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod placeholder;
pub mod target;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, StressError};
pub use http::Materializer;
pub use placeholder::Expander;
pub use target::{Header, Target, Targets};
