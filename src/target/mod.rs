pub mod collection;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use collection::Targets;
pub use parser::TargetParser;
pub use types::{Header, ParseError, ParseResult, Target};
