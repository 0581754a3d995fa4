pub mod body;
pub mod materializer;

// Re-export commonly used types for convenient access
pub use body::FileSpec;
pub use materializer::Materializer;
