pub mod expander;

pub use expander::Expander;
