pub mod clean;
pub mod fetch;
pub mod links;

// Re-export command functions for convenience
pub use clean::clean;
pub use fetch::fetch;
pub use links::links;
