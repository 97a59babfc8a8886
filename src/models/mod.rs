pub mod entry;
pub mod habit;
pub mod mood;
pub mod objective;
pub mod snapshot;
