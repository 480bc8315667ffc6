pub mod entry;
pub mod progress;
