//! Utility modules for the publishing pipeline.

pub mod date;
pub mod exec;
pub mod html;
pub mod plural;
pub mod slug;

pub use plural::{plural_count, plural_s};
