pub mod diff;
pub mod list;
