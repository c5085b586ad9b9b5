pub mod demo;
pub mod format;
