pub mod completions;
pub mod send;
pub mod show;
