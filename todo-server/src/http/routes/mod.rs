//! Route handlers organized by resource

pub mod root;
pub mod todos;
