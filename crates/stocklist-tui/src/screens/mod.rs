//! Screen components.

pub mod catalog;
