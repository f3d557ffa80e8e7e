//! `storefront` command-line front end.
//!
//! Loads a catalog into a `Store` and drives it from a line-oriented text menu.
//! No business rules live here.

pub mod catalog;
pub mod config;
pub mod menu;

pub use config::Config;
pub use menu::{Flow, MenuAction, Session};
