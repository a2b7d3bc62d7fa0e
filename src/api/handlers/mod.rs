//! HTTP request handlers for API endpoints.

pub mod redirect;
pub mod shorten;

pub use redirect::{method_not_allowed, redirect_handler, root_handler};
pub use shorten::shorten_handler;
