//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::RedbLinkRepository;

/// Handles shared by every request.
///
/// Cloning is cheap; all members are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<RedbLinkRepository>>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService<RedbLinkRepository>>) -> Self {
        Self { link_service }
    }
}
