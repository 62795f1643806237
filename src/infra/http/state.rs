use crate::application::content::ContentService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub contents: ContentService,
}
