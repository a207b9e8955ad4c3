use super::RenderError;
use crate::log;
use std::path::Path;

/// Opens `path` with the host's default browser.
///
/// # Errors
/// Returns [`RenderError::BrowserLaunch`] if no handler could be started.
pub fn open_in_browser(path: &Path) -> Result<(), RenderError> {
    log!("Opening {} in the default browser", path.display());
    open::that(path).map_err(RenderError::BrowserLaunch)
}
