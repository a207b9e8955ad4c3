mod browser;
mod track_map;
#[cfg(test)]
mod tests;

pub use browser::open_in_browser;
pub use track_map::{RenderError, TrackMap};
