//! Rendering Error Types

use thiserror::Error;

/// Errors that can occur while rendering an alert batch
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing the block of one alert failed
    #[error("Failed to write block for alert #{index}: {source}")]
    Block {
        index: usize,
        #[source]
        source: std::fmt::Error,
    },

    /// Writing the separators around the blocks failed
    #[error("Failed to write message frame: {0}")]
    Frame(#[source] std::fmt::Error),
}
