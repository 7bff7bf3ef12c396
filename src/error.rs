//! Initialization errors
//!
//! The simulation itself never fails; only loading level data and acquiring
//! the host drawing context can.

use thiserror::Error;

/// Problems with level data
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level `{name}` is not valid JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("level `{name}` has non-positive dimensions or a ground line outside the world")]
    InvalidDimensions { name: String },
    #[error("no levels to play")]
    Empty,
}

/// Fatal problems while bringing the game up
#[derive(Debug, Error)]
pub enum InitError {
    #[error("no browser window or document")]
    NoWindow,
    #[error("canvas element `{0}` not found")]
    MissingCanvas(String),
    #[error("could not get 2D context from canvas")]
    NoDrawingContext,
    #[error(transparent)]
    Level(#[from] LevelError),
}
