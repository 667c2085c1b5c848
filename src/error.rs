use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("invalid level dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("invalid setting: {0}")]
    InvalidSetting(&'static str),
    #[error("missing asset {}", .0.display())]
    MissingAsset(PathBuf),
    #[error("no image configured for tile type {0}")]
    NoTileImage(u8),
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
}
