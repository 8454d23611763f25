use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading boundaries and auction reports.
///
/// Everything downstream of loading (projection, aggregation, colouring,
/// labelling, interaction) degrades instead of failing.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Boundary GeoJSON could not be parsed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A required input file does not exist.
    #[error("missing input file: {}", path.display())]
    MissingFile {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The boundary file is valid GeoJSON but not a feature collection.
    #[error("{} is not a GeoJSON FeatureCollection", path.display())]
    NotAFeatureCollection {
        /// Offending file.
        path: PathBuf,
    },

    /// An auction id was requested that no loaded report carries.
    #[error("no auction with id {id:?}")]
    UnknownAuction {
        /// Requested id.
        id: String,
    },
}
