use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use geo::Geometry;
use geojson::{Feature, GeoJson, feature::Id};

use crate::{error::AtlasError, sales::AuctionReport};

/// Static boundary of one administrative region.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionBoundary {
    pub id: String,
    pub name: String,
    /// `None` when the source geometry was missing or unusable; such regions
    /// are skipped when the map is projected.
    pub geometry: Option<Geometry<f64>>,
}

const NAME_KEYS: [&str; 4] = ["name", "shapeName", "NAME_1", "ADMIN"];
const ID_KEYS: [&str; 4] = ["id", "shapeISO", "ISO", "HASC_1"];

fn string_property(feature: &Feature, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| feature.property(k).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn boundary_from_feature(feature: Feature) -> Option<RegionBoundary> {
    let Some(name) = string_property(&feature, &NAME_KEYS) else {
        log::warn!("skipping boundary feature without a name property");
        return None;
    };
    let id = string_property(&feature, &ID_KEYS)
        .or_else(|| match &feature.id {
            Some(Id::String(s)) => Some(s.clone()),
            Some(Id::Number(n)) => Some(n.to_string()),
            None => None,
        })
        .unwrap_or_else(|| name.clone());

    let geometry = match feature.geometry {
        Some(gj) => match Geometry::<f64>::try_from(gj.value) {
            Ok(g @ (Geometry::Polygon(_) | Geometry::MultiPolygon(_))) => Some(g),
            Ok(_) => {
                log::warn!("{name}: geometry is not polygonal");
                None
            }
            Err(e) => {
                log::warn!("{name}: unusable geometry: {e}");
                None
            }
        },
        None => {
            log::warn!("{name}: feature has no geometry");
            None
        }
    };

    Some(RegionBoundary { id, name, geometry })
}

/// Reads region boundaries out of a GeoJSON `FeatureCollection`.
pub fn parse_boundaries(text: &str, origin: &Path) -> Result<Vec<RegionBoundary>, AtlasError> {
    match GeoJson::from_str(text)? {
        GeoJson::FeatureCollection(fc) => {
            Ok(fc.features.into_iter().filter_map(boundary_from_feature).collect())
        }
        _ => Err(AtlasError::NotAFeatureCollection { path: origin.to_path_buf() }),
    }
}

/// Loads boundaries and auction reports from one data directory.
pub struct DataCache {
    base: PathBuf,
}

impl DataCache {
    pub fn new<P: AsRef<Path>>(base: P) -> Self {
        Self { base: base.as_ref().to_path_buf() }
    }

    pub fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() { file.to_path_buf() } else { self.base.join(file) }
    }

    pub fn load_boundaries(&self, file: &Path) -> Result<Vec<RegionBoundary>, AtlasError> {
        let path = self.resolve(file);
        if !path.exists() {
            return Err(AtlasError::MissingFile { path });
        }
        let boundaries = parse_boundaries(&fs::read_to_string(&path)?, &path)?;
        log::info!("Loaded {} region boundaries from {}", boundaries.len(), path.display());
        Ok(boundaries)
    }

    pub fn load_reports(&self, file: &Path) -> Result<Vec<AuctionReport>, AtlasError> {
        crate::sales::load_reports(self.resolve(file))
    }
}
