use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::labels::{DESKTOP_LABELS, LabelStyle, MOBILE_LABELS};
use crate::projection::{DESKTOP_FRAME, MOBILE_FRAME, ProjectionFrame};

/// Which presentation draws the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Full-size map, hover with the mouse.
    #[default]
    Desktop,
    /// Compact map, click to select, detail panel below.
    Mobile,
}

impl Layout {
    pub fn frame(self) -> ProjectionFrame {
        match self {
            Layout::Desktop => DESKTOP_FRAME,
            Layout::Mobile => MOBILE_FRAME,
        }
    }

    pub fn label_style(self) -> LabelStyle {
        match self {
            Layout::Desktop => DESKTOP_LABELS,
            Layout::Mobile => MOBILE_LABELS,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Layout::Desktop => Layout::Mobile,
            Layout::Mobile => Layout::Desktop,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "mohair-atlas", about = "Provincial mohair auction price map")]
pub struct Cli {
    /// Directory holding the boundary and report files
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Province boundaries (GeoJSON FeatureCollection), relative to the data dir
    #[arg(long, default_value = "provinces.geojson")]
    pub boundaries: PathBuf,

    /// Auction reports (JSON), relative to the data dir
    #[arg(long, default_value = "reports.json")]
    pub reports: PathBuf,

    /// Initial presentation
    #[arg(long, value_enum, default_value_t = Layout::Desktop)]
    pub layout: Layout,

    /// Use a generated auction report instead of the reports file
    #[arg(long)]
    pub demo: bool,

    /// Auction id to select at start
    #[arg(long)]
    pub auction: Option<String>,

    /// Write the map as SVG to this path and exit
    #[arg(long)]
    pub svg: Option<PathBuf>,
}
