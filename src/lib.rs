//! Choropleth map of average mohair auction prices per South African
//! province.
//!
//! Boundaries are projected once per frame ([`scene::MapLayer`]), auction
//! results are reduced to per-province averages and colour tiers
//! ([`scene::MapModel`]), and both are joined into a [`scene::Scene`] that
//! the terminal renderers in [`render`] and the SVG exporter in [`svg`] draw.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod data;
pub mod error;
pub mod interaction;
pub mod labels;
pub mod projection;
pub mod regions;
pub mod render;
pub mod sales;
pub mod scene;
pub mod state;
pub mod svg;
pub mod ui;

pub use error::AtlasError;
