use std::path::Path;

use rand::Rng;
use serde::Deserialize;

use crate::error::AtlasError;

/// One ranked producer result from an auction report.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ProducerSale {
    pub region: String,
    pub rank: u32,
    pub producer: String,
    #[serde(default)]
    pub district: String,
    /// Price in rand per kilogram.
    pub price: f64,
    #[serde(default)]
    pub micron: Option<f64>,
    pub certified: bool,
    #[serde(default)]
    pub buyer: String,
}

/// Ranked results for one auction.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AuctionReport {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sales: Vec<ProducerSale>,
}

impl AuctionReport {
    pub fn label(&self) -> &str {
        if self.title.is_empty() { &self.id } else { &self.title }
    }
}

#[derive(Deserialize)]
struct ReportFile {
    auctions: Vec<AuctionReport>,
}

/// Parses a report document: `{ "auctions": [ ... ] }`.
pub fn parse_reports(bytes: &[u8]) -> Result<Vec<AuctionReport>, AtlasError> {
    let file: ReportFile = serde_json::from_slice(bytes)?;
    Ok(file.auctions)
}

pub fn load_reports<P: AsRef<Path>>(path: P) -> Result<Vec<AuctionReport>, AtlasError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AtlasError::MissingFile { path: path.to_path_buf() });
    }
    let reports = parse_reports(&std::fs::read(path)?)?;
    log::info!("Loaded {} auction reports from {}", reports.len(), path.display());
    Ok(reports)
}

/// Formats a price per kilogram; zero means "no sales".
pub fn format_price(value: f64) -> String {
    if value > 0.0 {
        format!("R {value:.2}/kg")
    } else {
        "–".to_string()
    }
}

const DEMO_PRODUCERS: [&str; 8] = [
    "Bokkraal Boerdery",
    "Kareekloof Trust",
    "Vlakteplaas",
    "Rietvallei Angoras",
    "Doornhoek Familie",
    "Skilpadfontein",
    "Grootrivier Mohair",
    "Soetendal",
];

const DEMO_BUYERS: [&str; 4] = ["BKB", "Mohair SA Buyers", "Stucken", "Forestal"];

/// Random ranked report for running without real data.
///
/// Each listed region gets between zero and twelve sales, ranked by
/// descending price, roughly a quarter of them non-certified.
pub fn demo_report<R: Rng>(rng: &mut R, regions: &[&str]) -> AuctionReport {
    let mut sales = Vec::new();
    for region in regions {
        let base = rng.random_range(120.0..320.0);
        let count = rng.random_range(0..=12);
        let mut prices: Vec<f64> = (0..count)
            .map(|_| (base * rng.random_range(0.7..1.3_f64) * 100.0).round() / 100.0)
            .collect();
        prices.sort_by(|a, b| b.total_cmp(a));
        for (i, price) in prices.into_iter().enumerate() {
            sales.push(ProducerSale {
                region: region.to_string(),
                rank: i as u32 + 1,
                producer: DEMO_PRODUCERS[rng.random_range(0..DEMO_PRODUCERS.len())].to_string(),
                district: format!("{region} district"),
                price,
                micron: Some(rng.random_range(24.0..36.0_f64).round()),
                certified: rng.random_bool(0.75),
                buyer: DEMO_BUYERS[rng.random_range(0..DEMO_BUYERS.len())].to_string(),
            });
        }
    }
    log::debug!("generated demo report with {} sales", sales.len());
    AuctionReport {
        id: "demo".to_string(),
        title: "Demo auction".to_string(),
        sales,
    }
}
