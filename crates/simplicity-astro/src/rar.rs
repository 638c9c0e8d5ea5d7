// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — RAR Threshold Dataset
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Baryonic surface density against dark-matter fraction.
//!
//! Reads a SPARC summary CSV whose column names vary between exports,
//! and carries a curated list of reference galaxies.

use serde::Serialize;
use simplicity_types::error::{SimplicityError, SimplicityResult};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::square_rule::square_rule_fraction;

pub const SIGMA_ALIASES: [&str; 4] = ["mu0", "sigma_b", "sigma_baryon", "surfacedensity"];
pub const DM_FRACTION_ALIASES: [&str; 4] = ["f_dm", "dm_fraction", "dark_matter_frac", "dmfrac"];

/// One galaxy in the (μ0, f_DM) plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RarPoint {
    /// μ0 [M☉/pc²].
    pub mu0: f64,
    pub f_dm: f64,
    pub name: Option<String>,
}

/// Reference galaxies: (μ0 [M☉/pc²], f_DM, name).
pub const CURATED_GALAXIES: [(f64, f64, &str); 23] = [
    (150.0, 0.05, "NGC 1052-DF2"),
    (120.0, 0.10, "NGC 1052-DF4"),
    (2.3, 0.99, "Dragonfly 44"),
    (60.0, 0.55, "NGC 2403"),
    (80.0, 0.45, "UGC 4325"),
    (200.0, 0.15, "NGC 2841"),
    (100.0, 0.38, "NGC 6503"),
    (160.0, 0.18, "NGC 6946"),
    (130.0, 0.22, "NGC 2976"),
    (10.0, 0.93, "IC 2574"),
    (6.0, 0.97, "UGC 128"),
    (110.0, 0.40, "NGC 3198"),
    (170.0, 0.19, "NGC 7331"),
    (180.0, 0.16, "NGC 5055"),
    (120.0, 0.35, "NGC 7793"),
    (70.0, 0.57, "NGC 925"),
    (150.0, 0.20, "NGC 2903"),
    (4.0, 0.99, "DDO 154"),
    (8.0, 0.95, "F568-1"),
    (9.0, 0.96, "UGC 5750"),
    (30.0, 0.72, "NGC 1003"),
    (20.0, 0.80, "UGC 1281"),
    (140.0, 0.24, "NGC 3992"),
];

pub fn curated_points() -> Vec<RarPoint> {
    CURATED_GALAXIES
        .iter()
        .map(|&(mu0, f_dm, name)| RarPoint {
            mu0,
            f_dm,
            name: Some(name.to_string()),
        })
        .collect()
}

fn find_column(headers: &[String], aliases: &[&str]) -> SimplicityResult<usize> {
    headers
        .iter()
        .position(|h| aliases.contains(&h.as_str()))
        .ok_or_else(|| SimplicityError::MissingColumn {
            expected: aliases.iter().map(|a| a.to_string()).collect(),
            available: headers.to_vec(),
        })
}

/// Parse a summary CSV from any reader.
///
/// Keeps rows with finite values and μ0 > 0; an optional `galaxy`/`name`
/// column is carried as the label.
pub fn read_rar_csv<R: Read>(reader: R) -> SimplicityResult<Vec<RarPoint>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect();

    let sigma_idx = find_column(&headers, &SIGMA_ALIASES)?;
    let dm_idx = find_column(&headers, &DM_FRACTION_ALIASES)?;
    let name_idx = headers.iter().position(|h| h == "galaxy" || h == "name");

    let mut points = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let cell = |i: usize| record.get(i).map(str::trim).and_then(|s| s.parse::<f64>().ok());
        let (Some(mu0), Some(f_dm)) = (cell(sigma_idx), cell(dm_idx)) else {
            debug!(row = row + 2, "unparseable RAR row dropped");
            continue;
        };
        if !(mu0 > 0.0 && mu0.is_finite() && f_dm.is_finite()) {
            debug!(row = row + 2, mu0, f_dm, "invalid RAR row dropped");
            continue;
        }
        let name = name_idx
            .and_then(|i| record.get(i))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        points.push(RarPoint { mu0, f_dm, name });
    }
    Ok(points)
}

pub fn load_rar_csv(path: impl AsRef<Path>) -> SimplicityResult<Vec<RarPoint>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let points = read_rar_csv(file)?;
    info!(path = %path.display(), points = points.len(), "loaded RAR summary");
    Ok(points)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SideStats {
    pub count: usize,
    /// NaN when `count == 0`.
    pub mean_f_dm: f64,
}

impl SideStats {
    fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        let mean_f_dm = if count == 0 {
            f64::NAN
        } else {
            values.iter().sum::<f64>() / count as f64
        };
        SideStats { count, mean_f_dm }
    }
}

/// How the sample splits at Σ*.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdSummary {
    pub sigma_star: f64,
    /// μ0 < Σ*.
    pub below: SideStats,
    /// μ0 ≥ Σ*.
    pub above: SideStats,
    /// Mean |f_DM − (1 − (μ0/Σ*)²)₊|.
    pub mean_abs_deviation: f64,
}

pub fn threshold_summary(points: &[RarPoint], sigma_star: f64) -> ThresholdSummary {
    let (below, above): (Vec<&RarPoint>, Vec<&RarPoint>) = points.iter().partition(|p| p.mu0 < sigma_star);
    let f = |side: &[&RarPoint]| side.iter().map(|p| p.f_dm).collect::<Vec<_>>();
    let deviation = if points.is_empty() {
        f64::NAN
    } else {
        points
            .iter()
            .map(|p| (p.f_dm - square_rule_fraction(p.mu0, sigma_star, 1.0)).abs())
            .sum::<f64>()
            / points.len() as f64
    };
    ThresholdSummary {
        sigma_star,
        below: SideStats::from_values(&f(&below)),
        above: SideStats::from_values(&f(&above)),
        mean_abs_deviation: deviation,
    }
}

impl std::fmt::Display for ThresholdSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sigma*            = {:.1}  Msol/pc²", self.sigma_star)?;
        writeln!(
            f,
            "below threshold   : {:>4} galaxies, <f_DM> = {:.3}",
            self.below.count, self.below.mean_f_dm
        )?;
        writeln!(
            f,
            "above threshold   : {:>4} galaxies, <f_DM> = {:.3}",
            self.above.count, self.above.mean_f_dm
        )?;
        write!(f, "<|f_DM - f_SR|>   = {:.3}", self.mean_abs_deviation)
    }
}
