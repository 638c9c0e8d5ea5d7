// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Dark-Hole Radius
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dark-hole radius: the radius at which a point mass spread over a sphere
//! reaches the critical surface density.
//!
//! `r_DH = sqrt(M / (4π Σ*))` [pc] for `M` in M☉ and `Σ*` in M☉/pc².

use simplicity_types::error::{SimplicityError, SimplicityResult};
use std::f64::consts::PI;

/// Reference compact objects (name, mass [M☉]).
pub const BLACK_HOLE_CATALOG: [(&str, f64); 4] = [
    ("Sgr A*", 4.3e6),
    ("M87*", 6.5e9),
    ("NGC 1277", 1.7e10),
    ("Cygnus X-1", 14.8),
];

#[derive(Debug, Clone, PartialEq)]
pub struct DarkHoleEntry {
    pub name: String,
    pub mass_msun: f64,
    pub r_dh_pc: f64,
}

pub fn dark_hole_radius(mass_msun: f64, sigma_star: f64) -> SimplicityResult<f64> {
    if !mass_msun.is_finite() || mass_msun < 0.0 {
        return Err(SimplicityError::InvalidParameter(format!(
            "mass must be non-negative and finite, got {mass_msun}"
        )));
    }
    if !sigma_star.is_finite() || sigma_star <= 0.0 {
        return Err(SimplicityError::InvalidParameter(format!(
            "Σ* must be positive, got {sigma_star}"
        )));
    }
    Ok((mass_msun / (4.0 * PI * sigma_star)).sqrt())
}

/// Evaluate r_DH for the built-in catalog followed by `extra` entries.
pub fn dark_hole_table(extra: &[(String, f64)], sigma_star: f64) -> SimplicityResult<Vec<DarkHoleEntry>> {
    BLACK_HOLE_CATALOG
        .iter()
        .map(|(n, m)| (n.to_string(), *m))
        .chain(extra.iter().cloned())
        .map(|(name, mass_msun)| {
            Ok(DarkHoleEntry {
                r_dh_pc: dark_hole_radius(mass_msun, sigma_star)?,
                name,
                mass_msun,
            })
        })
        .collect()
}

/// Text table with `r_DH` rounded to 3 decimals.
pub fn format_dark_hole_table(entries: &[DarkHoleEntry], sigma_star: f64) -> String {
    let mut out = format!("Sigma* = {sigma_star:.1} Msol/pc²\n");
    out.push_str(&format!("{:<14} {:>12} {:>12}\n", "Name", "M [Msol]", "r_DH [pc]"));
    for e in entries {
        out.push_str(&format!("{:<14} {:>12.3e} {:>12.3}\n", e.name, e.mass_msun, e.r_dh_pc));
    }
    out
}

/// Parse a `NAME=MASS` command-line pair.
pub fn parse_mass_entry(s: &str) -> SimplicityResult<(String, f64)> {
    let (name, mass) = s
        .split_once('=')
        .ok_or_else(|| SimplicityError::InvalidParameter(format!("expected NAME=MASS, got '{s}'")))?;
    let mass: f64 = mass
        .trim()
        .parse()
        .map_err(|e| SimplicityError::InvalidParameter(format!("bad mass in '{s}': {e}")))?;
    Ok((name.trim().to_string(), mass))
}
