// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Table Records
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// One row of the SPARC galaxy metadata table.
/// Units follow the published byte-by-byte description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxyMeta {
    pub name: String,
    pub hubble_type: Option<i32>,        // T, 0 = S0 .. 11 = BCD
    pub distance_mpc: Option<f64>,       // D
    pub distance_err_mpc: Option<f64>,   // e_D
    pub distance_method: Option<i32>,    // f_D
    pub inclination_deg: Option<f64>,    // Inc
    pub inclination_err_deg: Option<f64>, // e_Inc
    pub luminosity_3p6: Option<f64>,     // L[3.6] [1e9 L☉]
    pub luminosity_3p6_err: Option<f64>, // e_L[3.6]
    pub r_eff_kpc: Option<f64>,          // Reff
    pub sb_eff: Option<f64>,             // SBeff [L☉/pc²]
    pub r_disk_kpc: Option<f64>,         // Rdisk
    pub sb_disk: Option<f64>,            // SBdisk, central [L☉/pc²]
    pub m_hi: Option<f64>,               // MHI [1e9 M☉]
    pub r_hi_kpc: Option<f64>,           // RHI
    pub v_flat: Option<f64>,             // Vflat [km/s]
    pub v_flat_err: Option<f64>,         // e_Vflat
    pub quality: Option<u8>,             // Q, 1 = high .. 3 = low
    pub references: String,
}

impl GalaxyMeta {
    /// Metadata row with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        GalaxyMeta {
            name: name.into(),
            hubble_type: None,
            distance_mpc: None,
            distance_err_mpc: None,
            distance_method: None,
            inclination_deg: None,
            inclination_err_deg: None,
            luminosity_3p6: None,
            luminosity_3p6_err: None,
            r_eff_kpc: None,
            sb_eff: None,
            r_disk_kpc: None,
            sb_disk: None,
            m_hi: None,
            r_hi_kpc: None,
            v_flat: None,
            v_flat_err: None,
            quality: None,
            references: String::new(),
        }
    }
}

/// One radius sample of a mass-model rotation curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationPoint {
    pub radius_kpc: f64,
    pub v_obs: f64,  // km/s
    pub err_v: f64,  // km/s
    pub v_gas: f64,  // km/s, signed
    pub v_disk: f64, // km/s at Υ = 1
    pub v_bul: f64,  // km/s at Υ = 1
    pub sb_disk: f64, // L☉/pc²
    pub sb_bul: f64,  // L☉/pc²
}

/// A galaxy rotation curve, ordered by radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationCurve {
    pub name: String,
    pub distance_mpc: Option<f64>,
    pub points: Vec<RotationPoint>,
}

impl RotationCurve {
    /// Build a curve, sorting points by radius.
    pub fn new(name: impl Into<String>, distance_mpc: Option<f64>, mut points: Vec<RotationPoint>) -> Self {
        points.sort_by(|a, b| a.radius_kpc.total_cmp(&b.radius_kpc));
        RotationCurve {
            name: name.into(),
            distance_mpc,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest sampled radius [kpc], 0 for an empty curve.
    pub fn max_radius(&self) -> f64 {
        self.points.last().map(|p| p.radius_kpc).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(r: f64) -> RotationPoint {
        RotationPoint {
            radius_kpc: r,
            v_obs: 100.0,
            err_v: 5.0,
            v_gas: 10.0,
            v_disk: 50.0,
            v_bul: 0.0,
            sb_disk: 100.0,
            sb_bul: 0.0,
        }
    }

    #[test]
    fn test_curve_sorted_by_radius() {
        let curve = RotationCurve::new("X", None, vec![point(3.0), point(1.0), point(2.0)]);
        let radii: Vec<f64> = curve.points.iter().map(|p| p.radius_kpc).collect();
        assert_eq!(radii, vec![1.0, 2.0, 3.0]);
        assert!((curve.max_radius() - 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_empty_curve() {
        let curve = RotationCurve::new("Empty", Some(10.0), Vec::new());
        assert!(curve.is_empty());
        assert_eq!(curve.max_radius(), 0.0);
    }

    #[test]
    fn test_named_meta_defaults() {
        let meta = GalaxyMeta::named("NGC 3198");
        assert_eq!(meta.name, "NGC 3198");
        assert!(meta.quality.is_none());
        assert!(meta.references.is_empty());
    }
}
