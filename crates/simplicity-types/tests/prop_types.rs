// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Property-Based Tests (proptest) for simplicity-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for simplicity-types using proptest.
//!
//! Covers: RotationCurve ordering, config validation ranges.

use proptest::prelude::*;
use simplicity_types::config::{AnalysisConfig, SquareRuleConfig};
use simplicity_types::records::{RotationCurve, RotationPoint};

fn point(r: f64) -> RotationPoint {
    RotationPoint {
        radius_kpc: r,
        v_obs: 80.0,
        err_v: 3.0,
        v_gas: 20.0,
        v_disk: 40.0,
        v_bul: 0.0,
        sb_disk: 50.0,
        sb_bul: 0.0,
    }
}

// ── RotationCurve Invariants ─────────────────────────────────────────

proptest! {
    /// Radii are non-decreasing for any input order.
    #[test]
    fn curve_radii_sorted(radii in prop::collection::vec(0.0f64..50.0, 0..64)) {
        let n = radii.len();
        let curve = RotationCurve::new("G", None, radii.into_iter().map(point).collect());
        prop_assert_eq!(curve.len(), n);
        for i in 1..curve.len() {
            prop_assert!(curve.points[i].radius_kpc >= curve.points[i - 1].radius_kpc);
        }
    }

    /// max_radius equals the largest input radius.
    #[test]
    fn curve_max_radius(radii in prop::collection::vec(0.0f64..50.0, 1..64)) {
        let expected = radii.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let curve = RotationCurve::new("G", None, radii.into_iter().map(point).collect());
        prop_assert!((curve.max_radius() - expected).abs() < 1e-12);
    }
}

// ── Config Validation ────────────────────────────────────────────────

proptest! {
    /// Every f_max in [0, 1) is accepted.
    #[test]
    fn config_accepts_f_max_in_range(f_max in 0.0f64..0.999) {
        let cfg = AnalysisConfig {
            square_rule: SquareRuleConfig { f_max, ..SquareRuleConfig::default() },
            ..AnalysisConfig::default()
        };
        prop_assert!(cfg.validate().is_ok());
    }

    /// Non-positive Σ* is rejected.
    #[test]
    fn config_rejects_nonpositive_sigma(sigma in -500.0f64..=0.0) {
        let cfg = AnalysisConfig {
            sigma_star: Some(sigma),
            ..AnalysisConfig::default()
        };
        prop_assert!(cfg.validate().is_err());
    }
}
