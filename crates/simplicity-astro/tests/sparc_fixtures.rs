// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — SPARC Fixture Pipeline Tests
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! End-to-end reading of sample SPARC files through the Square-Rule fit.

use simplicity_astro::rar::{load_rar_csv, threshold_summary};
use simplicity_astro::sparc::{load_rotation_dir, load_sparc_table};
use simplicity_astro::square_rule::{select_sample, summarize_galaxy, Regime, SquareRuleParams};
use simplicity_types::config::SparcConfig;
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn test_metadata_table_columns() {
    let table = load_sparc_table(fixtures().join("SPARC_Lelli2016c.mrt")).unwrap();
    assert_eq!(table.len(), 3);

    let ddo = &table[0];
    assert_eq!(ddo.name, "DDO154");
    assert_eq!(ddo.hubble_type, Some(10));
    assert_eq!(ddo.distance_mpc, Some(4.04));
    assert_eq!(ddo.sb_disk, Some(20.37));
    assert_eq!(ddo.v_flat, Some(47.0));
    assert_eq!(ddo.quality, Some(2));
    assert_eq!(ddo.references, "ROTCUR");

    // Abutting fields still split on byte positions.
    let ngc = &table[2];
    assert_eq!(ngc.m_hi, Some(10.869));
    assert_eq!(ngc.r_hi_kpc, Some(34.74));
    assert_eq!(ngc.v_flat, Some(150.1));
    assert_eq!(table[1].quality, Some(3));
}

#[test]
fn test_rotation_dir_sorted_by_file_name() {
    let curves = load_rotation_dir(fixtures()).unwrap();
    let names: Vec<&str> = curves.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["DDO154", "F574-2", "NGC3198"]);
    assert_eq!(curves[2].len(), 10);
    assert_eq!(curves[2].distance_mpc, Some(13.8));
    assert_eq!(curves[2].points[0].sb_disk, 1164.16);
}

#[test]
fn test_square_rule_pipeline_on_fixtures() {
    let table = load_sparc_table(fixtures().join("SPARC_Lelli2016c.mrt")).unwrap();
    let curves = load_rotation_dir(fixtures()).unwrap();
    let params = SquareRuleParams::default();
    let sample = select_sample(&table, &curves, &SparcConfig::default(), &[]);
    // F574-2 has only two points.
    assert_eq!(sample.len(), 2);

    let summaries: Vec<_> = sample
        .iter()
        .map(|(meta, curve)| summarize_galaxy(meta, curve, &params).unwrap())
        .collect();
    let ddo = &summaries[0];
    assert_eq!(ddo.regime, Some(Regime::DarkDominated));
    assert!(ddo.fit.fraction.iter().all(|&f| f > 0.9));
    assert!(ddo.fit.v_pred.iter().zip(ddo.fit.v_bar.iter()).all(|(p, b)| p >= b));

    let ngc = &summaries[1];
    assert_eq!(ngc.regime, Some(Regime::BaryonDominated));
    // Inner high-density points are not amplified.
    assert_eq!(ngc.fit.fraction[0], 0.0);
    assert_eq!(ngc.fit.v_pred[0], ngc.fit.v_bar[0]);
    assert!(ngc.fit.rms_kms.is_finite());
}

#[test]
fn test_summary_csv_filters_rows() {
    let points = load_rar_csv(fixtures().join("SPARC_summary.csv")).unwrap();
    let names: Vec<_> = points.iter().filter_map(|p| p.name.as_deref()).collect();
    assert_eq!(names, vec!["DDO154", "NGC3198", "F574-2", "NGC2403"]);
    let summary = threshold_summary(&points, 124.0);
    assert_eq!(summary.above.count, 1);
    assert_eq!(summary.below.count, 3);
}
