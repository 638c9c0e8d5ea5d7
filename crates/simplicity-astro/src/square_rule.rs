// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Square-Rule Velocity Amplification
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Square-Rule model for galaxy rotation curves.
//!
//! Below the critical surface density the baryonic velocity is amplified:
//! `f = 1 − (Σ/Σ*)²`, `V_pred = V_bar / sqrt(1 − f)`.
//! Above Σ* the fraction is zero and `V_pred = V_bar`.

use ndarray::Array1;
use simplicity_math::stats::{mean, reduced_chi_square, rms_residual};
use simplicity_types::config::{AnalysisConfig, SparcConfig};
use simplicity_types::constants::DEFAULT_SIGMA_STAR;
use simplicity_types::error::{SimplicityError, SimplicityResult};
use simplicity_types::records::{GalaxyMeta, RotationCurve, RotationPoint};
use std::fmt;
use tracing::{debug, warn};

use crate::sigma_crit::effective_sigma_star;
use crate::sparc::normalize_name;

/// Fraction above which a galaxy counts as dark-dominated.
const DARK_DOMINATED_F: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareRuleParams {
    /// Σ* [M☉/pc²].
    pub sigma_star: f64,
    pub upsilon_disk: f64,
    pub upsilon_bulge: f64,
    pub f_max: f64,
    /// Error floor for χ² [km/s].
    pub min_error_kms: f64,
}

impl SquareRuleParams {
    pub fn from_config(config: &AnalysisConfig) -> SimplicityResult<Self> {
        config.validate()?;
        let sr = &config.square_rule;
        Ok(SquareRuleParams {
            sigma_star: effective_sigma_star(config)?,
            upsilon_disk: sr.upsilon_disk,
            upsilon_bulge: sr.upsilon_bulge,
            f_max: sr.f_max,
            min_error_kms: sr.min_error_kms,
        })
    }
}

impl Default for SquareRuleParams {
    fn default() -> Self {
        let shipped = AnalysisConfig::shipped();
        let sr = &shipped.square_rule;
        SquareRuleParams {
            sigma_star: shipped.sigma_star.unwrap_or(DEFAULT_SIGMA_STAR),
            upsilon_disk: sr.upsilon_disk,
            upsilon_bulge: sr.upsilon_bulge,
            f_max: sr.f_max,
            min_error_kms: sr.min_error_kms,
        }
    }
}

/// `clamp(1 − (Σ/Σ*)², 0, f_max)`; non-positive Σ gives `f_max`.
pub fn square_rule_fraction(sigma: f64, sigma_star: f64, f_max: f64) -> f64 {
    if !(sigma > 0.0) {
        return f_max;
    }
    (1.0 - (sigma / sigma_star).powi(2)).clamp(0.0, f_max)
}

/// Velocity amplification `1/sqrt(1 − f)`.
pub fn amplification(f: f64) -> f64 {
    1.0 / (1.0 - f).sqrt()
}

/// Baryonic surface density at one radius [M☉/pc²].
pub fn baryonic_surface_density(p: &RotationPoint, upsilon_disk: f64, upsilon_bulge: f64) -> f64 {
    upsilon_disk * p.sb_disk + upsilon_bulge * p.sb_bul
}

/// Baryonic circular velocity [km/s]; signed components allow net inward gas.
pub fn baryonic_velocity(p: &RotationPoint, upsilon_disk: f64, upsilon_bulge: f64) -> f64 {
    let v2 = p.v_gas * p.v_gas.abs()
        + upsilon_disk * p.v_disk * p.v_disk.abs()
        + upsilon_bulge * p.v_bul * p.v_bul.abs();
    v2.max(0.0).sqrt()
}

/// Per-radius Square-Rule columns and fit scores for one galaxy.
#[derive(Debug, Clone)]
pub struct SquareRuleFit {
    pub name: String,
    pub radius_kpc: Array1<f64>,
    pub sigma: Array1<f64>,
    pub fraction: Array1<f64>,
    pub v_bar: Array1<f64>,
    pub v_pred: Array1<f64>,
    pub v_obs: Array1<f64>,
    pub err_v: Array1<f64>,
    pub rms_kms: f64,
    pub chi2_reduced: f64,
    pub mean_fraction: f64,
}

pub fn analyze_curve(curve: &RotationCurve, params: &SquareRuleParams) -> SimplicityResult<SquareRuleFit> {
    if curve.is_empty() {
        return Err(SimplicityError::InvalidParameter(format!(
            "rotation curve '{}' has no points",
            curve.name
        )));
    }
    let column = |f: &dyn Fn(&RotationPoint) -> f64| -> Array1<f64> { curve.points.iter().map(f).collect() };

    let radius_kpc = column(&|p| p.radius_kpc);
    let sigma = column(&|p| baryonic_surface_density(p, params.upsilon_disk, params.upsilon_bulge));
    let v_bar = column(&|p| baryonic_velocity(p, params.upsilon_disk, params.upsilon_bulge));
    let v_obs = column(&|p| p.v_obs);
    let err_v = column(&|p| p.err_v);

    let fraction = sigma.mapv(|s| square_rule_fraction(s, params.sigma_star, params.f_max));
    let v_pred = &v_bar * &fraction.mapv(amplification);

    let rms_kms = rms_residual(v_obs.view(), v_pred.view());
    let chi2_reduced = reduced_chi_square(v_obs.view(), v_pred.view(), err_v.view(), params.min_error_kms);
    let mean_fraction = mean(fraction.view());
    debug!(galaxy = %curve.name, points = curve.len(), rms_kms, chi2_reduced, "square-rule fit");

    Ok(SquareRuleFit {
        name: curve.name.clone(),
        radius_kpc,
        sigma,
        fraction,
        v_bar,
        v_pred,
        v_obs,
        err_v,
        rms_kms,
        chi2_reduced,
        mean_fraction,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Σ0 ≥ Σ*: no amplification.
    BaryonDominated,
    Transition,
    DarkDominated,
}

pub fn classify(f0: f64) -> Regime {
    if f0 <= 0.0 {
        Regime::BaryonDominated
    } else if f0 < DARK_DOMINATED_F {
        Regime::Transition
    } else {
        Regime::DarkDominated
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Regime::BaryonDominated => "baryon-dominated",
            Regime::Transition => "transition",
            Regime::DarkDominated => "dark-dominated",
        };
        f.pad(s)
    }
}

/// Galaxy-level Square-Rule summary.
#[derive(Debug, Clone)]
pub struct GalaxySummary {
    pub name: String,
    pub quality: Option<u8>,
    pub distance_mpc: Option<f64>,
    /// Central baryonic surface density Υd·SBdisk [M☉/pc²].
    pub sigma0: Option<f64>,
    pub f0: Option<f64>,
    pub regime: Option<Regime>,
    pub v_flat: Option<f64>,
    pub fit: SquareRuleFit,
}

pub fn summarize_galaxy(
    meta: &GalaxyMeta,
    curve: &RotationCurve,
    params: &SquareRuleParams,
) -> SimplicityResult<GalaxySummary> {
    let fit = analyze_curve(curve, params)?;
    let sigma0 = meta.sb_disk.map(|sb| params.upsilon_disk * sb);
    let f0 = sigma0.map(|s| square_rule_fraction(s, params.sigma_star, params.f_max));
    Ok(GalaxySummary {
        name: meta.name.clone(),
        quality: meta.quality,
        distance_mpc: meta.distance_mpc.or(curve.distance_mpc),
        sigma0,
        f0,
        regime: f0.map(classify),
        v_flat: meta.v_flat,
        fit,
    })
}

/// Pair metadata rows with curves and apply quality and size cuts.
///
/// `only` restricts to the named galaxies (matched without spaces,
/// case-insensitively); empty means all.
pub fn select_sample<'a>(
    table: &'a [GalaxyMeta],
    curves: &'a [RotationCurve],
    selection: &SparcConfig,
    only: &[String],
) -> Vec<(&'a GalaxyMeta, &'a RotationCurve)> {
    let wanted: Vec<String> = only.iter().map(|n| normalize_name(n)).collect();
    let mut sample = Vec::new();
    for meta in table {
        let key = normalize_name(&meta.name);
        if !wanted.is_empty() && !wanted.contains(&key) {
            continue;
        }
        let Some(curve) = curves.iter().find(|c| normalize_name(&c.name) == key) else {
            warn!(galaxy = %meta.name, "no rotation curve found, skipping");
            continue;
        };
        if let Some(q) = meta.quality {
            if q > selection.max_quality {
                warn!(galaxy = %meta.name, quality = q, "quality flag above cut, skipping");
                continue;
            }
        }
        if curve.len() < selection.min_points {
            warn!(galaxy = %meta.name, points = curve.len(), "too few rotation-curve points, skipping");
            continue;
        }
        sample.push((meta, curve));
    }
    sample
}

/// Fit every selected galaxy. Fits run in parallel; output keeps the
/// sample order and the error is the first failure in that order.
pub fn fit_sample(
    sample: &[(&GalaxyMeta, &RotationCurve)],
    params: &SquareRuleParams,
) -> SimplicityResult<Vec<GalaxySummary>> {
    use rayon::prelude::*;
    let fits: Vec<SimplicityResult<GalaxySummary>> = sample
        .par_iter()
        .map(|(meta, curve)| summarize_galaxy(meta, curve, params))
        .collect();
    fits.into_iter().collect()
}

fn opt(v: Option<f64>, precision: usize) -> String {
    v.map(|x| format!("{x:.precision$}")).unwrap_or_else(|| "-".to_string())
}

/// Fixed-width text table, one galaxy per line.
pub fn format_summary_table(rows: &[GalaxySummary]) -> String {
    let mut out = format!(
        "{:<12} {:>2} {:>7} {:>9} {:>6} {:<17} {:>4} {:>8} {:>8}\n",
        "Galaxy", "Q", "D[Mpc]", "Σ0", "f0", "regime", "N", "RMS", "χ²ν"
    );
    for r in rows {
        out.push_str(&format!(
            "{:<12} {:>2} {:>7} {:>9} {:>6} {:<17} {:>4} {:>8.2} {:>8.2}\n",
            r.name,
            r.quality.map(|q| q.to_string()).unwrap_or_else(|| "-".to_string()),
            opt(r.distance_mpc, 2),
            opt(r.sigma0, 1),
            opt(r.f0, 3),
            r.regime.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string()),
            r.fit.radius_kpc.len(),
            r.fit.rms_kms,
            r.fit.chi2_reduced,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(r: f64, v_obs: f64, sb_disk: f64) -> RotationPoint {
        RotationPoint {
            radius_kpc: r,
            v_obs,
            err_v: 5.0,
            v_gas: 20.0,
            v_disk: 60.0,
            v_bul: 0.0,
            sb_disk,
            sb_bul: 0.0,
        }
    }

    #[test]
    fn test_fraction_limits() {
        assert_eq!(square_rule_fraction(124.0, 124.0, 0.99), 0.0);
        assert_eq!(square_rule_fraction(500.0, 124.0, 0.99), 0.0);
        assert_eq!(square_rule_fraction(0.0, 124.0, 0.99), 0.99);
        assert_eq!(square_rule_fraction(f64::NAN, 124.0, 0.9), 0.9);
        assert!((square_rule_fraction(62.0, 124.0, 0.99) - 0.75).abs() < 1e-15);
        assert_eq!(square_rule_fraction(1.0, 124.0, 0.5), 0.5);
    }

    #[test]
    fn test_amplification() {
        assert_eq!(amplification(0.0), 1.0);
        assert!((amplification(0.75) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_baryonic_velocity_signed_gas() {
        let mut p = point(1.0, 50.0, 0.0);
        p.v_gas = -30.0;
        p.v_disk = 50.0;
        // -900 + 0.5 * 2500 = 350
        let v = baryonic_velocity(&p, 0.5, 0.7);
        assert!((v - 350f64.sqrt()).abs() < 1e-12);
        p.v_disk = 0.0;
        assert_eq!(baryonic_velocity(&p, 0.5, 0.7), 0.0);
    }

    #[test]
    fn test_analyze_curve_above_threshold_is_newtonian() {
        let params = SquareRuleParams::default();
        let curve = RotationCurve::new("HSB", None, vec![point(1.0, 50.0, 400.0), point(2.0, 55.0, 300.0)]);
        let fit = analyze_curve(&curve, &params).unwrap();
        for i in 0..fit.v_bar.len() {
            assert_eq!(fit.fraction[i], 0.0);
            assert_eq!(fit.v_pred[i], fit.v_bar[i]);
        }
        assert_eq!(fit.mean_fraction, 0.0);
    }

    #[test]
    fn test_analyze_curve_amplifies_low_density() {
        let params = SquareRuleParams::default();
        // Σ = 0.5 * 124 = 62 → f = 0.75 → amplification 2
        let curve = RotationCurve::new("LSB", None, vec![point(1.0, 100.0, 124.0)]);
        let fit = analyze_curve(&curve, &params).unwrap();
        assert!((fit.fraction[0] - 0.75).abs() < 1e-12);
        assert!((fit.v_pred[0] - 2.0 * fit.v_bar[0]).abs() < 1e-9);
        assert!((fit.rms_kms - (100.0 - fit.v_pred[0]).abs()).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_empty_curve_fails() {
        let curve = RotationCurve::new("Empty", None, Vec::new());
        assert!(analyze_curve(&curve, &SquareRuleParams::default()).is_err());
    }

    #[test]
    fn test_classify_regimes() {
        assert_eq!(classify(0.0), Regime::BaryonDominated);
        assert_eq!(classify(0.2), Regime::Transition);
        assert_eq!(classify(0.5), Regime::DarkDominated);
        assert_eq!(format!("{:<6}|", Regime::Transition), "transition|");
    }

    #[test]
    fn test_select_sample_applies_cuts() {
        let mut good = GalaxyMeta::named("NGC 3198");
        good.quality = Some(1);
        let mut poor = GalaxyMeta::named("F574-2");
        poor.quality = Some(3);
        let orphan = GalaxyMeta::named("NoCurve");
        let pts: Vec<RotationPoint> = (1..=6).map(|i| point(i as f64, 100.0, 50.0)).collect();
        let curves = vec![
            RotationCurve::new("NGC3198", None, pts.clone()),
            RotationCurve::new("F574-2", None, pts),
        ];
        let table = vec![good, poor, orphan];
        let cfg = SparcConfig {
            max_quality: 2,
            min_points: 5,
        };
        let sample = select_sample(&table, &curves, &cfg, &[]);
        assert_eq!(sample.len(), 1);
        assert_eq!(sample[0].0.name, "NGC 3198");

        let only = select_sample(&table, &curves, &SparcConfig::default(), &["f574-2".to_string()]);
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].1.name, "F574-2");
    }

    #[test]
    fn test_summary_uses_metadata_surface_density() {
        let mut meta = GalaxyMeta::named("G");
        meta.sb_disk = Some(124.0);
        meta.quality = Some(2);
        let curve = RotationCurve::new("G", Some(7.5), vec![point(1.0, 80.0, 100.0)]);
        let s = summarize_galaxy(&meta, &curve, &SquareRuleParams::default()).unwrap();
        assert_eq!(s.sigma0, Some(62.0));
        assert!((s.f0.unwrap() - 0.75).abs() < 1e-12);
        assert_eq!(s.regime, Some(Regime::DarkDominated));
        assert_eq!(s.distance_mpc, Some(7.5));

        let table = format_summary_table(&[s]);
        assert_eq!(table.lines().count(), 2);
        assert!(table.lines().nth(1).unwrap().starts_with("G "));
    }

    #[test]
    fn test_fit_sample_keeps_order() {
        let names = ["A", "B", "C", "D"];
        let metas: Vec<GalaxyMeta> = names.iter().map(|n| GalaxyMeta::named(*n)).collect();
        let curves: Vec<RotationCurve> = names
            .iter()
            .map(|n| RotationCurve::new(*n, None, vec![point(1.0, 80.0, 100.0)]))
            .collect();
        let sample: Vec<_> = metas.iter().zip(curves.iter()).collect();
        let fits = fit_sample(&sample, &SquareRuleParams::default()).unwrap();
        let got: Vec<&str> = fits.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(got, names);

        let empty = RotationCurve::new("E", None, Vec::new());
        let meta = GalaxyMeta::named("E");
        assert!(fit_sample(&[(&meta, &empty)], &SquareRuleParams::default()).is_err());
    }

    #[test]
    fn test_fit_sample_reports_first_failure() {
        let metas: Vec<GalaxyMeta> = (0..64).map(|i| GalaxyMeta::named(format!("G{i}"))).collect();
        let curves: Vec<RotationCurve> = (0..64)
            .map(|i| {
                let pts = if i == 3 || i == 40 {
                    Vec::new()
                } else {
                    vec![point(1.0, 80.0, 100.0)]
                };
                RotationCurve::new(format!("G{i}"), None, pts)
            })
            .collect();
        let sample: Vec<_> = metas.iter().zip(curves.iter()).collect();
        match fit_sample(&sample, &SquareRuleParams::default()) {
            Err(SimplicityError::InvalidParameter(msg)) => {
                assert!(msg.contains("'G3'"), "{msg}");
            }
            other => panic!("expected the G3 failure, got {other:?}"),
        }
    }
}
