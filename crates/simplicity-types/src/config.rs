// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{DEFAULT_H0, DEFAULT_SIGMA_STAR, DEFAULT_UPSILON_BULGE, DEFAULT_UPSILON_DISK};
use crate::error::{SimplicityError, SimplicityResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level analysis configuration.
/// Maps 1:1 to configs/default_config.json; every field is optional in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Hubble constant [km/s/Mpc].
    #[serde(default = "default_h0")]
    pub h0_km_s_mpc: f64,
    /// Critical surface density [M☉/pc²]. Derived from H0 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_star: Option<f64>,
    #[serde(default)]
    pub square_rule: SquareRuleConfig,
    #[serde(default)]
    pub sparc: SparcConfig,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// Square-Rule model parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquareRuleConfig {
    /// Disk mass-to-light ratio (default: 0.5)
    #[serde(default = "default_upsilon_disk")]
    pub upsilon_disk: f64,
    /// Bulge mass-to-light ratio (default: 0.7)
    #[serde(default = "default_upsilon_bulge")]
    pub upsilon_bulge: f64,
    /// Upper clamp on the amplification fraction f (default: 0.99)
    #[serde(default = "default_f_max")]
    pub f_max: f64,
    /// Floor on velocity errors used in χ² [km/s] (default: 1.0)
    #[serde(default = "default_min_error")]
    pub min_error_kms: f64,
}

/// SPARC sample selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparcConfig {
    /// Worst quality flag still accepted (1 = high, 3 = low).
    #[serde(default = "default_max_quality")]
    pub max_quality: u8,
    /// Minimum number of rotation-curve points.
    #[serde(default = "default_min_points")]
    pub min_points: usize,
}

fn default_h0() -> f64 {
    DEFAULT_H0
}
fn default_output_dir() -> String {
    "output".to_string()
}
fn default_upsilon_disk() -> f64 {
    DEFAULT_UPSILON_DISK
}
fn default_upsilon_bulge() -> f64 {
    DEFAULT_UPSILON_BULGE
}
fn default_f_max() -> f64 {
    0.99
}
fn default_min_error() -> f64 {
    1.0
}
fn default_max_quality() -> u8 {
    3
}
fn default_min_points() -> usize {
    5
}

impl Default for SquareRuleConfig {
    fn default() -> Self {
        SquareRuleConfig {
            upsilon_disk: default_upsilon_disk(),
            upsilon_bulge: default_upsilon_bulge(),
            f_max: default_f_max(),
            min_error_kms: default_min_error(),
        }
    }
}

impl Default for SparcConfig {
    fn default() -> Self {
        SparcConfig {
            max_quality: default_max_quality(),
            min_points: default_min_points(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            h0_km_s_mpc: default_h0(),
            sigma_star: None,
            square_rule: SquareRuleConfig::default(),
            sparc: SparcConfig::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl AnalysisConfig {
    /// Same values as configs/default_config.json, with Σ* pinned to
    /// `DEFAULT_SIGMA_STAR`.
    pub fn shipped() -> Self {
        AnalysisConfig {
            sigma_star: Some(DEFAULT_SIGMA_STAR),
            ..AnalysisConfig::default()
        }
    }

    /// Load from a JSON file and validate.
    pub fn from_file(path: impl AsRef<Path>) -> SimplicityResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimplicityResult<()> {
        if !self.h0_km_s_mpc.is_finite() || self.h0_km_s_mpc <= 0.0 {
            return Err(SimplicityError::ConfigError(format!(
                "h0_km_s_mpc must be positive, got {}",
                self.h0_km_s_mpc
            )));
        }
        if let Some(sigma) = self.sigma_star {
            if !sigma.is_finite() || sigma <= 0.0 {
                return Err(SimplicityError::ConfigError(format!(
                    "sigma_star must be positive, got {sigma}"
                )));
            }
        }
        let sr = &self.square_rule;
        if !(sr.upsilon_disk > 0.0 && sr.upsilon_bulge > 0.0) {
            return Err(SimplicityError::ConfigError(
                "mass-to-light ratios must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&sr.f_max) {
            return Err(SimplicityError::ConfigError(format!(
                "f_max must lie in [0, 1), got {}",
                sr.f_max
            )));
        }
        if !(sr.min_error_kms > 0.0) {
            return Err(SimplicityError::ConfigError(format!(
                "min_error_kms must be positive, got {}",
                sr.min_error_kms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let file = write_config("{}");
        let cfg = AnalysisConfig::from_file(file.path()).unwrap();
        assert!((cfg.h0_km_s_mpc - 70.0).abs() < 1e-12);
        assert!(cfg.sigma_star.is_none());
        assert!((cfg.square_rule.upsilon_disk - 0.5).abs() < 1e-12);
        assert!((cfg.square_rule.f_max - 0.99).abs() < 1e-12);
        assert_eq!(cfg.sparc.max_quality, 3);
        assert_eq!(cfg.output_dir, "output");
    }

    #[test]
    fn test_partial_nested_override() {
        let file = write_config(r#"{"sigma_star": 130.0, "square_rule": {"f_max": 0.9}}"#);
        let cfg = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.sigma_star, Some(130.0));
        assert!((cfg.square_rule.f_max - 0.9).abs() < 1e-12);
        assert!((cfg.square_rule.upsilon_bulge - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_load_shipped_config() {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("configs")
            .join("default_config.json");
        let cfg = AnalysisConfig::from_file(&path).unwrap();
        assert_eq!(cfg.sigma_star, Some(124.0));

        let shipped = AnalysisConfig::shipped();
        assert_eq!(shipped.sigma_star, cfg.sigma_star);
        assert_eq!(shipped.h0_km_s_mpc, cfg.h0_km_s_mpc);
        assert_eq!(shipped.square_rule.f_max, cfg.square_rule.f_max);
        assert_eq!(shipped.sparc.min_points, cfg.sparc.min_points);
        assert_eq!(shipped.output_dir, cfg.output_dir);
    }

    #[test]
    fn test_rejects_bad_f_max() {
        let file = write_config(r#"{"square_rule": {"f_max": 1.0}}"#);
        match AnalysisConfig::from_file(file.path()) {
            Err(SimplicityError::ConfigError(msg)) => assert!(msg.contains("f_max")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_negative_h0() {
        let cfg = AnalysisConfig {
            h0_km_s_mpc: -1.0,
            ..AnalysisConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = AnalysisConfig {
            sigma_star: Some(120.0),
            ..AnalysisConfig::default()
        };
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg2.sigma_star, Some(120.0));
        assert_eq!(cfg2.sparc.min_points, cfg.sparc.min_points);
    }
}
