// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Physical constants (CODATA 2022) and toolkit defaults.

/// Speed of light in vacuum (m/s).
pub const C_LIGHT: f64 = 2.997_924_58e8;

/// Newtonian gravitational constant (m³ kg⁻¹ s⁻²).
pub const G_NEWTON: f64 = 6.674_30e-11;

/// Solar mass (kg).
pub const M_SUN: f64 = 1.988_47e30;

/// Parsec (m).
pub const PARSEC: f64 = 3.085_677_581e16;

/// Electron rest mass (kg).
pub const M_ELECTRON: f64 = 9.109_383_7015e-31;

/// Default Hubble constant (km/s/Mpc).
pub const DEFAULT_H0: f64 = 70.0;

/// Critical surface density Σ*crit (M☉/pc²), rounded value of the H0 = 70 result.
pub const DEFAULT_SIGMA_STAR: f64 = 124.0;

/// Stellar mass-to-light ratio of the disk at 3.6 µm (M☉/L☉).
pub const DEFAULT_UPSILON_DISK: f64 = 0.5;

/// Stellar mass-to-light ratio of the bulge at 3.6 µm (M☉/L☉).
pub const DEFAULT_UPSILON_BULGE: f64 = 0.7;
