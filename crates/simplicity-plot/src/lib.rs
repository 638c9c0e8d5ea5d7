// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Simplicity Plot
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! SVG renderers. Each `render_*` writes one file and maps drawing
//! failures to [`SimplicityError::Plot`].

pub mod double_slit;
pub mod rar;
pub mod rotation;
pub mod vacuum;

use simplicity_types::error::{SimplicityError, SimplicityResult};
use std::error::Error;
use std::path::Path;
use tracing::info;

pub(crate) type DrawResult = Result<(), Box<dyn Error>>;

pub(crate) const CAPTION_FONT: (&str, u32) = ("sans-serif", 20);

/// Create the parent directory, run `draw`, and report the outcome.
pub(crate) fn render_to(path: &Path, what: &str, draw: impl FnOnce(&Path) -> DrawResult) -> SimplicityResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    draw(path).map_err(|e| SimplicityError::Plot(format!("{what} ({}): {e}", path.display())))?;
    info!(plot = what, path = %path.display(), "wrote plot");
    Ok(())
}

/// Largest finite value, or `fallback` when there is none above zero.
pub(crate) fn axis_max(values: impl IntoIterator<Item = f64>, fallback: f64) -> f64 {
    let m = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if m.is_finite() && m > 0.0 {
        m
    } else {
        fallback
    }
}
