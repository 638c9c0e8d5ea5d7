// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Double-Slit Figure
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use plotters::prelude::*;
use simplicity_sim::double_slit::DoubleSlitPattern;
use simplicity_types::error::SimplicityResult;
use std::path::Path;

use crate::{render_to, DrawResult, CAPTION_FONT};

const MM: f64 = 1e3;

/// Analytic intensity above, detected-particle histogram below.
pub fn render_double_slit(path: &Path, pattern: &DoubleSlitPattern, decoherence: f64) -> SimplicityResult<()> {
    render_to(path, "double slit", |p| draw_double_slit(p, pattern, decoherence))
}

fn draw_double_slit(path: &Path, pattern: &DoubleSlitPattern, decoherence: f64) -> DrawResult {
    let half = pattern.screen_m.iter().fold(0.0f64, |m, y| m.max(y.abs())).max(1e-9) * MM;
    let peak = pattern.counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.1;
    let bin_width = match pattern.bin_centers_m.as_slice() {
        [a, b, ..] => (b - a) * MM,
        _ => 2.0 * half,
    };

    let root = SVGBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));

    let mut top = ChartBuilder::on(&panels[0])
        .caption(
            format!("Double slit: γ = {decoherence:.2}, visibility {:.3}", pattern.visibility),
            CAPTION_FONT,
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-half..half, 0.0f64..1.05)?;
    top.configure_mesh().x_desc("y [mm]").y_desc("I / I(0)").draw()?;
    top.draw_series(LineSeries::new(
        pattern
            .screen_m
            .iter()
            .zip(pattern.intensity.iter())
            .map(|(y, i)| (y * MM, *i)),
        BLUE.stroke_width(2),
    ))?;

    let mut bottom = ChartBuilder::on(&panels[1])
        .caption(format!("{} detected particles", pattern.hits_m.len()), CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-half..half, 0.0..peak)?;
    bottom.configure_mesh().x_desc("y [mm]").y_desc("count").draw()?;
    bottom.draw_series(pattern.bin_centers_m.iter().zip(pattern.counts.iter()).map(|(c, n)| {
        let x = c * MM;
        Rectangle::new(
            [(x - 0.5 * bin_width, 0.0), (x + 0.5 * bin_width, *n as f64)],
            BLUE.mix(0.6).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}
