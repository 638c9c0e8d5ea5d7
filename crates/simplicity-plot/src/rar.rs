// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — RAR Threshold Figure
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use plotters::prelude::*;
use simplicity_astro::rar::RarPoint;
use simplicity_astro::square_rule::square_rule_fraction;
use simplicity_types::error::SimplicityResult;
use std::path::Path;

use crate::{render_to, DrawResult, CAPTION_FONT};

const DODGER_BLUE: RGBColor = RGBColor(30, 144, 255);
const CURVE_POINTS: usize = 200;

/// Log-x scatter of μ0 against f_DM with the Σ* threshold.
pub fn render_rar(path: &Path, sparc: &[RarPoint], curated: &[RarPoint], sigma_star: f64) -> SimplicityResult<()> {
    render_to(path, "rar", |p| draw_rar(p, sparc, curated, sigma_star))
}

fn draw_rar(path: &Path, sparc: &[RarPoint], curated: &[RarPoint], sigma_star: f64) -> DrawResult {
    let all = || sparc.iter().chain(curated.iter()).map(|p| p.mu0);
    let x_lo = all().fold(1.0f64, f64::min) * 0.8;
    let x_hi = all().fold(1000.0f64, f64::max).max(sigma_star) * 1.25;

    let root = SVGBackend::new(path, (1000, 680)).into_drawing_area();
    root.fill(&WHITE)?;
    let (main, footer) = root.split_vertically(650);

    let mut chart = ChartBuilder::on(&main)
        .caption(
            "RAR Threshold: Baryonic Surface Density vs. Dark Matter Fraction",
            CAPTION_FONT,
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), 0.0f64..1.05)?;

    chart
        .configure_mesh()
        .x_desc("Baryonic surface density μ0 [M☉/pc²]")
        .y_desc("Dark matter fraction f_DM")
        .light_line_style(BLACK.mix(0.08))
        .draw()?;

    chart
        .draw_series(
            sparc
                .iter()
                .map(|p| Circle::new((p.mu0, p.f_dm), 3, BLUE.mix(0.7).filled())),
        )?
        .label("SPARC galaxies")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.mix(0.7).filled()));

    let curve = (0..CURVE_POINTS).map(|i| {
        let t = i as f64 / (CURVE_POINTS - 1) as f64;
        let mu = x_lo * (x_hi / x_lo).powf(t);
        (mu, square_rule_fraction(mu, sigma_star, 1.0))
    });
    chart
        .draw_series(LineSeries::new(curve, BLACK.mix(0.6).stroke_width(1)))?
        .label("Square-Rule 1 − (Σ/Σ*)²")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.6)));

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(sigma_star, 0.0), (sigma_star, 1.05)],
            DODGER_BLUE.stroke_width(2),
        )))?
        .label(format!("Σ*crit = {sigma_star:.0} M☉/pc²"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DODGER_BLUE.stroke_width(2)));

    chart
        .draw_series(
            curated
                .iter()
                .map(|p| Circle::new((p.mu0, p.f_dm), 4, RED.filled())),
        )?
        .label("Curated galaxies")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));
    chart.draw_series(curated.iter().filter_map(|p| {
        p.name
            .as_ref()
            .map(|name| Text::new(name.clone(), (p.mu0 * 1.05, p.f_dm), ("sans-serif", 11.0).into_font()))
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    footer.draw(&Text::new(
        "SPARC summary with additional curated galaxies",
        (380, 8),
        ("sans-serif", 12.0).into_font().color(&BLACK.mix(0.5)),
    ))?;

    root.present()?;
    Ok(())
}
