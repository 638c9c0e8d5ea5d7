// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Command-Line Interface
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use simplicity_astro::dark_hole::{dark_hole_table, format_dark_hole_table, parse_mass_entry};
use simplicity_astro::rar::{curated_points, load_rar_csv, threshold_summary};
use simplicity_astro::sigma_crit::{effective_sigma_star, sigma_crit};
use simplicity_astro::sparc::{load_rotation_dir, load_sparc_table};
use simplicity_astro::square_rule::{fit_sample, format_summary_table, select_sample, SquareRuleParams};
use simplicity_geometry::eigen_volume::pi_lock_in;
use simplicity_geometry::lattice::{calibrated_rho_star, derive_lattice_dynamics, rho_star_for_lattice_constant};
use simplicity_geometry::overlap::overlap_report;
use simplicity_math::symplectic::Integrator;
use simplicity_plot::double_slit::render_double_slit;
use simplicity_plot::rar::render_rar;
use simplicity_plot::rotation::render_rotation_curve;
use simplicity_plot::vacuum::render_vacuum;
use simplicity_sim::double_slit::{simulate, DoubleSlitParams};
use simplicity_sim::vacuum::{simulate_mode, simulate_pulse, VacuumParams};
use simplicity_types::config::AnalysisConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "simplicity")]
#[command(about = "Simplicity toolkit - surface-density thresholds, FCC lattice derivations and toy simulations", long_about = None)]
#[command(version)]
struct Cli {
    /// Analysis configuration (JSON)
    #[arg(short, long, global = true, env = "SIMPLICITY_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Critical surface density from H0
    SigmaCrit {
        /// Hubble constant [km/s/Mpc]; defaults to the configured value
        h0: Option<f64>,
    },

    /// Dark-hole radius for the built-in catalogue and extra masses
    DarkHole {
        /// Extra entry NAME=MASS in solar masses (repeatable)
        #[arg(long = "mass", value_parser = parse_mass)]
        masses: Vec<(String, f64)>,
    },

    /// RAR threshold scatter from a SPARC summary CSV
    Rar {
        #[arg(long)]
        summary: PathBuf,

        /// Output SVG; defaults to <output_dir>/plots/RAR_threshold.svg
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Square-Rule fits for SPARC rotation curves
    SquareRule {
        /// Fixed-width SPARC metadata table
        #[arg(long)]
        table: PathBuf,

        /// Directory of <Galaxy>_rotmod.dat files
        #[arg(long)]
        curves: PathBuf,

        /// Directory for per-galaxy SVGs; defaults to <output_dir>/plots
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Restrict to these galaxies (repeatable)
        #[arg(long = "galaxy")]
        galaxies: Vec<String>,
    },

    /// Exact FCC derivations
    Fcc {
        #[arg(value_enum, default_value = "all")]
        section: FccSection,

        /// Lattice constant [m] for a numeric ρ*
        #[arg(long)]
        lattice_constant: Option<f64>,
    },

    /// Toy double-slit experiment
    DoubleSlit {
        /// Wavelength [m]
        #[arg(long)]
        wavelength: Option<f64>,
        /// Slit separation [m]
        #[arg(long)]
        separation: Option<f64>,
        /// Slit width [m]
        #[arg(long)]
        width: Option<f64>,
        /// Slit-to-screen distance [m]
        #[arg(long)]
        distance: Option<f64>,
        /// Decoherence γ in [0, 1]
        #[arg(long)]
        gamma: Option<f64>,
        #[arg(long)]
        particles: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Detector resolution [m]
        #[arg(long)]
        detector_sigma: Option<f64>,
        /// Output SVG; defaults to <output_dir>/plots/double_slit.svg
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Toy vacuum oscillation on an FCC node chain
    Vacuum {
        #[arg(long)]
        nodes: Option<usize>,
        #[arg(long)]
        mode: Option<usize>,
        #[arg(long)]
        steps: Option<usize>,
        #[arg(long)]
        dt: Option<f64>,
        #[arg(long, value_enum, default_value = "verlet")]
        integrator: IntegratorArg,
        /// Output SVG; defaults to <output_dir>/plots/vacuum.svg
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FccSection {
    S1,
    S2,
    S3,
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum IntegratorArg {
    Verlet,
    Rk4,
}

impl From<IntegratorArg> for Integrator {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Verlet => Integrator::VelocityVerlet,
            IntegratorArg::Rk4 => Integrator::Rk4,
        }
    }
}

fn parse_mass(s: &str) -> std::result::Result<(String, f64), String> {
    parse_mass_entry(s).map_err(|e| e.to_string())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => AnalysisConfig::from_file(p).with_context(|| format!("failed to load config {}", p.display())),
        None => Ok(AnalysisConfig::shipped()),
    }
}

fn plot_path(config: &AnalysisConfig, explicit: Option<PathBuf>, file: &str) -> PathBuf {
    explicit.unwrap_or_else(|| Path::new(&config.output_dir).join("plots").join(file))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "configuration");

    match cli.command {
        Commands::SigmaCrit { h0 } => run_sigma_crit(&config, h0),
        Commands::DarkHole { masses } => run_dark_hole(&config, &masses),
        Commands::Rar { summary, out } => run_rar(&config, &summary, out),
        Commands::SquareRule {
            table,
            curves,
            out_dir,
            galaxies,
        } => run_square_rule(&config, &table, &curves, out_dir, &galaxies),
        Commands::Fcc {
            section,
            lattice_constant,
        } => run_fcc(section, lattice_constant),
        Commands::DoubleSlit {
            wavelength,
            separation,
            width,
            distance,
            gamma,
            particles,
            seed,
            detector_sigma,
            out,
        } => {
            let defaults = DoubleSlitParams::default();
            let params = DoubleSlitParams {
                wavelength_m: wavelength.unwrap_or(defaults.wavelength_m),
                slit_separation_m: separation.unwrap_or(defaults.slit_separation_m),
                slit_width_m: width.unwrap_or(defaults.slit_width_m),
                screen_distance_m: distance.unwrap_or(defaults.screen_distance_m),
                decoherence: gamma.unwrap_or(defaults.decoherence),
                particles: particles.unwrap_or(defaults.particles),
                seed: seed.unwrap_or(defaults.seed),
                detector_sigma_m: detector_sigma.unwrap_or(defaults.detector_sigma_m),
                ..defaults
            };
            run_double_slit(&config, &params, out)
        }
        Commands::Vacuum {
            nodes,
            mode,
            steps,
            dt,
            integrator,
            out,
        } => {
            let defaults = VacuumParams::default();
            let params = VacuumParams {
                nodes: nodes.unwrap_or(defaults.nodes),
                mode: mode.unwrap_or(defaults.mode),
                steps: steps.unwrap_or(defaults.steps),
                dt: dt.unwrap_or(defaults.dt),
                ..defaults
            };
            run_vacuum(&config, &params, integrator.into(), out)
        }
    }
}

fn run_sigma_crit(config: &AnalysisConfig, h0: Option<f64>) -> Result<()> {
    let s = sigma_crit(h0.unwrap_or(config.h0_km_s_mpc))?;
    println!("{s}");
    Ok(())
}

fn run_dark_hole(config: &AnalysisConfig, masses: &[(String, f64)]) -> Result<()> {
    let sigma_star = effective_sigma_star(config)?;
    let table = dark_hole_table(masses, sigma_star)?;
    print!("{}", format_dark_hole_table(&table, sigma_star));
    Ok(())
}

fn run_rar(config: &AnalysisConfig, summary: &Path, out: Option<PathBuf>) -> Result<()> {
    let sigma_star = effective_sigma_star(config)?;
    let sparc = load_rar_csv(summary).with_context(|| format!("failed to read {}", summary.display()))?;
    let curated = curated_points();
    println!("{}", threshold_summary(&sparc, sigma_star));

    let path = plot_path(config, out, "RAR_threshold.svg");
    render_rar(&path, &sparc, &curated, sigma_star)?;
    println!("Plot {} saved.", path.display());
    Ok(())
}

fn run_square_rule(
    config: &AnalysisConfig,
    table: &Path,
    curves: &Path,
    out_dir: Option<PathBuf>,
    galaxies: &[String],
) -> Result<()> {
    let params = SquareRuleParams::from_config(config)?;
    let meta = load_sparc_table(table).with_context(|| format!("failed to read {}", table.display()))?;
    let curves =
        load_rotation_dir(curves).with_context(|| format!("failed to read rotation curves in {}", curves.display()))?;

    let sample = select_sample(&meta, &curves, &config.sparc, galaxies);
    if sample.is_empty() {
        bail!("no galaxies left after selection");
    }
    info!(galaxies = sample.len(), sigma_star = params.sigma_star, "running Square-Rule fits");

    let rows = fit_sample(&sample, &params).context("Square-Rule fit failed")?;
    let out_dir = out_dir.unwrap_or_else(|| Path::new(&config.output_dir).join("plots"));
    for row in &rows {
        let file = out_dir.join(format!("{}_square_rule.svg", row.fit.name));
        render_rotation_curve(&file, &row.fit, params.sigma_star)?;
    }
    print!("{}", format_summary_table(&rows));
    Ok(())
}

fn run_fcc(section: FccSection, lattice_constant: Option<f64>) -> Result<()> {
    let show = |s: FccSection| section == FccSection::All || section == s;
    if show(FccSection::S1) {
        println!("=== S1: overlap condition ===");
        println!("{}\n", overlap_report()?);
    }
    if show(FccSection::S2) {
        println!("=== S2: eigen-volume and π lock-in ===");
        println!("{}\n", pi_lock_in()?);
    }
    if show(FccSection::S3) {
        let dynamics = derive_lattice_dynamics()?;
        println!("=== S3: lattice dynamics ===");
        println!("{dynamics}");
        println!("rho* (E0 = m_e c^2) = {}", calibrated_rho_star(&dynamics)?);
        if let Some(a) = lattice_constant {
            let rho_star = rho_star_for_lattice_constant(&dynamics, a)?;
            println!("rho* (a = {a:.3e} m) = {rho_star:.4e} J/m³");
        }
    }
    Ok(())
}

fn run_double_slit(config: &AnalysisConfig, params: &DoubleSlitParams, out: Option<PathBuf>) -> Result<()> {
    let pattern = simulate(params)?;
    println!("particles  = {}", pattern.hits_m.len());
    println!("gamma      = {:.3}", params.decoherence);
    println!("visibility = {:.4}", pattern.visibility);

    let path = plot_path(config, out, "double_slit.svg");
    render_double_slit(&path, &pattern, params.decoherence)?;
    println!("Plot {} saved.", path.display());
    Ok(())
}

fn run_vacuum(config: &AnalysisConfig, params: &VacuumParams, integrator: Integrator, out: Option<PathBuf>) -> Result<()> {
    let chain = params.chain()?;
    let run = simulate_mode(&chain, params.mode, params.amplitude, params.dt, params.steps, integrator)?;
    let frames = simulate_pulse(
        &chain,
        params.nodes / 4,
        params.pulse_width_nodes,
        params.amplitude,
        params.dt,
        params.steps,
        params.snapshots,
    )?;

    println!("c0              = {:.5}", chain.wave_speed());
    println!("omega analytic  = {:.6}", run.omega_analytic);
    match run.omega_measured {
        Some(w) => println!(
            "omega measured  = {w:.6}  (rel. error {:.2e})",
            (w / run.omega_analytic - 1.0).abs()
        ),
        None => println!("omega measured  = n/a (fewer than two periods)"),
    }
    println!("energy drift    = {:.3e}", run.relative_energy_drift);

    let path = plot_path(config, out, "vacuum.svg");
    render_vacuum(&path, &run, &frames)?;
    println!("Plot {} saved.", path.display());
    Ok(())
}
