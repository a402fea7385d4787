use std::{fs, path::PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{bail, Result, WrapErr};
use defect_annihilation::{
    creator::{ChargeCreator, RandomChargeCreator},
    output::{self, CsvWriter, PngRenderer, Renderer, SnapshotCadence},
    PhysicsParams, Simulation,
};
use log::{debug, info};

/// Half the side length of the square the charges start in.
const INITIAL_HALF_WIDTH: f64 = 50.;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Png,
    Csv,
}

/// Simulate randomly placed defects until they annihilate or time runs out.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of charges.
    #[arg(long, default_value_t = 100)]
    count: u32,

    /// Seed for the initial placement.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Mass of a positive charge.
    #[arg(long, default_value_t = 1e4)]
    m_plus: f64,

    /// Mass of a negative charge.
    #[arg(long, default_value_t = 1e4)]
    m_minus: f64,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 300)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 200)]
    height: u32,

    /// Side length of the square shown in a frame.
    #[arg(long, default_value_t = 200.)]
    extent: f64,

    /// Root directory for all runs.
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Directory of this run below the root, cleared before writing.
    #[arg(long, default_value = "random")]
    out_dir: PathBuf,

    /// Time step size.
    #[arg(long, default_value_t = 1e-5)]
    dt: f64,

    /// Snapshots per unit of simulated time.
    #[arg(long, default_value_t = 1000.)]
    fps: f64,

    /// Simulated time.
    #[arg(long, default_value_t = 0.25)]
    time: f64,

    #[arg(long, value_enum, default_value_t = Format::Png)]
    format: Format,

    /// Sum forces on this many threads.
    #[arg(long)]
    threads: Option<usize>,

    /// TOML file overriding the physical constants.
    #[arg(long)]
    params: Option<PathBuf>,
}

fn load_params(path: Option<&PathBuf>) -> Result<PhysicsParams> {
    let params: PhysicsParams = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&text)
                .wrap_err_with(|| format!("failed to parse {}", path.display()))?
        }
        None => PhysicsParams::default(),
    };
    params.validate()?;
    Ok(params)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if !(args.dt.is_finite() && args.dt > 0. && args.time.is_finite() && args.time >= 0.) {
        bail!("dt must be finite and > 0, time must be finite and >= 0");
    }

    let params = load_params(args.params.as_ref())?;
    debug!("{params:?}");

    let num_steps = defect_annihilation::num_steps(args.time, args.dt)?;
    let pad = output::pad_width(num_steps);

    let dir = args.output.join(&args.out_dir);
    output::prepare_dir(&dir)?;

    let mut renderer: Box<dyn Renderer> = match args.format {
        Format::Png => Box::new(PngRenderer::new(
            &dir,
            pad,
            args.width,
            args.height,
            args.extent,
        )?),
        Format::Csv => Box::new(CsvWriter::new(&dir, pad)),
    };
    let mut cadence = SnapshotCadence::new(args.dt, args.fps)?;

    let charges =
        RandomChargeCreator::new(args.seed, args.m_plus, args.m_minus, INITIAL_HALF_WIDTH)?
            .create_charges(args.count)?;
    let mut sim = Simulation::from_params(charges, params)?;
    if let Some(num_threads) = args.threads {
        sim = sim.multithreaded(num_threads);
    }

    info!(
        "simulating {} charges for {num_steps} steps, writing to {}",
        sim.len(),
        dir.display()
    );

    for i in 0..num_steps {
        if sim.is_empty() {
            info!("all charges annihilated after {i} steps");
            break;
        }
        if i % 100 == 0 {
            info!(
                "{:.1}% ({} charges left)",
                100. * i as f64 / num_steps as f64,
                sim.len()
            );
        }
        if cadence.due(i) {
            renderer.render(sim.charges(), i)?;
        }

        sim.step(args.dt)?;
    }

    info!(
        "done: {} steps, {} charges annihilated, {} left, {} frames written",
        sim.steps(),
        sim.annihilated(),
        sim.len(),
        cadence.frames()
    );
    Ok(())
}
