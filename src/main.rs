//! CLI for computing solvent-accessible surface areas of spheres in a box.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;

use clap::{ArgAction, Parser};
use log::{debug, info, warn};
use mcsasa::{AtomKind, Cuboid, Particle, Point, Sasa, SasaConfig, SearchStrategy, Space};
use serde::Serialize;

#[derive(Serialize)]
struct JsonOutput {
    areas: Vec<f64>,
    total_area: f64,
    probe_radius: f64,
    slices_per_atom: usize,
}

#[derive(Parser)]
#[command(name = "mcsasa")]
#[command(about = "Compute solvent-accessible surface areas of spheres")]
#[command(
    long_about = "Computes the solvent-accessible surface area of every sphere by slicing it \
    into bands and removing the arcs covered by overlapping neighbours.\n\n\
    Input is XYZR text: the last four columns of each line are x, y, z and radius."
)]
struct Cli {
    /// Rolling probe radius
    #[arg(long, default_value_t = 1.4)]
    probe: f64,

    /// Number of bands each sphere is sliced into
    #[arg(long, default_value_t = 20)]
    slices: usize,

    /// Input XYZR file. Reads from stdin if not specified
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output JSON file. Writes to stdout if not specified
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Periodic box side lengths, box centred at the origin
    #[arg(long = "box", num_args = 3, value_names = ["LX", "LY", "LZ"])]
    box_length: Option<Vec<f64>>,

    /// Hard walls along z instead of periodic boundaries
    #[arg(long, requires = "box_length")]
    slit: bool,

    /// Use the all-pairs neighbour search instead of the cell list
    #[arg(long)]
    direct: bool,

    /// Increase verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Reduce verbosity to warnings only
    #[arg(short, long)]
    quiet: bool,
}

/// Read spheres as (position, radius); the last four columns of a line are used
fn read_xyzr(reader: impl BufRead) -> io::Result<Vec<(Point, f64)>> {
    let mut spheres = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace().rev();
        let mut next = || parts.next().and_then(|s| s.parse::<f64>().ok());
        if let (Some(r), Some(z), Some(y), Some(x)) = (next(), next(), next(), next()) {
            spheres.push((Point::new(x, y, z), r));
        } else {
            warn!("skipping line {}: expected x y z r, got {trimmed:?}", number + 1);
        }
    }
    Ok(spheres)
}

/// Build a single-group container, one atom kind per distinct radius
fn build_space(spheres: &[(Point, f64)], cli: &Cli) -> Result<Space, mcsasa::SasaError> {
    let mut atoms: Vec<AtomKind> = Vec::new();
    let mut particles = Vec::with_capacity(spheres.len());
    for (pos, radius) in spheres {
        let atom_id = atoms
            .iter()
            .position(|a| a.radius.to_bits() == radius.to_bits())
            .unwrap_or_else(|| {
                atoms.push(AtomKind::new(format!("r{radius}"), *radius));
                atoms.len() - 1
            });
        particles.push(Particle::new(atom_id, *pos));
    }

    let geometry = if let Some(length) = &cli.box_length {
        let length = Point::new(length[0], length[1], length[2]);
        if cli.slit {
            Cuboid::slit(length)?
        } else {
            Cuboid::new(length)?
        }
    } else {
        // centre the input and pad so periodic images never overlap
        let max_diameter = 2.0 * (spheres.iter().map(|s| s.1).fold(0.0, f64::max) + cli.probe);
        let (min, max) = spheres.iter().fold(
            (Point::repeat(f64::INFINITY), Point::repeat(f64::NEG_INFINITY)),
            |(min, max), (pos, _)| (min.inf(pos), max.sup(pos)),
        );
        let (center, extent) = if spheres.is_empty() {
            (Point::zeros(), Point::zeros())
        } else {
            ((min + max) * 0.5, max - min)
        };
        for particle in &mut particles {
            particle.pos -= center;
        }
        debug!("open boundaries: centred input at {center:?}");
        Cuboid::new(extent.add_scalar(2.0 * max_diameter))?
    };

    let mut space = Space::new(geometry, atoms);
    space.add_group(particles)?;
    Ok(space)
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let spheres = if let Some(path) = &cli.input {
        read_xyzr(BufReader::new(File::open(path)?))?
    } else {
        read_xyzr(io::stdin().lock())?
    };
    info!("Read {} spheres", spheres.len());

    let config = SasaConfig {
        probe_radius: cli.probe,
        slices_per_atom: cli.slices,
        search: if cli.direct {
            SearchStrategy::Direct
        } else {
            SearchStrategy::CellList
        },
    };
    let invalid = |e: mcsasa::SasaError| io::Error::new(io::ErrorKind::InvalidInput, e);
    let mut sasa = Sasa::new(config).map_err(invalid)?;
    let space = build_space(&spheres, &cli).map_err(invalid)?;

    let start = Instant::now();
    sasa.init(&space);
    info!("SASA computed in {} ms", start.elapsed().as_millis());

    let output = JsonOutput {
        areas: sasa.areas().to_vec(),
        total_area: sasa.total_area(&space),
        probe_radius: sasa.probe_radius(),
        slices_per_atom: sasa.slices_per_atom(),
    };

    if let Some(path) = &cli.output {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &output)?;
    } else {
        let stdout = io::stdout().lock();
        serde_json::to_writer_pretty(stdout, &output)?;
        println!();
    }

    Ok(())
}
