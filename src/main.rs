use anyhow::Result;
use clap::Parser;
use flood_fill::export::export_grid_to_file;
use flood_fill::shapes::{ScatterParameters, demo_shapes, draw_all, scatter_rects};
use flood_fill::{FillParameters, FloodFill, Grid};
use std::path::PathBuf;

/// Parallel flood fill demo: draws a few shapes on a canvas, fills from a seed and prints the result
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Canvas width in cells
    #[arg(long, default_value_t = 100)]
    width: usize,

    /// Canvas height in cells
    #[arg(long, default_value_t = 120)]
    height: usize,

    /// Background character
    #[arg(long, default_value = "_", value_parser = parse_color)]
    blank: u8,

    /// Seed column
    #[arg(long, default_value_t = 2)]
    seed_x: usize,

    /// Seed row
    #[arg(long, default_value_t = 3)]
    seed_y: usize,

    /// Fill character
    #[arg(long, default_value = "G", value_parser = parse_color)]
    color: u8,

    /// Worker threads (defaults to available parallelism)
    #[arg(long)]
    workers: Option<usize>,

    /// Skip the built-in demo shapes
    #[arg(long)]
    no_demo_shapes: bool,

    /// Number of random rectangles to scatter over the canvas
    #[arg(long, default_value_t = 0)]
    scatter: usize,

    /// RNG seed for scattered rectangles
    #[arg(long, default_value_t = 42)]
    rng_seed: u64,

    /// Also write the filled canvas to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Don't print the canvas to stdout
    #[arg(long)]
    quiet: bool,
}

fn parse_color(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii_graphic() => Ok(*b),
        _ => Err(format!("expected a single printable ASCII character, got {:?}", s)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Creating {}x{} canvas", args.width, args.height);
    let mut grid = Grid::new(args.width, args.height, args.blank)?;

    if !args.no_demo_shapes {
        draw_all(&mut grid, &demo_shapes());
    }

    if args.scatter > 0 {
        let scatter = ScatterParameters {
            count: args.scatter,
            seed: args.rng_seed,
            ..Default::default()
        };
        draw_all(&mut grid, &scatter_rects(args.width, args.height, &scatter));
        log::info!("Scattered {} rectangles (seed {})", args.scatter, args.rng_seed);
    }

    let params = match args.workers {
        Some(n) => FillParameters::with_workers(n),
        None => FillParameters::default(),
    };

    let stats = FloodFill::with_params(params).run(&mut grid, args.seed_x, args.seed_y, args.color)?;
    log::info!(
        "Filled {} cells from ({}, {}) using {} workers",
        stats.cells_filled,
        stats.seed.x,
        stats.seed.y,
        stats.workers
    );

    if !args.quiet {
        println!("{}", grid);
    }

    if let Some(path) = &args.output {
        export_grid_to_file(&grid, path)?;
        log::info!("Exported filled canvas to {}", path.display());
    }

    Ok(())
}
