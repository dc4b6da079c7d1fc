//! Hexterra CLI - procedural hex terrain generator.
//!
//! Generate a world of hex chunks, erode it and export previews.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use hexterra::biomes::Biome;
use hexterra::export::{
    export_altitude_png, export_color_preview, export_snapshots_json, preview_dimensions,
    AltitudeExportOptions, PreviewOptions,
};
use hexterra::{ErosionConfig, ErosionMode, World, WorldConfig};

/// Procedural hexagonal terrain generator.
#[derive(Parser)]
#[command(name = "hexterra")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and erode a new world.
    Generate {
        #[command(flatten)]
        world: WorldArgs,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "world")]
        name: String,

        /// Pixels per hex in the color preview.
        #[arg(long, default_value = "4")]
        cell_px: u32,

        /// Skip the color preview PNG.
        #[arg(long)]
        no_preview: bool,

        /// Export a 16-bit altitude PNG.
        #[arg(long)]
        altitude_map: bool,

        /// Export cell snapshots as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration and grid sizes.
    Info {
        #[command(flatten)]
        world: WorldArgs,
    },
}

#[derive(clap::Args)]
struct WorldArgs {
    /// JSON config file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chunks per side of the square world.
    #[arg(short = 'd', long)]
    diag_chunks: Option<usize>,

    /// Cells per chunk side.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Random seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of noise octaves (1-16).
    #[arg(long)]
    octaves: Option<u32>,

    /// Erosion ticks (0 skips erosion).
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Erosion parameter preset; replaces the config file's erosion section.
    #[arg(long)]
    preset: Option<Preset>,

    /// Fraction of precipitation kept as water, for seeding and rain (0-1).
    #[arg(long)]
    retention: Option<f64>,

    /// Erode the world as one grid or chunk by chunk.
    #[arg(long)]
    mode: Option<ModeArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Default,
    Gentle,
    Aggressive,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Water crosses chunk seams.
    Contiguous,
    /// Each chunk erodes on its own.
    PerChunk,
}

impl WorldArgs {
    fn resolve(&self) -> WorldConfig {
        let mut config = match &self.config {
            Some(path) => WorldConfig::load(path).unwrap_or_else(|e| {
                eprintln!("Error reading config {}: {}", path.display(), e);
                std::process::exit(1);
            }),
            None => WorldConfig::default(),
        };

        if let Some(preset) = self.preset {
            config.erosion = match preset {
                Preset::Default => ErosionConfig::default(),
                Preset::Gentle => ErosionConfig::gentle(),
                Preset::Aggressive => ErosionConfig::aggressive(),
            };
            config.erosion.retention = config.terrain.retention;
        }
        if let Some(retention) = self.retention {
            config.set_retention(retention);
        }
        if let Some(d) = self.diag_chunks {
            config.diag_chunks = d;
        }
        if let Some(size) = self.chunk_size {
            config.terrain.chunk_size = size;
        }
        if let Some(seed) = self.seed {
            config.terrain.seed = seed;
        }
        if let Some(octaves) = self.octaves {
            config.terrain.octave_count = octaves;
        }
        if let Some(iterations) = self.iterations {
            config.erosion.iterations = iterations;
        }
        if let Some(mode) = self.mode {
            config.mode = match mode {
                ModeArg::Contiguous => ErosionMode::Contiguous,
                ModeArg::PerChunk => ErosionMode::PerChunk,
            };
        }

        if let Err(e) = config.validate() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        config
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            world,
            output,
            name,
            cell_px,
            no_preview,
            altitude_map,
            json,
        } => {
            let config = world.resolve();
            run_generate(&config, output, name, cell_px, no_preview, altitude_map, json);
        }
        Commands::Info { world } => {
            run_info(&world.resolve());
        }
    }
}

fn run_generate(
    config: &WorldConfig,
    output: PathBuf,
    name: String,
    cell_px: u32,
    no_preview: bool,
    altitude_map: bool,
    json: bool,
) {
    let water_level = config.erosion.water_level;

    println!("Hexterra - Procedural Hex Terrain");
    println!("=================================");
    println!(
        "World: {}x{} chunks of {}x{} cells",
        config.diag_chunks, config.diag_chunks, config.terrain.chunk_size, config.terrain.chunk_size
    );
    println!("Seed: {}", config.terrain.seed);
    println!("Output: {}", output.display());

    let start = Instant::now();

    println!("\nGenerating chunks...");
    let mut world = World::generate(config).unwrap_or_else(|e| {
        eprintln!("Error during generation: {}", e);
        std::process::exit(1);
    });
    println!("  {} cells in {:.2?}", world.cells().len(), start.elapsed());

    if config.erosion.iterations > 0 {
        println!("Eroding ({} ticks, {:?})...", config.erosion.iterations, config.mode);
        let erode_start = Instant::now();
        let ledger = world.erode(&config.erosion, config.mode).unwrap_or_else(|e| {
            eprintln!("Error during erosion: {}", e);
            std::process::exit(1);
        });
        println!(
            "  Rained {:.3}, evaporated {:.3} in {:.2?}",
            ledger.rained,
            ledger.evaporated,
            erode_start.elapsed()
        );
    } else {
        println!("Erosion: SKIPPED");
        world.classify(water_level);
    }

    let stats = world.stats(water_level);
    println!("Generation completed in {:.2?}", start.elapsed());
    println!("Altitude range: [{:.4}, {:.4}]", stats.min_altitude, stats.max_altitude);
    println!("Water: {:.3} total, {:.1}% of cells", stats.total_water, stats.water_fraction() * 100.0);
    println!("Sediment: {:.3} total", stats.total_sediment);
    println!("\nBiomes:");
    for biome in Biome::ALL {
        let count = stats.biomes[biome.as_u8() as usize];
        if count > 0 {
            println!("  {:<14} {:>8}", biome.name(), count);
        }
    }

    println!("\nExporting...");
    std::fs::create_dir_all(&output).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    let shape = world.layout().shape();

    if !no_preview {
        let options = PreviewOptions {
            cell_px,
            ..Default::default()
        };
        let path = output.join(format!("{}_preview.png", name));
        export_color_preview(world.cells(), shape, &path, &options).unwrap_or_else(|e| {
            eprintln!("Error exporting preview: {}", e);
            std::process::exit(1);
        });
        println!("  Exported color preview: {}", path.display());
    }

    if altitude_map {
        let path = output.join(format!("{}_altitude.png", name));
        export_altitude_png(world.cells(), shape, &path, &AltitudeExportOptions::default())
            .unwrap_or_else(|e| {
                eprintln!("Error exporting altitude map: {}", e);
                std::process::exit(1);
            });
        println!("  Exported altitude map: {}", path.display());
    }

    if json {
        let path = output.join(format!("{}_cells.json", name));
        export_snapshots_json(world.cells(), world.width(), water_level, &path).unwrap_or_else(|e| {
            eprintln!("Error exporting snapshots: {}", e);
            std::process::exit(1);
        });
        println!("  Exported cell snapshots: {}", path.display());
    }

    println!("\nDone!");
}

fn run_info(config: &WorldConfig) {
    let size = config.terrain.chunk_size;
    let width = config.diag_chunks * size;
    let cells = width * width;
    let bytes = cells * std::mem::size_of::<hexterra::HexCell>();
    let (pw, ph) = preview_dimensions(hexterra::GridShape::square(width), 4);

    println!("Hexterra - World Configuration Info");
    println!("===================================");
    println!();
    println!("Chunks:      {}x{} of {}x{} cells", config.diag_chunks, config.diag_chunks, size, size);
    println!("World grid:  {}x{} ({} cells)", width, width, cells);
    println!("Memory:      {} bytes ({:.2} MB)", bytes, bytes as f64 / 1024.0 / 1024.0);
    println!("Preview:     {}x{} px at 4 px per hex", pw, ph);
    println!();
    match config.to_json() {
        Ok(text) => println!("Effective config:\n{}", text),
        Err(e) => eprintln!("Error encoding config: {}", e),
    }
}
