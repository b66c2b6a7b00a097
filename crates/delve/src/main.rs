//! delve: generate a dungeon floor and print it
//!
//! Parameters come from flags, optionally layered over a JSON config file.
//! Set `RUST_LOG=delve_core=debug` to follow the generator.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use delve_core::{
    GameRng, GeneratedLevel, GenerationStage, GeneratorConfig, LayerKind, Map, Tile,
    generate_for_depth, generate_with_observer,
};

#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Delve - carve a dungeon floor", long_about = None)]
struct Args {
    /// JSON file with generator parameters; flags override it
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Map width in cells
    #[arg(short = 'W', long = "width")]
    width: Option<i32>,

    /// Map height in cells
    #[arg(short = 'H', long = "height")]
    height: Option<i32>,

    /// Number of street-reserving split rounds
    #[arg(short = 's', long = "splits")]
    splits: Option<u32>,

    /// Minimum room span, walls included
    #[arg(short = 'm', long = "min-room")]
    min_room: Option<i32>,

    /// Street width
    #[arg(long = "corridor")]
    corridor: Option<i32>,

    /// Numeric seed
    #[arg(long = "seed", conflicts_with = "seed_str")]
    seed: Option<u64>,

    /// Seed phrase, hashed into a numeric seed
    #[arg(long = "seed-str")]
    seed_str: Option<String>,

    /// Dungeon depth; 0 is the top floor and deeper floors are negative
    #[arg(short = 'd', long = "depth", default_value_t = -1, allow_negative_numbers = true)]
    depth: i32,

    /// Reject parameters that cannot produce a useful floor
    #[arg(long = "strict")]
    strict: bool,

    /// Print level statistics after the map
    #[arg(long = "stats")]
    stats: bool,

    /// Print the map after every generation stage
    #[arg(long = "stages")]
    stages: bool,
}

impl Args {
    fn generator_config(&self) -> Result<GeneratorConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_json(&fs::read_to_string(path)?)?,
            None => GeneratorConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(splits) = self.splits {
            config.splits = splits;
        }
        if let Some(min_room) = self.min_room {
            config.min_room_size = min_room;
        }
        if let Some(corridor) = self.corridor {
            config.corridor_width = corridor;
        }
        Ok(config)
    }

    fn rng(&self) -> GameRng {
        match (self.seed, &self.seed_str) {
            (Some(seed), _) => GameRng::new(seed),
            (None, Some(phrase)) => GameRng::from_seed_str(phrase),
            (None, None) => GameRng::from_entropy(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.generator_config()?;
    if args.strict {
        config.validate()?;
    }
    let mut rng = args.rng();
    info!(seed = rng.seed(), ?config, "generating level");

    if args.stages {
        // Same seed, so the stages lead up to the final map; depth is applied after
        generate_with_observer(&config, &mut rng.clone(), print_stage);
    }
    let level = generate_for_depth(args.depth, &config, &mut rng);

    print_map(&level.map);
    if args.stats {
        print_stats(&level, rng.seed());
    }
    Ok(())
}

fn print_map(map: &Map) {
    for row in map.symbol_rows() {
        println!("{}", row.trim_end());
    }
}

fn print_stage(stage: GenerationStage, map: &Map) {
    println!("== {} ==", stage);
    print_map(map);
    println!();
}

fn print_stats(level: &GeneratedLevel, seed: u64) {
    let rooms = level.areas.rooms().count();
    let connected = level.areas.rooms().filter(|(_, r)| r.is_connected()).count();
    let critical = level
        .areas
        .iter()
        .filter(|(_, a)| a.is_on_critical_path())
        .count();
    let farthest = level.critical_distance.iter().flatten().max().copied();

    println!();
    println!("seed:      {}", seed);
    println!("size:      {}x{}", level.map.width(), level.map.height());
    println!("areas:     {}", level.areas.len());
    println!("streets:   {}", level.areas.streets().count());
    println!("rooms:     {} ({} with doors)", rooms, connected);
    println!("doors:     {}", level.doors.len());
    println!("critical:  {}", critical);
    if let Some(d) = farthest {
        println!("farthest:  {} hops from the critical path", d);
    }
    match level.up() {
        Some((x, y)) => println!("up:        ({}, {})", x, y),
        None => println!("up:        none"),
    }
    match level.down() {
        Some((x, y)) => println!("down:      ({}, {})", x, y),
        None => println!("down:      none"),
    }
    let downs = level
        .map
        .find_tiles(LayerKind::Structures, Tile::StairsDown)
        .len();
    if downs > 1 {
        println!("           {} stairs lead down", downs);
    }
}
