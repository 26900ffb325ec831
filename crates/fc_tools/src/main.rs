//! Freeciv ruleset calculator - development tools

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use fc_core::map::{Coordinates, MapSize};
use fc_core::settings::Topology;
use fc_tools::combat::{run_combat, CombatRequest};
use fc_tools::distance::DistanceReport;
use fc_tools::error::Result;
use fc_tools::loader::load_game;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fc-tools")]
#[command(about = "Development tools for Freeciv rulesets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a ruleset directory
    Validate {
        /// Directory holding the six ruleset files
        dir: PathBuf,
        /// Server settings file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Players file
        #[arg(long)]
        players: Option<PathBuf>,
    },
    /// Print a parsed ruleset as RON
    Dump {
        /// Directory holding the six ruleset files
        dir: PathBuf,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compute a combat outcome distribution
    Combat(CombatArgs),
    /// Compute the distance between two tiles
    Distance(DistanceArgs),
}

#[derive(Args)]
struct CombatArgs {
    /// Directory holding the six ruleset files
    dir: PathBuf,
    /// Attacking unit type id
    #[arg(long)]
    attacker: String,
    /// Defending unit type id
    #[arg(long)]
    defender: String,
    /// Terrain id of the defender's tile
    #[arg(long)]
    terrain: String,
    #[arg(long, default_value_t = 0)]
    attacker_vet: usize,
    #[arg(long, default_value_t = 0)]
    defender_vet: usize,
    /// Attacker hit points [default: full]
    #[arg(long)]
    attacker_hp: Option<i64>,
    /// Defender hit points [default: full]
    #[arg(long)]
    defender_hp: Option<i64>,
    /// Attacker move fragments left [default: full]
    #[arg(long)]
    moves: Option<i64>,
    #[arg(long)]
    fortified: bool,
    #[arg(long)]
    in_city: bool,
    #[arg(long, default_value_t = 0)]
    city_size: i64,
    /// Extra id on the defender's tile (repeatable)
    #[arg(long = "extra")]
    extras: Vec<String>,
    /// Building id in the city (repeatable)
    #[arg(long = "building")]
    buildings: Vec<String>,
    /// Wonder building id the defender's owner holds (repeatable)
    #[arg(long = "wonder")]
    wonders: Vec<String>,
    /// Print JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DistanceArgs {
    /// Start tile as X,Y
    #[arg(long)]
    from: Coordinates,
    /// End tile as X,Y
    #[arg(long)]
    to: Coordinates,
    #[arg(long)]
    xsize: i64,
    #[arg(long)]
    ysize: i64,
    #[arg(long)]
    wrapx: bool,
    #[arg(long)]
    wrapy: bool,
    #[arg(long)]
    iso: bool,
    #[arg(long)]
    hex: bool,
    /// Print JSON
    #[arg(long)]
    json: bool,
}

fn validate(dir: &Path, settings: Option<&Path>, players: Option<&Path>) -> Result<()> {
    let report = fc_tools::validate::validate_ruleset_dir(dir, settings, players)?;
    println!("{report}");
    Ok(())
}

fn dump(dir: &Path, output: Option<&Path>) -> Result<()> {
    let text = fc_tools::dump::dump_ruleset(dir, output)?;
    if output.is_none() {
        println!("{text}");
    }
    Ok(())
}

fn combat(args: CombatArgs) -> Result<()> {
    let (ruleset, _) = load_game(&args.dir, None, None)?;
    let request = CombatRequest {
        attacker: args.attacker,
        defender: args.defender,
        terrain: args.terrain,
        attacker_vet: args.attacker_vet,
        defender_vet: args.defender_vet,
        attacker_hp: args.attacker_hp,
        defender_hp: args.defender_hp,
        moves: args.moves,
        fortified: args.fortified,
        in_city: args.in_city,
        city_size: args.city_size,
        extras: args.extras,
        buildings: args.buildings,
        wonders: args.wonders,
    };
    let report = run_combat(&ruleset, &request)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn distance(args: &DistanceArgs) -> Result<()> {
    let topology = Topology {
        wrap_x: args.wrapx,
        wrap_y: args.wrapy,
        iso: args.iso,
        hex: args.hex,
    };
    let size = MapSize {
        xsize: args.xsize,
        ysize: args.ysize,
    };
    let report = DistanceReport::measure(args.from, args.to, size, topology);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            dir,
            settings,
            players,
        } => {
            tracing::info!("Validating ruleset in: {}", dir.display());
            validate(&dir, settings.as_deref(), players.as_deref())
        }
        Commands::Dump { dir, output } => dump(&dir, output.as_deref()),
        Commands::Combat(args) => combat(args),
        Commands::Distance(args) => distance(&args),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
