//! squaremap CLI - lay out hierarchical JSON datasets as treemaps.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::doc_markdown
)]

mod config;
mod error;

use clap::{Args, Parser, Subcommand, ValueEnum};
use config::{AppConfig, Overrides};
use error::CliError;
use squaremap_core::json::parse_reader;
use squaremap_core::{Node, Point};
use squaremap_layout::{LayoutResult, SortOrder, Tile, TileMethod, TreemapLayoutEngine};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "squaremap")]
#[command(about = "Squarified treemap layout for hierarchical JSON datasets")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/squaremap/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the layout and print every tile
    Layout {
        /// Dataset file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// List leaf categories in legend order
    Categories {
        /// Dataset file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Show the tile under a point, as a hover tooltip would
    Hit {
        /// X coordinate
        x: f64,

        /// Y coordinate
        y: f64,

        /// Dataset file, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Print the effective configuration as YAML
    Config {
        /// Print the commented default configuration instead
        #[arg(long)]
        default: bool,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Args)]
struct OverrideArgs {
    /// Canvas width
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height
    #[arg(long)]
    height: Option<f64>,

    /// Inset applied to every tile
    #[arg(short, long)]
    padding: Option<f64>,

    /// Target aspect ratio for squarify rows
    #[arg(long)]
    ratio: Option<f64>,

    /// Tiling method (squarify, slice, dice, slice-dice, binary)
    #[arg(short, long)]
    tile: Option<TileMethod>,

    /// Sibling order (height-then-value, value, input)
    #[arg(long)]
    order: Option<SortOrder>,
}

impl From<&OverrideArgs> for Overrides {
    fn from(args: &OverrideArgs) -> Self {
        Self {
            width: args.width,
            height: args.height,
            padding: args.padding,
            ratio: args.ratio,
            tile: args.tile,
            order: args.order,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Layout {
            input,
            format,
            overrides,
        } => {
            config.apply(&Overrides::from(&overrides));
            let result = compute(&input, &config)?;
            match format {
                OutputFormat::Json => println!("{}", result.to_json()?),
                OutputFormat::Text => print!("{}", render_text(&result)),
            }
        }
        Commands::Categories { input, overrides } => {
            config.apply(&Overrides::from(&overrides));
            let result = compute(&input, &config)?;
            for category in result.categories() {
                println!("{category}");
            }
        }
        Commands::Hit {
            x,
            y,
            input,
            overrides,
        } => {
            config.apply(&Overrides::from(&overrides));
            let result = compute(&input, &config)?;
            match result.hit_test(Point::new(x, y)) {
                Some(tile) => print!("{}", tooltip(tile)),
                None => println!("No tile at ({x}, {y})"),
            }
        }
        Commands::Config { default, overrides } => {
            if default {
                print!("{}", AppConfig::default_yaml());
            } else {
                config.apply(&Overrides::from(&overrides));
                print!("{}", config.to_yaml()?);
            }
        }
    }

    Ok(())
}

fn read_tree(input: &Path) -> Result<Node, CliError> {
    if input.as_os_str() == "-" {
        log::debug!("reading dataset from stdin");
        return Ok(parse_reader(std::io::stdin().lock())?);
    }
    let file = File::open(input).map_err(|source| CliError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    Ok(parse_reader(BufReader::new(file))?)
}

fn compute(input: &Path, config: &AppConfig) -> Result<LayoutResult, CliError> {
    let tree = read_tree(input)?;
    let engine = TreemapLayoutEngine::new(config.layout);
    Ok(engine.layout(&tree, config.size())?)
}

/// One line per tile in drawing order, indented by depth.
fn render_text(result: &LayoutResult) -> String {
    let mut out = String::new();
    for tile in result.draw_order() {
        let category = tile
            .category
            .as_deref()
            .map(|c| format!(" [{c}]"))
            .unwrap_or_default();
        let id = tile
            .id
            .as_deref()
            .map(|id| format!(" id={id}"))
            .unwrap_or_default();
        let r = tile.rect;
        out.push_str(&format!(
            "{:indent$}{}{}{} value={} rect=({:.2}, {:.2}, {:.2}, {:.2})\n",
            "",
            tile.name,
            category,
            id,
            tile.value,
            r.x0,
            r.y0,
            r.x1,
            r.y1,
            indent = tile.depth * 2
        ));
    }
    out
}

fn tooltip(tile: &Tile) -> String {
    format!(
        "Name: {}\nCategory: {}\nValue: {}\n",
        tile.name,
        tile.category.as_deref().unwrap_or("-"),
        tile.value
    )
}
