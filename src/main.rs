use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use catalog_tree::catalog::{Catalog, Category, CategoryId, Gesture};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "catalog-tree",
    version,
    about = "Inspect and reorganise a flat JSON category list as a tree."
)]
struct Cli {
    /// Increase verbosity (-v, -vv). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the category tree.
    Show {
        /// JSON file holding a list of `{ id, name, parent_id }` records.
        file: PathBuf,
    },
    /// Move one category and print the resulting list as JSON.
    Move {
        /// JSON file holding a list of `{ id, name, parent_id }` records.
        file: PathBuf,

        /// Category to move.
        id: u64,

        #[arg(value_enum)]
        gesture: GestureKind,

        /// Reference category for `after`, `first-child-of` and `last-child-of`.
        #[arg(long)]
        target: Option<u64>,

        /// Write the result to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum GestureKind {
    Up,
    Down,
    After,
    FirstChildOf,
    LastChildOf,
    FirstRoot,
}

impl GestureKind {
    fn with_target(self, target: Option<u64>) -> Result<Gesture> {
        let require_target = || {
            target
                .map(CategoryId)
                .ok_or_else(|| anyhow!("gesture {self:?} needs --target"))
        };
        Ok(match self {
            GestureKind::Up => Gesture::Up,
            GestureKind::Down => Gesture::Down,
            GestureKind::FirstRoot => Gesture::FirstRoot,
            GestureKind::After => Gesture::After(require_target()?),
            GestureKind::FirstChildOf => Gesture::FirstChildOf(require_target()?),
            GestureKind::LastChildOf => Gesture::LastChildOf(require_target()?),
        })
    }
}

fn init_logging(cli: &Cli) {
    let default_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Catalog> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let categories: Vec<Category> = serde_json::from_str(&text)
        .with_context(|| format!("parsing categories from {}", path.display()))?;
    info!(count = categories.len(), path = %path.display(), "loaded categories");

    Catalog::from_categories(categories)
        .with_context(|| format!("building category tree from {}", path.display()))
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Command::Show { file } => {
            let catalog = load(&file)?;
            print!("{}", catalog.draw());
        }
        Command::Move {
            file,
            id,
            gesture,
            target,
            output,
        } => {
            let catalog = load(&file)?;
            let id = CategoryId(id);
            let gesture = gesture.with_target(target)?;

            let moved = catalog
                .apply(id, gesture)
                .ok_or_else(|| anyhow!("cannot apply {gesture:?} to category {id}"))?;
            let json = serde_json::to_string_pretty(&moved.to_categories())?;

            match output {
                Some(path) => fs::write(&path, json + "\n")
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}
