mod script;

use std::fs;
use std::io::{self, Read};

use clap::{Args, Parser, Subcommand};
use paperblock::doc::LineTool;
use paperblock::persist::BlockAttrs;
use paperblock::{EngineConfig, EngineCore};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid block attributes: {0}")]
    Persist(#[from] paperblock::PersistError),
    #[error("replay failed: {0}")]
    Replay(#[from] paperblock::EngineError),
}

#[derive(Parser, Debug)]
#[command(name = "paperblock", about = "Inspect, migrate and replay drawing blocks")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON engine configuration; flags below override its fields.
    #[arg(long, env = "PAPERBLOCK_CONFIG", global = true)]
    config: Option<String>,

    #[arg(long, env = "PAPERBLOCK_CANVAS_WIDTH", global = true)]
    canvas_width: Option<f64>,

    #[arg(long, env = "PAPERBLOCK_INITIAL_HEIGHT", global = true)]
    initial_height: Option<f64>,

    /// Cap on undo snapshots; unbounded when omitted.
    #[arg(long, env = "PAPERBLOCK_HISTORY_LIMIT", global = true)]
    history_limit: Option<usize>,

    #[arg(long, env = "PAPERBLOCK_DARK_MODE", global = true, default_value_t = false)]
    dark_mode: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hydrate block attributes and print them in the current dual format.
    Normalize {
        #[arg(long, default_value = "-", help = "Block attributes file, or - for stdin")]
        input: String,
    },
    /// Run a gesture script against a block and print the last update.
    Replay {
        #[arg(long, help = "Gesture script file (JSON array of steps)")]
        script: String,
        #[arg(long, help = "Initial block attributes file; empty block when omitted")]
        block: Option<String>,
    },
    /// Print a summary of a block.
    Inspect {
        #[arg(long, default_value = "-", help = "Block attributes file, or - for stdin")]
        input: String,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("PAPERBLOCK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli.config)?;
    match cli.command {
        Command::Normalize { input } => run_normalize(config, &input),
        Command::Replay { script, block } => run_replay(config, &script, block.as_deref()),
        Command::Inspect { input } => run_inspect(config, &input),
    }
}

fn build_config(args: &ConfigArgs) -> Result<EngineConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json(&read_input(path)?)?,
        None => EngineConfig::default(),
    };
    if let Some(width) = args.canvas_width {
        config.canvas_width = width;
    }
    if let Some(height) = args.initial_height {
        config.initial_height = height;
    }
    if let Some(limit) = args.history_limit {
        config.history_limit = Some(limit);
    }
    config.dark_mode |= args.dark_mode;
    Ok(config)
}

fn load_engine(config: EngineConfig, path: &str) -> Result<EngineCore, CliError> {
    let attrs = BlockAttrs::from_json(&read_input(path)?)?;
    let mut engine = EngineCore::new(config);
    engine.load(attrs);
    Ok(engine)
}

fn run_normalize(config: EngineConfig, input: &str) -> Result<(), CliError> {
    let engine = load_engine(config, input)?;
    let mut value = serde_json::to_value(engine.update())?;
    if let Some(map) = value.as_object_mut() {
        map.insert("paperType".to_owned(), serde_json::to_value(engine.background())?);
    }
    print_json(&value)
}

fn run_replay(config: EngineConfig, script_path: &str, block: Option<&str>) -> Result<(), CliError> {
    let mut engine = match block {
        Some(path) => load_engine(config, path)?,
        None => EngineCore::new(config),
    };
    let steps: Vec<script::Step> = serde_json::from_str(&read_input(script_path)?)?;
    let replay = script::replay(&mut engine, &steps)?;
    tracing::info!(steps = steps.len(), actions = replay.actions, lines = engine.lines().len(), "replay finished");

    let update = replay.last_update.unwrap_or_else(|| engine.update());
    print_json(&serde_json::to_value(update)?)
}

fn run_inspect(config: EngineConfig, input: &str) -> Result<(), CliError> {
    let engine = load_engine(config, input)?;
    let count = |tool: LineTool| engine.lines().iter().filter(|l| l.tool == tool).count();
    let bounds = engine.doc.content_bounds();
    let empty = engine.lines().iter().filter(|l| l.points.is_empty()).count();

    print_json(&json!({
        "lines": engine.lines().len(),
        "tools": {
            "pen": count(LineTool::Pen),
            "highlighter": count(LineTool::Highlighter),
            "eraser": count(LineTool::Eraser),
        },
        "empty_lines": empty,
        "bounds": bounds.map(|b| json!({ "x": b.x, "y": b.y, "width": b.width, "height": b.height })),
        "height": engine.height(),
        "paperType": engine.background(),
        "scene": engine.scene().stats(),
    }))
}

fn read_input(path: &str) -> Result<String, CliError> {
    let read = if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    };
    read.map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
