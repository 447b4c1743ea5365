use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use similar::TextDiff;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use text_with_changes::config::resolve_settings;
use text_with_changes::script::EditScript;
use text_with_changes::{Direction, MatchKind, Position, Range, SearchType, TextWithChanges};

/// Apply and inspect whitespace-only edits over a text file
#[derive(Parser)]
#[command(name = "twc")]
#[command(version)]
#[command(about = "Apply and inspect whitespace-only edits over a text file")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Base file, optional edit script and the base range to inspect
#[derive(clap::Args)]
struct Target {
    /// The base text file
    file: PathBuf,

    /// Edit script applied before inspecting
    #[arg(long)]
    script: Option<PathBuf>,

    /// Base offset the range starts at (default: start of file)
    #[arg(long)]
    from: Option<usize>,

    /// Base offset the range ends at (default: end of file)
    #[arg(long)]
    to: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an edit script and print the resulting text
    Apply {
        /// The base text file
        file: PathBuf,

        /// TOML edit script
        script: PathBuf,

        /// Print a unified diff instead of the full text
        #[arg(long)]
        diff: bool,
    },
    /// Find the first (or last) matching character in a range
    Search {
        #[command(flatten)]
        target: Target,

        /// What to look for
        #[arg(long, value_enum, default_value_t = Mode::Both)]
        mode: Mode,

        /// Scan from the end of the range
        #[arg(long)]
        backward: bool,

        /// Print the hit as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count line breaks and visual spaces in a range
    Count {
        #[command(flatten)]
        target: Target,

        /// Tab stop width (default: from config)
        #[arg(long)]
        tab_width: Option<usize>,

        /// Settings file (default: user config)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    NonWhitespace,
    LineBreak,
    Both,
}

impl From<Mode> for SearchType {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::NonWhitespace => SearchType::NonWhitespace,
            Mode::LineBreak => SearchType::LineBreak,
            Mode::Both => SearchType::Both,
        }
    }
}

#[derive(Serialize)]
struct Hit {
    position: Position,
    kind: MatchKind,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(message) = run(cli.command) {
        eprintln!("Error: {}", message);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), String> {
    match command {
        Commands::Apply { file, script, diff } => {
            let text = load(&file, Some(&script))?;
            let result = text.apply_changes();
            if diff {
                let diff = TextDiff::from_lines(text.base(), &result);
                let mut unified = diff.unified_diff();
                unified.header(&file.display().to_string(), "formatted");
                print!("{}", unified);
            } else {
                print!("{}", result);
            }
        }
        Commands::Search {
            target,
            mode,
            backward,
            json,
        } => {
            let text = load(&target.file, target.script.as_deref())?;
            let range = target_range(&text, &target);
            let direction = if backward {
                Direction::Backward
            } else {
                Direction::Forward
            };
            let hit = text
                .search(range, mode.into(), direction)
                .map(|(position, kind)| Hit { position, kind });
            if json {
                let rendered = serde_json::to_string(&hit).map_err(|e| e.to_string())?;
                println!("{}", rendered);
            } else {
                match hit {
                    Some(hit) => println!("{:?} at {}", hit.kind, hit.position),
                    None => println!("not found"),
                }
            }
        }
        Commands::Count {
            target,
            tab_width,
            config,
        } => {
            let settings = resolve_settings(config.as_deref()).map_err(|e| e.to_string())?;
            let tab_width = tab_width.unwrap_or(settings.tab_width);
            let text = load(&target.file, target.script.as_deref())?;
            let range = target_range(&text, &target);
            println!("breaks: {}", text.count_breaks(range));
            println!("spaces: {}", text.count_spaces(range, tab_width));
        }
    }
    Ok(())
}

fn load(file: &Path, script: Option<&Path>) -> Result<TextWithChanges, String> {
    let base = fs::read_to_string(file)
        .map_err(|e| format!("Could not read {}: {}", file.display(), e))?;
    let mut text = TextWithChanges::new(base);
    if let Some(script) = script {
        let script = EditScript::load(script)
            .map_err(|e| format!("Could not load {}: {}", script.display(), e))?;
        script.apply(&mut text).map_err(|e| e.to_string())?;
        log::info!("Applied {} edits", script.edits.len());
    }
    Ok(text)
}

/// Range named by `--from`/`--to`, defaulting to the whole logical text.
fn target_range(text: &TextWithChanges, target: &Target) -> Range {
    let full = text.full_range();
    let start = target.from.map_or(full.start, Position::in_base);
    let end = target.to.map_or(full.end, Position::in_base);
    start.up_to(end)
}
