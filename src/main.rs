//! Command-line front end.
//!
//! Reads a saved conversation response (or a bare cast tree) and prints the
//! flattened conversation:
//!
//! ```text
//! castview flatten thread.json          # JSON: casts + sections
//! castview outline thread.json          # indented text outline
//! castview view thread.json             # JSON: thread screen view model
//! curl ... | castview outline -         # read stdin
//! ```
//!
//! Configuration is read from `--config` (a leading `~` is expanded), else
//! from the default location if that file exists (see
//! [`castview::infrastructure::default_config_path`]).

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use castview::api::decode_conversation;
use castview::infrastructure::{default_config_path, expand_tilde};
use castview::ui::{build_thread_viewmodel, now_millis};
use castview::{Cast, Config, DepthMode, FlattenedConversation, Result};

#[derive(Parser, Debug)]
#[clap(name = "castview", version, about = "Flatten social-feed conversation trees")]
struct Cli {
    /// Configuration file (TOML)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Tracing filter, overrides `trace_level` from the configuration
    #[clap(long, global = true)]
    log_level: Option<String>,

    /// Depth assignment, overrides `depth_mode` from the configuration
    #[clap(long, global = true, value_parser = parse_depth_mode)]
    depth_mode: Option<DepthMode>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the flattened conversation as JSON
    Flatten {
        /// Conversation response file, or `-` for stdin
        file: PathBuf,

        /// Print compact single-line JSON
        #[clap(long)]
        compact: bool,
    },

    /// Print the conversation as an indented outline
    Outline {
        /// Conversation response file, or `-` for stdin
        file: PathBuf,
    },

    /// Print the thread screen view model as JSON, timed against the clock
    View {
        /// Conversation response file, or `-` for stdin
        file: PathBuf,
    },
}

fn parse_depth_mode(value: &str) -> std::result::Result<DepthMode, String> {
    match value {
        "recompute" => Ok(DepthMode::Recompute),
        "trust" => Ok(DepthMode::Trust),
        other => Err(format!("expected `recompute` or `trust`, got `{other}`")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("castview: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.trace_level = Some(level);
    }
    if let Some(mode) = cli.depth_mode {
        config.depth_mode = mode;
    }
    castview::observability::init_tracing(&config);

    let _span = tracing::debug_span!("cli", command = ?cli.command).entered();
    let flattener = config.flattener();

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Command::Flatten { file, compact } => {
            let root = parse_thread(&read_body(file, io::stdin())?)?;
            let conversation = flattener.flatten_roots([root.as_ref()]);
            if *compact {
                serde_json::to_writer(&mut stdout, &conversation)?;
            } else {
                serde_json::to_writer_pretty(&mut stdout, &conversation)?;
            }
            writeln!(stdout)?;
        }
        Command::Outline { file } => {
            let root = parse_thread(&read_body(file, io::stdin())?)?;
            let conversation = flattener.flatten_roots([root.as_ref()]);
            write_outline(&mut stdout, &conversation)?;
        }
        Command::View { file } => {
            let root = parse_thread(&read_body(file, io::stdin())?)?;
            let conversation = flattener.flatten_roots([root.as_ref()]);
            let viewmodel = build_thread_viewmodel(&conversation, now_millis());
            serde_json::to_writer_pretty(&mut stdout, &viewmodel)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        let path = path.to_str().map_or_else(|| path.to_path_buf(), expand_tilde);
        return Config::from_file(path);
    }
    match default_config_path() {
        Some(default) if default.exists() => Config::from_file(default),
        _ => Ok(Config::default()),
    }
}

/// Reads `file`, or all of `stdin` when `file` is `-`.
fn read_body(file: &Path, mut stdin: impl Read) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut body = String::new();
        stdin.read_to_string(&mut body)?;
        Ok(body)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

/// Decodes a conversation envelope, falling back to a bare cast tree.
///
/// When neither form parses, the envelope error is returned.
fn parse_thread(body: &str) -> Result<Option<Cast>> {
    match decode_conversation(body) {
        Ok(root) => Ok(root),
        Err(envelope_err) => serde_json::from_str::<Cast>(body)
            .map(Some)
            .map_err(|_| envelope_err),
    }
}

fn write_outline(out: &mut impl Write, conversation: &FlattenedConversation<'_>) -> Result<()> {
    if conversation.is_empty() {
        writeln!(out, "(empty conversation)")?;
        return Ok(());
    }

    for item in &conversation.casts {
        let indent = "  ".repeat(usize::try_from(item.depth).unwrap_or(usize::MAX).min(64));
        let cast = item.cast;
        let text = cast.text.lines().next().unwrap_or_default();
        writeln!(out, "{indent}@{} [{}] {text}", cast.author.username, cast.hash)?;
    }

    if conversation.depth_mismatches > 0 {
        tracing::info!(
            mismatches = conversation.depth_mismatches,
            "upstream depth labels disagreed with the tree"
        );
    }
    Ok(())
}
