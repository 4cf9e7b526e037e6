use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storyreel", version)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved state of one frame as JSON.
    Frame(FrameArgs),
    /// Print resolved frame states of a range as JSON lines.
    Range(RangeArgs),
    /// Validate a storyboard and print a summary.
    Check(CheckArgs),
    /// Parse a transcript text file and print it as JSON.
    Transcript(TranscriptArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based). Frames past the end clamp to the last frame.
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct RangeArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// One past the last frame. Defaults to the storyboard duration.
    #[arg(long)]
    end: Option<u64>,

    /// Evaluate frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct TranscriptArgs {
    /// Transcript text file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print caption lines instead of units.
    #[arg(long)]
    lines: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Range(args) => cmd_range(args),
        Command::Check(args) => cmd_check(args),
        Command::Transcript(args) => cmd_transcript(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "storyreel=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_board(path: &Path) -> anyhow::Result<storyreel::Storyboard> {
    let board = storyreel::Storyboard::from_path(path)
        .with_context(|| format!("load storyboard '{}'", path.display()))?;
    board
        .validate()
        .with_context(|| format!("validate storyboard '{}'", path.display()))?;
    Ok(board)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let board = load_board(&args.in_path)?;
    let state = storyreel::Evaluator::eval_frame(&board, storyreel::FrameIndex(args.frame));
    let json = serde_json::to_string_pretty(&state).context("serialize frame state")?;
    println!("{json}");
    Ok(())
}

fn cmd_range(args: RangeArgs) -> anyhow::Result<()> {
    let board = load_board(&args.in_path)?;
    let range = storyreel::FrameRange::new(
        storyreel::FrameIndex(args.start),
        storyreel::FrameIndex(args.end.unwrap_or(board.duration_frames())),
    )?;
    let threading = storyreel::EvalThreading {
        parallel: args.parallel,
        threads: args.threads,
        ..storyreel::EvalThreading::default()
    };
    let states = storyreel::Evaluator::eval_range(&board, range, &threading)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for state in &states {
        serde_json::to_writer(&mut out, state).context("serialize frame state")?;
        writeln!(out).context("write stdout")?;
    }
    eprintln!("resolved {} frames", states.len());
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let board = load_board(&args.in_path)?;
    println!(
        "ok: {} frames at {}/{} fps, {} scenes, {} words, {} caption lines",
        board.duration_frames(),
        board.fps.num,
        board.fps.den,
        board.scenes.len(),
        board.transcript.len(),
        board.caption_lines().len()
    );
    Ok(())
}

fn cmd_transcript(args: TranscriptArgs) -> anyhow::Result<()> {
    let transcript = storyreel::Transcript::from_path(&args.in_path)
        .with_context(|| format!("load transcript '{}'", args.in_path.display()))?;
    let json = if args.lines {
        let lines = transcript.caption_lines(&storyreel::LineBreaking::default());
        let rows: Vec<_> = lines
            .iter()
            .map(|line| {
                serde_json::json!({
                    "start": line.start,
                    "end": line.end,
                    "text": transcript.line_text(line),
                })
            })
            .collect();
        serde_json::to_string_pretty(&rows)
    } else {
        serde_json::to_string_pretty(&transcript)
    }
    .context("serialize transcript")?;
    println!("{json}");
    Ok(())
}
