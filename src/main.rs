use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use rayon::prelude::*;
use tagtext::{
    CommandOpener,
    Dispatcher,
    Hooks,
    LogReporter,
    Platform,
    RecordingOpener,
    TagKind,
    TextSegment,
    Theme,
    apply_limits,
    default_patterns,
    format_segments,
    logging::init_logger,
    parse_limit,
    process_text,
};

#[derive(Parser)]
#[command(version, about = "Split text into styled, tappable segments")]
struct Cli {
    #[command(flatten)]
    opts: ExtractOpts,
    /// Print the URI each tappable segment opens instead of the segments
    #[arg(long, conflicts_with = "open")]
    links: bool,
    /// Open the N-th tappable segment (counting from 0 across all inputs)
    #[arg(long, value_name = "N")]
    open: Option<usize>,
    /// Program used by --open to launch URIs
    #[arg(long, value_name = "PROGRAM", requires = "open")]
    opener: Option<String>,
    /// Platform whose dial URI scheme is used (ios or android)
    #[arg(long, default_value = "android")]
    platform: Platform,
    /// Increase log output on stderr (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Text files to process; standard input when omitted
    files: Vec<PathBuf>,
}

#[derive(clap::Args, Clone)]
struct ExtractOpts {
    /// Strip markup delimiters from matched segments
    #[arg(long)]
    render: bool,
    /// Convert HTML tags to inline markup before extraction
    #[arg(long)]
    html: bool,
    /// Cap the matches of a kind, e.g. `url=1` (repeatable)
    #[arg(long = "max-matches", value_name = "KIND=N", value_parser = parse_limit)]
    max_matches: Vec<(TagKind, usize)>,
}

/// Segments with a tap action.
fn is_tappable(segment: &TextSegment) -> bool { segment.on_activate.is_some() }

fn segments_for(text: &str, opts: &ExtractOpts, hooks: &Hooks) -> Vec<TextSegment> {
    let mut patterns = default_patterns(&Theme::default(), hooks);
    apply_limits(&mut patterns, &opts.max_matches);
    process_text(text, &patterns, opts.html, opts.render)
}

/// Dry-run every tap and collect the URIs that would be opened.
fn link_lines(text: &str, opts: &ExtractOpts, platform: Platform) -> Vec<String> {
    let recorder = Arc::new(RecordingOpener::default());
    let dispatcher = Dispatcher::new(Arc::clone(&recorder), LogReporter, platform);
    let hooks = Hooks {
        dispatcher: Some(Arc::new(dispatcher)),
        ..Hooks::default()
    };
    for segment in segments_for(text, opts, &hooks) {
        segment.activate();
    }
    recorder.opened()
}

fn output_lines(text: &str, cli: &Cli) -> Vec<String> {
    if cli.links {
        link_lines(text, &cli.opts, cli.platform)
    } else {
        format_segments(&segments_for(text, &cli.opts, &Hooks::default()))
    }
}

fn read_inputs(files: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    if files.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        return Ok(vec![input]);
    }
    files
        .par_iter()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        })
        .collect()
}

fn open_nth(inputs: &[String], cli: &Cli, index: usize) -> anyhow::Result<()> {
    let opener = cli
        .opener
        .as_deref()
        .map_or_else(CommandOpener::default, |program| CommandOpener::new(program));
    let hooks = Hooks {
        dispatcher: Some(Arc::new(Dispatcher::new(opener, LogReporter, cli.platform))),
        ..Hooks::default()
    };
    let Some(segment) = inputs
        .iter()
        .flat_map(|text| segments_for(text, &cli.opts, &hooks))
        .filter(is_tappable)
        .nth(index)
    else {
        bail!("no tappable segment at index {index}");
    };
    log::info!("activating {:?}", segment.text);
    segment.activate();
    Ok(())
}

/// Entry point for the command-line tool.
///
/// Reads each file (or standard input), extracts its segments and prints
/// one `KIND<TAB>TEXT` line per segment, with a blank line between files.
/// `--links` prints the URIs taps would open; `--open N` opens one.
///
/// # Examples
///
/// ```sh
/// echo 'call 555-123-4567 **now**' | tagtext --render
/// tagtext --links notes.txt
/// tagtext --open 0 --platform ios notes.txt
/// ```
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let inputs = read_inputs(&cli.files)?;

    if let Some(index) = cli.open {
        return open_nth(&inputs, &cli, index);
    }

    let outputs: Vec<Vec<String>> = inputs.par_iter().map(|text| output_lines(text, &cli)).collect();
    let blocks: Vec<String> = outputs.into_iter().map(|lines| lines.join("\n")).collect();
    let joined = blocks.join("\n\n");
    if !joined.is_empty() {
        println!("{joined}");
    }
    Ok(())
}
