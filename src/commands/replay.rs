// Replay command - collect an event stream and play it back

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::{info, warn};

use crate::cli::args::{ReplayArgs, ReplayFormat};
use crate::collector::SimpleLogCollector;
use crate::config::Config;
use crate::output::{Event, JsonLinesOutput, Output, TextMode, TextOutput, read_events};

/// Read events per `args`, replay them to stdout and report whether the run
/// had errors
pub fn handle_replay(args: &ReplayArgs, config: &Config) -> Result<bool> {
    let events = match &args.input {
        Some(path) if !args.reads_stdin() => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open event stream: {}", path.display()))?;
            read_events(BufReader::new(file))
                .with_context(|| format!("Failed to read events from {}", path.display()))?
        }
        _ => read_events(io::stdin().lock()).context("Failed to read events from stdin")?,
    };

    info!("Read {} event(s)", events.len());
    if events.is_empty() {
        warn!("Event stream is empty");
    }

    let stdout = io::stdout();
    Ok(replay_events(&events, args, config, stdout.lock()))
}

/// Feed `events` through a collector, then replay the log to `writer`
pub fn replay_events<W: Write>(
    events: &[Event],
    args: &ReplayArgs,
    config: &Config,
    writer: W,
) -> bool {
    let mut effective = config.clone();
    effective.collector.write_to_console |= args.console;
    effective.output.color &= !args.no_color;

    let mut collector = SimpleLogCollector::from_config(&effective);
    for event in events {
        event.dispatch(&mut collector);
    }

    let mode = args.replay_mode(config);
    let mut sink: Box<dyn Output + '_> = match args.replay_format() {
        ReplayFormat::Text => Box::new(
            TextOutput::new(TextMode::Verbose, writer).with_color(effective.output.color),
        ),
        ReplayFormat::Json => Box::new(JsonLinesOutput::new(writer)),
    };
    collector.play_to(&mut sink, mode);

    info!(
        records = collector.len(),
        errors = collector.has_errors(),
        "Replay finished"
    );
    collector.has_errors()
}
