use clap::Parser;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

#[derive(Debug, Parser)]
#[command(about = "Builds the per-frame overview timeline of a decoded match recording")]
struct Cli {
    /// Decoded recording (newline delimited JSON)
    recording: std::path::PathBuf,

    /// Frame rate to use if the recording does not report a valid one
    #[arg(long)]
    framerate: Option<f64>,

    /// Tick rate to use if the recording does not report a valid one
    #[arg(long)]
    tickrate: Option<f64>,

    /// Write the parsed match as JSON to this file
    #[arg(long, short)]
    output: Option<std::path::PathBuf>,

    /// Log per frame details
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> std::process::ExitCode {
    let args = Cli::parse();

    let level = if args.verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::filter_fn(move |meta| {
            (meta.target().contains("overview") || meta.target().starts_with("cli"))
                && *meta.level() <= level
        }));
    if let Err(e) = tracing::subscriber::set_global_default(registry) {
        eprintln!("Setting up logging: {}", e);
    }

    let config = overview::Config {
        fallback_frame_rate: args.framerate,
        fallback_tick_rate: args.tickrate,
    };

    let game = match overview::Match::open(&args.recording, &config) {
        Ok(g) => g,
        Err(e) => {
            tracing::error!("Parsing {:?}: {}", args.recording, e);
            return std::process::ExitCode::FAILURE;
        }
    };

    println!("Map: {} (origin {:?}, scale {})", game.map_name, game.map.origin, game.map.scale);
    println!("Frame rate: {} ({}) - Tick rate: {}", game.frame_rate, game.frame_rate_rounded, game.tick_rate);
    println!("States: {}", game.states.len());
    println!("Halves starting at: {:?}", game.half_starts);
    println!("Rounds: {}", game.round_starts.len());
    if let Some(last) = game.states.last() {
        println!(
            "Final score: {} {} - {} {}",
            display_name(&last.team_counter_terrorists, "CT"),
            last.team_counter_terrorists.score,
            last.team_terrorists.score,
            display_name(&last.team_terrorists, "T"),
        );
    }

    if let Some(path) = args.output.as_ref() {
        let result = std::fs::File::create(path)
            .map(std::io::BufWriter::new)
            .map_err(serde_json::Error::io)
            .and_then(|writer| serde_json::to_writer(writer, &game));

        if let Err(e) = result {
            tracing::error!("Writing {:?}: {}", path, e);
            return std::process::ExitCode::FAILURE;
        }
        tracing::info!("Wrote match to {:?}", path);
    }

    std::process::ExitCode::SUCCESS
}

fn display_name<'t>(team: &'t common::TeamState, fallback: &'t str) -> &'t str {
    if team.clan_name.is_empty() {
        fallback
    } else {
        &team.clan_name
    }
}
