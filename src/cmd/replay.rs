use crate::reports;
use clap::Args;
use rayon::prelude::*;
use serde::Deserialize;
use skyscore::config::Config;
use skyscore::error::SkResult;
use skyscore::geo::GeoPoint;
use skyscore::result::ContestResult;
use skyscore::rules::RuleKind;
use skyscore::session::ContestSession;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// CSV fix files (time,lat,lon) to score.
    #[arg(required = true)]
    pub files: Vec<String>,

    #[arg(short, long, default_value = "fai-triangle")]
    pub rule: RuleKind,

    #[command(flatten)]
    pub config: Config,
}

#[derive(Debug, Deserialize)]
struct FixRow {
    time: f64,
    lat: f64,
    lon: f64,
}

pub fn run(args: &ReplayArgs, config: &Config) -> SkResult<()> {
    info!(
        "🚀 Scoring {} trace file(s) under rule '{}'",
        args.files.len(),
        args.rule
    );

    // Each file gets its own session; files are independent, so the
    // batch is embarrassingly parallel. The engine itself stays
    // single-threaded per session.
    let outcomes: Vec<(String, SkResult<ContestResult>)> = args
        .files
        .par_iter()
        .map(|path| (path.clone(), replay_file(path, args.rule, config)))
        .collect();

    let mut scored = Vec::new();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(result) => scored.push((path, result)),
            Err(e) => warn!("⚠️  {}: {}", path, e),
        }
    }

    for (path, result) in &scored {
        reports::print_result(path, result);
    }
    if scored.len() > 1 {
        reports::print_comparison(&scored);
    }
    Ok(())
}

fn replay_file(path: &str, rule: RuleKind, config: &Config) -> SkResult<ContestResult> {
    let mut session = ContestSession::new(rule, config);
    let mut reader = csv::Reader::from_path(path)?;

    for record in reader.deserialize() {
        let fix: FixRow = record?;
        // A replay can contain timebase glitches; skip the bad fix and
        // keep scoring rather than abandoning the whole file.
        if let Err(e) = session.push_fix(GeoPoint::new(fix.lat, fix.lon), fix.time) {
            warn!("⚠️  {}: skipping fix: {}", path, e);
        }
    }

    Ok(session.solve_now().clone())
}
