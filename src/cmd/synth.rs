use crate::reports;
use clap::Args;
use skyscore::config::Config;
use skyscore::error::SkResult;
use skyscore::rules::RuleKind;
use skyscore::session::ContestSession;
use skyscore::synth::{generate_flight, SynthOptions};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct SynthArgs {
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,

    #[arg(short, long, default_value_t = 600)]
    pub points: usize,

    #[arg(short, long, default_value = "fai-triangle")]
    pub rule: RuleKind,

    /// Write the generated fixes to this CSV path.
    #[arg(short, long)]
    pub out: Option<String>,

    #[command(flatten)]
    pub config: Config,
}

pub fn run(args: &SynthArgs, config: &Config) -> SkResult<()> {
    let opts = SynthOptions {
        seed: args.seed,
        points: args.points,
        ..SynthOptions::default()
    };
    info!(
        "🚀 Generating {} fixes (seed {}) and scoring under rule '{}'",
        opts.points, opts.seed, args.rule
    );

    let fixes = generate_flight(&opts);

    if let Some(out) = &args.out {
        let mut writer = csv::Writer::from_path(out)?;
        writer.write_record(["time", "lat", "lon"])?;
        for (pos, time) in &fixes {
            writer.write_record(&[time.to_string(), pos.lat.to_string(), pos.lon.to_string()])?;
        }
        writer.flush()?;
        info!("📂 Wrote fixes to {}", out);
    }

    let mut session = ContestSession::new(args.rule, config);
    for (pos, time) in &fixes {
        if let Err(e) = session.push_fix(*pos, *time) {
            warn!("⚠️  skipping fix: {}", e);
        }
    }

    let result = session.solve_now().clone();
    reports::print_result(&format!("synth(seed={})", args.seed), &result);
    Ok(())
}
