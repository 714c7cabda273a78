//! Replays a pose recording through a repetition counter and form analyzer.

use anyhow::{Context, Result};
use clap::Parser;
use fitness_counter::{
    app::{ReplaySession, ReplaySummary},
    config::{Config, EXAMPLE_CONFIG},
    counters::{ExerciseCounter, LateralRaiseCounter, SingleSquatCounter},
    exercises::Exercise,
    form::LateralRaiseFormAnalyzer,
    landmarks::PoseFrame,
    recording::PoseRecording,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pose recording to replay (YAML or JSON)
    #[arg(short, long, required_unless_present = "example_config")]
    recording: Option<PathBuf>,

    /// Exercise performed in the recording (lateral-raise, single-squat)
    #[arg(short, long, default_value = "lateral-raise")]
    exercise: String,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Skip form analysis
    #[arg(long)]
    no_form: bool,

    /// Print the summary as YAML
    #[arg(long)]
    yaml: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    example_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn replay<C: ExerciseCounter>(
    exercise: Exercise,
    counter: C,
    analyzer: Option<LateralRaiseFormAnalyzer>,
    frames: &[PoseFrame],
) -> ReplaySummary {
    ReplaySession::new(exercise, counter, analyzer).run(frames)
}

fn print_summary(summary: &ReplaySummary) {
    println!("Exercise:  {}", summary.exercise);
    println!(
        "Frames:    {} ({} skipped)",
        summary.frames_processed, summary.frames_skipped
    );
    println!("Reps:      {}", summary.rep_count);
    for rep in &summary.reps {
        println!(
            "  #{:<3} {:>6} ms  peak {:.1} deg",
            rep.rep, rep.duration_ms, rep.peak_angle
        );
    }
    if let Some(worst) = summary.worst_form {
        println!("Form:      worst {worst}");
        for (code, frames) in &summary.issue_frames {
            println!("  {code:<15} {frames} frames");
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.example_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::from_file(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Config::default(),
    };
    config.validate()?;

    let exercise: Exercise = args.exercise.parse()?;
    let recording_path = args.recording.context("no recording given")?;
    let recording = PoseRecording::from_file(&recording_path)
        .with_context(|| format!("loading {}", recording_path.display()))?;
    let frames = recording.pose_frames()?;
    info!("Loaded {} frames from {}", frames.len(), recording_path.display());

    let analyzer = if !args.no_form && exercise.config().has_form_analysis {
        Some(LateralRaiseFormAnalyzer::new(config.form)?)
    } else {
        None
    };
    let counter_config = *config.counter(exercise);

    let summary = match exercise {
        Exercise::LateralRaise => replay(exercise, LateralRaiseCounter::new(counter_config)?, analyzer, &frames),
        Exercise::SingleSquat => replay(exercise, SingleSquatCounter::new(counter_config)?, analyzer, &frames),
    };

    if args.yaml {
        print!("{}", serde_yaml::to_string(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}
