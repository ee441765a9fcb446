//! add-team-ids - append team and competition ids to a fixture schedule
//!
//! ```bash
//! add-team-ids --schedule current_schedule_file.csv --teams team_ids.csv --out out/schedule.csv
//! add-team-ids --schedule s.csv --teams t.csv --out o.csv --header present --schema ids
//! add-team-ids --schedule s.csv --teams t.csv --out o.csv --home_idx 2 --away_idx 4
//! ```

use std::path::PathBuf;

use clap::Parser;
use teamjoin::logs::init_tracing;
use teamjoin::{run, EnvDefaults, HeaderMode, JoinOptions, OutputSchema};

#[derive(Parser)]
#[command(name = "add-team-ids")]
#[command(about = "Append team ids, categories and competition ids to a schedule CSV", long_about = None)]
struct Cli {
    /// Schedule CSV (fixture list)
    #[arg(long)]
    schedule: PathBuf,

    /// Team reference CSV: id, name, short name[, category]
    #[arg(long)]
    teams: PathBuf,

    /// Output CSV path (parent directories are created)
    #[arg(long)]
    out: PathBuf,

    /// Home team name column index [default: 5]
    #[arg(long = "home_idx", alias = "home-idx")]
    home_idx: Option<usize>,

    /// Away team name column index [default: 7]
    #[arg(long = "away_idx", alias = "away-idx")]
    away_idx: Option<usize>,

    /// Whether the schedule starts with a header row [default: auto]
    #[arg(long, value_enum)]
    header: Option<HeaderMode>,

    /// Output columns [default: full]
    #[arg(long, value_enum)]
    schema: Option<OutputSchema>,

    /// Input delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// JSON object of extra competition ids, e.g. {"WEリーグ": "9"}
    #[arg(long)]
    competitions: Option<PathBuf>,

    /// Write a JSON summary of the run
    #[arg(long)]
    report: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = execute(cli) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let env = EnvDefaults::from_env()?;
    let settings = env.resolve(cli.home_idx, cli.away_idx, cli.header, cli.schema);

    let options = JoinOptions {
        schedule: cli.schedule,
        teams: cli.teams,
        out: cli.out,
        settings,
        delimiter: cli.delimiter,
        competitions: cli.competitions,
        report: cli.report,
    };

    let report = run(&options)?;
    eprintln!(
        "✨ Done: {} fixtures → {}",
        report.summary.output_rows,
        report.out.display()
    );
    Ok(())
}
