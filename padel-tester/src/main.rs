mod file_storage;
mod remote;
mod reports;
mod scenarios;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use padel_core::{DraftStorage, MemoryStorage, WizardConfig};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use file_storage::FileStorage;
use reports::ScenarioResult;
use scenarios::{ScenarioCtx, all_keys, list_scenarios, run_scenario};

#[derive(Debug, Parser)]
#[command(name = "padel-tester", version)]
#[command(about = "Scripted QA scenarios for the padel onboarding and tournament wizards")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Stage drafts in this JSON file instead of memory
    #[arg(long)]
    draft_file: Option<PathBuf>,

    /// Wizard config JSON; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wait out transition delays instead of firing them immediately
    #[arg(long)]
    realtime: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let ctx = ScenarioCtx {
        storage: open_storage(args.draft_file.as_deref()),
        config: load_config(args.config.as_deref())?,
        realtime: args.realtime,
        verbose: args.verbose,
    };
    let results = run_scenarios(&ctx, &expand_scenarios(&args.scenarios)).await;

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target, "  {key:25} - {description}")?;
    }
    output_target.flush()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎾 Padel Wizard Tester".bright_cyan().bold());
    println!("{}", "======================".cyan());
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in all_keys() {
            if !scenarios.contains(&key) {
                scenarios.push(key);
            }
        }
    }
    scenarios
}

fn open_storage(draft_file: Option<&Path>) -> Rc<dyn DraftStorage> {
    match draft_file {
        Some(path) => {
            log::info!("staging drafts in {}", path.display());
            Rc::new(FileStorage::new(path))
        }
        None => Rc::new(MemoryStorage::new()),
    }
}

fn load_config(path: Option<&Path>) -> Result<WizardConfig> {
    let Some(path) = path else {
        return Ok(WizardConfig::default_config());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    WizardConfig::from_json(&raw).with_context(|| format!("invalid config in {}", path.display()))
}

async fn run_scenarios(ctx: &ScenarioCtx, scenarios: &[String]) -> Vec<ScenarioResult> {
    println!("{}", "🧪 Running Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let mut results = Vec::new();
    for name in scenarios {
        let started_at = Utc::now();
        let scenario_start = Instant::now();
        let Some(outcome) = run_scenario(name, ctx).await else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
            continue;
        };
        let duration = scenario_start.elapsed();
        match &outcome {
            Ok(()) => println!("✅ {} - {:?}", name.green(), duration),
            Err(e) => eprintln!("❌ {} - {:?}: {:#}", name.red(), duration, e),
        }
        results.push(ScenarioResult {
            scenario_name: name.clone(),
            passed: outcome.is_ok(),
            failure: outcome.err().map(|e| format!("{e:#}")),
            started_at,
            duration,
        });
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, results)?,
        _ => {
            if results.is_empty() {
                writeln!(output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(output_target)?;
            writeln!(output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }
    output_target.flush()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer().flush()
    }
}
