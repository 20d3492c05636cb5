use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use funcrefs::config::{load_from_path, Overrides, RunConfig};
use funcrefs::locator::{suggest, Locator, MatchResult};
use funcrefs::referrers::{query_referrers, GuruTool, QueryReport};
use funcrefs::ts::parse_files;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "funcrefs")]
#[command(about = "Find a Go function or method and list its referrers with guru", long_about = None)]
#[command(version)]
struct Cli {
    /// Go source files, concatenated in order; the first is the query target
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Function (`Name`) or method (`Type.Method`) to look for; all when empty
    #[arg(short, long = "func", default_value = "")]
    func: String,

    /// Scope passed to guru
    #[arg(short, long)]
    scope: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Referrer tool program name or path
    #[arg(long)]
    tool: Option<String>,

    /// Never query referrers for this name (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    exclude: Vec<String>,

    /// Only consider declarations in the first file
    #[arg(long)]
    target_only: bool,

    /// Do not pass -json to the referrer tool
    #[arg(long)]
    no_json: bool,

    /// Print matches without querying referrers
    #[arg(short = 'n', long)]
    list_only: bool,

    /// Format of the match list
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_config = cli
        .config
        .as_deref()
        .map(load_from_path)
        .transpose()
        .context("load config")?;

    let overrides = Overrides {
        scope: cli.scope,
        tool: cli.tool,
        json: cli.no_json.then_some(false),
        target_only: cli.target_only.then_some(true),
        exclude: cli.exclude,
    };
    let config = RunConfig::resolve(cli.files, &cli.func, file_config, overrides)?;

    let (unit, tree) = parse_files(config.files()).context("parse files")?;

    let mut locator = Locator::new(config.filter());
    if config.target_only() {
        locator = locator.within(unit.target().range.clone());
    }
    let matches = locator.locate(&tree);

    print_matches(&matches, cli.format)?;

    if matches.is_empty() && !config.filter().is_any() {
        eprintln!(
            "{}",
            format!("No declaration matches '{}'", config.filter()).yellow()
        );
        let hints = suggest(&tree, config.filter(), 3);
        if !hints.is_empty() {
            eprintln!("  Did you mean: {}", hints.join(", ").bold());
        }
    }

    if cli.list_only {
        return Ok(());
    }

    if matches.iter().all(|m| config.is_excluded(&m.name)) {
        log::debug!("nothing to query");
        return Ok(());
    }

    let guru = GuruTool::locate(config.tool(), config.json()).context("call guru")?;
    let stdout = io::stdout();
    let report = query_referrers(&guru, &config, &matches, &mut stdout.lock())?;

    print_summary(&report);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or("FUNCREFS_LOG", default_level)
            .write_style("FUNCREFS_LOG_STYLE"),
    )
    .format_timestamp(None)
    .init();
}

fn print_matches(matches: &MatchResult, format: Format) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        Format::Text => writeln!(stdout, "{}", matches)?,
        Format::Json => {
            serde_json::to_writer(&mut stdout, &matches.matches)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn print_summary(report: &QueryReport) {
    eprintln!();
    eprintln!("{}", "Summary:".bold());
    eprintln!(
        "  {} queried",
        format!("{}", report.queried.len()).green()
    );
    eprintln!(
        "  {} skipped",
        format!("{}", report.skipped.len()).cyan()
    );
    eprintln!(
        "  {} failed",
        format!("{}", report.failed.len()).red()
    );

    for failed in &report.failed {
        eprintln!("{} {} ({}): {}", "✗".red(), failed.name, failed.position, failed.reason);
    }
}
