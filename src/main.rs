use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use git_semrel::analyzer::AngularAnalyzer;
use git_semrel::{config, inspect, release, ui};

#[derive(clap::Parser)]
#[command(
    name = "git-semrel",
    version,
    about = "Compute the next semantic version from git history"
)]
struct Args {
    #[arg(short, long, default_value = ".", help = "Path to the git repository")]
    path: String,

    #[arg(long, help = "Prefix stripped from release tags (overrides config)")]
    prefix: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Print release notes grouped by category")]
    notes: bool,

    #[arg(long, conflicts_with = "notes", help = "Print release data as JSON")]
    json: bool,

    #[arg(long, value_name = "MESSAGE", help = "Lint a commit message and exit")]
    lint: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let analyzer = AngularAnalyzer::new(config.analyzer.clone())?;

    if let Some(message) = args.lint.as_deref() {
        let violations = analyzer.lint(message);
        if !ui::display_lint_result(message, &violations) {
            std::process::exit(1);
        }
        return Ok(());
    }

    let prefix = args.prefix.as_deref().unwrap_or(config.tag_prefix.as_str());
    let vcs_data = inspect::resolve(&args.path, prefix)
        .with_context(|| format!("Failed to inspect repository at '{}'", args.path))?;
    let release = release::aggregate(&vcs_data, &analyzer)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&release)?);
    } else if args.notes {
        print!("{}", ui::format_release_notes(&release));
    } else {
        println!("{}", release.next_version);
        tracing::info!("{}", ui::format_summary(&release));
    }

    Ok(())
}
