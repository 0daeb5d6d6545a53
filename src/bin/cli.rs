use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::prelude::*;
use tracing_log::LogTracer;
use tracing::subscriber as tracing_subscriber_global;
use anyhow::{Result, Context};
use audio_spot_assign as lib;
use lib::config::{parse_targets, Config};
use lib::models::{AssignPlan, RenamePlanItem};
use lib::pipeline;

/// Rename audio/*.mp3 recordings safely and append them to spot playlists in spots.json.
#[derive(Parser)]
#[command(name = "audio-spot-assign", version)]
struct Cli {
    /// Path to config TOML; command line flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Audio directory (default: audio)
    #[arg(long, value_name = "DIR")]
    audio_dir: Option<PathBuf>,

    /// Path to spots.json
    #[arg(long, value_name = "FILE")]
    spots_json: Option<PathBuf>,

    /// Comma separated speaker prefixes to process (default: 鈴木,塚本)
    #[arg(long)]
    targets: Option<String>,

    /// Romanize known speaker names, e.g. 鈴木 -> Suzuki
    #[arg(long)]
    romanize_names: bool,

    /// Placeholder for names without a date (default: UnknownDate; "today" allowed)
    #[arg(long)]
    unknown_date: Option<String>,

    /// Keep the WAV id pair in new names (default)
    #[arg(long, overrides_with = "no_keep_id")]
    keep_id: bool,

    /// Drop the WAV id pair from new names
    #[arg(long)]
    no_keep_id: bool,

    /// Skip renaming
    #[arg(long)]
    no_rename: bool,

    /// Skip spots.json updates
    #[arg(long)]
    no_assign: bool,

    /// Show the plan without applying anything
    #[arg(long)]
    dry_run: bool,

    /// Apply without asking for confirmation
    #[arg(long)]
    yes: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(p) => Config::from_path(p)
                .with_context(|| format!("loading config from {}", p.display()))?,
            None => Config::default(),
        };
        if let Some(dir) = self.audio_dir {
            cfg.audio_dir = dir;
        }
        if let Some(path) = self.spots_json {
            cfg.spots_json = path;
        }
        if let Some(list) = self.targets.as_deref() {
            cfg.targets = parse_targets(list);
        }
        if let Some(date) = self.unknown_date {
            cfg.unknown_date = date;
        }
        if self.romanize_names {
            cfg.romanize_names = true;
        }
        if self.keep_id {
            cfg.keep_id = true;
        }
        if self.no_keep_id {
            cfg.keep_id = false;
        }
        if self.no_rename {
            cfg.rename = false;
        }
        if self.no_assign {
            cfg.assign = false;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.yes {
            cfg.assume_yes = true;
        }
        Ok(cfg)
    }
}

fn print_rename_plan(plan: &[RenamePlanItem]) {
    if plan.is_empty() {
        println!("[rename] no files to rename");
        return;
    }
    println!("[rename] before -> after");
    for it in plan {
        println!("- {} -> {}", file_name(&it.src), file_name(&it.dst));
    }
}

fn print_assign_plan(plan: &AssignPlan) {
    if plan.additions.is_empty() {
        println!("[assign] nothing to add");
    } else {
        println!("[assign] planned additions to spots.json");
        for (title, tracks) in &plan.additions {
            println!("- {}: +{}", title, tracks.len());
            for t in tracks {
                println!("    - {} ({})", t.name, t.file);
            }
        }
    }

    if !plan.unmapped.is_empty() {
        println!("[assign] no spot matched, skipped (check manually)");
        for p in &plan.unmapped {
            println!("- {}", file_name(p));
        }
    }
}

fn file_name(p: &std::path::Path) -> String {
    p.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Ask a Y/n question; an empty answer means yes.
fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "" | "y" | "yes"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = cli.into_config()?;

    // Logs go to stderr, and to a daily-rotated file when log_dir is set.
    // Plan output stays on stdout.
    let _ = LogTracer::init();
    let (file_layer, _guard) = match &cfg.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "audio-spot-assign.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().with_ansi(false).with_writer(non_blocking)), Some(guard))
        }
        None => (None, None),
    };

    // Honor RUST_LOG if set, otherwise default to warn.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer);
    tracing_subscriber_global::set_global_default(subscriber)
        .expect("failed to set global tracing subscriber");

    let prepared = match pipeline::prepare(&cfg) {
        Ok(p) => p,
        Err(e) if e.downcast_ref::<pipeline::MissingInput>().is_some() => {
            eprintln!("{:#}", e);
            std::process::exit(2);
        }
        Err(e) => return Err(e.context("planning")),
    };

    if cfg.rename {
        print_rename_plan(&prepared.renames);
    }
    if let Some(plan) = &prepared.assignment {
        print_assign_plan(plan);
    }

    if cfg.dry_run {
        println!("[dry-run] no changes applied");
        return Ok(());
    }

    if !prepared.renames.is_empty() {
        if !confirm("\nApply renames? (Y/n): ", cfg.assume_yes)? {
            println!("[rename] cancelled");
            return Ok(());
        }
        pipeline::commit_renames(&prepared).context("applying renames")?;
        println!("[rename] done: {} files", prepared.renames.len());
    }

    if let Some(plan) = prepared.assignment.as_ref().filter(|p| !p.is_empty()) {
        if !confirm("\nUpdate spots.json? (Y/n): ", cfg.assume_yes)? {
            println!("[assign] cancelled");
            return Ok(());
        }
        pipeline::commit_assignment(&cfg, plan).context("updating spots file")?;
        println!("[assign] done: spots.json updated");
    }

    Ok(())
}
