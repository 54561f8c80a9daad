use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

use gtag_inject::{
    inject::{inject_into_html, render_directive},
    json_output::CheckJsonOutput,
    model::{ScriptDirective, TrackingId},
    snippet::{GTAG_LOADER_BASE, SnippetRenderer},
};

#[derive(Parser, Debug)]
#[command(name = "gtag-inject", about = "Google Analytics tag helpers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a measurement id.
    Check(CheckArgs),
    /// Print the script tags for a measurement id.
    Render(RenderArgs),
    /// Inject the script tags into HTML documents.
    Inject(InjectArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Measurement id (falls back to $GTAG_MEASUREMENT_ID).
    #[arg(long = "id", env = "GTAG_MEASUREMENT_ID")]
    id: String,
    /// Emit a machine-readable JSON payload describing the result.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Measurement id (falls back to $GTAG_MEASUREMENT_ID).
    #[arg(long = "id", env = "GTAG_MEASUREMENT_ID")]
    id: String,
    /// Print the directives as JSON instead of HTML tags.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct InjectArgs {
    /// Measurement id (falls back to $GTAG_MEASUREMENT_ID).
    #[arg(long = "id", env = "GTAG_MEASUREMENT_ID")]
    id: String,
    /// Print the rewritten documents instead of writing them back.
    #[arg(long = "dry-run")]
    dry_run: bool,
    /// HTML files or directories to inject into.
    #[arg(required = true)]
    targets: Vec<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Check(args) => handle_check(args),
        Commands::Render(args) => handle_render(args),
        Commands::Inject(args) => handle_inject(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn handle_check(args: CheckArgs) -> Result<()> {
    match TrackingId::parse(&args.id) {
        Ok(id) => {
            if args.json {
                println!("{}", CheckJsonOutput::success(&id).into_string());
            } else {
                println!("OK {id}");
            }
            Ok(())
        }
        Err(err) => {
            if args.json {
                println!("{}", CheckJsonOutput::error(&err, None).into_string());
            } else {
                eprintln!("{err}");
            }
            Err(anyhow::anyhow!("validation failed"))
        }
    }
}

fn handle_render(args: RenderArgs) -> Result<()> {
    let id = TrackingId::parse(&args.id)?;
    let directives = SnippetRenderer::new().gtag_directives(&id)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&directives)?);
    } else {
        for directive in &directives {
            println!("{}", render_directive(directive));
        }
    }
    Ok(())
}

fn handle_inject(args: InjectArgs) -> Result<()> {
    let id = TrackingId::parse(&args.id)?;
    let directives = SnippetRenderer::new().gtag_directives(&id)?;
    let mut injected = 0usize;
    let mut skipped = 0usize;
    for target in &args.targets {
        inject_path(target, &directives, args.dry_run, &mut injected, &mut skipped)?;
    }
    if !args.dry_run {
        println!("Injected tags into {injected} file(s), skipped {skipped}");
    }
    Ok(())
}

fn inject_path(
    path: &Path,
    directives: &[ScriptDirective],
    dry_run: bool,
    injected: &mut usize,
    skipped: &mut usize,
) -> Result<()> {
    if path.is_file() {
        inject_file(path, directives, dry_run, injected, skipped)?;
    } else if path.is_dir() {
        let entries = fs::read_dir(path)
            .with_context(|| format!("failed to read directory {}", path.display()))?;
        for entry in entries {
            let entry = entry
                .with_context(|| format!("failed to read directory entry in {}", path.display()))?;
            inject_path(&entry.path(), directives, dry_run, injected, skipped)?;
        }
    }
    Ok(())
}

fn inject_file(
    path: &Path,
    directives: &[ScriptDirective],
    dry_run: bool,
    injected: &mut usize,
    skipped: &mut usize,
) -> Result<()> {
    if !matches!(
        path.extension().and_then(OsStr::to_str),
        Some("html") | Some("htm")
    ) {
        return Ok(());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    if content.contains(GTAG_LOADER_BASE) {
        *skipped += 1;
        println!("SKIP {} (already tagged)", path.display());
        return Ok(());
    }

    let output = inject_into_html(&content, directives);
    if dry_run {
        print!("{output}");
    } else {
        let tmp_path = path.with_extension("html.tmp");
        fs::write(&tmp_path, &output).with_context(|| format!("write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
        *injected += 1;
        println!("OK  {}", path.display());
    }
    Ok(())
}
