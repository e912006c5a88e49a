use anyhow::Result;
use snapdup::{config::Config, dedup, pipeline, report, sort};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(
        archive_dir = %cfg.archive_dir.display(),
        output = %cfg.output_path.display(),
        workers = cfg.workers,
        "configured"
    );

    // ─── 3) order archives by capture time ───────────────────────────
    let archives = sort::sorted_archives(&cfg.archive_dir)?;
    info!("{} archives to parse", archives.len());

    // ─── 4) parallel read + parse ────────────────────────────────────
    let snapshots = pipeline::parse_archives(&archives, cfg.workers)?;

    // ─── 5) flag consecutive duplicates ──────────────────────────────
    let duplicates = dedup::find_duplicates(&archives, &snapshots);
    info!("{} duplicate snapshots found", duplicates.len());

    // ─── 6) write the report ─────────────────────────────────────────
    report::write_duplicates(&cfg.output_path, &duplicates)?;
    info!("report written to {}", cfg.output_path.display());

    for dup in &duplicates {
        println!("{}", dup.display());
    }

    Ok(())
}
