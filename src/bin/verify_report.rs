use anyhow::Context;
use clap::Parser;
use sample_scan_gen::core::{verify, Storage};
use sample_scan_gen::utils::logger;
use sample_scan_gen::LocalStorage;
use std::path::Path;

#[derive(Parser)]
#[command(name = "verify-report")]
#[command(about = "Check that a generated report's counts and cost sums agree")]
struct Args {
    /// Path to the JSON report
    report: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON log lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_logger(args.verbose, args.log_json);

    tracing::info!("🔍 Verifying {}", args.report);
    let report_path = Path::new(&args.report);
    let dir = report_path
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = report_path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .with_context(|| format!("'{}' does not name a file", args.report))?;

    let raw = LocalStorage::new(dir)
        .read_file(&file_name)
        .await
        .with_context(|| format!("failed to read report '{}'", args.report))?;

    match verify::verify_document(&raw) {
        Ok(report) => {
            tracing::info!("✅ Report is consistent");
            println!(
                "✅ {} resources, {} types, {} accounts, ${:.2}/month",
                report.total_resources,
                report.resource_types,
                report.accounts,
                report.total_monthly_cost
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code().max(1));
        }
    }
}
