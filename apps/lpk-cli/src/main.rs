use clap::{Parser, Subcommand};
use lpk_app::{AppConfig, AppError, AppResult, VoyageSession, report_service};
use lpk_archive::ReportArchive;
use lpk_calc::ReportTotals;
use lpk_core::{Elapsed, RecordId};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lpk")]
#[command(about = "Laporan Perjalanan Kapal - voyage report derivations and archive", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = "lpk.toml")]
    config: PathBuf,
    /// Archive directory (overrides config and LPK_ARCHIVE_DIR)
    #[arg(long, global = true)]
    archive_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, migrate and validate a working report
    Validate {
        /// Path to the report file (YAML, or JSON by extension)
        report_path: PathBuf,
    },
    /// Re-run every derivation and write the report back
    Derive {
        report_path: PathBuf,
        /// Output path (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Append a leg continuing from the last one
    AddLeg { report_path: PathBuf },
    /// Print per-leg figures and report totals
    Totals { report_path: PathBuf },
    /// Fill one leg's underway duration from its departure/arrival timestamps
    Duration {
        report_path: PathBuf,
        /// Leg number as shown on the report
        leg_no: u32,
    },
    /// Manage archived reports
    #[command(subcommand)]
    Archive(ArchiveCommands),
    /// Start the next voyage from an archived report
    NextVoyage {
        /// Archived report id (defaults to the most recent)
        #[arg(long)]
        from: Option<String>,
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum ArchiveCommands {
    /// Archive a copy of a working report
    Save {
        report_path: PathBuf,
        #[arg(long)]
        name: String,
    },
    /// List archived reports, newest first
    List,
    /// Show the totals of an archived report
    Show { id: String },
    /// Restore an archived report into a working file
    Load {
        id: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Delete an archived report
    Delete { id: String },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::resolve(Some(cli.config.as_path()))?;
    let archive_dir = cli.archive_dir.unwrap_or_else(|| config.archive_dir.clone());

    match cli.command {
        Commands::Validate { report_path } => cmd_validate(&report_path),
        Commands::Derive {
            report_path,
            output,
        } => cmd_derive(&report_path, output.as_deref()),
        Commands::AddLeg { report_path } => cmd_add_leg(&report_path, &config),
        Commands::Totals { report_path } => cmd_totals(&report_path),
        Commands::Duration {
            report_path,
            leg_no,
        } => cmd_duration(&report_path, leg_no),
        Commands::Archive(archive_cmd) => {
            let archive = ReportArchive::new(archive_dir)?;
            match archive_cmd {
                ArchiveCommands::Save { report_path, name } => {
                    cmd_archive_save(&archive, &report_path, &name)
                }
                ArchiveCommands::List => cmd_archive_list(&archive),
                ArchiveCommands::Show { id } => cmd_archive_show(&archive, &RecordId::new(id)),
                ArchiveCommands::Load { id, output } => {
                    cmd_archive_load(&archive, &RecordId::new(id), &output)
                }
                ArchiveCommands::Delete { id } => cmd_archive_delete(&archive, &RecordId::new(id)),
            }
        }
        Commands::NextVoyage { from, output } => {
            let archive = ReportArchive::new(archive_dir)?;
            let from = from.map(RecordId::new);
            cmd_next_voyage(&archive, from.as_ref(), &output)
        }
    }
}

fn cmd_validate(report_path: &Path) -> AppResult<()> {
    println!("Validating report: {}", report_path.display());
    let snapshot = report_service::load_report(report_path)?;
    report_service::validate_report(&snapshot)?;
    println!(
        "✓ Report is valid ({} legs, {} fresh water entries)",
        snapshot.legs.len(),
        snapshot.fresh_water.entries.len()
    );
    Ok(())
}

fn cmd_derive(report_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let snapshot = report_service::load_report(report_path)?;
    let mut session = VoyageSession::new(snapshot);
    session.rederive_all();

    let output = output.unwrap_or(report_path);
    report_service::save_report(output, session.snapshot())?;
    println!("✓ Derived fields written to {}", output.display());
    Ok(())
}

fn cmd_add_leg(report_path: &Path, config: &AppConfig) -> AppResult<()> {
    let snapshot = report_service::load_report(report_path)?;
    let mut session =
        VoyageSession::new(snapshot).with_default_provisions(config.default_provisions);
    let id = session.add_leg();
    report_service::save_report(report_path, session.snapshot())?;
    println!(
        "✓ Added leg {} ({})",
        session.snapshot().legs.len(),
        id
    );
    Ok(())
}

fn cmd_totals(report_path: &Path) -> AppResult<()> {
    let snapshot = report_service::load_report(report_path)?;
    let session = VoyageSession::new(snapshot);
    print_totals(&session.totals());
    Ok(())
}

fn cmd_duration(report_path: &Path, leg_no: u32) -> AppResult<()> {
    let snapshot = report_service::load_report(report_path)?;
    let id = snapshot
        .legs
        .iter()
        .find(|leg| leg.no == leg_no)
        .map(|leg| leg.id.clone())
        .ok_or_else(|| AppError::NotFound {
            what: "Leg",
            id: leg_no.to_string(),
        })?;

    let mut session = VoyageSession::new(snapshot);
    let leg = session.compute_leg_duration(&id)?;
    println!(
        "Leg {}: {} days {} ({:.2} knots)",
        leg.no, leg.duration_days, leg.duration_hours, leg.speed
    );
    report_service::save_report(report_path, session.snapshot())?;
    Ok(())
}

fn cmd_archive_save(archive: &ReportArchive, report_path: &Path, name: &str) -> AppResult<()> {
    let snapshot = report_service::load_report(report_path)?;
    let summary = report_service::archive_report(archive, name, &snapshot)?;
    println!("✓ Archived '{}' as {}", summary.name, summary.id);
    Ok(())
}

fn cmd_archive_list(archive: &ReportArchive) -> AppResult<()> {
    let reports = report_service::list_archived(archive)?;
    if reports.is_empty() {
        println!("No archived reports in {}", archive.root_dir().display());
        return Ok(());
    }

    println!("Archived reports (newest first):");
    for report in reports {
        let modified = report
            .modified_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {}  {}  {} voyage {} ({} legs)  [{}]",
            report.id, modified, report.ship_name, report.voyage_number, report.leg_count, report.name
        );
    }
    Ok(())
}

fn cmd_archive_show(archive: &ReportArchive, id: &RecordId) -> AppResult<()> {
    let report = report_service::load_archived(archive, id)?;
    println!("{} ({})", report.name, report.id);
    let session = VoyageSession::new(report.data);
    print_totals(&session.totals());
    Ok(())
}

fn cmd_archive_load(archive: &ReportArchive, id: &RecordId, output: &Path) -> AppResult<()> {
    let report = report_service::load_archived(archive, id)?;
    report_service::save_report(output, &report.data)?;
    println!("✓ Restored '{}' to {}", report.name, output.display());
    Ok(())
}

fn cmd_archive_delete(archive: &ReportArchive, id: &RecordId) -> AppResult<()> {
    archive.delete(id)?;
    println!("✓ Deleted {}", id);
    Ok(())
}

fn cmd_next_voyage(
    archive: &ReportArchive,
    from: Option<&RecordId>,
    output: &Path,
) -> AppResult<()> {
    let snapshot = report_service::next_voyage(archive, from)?;
    let opening = snapshot
        .fresh_water
        .entries
        .first()
        .map(|entry| entry.reserve_before.to_string())
        .unwrap_or_default();

    report_service::save_report(output, &snapshot)?;
    println!(
        "✓ Next voyage written to {} (fresh water opening reserve {})",
        output.display(),
        opening
    );
    Ok(())
}

fn fmt_elapsed(e: &Elapsed) -> String {
    format!("{}d {}", e.days, e.hhmm())
}

fn print_totals(totals: &ReportTotals) {
    println!(
        "{:>3}  {:>10}  {:>10}  {:>10}  {:>7}  {:>5}",
        "No", "Anchorage", "Underway", "Total", "Knots", "BM"
    );
    for row in &totals.rows {
        println!(
            "{:>3}  {:>10}  {:>10}  {:>10}  {:>7.2}  {:>5}",
            row.no,
            fmt_elapsed(&row.anchorage),
            fmt_elapsed(&row.underway),
            fmt_elapsed(&row.total_underway),
            row.speed,
            row.bm_duration
        );
    }

    println!();
    println!("Underway:          {}", fmt_elapsed(&totals.underway));
    println!("Anchorage:         {}", fmt_elapsed(&totals.anchorage));
    println!("Total underway:    {}", fmt_elapsed(&totals.total_underway));
    println!(
        "Distance (NM):     {:.1} total, {:.1} open sea, {:.1} channel",
        totals.total_distance, totals.open_sea_distance, totals.channel_distance
    );
    println!("Average speed:     {:.2} knots", totals.average_speed);
    println!(
        "Cargo (t):         {:.2} loaded, {:.2} unloaded, {:.2} handled",
        totals.cargo_loaded, totals.cargo_unloaded, totals.cargo_handled
    );
    println!(
        "Received:          {:.2} fuel, {:.2} fresh water",
        totals.fuel_received, totals.water_received
    );
    println!("Passengers:        {}", totals.passengers);

    let fw = &totals.fresh_water;
    println!(
        "Fresh water (t):   opening {:.2}, filled {:.2}, consumed {:.2}, closing {:.2}",
        fw.opening_reserve, fw.filled, fw.consumed, fw.closing_reserve
    );
    if let Some(entered) = fw.entered_closing_reserve {
        println!("Closing (entered): {:.2}", entered);
    }
    println!("Fresh water cost:  {:.0}", fw.total_price);
}
