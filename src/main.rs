use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use clinicas::app::{SpecialtiesSummary, SpecialtiesUseCase, UnifySummary, UnifyUseCase};
use clinicas::config::Config;
use clinicas::infra::{CsvExportAdapter, CsvLocationAdapter, WorkbookAdapter};
use clinicas::logging;

#[derive(Parser)]
#[command(name = "clinicas")]
#[command(about = "Exports the GEAP accredited-provider registry as Supabase-ready CSV files")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge providers and units into clinicas_supabase_final.csv
    Unify,
    /// Build clinicas.csv, clinicas_especialidades.csv and especialidades_normalizadas.csv
    Specialties,
    /// Run unify and specialties sequentially
    Run,
}

fn run_unify(config: &Config) -> Result<UnifySummary> {
    let span = tracing::info_span!("unify", workbook = %config.input.workbook.display());
    let _enter = span.enter();

    info!("Starting clinic registry unification");
    let use_case = UnifyUseCase::new(Box::new(WorkbookAdapter::new(&config.input.workbook)));
    let mut output = CsvExportAdapter::new(config.output.clone());

    let summary = use_case
        .run(&mut output)
        .with_context(|| format!("Failed to unify {}", config.input.workbook.display()))?;

    println!("\n📊 Unify results:");
    println!("   Provider rows: {}", summary.provider_rows);
    println!("   Duplicates dropped: {}", summary.duplicates_dropped);
    println!("   Clinics with unit data: {}", summary.units_matched);
    println!("   Output file: {}", config.output.clinics_final_path().display());
    println!("   Rows written: {}", summary.clinics_written);
    Ok(summary)
}

fn run_specialties(config: &Config) -> Result<SpecialtiesSummary> {
    let span = tracing::info_span!("specialties", clinics_csv = %config.input.clinics_csv.display());
    let _enter = span.enter();

    info!("Starting specialty normalization");
    let use_case = SpecialtiesUseCase::new(
        Box::new(WorkbookAdapter::new(&config.input.workbook)),
        Box::new(CsvLocationAdapter::new(&config.input.clinics_csv)),
    );
    let mut output = CsvExportAdapter::new(config.output.clone());

    let summary = use_case.run(&mut output).with_context(|| {
        format!(
            "Failed to normalize specialties from {} and {}",
            config.input.clinics_csv.display(),
            config.input.workbook.display()
        )
    })?;

    println!("\n📊 Specialty results:");
    println!(
        "   {}: {} rows",
        config.output.clinics_path().display(),
        summary.clinics_written
    );
    println!(
        "   {}: {} rows ({} before dedup, {} clinics without payload)",
        config.output.specialties_path().display(),
        summary.facts_written,
        summary.facts_emitted,
        summary.payloads_skipped
    );
    println!(
        "   {}: {} rows",
        config.output.dictionary_path().display(),
        summary.labels_normalized
    );
    Ok(summary)
}

fn main() -> Result<()> {
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    let result = match cli.command {
        Commands::Unify => {
            println!("🔄 Running clinic registry unifier...");
            run_unify(&config).map(|_| ())
        }
        Commands::Specialties => {
            println!("🔨 Running specialty normalizer...");
            run_specialties(&config).map(|_| ())
        }
        Commands::Run => {
            println!("🚀 Running both pipelines...");
            println!("\n📥 Step 1: Unifying clinic registry...");
            run_unify(&config).and_then(|_| {
                println!("\n🔨 Step 2: Normalizing specialties...");
                run_specialties(&config).map(|_| ())
            })
        }
    };

    match result {
        Ok(()) => {
            println!("✅ Done");
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            Err(e)
        }
    }
}
