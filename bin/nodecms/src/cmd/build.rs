//! Build command - generates the static site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, bail};
use nodecms_generator::{BuildReport, Builder};

use super::load_config;

/// Run the build command.
///
/// Builds every page, printing each failure with its full report. Fails when
/// any page failed.
pub fn run(config_path: &Path, output: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, "Starting build");

    let mut config = load_config(config_path)?;
    if let Some(output) = output {
        config.build.output_dir = output.to_string_lossy().into_owned();
    }
    let output_dir = config.output_dir();

    let builder = Builder::from_config(config);
    let report = builder.build_report();
    let duration = start.elapsed();

    print_report(&report);
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output_dir.display());
    println!();

    if !report.is_success() {
        bail!("Build failed with {} error(s)", report.errors.len());
    }

    Ok(())
}

/// Print a build report in a user-friendly format.
pub fn print_report(report: &BuildReport) {
    println!();
    if report.is_success() {
        println!("  Build completed successfully!");
    } else {
        println!("  BUILD FAILED WITH {} ERROR(S)", report.errors.len());
        for err in &report.errors {
            println!();
            for line in err.report().lines() {
                println!("  {line}");
            }
        }
    }
    println!();
    println!("  Pages:      {}", report.outputs.len());
    println!("  Assets:     {}", report.assets.len());
    println!("  Errors:     {}", report.errors.len());
}
