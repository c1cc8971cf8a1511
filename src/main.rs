use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use apiprobe::cli::{Cli, Commands, ProbeArgs, ReportFormat};
use apiprobe::prober::catalog;
use apiprobe::reporter::hints::{render_db_console_hint, render_usage_hints};
use apiprobe::{
    ConsoleReporter, EndpointParser, EndpointSpec, HtmlExporter, JsonExporter, ProbeResult,
    Prober, SavedReport, write_report,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.probe.verbose);

    let command = cli.command.unwrap_or(Commands::Public {
        endpoints: None,
        catalog: None,
    });

    match command {
        Commands::Public {
            endpoints,
            catalog: catalog_file,
        } => {
            let specs = load_specs(endpoints.as_deref(), catalog_file.as_deref())?;
            let prober = Prober::new(&cli.probe.to_config())?;
            let results = run_public(&prober, &specs).await;
            export(&cli.probe, prober.base_url(), &results)?;
        }

        Commands::Users { path } => {
            let prober = Prober::new(&cli.probe.to_config())?;
            let spec = catalog::user_listing_endpoint(path.as_deref())?;
            let result = run_users(&prober, &spec).await;
            export(&cli.probe, prober.base_url(), &[result])?;
        }

        Commands::All => {
            let prober = Prober::new(&cli.probe.to_config())?;
            let spec = catalog::user_listing_endpoint(None)?;
            let mut results = run_public(&prober, &catalog::public_endpoints()).await;
            println!();
            results.push(run_users(&prober, &spec).await);

            let reporter = ConsoleReporter::new(prober.base_url());
            println!("\n{}", "Combined results".bold());
            reporter.print_table(&results);
            reporter.print_summary(&results);
            export(&cli.probe, prober.base_url(), &results)?;
        }

        Commands::Report { input, format } => {
            let report = JsonExporter::load(&input)?;

            match format {
                ReportFormat::Console => {
                    let reporter = ConsoleReporter::new(&report.base_url);
                    println!(
                        "{} {} ({})",
                        "Probe report for".bold(),
                        report.base_url,
                        report.probe_time
                    );
                    reporter.print_table(&report.results);
                    println!();
                    reporter.print_summary(&report.results);
                }
                ReportFormat::Html => {
                    let output = cli.probe.output.as_deref().unwrap_or("report.html");
                    HtmlExporter::export(&report, output)?;
                    println!("{} {}", "Report written to".green(), output);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "apiprobe=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_specs(endpoints: Option<&str>, catalog_file: Option<&str>) -> Result<Vec<EndpointSpec>> {
    match (endpoints, catalog_file) {
        (Some(list), _) => EndpointParser::parse(list),
        (None, Some(path)) => EndpointParser::parse_file(path),
        (None, None) => Ok(catalog::public_endpoints()),
    }
}

async fn run_public(prober: &Prober, specs: &[EndpointSpec]) -> Vec<ProbeResult> {
    let mut reporter = ConsoleReporter::new(prober.base_url());
    reporter.print_header("Public endpoint probe");

    let results = prober.probe_all(specs, &mut reporter).await;

    reporter.print_table(&results);
    reporter.print_summary(&results);
    println!("{}", render_usage_hints(prober.base_url(), specs));
    results
}

async fn run_users(prober: &Prober, spec: &EndpointSpec) -> ProbeResult {
    let mut reporter = ConsoleReporter::new(prober.base_url()).with_user_details(true);
    reporter.print_header("User listing probe");

    let result = prober.probe_user_listing(spec, &mut reporter).await;

    println!("{}", "=".repeat(50));
    println!();
    println!("{}", render_db_console_hint(prober.base_url()));
    result
}

fn export(args: &ProbeArgs, base_url: &str, results: &[ProbeResult]) -> Result<()> {
    let Some(path) = args.output.as_deref() else {
        return Ok(());
    };

    write_report(&SavedReport::new(base_url, results), path)?;

    println!("\n{} {}", "Results written to".green(), path);
    Ok(())
}
