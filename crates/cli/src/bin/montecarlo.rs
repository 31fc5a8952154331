use std::path::PathBuf;

use clap::Parser;
use motor_design_calculator::config;
use motor_design_calculator::export::report::{SummaryReport, write_summary};
use motor_design_calculator::montecarlo::{
    DEFAULT_SAMPLE_COUNT, StatisticalSummary, UncertaintySpec, run_monte_carlo,
    run_monte_carlo_seeded,
};
use motor_design_calculator::units::pa_to_bar;

#[derive(Parser)]
#[command(author, version, about = "Propagate input uncertainty through the steady-state solver")]
struct Cli {
    /// Motor definition: a TOML file, a YAML catalog, or a directory of TOML files
    input: PathBuf,

    /// Motor name when the input holds more than one (defaults to the first)
    #[arg(long)]
    motor: Option<String>,

    /// Number of Monte Carlo samples
    #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    samples: usize,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Relative 1-sigma spread applied to every perturbable parameter
    #[arg(long, default_value_t = 0.03)]
    spread: f64,

    /// Override the spread for one parameter, e.g. `chamber_pressure_pa=0.05`
    /// (repeatable)
    #[arg(long, value_name = "NAME=SIGMA")]
    vary: Vec<String>,

    /// Write the summary as JSON alongside the printed report
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let requests = config::load_motors(&cli.input)?;
    let request = match &cli.motor {
        Some(name) => config::find_motor(&requests, name)
            .ok_or_else(|| anyhow::anyhow!("motor '{}' not found in {}", name, cli.input.display()))?,
        None => requests
            .first()
            .ok_or_else(|| anyhow::anyhow!("no motors defined in {}", cli.input.display()))?,
    };

    let configuration = config::validate(request.clone())?;
    let mut spec = UncertaintySpec::uniform(cli.spread)?;
    for entry in &cli.vary {
        let (name, sigma) = entry
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("--vary expects NAME=SIGMA, got '{entry}'"))?;
        spec.set(name.trim(), sigma.trim().parse()?)?;
    }

    let summary = match cli.seed {
        Some(seed) => run_monte_carlo_seeded(&configuration, &spec, cli.samples, seed)?,
        None => run_monte_carlo(&configuration, &spec, cli.samples)?,
    };

    print_summary(&configuration.name, &summary);

    if let Some(path) = &cli.json {
        let report = SummaryReport {
            motor: &configuration.name,
            seed: cli.seed,
            summary: &summary,
        };
        write_summary(path, &report)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

fn print_summary(motor: &str, summary: &StatisticalSummary) {
    println!("=== Monte Carlo: {} ===", motor);
    println!(
        "Samples        : {} completed, {} converged (success rate {:.1}%)",
        summary.completed_samples,
        summary.successful_samples,
        summary.success_rate * 100.0
    );
    println!(
        "Thrust         : {:.1} N +/- {:.1} (CV {:.2}%, P5 {:.1}, P95 {:.1})",
        summary.thrust_n.mean,
        summary.thrust_n.std_dev,
        summary.thrust_n.coefficient_of_variation * 100.0,
        summary.thrust_n.percentile_5,
        summary.thrust_n.percentile_95
    );
    println!(
        "Specific imp.  : {:.1} s +/- {:.1} (P5 {:.1}, P95 {:.1})",
        summary.specific_impulse_s.mean,
        summary.specific_impulse_s.std_dev,
        summary.specific_impulse_s.percentile_5,
        summary.specific_impulse_s.percentile_95
    );
    println!(
        "Chamber press. : {:.2} bar +/- {:.2} (P5 {:.2}, P95 {:.2})",
        pa_to_bar(summary.chamber_pressure_pa.mean),
        pa_to_bar(summary.chamber_pressure_pa.std_dev),
        pa_to_bar(summary.chamber_pressure_pa.percentile_5),
        pa_to_bar(summary.chamber_pressure_pa.percentile_95)
    );
    println!(
        "Mass flow      : {:.4} kg/s +/- {:.4}",
        summary.total_mass_flow_kg_s.mean, summary.total_mass_flow_kg_s.std_dev
    );
}
