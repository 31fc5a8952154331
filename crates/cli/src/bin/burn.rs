use std::path::PathBuf;

use clap::Parser;
use motor_design_calculator::config;
use motor_design_calculator::export::timeline::{write_timeline, writer_for_path};
use motor_design_calculator::regression::{DEFAULT_STEP_COUNT, simulate};

#[derive(Parser)]
#[command(author, version, about = "Simulate grain regression over the burn and export the timeline")]
struct Cli {
    /// Motor definition: a TOML file, a YAML catalog, or a directory of TOML files
    input: PathBuf,

    /// Motor name when the input holds more than one (defaults to the first)
    #[arg(long)]
    motor: Option<String>,

    /// Number of uniform time steps
    #[arg(long, default_value_t = DEFAULT_STEP_COUNT)]
    steps: usize,

    /// Timeline CSV destination (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
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
    let timeline = simulate(&configuration, cli.steps)?;

    let mut writer = writer_for_path(&cli.output)?;
    write_timeline(&timeline, writer.as_mut())?;

    if timeline.burnthrough {
        eprintln!(
            "warning: the port reached the burnthrough margin before the end of the burn; \
             the timeline tail is frozen"
        );
    }
    if timeline.stalled {
        eprintln!("warning: the solver stalled mid-burn; the timeline tail is frozen");
    }

    Ok(())
}
