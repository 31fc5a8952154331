use std::path::PathBuf;

use clap::Parser;
use motor_design_calculator::config::{self, MotorClass, MotorConfiguration};
use motor_design_calculator::export::report::{DesignReport, write_design};
use motor_design_calculator::injector::{InjectorDesign, InjectorGeometry, size_injector};
use motor_design_calculator::performance::{MotorPerformance, solve};
use motor_design_calculator::units::{m_to_mm, pa_to_bar};

#[derive(Parser)]
#[command(author, version, about = "Solve a motor design point and size its injector")]
struct Cli {
    /// Motor definition: a TOML file, a YAML catalog, or a directory of TOML files
    input: PathBuf,

    /// Motor name when the input holds more than one (defaults to the first)
    #[arg(long)]
    motor: Option<String>,

    /// Write the design report as JSON alongside the printed summary
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
    let performance = solve(&configuration)?;
    let injector = match configuration.class {
        MotorClass::Hybrid => Some(size_injector(&configuration, &performance)?),
        MotorClass::Solid => None,
    };

    print_report(&configuration, &performance, injector.as_ref());

    if let Some(path) = &cli.json {
        let report = DesignReport::new(&configuration.name, &performance, injector.as_ref());
        write_design(path, &report)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn print_report(
    configuration: &MotorConfiguration,
    performance: &MotorPerformance,
    injector: Option<&InjectorDesign>,
) {
    println!("=== Motor Design: {} ({}) ===", configuration.name, configuration.class);
    println!(
        "Chamber        : Pc = {:.2} bar ({} iterations, residual {:.1e})",
        pa_to_bar(performance.chamber_pressure_pa),
        performance.iterations,
        performance.residual
    );
    println!(
        "Thrust         : {:.1} N, Isp = {:.1} s, CF = {:.3}",
        performance.thrust_n, performance.specific_impulse_s, performance.thrust_coefficient
    );
    println!(
        "Mass flow      : total = {:.4} kg/s (ox {:.4} + fuel {:.4}), c* = {:.0} m/s",
        performance.total_mass_flow_kg_s,
        performance.oxidizer_mass_flow_kg_s,
        performance.fuel_mass_flow_kg_s,
        performance.characteristic_velocity_m_s
    );
    println!(
        "Nozzle         : throat = {:.2} mm, exit = {:.2} mm, expansion = {:.1}, Pe = {:.3} bar",
        m_to_mm(performance.throat_diameter_m),
        m_to_mm(performance.exit_diameter_m),
        performance.expansion_ratio,
        pa_to_bar(performance.exit_pressure_pa)
    );
    println!(
        "Chamber body   : bore = {:.1} mm, length = {:.1} mm, port {:.1} -> {:.1} mm",
        m_to_mm(performance.chamber_diameter_m),
        m_to_mm(performance.chamber_length_m),
        m_to_mm(performance.initial_port_diameter_m),
        m_to_mm(performance.final_port_diameter_m)
    );
    println!(
        "Propellant     : {:.2} kg total (ox {:.2} + fuel {:.2}) over {:.1} s",
        performance.total_propellant_mass_kg,
        performance.oxidizer_mass_kg,
        performance.fuel_mass_kg,
        configuration.burn_time_s
    );

    if let Some(design) = injector {
        print_injector(design);
    }

    let warnings: Vec<&String> = configuration
        .warnings
        .iter()
        .chain(performance.warnings.iter())
        .chain(injector.iter().flat_map(|design| design.warnings.iter()))
        .collect();
    if !warnings.is_empty() {
        println!("--- Warnings ---");
        for warning in warnings {
            println!("  - {warning}");
        }
    }
}

fn print_injector(design: &InjectorDesign) {
    match &design.geometry {
        InjectorGeometry::Showerhead {
            hole_count,
            hole_diameter_m,
            plate_thickness_m,
            length_to_diameter,
        } => println!(
            "Injector       : showerhead, {} x {:.2} mm holes, plate {:.1} mm (L/D {:.2})",
            hole_count,
            m_to_mm(*hole_diameter_m),
            m_to_mm(*plate_thickness_m),
            length_to_diameter
        ),
        InjectorGeometry::Pintle {
            pintle_diameter_m,
            annular_gap_m,
            outer_diameter_m,
        } => println!(
            "Injector       : pintle {:.1} mm, gap {:.3} mm, annulus OD {:.1} mm",
            m_to_mm(*pintle_diameter_m),
            m_to_mm(*annular_gap_m),
            m_to_mm(*outer_diameter_m)
        ),
        InjectorGeometry::Swirl {
            slot_count,
            slot_width_m,
            slot_height_m,
            spray_half_angle_deg,
        } => println!(
            "Injector       : swirl, {} slots {:.2} x {:.2} mm, half-angle {:.0} deg",
            slot_count,
            m_to_mm(*slot_width_m),
            m_to_mm(*slot_height_m),
            spray_half_angle_deg
        ),
    }
    println!(
        "Hydraulics     : dP = {:.2} bar, v = {:.1} m/s, Re = {:.0}, Cd = {:.2}",
        pa_to_bar(design.pressure_drop_pa),
        design.exit_velocity_m_s,
        design.reynolds_number,
        design.discharge_coefficient
    );
}
