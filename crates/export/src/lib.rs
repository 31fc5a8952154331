//! Export helpers for CSV and JSON artifacts.

pub mod timeline {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use motor_regression::{RegressionTimeline, TimelineSample};

    const HEADER: &str = "time_s,port_diameter_m,of_ratio,chamber_pressure_pa,thrust_n,status";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard timeline CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Serialize one sample to CSV, matching the standard header ordering.
    pub fn write_sample(sample: &TimelineSample, writer: &mut dyn Write) -> io::Result<()> {
        writeln!(
            writer,
            "{:.4},{:.6},{:.4},{:.1},{:.2},{}",
            sample.time_s,
            sample.port_diameter_m,
            sample.of_ratio,
            sample.chamber_pressure_pa,
            sample.thrust_n,
            sample.status,
        )
    }

    /// Write a complete timeline, header included.
    pub fn write_timeline(timeline: &RegressionTimeline, writer: &mut dyn Write) -> io::Result<()> {
        write_header(writer)?;
        for sample in &timeline.samples {
            write_sample(sample, writer)?;
        }
        writer.flush()
    }
}

pub mod report {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use motor_injector::{InjectorDesign, InjectorGeometry};
    use motor_montecarlo::StatisticalSummary;
    use motor_performance::MotorPerformance;
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// JSON sidecar for a solved design point, with the injector section
    /// present when one was sized.
    #[derive(Debug, Serialize)]
    pub struct DesignReport<'a> {
        pub motor: &'a str,
        pub chamber_pressure_pa: f64,
        pub thrust_n: f64,
        pub specific_impulse_s: f64,
        pub total_mass_flow_kg_s: f64,
        pub oxidizer_mass_flow_kg_s: f64,
        pub fuel_mass_flow_kg_s: f64,
        pub characteristic_velocity_m_s: f64,
        pub thrust_coefficient: f64,
        pub expansion_ratio: f64,
        pub throat_diameter_m: f64,
        pub exit_diameter_m: f64,
        pub chamber_diameter_m: f64,
        pub chamber_length_m: f64,
        pub total_propellant_mass_kg: f64,
        pub warnings: &'a [String],
        #[serde(skip_serializing_if = "Option::is_none")]
        pub injector: Option<InjectorReport<'a>>,
    }

    /// Injector section of a design report.
    #[derive(Debug, Serialize)]
    pub struct InjectorReport<'a> {
        pub family: &'static str,
        pub pressure_drop_pa: f64,
        pub exit_velocity_m_s: f64,
        pub reynolds_number: f64,
        pub discharge_coefficient: f64,
        pub footprint_diameter_m: f64,
        pub geometry: &'a InjectorGeometry,
        pub warnings: &'a [String],
    }

    impl<'a> DesignReport<'a> {
        pub fn new(
            motor: &'a str,
            performance: &'a MotorPerformance,
            injector: Option<&'a InjectorDesign>,
        ) -> Self {
            DesignReport {
                motor,
                chamber_pressure_pa: performance.chamber_pressure_pa,
                thrust_n: performance.thrust_n,
                specific_impulse_s: performance.specific_impulse_s,
                total_mass_flow_kg_s: performance.total_mass_flow_kg_s,
                oxidizer_mass_flow_kg_s: performance.oxidizer_mass_flow_kg_s,
                fuel_mass_flow_kg_s: performance.fuel_mass_flow_kg_s,
                characteristic_velocity_m_s: performance.characteristic_velocity_m_s,
                thrust_coefficient: performance.thrust_coefficient,
                expansion_ratio: performance.expansion_ratio,
                throat_diameter_m: performance.throat_diameter_m,
                exit_diameter_m: performance.exit_diameter_m,
                chamber_diameter_m: performance.chamber_diameter_m,
                chamber_length_m: performance.chamber_length_m,
                total_propellant_mass_kg: performance.total_propellant_mass_kg,
                warnings: &performance.warnings,
                injector: injector.map(InjectorReport::new),
            }
        }
    }

    impl<'a> InjectorReport<'a> {
        pub fn new(design: &'a InjectorDesign) -> Self {
            InjectorReport {
                family: match design.geometry {
                    InjectorGeometry::Showerhead { .. } => "showerhead",
                    InjectorGeometry::Pintle { .. } => "pintle",
                    InjectorGeometry::Swirl { .. } => "swirl",
                },
                pressure_drop_pa: design.pressure_drop_pa,
                exit_velocity_m_s: design.exit_velocity_m_s,
                reynolds_number: design.reynolds_number,
                discharge_coefficient: design.discharge_coefficient,
                footprint_diameter_m: design.footprint_diameter_m,
                geometry: &design.geometry,
                warnings: &design.warnings,
            }
        }
    }

    /// Envelope for an exported Monte Carlo summary.
    #[derive(Debug, Serialize)]
    pub struct SummaryReport<'a> {
        pub motor: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub seed: Option<u64>,
        #[serde(flatten)]
        pub summary: &'a StatisticalSummary,
    }

    /// Write a design report as pretty JSON.
    pub fn write_design(path: &Path, report: &DesignReport<'_>) -> io::Result<()> {
        write_json(path, report)
    }

    /// Write a Monte Carlo summary as pretty JSON.
    pub fn write_summary(path: &Path, report: &SummaryReport<'_>) -> io::Result<()> {
        write_json(path, report)
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, value)?;
        Ok(())
    }
}
