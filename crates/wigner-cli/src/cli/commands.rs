use super::CliError;
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use wigner_core::{
    LegendreInput, ThreeJOverLInput, ThreeJOverMInput, WignerDInput, legendre_p_l, wigner_3j_l,
    wigner_3j_m, wigner_d_l,
};

#[derive(clap::Args)]
#[command(allow_negative_numbers = true)]
pub(super) struct ThreeJOverLArgs {
    /// Angular momentum l2
    #[arg(long)]
    l2: f64,

    /// Angular momentum l3
    #[arg(long)]
    l3: f64,

    /// Projection m2
    #[arg(long)]
    m2: f64,

    /// Projection m3
    #[arg(long)]
    m3: f64,

    #[command(flatten)]
    output: OutputFlags,
}

#[derive(clap::Args)]
#[command(allow_negative_numbers = true)]
pub(super) struct ThreeJOverMArgs {
    /// Angular momentum l1
    #[arg(long)]
    l1: f64,

    /// Angular momentum l2
    #[arg(long)]
    l2: f64,

    /// Angular momentum l3
    #[arg(long)]
    l3: f64,

    /// Projection m1
    #[arg(long)]
    m1: f64,

    #[command(flatten)]
    output: OutputFlags,
}

#[derive(clap::Args)]
#[command(allow_negative_numbers = true)]
pub(super) struct WignerDArgs {
    /// Lowest degree to report
    #[arg(long)]
    lmin: i32,

    /// Highest degree to report
    #[arg(long)]
    lmax: i32,

    /// Row projection m1
    #[arg(long)]
    m1: i32,

    /// Column projection m2
    #[arg(long)]
    m2: i32,

    /// Rotation angle in radians
    #[arg(long)]
    theta: f64,

    #[command(flatten)]
    output: OutputFlags,
}

#[derive(clap::Args)]
#[command(allow_negative_numbers = true)]
pub(super) struct LegendreArgs {
    /// Lowest degree to report
    #[arg(long)]
    lmin: i32,

    /// Highest degree to report
    #[arg(long)]
    lmax: i32,

    /// Evaluation point
    #[arg(long)]
    x: f64,

    #[command(flatten)]
    output: OutputFlags,
}

#[derive(clap::Args)]
struct OutputFlags {
    /// Emit the report as JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesReport {
    operation: &'static str,
    index: &'static str,
    min: f64,
    max: f64,
    values: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DegreeSeriesReport {
    operation: &'static str,
    lmin: i32,
    lmax: i32,
    values: Vec<f64>,
}

pub(super) fn run_three_j_over_l(args: ThreeJOverLArgs) -> Result<i32, CliError> {
    let series = wigner_3j_l(ThreeJOverLInput::new(args.l2, args.l3, args.m2, args.m3))?;
    tracing::debug!(
        min = series.min,
        max = series.max,
        len = series.len(),
        "3j-l series evaluated"
    );
    let report = SeriesReport {
        operation: "3j-l",
        index: "l1",
        min: series.min,
        max: series.max,
        values: series.into_coefficients(),
    };
    emit(render_series(&report), &report, &args.output)
}

pub(super) fn run_three_j_over_m(args: ThreeJOverMArgs) -> Result<i32, CliError> {
    let series = wigner_3j_m(ThreeJOverMInput::new(args.l1, args.l2, args.l3, args.m1))?;
    tracing::debug!(
        min = series.min,
        max = series.max,
        len = series.len(),
        "3j-m series evaluated"
    );
    let report = SeriesReport {
        operation: "3j-m",
        index: "m2",
        min: series.min,
        max: series.max,
        values: series.into_coefficients(),
    };
    emit(render_series(&report), &report, &args.output)
}

pub(super) fn run_wigner_d(args: WignerDArgs) -> Result<i32, CliError> {
    let values = wigner_d_l(WignerDInput::new(
        args.lmin, args.lmax, args.m1, args.m2, args.theta,
    ))?;
    tracing::debug!(
        lmin = args.lmin,
        lmax = args.lmax,
        len = values.len(),
        "wigner-d series evaluated"
    );
    let report = DegreeSeriesReport {
        operation: "wigner-d",
        lmin: args.lmin,
        lmax: args.lmax,
        values,
    };
    emit(render_degree_series(&report), &report, &args.output)
}

pub(super) fn run_legendre(args: LegendreArgs) -> Result<i32, CliError> {
    let values = legendre_p_l(LegendreInput::new(args.lmin, args.lmax, args.x))?;
    tracing::debug!(
        lmin = args.lmin,
        lmax = args.lmax,
        len = values.len(),
        "legendre series evaluated"
    );
    let report = DegreeSeriesReport {
        operation: "legendre",
        lmin: args.lmin,
        lmax: args.lmax,
        values,
    };
    emit(render_degree_series(&report), &report, &args.output)
}

fn render_series(report: &SeriesReport) -> String {
    let mut text = format!(
        "{} series over {} in [{}, {}] ({} values)\n",
        report.operation,
        report.index,
        report.min,
        report.max,
        report.values.len()
    );
    for (offset, value) in report.values.iter().enumerate() {
        let index = report.min + offset as f64;
        text.push_str(&format!("{} = {:>6}  {:+.16e}\n", report.index, index, value));
    }
    text
}

fn render_degree_series(report: &DegreeSeriesReport) -> String {
    let mut text = format!(
        "{} series over l in [{}, {}] ({} values)\n",
        report.operation,
        report.lmin,
        report.lmax,
        report.values.len()
    );
    for (offset, value) in report.values.iter().enumerate() {
        let degree = report.lmin + offset as i32;
        text.push_str(&format!("l = {:>6}  {:+.16e}\n", degree, value));
    }
    text
}

fn emit<T: Serialize>(human: String, report: &T, flags: &OutputFlags) -> Result<i32, CliError> {
    let payload = if flags.json {
        let mut json =
            serde_json::to_string_pretty(report).context("failed to serialize report")?;
        json.push('\n');
        json
    } else {
        human
    };

    match &flags.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create report directory {}", parent.display())
                    })?;
                }
            }
            fs::write(path, payload)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
        }
        None => print!("{payload}"),
    }

    Ok(0)
}
