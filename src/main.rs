use beamprop::{
    console::{Cli, Command, IntensityArgs, LensSystemArgs, RunArgs},
    error::BeamResult,
    plottable::Plottable,
    request::{IntensityRequest, LensSystemRequest, Report, Request},
    sampling::{axial_range, on_axis_sweep, radial_sweep, width_sweep},
    BeamProfile, GridConfig,
};
use clap::Parser;
use env_logger::Env;

/// Number of points of the written curves.
const CURVE_POINTS: usize = 200;

fn print_report(report: Report, json: bool) -> BeamResult<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn run_intensity(args: &IntensityArgs) -> BeamResult<()> {
    let request = IntensityRequest::try_from(args)?;
    let report = request.evaluate()?;
    write_outputs(&request, args)?;
    print_report(Report::Intensity(report), args.output.json)
}

fn write_outputs(request: &IntensityRequest, args: &IntensityArgs) -> BeamResult<()> {
    if let Some(path) = &args.output.plot {
        request.intensity_grid()?.to_plot(path)?;
    }
    let beam = request.beam()?;
    if args.radial_plot.is_some() || args.output.csv.is_some() {
        let curve = radial_sweep(&beam, &[request.distance], CURVE_POINTS)?;
        if let Some(path) = &args.radial_plot {
            curve.to_plot(path)?;
        }
        if let Some(path) = &args.output.csv {
            curve.save_csv(path)?;
        }
    }
    if args.on_axis_plot.is_none() && args.width_plot.is_none() {
        return Ok(());
    }
    let (start, end) = args.axial_plot_range(request.distance)?;
    if let Some(path) = &args.on_axis_plot {
        on_axis_sweep(&beam, start, end, CURVE_POINTS)?.to_plot(path)?;
    }
    if let Some(path) = &args.width_plot {
        width_sweep(&beam, start, end, CURVE_POINTS)?.to_plot(path)?;
    }
    Ok(())
}

fn run_lens_system(args: &LensSystemArgs) -> BeamResult<()> {
    let request = LensSystemRequest::try_from(args)?;
    let report = request.evaluate()?;
    let train = request.beam_train()?;
    let mut positions = request.lens_distances.clone();
    positions.push(request.distance);
    let (start, end) = axial_range(&positions);
    if args.width_plot.is_some() || args.output.csv.is_some() {
        let curve = width_sweep(&train, start, end, CURVE_POINTS)?;
        if let Some(path) = &args.width_plot {
            curve.to_plot(path)?;
        }
        if let Some(path) = &args.output.csv {
            curve.save_csv(path)?;
        }
    }
    if let Some(path) = &args.output.plot {
        let config = GridConfig::default().with_widths(request.x_width, request.y_width)?;
        train.intensity_grid(request.distance, &config)?.to_plot(path)?;
    }
    print_report(Report::LensSystem(report), args.output.json)
}

fn run_file(args: &RunArgs) -> BeamResult<()> {
    let request = Request::from_file(&args.file)?;
    print_report(request.evaluate()?, args.json)
}

fn main() -> BeamResult<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let cli = Cli::parse();
    match &cli.command {
        Command::Intensity(args) => run_intensity(args),
        Command::LensSystem(args) => run_lens_system(args),
        Command::Run(args) => run_file(args),
    }
}
