#![warn(missing_docs)]
//! Handling the beamprop CLI
//!
//! This module handles the command line parsing. Required numeric values which are not given as options are
//! asked for interactively.
use std::{
    io::{stdin, stdout, BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand};
use rprompt::prompt_reply_from_bufread;
use strum::IntoEnumIterator;
use uom::si::f64::Length;

use crate::{
    centimeter, degree,
    error::{BeamError, BeamResult},
    gaussian_beam::BeamParameters,
    intensity_grid::GridConfig,
    lens_system::LensOrdering,
    meter, milliwatt, nanometer,
    parse::{parse_list, parse_positive, parse_value},
    request::{IntensityRequest, LensSystemRequest},
    sampling::axial_range,
};

/// Number of times the user is asked for a valid value before giving up.
const MAX_PROMPTS: usize = 3;

/// Gaussian beam propagation through free space and thin lenses
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// calculation to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Available calculations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// beam radius and irradiance of a beam in a plane at a given distance
    Intensity(IntensityArgs),
    /// propagation of a beam through a system of thin lenses
    LensSystem(LensSystemArgs),
    /// evaluate a request stored in a YAML file
    Run(RunArgs),
}

/// Parameters of the incoming beam
#[derive(Args, Debug, Default, Clone)]
pub struct BeamArgs {
    /// wavelength in nm
    #[arg(long)]
    pub wavelength: Option<String>,
    /// power in mW
    #[arg(long)]
    pub power: Option<String>,
    /// divergence (half angle) in degrees
    #[arg(long)]
    pub divergence: Option<String>,
}

/// Output options shared by all calculations
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// file for the irradiance map (.svg, .png or .bmp)
    #[arg(long)]
    pub plot: Option<PathBuf>,
    /// csv file for the sampled curve
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments of the `intensity` command
#[derive(Args, Debug, Default, Clone)]
pub struct IntensityArgs {
    /// parameters of the incoming beam
    #[command(flatten)]
    pub beam: BeamArgs,
    /// distance of the observation plane in m
    #[arg(long, allow_hyphen_values = true)]
    pub distance: Option<String>,
    /// width of the irradiance map along x in cm (default: 4 beam radii)
    #[arg(long)]
    pub x_width: Option<String>,
    /// width of the irradiance map along y in cm (default: 4 beam radii)
    #[arg(long)]
    pub y_width: Option<String>,
    /// file for the radial irradiance profile in the observation plane (.svg, .png or .bmp)
    #[arg(long)]
    pub radial_plot: Option<PathBuf>,
    /// file for the on-axis irradiance between `--z-start` and `--z-end` (.svg, .png or .bmp)
    #[arg(long)]
    pub on_axis_plot: Option<PathBuf>,
    /// file for the beam radius between `--z-start` and `--z-end` (.svg, .png or .bmp)
    #[arg(long)]
    pub width_plot: Option<PathBuf>,
    /// start of the axial plot range in m (default: min(0, distance))
    #[arg(long, allow_hyphen_values = true)]
    pub z_start: Option<String>,
    /// end of the axial plot range in m (default: max(0, distance))
    #[arg(long, allow_hyphen_values = true)]
    pub z_end: Option<String>,
    /// output files and format
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments of the `lens-system` command
#[derive(Args, Debug, Default, Clone)]
pub struct LensSystemArgs {
    /// parameters of the incoming beam
    #[command(flatten)]
    pub beam: BeamArgs,
    /// comma separated lens positions in m
    #[arg(long)]
    pub lens_distances: Option<String>,
    /// comma separated focal lengths in m
    #[arg(long)]
    pub focal_lengths: Option<String>,
    /// distance of the observation plane in m
    #[arg(long, allow_hyphen_values = true)]
    pub distance: Option<String>,
    /// aperture width along x in cm (default: 4 beam radii)
    #[arg(long)]
    pub x_width: Option<String>,
    /// aperture width along y in cm (default: 4 beam radii)
    #[arg(long)]
    pub y_width: Option<String>,
    /// handling of lens positions not given in ascending order
    #[arg(long, default_value_t = LensOrdering::Strict)]
    pub ordering: LensOrdering,
    /// file for the beam radius plot (.svg, .png or .bmp)
    #[arg(long)]
    pub width_plot: Option<PathBuf>,
    /// output files and format
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments of the `run` command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// YAML file containing the request
    pub file: PathBuf,
    /// print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Extracts an argument, asking the user if it is missing or invalid.
///
/// # Attributes
/// * `func`:   function to evaluate the input string of the argument
/// * `input`:  value of the argument given on the command line (if any)
/// * `prompt`: text shown when asking for the value
/// * `reader`: type that implements the `BufRead` trait to read from. May be stdin().lock() for user input or a
///   `BufReader` from a static String for tests
/// * `writer`: type that implements the Write trait to write into
///
/// # Errors
/// Returns an [`BeamError::Console`] if no valid value was entered after three prompts or the console cannot be
/// read.
fn get_arg<T, F: Fn(&str) -> BeamResult<T>>(
    func: F,
    input: Option<&str>,
    prompt: &str,
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> BeamResult<T> {
    let mut prefix = String::new();
    if let Some(text) = input {
        match func(text) {
            Ok(value) => return Ok(value),
            Err(err) => prefix = format!("Invalid input! {err}\n"),
        }
    }
    for _ in 0..MAX_PROMPTS {
        let reply = prompt_reply_from_bufread(reader, writer, format!("{prefix}{prompt}: "))
            .map_err(|e| BeamError::Console(format!("cannot read {prompt}: {e}")))?;
        match func(&reply) {
            Ok(value) => return Ok(value),
            Err(err) => prefix = format!("Invalid input! {err}\n"),
        }
    }
    Err(BeamError::Console(format!(
        "no valid value for {prompt} after {MAX_PROMPTS} attempts"
    )))
}

/// Extracts an optional argument. Missing values are not asked for, invalid values are.
fn get_optional_arg<T, F: Fn(&str) -> BeamResult<T>>(
    func: F,
    input: Option<&str>,
    prompt: &str,
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> BeamResult<Option<T>> {
    input
        .map(|text| get_arg(func, Some(text), prompt, reader, writer))
        .transpose()
}

fn eval_wavelength(text: &str) -> BeamResult<Length> {
    parse_positive("wavelength", text).map(|value| nanometer!(value))
}
fn eval_position(field: &str, text: &str) -> BeamResult<Length> {
    parse_value(field, text).and_then(|value| {
        if value.is_finite() {
            Ok(meter!(value))
        } else {
            Err(BeamError::Parse(format!("{field}: value must be finite")))
        }
    })
}
fn eval_distance(text: &str) -> BeamResult<Length> {
    eval_position("distance", text)
}
fn eval_width(text: &str) -> BeamResult<Length> {
    parse_positive("width", text).map(|value| centimeter!(value))
}
fn eval_lengths(field: &str, text: &str) -> BeamResult<Vec<Length>> {
    Ok(parse_list(field, text)?
        .into_iter()
        .map(|value| meter!(value))
        .collect())
}

impl BeamArgs {
    /// Resolve the beam parameters, asking for missing values.
    ///
    /// # Errors
    /// This function returns an error if a value cannot be obtained.
    pub fn resolve(
        &self,
        reader: &mut impl BufRead,
        writer: &mut impl Write,
    ) -> BeamResult<BeamParameters> {
        let wavelength = get_arg(
            eval_wavelength,
            self.wavelength.as_deref(),
            "wavelength (nm)",
            reader,
            writer,
        )?;
        let power = get_arg(
            |text| {
                let value = parse_value("power", text)?;
                if value.is_finite() && value >= 0.0 {
                    Ok(milliwatt!(value))
                } else {
                    Err(BeamError::Parse("power: value must be finite and >= 0".into()))
                }
            },
            self.power.as_deref(),
            "power (mW)",
            reader,
            writer,
        )?;
        let divergence = get_arg(
            |text| parse_positive("divergence", text).map(|value| degree!(value)),
            self.divergence.as_deref(),
            "divergence (deg)",
            reader,
            writer,
        )?;
        Ok(BeamParameters::new(wavelength, power, divergence))
    }
}

impl IntensityArgs {
    /// Create an [`IntensityRequest`], asking for missing values.
    ///
    /// # Errors
    /// This function returns an error if a value cannot be obtained.
    pub fn resolve(
        &self,
        reader: &mut impl BufRead,
        writer: &mut impl Write,
    ) -> BeamResult<IntensityRequest> {
        let beam = self.beam.resolve(reader, writer)?;
        let distance = get_arg(
            eval_distance,
            self.distance.as_deref(),
            "distance (m)",
            reader,
            writer,
        )?;
        let x_width = get_optional_arg(
            eval_width,
            self.x_width.as_deref(),
            "x width (cm)",
            reader,
            writer,
        )?;
        let y_width = get_optional_arg(
            eval_width,
            self.y_width.as_deref(),
            "y width (cm)",
            reader,
            writer,
        )?;
        Ok(IntensityRequest {
            beam,
            distance,
            grid: GridConfig::default().with_widths(x_width, y_width)?,
        })
    }
}

impl IntensityArgs {
    /// Axial range of the on-axis and beam radius plots.
    ///
    /// Missing bounds are taken from the range spanning z = 0 and the observation plane at `distance`.
    ///
    /// # Errors
    /// This function returns a [`BeamError::Parse`] if a given bound is not a finite number.
    pub fn axial_plot_range(&self, distance: Length) -> BeamResult<(Length, Length)> {
        let (start, end) = axial_range(&[distance]);
        let start = self
            .z_start
            .as_deref()
            .map_or(Ok(start), |text| eval_position("z start", text))?;
        let end = self
            .z_end
            .as_deref()
            .map_or(Ok(end), |text| eval_position("z end", text))?;
        Ok((start, end))
    }
}

fn create_ordering_prompt() -> String {
    let orderings = LensOrdering::iter()
        .map(|ordering| ordering.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("lens distances (m, comma separated, ordering: {orderings})")
}

impl LensSystemArgs {
    /// Create a [`LensSystemRequest`], asking for missing values.
    ///
    /// # Errors
    /// This function returns an error if a value cannot be obtained.
    pub fn resolve(
        &self,
        reader: &mut impl BufRead,
        writer: &mut impl Write,
    ) -> BeamResult<LensSystemRequest> {
        let beam = self.beam.resolve(reader, writer)?;
        let lens_distances = get_arg(
            |text| eval_lengths("lens distances", text),
            self.lens_distances.as_deref(),
            &create_ordering_prompt(),
            reader,
            writer,
        )?;
        let focal_lengths = get_arg(
            |text| eval_lengths("focal lengths", text),
            self.focal_lengths.as_deref(),
            "focal lengths (m, comma separated)",
            reader,
            writer,
        )?;
        let distance = get_arg(
            eval_distance,
            self.distance.as_deref(),
            "distance (m)",
            reader,
            writer,
        )?;
        let x_width = get_optional_arg(
            eval_width,
            self.x_width.as_deref(),
            "x width (cm)",
            reader,
            writer,
        )?;
        let y_width = get_optional_arg(
            eval_width,
            self.y_width.as_deref(),
            "y width (cm)",
            reader,
            writer,
        )?;
        Ok(LensSystemRequest {
            beam,
            lens_distances,
            focal_lengths,
            ordering: self.ordering,
            distance,
            x_width,
            y_width,
        })
    }
}

impl TryFrom<&IntensityArgs> for IntensityRequest {
    type Error = BeamError;

    fn try_from(args: &IntensityArgs) -> BeamResult<Self> {
        let mut reader = BufReader::new(stdin().lock());
        let mut writer = BufWriter::new(stdout().lock());
        args.resolve(&mut reader, &mut writer)
    }
}
impl TryFrom<&LensSystemArgs> for LensSystemRequest {
    type Error = BeamError;

    fn try_from(args: &LensSystemArgs) -> BeamResult<Self> {
        let mut reader = BufReader::new(stdin().lock());
        let mut writer = BufWriter::new(stdout().lock());
        args.resolve(&mut reader, &mut writer)
    }
}
