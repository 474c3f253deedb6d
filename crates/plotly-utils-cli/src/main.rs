use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use plotly::Plot;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use plotly_utils::{BinSpec, ErrorYMode, MinorTicks, NanPolicy, PlotConfig, Theme};
use plotly_utils_cli::commands::histogram::{self, HistogramArgs};
use plotly_utils_cli::commands::imshow::{self, ImshowArgs};
use plotly_utils_cli::commands::lines::{self, LinesArgs};
use plotly_utils_cli::commands::scatter_matrix::{self, ScatterMatrixArgs};
use plotly_utils_cli::input::{load_plot_config, output_path, write_html};

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Path to the input table (*.csv or *.tsv)")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output_file")
        .short('o')
        .long("output")
        .help("Path of the HTML file to write. Defaults to the input path with an .html extension.")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("PLOTLY_UTILS_LOG", "error,plotly_utils=info"))
        .init();

    let matches = Command::new("plotly-utils")
        .version(clap::crate_version!())
        .author("Matias Senger <m.senger@hotmail.com>")
        .about("Error bands, scatter histograms and log-scale images with plotly")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .help("Path to a JSON plot configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .global(true)
                .help("Override the theme from the configuration file.")
                .value_parser(["plotly", "boring-thesis"])
                .value_hint(ValueHint::Other),
        )
        .subcommand(
            Command::new("histogram")
                .about("Histogram of one or more columns drawn as a step line")
                .arg(input_arg())
                .arg(
                    Arg::new("column")
                        .long("column")
                        .help("Column to histogram. Repeat or separate with commas for several traces.")
                        .required(true)
                        .action(ArgAction::Append)
                        .value_delimiter(',')
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("bins")
                        .short('b')
                        .long("bins")
                        .help("Number of bins, or one of auto, fd, sturges, scott, rice, sqrt")
                        .default_value("auto")
                        .value_parser(BinSpec::from_str),
                )
                .arg(
                    Arg::new("density")
                        .long("density")
                        .help("Normalize so that the histogram integrates to one.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("nan_policy")
                        .long("nan-policy")
                        .help("What to do with NaN samples: omit or raise")
                        .default_value("omit")
                        .value_parser(NanPolicy::from_str),
                )
                .arg(
                    Arg::new("errors")
                        .long("errors")
                        .help("Draw binomial error bars.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("markers")
                        .long("markers")
                        .help("Draw markers at the bin centers.")
                        .action(ArgAction::SetTrue),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("lines")
                .about("Lines with their errors drawn as bars or as filled bands")
                .arg(input_arg())
                .arg(
                    Arg::new("x")
                        .short('x')
                        .long("x")
                        .help("Column holding the x values")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("y")
                        .short('y')
                        .long("y")
                        .help("Column holding the y values")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("error")
                        .short('e')
                        .long("error")
                        .help("Column holding the error, or the upper error with --error-minus")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("error_minus")
                        .long("error-minus")
                        .help("Column holding the lower error")
                        .requires("error")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("group")
                        .short('g')
                        .long("group")
                        .help("Column whose values split the rows into separate lines")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .help("How errors are drawn: bar, band or none. Defaults to band with --error, none otherwise.")
                        .value_parser(ErrorYMode::parse_optional),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("scatter-matrix")
                .about("Scatter matrix of 2D-histogram contours")
                .arg(input_arg())
                .arg(
                    Arg::new("dimensions")
                        .short('d')
                        .long("dimensions")
                        .help("Comma separated columns to include")
                        .required(true)
                        .action(ArgAction::Append)
                        .value_delimiter(',')
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("no_contour")
                        .long("no-contour")
                        .help("Draw markers instead of contours (not supported yet).")
                        .action(ArgAction::SetTrue),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("imshow")
                .about("Image with a logarithmic color scale")
                .arg(input_arg())
                .arg(
                    Arg::new("minor_ticks")
                        .long("minor-ticks")
                        .help("Color bar minor ticks: on, off or auto")
                        .default_value("auto")
                        .value_parser(MinorTicks::from_str),
                )
                .arg(
                    Arg::new("no_contours")
                        .long("no-contours")
                        .help("Do not draw iso-lines at the tick values.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("z_label")
                        .long("z-label")
                        .help("Name of the plotted quantity")
                        .default_value("value"),
                )
                .arg(output_arg()),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let (name, sub_m) = matches
        .subcommand()
        .context("Subcommand is required by CLI configuration")?;
    let config = plot_config(sub_m)?;
    let input: &PathBuf = sub_m.get_one("input").context("Missing input file")?;
    log::info!("[plotly-utils::{}] Reading {:?}", name, input);

    let plot = match name {
        "histogram" => handle_histogram(input, sub_m, &config),
        "lines" => handle_lines(input, sub_m, &config),
        "scatter-matrix" => handle_scatter_matrix(input, sub_m, &config),
        "imshow" => handle_imshow(input, sub_m, &config),
        _ => unreachable!(),
    };
    match plot {
        Ok(plot) => save(&plot, input, sub_m),
        Err(e) => {
            log::error!("{} failed: {:#}", name, e);
            std::process::exit(1)
        }
    }
}

fn plot_config(matches: &ArgMatches) -> Result<PlotConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("[plotly-utils] Using config: {:?}", path);
            load_plot_config(path)?
        }
        None => PlotConfig::default(),
    };
    if let Some(theme) = matches.get_one::<String>("theme") {
        config.theme = Theme::from_str(theme)?;
    }
    Ok(config)
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn handle_histogram(input: &Path, matches: &ArgMatches, config: &PlotConfig) -> Result<Plot> {
    let args = HistogramArgs {
        input: input.to_path_buf(),
        columns: strings(matches, "column"),
        bins: matches.get_one::<BinSpec>("bins").cloned().unwrap_or_default(),
        density: matches.get_flag("density"),
        nan_policy: matches.get_one::<NanPolicy>("nan_policy").copied().unwrap_or_default(),
        errors: matches.get_flag("errors"),
        markers: matches.get_flag("markers"),
    };
    histogram::run(&args, config)
}

fn handle_lines(input: &Path, matches: &ArgMatches, config: &PlotConfig) -> Result<Plot> {
    let error = matches.get_one::<String>("error").cloned();
    let mode = match matches.get_one::<Option<ErrorYMode>>("mode") {
        Some(mode) => *mode,
        None if error.is_some() => Some(ErrorYMode::Band),
        None => None,
    };
    let args = LinesArgs {
        input: input.to_path_buf(),
        x: matches.get_one::<String>("x").cloned().context("Missing --x")?,
        y: matches.get_one::<String>("y").cloned().context("Missing --y")?,
        error,
        error_minus: matches.get_one::<String>("error_minus").cloned(),
        group: matches.get_one::<String>("group").cloned(),
        mode,
    };
    lines::run(&args, config)
}

fn handle_scatter_matrix(input: &Path, matches: &ArgMatches, config: &PlotConfig) -> Result<Plot> {
    let args = ScatterMatrixArgs {
        input: input.to_path_buf(),
        dimensions: strings(matches, "dimensions"),
        contour: !matches.get_flag("no_contour"),
    };
    scatter_matrix::run(&args, config)
}

fn handle_imshow(input: &Path, matches: &ArgMatches, config: &PlotConfig) -> Result<Plot> {
    let args = ImshowArgs {
        input: input.to_path_buf(),
        minor_ticks: matches.get_one::<MinorTicks>("minor_ticks").copied().unwrap_or_default(),
        draw_contours: !matches.get_flag("no_contours"),
        title: matches.get_one::<String>("title").cloned(),
        z_label: matches
            .get_one::<String>("z_label")
            .cloned()
            .unwrap_or_else(|| "value".to_string()),
    };
    imshow::run(&args, config)
}

fn save(plot: &Plot, input: &Path, matches: &ArgMatches) -> Result<()> {
    let path = output_path(input, matches.get_one::<PathBuf>("output_file"));
    write_html(plot, &path)
}
