use clap::{Args, Parser};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "PlanScale CLI - Rescale the spot weights of a pencil-beam scanning ion plan to a new dose or by a fixed factor, optionally per energy layer.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Path to the DICOM RT Ion Plan to rescale.
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Path for the rescaled plan [default: output.dcm].
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// New plan label (RTPlanLabel).
    #[arg(short, long, value_name = "TEXT")]
    pub label: Option<String>,

    /// File with one weight per energy layer, applied on top of the scale factor.
    #[arg(short, long, value_name = "PATH")]
    pub weights: Option<PathBuf>,

    /// Number of randomly sampled spots to print per control point for comparison.
    #[arg(short, long, value_name = "N")]
    pub print: Option<usize>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub target: DoseTargetArgs,

    /// Keep the original RTPlanDate and RTPlanTime instead of stamping the current time.
    #[arg(long)]
    pub keep_datetime: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// The two mutually exclusive ways of choosing the rescale.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct DoseTargetArgs {
    /// Scale factor applied to every spot weight [default: 1.0].
    #[arg(short, long, value_name = "FLOAT")]
    pub scale_factor: Option<f64>,

    /// New target beam dose in Gy(RBE); the scale factor becomes dose / original dose.
    #[arg(short, long, value_name = "GY")]
    pub dose: Option<f64>,
}
