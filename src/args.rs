use clap::Args;
use clap::Parser;

/// Where to find the hardware, shared by all binaries.
#[derive(Args, Debug, Default)]
pub struct LinkArgs {
    /// JSON configuration file. Flags given on the command line win.
    #[clap(short, long)]
    pub config: Option<String>,

    /// Serial device of the LED driver, e.g. /dev/ttyUSB0.
    #[clap(short, long)]
    pub device: Option<String>,

    /// Baud rate of the serial device.
    #[clap(short = 'r', long)]
    pub baudrate: Option<u32>,

    /// How often the visualization marker is published, in Hz.
    #[clap(long)]
    pub marker_rate: Option<f64>,
}

/// Drives a serial RGB LED controller and exposes a REST api
/// to set its color and mode.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct ControllerArgs {
    #[clap(flatten)]
    pub link: LinkArgs,

    /// The listen address to bind to.
    #[clap(short, long, default_value = "localhost:1314")]
    pub bind: String,
}

/// A shell for interactive debugging of the LED controller.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct ShellArgs {
    #[clap(flatten)]
    pub link: LinkArgs,
}
