//! SerScope command line: list ports, echo debug lines, plot telemetry.

mod monitor;
mod plot;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serscope_core::{list_ports, SerialConfig};
use serscope_decode::DEFAULT_MARKER;

#[derive(Parser)]
#[command(
    name = "serscope",
    version,
    about = "Serial monitor and live IMU telemetry plotter for ESP32 boards"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available serial ports
    Ports,
    /// Echo debug lines that contain a marker substring
    Monitor {
        /// Serial port to open, e.g. /dev/ttyUSB0 or COM3
        #[arg(short, long)]
        port: String,
        /// Baud rate the device is configured for
        #[arg(short, long, default_value_t = 115_200)]
        baud: u32,
        /// Only lines containing this substring are echoed
        #[arg(short, long, default_value = DEFAULT_MARKER)]
        filter: String,
    },
    /// Parse 6-axis IMU telemetry lines and plot them live
    Plot {
        /// Serial port to open, e.g. /dev/ttyUSB0 or COM3
        #[arg(short, long)]
        port: String,
        /// Baud rate the device is configured for
        #[arg(short, long, default_value_t = 115_200)]
        baud: u32,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Commands::Ports => {
            let ports = list_ports();
            if ports.is_empty() {
                println!("No serial ports found");
            }
            for info in ports {
                println!("{}", info.display_name());
            }
        }
        Commands::Monitor { port, baud, filter } => {
            let cfg = SerialConfig::new(port, baud);
            monitor::run(&cfg, filter.as_bytes())?;
        }
        Commands::Plot { port, baud } => {
            let cfg = SerialConfig::new(port, baud);
            plot::run(cfg)?;
        }
    }
    Ok(())
}
