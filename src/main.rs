//! Lap time report tool
//! Reads the ULTRAK 498 record stream from a serial port, a capture
//! file or stdin and prints the lap times of one race as CSV.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};
use ultrak498::{list_ports, open_input, write_lap_times, RecordStream};

#[derive(Parser, Debug)]
#[command(name = "ultrak498", version, about = "Print lap times recorded by an ULTRAK 498 timer")]
struct Args {
    /// Input file or serial device, stdin if not specified
    #[arg(short = 'f', long = "infile", value_name = "FILE")]
    infile: Option<PathBuf>,

    /// Output file, stdout if not specified
    #[arg(short = 'o', long = "outfile", value_name = "FILE")]
    outfile: Option<PathBuf>,

    /// Race ID to display
    #[arg(short = 'r', long = "raceid", value_name = "NUM", default_value_t = 1)]
    raceid: u8,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    let args = Args::parse();

    if args.list_ports {
        for port in list_ports()? {
            println!("{}", port);
        }
        return Ok(());
    }

    let input: Box<dyn Read> = match &args.infile {
        Some(path) => open_input(path)?,
        None => Box::new(io::stdin().lock()),
    };
    let records = RecordStream::new(input);

    match &args.outfile {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_lap_times(&mut out, records, args.raceid)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_lap_times(&mut out, records, args.raceid)?;
        }
    }

    Ok(())
}
