//! Record dump utility
//! Decodes a captured ULTRAK 498 stream and prints every record for
//! inspection

use std::env;
use std::fs::File;
use ultrak498::RecordStream;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <capture.bin> [--json]", args[0]);
        eprintln!("\nExamples:");
        eprintln!("  {} race_capture.bin          # readable listing", args[0]);
        eprintln!("  {} race_capture.bin --json   # one JSON object per line", args[0]);
        std::process::exit(1);
    }

    let capture_file = &args[1];
    let json = match args.get(2).map(String::as_str) {
        None => false,
        Some("--json") => true,
        Some(other) => {
            eprintln!("Unknown option: {}", other);
            std::process::exit(1);
        }
    };

    let file = File::open(capture_file)?;

    for (index, record) in RecordStream::new(file).enumerate() {
        let record = record?;
        if json {
            println!("{}", serde_json::to_string(&record)?);
        } else {
            match record.elapsed_hundredths() {
                Some(total) => println!("{:4}  {}  ({} hundredths)", index, record, total),
                None => println!("{:4}  {}", index, record),
            }
        }
    }

    Ok(())
}
