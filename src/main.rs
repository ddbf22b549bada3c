//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::fs::{self, File, OpenOptions};
use std::io;
use std::process::exit;

use huffzip::tools::cli::{hzopts_init, HzOpts, Mode};
use huffzip::{compress, decompress, HuffError, Report};

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace. The command line narrows this.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Unable to start the logger.");
    }

    let options = hzopts_init();

    match run(&options) {
        Ok(report) => info!(
            "Done. {} -> {} ({} bytes in, {} bytes out).\n",
            options.file, options.output, report.bytes_in, report.bytes_out
        ),
        Err(e) => {
            error!("{}: {}", options.file, e);
            exit(1);
        }
    }
}

/// Open both files and run the requested operation.
fn run(opts: &HzOpts) -> Result<Report, HuffError> {
    let f_in = File::open(&opts.file).map_err(HuffError::InputRead)?;

    // Opening the output truncates it, which would wipe the input before it is read.
    if opts.output_is_input() {
        return Err(HuffError::OutputWrite(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is the input file", opts.output),
        )));
    }

    let mut out_options = OpenOptions::new();
    out_options.write(true);
    if opts.force_overwrite {
        out_options.create(true).truncate(true);
    } else {
        // Refuse to clobber an existing file.
        out_options.create_new(true);
    }
    let f_out = out_options
        .open(&opts.output)
        .map_err(HuffError::OutputWrite)?;

    //----- Figure how what we need to do and go do it
    let result = match opts.op_mode {
        Mode::Zip => compress(f_in, f_out),
        Mode::Unzip => decompress(f_in, f_out),
    };

    // Whatever was written is not a usable file.
    if result.is_err() && fs::remove_file(&opts.output).is_err() {
        error!("Could not remove partial output {}", opts.output);
    }
    result
}
