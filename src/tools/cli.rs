use std::{fmt::Display, fmt::Formatter, fs, path::Path};

use clap::{ArgGroup, Parser};
use log::{info, LevelFilter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Log filter matching this verbosity.
    pub fn level(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Everything the binary needs to run one operation.
#[derive(Debug, Clone)]
pub struct HzOpts {
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Name of the file to read for input
    pub file: String,
    /// Name of the file to write
    pub output: String,
    /// Silently overwrite an existing output file
    pub force_overwrite: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman coding file compressor",
    long_about = "
    Compresses a file with a single Huffman code built from its byte frequencies.
    -c writes <file>.zz, -d writes <file>.yy, unless --output names the file."
)]
#[clap(group(ArgGroup::new("mode").required(true).args(&["compress", "decompress"])))]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Perform compression on the input file
    #[clap(short = 'c', long = "compress")]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Write to this file instead of the derived name
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Sets verbosity. -v shows progress, -vvv is chatty
    #[clap(short = 'v', parse(from_occurrences))]
    v: u64,

    /// Only report errors that stop the program
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

impl HzOpts {
    /// Put command line information from CLAP into our internal structure.
    pub fn from_args(args: Args) -> Self {
        let op_mode = if args.decompress {
            Mode::Unzip
        } else {
            Mode::Zip
        };
        let verbose = match (args.quiet, args.v) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Warnings,
            (false, 1) => Verbosity::Info,
            (false, 2) => Verbosity::Debug,
            _ => Verbosity::Trace,
        };
        let output = args
            .output
            .unwrap_or_else(|| output_name(&args.filename, op_mode));
        Self {
            op_mode,
            file: args.filename,
            output,
            force_overwrite: args.force,
            verbose,
        }
    }

    /// True when the output path names the input file itself, through any alias
    /// (relative path, `..`, symlink). Opening it for writing would wipe the input.
    pub fn output_is_input(&self) -> bool {
        same_file(&self.file, &self.output)
    }
}

/// True when both paths exist and resolve to the same file.
pub fn same_file<P: AsRef<Path>, Q: AsRef<Path>>(a: P, b: Q) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Output filename for an input file: `.zz` is appended when compressing, `.yy`
/// when decompressing.
pub fn output_name(input: &str, mode: Mode) -> String {
    let mut fname = input.to_owned();
    match mode {
        Mode::Zip => fname.push_str(".zz"),
        Mode::Unzip => fname.push_str(".yy"),
    }
    fname
}

/// Parse the process arguments, set the log level and report the settings.
pub fn hzopts_init() -> HzOpts {
    let opts = HzOpts::from_args(Args::parse());
    log::set_max_level(opts.verbose.level());

    info!("---- huffzip Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.file);
    info!("Sending output to the file {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    info!("---- huffzip Initialization End ----\n");
    opts
}
