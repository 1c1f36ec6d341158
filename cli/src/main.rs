use std::{io::Write, process::ExitCode};

use argh::FromArgs;
use bmp2hex_core::{
    ConvertError, EmissionConfig, HexCase, OutputMode, SizeBytes, TableName, WordSize,
    config::DEFAULT_TABLE_WIDTH, write_struct_definition, write_version,
};
use log::{debug, info};

use crate::input::InputError;

mod input;

#[derive(FromArgs)]
/// Convert BMP images to hex tables for microcontroller sketches
struct Args {
    /// output all data in raw table format
    #[argh(switch, short = 'r')]
    raw: bool,

    /// invert bitmap pixels
    #[argh(switch, short = 'i')]
    invert: bool,

    /// use named structure (GFXMeta) for data
    #[argh(switch, short = 'n')]
    named: bool,

    /// use XBM bit order (low order bit is first pixel of byte)
    #[argh(switch, short = 'x')]
    xbm: bool,

    /// define data in 16-bit words rather than bytes
    #[argh(switch, short = 'd')]
    double: bool,

    /// print hex digits in upper case
    #[argh(switch, short = 'u')]
    upper: bool,

    /// echo the current bmp2hex version
    #[argh(switch, short = 'v')]
    version: bool,

    /// output table width in hex bytes [default: 16]
    #[argh(option, short = 'w', default = "DEFAULT_TABLE_WIDTH")]
    width: usize,

    /// byte width of BMP sizes: 0=auto, 1, or 2 (big endian) [default: 0]
    #[argh(option, short = 'b', default = "0")]
    bytes: u32,

    /// the BMP file(s) to convert
    #[argh(positional)]
    infile: Vec<String>,
}

impl Args {
    fn config(&self) -> EmissionConfig {
        let mode = OutputMode::from_flags(self.raw, self.named, self.xbm);
        // zero falls back to the default, like an omitted option
        let width = if self.width == 0 { DEFAULT_TABLE_WIDTH } else { self.width };
        EmissionConfig::new(mode)
            .with_table_width(width)
            .with_size_bytes(SizeBytes::from_flag(self.bytes))
            .with_invert(self.invert)
            .with_word_size(if self.double { WordSize::Word } else { WordSize::Byte })
            .with_hex_case(if self.upper { HexCase::Upper } else { HexCase::Lower })
    }
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

fn convert_file(path: &str, config: &EmissionConfig) -> Result<String, Error> {
    let data = input::load(path)?;
    let name = TableName::from_path(path);
    debug!("Converting {path} as {name}");
    Ok(bmp2hex_core::convert(&data, &name, config)?)
}

/// Converts every input in order. Returns how many of them failed.
fn run(
    args: &Args,
    config: &EmissionConfig,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> std::io::Result<usize> {
    let mut preamble = String::new();
    if args.version {
        write_version(&mut preamble, config).map_err(std::io::Error::other)?;
    }
    if config.mode() == OutputMode::Named {
        write_struct_definition(&mut preamble, config).map_err(std::io::Error::other)?;
    }
    out.write_all(preamble.as_bytes())?;

    let mut failures = 0;
    for path in &args.infile {
        match convert_file(path, config) {
            Ok(text) => out.write_all(text.as_bytes())?,
            Err(e) => {
                writeln!(err, "error: {path}: {e}")?;
                failures += 1;
            }
        }
    }
    out.flush()?;
    Ok(failures)
}

/// Exit status for a finished run. `failed` is `None` when the output itself
/// could not be written.
fn exit_code(inputs: usize, version: bool, failed: Option<usize>) -> ExitCode {
    match failed {
        Some(0) if inputs > 0 || version => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Args = argh::from_env();
    if args.infile.is_empty() && !args.version {
        eprintln!("error: no input files");
        return exit_code(0, false, Some(0));
    }

    let config = args.config();
    info!(
        "Writing {} tables, {} bytes per line",
        config.mode().label(),
        config.table_width()
    );

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let failed = match run(&args, &config, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(failures) => {
            if failures > 0 {
                info!("{failures} of {} files failed", args.infile.len());
            }
            Some(failures)
        }
        Err(e) => {
            eprintln!("error: failed to write output: {e}");
            None
        }
    };
    exit_code(args.infile.len(), args.version, failed)
}
