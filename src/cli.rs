// Idiomatic Rust CLI for Oxi85.
//
// Uses explicit subcommands and long-form options. The CLI is a thin
// layer: it opens the byte source and sink, runs the streaming transform,
// and maps failures to exit codes, keeping format errors and I/O errors
// distinguishable on stderr.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::ascii85::buffer::ChunkReader;
use crate::ascii85::decoder::{Ascii85Decoder, DecodeError};
use crate::ascii85::encoder::Ascii85Encoder;
use crate::ascii85::wrap::LineWrap;
use crate::ascii85::{RAW_CHUNK, TEXT_CHUNK};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Conventional Ascii85 output width.
const DEFAULT_WRAP: usize = 80;

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Ascii85 (Adobe variant) encoder/decoder.
#[derive(Parser, Debug)]
#[command(
    name = "oxi85",
    version,
    about = "Ascii85 encoder/decoder",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encode raw bytes to Ascii85 text.
    Encode(EncodeArgs),
    /// Decode Ascii85 text back to raw bytes.
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
struct EncodeArgs {
    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Wrap output lines at this column.
    #[arg(long, short = 'w', default_value_t = DEFAULT_WRAP)]
    wrap: usize,

    /// Disable line wrapping.
    #[arg(long = "no-wrap", conflicts_with = "wrap")]
    no_wrap: bool,

    /// Check/compute only (do not write output).
    #[arg(long = "check-only")]
    no_output: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Treat the input as bare payload without <~ ~> delimiters.
    #[arg(long)]
    raw: bool,

    /// Check/compute only (do not write output).
    #[arg(long = "check-only")]
    no_output: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Encode,
    Decode,
}

#[derive(Debug)]
struct Options {
    command: Command,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    use_stdout: bool,
    no_output: bool,
    wrap: LineWrap,
    raw: bool,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let force = cli.force;
    let quiet = cli.quiet;
    let verbose = cli.verbose.min(2);
    let json_output = cli.json_output;

    match cli.command {
        Cmd::Encode(args) => Options {
            command: Command::Encode,
            force,
            quiet,
            verbose,
            json_output,
            use_stdout: args.stdout,
            no_output: args.no_output,
            wrap: if args.no_wrap {
                LineWrap::Off
            } else {
                LineWrap::Columns(args.wrap)
            },
            raw: false,
            input_file: args.input.or(args.input_pos),
            output_file: args.output.or(args.output_pos),
        },
        Cmd::Decode(args) => Options {
            command: Command::Decode,
            force,
            quiet,
            verbose,
            json_output,
            use_stdout: args.stdout,
            no_output: args.no_output,
            wrap: LineWrap::Off,
            raw: args.raw,
            input_file: args.input.or(args.input_pos),
            output_file: args.output.or(args.output_pos),
        },
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("oxi85".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Source/sink setup
// ---------------------------------------------------------------------------

fn open_input(opts: &Options) -> Result<Box<dyn Read>, i32> {
    match &opts.input_file {
        Some(path) => match File::open(path) {
            Ok(f) => Ok(Box::new(BufReader::with_capacity(BUF_SIZE, f))),
            Err(e) => {
                eprintln!("oxi85: input file: {}: {e}", path.display());
                Err(1)
            }
        },
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(opts: &Options) -> Result<Box<dyn Write>, i32> {
    if opts.no_output {
        return Ok(Box::new(io::sink()));
    }
    match (opts.use_stdout, &opts.output_file) {
        (true, _) | (_, None) => Ok(Box::new(BufWriter::with_capacity(
            BUF_SIZE,
            io::stdout().lock(),
        ))),
        (false, Some(path)) => {
            if path.exists() && !opts.force {
                eprintln!(
                    "oxi85: output file exists, use -f to overwrite: {}",
                    path.display()
                );
                return Err(1);
            }
            match File::create(path) {
                Ok(f) => Ok(Box::new(BufWriter::with_capacity(BUF_SIZE, f))),
                Err(e) => {
                    eprintln!("oxi85: output file: {}: {e}", path.display());
                    Err(1)
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Encode command
// ---------------------------------------------------------------------------

fn cmd_encode(opts: &Options) -> i32 {
    let mut reader = match open_input(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let writer = match open_output(opts) {
        Ok(w) => w,
        Err(code) => return code,
    };

    let mut encoder = Ascii85Encoder::new(writer, opts.wrap);
    let mut chunks = ChunkReader::with_capacity(RAW_CHUNK, &mut reader);
    loop {
        match chunks.next_chunk() {
            Ok(None) => break,
            Ok(Some(chunk)) => {
                if let Err(e) = encoder.write_bytes(chunk) {
                    eprintln!("oxi85: encode error: {e}");
                    return 1;
                }
            }
            Err(e) => {
                eprintln!("oxi85: read error: {e}");
                return 1;
            }
        }
    }

    let total_in = encoder.bytes_in();
    let (mut writer, total_out) = match encoder.finish() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("oxi85: encode error: {e}");
            return 1;
        }
    };
    if let Err(e) = writer.flush() {
        eprintln!("oxi85: write flush error: {e}");
        return 1;
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!("oxi85: encode: {total_in} bytes in, {total_out} characters out");
    }
    if opts.json_output {
        let json = serde_json::json!({
            "command": "encode",
            "input_size": total_in,
            "output_size": total_out,
            "wrap": match opts.wrap {
                LineWrap::Off => serde_json::Value::Null,
                LineWrap::Columns(w) => w.into(),
            },
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
    }

    0
}

// ---------------------------------------------------------------------------
// Decode command
// ---------------------------------------------------------------------------

fn cmd_decode(opts: &Options) -> i32 {
    let mut reader = match open_input(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let writer = match open_output(opts) {
        Ok(w) => w,
        Err(code) => return code,
    };

    let mut decoder = if opts.raw {
        Ascii85Decoder::new_raw(writer)
    } else {
        Ascii85Decoder::new_delimited(writer)
    };

    let mut chunks = ChunkReader::with_capacity(TEXT_CHUNK, &mut reader);
    let result = loop {
        match chunks.next_chunk() {
            Ok(None) => break decoder.finish(),
            Ok(Some(chunk)) => {
                if let Err(e) = decoder.push(chunk) {
                    break Err(e);
                }
            }
            Err(e) => break Err(e.into()),
        }
    };

    match result {
        Ok((mut writer, total)) => {
            if let Err(e) = writer.flush() {
                eprintln!("oxi85: write flush error: {e}");
                return 1;
            }
            if opts.verbose > 0 && !opts.quiet {
                eprintln!("oxi85: decode: {total} bytes out");
            }
            if opts.json_output {
                let json = serde_json::json!({
                    "command": "decode",
                    "output_size": total,
                    "raw": opts.raw,
                });
                eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            0
        }
        // Keep format errors distinguishable from I/O failures.
        Err(DecodeError::Format(msg)) => {
            eprintln!("oxi85: invalid input: {msg}");
            1
        }
        Err(e) => {
            eprintln!("oxi85: decode error: {e}");
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let mut opts = resolve_options(cli);

    // Warn if -c overrides output filename.
    if opts.use_stdout && opts.output_file.is_some() {
        if !opts.quiet {
            eprintln!(
                "oxi85: warning: -c option overrides output filename: {}",
                opts.output_file.as_ref().unwrap().display()
            );
        }
        opts.output_file = None;
    }

    let exit_code = match opts.command {
        Command::Encode => cmd_encode(&opts),
        Command::Decode => cmd_decode(&opts),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
