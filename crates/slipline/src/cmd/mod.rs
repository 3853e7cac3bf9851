use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use slipline_frame::DEFAULT_MAX_PACKET;

use crate::exit::{io_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod fcs;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode one payload as a SLIP packet.
    Encode(EncodeArgs),
    /// Decode SLIP packets from a stream.
    Decode(DecodeArgs),
    /// Compute, verify or append an FCS-16.
    Fcs(FcsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args),
        Command::Decode(args) => decode::run(args, format),
        Command::Fcs(args) => fcs::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Payload source shared by `encode` and `fcs`.
#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Raw string payload.
    #[arg(long, conflicts_with_all = ["hex", "file"])]
    pub data: Option<String>,
    /// Hex payload (whitespace and ':' separators allowed).
    #[arg(long, conflicts_with_all = ["data", "file"])]
    pub hex: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with_all = ["data", "hex"])]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
    /// Append an FCS-16 trailer before framing.
    #[arg(long)]
    pub fcs: bool,
    /// Write the packet to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Maximum payload size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_PACKET)]
    pub max_packet_size: usize,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Read the stream from a file instead of stdin.
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
    /// Exit after N packets.
    #[arg(long)]
    pub count: Option<usize>,
    /// Check each packet's trailing FCS-16.
    #[arg(long)]
    pub verify_fcs: bool,
    /// Drop the FCS trailer from packets that verify.
    #[arg(long, requires = "verify_fcs")]
    pub strip_fcs: bool,
    /// Maximum decoded packet size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_PACKET)]
    pub max_packet_size: usize,
}

#[derive(Args, Debug)]
pub struct FcsArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
    /// Treat the last two bytes as an FCS trailer and check it.
    #[arg(long, conflicts_with = "append")]
    pub verify: bool,
    /// Print the payload with its FCS trailer appended.
    #[arg(long)]
    pub append: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn resolve_payload(args: &PayloadArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Ok(Vec::new())
}

fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let digits: String = input
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':')
        .collect();

    hex::decode(&digits)
        .map_err(|err| CliError::new(USAGE, format!("invalid hex payload: {err}")))
}
