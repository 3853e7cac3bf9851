mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "slipline", version, about = "SLIP framing and FCS-16 tool")]
struct Cli {
    /// Output format for reports (stdout).
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        env = "SLIPLINE_LOG_LEVEL",
        default_value = "warn",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode_subcommand() {
        let cli = Cli::try_parse_from(["slipline", "encode", "--data", "hello", "--fcs"])
            .expect("encode args should parse");

        match cli.command {
            Command::Encode(args) => {
                assert!(args.fcs);
                assert_eq!(args.payload.data.as_deref(), Some("hello"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_conflicting_payload_args() {
        let err = Cli::try_parse_from(["slipline", "encode", "--hex", "c0", "--data", "hello"])
            .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn strip_fcs_requires_verify() {
        let err = Cli::try_parse_from(["slipline", "decode", "--strip-fcs"])
            .expect_err("--strip-fcs alone should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_decode_with_global_format() {
        let cli = Cli::try_parse_from([
            "slipline",
            "decode",
            "--count",
            "2",
            "--verify-fcs",
            "--format",
            "json",
        ])
        .expect("decode args should parse");

        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        assert!(matches!(cli.command, Command::Decode(_)));
    }

    #[test]
    fn fcs_verify_and_append_conflict() {
        let err = Cli::try_parse_from(["slipline", "fcs", "--data", "x", "--verify", "--append"])
            .expect_err("--verify and --append should conflict");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
