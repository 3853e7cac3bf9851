use std::fmt::Write as _;
use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One decoded packet as shown to the user.
pub struct PacketReport<'a> {
    pub index: usize,
    pub payload: &'a [u8],
    pub is_prefix: bool,
    /// `None` when FCS verification was not requested.
    pub fcs_ok: Option<bool>,
}

#[derive(Serialize)]
struct PacketOutput<'a> {
    index: usize,
    size: usize,
    is_prefix: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fcs_ok: Option<bool>,
    hex: String,
    text: Option<&'a str>,
}

pub fn print_packet(report: &PacketReport<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = PacketOutput {
                index: report.index,
                size: report.payload.len(),
                is_prefix: report.is_prefix,
                fcs_ok: report.fcs_ok,
                hex: hex::encode(report.payload),
                text: std::str::from_utf8(report.payload).ok(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "SIZE", "COMPLETE", "FCS", "PAYLOAD"])
                .add_row(vec![
                    report.index.to_string(),
                    report.payload.len().to_string(),
                    yes_no(!report.is_prefix).to_string(),
                    fcs_label(report.fcs_ok).to_string(),
                    payload_preview(report.payload),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "packet={} size={} complete={} fcs={} payload={}",
                report.index,
                report.payload.len(),
                yes_no(!report.is_prefix),
                fcs_label(report.fcs_ok),
                payload_preview(report.payload)
            );
        }
        OutputFormat::Raw => {
            print_raw(report.payload);
        }
    }
}

/// Result of an `fcs` subcommand.
pub struct FcsReport<'a> {
    pub size: usize,
    pub fcs: u16,
    /// Set when verification was requested.
    pub valid: Option<bool>,
    /// Payload with trailer, set when `--append` was requested.
    pub appended: Option<&'a [u8]>,
}

#[derive(Serialize)]
struct FcsOutput {
    size: usize,
    fcs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    appended: Option<String>,
}

pub fn print_fcs(report: &FcsReport<'_>, format: OutputFormat) {
    let fcs = format!("0x{:04x}", report.fcs);
    match format {
        OutputFormat::Json => {
            let out = FcsOutput {
                size: report.size,
                fcs,
                valid: report.valid,
                appended: report.appended.map(hex::encode),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut header = vec!["SIZE", "FCS"];
            let mut row = vec![report.size.to_string(), fcs];
            if let Some(valid) = report.valid {
                header.push("VALID");
                row.push(yes_no(valid).to_string());
            }
            if let Some(appended) = report.appended {
                header.push("APPENDED");
                row.push(hex::encode(appended));
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(header)
                .add_row(row);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let mut line = format!("size={} fcs={fcs}", report.size);
            if let Some(valid) = report.valid {
                let _ = write!(line, " valid={}", yes_no(valid));
            }
            if let Some(appended) = report.appended {
                let _ = write!(line, " appended={}", hex::encode(appended));
            }
            println!("{line}");
        }
        OutputFormat::Raw => match report.appended {
            Some(appended) => print_raw(appended),
            None => print_raw(&slipline_frame::fcs::trailer(report.fcs)),
        },
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn fcs_label(fcs_ok: Option<bool>) -> &'static str {
    match fcs_ok {
        Some(true) => "ok",
        Some(false) => "bad",
        None => "-",
    }
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) if !text.chars().any(char::is_control) => text.to_string(),
        _ => format!("<hex {}>", hex::encode(payload)),
    }
}
