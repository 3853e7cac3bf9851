use std::fs::File;
use std::io::{self, BufReader, Read};

use slipline_frame::{fcs, FrameConfig, FrameReader};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_packet, OutputFormat, PacketReport};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let input: Box<dyn Read> = match &args.file {
        Some(path) => Box::new(
            File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?,
        ),
        None => Box::new(io::stdin().lock()),
    };

    let config = FrameConfig {
        max_packet_size: args.max_packet_size,
    };
    let mut reader = FrameReader::with_config(BufReader::new(input), config);

    let mut printed = 0usize;
    let mut failed_fcs = 0usize;

    loop {
        let packet = reader
            .read_packet()
            .map_err(|err| frame_error("read failed", err))?;

        if packet.is_prefix && packet.payload.is_empty() {
            break;
        }
        if packet.is_prefix {
            tracing::warn!(len = packet.payload.len(), "stream ended mid-packet");
        }

        let fcs_ok = args.verify_fcs.then(|| fcs::verify(&packet.payload));
        if fcs_ok == Some(false) {
            failed_fcs += 1;
            tracing::warn!(index = printed, "FCS mismatch");
        }

        let payload = match fcs::strip(&packet.payload) {
            Some(stripped) if args.strip_fcs => stripped,
            _ => &packet.payload[..],
        };

        print_packet(
            &PacketReport {
                index: printed,
                payload,
                is_prefix: packet.is_prefix,
                fcs_ok,
            },
            format,
        );
        printed += 1;

        if packet.is_prefix {
            break;
        }
        if let Some(count) = args.count {
            if printed >= count {
                break;
            }
        }
    }

    tracing::info!(packets = printed, failed_fcs, "decode finished");

    if failed_fcs > 0 {
        return Err(CliError::new(
            DATA_INVALID,
            format!("{failed_fcs} of {printed} packet(s) failed FCS verification"),
        ));
    }
    Ok(SUCCESS)
}
