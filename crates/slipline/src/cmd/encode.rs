use std::fs::File;
use std::io::{self, BufWriter, Write};

use slipline_frame::{encoded_len, fcs, FrameConfig, FrameWriter};

use crate::cmd::{resolve_payload, EncodeArgs};
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let mut payload = resolve_payload(&args.payload)?;
    if args.fcs {
        payload = fcs::append(&payload, fcs::calc(&payload));
    }

    let config = FrameConfig {
        max_packet_size: args.max_packet_size,
    };

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|err| io_error(&format!("failed creating {}", path.display()), err))?;
            write_packet(BufWriter::new(file), config, &payload)?;
        }
        None => write_packet(io::stdout().lock(), config, &payload)?,
    }

    tracing::info!(
        payload = payload.len(),
        wire = encoded_len(&payload),
        fcs = args.fcs,
        "packet encoded"
    );
    Ok(SUCCESS)
}

fn write_packet<W: Write>(sink: W, config: FrameConfig, payload: &[u8]) -> CliResult<()> {
    let mut writer = FrameWriter::with_config(sink, config);
    writer
        .write_packet(payload)
        .map_err(|err| frame_error("write failed", err))
}
