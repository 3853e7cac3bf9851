//! FCS-protected packets over a pipe, with one corrupted packet on the wire.
//!
//! Run with:
//!   cargo run --example fcs-link
//!
//! The same stream can be produced and checked from the CLI:
//!   cargo run --features cli -- encode --data hello --fcs \
//!     | cargo run --features cli -- decode --verify-fcs --strip-fcs

#[cfg(unix)]
use std::io::{BufReader, Write};
#[cfg(unix)]
use std::os::unix::net::UnixStream;
#[cfg(unix)]
use std::thread;

#[cfg(unix)]
use slipline::fcs;
#[cfg(unix)]
use slipline::frame::{FrameReader, FrameWriter};

#[cfg(not(unix))]
fn main() {
    eprintln!("fcs-link needs Unix domain sockets");
}

#[cfg(unix)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = UnixStream::pair()?;

    let sender = thread::spawn(move || -> slipline::frame::Result<()> {
        let mut writer = FrameWriter::new(tx);
        for message in ["hello", "over", "serial"] {
            let payload = fcs::append(message.as_bytes(), fcs::calc(message.as_bytes()));
            writer.write_packet(&payload)?;
        }

        // Flip a payload bit after the FCS was computed.
        let mut damaged = fcs::append(b"noise", fcs::calc(b"noise"));
        damaged[0] ^= 0x20;
        writer.write_packet(&damaged)?;

        writer.get_mut().flush()?;
        Ok(())
    });

    let reader = FrameReader::new(BufReader::new(rx));
    for packet in reader {
        let packet = packet?;
        match fcs::strip(&packet.payload) {
            Some(payload) => eprintln!("ok    {}", String::from_utf8_lossy(payload)),
            None => eprintln!("bad   {} bytes dropped", packet.payload.len()),
        }
    }

    sender.join().map_err(|_| "sender panicked")??;
    Ok(())
}
