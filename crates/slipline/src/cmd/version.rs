use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("slipline {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: slipline");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("SLIPLINE_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "rustc: {}",
        option_env!("RUSTC_VERSION").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "slip: END=0x{:02x} ESC=0x{:02x} ESC_END=0x{:02x} ESC_ESC=0x{:02x}",
        slipline_frame::END,
        slipline_frame::ESC,
        slipline_frame::ESC_END,
        slipline_frame::ESC_ESC
    );
    println!(
        "fcs: initial=0x{:04x} good=0x{:04x}",
        slipline_frame::FCS_INITIAL,
        slipline_frame::FCS_GOOD
    );

    Ok(SUCCESS)
}
