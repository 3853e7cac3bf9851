use slipline_frame::fcs;

use crate::cmd::{resolve_payload, FcsArgs};
use crate::exit::{CliResult, FAILURE, SUCCESS};
use crate::output::{print_fcs, FcsReport, OutputFormat};

pub fn run(args: FcsArgs, format: OutputFormat) -> CliResult<i32> {
    let data = resolve_payload(&args.payload)?;

    if args.verify {
        let valid = fcs::verify(&data);
        print_fcs(
            &FcsReport {
                size: data.len(),
                fcs: fcs::calc(&data),
                valid: Some(valid),
                appended: None,
            },
            format,
        );
        return Ok(if valid { SUCCESS } else { FAILURE });
    }

    let value = fcs::calc(&data);
    let appended = args.append.then(|| fcs::append(&data, value));
    print_fcs(
        &FcsReport {
            size: data.len(),
            fcs: value,
            valid: None,
            appended: appended.as_deref(),
        },
        format,
    );
    Ok(SUCCESS)
}
