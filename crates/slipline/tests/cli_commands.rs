#![cfg(feature = "cli")]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use slipline_frame::{fcs, FrameReader, FrameWriter, END, ESC, ESC_END, ESC_ESC};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "slipline-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn slipline(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_slipline"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("slipline should start");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin)
        .expect("stdin should be writable");

    child.wait_with_output().expect("slipline should exit")
}

fn frame(payload: &[u8]) -> Vec<u8> {
    let mut writer = FrameWriter::new(Vec::new());
    writer.write_packet(payload).expect("packet should encode");
    writer.into_inner()
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8(output.stdout.clone())
        .expect("stdout should be utf-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect()
}

#[test]
fn encode_writes_delimited_packet() {
    let output = slipline(&["encode", "--hex", "01 02 03"], &[]);

    assert!(output.status.success());
    assert_eq!(output.stdout, vec![END, 1, 2, 3, END]);
}

#[test]
fn encode_escapes_special_bytes() {
    let output = slipline(&["encode", "--hex", "c0db"], &[]);

    assert!(output.status.success());
    assert_eq!(output.stdout, vec![END, ESC, ESC_END, ESC, ESC_ESC, END]);
}

#[test]
fn encode_with_fcs_appends_verifiable_trailer() {
    let output = slipline(&["encode", "--data", "Hallo!", "--fcs"], &[]);
    assert!(output.status.success());

    let expected = fcs::append(b"Hallo!", fcs::calc(b"Hallo!"));
    assert_eq!(output.stdout, frame(&expected));

    let packet = FrameReader::new(output.stdout.as_slice())
        .read_packet()
        .expect("packet should decode");
    assert!(!packet.is_prefix);
    assert!(fcs::verify(&packet.payload));
}

#[test]
fn encode_to_file() {
    let dir = unique_temp_dir("encode-file");
    let path = dir.join("packet.slip");

    let output = slipline(
        &["encode", "--data", "abc", "--output", path.to_str().unwrap()],
        &[],
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        std::fs::read(&path).expect("packet file should exist"),
        vec![END, b'a', b'b', b'c', END]
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn encode_rejects_oversized_payload() {
    let output = slipline(
        &["encode", "--data", "too long", "--max-packet-size", "4"],
        &[],
    );

    assert_eq!(output.status.code(), Some(60));
    assert!(output.stdout.is_empty());
}

#[test]
fn decode_reports_packets_as_json() {
    let mut stream = vec![END, END, b'h', b'i', END];
    stream.extend_from_slice(&[ESC, ESC_END, END]);
    stream.extend_from_slice(&[7, 8]);

    let output = slipline(&["--format", "json", "decode"], &stream);
    assert!(output.status.success());

    let packets = json_lines(&output);
    assert_eq!(packets.len(), 3);

    assert_eq!(packets[0]["hex"], "6869");
    assert_eq!(packets[0]["text"], "hi");
    assert_eq!(packets[0]["is_prefix"], false);

    assert_eq!(packets[1]["hex"], "c0");
    assert_eq!(packets[1]["is_prefix"], false);

    assert_eq!(packets[2]["hex"], "0708");
    assert_eq!(packets[2]["is_prefix"], true);
    assert!(packets[2].get("fcs_ok").is_none());
}

#[test]
fn decode_count_stops_early() {
    let stream = [END, 1, END, 2, END, 3, END];
    let output = slipline(&["--format", "json", "decode", "--count", "2"], &stream);

    assert!(output.status.success());
    assert_eq!(json_lines(&output).len(), 2);
}

#[test]
fn decode_raw_concatenates_payloads() {
    let stream = [END, b'a', END, END, b'b', ESC, ESC_ESC, END];
    let output = slipline(&["--format", "raw", "decode"], &stream);

    assert!(output.status.success());
    assert_eq!(output.stdout, vec![b'a', b'b', ESC]);
}

#[test]
fn decode_verifies_and_strips_fcs() {
    let stream = frame(&fcs::append(b"ok", fcs::calc(b"ok")));

    let output = slipline(
        &["--format", "json", "decode", "--verify-fcs", "--strip-fcs"],
        &stream,
    );
    assert!(output.status.success());

    let packets = json_lines(&output);
    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0]["fcs_ok"], true);
    assert_eq!(packets[0]["text"], "ok");
    assert_eq!(packets[0]["size"], 2);
}

#[test]
fn decode_fails_on_bad_fcs() {
    let stream = [END, b'b', b'a', b'd', END];
    let output = slipline(&["--format", "json", "decode", "--verify-fcs"], &stream);

    assert_eq!(output.status.code(), Some(60));
    let packets = json_lines(&output);
    assert_eq!(packets[0]["fcs_ok"], false);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed FCS verification"), "stderr: {stderr}");
}

#[test]
fn decode_reads_from_file() {
    let dir = unique_temp_dir("decode-file");
    let path = dir.join("stream.slip");
    std::fs::write(&path, [END, 0x41, END]).expect("stream file should be writable");

    let output = slipline(
        &[
            "--format",
            "json",
            "decode",
            "--file",
            path.to_str().unwrap(),
        ],
        &[],
    );

    assert!(output.status.success());
    assert_eq!(json_lines(&output)[0]["text"], "A");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn encode_decode_pipeline_roundtrip() {
    let encoded = slipline(&["encode", "--hex", "00 c0 db dc dd ff"], &[]);
    assert!(encoded.status.success());

    let decoded = slipline(&["--format", "raw", "decode"], &encoded.stdout);
    assert!(decoded.status.success());
    assert_eq!(decoded.stdout, vec![0x00, END, ESC, ESC_END, ESC_ESC, 0xff]);
}

#[test]
fn fcs_calc_json() {
    let output = slipline(&["--format", "json", "fcs", "--data", "123456789"], &[]);
    assert!(output.status.success());

    let reports = json_lines(&output);
    let report = &reports[0];
    assert_eq!(report["size"], 9);
    assert_eq!(report["fcs"], "0x6f91");
    assert!(report.get("valid").is_none());
}

#[test]
fn fcs_verify_exit_codes() {
    let ok = slipline(
        &[
            "--format",
            "json",
            "fcs",
            "--hex",
            "644500 0101ba1b 02ff2be4 402c",
            "--verify",
        ],
        &[],
    );
    assert!(ok.status.success());
    assert_eq!(json_lines(&ok)[0]["valid"], true);

    let bad = slipline(&["--format", "json", "fcs", "--data", "Hallo!", "--verify"], &[]);
    assert_eq!(bad.status.code(), Some(1));
    assert_eq!(json_lines(&bad)[0]["valid"], false);
}

#[test]
fn fcs_append_raw() {
    let output = slipline(&["--format", "raw", "fcs", "--hex", "0102030405", "--append"], &[]);

    assert!(output.status.success());
    assert_eq!(output.stdout.len(), 7);
    assert!(fcs::verify(&output.stdout));
}

#[test]
fn fcs_raw_prints_trailer_bytes() {
    let output = slipline(&["--format", "raw", "fcs", "--hex", "0102030405"], &[]);
    assert!(output.status.success());

    let payload = [1u8, 2, 3, 4, 5];
    let appended = fcs::append(&payload, fcs::calc(&payload));
    assert_eq!(output.stdout, appended[5..]);
}

#[test]
fn encode_rejects_malformed_hex() {
    let output = slipline(&["encode", "--hex", "c0 0g"], &[]);

    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid hex payload"), "stderr: {stderr}");
}

#[test]
fn decode_rejects_oversized_packet() {
    let mut stream = frame(b"oversized");
    stream.extend_from_slice(&frame(b"next"));

    let output = slipline(
        &["--format", "json", "decode", "--max-packet-size", "4"],
        &stream,
    );

    assert_eq!(output.status.code(), Some(60));
    assert!(json_lines(&output).is_empty());
}

#[test]
fn version_prints_name() {
    let output = slipline(&["version"], &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("slipline "));
}
