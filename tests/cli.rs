//! End-to-end CLI tests.
//!
//! Every run points `MATHCAP_CONFIG` at a missing file so a user config cannot
//! leak in, and writes into its own temp directory.

use std::path::PathBuf;

use assert_cmd::Command;
use base64::Engine;
use predicates::prelude::*;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("mathcap").unwrap();
    cmd.env("MATHCAP_CONFIG", "/nonexistent/mathcap/config.toml").env_remove("MATHCAP_LOG");
    cmd
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mathcap_cli_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

/// Decode the PNG behind a `data:image/png;base64,` URI.
fn decode_data_uri(uri: &str) -> image::RgbaImage {
    let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload).unwrap();
    assert!(bytes.starts_with(PNG_MAGIC));
    image::load_from_memory(&bytes).unwrap().to_rgba8()
}

#[test]
fn writes_png_and_prints_challenge() {
    let dir = temp_dir("png");
    let path = dir.join("out.png");

    let stdout = stdout_of(cmd().args(["--seed", "1", "-o"]).arg(&path));
    let fields: Vec<&str> = stdout.trim_end().split('\t').collect();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].len(), 20);
    assert!(fields[0].chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(fields[1].ends_with("=?"));
    assert!(fields[2].parse::<i64>().is_ok());

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(PNG_MAGIC));
    let image = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (240, 60));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn reports_saved_path() {
    let dir = temp_dir("saved");
    let path = dir.join("c.png");
    cmd()
        .arg("-o")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved:").and(predicate::str::contains("c.png")));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn auto_names_use_the_id() {
    let dir = temp_dir("auto");
    let stdout = stdout_of(cmd().current_dir(&dir).args(["--seed", "2"]));
    let id = stdout.split('\t').next().unwrap();
    assert!(dir.join(format!("captcha-{id}.png")).exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn count_adds_numbered_suffixes() {
    let dir = temp_dir("count");
    let stdout = stdout_of(cmd().args(["-c", "3", "-o"]).arg(dir.join("batch.png")));
    assert_eq!(stdout.lines().count(), 3);
    for i in 1..=3 {
        assert!(dir.join(format!("batch-{i}.png")).exists());
    }
    assert!(!dir.join("batch.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn json_with_data_uri() {
    let stdout = stdout_of(cmd().args(["--json", "--data-uri", "--seed", "3", "--width", "120", "--height", "40"]));
    let record: serde_json::Value = serde_json::from_str(stdout.trim_end()).unwrap();

    assert_eq!(record["id"].as_str().unwrap().len(), 20);
    assert!(record["question"].as_str().unwrap().ends_with("=?"));
    assert!(record["answer"].is_string());
    assert!(record.get("path").is_none());

    let image = decode_data_uri(record["data_uri"].as_str().unwrap());
    assert_eq!(image.dimensions(), (120, 40));
}

#[test]
fn same_seed_same_output() {
    let args = ["--data-uri", "--seed", "42", "-n", "4", "-l", "hollow", "-l", "slim", "-l", "sine"];
    let first = stdout_of(cmd().args(args));
    let second = stdout_of(cmd().args(args));
    assert_eq!(first, second);

    let third = stdout_of(cmd().args(["--data-uri", "--seed", "43"]));
    assert_ne!(first, third);
}

#[test]
fn operator_and_bound_are_respected() {
    let stdout = stdout_of(cmd().args(["--data-uri", "--json", "-c", "20", "--operator", "+", "-m", "5"]));
    for line in stdout.lines() {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        let question = record["question"].as_str().unwrap();
        let (a, b) = question.strip_suffix("=?").unwrap().split_once('+').unwrap();
        let (a, b): (u32, u32) = (a.parse().unwrap(), b.parse().unwrap());
        assert!(a < 5 && b < 5);
        assert_eq!(record["answer"].as_str().unwrap(), (a + b).to_string());
    }
}

#[test]
fn fixed_background_is_applied() {
    let stdout = stdout_of(cmd().args(["--json", "--data-uri", "-b", "#102030"]));
    let record: serde_json::Value = serde_json::from_str(stdout.trim_end()).unwrap();
    let image = decode_data_uri(record["data_uri"].as_str().unwrap());
    let background = image.pixels().filter(|p| p.0 == [16, 32, 48, 255]).count();
    assert!(background > image.pixels().count() / 2);
}

#[test]
fn trace_records_draw_order() {
    let dir = temp_dir("trace");
    let trace = dir.join("trace.json");

    cmd()
        .args(["--data-uri", "-n", "3", "-l", "hollow", "-l", "slim", "-l", "sine", "--trace"])
        .arg(&trace)
        .assert()
        .success()
        .stderr(predicate::str::contains("Trace saved:"));

    let calls: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&trace).unwrap()).unwrap();
    let names: Vec<&str> = calls.iter().map(|c| c["call"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["hollow_line", "noise", "slim_lines", "sine_line", "text"]);
    assert_eq!(calls[2]["count"], 3);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn config_file_supplies_defaults() {
    let dir = temp_dir("config");
    let config = dir.join("config.toml");
    std::fs::write(
        &config,
        "[captcha]\nwidth = 100\nheight = 30\noperators = [\"*\"]\nmax_num = 4\n",
    )
    .unwrap();

    let stdout = stdout_of(cmd().args(["--json", "--data-uri", "--config"]).arg(&config));
    let record: serde_json::Value = serde_json::from_str(stdout.trim_end()).unwrap();
    assert!(record["question"].as_str().unwrap().contains('x'));
    assert_eq!(decode_data_uri(record["data_uri"].as_str().unwrap()).dimensions(), (100, 30));

    // Flags override the file field by field.
    let stdout = stdout_of(cmd().args(["--json", "--data-uri", "--width", "80", "--config"]).arg(&config));
    let record: serde_json::Value = serde_json::from_str(stdout.trim_end()).unwrap();
    assert_eq!(decode_data_uri(record["data_uri"].as_str().unwrap()).dimensions(), (80, 30));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn font_dir_serves_named_fonts() {
    let dir = temp_dir("font_dir");
    let font = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/DejaVuSans.ttf");
    std::fs::copy(font, dir.join("Custom.ttf")).unwrap();

    cmd().args(["--data-uri", "-f", "Custom.ttf", "--font-dir"]).arg(&dir).assert().success();

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_background_exits_with_error() {
    cmd()
        .args(["--data-uri", "-b", "not-a-color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid argument"));
}

#[test]
fn unknown_font_exits_with_error() {
    cmd()
        .args(["--data-uri", "-f", "Nope.ttf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Font not found: fonts/Nope.ttf"));
}

#[test]
fn zero_width_exits_with_error() {
    cmd()
        .args(["--data-uri", "--width", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Image size must be positive"));
}

#[test]
fn zero_count_exits_with_error() {
    cmd()
        .args(["--data-uri", "-c", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--count must be at least 1"));
}

#[test]
fn zero_max_num_exits_with_error() {
    cmd()
        .args(["--data-uri", "-m", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max-num must be at least 1"));
}

#[test]
fn unparsable_config_exits_with_error() {
    let dir = temp_dir("bad_config");
    let config = dir.join("bad.toml");
    std::fs::write(&config, "this is not valid toml {{{").unwrap();

    cmd()
        .args(["--data-uri", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));

    let _ = std::fs::remove_dir_all(&dir);
}
