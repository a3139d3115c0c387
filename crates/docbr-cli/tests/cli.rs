use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Run the binary with its config directory pointed at `home`.
fn docbr(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("docbr").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path());
    cmd
}

#[test]
fn test_parse_cpf_text() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cpf.txt");
    fs::write(
        &input,
        "CADASTRO DE PESSOAS FÍSICAS\n123.456.789-09\nNOME\nJOÃO DA SILVA\nDATA DE NASCIMENTO\n01/02/1990\n",
    )
    .unwrap();

    docbr(&dir)
        .args(["parse", "--document", "cpf"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\":\"joão da silva\""))
        .stdout(predicate::str::contains("\"nascimento\":\"01/02/1990\""));
}

#[test]
fn test_parse_from_stdin() {
    let dir = TempDir::new().unwrap();

    docbr(&dir)
        .args(["parse", "--document", "medical", "-"])
        .write_stdin("CID-10: J11\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cid_10\":\"J11\""));
}

#[test]
fn test_parse_csv_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("crlv.txt");
    fs::write(&input, "PLACA EXERCÍCIO\nABC1D23 2024\n").unwrap();

    docbr(&dir)
        .args(["parse", "--document", "crlv", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("crlv.txt,plate_year.plate,abc1d23"))
        .stdout(predicate::str::contains("crlv.txt,plate_year.year,2024"));
}

#[test]
fn test_extract_rejects_non_pdf() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("scan.txt");
    fs::write(&input, "not a pdf").unwrap();

    docbr(&dir)
        .args(["extract", "--document", "vehicle"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only PDF files are allowed"))
        .stderr(predicate::str::contains("400"));
}

#[test]
fn test_extract_reports_processing_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.pdf");
    fs::write(&input, "garbage").unwrap();

    docbr(&dir)
        .args(["extract", "--document", "cpf"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error processing PDF"));
}

#[test]
fn test_extract_requires_document() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.pdf");
    fs::write(&input, "garbage").unwrap();

    docbr(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No document type given"));
}

#[test]
fn test_unknown_document_is_rejected() {
    let dir = TempDir::new().unwrap();

    docbr(&dir)
        .args(["parse", "--document", "passport", "-"])
        .assert()
        .failure();
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();

    docbr(&dir)
        .args(["parse", "--document", "cpf"])
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_config_show_defaults() {
    let dir = TempDir::new().unwrap();

    docbr(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"backend\": \"layout\""));
}

#[test]
fn test_config_set_then_get() {
    let dir = TempDir::new().unwrap();

    docbr(&dir)
        .args(["config", "set", "text.backend", "fast"])
        .assert()
        .success();

    assert!(dir.path().join("docbr").join("config.json").exists());

    docbr(&dir)
        .args(["config", "get", "text.backend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fast\""));
}

#[test]
fn test_config_set_rejects_invalid_value() {
    let dir = TempDir::new().unwrap();

    docbr(&dir)
        .args(["config", "set", "text.backend", "ocr"])
        .assert()
        .failure();

    docbr(&dir)
        .args(["config", "set", "text.nonexistent", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.json");

    docbr(&dir)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    docbr(&dir)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_honours_global_path() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("custom.json");

    docbr(&dir)
        .arg("-c")
        .arg(&custom)
        .args(["config", "set", "output.pretty", "true"])
        .assert()
        .success();

    assert!(custom.exists());
    assert!(!dir.path().join("docbr").join("config.json").exists());

    docbr(&dir)
        .arg("-c")
        .arg(&custom)
        .args(["config", "get", "output.pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));
}

#[test]
fn test_batch_summary_records_failures() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("inputs");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("notes.txt"), "text").unwrap();
    fs::write(inputs.join("broken.pdf"), "garbage").unwrap();

    let pattern = inputs.join("*");
    docbr(&dir)
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .args(["--document", "cpf", "--summary", "--continue-on-error", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 successful"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("notes.txt,error"));
    assert!(summary.contains("Only PDF files are allowed"));
    assert!(summary.contains("broken.pdf,error"));
    assert!(summary.contains("Error processing PDF"));
}

#[test]
fn test_batch_stops_on_first_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("only.txt"), "text").unwrap();

    let pattern = dir.path().join("*.txt");
    docbr(&dir)
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("400"));
}
