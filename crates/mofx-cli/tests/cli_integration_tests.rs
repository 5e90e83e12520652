//! CLI integration tests
//!
//! Run the built binary against small documents written to a temp dir.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const BASELINE: &str = r#"
instance of MSFT_RegistryResource as $r1
{
ResourceID = "[Registry][V-100]::[WindowsServer]BaseLine";
 ValueName = "EnableSmartScreen";
 Ensure = "Present";
 SourceInfo = "C:\\Modules\\PowerStig\\4.10.0\\Registry.ps1";
};
instance of AuditPolicySubcategory as $a1
{
ResourceID = "[AuditPolicy][V-200]::[WindowsServer]BaseLine";
 Name = "Logon";
 AuditFlag = "Success";
};
"#;

fn write_pair(dir: &TempDir) -> (PathBuf, PathBuf) {
    let baseline = dir.path().join("baseline.mof");
    let updated = dir.path().join("updated.mof");
    fs::write(&baseline, BASELINE).unwrap();
    fs::write(
        &updated,
        BASELINE
            .replace(r"PowerStig\\4.10.0", r"PowerStig\\4.26.0")
            .replace("\"Success\"", "\"Failure\""),
    )
    .unwrap();
    (baseline, updated)
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mofx"))
        .current_dir(dir)
        .env_remove("MOFX_CONFIG")
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_compare_reports_statuses() {
    let dir = TempDir::new().unwrap();
    let (baseline, updated) = write_pair(&dir);

    let output = run(
        dir.path(),
        &[
            "compare",
            baseline.to_str().unwrap(),
            updated.to_str().unwrap(),
        ],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("V-100\tVersion Only\tOnly version tokens differ"));
    assert!(stdout.contains("V-200\tDifferent\tAuditFlag: Success vs Failure"));
    assert!(stdout.contains("2 rules compared."));
}

#[test]
fn test_compare_filter_flags() {
    let dir = TempDir::new().unwrap();
    let (baseline, updated) = write_pair(&dir);

    let output = run(
        dir.path(),
        &[
            "compare",
            baseline.to_str().unwrap(),
            updated.to_str().unwrap(),
            "--different",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("V-200\tDifferent"));
    assert!(!stdout.contains("V-100\t"));
}

#[test]
fn test_details_json() {
    let dir = TempDir::new().unwrap();
    let (baseline, updated) = write_pair(&dir);

    let output = run(
        dir.path(),
        &[
            "details",
            baseline.to_str().unwrap(),
            updated.to_str().unwrap(),
            "V-200",
            "--json",
        ],
    );

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["rule_id"], "V-200");
    assert_eq!(value["status"], "Different");
    assert!(value["rows"].as_array().unwrap().len() >= 3);
}

#[test]
fn test_inspect_lists_classes() {
    let dir = TempDir::new().unwrap();
    let (baseline, _) = write_pair(&dir);

    let output = run(dir.path(), &["inspect", baseline.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 instances, 2 rules"));
    assert!(stdout.contains("MSFT_RegistryResource (1 rules)"));
    assert!(stdout.contains("  V-200 [AuditPolicy]"));
}

#[test]
fn test_rule_prints_properties_in_display_order() {
    let dir = TempDir::new().unwrap();
    let (baseline, _) = write_pair(&dir);

    let output = run(dir.path(), &["rule", baseline.to_str().unwrap(), "V-200"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("V-200 [AuditPolicy]\n"));
    assert!(stdout.contains(
        "  ResourceID: [AuditPolicy][V-200]::[WindowsServer]BaseLine\n  AuditFlag: Success\n  Name: Logon\n"
    ));
    assert!(stdout.contains("Instances (1):"));
}

#[test]
fn test_missing_file_exits_nonzero() {
    let dir = TempDir::new().unwrap();

    let output = run(dir.path(), &["rule", "absent.mof", "V-1"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: MOF file not found"));
}

#[test]
fn test_invalid_config_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let (baseline, _) = write_pair(&dir);
    let config = dir.path().join("mofx.toml");
    fs::write(&config, "max_line_len = \"long\"\n").unwrap();

    let output = run(
        dir.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "inspect",
            baseline.to_str().unwrap(),
        ],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid configuration"));
}
