//! Integration tests for the seamline CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get a seamline command with a clean environment
fn seamline() -> Command {
    let mut cmd = Command::cargo_bin("seamline").unwrap();
    cmd.env_remove("SEAMLINE_AUTHOR");
    cmd.env_remove("SEAMLINE_USER_ID");
    cmd.env_remove("SEAMLINE_ROLE");
    cmd.env_remove("SEAMLINE_TOLERANCE");
    cmd
}

/// Helper to create a test workspace in a temp directory
fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    seamline()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp
}

fn extract_id(output: &std::process::Output, prefix: &str) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .split_whitespace()
        .find(|w| w.starts_with(prefix))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Helper to create a test style, returning its ID
fn create_style(tmp: &TempDir, title: &str) -> String {
    let output = seamline()
        .current_dir(tmp.path())
        .args([
            "style",
            "new",
            "--title",
            title,
            "--role",
            "merchandiser",
            "--author",
            "Mina Rahman",
        ])
        .output()
        .unwrap();
    let id = extract_id(&output, "STYLE-");
    assert!(!id.is_empty(), "no style id in output");
    id
}

/// Helper to create a test inspection, returning its ID
fn create_inspection(tmp: &TempDir, style_id: &str) -> String {
    let output = seamline()
        .current_dir(tmp.path())
        .args([
            "inspect",
            "new",
            "--style",
            style_id,
            "--type",
            "Final Inspection",
            "--role",
            "qc",
            "--author",
            "Karim Uddin",
        ])
        .output()
        .unwrap();
    let id = extract_id(&output, "INSP-");
    assert!(!id.is_empty(), "no inspection id in output");
    id
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    seamline()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("garment production documents"));
}

#[test]
fn test_version_displays() {
    seamline()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("seamline"));
}

#[test]
fn test_init_creates_workspace() {
    let tmp = TempDir::new().unwrap();
    seamline()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized seamline workspace"));

    assert!(tmp.path().join(".seamline/config.yaml").is_file());
    assert!(tmp.path().join("styles").is_dir());
    assert!(tmp.path().join("inspections").is_dir());
}

#[test]
fn test_init_refuses_existing_workspace() {
    let tmp = setup_workspace();
    seamline()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_commands_require_workspace() {
    let tmp = TempDir::new().unwrap();
    seamline()
        .current_dir(tmp.path())
        .args(["style", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("workspace"));
}

// ============================================================================
// Style Tests
// ============================================================================

#[test]
fn test_style_new_and_list() {
    let tmp = setup_workspace();
    let id = create_style(&tmp, "Crew Neck Sweater");

    seamline()
        .current_dir(tmp.path())
        .args(["style", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Crew Neck Sweater"))
        .stdout(predicate::str::contains("1 style(s) found"));

    seamline()
        .current_dir(tmp.path())
        .args(["style", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tech Pack"))
        .stdout(predicate::str::contains("DRAFT"));
}

// ============================================================================
// Workflow Tests
// ============================================================================

#[test]
fn test_submit_and_approve_style_section() {
    let tmp = setup_workspace();
    let id = create_style(&tmp, "Cardigan");

    // Merchandiser submits the tech pack
    seamline()
        .current_dir(tmp.path())
        .args([
            "submit", &id, "--section", "tech_pack", "-y",
            "--role", "merchandiser", "--author", "Mina Rahman",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRAFT"))
        .stdout(predicate::str::contains("SUBMITTED"))
        .stdout(predicate::str::contains("locked"));

    // Director approves
    seamline()
        .current_dir(tmp.path())
        .args([
            "approve", &id, "--section", "tech_pack", "-y",
            "--role", "director", "--author", "Farhan Ahmed",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("APPROVED"));

    // History shows both actions
    seamline()
        .current_dir(tmp.path())
        .args(["history", &id, "--section", "tech_pack"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SUBMIT"))
        .stdout(predicate::str::contains("APPROVE"))
        .stdout(predicate::str::contains("2 action(s)"));

    // Request revision reopens the section
    seamline()
        .current_dir(tmp.path())
        .args([
            "revise", &id, "--section", "tech_pack",
            "--role", "merchandiser", "--author", "Mina Rahman",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRAFT"));
}

#[test]
fn test_viewer_cannot_submit() {
    let tmp = setup_workspace();
    let id = create_style(&tmp, "Polo");

    seamline()
        .current_dir(tmp.path())
        .args([
            "submit", &id, "--section", "tech_pack", "-y",
            "--role", "viewer", "--author", "Guest",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not permitted"));
}

#[test]
fn test_approve_from_draft_is_illegal() {
    let tmp = setup_workspace();
    let id = create_style(&tmp, "Tee");

    seamline()
        .current_dir(tmp.path())
        .args([
            "approve", &id, "--section", "tech_pack", "-y",
            "--role", "director", "--author", "Farhan Ahmed",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid from status DRAFT"));
}

#[test]
fn test_reject_requires_comment() {
    let tmp = setup_workspace();
    let id = create_style(&tmp, "Hoodie");

    seamline()
        .current_dir(tmp.path())
        .args([
            "submit", &id, "--section", "order_sheet", "-y",
            "--role", "merchandiser", "--author", "Mina Rahman",
        ])
        .assert()
        .success();

    // Whitespace-only comment is refused
    seamline()
        .current_dir(tmp.path())
        .args([
            "reject", &id, "--section", "order_sheet", "-y", "-r", "   ",
            "--role", "director", "--author", "Farhan Ahmed",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejection comment"));

    // A real comment succeeds and is recorded
    seamline()
        .current_dir(tmp.path())
        .args([
            "reject", &id, "--section", "order_sheet", "-y", "-r", "fix seams",
            "--role", "director", "--author", "Farhan Ahmed",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("REJECTED"))
        .stdout(predicate::str::contains("fix seams"));

    seamline()
        .current_dir(tmp.path())
        .args(["history", &id, "--section", "order_sheet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fix seams"));

    // The submitter can resubmit after rework
    seamline()
        .current_dir(tmp.path())
        .args([
            "submit", &id, "--section", "order_sheet", "-y",
            "--role", "merchandiser", "--author", "Mina Rahman",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SUBMITTED"));
}

#[test]
fn test_recall_returns_to_draft() {
    let tmp = setup_workspace();
    let style_id = create_style(&tmp, "Jumper");
    let insp_id = create_inspection(&tmp, &style_id);

    seamline()
        .current_dir(tmp.path())
        .args([
            "submit", &insp_id, "-y",
            "--role", "qc", "--author", "Karim Uddin",
        ])
        .assert()
        .success();

    seamline()
        .current_dir(tmp.path())
        .args([
            "recall", &insp_id,
            "--role", "qc", "--author", "Karim Uddin",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRAFT"));
}

// ============================================================================
// Measurement Table Tests
// ============================================================================

#[test]
fn test_measurement_table_editing() {
    let tmp = setup_workspace();
    let style_id = create_style(&tmp, "Knit Dress");
    let insp_id = create_inspection(&tmp, &style_id);

    let qc = ["--role", "qc", "--author", "Karim Uddin"];

    seamline()
        .current_dir(tmp.path())
        .args(["measure", "add-size", &insp_id, "M"])
        .args(qc)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 group(s)"));

    seamline()
        .current_dir(tmp.path())
        .args(["measure", "add-point", &insp_id, "Chest Width", "--plus", "0.5", "--minus", "0.5"])
        .args(qc)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 point(s)"));

    seamline()
        .current_dir(tmp.path())
        .args(["measure", "set-standard", &insp_id, "Chest Width", "M", "50"])
        .args(qc)
        .assert()
        .success();

    seamline()
        .current_dir(tmp.path())
        .args(["measure", "set-actual", &insp_id, "Chest Width", "M", "51"])
        .args(qc)
        .assert()
        .success();

    // Deviation 1.0 against a 0.5 band is out of tolerance
    seamline()
        .current_dir(tmp.path())
        .args(["measure", "show", &insp_id])
        .args(qc)
        .assert()
        .success()
        .stdout(predicate::str::contains("OUT"))
        .stdout(predicate::str::contains("1 cell(s) out of tolerance"));
}

#[test]
fn test_locked_inspection_refuses_edits() {
    let tmp = setup_workspace();
    let style_id = create_style(&tmp, "Vest");
    let insp_id = create_inspection(&tmp, &style_id);

    seamline()
        .current_dir(tmp.path())
        .args(["submit", &insp_id, "-y", "--role", "qc", "--author", "Karim Uddin"])
        .assert()
        .success();

    seamline()
        .current_dir(tmp.path())
        .args(["measure", "add-size", &insp_id, "M", "--role", "qc", "--author", "Karim Uddin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));

    seamline()
        .current_dir(tmp.path())
        .args([
            "defect", "add", &insp_id, "-d", "Loose thread", "--minor", "1",
            "--role", "qc", "--author", "Karim Uddin",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));
}

#[test]
fn test_merchandiser_cannot_edit_inspections() {
    let tmp = setup_workspace();
    let style_id = create_style(&tmp, "Scarf");
    let insp_id = create_inspection(&tmp, &style_id);

    seamline()
        .current_dir(tmp.path())
        .args([
            "measure", "add-size", &insp_id, "M",
            "--role", "merchandiser", "--author", "Mina Rahman",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("full access is required"));
}

// ============================================================================
// Defect and Judgement Tests
// ============================================================================

#[test]
fn test_defect_judgement_flow() {
    let tmp = setup_workspace();
    let style_id = create_style(&tmp, "Beanie");
    let insp_id = create_inspection(&tmp, &style_id);

    let qc = ["--role", "qc", "--author", "Karim Uddin"];

    seamline()
        .current_dir(tmp.path())
        .args([
            "defect", "set-thresholds", &insp_id,
            "--critical", "0", "--major", "5", "--minor", "5",
        ])
        .args(qc)
        .assert()
        .success();

    // One critical over a zero allowance rejects the lot
    seamline()
        .current_dir(tmp.path())
        .args(["defect", "add", &insp_id, "-d", "Hole in fabric", "--critical", "1"])
        .args(qc)
        .assert()
        .success()
        .stdout(predicate::str::contains("REJECTED"));

    seamline()
        .current_dir(tmp.path())
        .args(["judge", &insp_id])
        .args(qc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Critical: 1/0"))
        .stdout(predicate::str::contains("REJECTED"));

    // Raising the allowance flips the verdict
    seamline()
        .current_dir(tmp.path())
        .args(["defect", "set-thresholds", &insp_id, "--critical", "1"])
        .args(qc)
        .assert()
        .success()
        .stdout(predicate::str::contains("ACCEPTED"));

    seamline()
        .current_dir(tmp.path())
        .args(["defect", "list", &insp_id])
        .args(qc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hole in fabric"))
        .stdout(predicate::str::contains("ACCEPTED"));
}

#[test]
fn test_new_inspection_is_pending() {
    let tmp = setup_workspace();
    let style_id = create_style(&tmp, "Socks");
    let insp_id = create_inspection(&tmp, &style_id);

    // No defect rows yet: the verdict stays PENDING
    seamline()
        .current_dir(tmp.path())
        .args(["judge", &insp_id, "--role", "qc", "--author", "Karim Uddin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PENDING"));
}

#[test]
fn test_phase_clone_resets_verdict() {
    let tmp = setup_workspace();
    let style_id = create_style(&tmp, "Gloves");
    let insp_id = create_inspection(&tmp, &style_id);

    let qc = ["--role", "qc", "--author", "Karim Uddin"];

    seamline()
        .current_dir(tmp.path())
        .args(["defect", "add", &insp_id, "-d", "Shading", "--minor", "1"])
        .args(qc)
        .assert()
        .success()
        .stdout(predicate::str::contains("REJECTED"));

    let output = seamline()
        .current_dir(tmp.path())
        .args(["inspect", "phase", &insp_id, "--name", "Re-inspection"])
        .args(qc)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PENDING"));
    let phase_id = stdout
        .split_whitespace()
        .find(|w| w.starts_with("INSP-") && !insp_id.starts_with(w))
        .map(|s| s.to_string())
        .unwrap();

    // The clone carries the defect data but a PENDING verdict
    seamline()
        .current_dir(tmp.path())
        .args(["defect", "list", &phase_id])
        .args(qc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Shading"))
        .stdout(predicate::str::contains("PENDING"));
}

// ============================================================================
// Access Policy Tests
// ============================================================================

#[test]
fn test_access_matrix_and_check() {
    let tmp = setup_workspace();

    seamline()
        .current_dir(tmp.path())
        .args(["access", "matrix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Super Admin"))
        .stdout(predicate::str::contains("Role Management"));

    seamline()
        .current_dir(tmp.path())
        .args(["access", "check", "qc", "qc_inspect", "--level", "full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("allowed"));

    seamline()
        .current_dir(tmp.path())
        .args(["access", "check", "viewer", "tech_pack", "--level", "full"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("denied"));
}

// ============================================================================
// Validation and Export Tests
// ============================================================================

#[test]
fn test_validate_workspace_documents() {
    let tmp = setup_workspace();
    let style_id = create_style(&tmp, "Pullover");
    let _insp_id = create_inspection(&tmp, &style_id);

    seamline()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 document(s) valid"));
}

#[test]
fn test_export_csv() {
    let tmp = setup_workspace();
    let style_id = create_style(&tmp, "Tank Top");
    let insp_id = create_inspection(&tmp, &style_id);

    let qc = ["--role", "qc", "--author", "Karim Uddin"];

    seamline()
        .current_dir(tmp.path())
        .args(["measure", "add-size", &insp_id, "M"])
        .args(qc)
        .assert()
        .success();
    seamline()
        .current_dir(tmp.path())
        .args(["measure", "add-point", &insp_id, "Chest Width"])
        .args(qc)
        .assert()
        .success();
    seamline()
        .current_dir(tmp.path())
        .args(["defect", "add", &insp_id, "-d", "Stain", "--major", "1"])
        .args(qc)
        .assert()
        .success();

    seamline()
        .current_dir(tmp.path())
        .args(["export", &insp_id])
        .args(qc)
        .assert()
        .success()
        .stdout(predicate::str::contains("record,point,size,color"))
        .stdout(predicate::str::contains("measurement,Chest Width,M,Standard"))
        .stdout(predicate::str::contains("defect,Stain"));
}
