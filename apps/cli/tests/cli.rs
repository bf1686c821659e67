use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::path::Path;
use tempfile::TempDir;

const COURSE: &str = "course-v1:edX+DemoX+2026";

/// Runs the binary inside `dir`, storing data below `dir/data`.
fn studio(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_studio"));
    cmd.current_dir(dir).arg("--data-dir").arg(dir.join("data")).args(["--course", COURSE]);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn no_arguments_prints_usage() {
    Command::new(env!("CARGO_BIN_EXE_studio"))
        .assert()
        .failure()
        .stderr(contains("Usage"));
}

#[test]
fn invalid_course_key_is_rejected() {
    let tmp = TempDir::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_studio"))
        .current_dir(tmp.path())
        .args(["--course", "not a course", "modules", "list"])
        .assert()
        .failure()
        .stderr(contains("not a course"));
}

#[test]
fn configurations_require_the_split_test_module() {
    let tmp = TempDir::new().unwrap();

    studio(tmp.path()).args(["configs", "list"]).assert().failure().stderr(contains("Feature disabled"));

    studio(tmp.path())
        .args(["modules", "enable", "split_test"])
        .assert()
        .success()
        .stdout("Module 'split_test' enabled.\n");
    studio(tmp.path())
        .args(["configs", "list"])
        .assert()
        .success()
        .stdout(contains("You haven't created any group configurations yet."));
}

#[test]
fn invalid_configurations_are_not_saved() {
    let tmp = TempDir::new().unwrap();
    studio(tmp.path()).args(["modules", "enable", "split_test"]).assert().success();

    studio(tmp.path())
        .args(["configs", "create"])
        .assert()
        .failure()
        .stderr(contains("Group Configuration name is required"));
    studio(tmp.path())
        .args(["configs", "create", "--name", "Solo", "--group", "Only"])
        .assert()
        .failure()
        .stderr(contains("There must be at least two groups"));
    studio(tmp.path())
        .args(["configs", "create", "--name", "Blank", "--group", "A", "--group", ""])
        .assert()
        .failure()
        .stderr(contains("All groups must have a name"));

    studio(tmp.path())
        .args(["configs", "list"])
        .assert()
        .success()
        .stdout(contains("You haven't created any group configurations yet."));
}

#[test]
fn split_test_lifecycle() {
    let tmp = TempDir::new().unwrap();
    studio(tmp.path()).args(["modules", "enable", "split_test"]).assert().success();

    studio(tmp.path())
        .args(["configs", "create", "--name", "Color", "--description", "Button colors"])
        .assert()
        .success()
        .stdout(contains("Group configuration 0 created.").and(contains("[1] Group B")));

    let created = stdout_of(studio(tmp.path()).args(["split-test", "create", "Button test"]));
    let block = created
        .strip_prefix("Split test ")
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap()
        .to_owned();

    studio(tmp.path())
        .args(["split-test", "show", &block])
        .assert()
        .success()
        .stdout(contains("You must select a group configuration for this content experiment."));

    studio(tmp.path())
        .args(["split-test", "select", &block, "0"])
        .assert()
        .success()
        .stdout(
            contains("This content experiment uses group configuration 'Color'.")
                .and(contains("Active groups:"))
                .and(contains("Missing groups:").not()),
        );

    studio(tmp.path())
        .args(["configs", "list"])
        .assert()
        .success()
        .stdout(contains("50% per group").and(contains("used by: Button test")));

    studio(tmp.path())
        .args(["configs", "edit", "0", "--add-group", "--rename", "0=Red"])
        .assert()
        .success()
        .stdout(contains("Group configuration 0 saved.").and(contains("[2] Group C")));

    studio(tmp.path())
        .args(["split-test", "show", &block])
        .assert()
        .success()
        .stdout(contains("Missing groups:\n    Group C\n"));

    studio(tmp.path())
        .args(["split-test", "add-missing", &block])
        .assert()
        .success()
        .stdout(contains("Added 1 group(s)."));
    studio(tmp.path())
        .args(["split-test", "add-missing", &block])
        .assert()
        .success()
        .stdout("Added 0 group(s).\n");

    studio(tmp.path())
        .args(["split-test", "delete-child", &block, "missing-child"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn coupon_lifecycle() {
    let tmp = TempDir::new().unwrap();

    studio(tmp.path())
        .args(["coupons", "add", "--code", "A2314", "--description", "launch", "--discount", "10"])
        .assert()
        .success()
        .stdout("coupon with the coupon code (A2314) added successfully\n");
    studio(tmp.path())
        .args(["coupons", "add", "--code", "A2314", "--discount", "20"])
        .assert()
        .failure()
        .stderr(contains("coupon with the coupon code (A2314) already exist"));
    studio(tmp.path())
        .args(["coupons", "add", "--code", "B", "--discount", "199"])
        .assert()
        .failure()
        .stderr(contains("Please Enter the Coupon Discount Value Less than or Equal to 100"));
    studio(tmp.path())
        .args(["coupons", "add", "--code", "B", "--discount", "25%"])
        .assert()
        .failure()
        .stderr(contains("Please Enter the Integer Value for Coupon Discount"));
    studio(tmp.path())
        .args(["coupons", "add", "--code", "B", "--discount", "-5"])
        .assert()
        .failure()
        .stderr(contains("Greater than or Equal to 0"));

    studio(tmp.path())
        .args(["coupons", "update", "--id", "1", "--code", "SPRING", "--discount", "15"])
        .assert()
        .success()
        .stdout("coupon with the coupon id (1) updated Successfully\n");
    studio(tmp.path())
        .args(["coupons", "info", "--id", "1"])
        .assert()
        .success()
        .stdout(contains("SPRING\t15%\tactive"));
    studio(tmp.path())
        .args(["coupons", "info"])
        .assert()
        .failure()
        .stderr(contains("coupon id not found"));

    studio(tmp.path())
        .args(["coupons", "remove", "--id", "1"])
        .assert()
        .success()
        .stdout("coupon with the coupon id (1) updated successfully\n");
    studio(tmp.path())
        .args(["coupons", "remove", "--id", "1"])
        .assert()
        .failure()
        .stderr(contains("coupon with the coupon id (1) is already inactive"));
    studio(tmp.path())
        .args(["coupons", "remove", "--id", "24454"])
        .assert()
        .failure()
        .stderr(contains("coupon with the coupon id (24454) DoesNotExist"));
    studio(tmp.path())
        .args(["coupons", "remove"])
        .assert()
        .failure()
        .stderr(contains("coupon id is None"));

    studio(tmp.path())
        .args(["coupons", "list"])
        .assert()
        .success()
        .stdout(contains("1\tSPRING\t15%\tinactive"));
}

#[test]
fn sales_total_is_shown_to_finance_admins_only() {
    let tmp = TempDir::new().unwrap();
    studio(tmp.path())
        .args(["coupons", "purchase", "--user", "learner", "--amount-cents", "4999"])
        .assert()
        .success();

    studio(tmp.path())
        .args(["dashboard", "--role", "staff", "--role", "instructor"])
        .assert()
        .success()
        .stdout(contains("Total sales").not());
    studio(tmp.path())
        .args(["dashboard", "--role", "finance_admin"])
        .assert()
        .success()
        .stdout(contains("Total sales: 49.99 USD"));

    studio(tmp.path()).args(["dashboard", "--role", "owner"]).assert().failure();
}

#[test]
fn config_file_and_environment_are_layered() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("studio.toml");
    std::fs::write(&config, "[commerce]\ncurrency = \"eur\"\n\n[logging]\nlevel = \"warn\"\n").unwrap();
    let env_dir = tmp.path().join("from-env");

    let run = |args: &[&str]| {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_studio"));
        cmd.current_dir(tmp.path())
            .env("STUDIO__STORAGE__DATA_DIR", &env_dir)
            .arg("--config")
            .arg(&config)
            .args(["--course", COURSE])
            .args(args);
        cmd
    };

    run(&["coupons", "purchase", "--user", "learner", "--amount-cents", "1000"]).assert().success();
    run(&["dashboard", "--role", "finance_admin"])
        .assert()
        .success()
        .stdout(contains("Total sales: 10.00 EUR"));

    assert!(env_dir.is_dir());
    assert!(!tmp.path().join("data").exists());
}

#[test]
fn malformed_configuration_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("broken.toml");
    std::fs::write(&config, "[storage\ndata_dir = ").unwrap();

    Command::new(env!("CARGO_BIN_EXE_studio"))
        .current_dir(tmp.path())
        .arg("--config")
        .arg(&config)
        .args(["--course", COURSE, "modules", "list"])
        .assert()
        .failure()
        .stderr(contains("Configuration is malformed"));

    Command::new(env!("CARGO_BIN_EXE_studio"))
        .current_dir(tmp.path())
        .args(["--config", "missing.toml", "--course", COURSE, "modules", "list"])
        .assert()
        .failure()
        .stderr(contains("Configuration is malformed"));
}

#[test]
fn startup_is_logged_to_stderr_only() {
    let tmp = TempDir::new().unwrap();
    let output = studio(tmp.path()).args(["modules", "list"]).assert().success().get_output().clone();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stderr.contains("Opening studio data"), "{stderr}");
    assert!(!stdout.contains("Opening studio data"));

    let tmp = TempDir::new().unwrap();
    studio(tmp.path())
        .env("STUDIO__LOGGING__LEVEL", "warn")
        .args(["modules", "list"])
        .assert()
        .success()
        .stderr(contains("Opening studio data").not());
}
