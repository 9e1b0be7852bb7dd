use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "bookkeeper";

fn bookkeeper(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("BOOKKEEPER_DATA_DIR", data_dir.path())
        .env_remove("BOOKKEEPER_LOG");
    cmd
}

fn shell(data_dir: &TempDir) -> Command {
    let mut cmd = bookkeeper(data_dir);
    cmd.arg("shell");
    cmd
}

#[test]
fn shell_lists_demo_categories() {
    let dir = TempDir::new().unwrap();
    shell(&dir)
        .write_stdin("categories\n")
        .assert()
        .success()
        .stdout(contains("Bookkeeper shell."))
        .stdout(contains("#1    food"))
        .stdout(contains("meat products"))
        .stdout(contains("clothes"));
}

#[test]
fn shell_records_expense_and_budget() {
    let dir = TempDir::new().unwrap();
    shell(&dir)
        .write_stdin("120 books ; paperbacks\nbudget week 700 books\nexpenses\nbudgets\nquit\n")
        .assert()
        .success()
        .stdout(contains("Recorded #1"))
        .stdout(contains("paperbacks"))
        .stdout(contains("Added budget #1"))
        .stdout(contains("$700"));
}

#[test]
fn shell_reports_errors_and_keeps_going() {
    let dir = TempDir::new().unwrap();
    shell(&dir)
        .write_stdin("-5 food\nbudget fortnight 10 food\ndelete budget 3\nhelp\n")
        .assert()
        .success()
        .stdout(contains("error: Validation error"))
        .stdout(contains("Unknown budget period 'fortnight'"))
        .stdout(contains("error: Budget not found: 3"))
        .stdout(contains("Listings:"));
}

#[test]
fn shell_accepts_key_references() {
    let dir = TempDir::new().unwrap();
    shell(&dir)
        .write_stdin(
            "250 #3 ; mince\nrename category #7 garments\nmove category #4 under #1\n\
             category \"down under\" under #6\ncategories\n",
        )
        .assert()
        .success()
        .stdout(contains("Recorded #1"))
        .stdout(contains("Renamed category #7"))
        .stdout(contains("Moved category #4"))
        .stdout(contains("Added category #8 down under"))
        .stdout(contains("garments"))
        .stdout(contains("error:").not());
}

#[test]
fn no_seed_starts_empty() {
    let dir = TempDir::new().unwrap();
    shell(&dir)
        .arg("--no-seed")
        .write_stdin("categories\n")
        .assert()
        .success()
        .stdout(contains("No categories found."));
}

#[test]
fn seed_file_replaces_demo_tree() {
    let dir = TempDir::new().unwrap();
    let outline = dir.path().join("outline.txt");
    std::fs::write(&outline, "rent\n    water\ntravel\n").unwrap();

    shell(&dir)
        .arg("--seed")
        .arg(&outline)
        .write_stdin("categories\n")
        .assert()
        .success()
        .stdout(contains("rent").and(contains("water")).and(contains("travel")))
        .stdout(contains("food").not());
}

#[test]
fn missing_seed_file_fails_startup() {
    let dir = TempDir::new().unwrap();
    shell(&dir)
        .arg("--seed")
        .arg(dir.path().join("absent.txt"))
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stdout(contains("Error: Startup error"));
}

#[test]
fn invalid_settings_fail_startup() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    shell(&dir)
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stdout(contains("Failed to load settings"));
}

#[test]
fn config_command_prints_paths() {
    let dir = TempDir::new().unwrap();
    bookkeeper(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Bookkeeper Configuration"))
        .stdout(contains("config.json (not present)"))
        .stdout(contains("Currency symbol: $"));
}

#[test]
fn init_writes_settings_and_outline() {
    let dir = TempDir::new().unwrap();
    bookkeeper(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!"));

    let settings = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(settings.contains("\"currency_symbol\""));
    let outline = std::fs::read_to_string(dir.path().join("categories.txt")).unwrap();
    assert!(outline.starts_with("food\n"));

    bookkeeper(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("(not present)").not());
}
