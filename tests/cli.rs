//! End-to-end tests of the famfin binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn famfin(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("famfin").unwrap();
    cmd.env("FAMFIN_DATA_DIR", dir.path())
        .env_remove("FAMFIN_LOG")
        .env_remove("GEMINI_API_KEY");
    cmd
}

fn run(dir: &TempDir, args: &[&str]) {
    famfin(dir).args(args).assert().success();
}

#[test]
fn test_init_creates_tables() {
    let dir = TempDir::new().unwrap();

    famfin(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("accounts.json").exists());
    assert!(dir.path().join("data").join("shopping.json").exists());
}

#[test]
fn test_account_balances() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Checking", "--balance", "1000"]);
    run(
        &dir,
        &[
            "transaction", "add", "expense", "25.50", "--account", "Checking", "--category",
            "Food", "--date", "2025-03-10", "-D", "Market",
        ],
    );

    famfin(&dir)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking"))
        .stdout(predicate::str::contains("$974.50"));
}

#[test]
fn test_duplicate_account_fails() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Wallet", "-t", "cash"]);

    famfin(&dir)
        .args(["account", "create", "wallet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_transfer_needs_destination() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Checking"]);

    famfin(&dir)
        .args(["transaction", "add", "transfer", "10", "--account", "Checking"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("destination account"));
}

#[test]
fn test_monthly_summary_report() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Checking"]);
    run(
        &dir,
        &[
            "transaction", "add", "income", "2000", "-a", "Checking", "-c", "Salary", "-d",
            "2025-03-01",
        ],
    );
    run(
        &dir,
        &[
            "transaction", "add", "expense", "120", "-a", "Checking", "-c", "Food", "-d",
            "2025-03-05",
        ],
    );

    famfin(&dir)
        .args(["report", "summary", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary for March 2025"))
        .stdout(predicate::str::contains("$2000.00"))
        .stdout(predicate::str::contains("$1880.00"));
}

#[test]
fn test_goal_contribution_records_expense() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Checking", "-b", "500"]);
    run(&dir, &["goal", "create", "Bike", "400"]);
    run(&dir, &["goal", "contribute", "Bike", "100", "--account", "Checking"]);

    famfin(&dir)
        .args(["goal", "show", "Bike"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$100.00 of $400.00 (25%)"));

    famfin(&dir)
        .args(["transaction", "list", "--category", "Savings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contribution: Bike"));
}

#[test]
fn test_budget_plan_from_template() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["budget", "create", "--income", "1000", "--month", "2025-03"]);

    famfin(&dir)
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget for March 2025"))
        .stdout(predicate::str::contains("Essential expenses"))
        .stdout(predicate::str::contains("Every unit of income is assigned"));

    run(&dir, &["budget", "edit-line", "Water", "--amount", "50"]);

    famfin(&dir)
        .args(["budget", "show", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Over-allocated by $50.00"));
}

#[test]
fn test_shopping_list_archive_records_expense() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Checking"]);
    run(&dir, &["shop", "create", "Weekly"]);
    run(&dir, &["shop", "add", "Weekly", "Milk", "--price", "2", "--quantity", "2"]);
    run(&dir, &["shop", "buy", "Weekly", "Milk", "--actual", "3"]);

    famfin(&dir)
        .args(["shop", "archive", "Weekly", "--expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded expense of $6.00"))
        .stdout(predicate::str::contains("Milk cost 50% more than planned"));

    famfin(&dir)
        .args(["transaction", "list", "--category", "Food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly"));

    famfin(&dir)
        .args(["shop", "add", "Weekly", "Eggs", "--price", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("archived"));
}

#[test]
fn test_family_space_scopes_accounts() {
    let dir = TempDir::new().unwrap();

    famfin(&dir)
        .args(["space", "create", "Home"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No profile configured"));

    run(&dir, &["profile", "set", "--name", "Ada", "--email", "ada@example.com"]);
    run(&dir, &["account", "create", "Personal wallet"]);
    run(&dir, &["space", "create", "Home"]);
    run(&dir, &["space", "switch", "Home"]);

    famfin(&dir)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No accounts found."));

    run(&dir, &["account", "create", "Shared"]);
    run(&dir, &["space", "switch", "personal"]);

    famfin(&dir)
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal wallet"))
        .stdout(predicate::str::contains("Shared").not());
}

#[test]
fn test_export_json_to_stdout() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Checking"]);

    famfin(&dir)
        .args(["export", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\":\"1.0.0\""))
        .stdout(predicate::str::contains("Checking"));
}

#[test]
fn test_export_transactions_csv_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("transactions.csv");
    run(&dir, &["account", "create", "Checking"]);
    run(
        &dir,
        &[
            "transaction", "add", "expense", "9.99", "-a", "Checking", "-c", "Leisure", "-d",
            "2025-03-02", "-D", "Cinema",
        ],
    );

    famfin(&dir)
        .args(["export", "transactions"])
        .arg(&output)
        .assert()
        .success();

    let contents = std::fs::read_to_string(output).unwrap();
    assert!(contents.starts_with("Date,Description,Category,Type,Amount"));
    assert!(contents.contains("Cinema"));
}

#[test]
fn test_history_lists_changes() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Checking"]);

    famfin(&dir)
        .args(["history", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Account"))
        .stdout(predicate::str::contains("(Checking)"));
}

#[test]
fn test_status_checklist() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Checking"]);

    famfin(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("View: Personal"))
        .stdout(predicate::str::contains("Getting started (1/4)"));
}

#[test]
fn test_data_dir_flag_overrides_environment() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();

    famfin(&env_dir)
        .args(["--data-dir"])
        .arg(flag_dir.path())
        .args(["account", "create", "Checking"])
        .assert()
        .success();

    assert!(flag_dir.path().join("data").join("accounts.json").exists());
    assert!(!env_dir.path().join("data").join("accounts.json").exists());
}

#[test]
fn test_debt_created_with_amount_already_paid() {
    let dir = TempDir::new().unwrap();

    famfin(&dir)
        .args(["debt", "create", "Student loan", "500", "--paid", "150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paid:  $150.00"));

    famfin(&dir)
        .args(["debt", "create", "Car", "100", "--paid", "120"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and"));
}

#[test]
fn test_goal_show_streak_and_level() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["account", "create", "Checking", "-b", "500"]);
    run(&dir, &["goal", "create", "Bike", "400"]);
    run(&dir, &["goal", "contribute", "Bike", "10", "-a", "Checking", "-d", "2025-03-01"]);
    run(&dir, &["goal", "contribute", "Bike", "10", "-a", "Checking", "-d", "2025-03-02"]);

    famfin(&dir)
        .args(["goal", "show", "Bike"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak:    2 days"))
        .stdout(predicate::str::contains("Saver level: Beginner"));
}
