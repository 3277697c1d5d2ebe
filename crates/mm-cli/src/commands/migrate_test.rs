use super::*;
use mm_core::{Direction, Script};
use mm_migrate::StepReport;

fn step(filename: &str, direction: Direction, dry_run: bool) -> StepReport {
    let mut script = Script::new();
    script.push("BEGIN;");
    script.push("INSERT INTO menu_migrations (filename) VALUES('x');");
    script.push("COMMIT;");
    StepReport {
        filename: filename.to_string(),
        direction,
        dry_run,
        script,
    }
}

#[test]
fn test_summarize_empty_report() {
    assert_eq!(summarize(&RunReport::default()), "Menu is up to date");
}

#[test]
fn test_summarize_applied_steps() {
    let report = RunReport {
        steps: vec![
            step("202301010800_a.yml", Direction::Up, false),
            step("202301020800_b.yml", Direction::Down, false),
        ],
    };
    assert_eq!(
        summarize(&report),
        "up   202301010800_a.yml\ndown 202301020800_b.yml\n\n2 migration(s) applied, 0 dry run"
    );
}

#[test]
fn test_summarize_prints_dry_run_sql() {
    let report = RunReport {
        steps: vec![step("202301010800_a.yml", Direction::Up, true)],
    };
    let text = summarize(&report);
    assert!(text.starts_with("up   202301010800_a.yml (dry run)\nBEGIN;\n"));
    assert!(text.ends_with("COMMIT;\n\n0 migration(s) applied, 1 dry run"));
}
