use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

use hexlens::errors::InputError;
use hexlens::input::{
    file_exists_in_tree, has_workflow, load_chart_packages, load_packages, load_repositories,
    load_results, validate_metrics, WORKFLOW_FILE_PATH,
};
use hexlens::models::{MetricKey, QualityMetrics};

/// Writes `content` to `name` inside a fresh temp dir
fn write_input(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join(name);
    let mut file = File::create(&path).expect("Failed to create input file");
    file.write_all(content.as_bytes())
        .expect("Failed to write input content");
    (temp_dir, path)
}

const RESULTS: &str = r#"{
  "metadata": { "timestamp": "2024-05-01T10:00:00Z", "version": "1.2.0", "totalPackages": 1, "totalLenses": 2 },
  "results": [
    {
      "package": { "name": "@acme/web", "path": "packages/web" },
      "lens": { "id": "eslint", "command": "eslint ." },
      "execution": { "success": false, "exitCode": 1, "duration": 1200, "timestamp": 1714557600000 },
      "issues": [
        { "file": "src/index.ts", "line": 3, "column": 7, "severity": "error", "message": "no-unused-vars", "rule": "no-unused-vars", "source": "eslint" },
        { "line": 0, "severity": "warning", "message": "missing config", "source": "eslint" }
      ],
      "metrics": { "filesAnalyzed": 12, "totalIssues": 2, "issuesBySeverity": { "error": 1, "warning": 1, "info": 0, "hint": 0 }, "executionTime": 1200 }
    },
    {
      "package": { "name": "@acme/web", "path": "packages/web" },
      "lens": { "id": "jest", "command": "jest --coverage" },
      "execution": { "success": true, "timestamp": 1714557600000 },
      "metrics": { "filesAnalyzed": 4, "totalIssues": 0, "issuesBySeverity": { "error": 0, "warning": 0, "info": 0, "hint": 0 }, "executionTime": 3000, "custom": { "passed": 40, "failed": 0 } },
      "coverage": { "line": 82.5, "branch": 70, "function": null, "statement": 81 }
    }
  ],
  "qualityMetrics": {
    "packages": [
      { "name": "@acme/web", "path": "packages/web", "hexagon": { "tests": 82.5, "linting": 90, "formatting": 100, "types": 0, "documentation": 0, "deadCode": 10 } }
    ]
  }
}"#;

#[test]
fn test_load_results() {
    let (_dir, path) = write_input("results.json", RESULTS);
    let results = load_results(&path).expect("Failed to load results");

    assert_eq!(results.metadata.total_lenses, 2);
    assert_eq!(results.results.len(), 2);

    let eslint = &results.results[0];
    assert_eq!(eslint.lens_key(), "eslint:eslint .");
    assert_eq!(eslint.execution.exit_code, Some(1));
    assert_eq!(eslint.issues[1].file, None);
    assert!(eslint.coverage.is_none());

    let jest = &results.results[1];
    let coverage = jest.coverage.as_ref().expect("jest reports coverage");
    assert_eq!(coverage.line, 82.5);
    assert_eq!(coverage.function, None);
    assert!(jest.metrics.custom.is_some());
}

#[test]
fn test_load_packages_from_results() {
    let (_dir, path) = write_input("results.json", RESULTS);
    let packages = load_packages(&path).expect("Failed to load packages");

    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].name, "@acme/web");
    assert_eq!(
        packages[0].lenses_ran,
        Some(vec!["eslint".to_string(), "jest".to_string()])
    );
}

#[test]
fn test_load_packages_from_report() {
    let report = r#"{
      "packages": [
        { "name": "root", "metrics": { "tests": 0, "linting": 0, "formatting": 0, "types": 0, "documentation": 0, "deadCode": 0 }, "isOrchestrator": true },
        { "name": "api", "version": "2.1.0", "metrics": { "tests": 90, "linting": 95, "formatting": 100, "types": 88, "documentation": 60, "deadCode": 5 }, "lensesRan": ["jest", "eslint"] }
      ]
    }"#;
    let (_dir, path) = write_input("report.json", report);
    let packages = load_packages(&path).expect("Failed to load report");

    assert_eq!(packages.len(), 2);
    assert!(packages[0].is_orchestrator);
    assert_eq!(packages[1].version.as_deref(), Some("2.1.0"));
    assert_eq!(packages[1].metrics.dead_code, 5.0);
}

#[test]
fn test_results_without_quality_metrics() {
    let content = r#"{ "metadata": { "timestamp": "now", "version": "1.0.0" }, "results": [] }"#;
    let (_dir, path) = write_input("results.json", content);

    let packages = load_packages(&path).expect("results without metrics still load");
    assert!(packages.is_empty());

    match load_chart_packages(&path) {
        Err(InputError::MissingQualityMetrics(missing)) => assert_eq!(missing, path),
        other => panic!("expected MissingQualityMetrics, got {:?}", other),
    }
}

#[test]
fn test_report_type_errors_are_reported() {
    let report = r#"{ "packages": [{ "name": "api", "metrics": { "tests": "high", "linting": 0, "formatting": 0, "types": 0, "documentation": 0, "deadCode": 0 } }] }"#;
    let (_dir, path) = write_input("report.json", report);

    match load_packages(&path) {
        Err(InputError::Json { source, .. }) => {
            let message = source.to_string();
            assert!(message.contains("invalid type"), "{}", message);
            assert!(!message.contains("untagged"), "{}", message);
        }
        other => panic!("expected a JSON error, got {:?}", other),
    }
}

#[test]
fn test_repository_type_errors_are_reported() {
    let content = r#"{ "repositories": [{ "id": "r1", "name": 7, "packages": [] }] }"#;
    let (_dir, path) = write_input("repos.json", content);

    match load_repositories(&path) {
        Err(InputError::Json { source, .. }) => {
            assert!(source.to_string().contains("invalid type"))
        }
        other => panic!("expected a JSON error, got {:?}", other),
    }
}

#[rstest]
#[case(r#"[{ "id": "r1", "name": "mono", "packages": [{ "name": "core", "metrics": { "tests": 80, "linting": 80, "formatting": 80, "types": 80, "documentation": 80, "deadCode": 20 } }] }]"#)]
#[case(r#"{ "repositories": [{ "id": "r1", "name": "mono", "packages": [{ "name": "core", "metrics": { "tests": 80, "linting": 80, "formatting": 80, "types": 80, "documentation": 80, "deadCode": 20 } }] }] }"#)]
fn test_load_repositories_shapes(#[case] content: &str) {
    let (_dir, path) = write_input("repos.json", content);
    let repos = load_repositories(&path).expect("Failed to load repositories");

    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].packages[0].name, "core");
}

#[test]
fn test_out_of_range_metric_is_rejected() {
    let content = r#"[{ "id": "r1", "name": "mono", "packages": [{ "name": "core", "metrics": { "tests": 120, "linting": 80, "formatting": 80, "types": 80, "documentation": 80, "deadCode": 20 } }] }]"#;
    let (_dir, path) = write_input("repos.json", content);

    match load_repositories(&path) {
        Err(InputError::MetricOutOfRange {
            package,
            metric,
            value,
        }) => {
            assert_eq!(package, "core");
            assert_eq!(metric, MetricKey::Tests);
            assert_eq!(value, 120.0);
        }
        other => panic!("expected MetricOutOfRange, got {:?}", other),
    }
}

#[rstest]
#[case(-0.1)]
#[case(100.1)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn test_validate_metrics_rejects(#[case] value: f64) {
    let metrics = QualityMetrics::default().with(MetricKey::DeadCode, value);
    assert!(validate_metrics("pkg", &metrics).is_err());
}

#[test]
fn test_validate_metrics_accepts_bounds() {
    let low = QualityMetrics::default();
    let high = QualityMetrics::default().with(MetricKey::Types, 100.0);
    assert!(validate_metrics("pkg", &low).is_ok());
    assert!(validate_metrics("pkg", &high).is_ok());
}

#[test]
fn test_invalid_json() {
    let (_dir, path) = write_input("broken.json", "{ not json");
    assert!(matches!(
        load_results(&path),
        Err(InputError::Json { .. })
    ));
}

#[test]
fn test_missing_file() {
    let result = load_results(Path::new("/definitely/not/here.json"));
    assert!(matches!(result, Err(InputError::Read { .. })));
}

#[rstest]
#[case(&[".github/workflows/quality-lens.yml"], true)]
#[case(&["/.github/workflows/quality-lens.yml"], true)]
#[case(&["repo/.GitHub/Workflows/Quality-Lens.yml"], true)]
#[case(&[".github/workflows/ci.yml"], false)]
#[case(&[], false)]
fn test_file_exists_in_tree(#[case] files: &[&str], #[case] expected: bool) {
    assert_eq!(file_exists_in_tree(files, WORKFLOW_FILE_PATH), expected);
}

#[test]
fn test_has_workflow() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    assert!(!has_workflow(temp_dir.path()));

    let workflows = temp_dir.path().join(".github/workflows");
    fs::create_dir_all(&workflows).expect("Failed to create workflows dir");
    fs::write(workflows.join("ci.yml"), "on: push").expect("Failed to write workflow");
    assert!(!has_workflow(temp_dir.path()));

    fs::write(workflows.join("quality-lens.yml"), "on: push").expect("Failed to write workflow");
    assert!(has_workflow(temp_dir.path()));
}
