use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use hexlens::config::HexlensConfig;
use hexlens::models::{
    FormattedResults, MetricKey, PackageQuality, PackageQualityItem, QualityMetrics,
    RepositoryQualityItem,
};
use hexlens::output::terminal::{hex_rgb, metric_label, percent, rgba_over_dark, value_bar};
use hexlens::output::{JsonFormatter, OutputFormatter, PackageView, PrettyFormatter};

fn plain_output() {
    colored::control::set_override(false);
    console::set_colors_enabled(false);
}

fn metrics(tests: f64, linting: f64, dead_code: f64) -> QualityMetrics {
    QualityMetrics {
        tests,
        linting,
        formatting: 100.0,
        types: 100.0,
        documentation: 100.0,
        dead_code,
    }
}

fn package(name: &str, lenses_ran: Option<&[&str]>) -> PackageQuality {
    PackageQuality {
        name: name.to_string(),
        path: Some(format!("packages/{}", name)),
        version: Some("0.3.0".to_string()),
        metrics: metrics(100.0, 60.0, 20.0),
        lenses_ran: lenses_ran.map(|ids| ids.iter().map(|id| id.to_string()).collect()),
        is_orchestrator: false,
    }
}

fn repositories() -> Vec<RepositoryQualityItem> {
    vec![
        RepositoryQualityItem {
            id: "r1".to_string(),
            name: "mono".to_string(),
            path: None,
            packages: vec![
                PackageQualityItem {
                    name: "web".to_string(),
                    version: None,
                    metrics: metrics(90.0, 90.0, 10.0),
                },
                PackageQualityItem {
                    name: "Api".to_string(),
                    version: None,
                    metrics: metrics(30.0, 30.0, 50.0),
                },
            ],
        },
        RepositoryQualityItem {
            id: "r2".to_string(),
            name: "cli".to_string(),
            path: None,
            packages: vec![PackageQualityItem {
                name: "cli".to_string(),
                version: Some("2.0.0".to_string()),
                metrics: metrics(70.0, 70.0, 30.0),
            }],
        },
    ]
}

fn results() -> FormattedResults {
    serde_json::from_value(json!({
        "metadata": { "timestamp": "2024-05-01T10:00:00Z", "version": "1.2.0" },
        "results": [
            {
                "package": { "name": "web" },
                "lens": { "id": "eslint", "command": "eslint ." },
                "execution": { "success": false, "exitCode": 1, "duration": 850, "timestamp": 1_714_557_600_000_i64 },
                "issues": [
                    { "file": "src/a.ts", "line": 1, "severity": "error", "message": "first" },
                    { "file": "src/a.ts", "line": 2, "severity": "warning", "message": "second" },
                    { "file": "src/a.ts", "line": 3, "severity": "warning", "message": "third" },
                    { "line": 0, "severity": "info", "message": "no file" }
                ],
                "metrics": { "filesAnalyzed": 3, "totalIssues": 4, "issuesBySeverity": { "error": 1, "warning": 2, "info": 1 } },
                "analyzedFiles": [
                    { "path": "src/a.ts", "hasIssues": true },
                    { "path": "src/b.ts", "hasIssues": false }
                ]
            },
            {
                "package": { "name": "api" },
                "lens": { "id": "jest", "command": "jest" },
                "execution": { "success": true, "timestamp": 0 },
                "coverage": { "line": 75.5, "branch": 60 }
            }
        ]
    }))
    .expect("valid results")
}

#[test]
fn test_terminal_helpers() {
    assert_eq!(percent(80.0), "80%");
    assert_eq!(percent(82.4), "82.4%");
    assert_eq!(value_bar(50.0, 10), "█████░░░░░");
    assert_eq!(value_bar(150.0, 4), "████");
    assert_eq!(metric_label(MetricKey::DeadCode, false), "Dead Code ↓");
    assert_eq!(metric_label(MetricKey::Tests, false), "Tests");
    assert_eq!(hex_rgb("#CD7F32"), Some((0xCD, 0x7F, 0x32)));
    assert_eq!(hex_rgb("CD7F32"), None);
    assert_eq!(hex_rgb("#fff"), None);
    assert_eq!(rgba_over_dark("rgba(230, 167, 0, 0.1)"), Some((23, 17, 0)));
    assert_eq!(rgba_over_dark("rgba(46, 125, 50)"), None);
    assert_eq!(rgba_over_dark("#2E7D32"), None);
}

#[test]
fn test_package_view_respects_lenses() {
    let view = PackageView::new(&package("web", Some(&["jest", "eslint"])));

    assert_eq!(view.configured, vec![MetricKey::Linting, MetricKey::Tests]);
    assert_eq!(view.score, 80);
    assert_eq!(view.average, 80.0);
    assert_eq!(view.tier.to_string(), "gold");
}

#[test]
fn test_json_hexagon_panel() {
    let formatter = JsonFormatter::new();
    let packages = vec![package("web", None), package("api", Some(&["knip"]))];
    let output = formatter.format_hexagon_panel(&packages, &HexlensConfig::default());
    let value: Value = serde_json::from_str(&output).expect("valid JSON");

    assert_eq!(value["packages"][0]["name"], "web");
    assert_eq!(value["packages"][0]["tier"], "platinum");
    assert_eq!(value["packages"][1]["configured"], json!(["deadCode"]));
    assert_eq!(value["packages"][1]["score"], 80);
    assert_eq!(value["packages"][1]["rows"][4]["key"], "deadCode");
    assert_eq!(value["packages"][1]["rows"][4]["background"], "rgba(46, 125, 50, 0.1)");

    // Only knip ran anywhere, so the overall tier is scored on dead code alone
    assert_eq!(value["overallTier"], "gold");
}

#[test]
fn test_json_grid_is_sorted() {
    let formatter = JsonFormatter::new();
    let output = formatter.format_grid(
        &repositories(),
        Some(MetricKey::Tests),
        &HexlensConfig::default(),
    );
    let value: Value = serde_json::from_str(&output).expect("valid JSON");

    let labels: Vec<&str> = value["items"]
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|item| item["label"].as_str())
        .collect();
    assert_eq!(labels, vec!["mono / Api", "cli", "mono / web"]);

    assert_eq!(value["summary"]["packageCount"], 3);
    assert_eq!(value["summary"]["repositoryCount"], 2);
    assert_eq!(value["items"][0]["selected"]["band"], "poor");
    assert_eq!(value["items"][0]["key"], "r1:Api");
}

#[test]
fn test_json_debug_view() {
    let formatter = JsonFormatter::new();
    let output = formatter.format_debug(&results(), "web", &HexlensConfig::default());
    let value: Value = serde_json::from_str(&output).expect("valid JSON");

    assert_eq!(value["packageNames"], json!(["web", "api"]));
    assert_eq!(value["summary"]["failCount"], 1);
    assert_eq!(value["lenses"][0]["id"], "eslint");
    assert_eq!(value["lenses"][0]["key"], "eslint:eslint .");
    assert_eq!(
        value["lenses"][0]["issuesByFile"]["src/a.ts"]
            .as_array()
            .map(Vec::len),
        Some(3)
    );
    assert!(value["lenses"][0].get("coverage").is_none());
}

#[test]
fn test_json_tier() {
    let formatter = JsonFormatter::new();
    let ran = vec!["jest".to_string()];
    let output = formatter.format_tier(&metrics(62.0, 0.0, 0.0), Some(&ran));
    let value: Value = serde_json::from_str(&output).expect("valid JSON");

    assert_eq!(value["tier"], "silver");
    assert_eq!(value["score"], 62);
    assert_eq!(value["configured"], json!(["tests"]));
    assert_eq!(value["vertices"].as_array().map(Vec::len), Some(6));

    let rows = value["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 6);
    let tests = rows
        .iter()
        .find(|row| row["key"] == "tests")
        .expect("tests row");
    assert_eq!(tests["description"], "Test coverage and passing rate");
    assert_eq!(tests["band"], "medium");
    assert_eq!(tests["background"], "rgba(230, 167, 0, 0.1)");
    let types = rows
        .iter()
        .find(|row| row["key"] == "types")
        .expect("types row");
    assert_eq!(types["configured"], false);
    assert!(types.get("background").is_none());
}

#[test]
fn test_json_empty_state() {
    let output = JsonFormatter::new().format_empty_state(true);
    let value: Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(value["hasData"], false);
    assert_eq!(value["hasWorkflow"], true);
    assert_eq!(value["workflowPath"], ".github/workflows/quality-lens.yml");
}

#[test]
fn test_pretty_hexagon_panel() {
    plain_output();
    let formatter = PrettyFormatter::with_emoji(false);
    let packages = vec![
        package("@acme/web", Some(&["jest", "eslint"])),
        package("api", None),
    ];
    let output = formatter.format_hexagon_panel(&packages, &HexlensConfig::default());

    assert!(output.contains("Quality Hexagon"));
    assert!(output.contains("2 packages"));
    assert!(output.contains("@acme/"));
    assert!(output.contains("v0.3.0"));
    assert!(output.contains("N/A"));
    assert!(output.contains("Dead Code ↓"));
    assert!(output.contains("Unused code detected"));
    assert!(output.contains("Linting compliance"));
    assert!(!output.contains("🥇"));
}

#[test]
fn test_pretty_grid() {
    plain_output();
    let formatter = PrettyFormatter::new();
    let mut config = HexlensConfig::default();
    config.output.show_repository_name = false;

    let output = formatter.format_grid(&repositories(), None, &config);
    assert!(output.contains("3 packages • 2 repositories"));
    assert!(output.contains("Platinum"));
    assert!(!output.contains("mono / web"));

    let selected = formatter.format_grid(&repositories(), Some(MetricKey::Linting), &config);
    assert!(selected.contains("Linting: 90%"));

    assert_eq!(
        formatter.format_grid(&[], None, &config),
        "No repositories to display\n"
    );
}

#[test]
fn test_pretty_debug_limits_issues() {
    plain_output();
    let formatter = PrettyFormatter::with_emoji(false);
    let mut config = HexlensConfig::default();
    config.output.max_issues_per_file = 2;
    config.output.show_analyzed_files = true;

    let output = formatter.format_debug(&results(), "web", &config);
    assert!(output.contains("Lens Data: web"));
    assert!(output.contains("exit 1"));
    assert!(output.contains("2024-05-01 10:00:00 UTC"));
    assert!(output.contains("src/a.ts (3)"));
    assert!(output.contains("… 1 more"));
    assert!(!output.contains("no file"));
    assert!(output.contains("Analyzed files: 2 (1 with issues)"));
    assert!(output.contains("src/b.ts"));

    let api = formatter.format_debug(&results(), "api", &config);
    assert!(api.contains("Coverage: line 75.5% · branch 60%"));
    assert!(!api.contains("1970"));
}

#[test]
fn test_pretty_empty_state() {
    plain_output();
    let formatter = PrettyFormatter::with_emoji(false);

    let missing = formatter.format_empty_state(false);
    assert!(missing.contains("quality-lens-cli init"));

    let pending = formatter.format_empty_state(true);
    assert!(pending.contains("has not produced results yet"));
}
