use assetfix_types::{ChangeReport, FailureKind, FileFailure, ToolInfo};
use pretty_assertions::assert_eq;

fn report() -> ChangeReport {
    ChangeReport::new(
        ToolInfo {
            name: "assetfix".to_string(),
            version: None,
        },
        "static".into(),
        false,
    )
}

#[test]
fn empty_report_omits_failures_and_tool_version() {
    let json = serde_json::to_value(report()).expect("serialize");

    assert_eq!(json["schema"], "assetfix.report.v1");
    assert_eq!(json["root"], "static");
    assert!(json.get("failures").is_none());
    assert!(json["tool"].get("version").is_none());
    assert!(json["run"].get("ended_at").is_none());
    assert_eq!(json["summary"]["files_scanned"], 0);
}

#[test]
fn failure_kind_uses_snake_case() {
    let mut r = report();
    r.record_failure(FileFailure {
        path: "static/c.css".into(),
        kind: FailureKind::Decode,
        message: "stream did not contain valid UTF-8".to_string(),
    });

    let json = serde_json::to_value(&r).expect("serialize");
    assert_eq!(json["failures"][0]["kind"], "decode");
    assert_eq!(json["summary"]["errors"], 1);
}

#[test]
fn report_reads_back_from_json() {
    let mut r = report();
    r.record_unchanged();
    r.finish();

    let text = serde_json::to_string_pretty(&r).expect("serialize");
    let back: ChangeReport = serde_json::from_str(&text).expect("deserialize");

    assert_eq!(back.summary, r.summary);
    assert_eq!(back.run.run_id, r.run.run_id);
    assert!(back.changes.is_empty());
}
