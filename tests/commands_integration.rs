//! End-to-end tests driving `evalog::run` over a small log folder.

use camino::{Utf8Path, Utf8PathBuf};
use evalog::Host;
use serde_json::{Value, json};
use std::fs;

/// Test host that captures output to in-memory buffers.
#[derive(Default)]
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

fn object(object_type: &str, status: &str, label: &str, distance: f64) -> Value {
    json!({
        "object_type": object_type,
        "status": status,
        "label": label,
        "distance_from_ego": distance,
        "position": {"x": distance, "y": 0.0, "z": 0.0},
        "pose_error": {"x": 0.1, "y": 0.2, "z": 0.0},
        "heading_error": {"z": 0.01},
        "bev_error": 0.3,
    })
}

fn record(sec: u64, objects: Vec<Value>) -> Value {
    json!({
        "Frame": {
            "Ego": {"TransformStamped": {
                "header": {"stamp": {"sec": sec, "nanosec": 500_000_000}},
                "transform": {"translation": {"x": 1.0, "y": 2.0, "z": 0.0},
                              "rotation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}}
            }},
            "criteria0": {"Objects": objects}
        },
        "Result": {"Success": "true"},
        "Stamp": {"ROS": sec}
    })
}

/// A scratch directory holding `logs/run.jsonl`, a stray text file and a configuration file.
struct Workspace {
    _dir: tempfile::TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap().to_owned();

        let mut covariance = vec![0.0; 36];
        covariance[0] = 0.4;
        covariance[7] = 0.5;
        covariance[35] = 0.06;
        let mut covariant = object("EST", "TP", "vehicle.car", 12.0);
        covariant["pose_covariance"] = json!(covariance);

        let lines = [
            record(
                1_606_799_233,
                vec![
                    object("EST", "TP", "car", 5.0),
                    object("GT", "TP", "car", 6.0),
                    object("EST", "FP", "car", 15.0),
                    object("EST", "FP", "tree", 25.0),
                ],
            )
            .to_string(),
            "{not json".to_string(),
            String::new(),
            record(
                1_606_799_234,
                vec![covariant, object("GT", "TP", "car", 13.0), object("GT", "FN", "car", 35.0)],
            )
            .to_string(),
            json!({"Result": {"Success": "false"}}).to_string(),
        ];

        fs::create_dir(root.join("logs")).unwrap();
        fs::write(root.join("logs/run.jsonl"), lines.join("\n")).unwrap();
        fs::write(root.join("logs/notes.txt"), "not a log").unwrap();

        let workspace = Self { _dir: dir, root };
        let mut host = TestHost::default();
        workspace.run(&mut host, &["init", workspace.config().as_str()]).unwrap();
        workspace
    }

    fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    fn config(&self) -> Utf8PathBuf {
        self.path("evalog.toml")
    }

    fn run(&self, host: &mut TestHost, args: &[&str]) -> evalog::Result<()> {
        let config = self.config();
        let mut full = vec!["evalog", "--log-level", "none", "--color", "never", "-c", config.as_str()];
        full.extend_from_slice(args);
        evalog::run(host, full)
    }

    fn extract(&self) -> Utf8PathBuf {
        let output = self.path("rows.csv");
        let mut host = TestHost::default();
        self.run(&mut host, &["extract", "logs", "--root", self.root.as_str(), "--output", output.as_str()])
            .unwrap();
        output
    }
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_init_writes_default_config() {
    let workspace = Workspace::new();
    let text = fs::read_to_string(workspace.config()).unwrap();
    assert!(text.contains("[categories]"));
    assert!(text.contains("large_vehicle"));

    let mut host = TestHost::default();
    let other = workspace.path("other.toml");
    workspace.run(&mut host, &["init", other.as_str()]).unwrap();
    assert!(host.output_str().contains("Generated default configuration file"));
    assert_eq!(fs::read_to_string(other).unwrap(), text);
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_extract_writes_row_table() {
    let workspace = Workspace::new();
    let output = workspace.path("rows.csv");

    let mut host = TestHost::default();
    workspace
        .run(&mut host, &["extract", "logs", "--root", workspace.root.as_str(), "--output", output.as_str()])
        .unwrap();
    assert!(host.output_str().starts_with("Extracted 9 row(s) from 1 file(s)"));

    let rows = evalog::ingest::read_rows_from_file(&output).unwrap();
    assert_eq!(rows.len(), 9);
    assert!(rows[0].is_ego());
    assert_eq!(rows[0].timestamp, Some(1_606_799_233.5));
    assert!(rows.iter().all(|row| row.frame_success));
    assert_eq!(rows.iter().filter(|row| row.is_ego()).count(), 2);
    assert_eq!(rows[6].pose_covariance.len(), 36);

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().next().unwrap(), evalog::ingest::COLUMNS.join(","));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_extract_is_repeatable() {
    let workspace = Workspace::new();
    let first = fs::read(workspace.extract()).unwrap();
    let second = fs::read(workspace.extract()).unwrap();
    assert_eq!(first, second);
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_extract_missing_folder_writes_empty_table() {
    let workspace = Workspace::new();
    let output = workspace.path("empty.csv");

    let mut host = TestHost::default();
    workspace
        .run(&mut host, &["extract", "missing", "--root", workspace.root.as_str(), "--output", output.as_str()])
        .unwrap();
    assert!(host.output_str().starts_with("Extracted 0 row(s) from 0 file(s)"));
    assert!(evalog::ingest::read_rows_from_file(&output).unwrap().is_empty());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_metrics() {
    let workspace = Workspace::new();
    let rows = workspace.extract();
    let json_path = workspace.path("metrics.json");
    let csv_path = workspace.path("metrics.csv");

    let mut host = TestHost::default();
    workspace
        .run(
            &mut host,
            &["metrics", "--input", rows.as_str(), "--json", json_path.as_str(), "--csv", csv_path.as_str()],
        )
        .unwrap();
    assert_eq!(host.output_str(), "Metrics:\ncar: TPrate=0.67, mAP=0.67\n");

    let json: Value = serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(json["metrics"]["car"]["TP"], json!(2.0));
    assert_eq!(json["metrics"]["car"]["FP"], json!(1));
    assert_eq!(json["metrics"]["car"]["FN"], json!(1));
    assert!(json["metrics"].get("unclassified").is_none());

    assert_eq!(
        fs::read_to_string(csv_path).unwrap(),
        "category,TPrate,mAP,TP,FP,FN\ncar,0.67,0.67,2,1,1\n"
    );
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_metrics_missing_input_fails() {
    let workspace = Workspace::new();
    let missing = workspace.path("missing.csv");
    let mut host = TestHost::default();
    assert!(workspace.run(&mut host, &["metrics", "--input", missing.as_str()]).is_err());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_distance_by_status() {
    let workspace = Workspace::new();
    let rows = workspace.extract();
    let csv_path = workspace.path("distance.csv");

    let mut host = TestHost::default();
    workspace
        .run(&mut host, &["distance", "--input", rows.as_str(), "--csv", csv_path.as_str()])
        .unwrap();
    assert!(host.output_str().is_empty());
    assert_eq!(
        fs::read_to_string(csv_path).unwrap(),
        "distance_bin,FN,FP,TP\n0,0,0,2\n10,0,1,2\n20,0,1,0\n30,1,0,0\n"
    );
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_distance_json() {
    let workspace = Workspace::new();
    let rows = workspace.extract();
    let json_path = workspace.path("distance.json");

    let mut host = TestHost::default();
    workspace
        .run(&mut host, &["distance", "--input", rows.as_str(), "--json", json_path.as_str()])
        .unwrap();
    assert!(host.output_str().is_empty());

    let json: Value = serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(json["group_by"], json!("status"));
    assert_eq!(json["bin_size"], json!(10.0));
    let bins = json["bins"].as_array().unwrap();
    assert_eq!(bins.len(), 4);
    assert_eq!(bins[0]["lower_bound"], json!(0.0));
    assert_eq!(bins[0]["counts"], json!({"FN": 0, "FP": 0, "TP": 2}));
    assert_eq!(bins[3]["lower_bound"], json!(30.0));
    assert_eq!(bins[3]["counts"]["FN"], json!(1));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_distance_by_category_console() {
    let workspace = Workspace::new();
    let rows = workspace.extract();

    let mut host = TestHost::default();
    workspace
        .run(&mut host, &["distance", "--input", rows.as_str(), "--by", "category", "--bin-size", "20"])
        .unwrap();
    let output = host.output_str();
    assert!(output.starts_with("Rows by category per 20 m of distance from ego\n"));
    assert!(output.contains("distance_bin  car  unclassified"));
    assert!(output.contains("\n             0    5             0\n"));
    assert!(output.contains("\n            20    1             1\n"));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_distance_rejects_bad_bin_size() {
    let workspace = Workspace::new();
    let rows = workspace.extract();
    let mut host = TestHost::default();
    assert!(
        workspace
            .run(&mut host, &["distance", "--input", rows.as_str(), "--bin-size", "0"])
            .is_err()
    );
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_distance_excel() {
    let workspace = Workspace::new();
    let rows = workspace.extract();
    let excel = workspace.path("distance.xlsx");

    let mut host = TestHost::default();
    workspace
        .run(&mut host, &["distance", "--input", rows.as_str(), "--excel", excel.as_str()])
        .unwrap();
    let bytes = fs::read(excel).unwrap();
    assert_eq!(&bytes[0..2], b"PK", "Excel file should be a valid ZIP archive");
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_covariance() {
    let workspace = Workspace::new();
    let rows = workspace.extract();
    let csv_path = workspace.path("covariance.csv");

    let mut host = TestHost::default();
    workspace
        .run(
            &mut host,
            &["covariance", "--input", rows.as_str(), "--label", "vehicle.car", "--output", csv_path.as_str()],
        )
        .unwrap();
    assert!(host.output_str().starts_with("Covariance samples: 1\n"));

    let text = fs::read_to_string(csv_path).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("covariance_x,covariance_y,covariance_yaw,"));
    assert_eq!(lines.next().unwrap(), "0.4,0.5,0.06,0.1,0.2,0.01,0.3,12.0,vehicle.car");
    assert!(lines.next().is_none());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_covariance_json() {
    let workspace = Workspace::new();
    let rows = workspace.extract();
    let json_path = workspace.path("covariance.json");

    let mut host = TestHost::default();
    workspace
        .run(
            &mut host,
            &["covariance", "--input", rows.as_str(), "--label", "vehicle.car", "--json", json_path.as_str()],
        )
        .unwrap();
    assert!(host.output_str().starts_with("Covariance samples: 1\n"));

    let json: Value = serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
    let samples = json["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0]["label"], json!("vehicle.car"));
    assert_eq!(samples[0]["covariance_x"], json!(0.4));
    assert_eq!(samples[0]["pose_error_y"], json!(0.2));
    assert_eq!(samples[0]["distance_from_ego"], json!(12.0));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_invalid_config_fails() {
    let workspace = Workspace::new();
    let rows = workspace.extract();
    fs::write(workspace.config(), "precision = 42\n").unwrap();

    let mut host = TestHost::default();
    assert!(workspace.run(&mut host, &["metrics", "--input", rows.as_str()]).is_err());
}

#[test]
fn test_version_exits_cleanly() {
    let mut host = TestHost::default();
    evalog::run(&mut host, ["evalog", "--version"]).unwrap();
    assert_eq!(host.exit_code, Some(0));
    assert!(host.output_str().starts_with("evalog "));
    assert!(host.error_buf.is_empty());
}
