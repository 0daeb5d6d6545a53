use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

use audio_spot_assign::config::{parse_targets, Config};

#[test]
fn config_from_path_parses_toml() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    let mut f = File::create(&cfg_path).unwrap();
    let toml = r#"
audio_dir = "/tmp/audio"
spots_json = "/tmp/spots.json"
targets = [" 高野 ", "", "鈴木"]
romanize_names = true
keep_id = false
"#;
    f.write_all(toml.as_bytes()).unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    assert_eq!(cfg.audio_dir.to_str().unwrap(), "/tmp/audio");
    assert_eq!(cfg.spots_json.to_str().unwrap(), "/tmp/spots.json");
    assert!(cfg.rename && cfg.assign);
    assert!(!cfg.dry_run);

    let opts = cfg.plan_options();
    assert_eq!(opts.targets.len(), 2);
    assert!(opts.targets.contains("高野"));
    assert!(opts.romanize_names);
    assert!(!opts.keep_id);
    assert_eq!(opts.unknown_date, "UnknownDate");
}

#[test]
fn empty_config_uses_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    File::create(&cfg_path).unwrap();
    let cfg = Config::from_path(&cfg_path).unwrap();
    assert_eq!(cfg.audio_dir.to_str().unwrap(), "audio");
    assert_eq!(cfg.targets, vec!["鈴木", "塚本"]);
    assert!(cfg.keep_id);
    assert!(cfg.log_dir.is_none());
}

#[test]
fn today_placeholder_is_resolved() {
    let cfg = Config { unknown_date: "today".into(), ..Config::default() };
    let date = cfg.plan_options().unknown_date;
    assert_eq!(date.len(), 8);
    assert!(date.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn targets_split_on_commas() {
    assert_eq!(parse_targets("鈴木, 塚本,,"), vec!["鈴木", "塚本"]);
    assert!(parse_targets("").is_empty());
}
