use std::collections::BTreeMap;
use std::fs;
use serde_json::json;
use tempfile::tempdir;

use audio_spot_assign::models::Track;
use audio_spot_assign::spots::SpotsDocument;

const SPOTS: &str = r#"[
  {
    "title": "水郷の滝",
    "lat": 36.07,
    "lng": 140.2,
    "playlist": [
      {
        "name": "既存",
        "file": "audio/old.mp3",
        "note": "kept"
      }
    ]
  },
  {
    "title": "森1",
    "image": "images/mori.jpg"
  }
]
"#;

#[test]
fn load_save_round_trips_unknown_fields_and_order() {
    let td = tempdir().unwrap();
    let path = td.path().join("spots.json");
    fs::write(&path, SPOTS).unwrap();

    let doc = SpotsDocument::load(&path).unwrap();
    doc.save(&path).unwrap();

    let out = fs::read_to_string(&path).unwrap();
    assert_eq!(out, SPOTS);
    assert!(out.contains("水郷の滝"), "non-ASCII must stay literal");
    assert!(out.ends_with("]\n"));
}

#[test]
fn apply_appends_in_order_and_creates_missing_playlists() {
    let mut doc = SpotsDocument::from_value(serde_json::from_str(SPOTS).unwrap()).unwrap();
    let mut additions = BTreeMap::new();
    additions.insert(
        "水郷の滝".to_string(),
        vec![
            Track { name: "鈴木:滝".into(), file: "audio/a.mp3".into() },
            Track { name: "鈴木:川".into(), file: "audio/b.mp3".into() },
        ],
    );
    additions.insert("森1".to_string(), vec![Track { name: "塚本:鳥".into(), file: "audio/c.mp3".into() }]);
    additions.insert("存在しない".to_string(), vec![Track { name: "x".into(), file: "audio/x.mp3".into() }]);

    assert_eq!(doc.apply_additions(&additions).unwrap(), 3);

    let files: Vec<&str> = doc
        .playlist("水郷の滝")
        .iter()
        .map(|t| t["file"].as_str().unwrap())
        .collect();
    assert_eq!(files, vec!["audio/old.mp3", "audio/a.mp3", "audio/b.mp3"]);
    assert_eq!(doc.playlist("森1").len(), 1);
    assert!(doc.contains_file("森1", "audio/c.mp3"));
    assert!(!doc.has_title("存在しない"));
    assert_eq!(doc.as_values()[1]["image"], json!("images/mori.jpg"));
}

#[test]
fn null_playlist_is_initialized() {
    let mut doc = SpotsDocument::from_value(json!([{ "title": "森1", "playlist": null }])).unwrap();
    assert!(doc.playlist("森1").is_empty());
    let mut additions = BTreeMap::new();
    additions.insert("森1".to_string(), vec![Track { name: "n".into(), file: "audio/n.mp3".into() }]);
    doc.apply_additions(&additions).unwrap();
    assert_eq!(doc.as_values()[0]["playlist"], json!([{ "name": "n", "file": "audio/n.mp3" }]));
}

#[test]
fn lookups_follow_appended_tracks() {
    let mut doc = SpotsDocument::from_value(json!([{ "title": "滝" }, { "title": "森1" }])).unwrap();
    assert!(doc.has_title("森1"));
    assert!(!doc.contains_file("森1", "audio/m.mp3"));
    let mut additions = BTreeMap::new();
    additions.insert("森1".to_string(), vec![Track { name: "m".into(), file: "audio/m.mp3".into() }]);
    doc.apply_additions(&additions).unwrap();
    assert!(doc.contains_file("森1", "audio/m.mp3"));
    assert!(!doc.contains_file("滝", "audio/m.mp3"));
}

#[test]
fn later_duplicate_title_wins() {
    let doc = SpotsDocument::from_value(json!([
        { "title": "森1", "playlist": [ { "name": "a", "file": "audio/a.mp3" } ] },
        { "title": "森1" }
    ]))
    .unwrap();
    assert!(!doc.contains_file("森1", "audio/a.mp3"));
}

#[test]
fn malformed_documents_are_rejected() {
    assert!(SpotsDocument::from_value(json!({ "title": "森1" })).is_err());
    assert!(SpotsDocument::from_value(json!([1, 2])).is_err());

    let td = tempdir().unwrap();
    let path = td.path().join("spots.json");
    fs::write(&path, "[{").unwrap();
    assert!(SpotsDocument::load(&path).is_err());
}

#[test]
fn large_and_precise_numbers_survive_round_trip() {
    let td = tempdir().unwrap();
    let path = td.path().join("spots.json");
    let body = "[\n  {\n    \"title\": \"a\",\n    \"id\": 123456789012345678901234567890,\n    \"lat\": 36.070000000000001\n  }\n]\n";
    fs::write(&path, body).unwrap();

    SpotsDocument::load(&path).unwrap().save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), body);
}
