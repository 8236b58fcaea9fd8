use super::*;
use crate::{
    animation::ease::{Ease, Easing},
    eval::opts::RangePolicy,
    foundation::core::Vec2,
};

const SCENE: &str = r#"
{
  "opts": { "range": "skip-before-start" },
  "actors": [
    {
      "name": "box",
      "keyframes": [
        { "ms": 0, "properties": { "x": 0, "pos": [0, 0] }, "easing": { "x": "linear" } },
        { "ms": 100, "properties": { "x": 10, "pos": [10, 20], "label": "end" } }
      ]
    },
    { "name": "still", "keyframes": [] }
  ]
}
"#;

#[test]
fn parses_and_builds_actors() {
    let stage = SceneDoc::from_json_str(SCENE).unwrap().into_stage().unwrap();
    assert_eq!(stage.len(), 2);
    assert_eq!(
        stage.applicator().range_policy(),
        RangePolicy::SkipBeforeStart
    );

    let id = stage.find("box").unwrap();
    let actor = stage.actor(id).unwrap();
    assert_eq!(
        actor.chain("x").unwrap().entry_at(Millis(0)).unwrap().easing,
        Easing::Curve(Ease::Linear)
    );
    assert_eq!(
        actor.chain("pos").unwrap().entry_at(Millis(0)).unwrap().easing,
        Easing::None
    );

    let at50 = stage.evaluate(id, 50.0).unwrap();
    assert_eq!(at50["x"], Value::Number(5.0));
    assert_eq!(at50["pos"], Value::Vec2(Vec2::new(0.0, 0.0)));
    assert!(!at50.contains_key("label"));

    let at100 = stage.evaluate(id, 100.0).unwrap();
    assert_eq!(at100["label"], Value::from("end"));
}

#[test]
fn empty_actor_evaluates_to_nothing() {
    let stage = SceneDoc::from_json_str(SCENE).unwrap().into_stage().unwrap();
    let id = stage.find("still").unwrap();
    assert!(stage.evaluate(id, 10.0).unwrap().is_empty());
}

#[test]
fn duplicate_property_time_is_an_invalid_timeline() {
    let json = r#"
    { "actors": [ { "name": "dup", "keyframes": [
        { "ms": 10, "properties": { "x": 1 } },
        { "ms": 10, "properties": { "x": 2 } }
    ] } ] }
    "#;
    let err = SceneDoc::from_json_str(json)
        .unwrap()
        .into_stage()
        .unwrap_err();
    assert!(matches!(
        err,
        KeyholdError::InvalidTimelineState { ref property, time } if property == "x" && time == Millis(10)
    ));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SceneDoc::from_json_str("{ \"actors\": 3 }").unwrap_err();
    assert!(matches!(err, KeyholdError::Serde(_)));
    let err = SceneDoc::from_json_str(
        r#"{ "actors": [ { "name": "a", "keyframes": [ { "ms": 0, "properties": {}, "easing": "zigzag" } ] } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, KeyholdError::Serde(_)));
}

#[test]
fn missing_file_wraps_io_error() {
    let err = SceneDoc::from_path(Path::new("target/does/not/exist.json")).unwrap_err();
    assert!(matches!(err, KeyholdError::Other(_)));
    assert!(err.to_string().contains("read scene"));
}

#[test]
fn blank_property_name_is_rejected() {
    let json = r#"
    { "actors": [ { "name": "a", "keyframes": [
        { "ms": 0, "properties": { "x": 1, "  ": 2 } }
    ] } ] }
    "#;
    let err = SceneDoc::from_json_str(json)
        .unwrap()
        .into_stage()
        .unwrap_err();
    assert!(matches!(err, KeyholdError::Validation(_)));
}

#[test]
fn duplicate_actor_names_are_rejected() {
    let json = r#"
    { "actors": [
        { "name": "twin", "keyframes": [ { "ms": 0, "properties": { "x": 1 } } ] },
        { "name": "twin", "keyframes": [ { "ms": 5, "properties": { "y": 2 } } ] }
    ] }
    "#;
    let err = SceneDoc::from_json_str(json)
        .unwrap()
        .into_stage()
        .unwrap_err();
    assert!(matches!(err, KeyholdError::Validation(ref msg) if msg.contains("twin")));
}
