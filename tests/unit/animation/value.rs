use super::*;

#[test]
fn json_shapes_map_to_kinds() {
    let vals: Vec<Value> =
        serde_json::from_str(r#"[1.5, [2, 3], { "r": 1, "g": 2, "b": 3, "a": 4 }, "hi"]"#)
            .unwrap();
    assert_eq!(vals[0], Value::Number(1.5));
    assert_eq!(vals[1], Value::Vec2(Vec2::new(2.0, 3.0)));
    assert_eq!(vals[2], Value::Color(Rgba8::new(1, 2, 3, 4)));
    assert_eq!(vals[3], Value::Text("hi".to_string()));
}

#[test]
fn serializes_back_to_authoring_shapes() {
    let s = serde_json::to_string(&Value::Vec2(Vec2::new(1.0, -1.0))).unwrap();
    assert_eq!(s, "[1.0,-1.0]");
    let s = serde_json::to_string(&Value::Number(4.0)).unwrap();
    assert_eq!(s, "4.0");
}

#[test]
fn numeric_kinds_blend() {
    let v = Value::lerp(&Value::Number(0.0), &Value::Number(8.0), 0.25);
    assert_eq!(v, Value::Number(2.0));
}

#[test]
fn text_and_mismatched_kinds_step_at_end() {
    let a = Value::from("start");
    let b = Value::from("end");
    assert_eq!(Value::lerp(&a, &b, 0.99), a);
    assert_eq!(Value::lerp(&a, &b, 1.0), b);

    let n = Value::Number(1.0);
    assert_eq!(Value::lerp(&n, &b, 0.5), n);
    assert_eq!(Value::lerp(&n, &b, 1.0), b);
}

#[test]
fn vec2_values_blend_componentwise() {
    let a = Value::from(Vec2::new(0.0, 10.0));
    let b = Value::from(Vec2::new(4.0, 20.0));
    assert_eq!(Value::lerp(&a, &b, 0.25), Value::Vec2(Vec2::new(1.0, 12.5)));
}

#[test]
fn colors_blend_per_channel() {
    let a = Value::from(Rgba8::new(0, 0, 0, 255));
    let b = Value::from(Rgba8::new(200, 100, 50, 255));
    assert_eq!(
        Value::lerp(&a, &b, 0.5),
        Value::Color(Rgba8::new(100, 50, 25, 255))
    );
}

#[test]
fn kind_and_number_accessors() {
    assert_eq!(Value::Number(2.0).kind(), "number");
    assert_eq!(Value::from(Vec2::new(1.0, 2.0)).kind(), "vec2");
    assert_eq!(Value::from(Rgba8::new(1, 2, 3, 4)).kind(), "color");
    assert_eq!(Value::from("a").kind(), "text");

    assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
    assert_eq!(Value::from("2.5").as_number(), None);
}
