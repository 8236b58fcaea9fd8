use super::*;
use crate::animation::ease::Ease;

fn chain(times: &[u64]) -> PropertyChain<f64> {
    let mut c = PropertyChain::new("x");
    for &t in times {
        c.insert(KeyframeEntry::hold(Millis(t), t as f64));
    }
    c
}

#[test]
fn insert_keeps_time_order() {
    let c = chain(&[50, 0, 100, 25]);
    let times: Vec<u64> = c.iter().map(|e| e.time.0).collect();
    assert_eq!(times, vec![0, 25, 50, 100]);
    assert_eq!(c.first_time(), Some(Millis(0)));
    assert_eq!(c.last_time(), Some(Millis(100)));
    assert!(c.validate().is_ok());
}

#[test]
fn insert_at_existing_time_replaces() {
    let mut c = chain(&[0, 10]);
    let old = c.insert(KeyframeEntry::new(
        Millis(10),
        99.0,
        Easing::Curve(Ease::Linear),
    ));
    assert_eq!(old.unwrap().value, 10.0);
    assert_eq!(c.len(), 2);
    assert_eq!(c.entry_at(Millis(10)).unwrap().value, 99.0);
}

#[test]
fn next_follows_index_order() {
    let c = chain(&[0, 10, 20]);
    assert_eq!(c.next(0).unwrap().time, Millis(10));
    assert_eq!(c.next(1).unwrap().time, Millis(20));
    assert!(c.next(2).is_none());
    assert!(c.next(usize::MAX).is_none());
}

#[test]
fn remove_relinks_neighbours() {
    let mut c = chain(&[0, 10, 20]);
    assert!(c.remove(Millis(10)).is_some());
    assert!(c.remove(Millis(10)).is_none());
    assert_eq!(c.next(0).unwrap().time, Millis(20));
}

#[test]
fn from_entries_sorts_but_keeps_duplicates() {
    let c = PropertyChain::from_entries(
        "y",
        vec![
            KeyframeEntry::hold(Millis(30), 1.0),
            KeyframeEntry::hold(Millis(10), 2.0),
            KeyframeEntry::hold(Millis(30), 3.0),
        ],
    );
    assert_eq!(c.len(), 3);
    assert_eq!(c.get(0).unwrap().time, Millis(10));
    match c.validate() {
        Err(KeyholdError::InvalidTimelineState { property, time }) => {
            assert_eq!(property, "y");
            assert_eq!(time, Millis(30));
        }
        other => panic!("expected InvalidTimelineState, got {other:?}"),
    }
}

#[test]
fn entry_defaults_to_hold() {
    let e: KeyframeEntry<f64> = serde_json::from_str(r#"{ "time": 5, "value": 1.0 }"#).unwrap();
    assert_eq!(e.easing, Easing::None);
}
