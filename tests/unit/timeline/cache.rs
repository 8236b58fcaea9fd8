use super::*;
use crate::animation::ease::{Ease, Easing};

fn chain(property: &str, keys: &[(u64, f64)]) -> Arc<PropertyChain<f64>> {
    let mut c = PropertyChain::new(property);
    for &(t, v) in keys {
        c.insert(KeyframeEntry::hold(Millis(t), v));
    }
    Arc::new(c)
}

fn active_time(cache: &TimelineCache<f64>, index: usize, property: &str) -> Option<u64> {
    cache
        .bucket(index)
        .unwrap()
        .get(property)
        .map(|a| a.entry().time.0)
}

#[test]
fn marks_merge_all_properties_without_duplicates() {
    let cache = TimelineCache::build([
        chain("x", &[(0, 0.0), (100, 1.0)]),
        chain("y", &[(50, 0.0), (100, 1.0)]),
    ])
    .unwrap();
    assert_eq!(cache.marks(), &[Millis(0), Millis(50), Millis(100)]);
    assert_eq!(
        cache.range(),
        Some(TimeRange {
            start: Millis(0),
            end: Millis(100)
        })
    );
}

#[test]
fn buckets_hold_latest_entry_at_or_before_mark() {
    let cache = TimelineCache::build([
        chain("x", &[(0, 0.0), (100, 1.0)]),
        chain("y", &[(50, 0.0), (100, 1.0)]),
    ])
    .unwrap();

    assert_eq!(active_time(&cache, 0, "x"), Some(0));
    assert_eq!(active_time(&cache, 1, "x"), Some(0));
    assert_eq!(active_time(&cache, 2, "x"), Some(100));

    assert_eq!(active_time(&cache, 0, "y"), None);
    assert_eq!(active_time(&cache, 1, "y"), Some(50));
    assert_eq!(active_time(&cache, 2, "y"), Some(100));
}

#[test]
fn bucket_iter_skips_absent_properties() {
    let cache = TimelineCache::build([
        chain("a", &[(10, 0.0)]),
        chain("b", &[(0, 0.0)]),
    ])
    .unwrap();
    let first = cache.bucket(0).unwrap();
    let props: Vec<&str> = first.iter().map(|a| a.property()).collect();
    assert_eq!(props, vec!["b"]);
    assert_eq!(first.len(), 1);

    let second = cache.bucket(1).unwrap();
    let props: Vec<&str> = second.iter().map(|a| a.property()).collect();
    assert_eq!(props, vec!["a", "b"]);
    assert_eq!(second.mark(), Millis(10));
}

#[test]
fn active_entry_exposes_successor() {
    let mut c = PropertyChain::new("x");
    c.insert(KeyframeEntry::new(
        Millis(0),
        0.0,
        Easing::Curve(Ease::Linear),
    ));
    c.insert(KeyframeEntry::hold(Millis(40), 4.0));
    let cache = TimelineCache::build([Arc::new(c)]).unwrap();
    let a = cache.bucket(0).unwrap().get("x").unwrap();
    assert_eq!(a.next().unwrap().time, Millis(40));
    let b = cache.bucket(1).unwrap().get("x").unwrap();
    assert!(b.next().is_none());
}

#[test]
fn duplicate_time_in_one_property_is_rejected() {
    let raw = PropertyChain::from_entries(
        "x",
        vec![
            KeyframeEntry::hold(Millis(0), 0.0),
            KeyframeEntry::hold(Millis(20), 1.0),
            KeyframeEntry::hold(Millis(20), 2.0),
        ],
    );
    let err = TimelineCache::build([Arc::new(raw)]).unwrap_err();
    assert!(matches!(
        err,
        KeyholdError::InvalidTimelineState { ref property, time } if property == "x" && time == Millis(20)
    ));
}

#[test]
fn same_time_across_properties_is_fine() {
    let cache = TimelineCache::build([chain("x", &[(5, 0.0)]), chain("y", &[(5, 1.0)])]).unwrap();
    assert_eq!(cache.marks(), &[Millis(5)]);
    assert_eq!(cache.bucket(0).unwrap().len(), 2);
}

#[test]
fn two_chains_for_one_property_are_rejected() {
    let err = TimelineCache::build([chain("x", &[(0, 0.0)]), chain("x", &[(5, 1.0)])]).unwrap_err();
    assert!(matches!(err, KeyholdError::Validation(_)));
}

#[test]
fn empty_chains_contribute_nothing() {
    let cache = TimelineCache::build([chain("x", &[]), chain("y", &[(7, 1.0)])]).unwrap();
    assert_eq!(cache.marks(), &[Millis(7)]);
    assert!(cache.chain("x").is_none());
    assert!(cache.chain("y").is_some());

    let none = TimelineCache::<f64>::build(Vec::new()).unwrap();
    assert!(none.is_empty());
    assert!(none.range().is_none());
    assert!(none.bucket(0).is_none());
}
