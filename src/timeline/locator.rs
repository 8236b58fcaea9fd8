use crate::{
    foundation::core::Millis,
    foundation::error::{KeyholdError, KeyholdResult},
};

/// Chooses which cache bucket is active for a query time.
///
/// Callers clamp `t` into `[marks[0], marks[n - 1]]` first. The result is the index of the
/// greatest mark `<= t`, so a query landing exactly on a mark selects that mark.
pub trait SegmentLocator {
    fn locate(&self, marks: &[Millis], t: f64) -> KeyholdResult<usize>;
}

/// Forward scan from the second mark.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearScan;

impl SegmentLocator for LinearScan {
    fn locate(&self, marks: &[Millis], t: f64) -> KeyholdResult<usize> {
        check_clamped(marks, t)?;
        if marks.len() == 1 {
            return Ok(0);
        }
        for (i, mark) in marks.iter().enumerate().skip(1) {
            let m = mark.as_f64();
            if m > t {
                return Ok(i - 1);
            } else if m == t {
                return Ok(i);
            }
        }
        Err(KeyholdError::invariant(format!(
            "segment scan found no mark for t={t} over {} marks",
            marks.len()
        )))
    }
}

/// `partition_point` variant with the same floor/exact-match result as [`LinearScan`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BinarySearch;

impl SegmentLocator for BinarySearch {
    fn locate(&self, marks: &[Millis], t: f64) -> KeyholdResult<usize> {
        check_clamped(marks, t)?;
        // Number of marks <= t; at least 1 because marks[0] <= t.
        let idx = marks.partition_point(|m| m.as_f64() <= t);
        idx.checked_sub(1).ok_or_else(|| {
            KeyholdError::invariant(format!("no mark at or before t={t}"))
        })
    }
}

fn check_clamped(marks: &[Millis], t: f64) -> KeyholdResult<()> {
    let (Some(first), Some(last)) = (marks.first(), marks.last()) else {
        return Err(KeyholdError::invariant("segment lookup on an empty timeline"));
    };
    if !(first.as_f64() <= t && t <= last.as_f64()) {
        return Err(KeyholdError::invariant(format!(
            "query t={t} is outside [{first}, {last}]; callers must clamp"
        )));
    }
    Ok(())
}

/// Locator selection, see [`crate::EvalOpts`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LocatorKind {
    #[default]
    Linear,
    Binary,
}

impl SegmentLocator for LocatorKind {
    fn locate(&self, marks: &[Millis], t: f64) -> KeyholdResult<usize> {
        match self {
            Self::Linear => LinearScan.locate(marks, t),
            Self::Binary => BinarySearch.locate(marks, t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/locator.rs"]
mod tests;
