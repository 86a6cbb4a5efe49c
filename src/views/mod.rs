//! View aggregation for the rendering collaborator.
//!
//! Both views run the same pipeline per rendering surface: position the
//! shifts on the day window, resolve overlap columns, then bucket by the
//! shift's starting time. A shift that crosses midnight stays under its
//! start date and start label; it never reappears under the day it ends.

pub mod day;
pub mod week;

use std::collections::BTreeMap;

use crate::services::grid::PositionedShift;

/// Positioned shifts bucketed by their zero-padded `"HH:MM"` start label.
pub type HourBuckets = BTreeMap<String, Vec<PositionedShift>>;

/// Bucket a positioned batch by starting-time label, preserving batch order
/// within each bucket.
pub(crate) fn bucket_by_start_label(batch: Vec<PositionedShift>) -> HourBuckets {
    let mut buckets = HourBuckets::new();
    for positioned in batch {
        let label = positioned.shift.start_time.format("%H:%M").to_string();
        buckets.entry(label).or_default().push(positioned);
    }
    buckets
}
