//! Overlap resolution for concurrent shifts.
//!
//! Assigns each positioned shift a column so that temporally overlapping
//! shifts never share one, using role-sticky interval coloring: a position
//! that already holds a column keeps it whenever that column is free, so a
//! given role stays visually anchored to the same lane across re-renders.

use std::collections::{HashMap, HashSet};

use crate::api::PositionId;
use crate::services::grid::PositionedShift;

fn smallest_free_column(used: &HashSet<usize>) -> usize {
    let mut column = 0;
    while used.contains(&column) {
        column += 1;
    }
    column
}

/// Assign columns to a batch of positioned shifts sharing one rendering
/// surface (one anchor day, or one location on one day).
///
/// Shifts are processed in ascending grid-time start order (stable on ties).
/// For each shift, the columns of already-processed shifts whose ranges
/// intersect it are taken; shifts starting at exactly the same instant
/// always count as intersecting, which covers the zero-duration boundary
/// case. The shift reuses its role's recorded column when free, otherwise
/// the smallest free column.
///
/// Every shift in the batch gets `total_columns` set to the width of the
/// whole batch, not of its own overlap cluster, so the surface renders with
/// one uniform column count.
pub fn assign_columns(shifts: &mut [PositionedShift]) {
    if shifts.is_empty() {
        return;
    }

    let mut order: Vec<usize> = (0..shifts.len()).collect();
    order.sort_by_key(|&i| shifts[i].grid_start_min);

    let mut role_columns: HashMap<PositionId, usize> = HashMap::new();
    let mut max_columns = 0;

    for (processed, &i) in order.iter().enumerate() {
        let mut used = HashSet::new();
        for &j in &order[..processed] {
            let earlier = &shifts[j];
            let intersects = (earlier.grid_start_min < shifts[i].grid_end_min
                && earlier.grid_end_min > shifts[i].grid_start_min)
                || earlier.grid_start_min == shifts[i].grid_start_min;
            if intersects {
                used.insert(earlier.column);
            }
        }

        let role = shifts[i].shift.position;
        let column = match role_columns.get(&role) {
            Some(&sticky) if !used.contains(&sticky) => sticky,
            _ => smallest_free_column(&used),
        };

        shifts[i].column = column;
        role_columns.insert(role, column);
        max_columns = max_columns.max(column + 1);
    }

    for shift in shifts.iter_mut() {
        shift.total_columns = max_columns;
    }
}
