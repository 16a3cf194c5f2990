use std::cmp::Ordering;

use happi_model::CanonicalRecord;

/// Ranks records by score, best first. Absent scores rank last; ties keep input order.
pub fn assign_ranks(records: &mut [CanonicalRecord]) {
    let mut order: Vec<usize> = (0..records.len()).collect();
    // sort_by is stable, so equal keys stay in row order.
    order.sort_by(|&a, &b| match (records[a].score, records[b].score) {
        (Some(left), Some(right)) => right.total_cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    for (position, index) in order.into_iter().enumerate() {
        records[index].rank = u32::try_from(position + 1).ok();
    }
}
