//! Sort → window → filter over an in-memory record snapshot.
//!
//! Windowing happens on the sorted, *unfiltered* sequence and the substring
//! filter runs inside the window, so records that do not match still use up
//! page slots.

use std::cmp::Ordering;
use std::ops::Range;

use crate::contract::model::{OrderBy, OrderField, UserRecord};
use crate::domain::query::SearchQuery;

/// Run the pipeline. Inputs are not modified; the result borrows from `records`.
pub fn run<'a>(records: &'a [UserRecord], query: &SearchQuery) -> Vec<&'a UserRecord> {
    let mut ordered: Vec<&UserRecord> = records.iter().collect();
    sort(&mut ordered, query.order_field, query.order_by);

    let window = window_bounds(ordered.len(), query.offset, query.limit);
    ordered[window]
        .iter()
        .copied()
        .filter(|r| matches(r, &query.substring))
        .collect()
}

/// Stable sort; `AsIs` keeps dataset order.
pub fn sort(records: &mut [&UserRecord], field: OrderField, order_by: OrderBy) {
    let cmp: fn(&UserRecord, &UserRecord) -> Ordering = match field {
        OrderField::Name | OrderField::Unset => by_name,
        OrderField::Id => by_id,
        OrderField::Age => by_age,
    };

    match order_by {
        OrderBy::AsIs => {}
        OrderBy::Asc => records.sort_by(|a, b| cmp(a, b)),
        OrderBy::Desc => records.sort_by(|a, b| cmp(a, b).reverse()),
    }
}

/// First name, then last name, then id: a total order for unique ids.
fn by_name(a: &UserRecord, b: &UserRecord) -> Ordering {
    a.first_name
        .cmp(&b.first_name)
        .then_with(|| a.last_name.cmp(&b.last_name))
        .then_with(|| a.id.cmp(&b.id))
}

fn by_id(a: &UserRecord, b: &UserRecord) -> Ordering {
    a.id.cmp(&b.id)
}

fn by_age(a: &UserRecord, b: &UserRecord) -> Ordering {
    a.age.cmp(&b.age)
}

/// `[offset, min(offset + limit, len))`, clamped so that any offset/limit pair
/// (negative limit included) yields a valid, possibly empty, range.
pub fn window_bounds(len: usize, offset: i64, limit: i64) -> Range<usize> {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let left = offset.clamp(0, len_i);
    let right = offset.saturating_add(limit).clamp(left, len_i);

    // both ends lie in [0, len] here
    let to_index = |v: i64| usize::try_from(v).unwrap_or(len);
    to_index(left)..to_index(right)
}

/// Case-sensitive containment in the derived name or the about text.
fn matches(record: &UserRecord, substring: &str) -> bool {
    substring.is_empty() || record.name().contains(substring) || record.about.contains(substring)
}
