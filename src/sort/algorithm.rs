//! Stable merge sort that tolerates inconsistent comparators.
//!
//! Comparators are not guaranteed to be total orders: `date` treats malformed
//! dates as equal to everything, and user comparators can be arbitrary.
//! `slice::sort_by` may panic on such comparators, so rows are sorted with
//! this routine instead. It always returns a permutation of its
//! input, and elements that compare equal keep their relative order.

use std::cmp::Ordering;

/// Sort `items` in place, keeping equal elements in their original order.
pub fn stable_sort_by<T, F>(items: &mut Vec<T>, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let taken = std::mem::take(items);
    *items = merge_sort(taken, &mut compare);
}

fn merge_sort<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, compare);
    let right = merge_sort(right, compare);
    merge(left, right, compare)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(a), Some(b)) = (left.peek(), right.peek()) {
        // Right side only wins when strictly smaller.
        let next = if compare(b, a) == Ordering::Less {
            right.next()
        } else {
            left.next()
        };
        out.extend(next);
    }
    out.extend(left);
    out.extend(right);
    out
}
