//! Ordering of the fallback commit list

use std::cmp::Reverse;

use super::timsort::sort_by_sign;
use crate::config::CommitOrder;
use crate::model::Commit;

/// Sort `commits` in place according to `order`.
pub fn sort_commits(commits: &mut [&Commit], order: CommitOrder) {
    match order {
        CommitOrder::Legacy => sort_by_sign(commits, |a, b| legacy_compare(a, b)),
        CommitOrder::Size => commits.sort_by_key(|c| Reverse(c.size())),
    }
}

/// `b.insertions + b.deletions - a.insertions + a.deletions`.
///
/// The second pair is added, not subtracted, so this is not a total order.
/// Existing changelogs were generated with it and it is kept as is; use
/// [`CommitOrder::Size`] for a real largest-first order.
pub fn legacy_compare(a: &Commit, b: &Commit) -> i128 {
    let (ai, ad) = (i128::from(a.insertions), i128::from(a.deletions));
    let (bi, bd) = (i128::from(b.insertions), i128::from(b.deletions));
    bi + bd - ai + ad
}
