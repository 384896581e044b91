//! Product id allocation.
//!
//! Ids are small positive integers. A new product takes the lowest id that is
//! not in use, so the id of a deleted product is handed out again:
//!
//! ```
//! use stockpile::ids::next_id;
//!
//! assert_eq!(next_id([]), 1);
//! assert_eq!(next_id([1, 2, 3]), 4);
//! assert_eq!(next_id([1, 3]), 2);
//! ```

use std::collections::BTreeSet;

/// Returns the smallest positive id absent from `ids`.
pub fn next_id<I: IntoIterator<Item = u32>>(ids: I) -> u32 {
    let used: BTreeSet<u32> = ids.into_iter().filter(|id| *id > 0).collect();
    let mut candidate = 1;
    for id in used {
        if id != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}
