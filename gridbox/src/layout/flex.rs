//! Extra-space distribution shared by the row and column axes.
//!
//! Extra space (available minus intrinsic) is split by integer division over
//! the total growth weight. When every weight on an axis is 0 each track is
//! treated as weight 1, so extra space is never silently dropped.

use tracing::trace;

use crate::config::RemainderPolicy;

/// Grow `sizes` by `extra` pixels according to `weights`.
///
/// Returns the number of pixels left unassigned (always 0 with
/// [`RemainderPolicy::LargestWeight`], and less than the total weight with
/// [`RemainderPolicy::Drop`]).
pub fn distribute(sizes: &mut [u32], weights: &[u32], extra: u32, policy: RemainderPolicy) -> u32 {
    debug_assert_eq!(sizes.len(), weights.len(), "one weight per track");
    if sizes.is_empty() || extra == 0 {
        return 0;
    }

    let total: u64 = weights.iter().map(|&w| w as u64).sum();
    let fallback = total == 0;
    let total = if fallback { sizes.len() as u64 } else { total };
    let weight_of = |i: usize| if fallback { 1 } else { weights[i] as u64 };

    let per_unit = extra as u64 / total;
    let mut assigned = 0u64;
    for (i, size) in sizes.iter_mut().enumerate() {
        // per_unit * weight <= extra, which fits in u32.
        let share = (per_unit * weight_of(i)) as u32;
        *size += share;
        assigned += share as u64;
    }

    let remainder = (extra as u64 - assigned) as u32;
    trace!(extra, total, per_unit, remainder, fallback, "distributed extra space");

    match policy {
        RemainderPolicy::Drop => remainder,
        RemainderPolicy::LargestWeight => {
            if remainder > 0 {
                // First index wins among equal weights.
                let target = (0..sizes.len())
                    .rev()
                    .max_by_key(|&i| weight_of(i))
                    .unwrap_or(0);
                sizes[target] += remainder;
            }
            0
        }
    }
}
