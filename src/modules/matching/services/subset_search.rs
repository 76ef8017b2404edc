use std::collections::BTreeMap;

/// Outcome of a bounded subset-sum search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetFill {
    /// Indices into the searched weights, ascending
    pub indices: Vec<usize>,
    pub total: i64,
    /// Total equals the capacity
    pub exact: bool,
    /// The state limit was reached before the search finished
    pub truncated: bool,
}

/// Find the subset of `weights` with the largest total not exceeding `capacity`
///
/// Weights are amounts in minor currency units. Reachable totals are explored
/// item by item in list order; the first path to reach a total is kept, so on
/// ties the subset using earlier items wins. At most `state_limit` distinct
/// totals are tracked, after which the best total found so far is returned.
pub fn best_fill(weights: &[i64], capacity: i64, state_limit: usize) -> SubsetFill {
    // total -> (previous total, item index)
    let mut reachable: BTreeMap<i64, Option<(i64, usize)>> = BTreeMap::new();
    reachable.insert(0, None);
    let mut truncated = false;

    'items: for (idx, &weight) in weights.iter().enumerate() {
        if weight <= 0 || weight > capacity {
            continue;
        }

        let totals: Vec<i64> = reachable
            .range(..=capacity - weight)
            .map(|(total, _)| *total)
            .collect();

        for total in totals.into_iter().rev() {
            let next = total + weight;
            if reachable.contains_key(&next) {
                continue;
            }

            if reachable.len() >= state_limit {
                truncated = true;
                break 'items;
            }

            reachable.insert(next, Some((total, idx)));
            if next == capacity {
                break 'items;
            }
        }
    }

    let best = reachable.keys().next_back().copied().unwrap_or(0);

    let mut indices = Vec::new();
    let mut cursor = best;
    while let Some(Some((previous, idx))) = reachable.get(&cursor) {
        indices.push(*idx);
        cursor = *previous;
    }
    indices.reverse();

    SubsetFill {
        indices,
        total: best,
        exact: best == capacity,
        truncated,
    }
}
