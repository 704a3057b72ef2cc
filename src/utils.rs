/// Pick an index with probability proportional to its weight.
///
/// This is the counted-multiset draw the movement policy relies on: a weight
/// of `n` behaves exactly like `n` repeated copies of that entry in a
/// uniform choice. Returns `None` when every weight is zero.
pub fn choose_weighted(rng: &mut fastrand::Rng, weights: &[u32]) -> Option<usize> {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return None;
    }

    let mut ticket = rng.u64(..total);
    for (i, &w) in weights.iter().enumerate() {
        let w = u64::from(w);
        if ticket < w {
            return Some(i);
        }
        ticket -= w;
    }
    unreachable!("ticket is always below the weight total")
}
