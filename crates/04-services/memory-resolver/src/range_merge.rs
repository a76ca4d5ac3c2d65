use replay_state::Range;

/// Inserts `new` into `ranges`, coalescing it with any range it overlaps or
/// touches, keeping `ranges` sorted and non-overlapping. Mirrors
/// `interval.Merge` from the original resolver's hook callbacks.
pub fn merge(ranges: &mut Vec<Range>, new: Range) {
    let mut merged = new;
    let mut i = 0;
    while i < ranges.len() {
        let r = ranges[i];
        if r.base <= merged.end() && merged.base <= r.end() {
            merged = Range {
                base: merged.base.min(r.base),
                size: merged.end().max(r.end()) - merged.base.min(r.base),
            };
            ranges.remove(i);
        } else {
            i += 1;
        }
    }
    let pos = ranges.partition_point(|r| r.base < merged.base);
    ranges.insert(pos, merged);
}
