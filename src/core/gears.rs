/// Step from `current` to the neighbouring gear in `gears`.
///
/// Zero entries are ignored. The position in the list is found by nearest value rather than
/// by index, so editing the list never leaves the selection pointing at the wrong entry.
/// Without `wrap` the ends of the list are sticky.
pub fn cycle_gear(gears: &[f32], current: f32, forward: bool, wrap: bool) -> f32 {
    let usable: Vec<f32> = gears.iter().copied().filter(|g| *g != 0.0).collect();
    let Some(index) = nearest_index(&usable, current) else {
        return current;
    };

    let last = usable.len() - 1;
    let next = match (forward, wrap) {
        (true, _) if index < last => index + 1,
        (true, true) => 0,
        (true, false) => last,
        (false, _) if index > 0 => index - 1,
        (false, true) => last,
        (false, false) => 0,
    };
    usable[next]
}

fn nearest_index(values: &[f32], target: f32) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
        .map(|(index, _)| index)
}
