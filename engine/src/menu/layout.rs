//! Menu layout math.
//!
//! Rows stack vertically `margin` apart, centred on y = 0, with the first
//! label on top. Letters sit side by side with no kerning.

/// Half the height of the whole stack of `count` rows.
pub fn total_offset(count: usize, margin: f32) -> f32 {
    count.saturating_sub(1) as f32 * margin * 0.5
}

/// Height of the ground plane of word `index`.
pub fn ground_y(index: usize, count: usize, margin: f32) -> f32 {
    index as f32 * margin - total_offset(count, margin)
}

/// Height at which the letters of word `index` are dropped.
///
/// Rows are listed top to bottom, so the first word lands on the highest
/// ground.
pub fn row_y(index: usize, count: usize, margin: f32) -> f32 {
    count.saturating_sub(index + 1) as f32 * margin - total_offset(count, margin)
}

/// Running x offset of each letter (including its own width) and the total
/// width of the word.
pub fn running_offsets(widths: &[f32]) -> (Vec<f32>, f32) {
    let mut total = 0.0;
    let offsets = widths
        .iter()
        .map(|w| {
            total += w;
            total
        })
        .collect();
    (offsets, total)
}

/// How far a letter is moved along x to centre its word.
pub fn recenter_shift(width: f32, total_width: f32) -> f32 {
    -(width + total_width * 0.5)
}
