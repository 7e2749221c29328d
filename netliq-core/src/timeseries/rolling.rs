/// Trailing simple moving average over exactly `window` observations.
///
/// The output at position `i` is the unweighted mean of cells `i + 1 - window`
/// through `i`. It is undefined when fewer than `window` cells precede it
/// (inclusive) or any cell in the window is undefined. A zero window yields an
/// all-undefined column.
#[must_use]
pub fn rolling_mean(cells: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; cells.len()];
    }
    #[allow(clippy::cast_precision_loss)]
    let n = window as f64;
    (0..cells.len())
        .map(|i| {
            let lo = (i + 1).checked_sub(window)?;
            let sum = cells[lo..=i].iter().copied().sum::<Option<f64>>()?;
            Some(sum / n)
        })
        .collect()
}
