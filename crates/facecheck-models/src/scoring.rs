//! Score vector normalization and match selection.

/// Raw values above this are assumed to be logits rather than
/// probabilities, and the vector gets softmax-normalized.
pub const LOGIT_CUTOFF: f64 = 1.5;

/// Softmax over `scores`, in the max-subtracted form:
/// `p_i = exp(s_i - max) / sum_j exp(s_j - max)`.
///
/// Subtracting the max keeps the exponents from overflowing for large
/// logits; the output sums to 1 and preserves the ranking of the input.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

/// Normalize a raw score vector into probabilities.
///
/// Vectors already in probability shape (no value above [`LOGIT_CUTOFF`])
/// pass through unchanged, so a well-behaved server distribution keeps
/// its exact values.
pub fn normalize(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max > LOGIT_CUTOFF {
        softmax(scores)
    } else {
        scores.to_vec()
    }
}

/// Index and value of the best score, `None` for an empty slice.
///
/// The scan uses strictly-greater comparison in catalog order, so ties
/// always resolve to the lowest index.
pub fn arg_max(scores: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((index, score));
        }
    }
    best
}
