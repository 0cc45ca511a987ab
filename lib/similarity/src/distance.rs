//! Vector similarity measures
//!
//! Every function here is total: inputs that leave a measure undefined
//! (zero norm, zero variance, mismatched lengths) yield a neutral 0.0 rather
//! than NaN, so min/aggregate steps downstream never see a NaN.
//! Accumulation happens in f64; results are returned as f32.

/// Calculate cosine similarity between two vectors
///
/// # Arguments
/// * `a` - First vector
/// * `b` - Second vector
///
/// # Returns
/// Similarity in [-1.0, 1.0]; 0.0 if either vector has zero norm or the
/// lengths differ
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0) as f32
}

/// Calculate the Pearson correlation coefficient between two vectors
///
/// # Returns
/// Correlation in [-1.0, 1.0]; 0.0 if either vector is constant, the
/// vectors have fewer than two elements, or the lengths differ
pub fn pearson(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.len() < 2 {
        return 0.0;
    }

    let n = a.len() as f64;
    let mean_a = a.iter().map(|&x| f64::from(x)).sum::<f64>() / n;
    let mean_b = b.iter().map(|&x| f64::from(x)).sum::<f64>() / n;

    let mut cov = 0.0f64;
    let mut ss_a = 0.0f64;
    let mut ss_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let dx = f64::from(x) - mean_a;
        let dy = f64::from(y) - mean_b;
        cov += dx * dy;
        ss_a += dx * dx;
        ss_b += dy * dy;
    }

    if ss_a == 0.0 || ss_b == 0.0 {
        return 0.0;
    }

    (cov / (ss_a.sqrt() * ss_b.sqrt())).clamp(-1.0, 1.0) as f32
}

/// Error of `combo` against `user`, weighted by the user's own values
///
/// `sum(|u_i - c_i| * u_i) / sum(u_i)`, or 0.0 when the user vector sums to
/// zero. Axes the user does not care about contribute nothing.
pub fn weighted_error(user: &[f32], combo: &[f32]) -> f32 {
    let total: f64 = user.iter().map(|&u| f64::from(u)).sum();
    if total == 0.0 {
        return 0.0;
    }

    let weighted: f64 = user
        .iter()
        .zip(combo)
        .map(|(&u, &c)| (f64::from(u) - f64::from(c)).abs() * f64::from(u))
        .sum();

    (weighted / total) as f32
}

/// Elementwise mean of equally sized vectors
///
/// Returns an empty vector when given no vectors. Sums run per axis in f64
/// so the result does not depend on the order of `vectors` for realistic
/// inputs.
pub fn mean_vector(vectors: &[&[f32]]) -> Vec<f32> {
    let Some(first) = vectors.first() else {
        return Vec::new();
    };

    let mut sums = vec![0.0f64; first.len()];
    for v in vectors {
        for (acc, &x) in sums.iter_mut().zip(v.iter()) {
            *acc += f64::from(x);
        }
    }

    let n = vectors.len() as f64;
    sums.into_iter().map(|s| (s / n) as f32).collect()
}
