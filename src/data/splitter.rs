// ============================================================
// Layer 4 — Stratified Train/Test Splitter
// ============================================================
// Splits samples into two sets:
//   - Training set: used to fit the scaler and the forest
//   - Test set:     used to measure performance on unseen data
//
// Why stratified instead of a plain shuffle?
//   The labeled set here is tiny (tens of documents). A plain
//   80/20 shuffle can easily put every "not publishable" paper
//   into the same partition, leaving the other partition with
//   a single class — which makes both training and evaluation
//   meaningless. Stratification shuffles and splits each label
//   group separately, so both partitions keep the class ratio.
//
// Why a seeded RNG instead of thread_rng?
//   Reproducibility. The same seed must give the same split,
//   the same fitted model, and the same F1 on every run.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom,
// the standard unbiased shuffle algorithm.
//
// Reference: rand crate documentation
//            Rust Book §8 (Vectors)

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices of the two partitions. Indices point into the
/// caller's parallel feature/label arrays.
#[derive(Debug, Clone)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test:  Vec<usize>,
}

/// Stratified split of `labels` into train/test index sets.
///
/// # Arguments
/// * `labels`         - One label (0/1) per sample row
/// * `train_fraction` - Proportion for training, e.g. 0.8 = 80%
/// * `seed`           - RNG seed; identical seeds give identical splits
///
/// Each label group is shuffled and split independently, so
/// e.g. 5 negatives + 10 positives at 0.8 become exactly
/// 4+8 training and 1+2 test samples.
pub fn stratified_split(labels: &[usize], train_fraction: f64, seed: u64) -> SplitIndices {
    let mut rng = StdRng::seed_from_u64(seed);

    // Distinct labels in sorted order so the iteration order
    // (and therefore the RNG stream) is deterministic
    let mut classes: Vec<usize> = labels.to_vec();
    classes.sort_unstable();
    classes.dedup();

    let mut train = Vec::new();
    let mut test  = Vec::new();

    for class in classes {
        // Indices of all samples carrying this label
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == class)
            .map(|(i, _)| i)
            .collect();

        // Fisher-Yates shuffle — every permutation equally likely
        members.shuffle(&mut rng);

        // Round per class, clamped to valid range
        let split_at = ((members.len() as f64) * train_fraction).round() as usize;
        let split_at = split_at.min(members.len());

        test.extend_from_slice(&members[split_at..]);
        train.extend_from_slice(&members[..split_at]);
    }

    tracing::debug!(
        "Stratified split: {} train, {} test (seed {})",
        train.len(),
        test.len(),
        seed,
    );

    SplitIndices { train, test }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respects_class_ratios() {
        // 5 negatives + 10 positives at 80/20 → 12 train / 3 test
        let labels: Vec<usize> = [vec![0; 5], vec![1; 10]].concat();
        let split = stratified_split(&labels, 0.8, 42);

        assert_eq!(split.train.len(), 12);
        assert_eq!(split.test.len(), 3);

        let test_negatives = split.test.iter().filter(|&&i| labels[i] == 0).count();
        let test_positives = split.test.iter().filter(|&&i| labels[i] == 1).count();
        assert_eq!(test_negatives, 1);
        assert_eq!(test_positives, 2);
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let labels: Vec<usize> = (0..40).map(|i| i % 2).collect();
        let a = stratified_split(&labels, 0.8, 7);
        let b = stratified_split(&labels, 0.8, 7);
        assert_eq!(a.train, b.train);
        assert_eq!(a.test, b.test);
    }

    #[test]
    fn test_different_seeds_differ() {
        let labels: Vec<usize> = (0..40).map(|i| i % 2).collect();
        let a = stratified_split(&labels, 0.8, 1);
        let b = stratified_split(&labels, 0.8, 2);
        assert_ne!(a.train, b.train);
    }

    #[test]
    fn test_no_sample_lost_or_duplicated() {
        let labels: Vec<usize> = (0..25).map(|i| usize::from(i % 3 == 0)).collect();
        let split = stratified_split(&labels, 0.7, 99);

        let mut all: Vec<usize> = split.train.iter().chain(split.test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input() {
        let split = stratified_split(&[], 0.8, 42);
        assert!(split.train.is_empty());
        assert!(split.test.is_empty());
    }
}
