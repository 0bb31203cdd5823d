// ============================================================
// Layer 6 — Classification Metrics
// ============================================================
// Precision / recall / F1 from raw label vectors.
//
// Conventions:
//   - Binary labels, positive class = 1
//   - Any metric whose denominator is zero (a class absent
//     from the truth or the predictions) reports 0.0 instead
//     of NaN or a panic. Tiny stratified test sets make this
//     case completely routine, not exceptional.
//
// The Display impl prints the familiar per-class table:
//
//   class  precision  recall  f1      support
//   0      0.6667     1.0000  0.8000  2
//   1      1.0000     0.8000  0.8889  5
//
//   accuracy: 0.8571 (6/7)
//
// Reference: van Rijsbergen (1979) Information Retrieval (F-measure)

use std::fmt;

/// Metrics for a single class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label:     usize,
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
    /// Number of truth samples carrying this label
    pub support:   usize,
}

/// The full evaluation of one prediction run.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub classes:  Vec<ClassMetrics>,
    pub accuracy: f64,
    pub total:    usize,
}

impl ClassificationReport {
    /// Compute per-class metrics over both binary classes.
    /// `truth` and `predicted` must be parallel vectors.
    pub fn compute(truth: &[usize], predicted: &[usize]) -> Self {
        debug_assert_eq!(truth.len(), predicted.len());

        let classes = [0usize, 1]
            .iter()
            .map(|&label| {
                let tp = count(truth, predicted, |t, p| t == label && p == label);
                let fp = count(truth, predicted, |t, p| t != label && p == label);
                let fn_ = count(truth, predicted, |t, p| t == label && p != label);

                let precision = ratio(tp, tp + fp);
                let recall    = ratio(tp, tp + fn_);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1,
                    support: tp + fn_,
                }
            })
            .collect();

        let correct = count(truth, predicted, |t, p| t == p);
        let accuracy = ratio(correct, truth.len());

        Self {
            classes,
            accuracy,
            total: truth.len(),
        }
    }

    /// F1 of a specific class, 0.0 if the class is missing.
    pub fn f1_for(&self, label: usize) -> f64 {
        self.classes
            .iter()
            .find(|c| c.label == label)
            .map_or(0.0, |c| c.f1)
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "class  precision  recall  f1      support")?;
        for c in &self.classes {
            writeln!(
                f,
                "{:<6} {:<10.4} {:<7.4} {:<7.4} {}",
                c.label, c.precision, c.recall, c.f1, c.support,
            )?;
        }
        let correct = (self.accuracy * self.total as f64).round() as usize;
        write!(f, "\naccuracy: {:.4} ({}/{})", self.accuracy, correct, self.total)
    }
}

/// Binary F1 with positive class 1 — the headline number.
pub fn binary_f1(truth: &[usize], predicted: &[usize]) -> f64 {
    ClassificationReport::compute(truth, predicted).f1_for(1)
}

fn count(truth: &[usize], predicted: &[usize], pred: impl Fn(usize, usize) -> bool) -> usize {
    truth
        .iter()
        .zip(predicted.iter())
        .filter(|&(&t, &p)| pred(t, p))
        .count()
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let truth = vec![0, 1, 1, 0, 1];
        let report = ClassificationReport::compute(&truth, &truth);

        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.f1_for(0), 1.0);
        assert_eq!(report.f1_for(1), 1.0);
        assert_eq!(binary_f1(&truth, &truth), 1.0);
    }

    #[test]
    fn test_known_confusion() {
        // truth:     1 1 1 1 0 0
        // predicted: 1 1 0 1 0 1
        // class 1: tp=3 fp=1 fn=1 → p=0.75 r=0.75 f1=0.75
        let truth     = vec![1, 1, 1, 1, 0, 0];
        let predicted = vec![1, 1, 0, 1, 0, 1];

        let f1 = binary_f1(&truth, &predicted);
        assert!((f1 - 0.75).abs() < 1e-9);

        let report = ClassificationReport::compute(&truth, &predicted);
        assert_eq!(report.classes[1].support, 4);
        assert!((report.accuracy - 4.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_absent_class_reports_zero_not_panic() {
        // All-positive truth and predictions — class 0 has no
        // support and no predictions anywhere
        let truth     = vec![1, 1, 1];
        let predicted = vec![1, 1, 1];
        let report = ClassificationReport::compute(&truth, &predicted);

        assert_eq!(report.f1_for(0), 0.0);
        assert_eq!(report.f1_for(1), 1.0);
    }

    #[test]
    fn test_f1_always_in_unit_interval() {
        let truth     = vec![0, 1, 0, 1, 1, 0, 1];
        let predicted = vec![1, 0, 0, 1, 0, 0, 1];
        let f1 = binary_f1(&truth, &predicted);
        assert!((0.0..=1.0).contains(&f1));
    }
}
