//! Chart data derived from the currently loaded page.
//!
//! Nothing here looks beyond the rows it is handed: the charts describe the
//! page on screen, not the whole result set.

use super::test_result::TestResult;

/// Score at or above which a result counts as passing.
pub const PASS_THRESHOLD: f64 = 0.5;

/// Number of buckets in the output-length histogram.
pub const HISTOGRAM_BUCKETS: usize = 5;

/// One histogram bar covering output lengths in `start..end` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBucket {
    pub start: usize,
    pub end: usize,
    pub count: usize,
}

/// Pass rates for automatic and human scores.
///
/// A rate is `None` when its denominator is zero, so callers never see NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassRates {
    pub auto_rate: Option<f64>,
    pub auto_count: usize,
    pub human_rate: Option<f64>,
    pub human_count: usize,
}

/// Buckets `llm_output` lengths (in characters) into at most `buckets` bars
/// of equal width spanning the shortest to the longest output.
///
/// Returns an empty vector for an empty page or zero buckets.
#[must_use]
pub fn output_length_histogram(results: &[TestResult], buckets: usize) -> Vec<HistogramBucket> {
    let lengths: Vec<usize> = results.iter().map(|r| r.llm_output.chars().count()).collect();
    let (Some(&min), Some(&max)) = (lengths.iter().min(), lengths.iter().max()) else {
        return vec![];
    };
    if buckets == 0 {
        return vec![];
    }

    let width = (max - min + 1).div_ceil(buckets).max(1);
    let bucket_total = (max - min) / width + 1;

    let mut histogram: Vec<HistogramBucket> = (0..bucket_total)
        .map(|i| HistogramBucket {
            start: min + i * width,
            end: min + (i + 1) * width,
            count: 0,
        })
        .collect();

    for length in lengths {
        histogram[(length - min) / width].count += 1;
    }

    histogram
}

/// Computes pass rates over a page of results.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pass_rates(results: &[TestResult]) -> PassRates {
    let auto_count = results.len();
    let auto_passed = results.iter().filter(|r| r.auto_eval >= PASS_THRESHOLD).count();

    let human_scores: Vec<f64> = results.iter().filter_map(|r| r.human_eval).collect();
    let human_count = human_scores.len();
    let human_passed = human_scores.iter().filter(|&&s| s >= PASS_THRESHOLD).count();

    let rate = |passed: usize, total: usize| (total > 0).then(|| passed as f64 / total as f64);

    PassRates {
        auto_rate: rate(auto_passed, auto_count),
        auto_count,
        human_rate: rate(human_passed, human_count),
        human_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(output: &str, auto_eval: f64, human_eval: Option<f64>) -> TestResult {
        TestResult {
            id: output.to_string(),
            input_under_test: String::new(),
            llm_output: output.to_string(),
            criteria: String::new(),
            auto_eval,
            auto_feedback: String::new(),
            human_eval,
            human_feedback: None,
        }
    }

    #[test]
    fn test_histogram_of_empty_page_is_empty() {
        assert!(output_length_histogram(&[], HISTOGRAM_BUCKETS).is_empty());
    }

    #[test]
    fn test_histogram_counts_every_row_once() {
        let rows: Vec<TestResult> = ["a", "abc", "abcdef", "abcdefghij", "abcdefghij"]
            .iter()
            .map(|o| row(o, 1.0, None))
            .collect();
        let histogram = output_length_histogram(&rows, HISTOGRAM_BUCKETS);

        assert!(histogram.len() <= HISTOGRAM_BUCKETS);
        assert_eq!(histogram.iter().map(|b| b.count).sum::<usize>(), rows.len());
        assert_eq!(histogram[0].start, 1);
        assert!(histogram.last().unwrap().end > 10);
    }

    #[test]
    fn test_histogram_with_uniform_lengths_has_one_bar() {
        let rows = vec![row("same", 1.0, None), row("four", 0.0, None)];
        let histogram = output_length_histogram(&rows, HISTOGRAM_BUCKETS);
        assert_eq!(histogram, vec![HistogramBucket { start: 4, end: 5, count: 2 }]);
    }

    #[test]
    fn test_histogram_counts_characters_not_bytes() {
        let rows = vec![row("héllo", 1.0, None)];
        assert_eq!(output_length_histogram(&rows, 3)[0].start, 5);
    }

    #[test]
    fn test_pass_rates() {
        let rows = vec![
            row("a", 0.9, Some(1.0)),
            row("b", 0.5, Some(0.2)),
            row("c", 0.1, None),
            row("d", 0.0, None),
        ];
        let rates = pass_rates(&rows);
        assert_eq!(rates.auto_count, 4);
        assert_eq!(rates.auto_rate, Some(0.5));
        assert_eq!(rates.human_count, 2);
        assert_eq!(rates.human_rate, Some(0.5));
    }

    #[test]
    fn test_human_rate_without_human_scores_is_none() {
        let rates = pass_rates(&[row("a", 1.0, None)]);
        assert_eq!(rates.auto_rate, Some(1.0));
        assert_eq!(rates.human_rate, None);
        assert_eq!(pass_rates(&[]).auto_rate, None);
    }
}
