//! Picks which frame positions of a video get sent for analysis.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingPolicy {
    /// Evenly spaced positions across the whole video.
    #[default]
    Stride,
    /// The first positions, truncated at the sample budget.
    Head,
}

/// Returns at most `max_samples` strictly increasing frame positions,
/// starting at 0. With [`SamplingPolicy::Stride`] the positions are spaced
/// `max(1, total_frames / max_samples)` apart.
pub fn sample(total_frames: i64, max_samples: usize, policy: SamplingPolicy) -> Result<Vec<i64>> {
    if total_frames <= 0 {
        return Err(Error::NoFrames);
    }
    if max_samples == 0 {
        return Ok(Vec::new());
    }

    let indices = match policy {
        SamplingPolicy::Stride => {
            let interval = (total_frames / max_samples as i64).max(1);
            (0..max_samples as i64)
                .map(|i| i * interval)
                .take_while(|&index| index <= total_frames - 1)
                .collect()
        }
        SamplingPolicy::Head => (0..total_frames.min(max_samples as i64)).collect(),
    };
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_spaces_indices_evenly() {
        let indices = sample(90, 5, SamplingPolicy::Stride).unwrap();
        assert_eq!(indices, vec![0, 18, 36, 54, 72]);
    }

    #[test]
    fn stride_returns_min_of_budget_and_total() {
        for total in 1..40 {
            for budget in 1..20 {
                let indices = sample(total, budget, SamplingPolicy::Stride).unwrap();
                assert_eq!(indices.len() as i64, total.min(budget as i64));
                assert_eq!(indices[0], 0);
                assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
                assert!(indices.iter().all(|&index| index < total));
            }
        }
    }

    #[test]
    fn empty_video_is_an_error() {
        assert!(matches!(
            sample(0, 5, SamplingPolicy::Stride),
            Err(Error::NoFrames)
        ));
        assert!(matches!(
            sample(-1, 1, SamplingPolicy::Head),
            Err(Error::NoFrames)
        ));
    }

    #[test]
    fn head_truncates_at_budget() {
        assert_eq!(sample(90, 3, SamplingPolicy::Head).unwrap(), vec![0, 1, 2]);
        assert_eq!(sample(2, 5, SamplingPolicy::Head).unwrap(), vec![0, 1]);
    }

    #[test]
    fn zero_budget_yields_nothing() {
        assert!(sample(90, 0, SamplingPolicy::Stride).unwrap().is_empty());
    }
}
