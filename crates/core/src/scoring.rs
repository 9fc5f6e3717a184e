//! Scoring module - per-lock reward rule
//!
//! Every lock earns `1 + lines_cleared^2 * board_width`. A lock that ends the
//! episode through overflow has the penalty subtracted once.

use crate::types::{LOCK_REWARD, OVERFLOW_PENALTY};

/// Reward for a single lock
///
/// ```
/// use rl_tetris_core::calculate_reward;
///
/// assert_eq!(calculate_reward(0, 10, false), 1);
/// assert_eq!(calculate_reward(4, 10, false), 161);
/// assert_eq!(calculate_reward(0, 10, true), -4);
/// ```
pub fn calculate_reward(lines_cleared: u32, board_width: usize, overflow: bool) -> i32 {
    let lines = lines_cleared as i32;
    let base = LOCK_REWARD + lines * lines * board_width as i32;
    if overflow {
        base - OVERFLOW_PENALTY
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_strictly_increases_with_lines() {
        let r: Vec<i32> = [0, 1, 2, 3, 4]
            .iter()
            .map(|&n| calculate_reward(n, 10, false))
            .collect();
        assert_eq!(r, vec![1, 11, 41, 91, 161]);
        assert!(r.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_overflow_penalty_applied_once() {
        for n in 0..=4 {
            for width in [4usize, 6, 10] {
                assert_eq!(
                    calculate_reward(n, width, true),
                    calculate_reward(n, width, false) - 5
                );
            }
        }
    }

    #[test]
    fn test_reward_scales_with_width() {
        assert_eq!(calculate_reward(1, 6, false), 7);
        assert_eq!(calculate_reward(2, 6, false), 25);
    }
}
