// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Competition ranking for the leaderboard.
//!
//! Lower total hours is better. Tied totals share a rank and the next
//! distinct total takes its 1-based position, so gaps appear after tie
//! groups (1, 1, 3, 4, ...).

use crate::reporting::types::{LeaderboardRow, PublicUser};
use crate::reporting::{MIN_DISPLAYED_STREAK, TOP_N};

/// One user's summed hours over the resolved range, ready for ranking.
#[derive(Debug, Clone)]
pub struct UserTotal {
    pub user_id: String,
    pub display_name: String,
    /// Sum over the range, already rounded to 2 decimals.
    pub total_hours: f64,
    /// Full-history streak length in weeks.
    pub streak: u32,
}

/// Rank totals ascending by hours and assign competition ranks.
///
/// Ties on `total_hours` are broken by `user_id` ascending, making the
/// output deterministic for equal inputs. Equality for rank sharing is
/// exact on the rounded totals.
pub fn rank(mut totals: Vec<UserTotal>) -> Vec<LeaderboardRow> {
    totals.sort_by(|a, b| {
        a.total_hours
            .total_cmp(&b.total_hours)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    let mut rows = Vec::with_capacity(totals.len());
    let mut prev: Option<(f64, u32)> = None;

    for (position, total) in totals.into_iter().enumerate() {
        let rank = match prev {
            Some((hours, rank)) if hours == total.total_hours => rank,
            _ => position as u32 + 1,
        };
        prev = Some((total.total_hours, rank));

        rows.push(LeaderboardRow {
            rank,
            user: PublicUser {
                id: total.user_id,
                name: total.display_name,
            },
            total_hours: total.total_hours,
            top3: rank <= TOP_N,
            streak: (total.streak >= MIN_DISPLAYED_STREAK).then_some(total.streak),
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(user: &str, hours: f64) -> UserTotal {
        UserTotal {
            user_id: user.to_string(),
            display_name: user.to_uppercase(),
            total_hours: hours,
            streak: 0,
        }
    }

    #[test]
    fn test_ascending_order_lowest_wins() {
        let rows = rank(vec![total("a", 12.0), total("b", 4.0), total("c", 8.0)]);

        assert_eq!(rows[0].user.id, "b");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].user.id, "c");
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[2].user.id, "a");
        assert_eq!(rows[2].rank, 3);
    }

    #[test]
    fn test_ties_share_rank_with_gap_after() {
        let rows = rank(vec![total("a", 5.0), total("b", 5.0), total("c", 8.0)]);

        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 1);
        assert_eq!(rows[2].rank, 3);
    }

    #[test]
    fn test_top3_flag_covers_shared_ranks() {
        let rows = rank(vec![
            total("a", 5.0),
            total("b", 5.0),
            total("c", 8.0),
            total("d", 9.0),
        ]);

        assert!(rows[0].top3);
        assert!(rows[1].top3);
        assert!(rows[2].top3);
        assert!(!rows[3].top3);
        assert_eq!(rows[3].rank, 4);
    }

    #[test]
    fn test_tie_break_is_user_id_ascending() {
        let rows = rank(vec![total("zed", 5.0), total("amy", 5.0)]);

        assert_eq!(rows[0].user.id, "amy");
        assert_eq!(rows[1].user.id, "zed");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 1);
    }

    #[test]
    fn test_short_streaks_omitted_from_rows() {
        let mut one_week = total("a", 5.0);
        one_week.streak = 1;
        let mut long = total("b", 6.0);
        long.streak = 4;

        let rows = rank(vec![one_week, long]);

        assert_eq!(rows[0].streak, None);
        assert_eq!(rows[1].streak, Some(4));
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(vec![]).is_empty());
    }
}
