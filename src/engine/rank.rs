//! Rank table and lookup by total elapsed time.

use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rank {
    pub name: &'static str,
    /// Inclusive upper bound in seconds; `None` = unbounded.
    pub max_seconds: Option<u32>,
    pub description: &'static str,
}

/// Best to worst, ascending thresholds; last entry is unbounded.
pub static RANKS: [Rank; 5] = [
    Rank {
        name: "一級",
        max_seconds: Some(6),
        description: "この境地に達するまで何年かかりましたか？",
    },
    Rank {
        name: "二級",
        max_seconds: Some(12),
        description: "頂点へあと一歩！",
    },
    Rank {
        name: "三級",
        max_seconds: Some(24),
        description: "焦らずがんばろう。",
    },
    Rank {
        name: "四級",
        max_seconds: Some(48),
        description: "まだまだですね。",
    },
    Rank {
        name: "五級",
        max_seconds: None,
        description: "運がなかったかも。",
    },
];

impl Rank {
    fn covers(&self, elapsed_ms: u64) -> bool {
        match self.max_seconds {
            // seconds <= max  <=>  ms <= max * 1000
            Some(max) => elapsed_ms <= u64::from(max) * 1000,
            None => true,
        }
    }
}

/// First rank whose threshold covers `elapsed_ms`.
pub fn rank_for(elapsed_ms: u64, table: &[Rank]) -> Result<&Rank, GameError> {
    table
        .iter()
        .find(|rank| rank.covers(elapsed_ms))
        .ok_or(GameError::Lookup(elapsed_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(rank_for(0, &RANKS).unwrap().name, "一級");
        assert_eq!(rank_for(6_000, &RANKS).unwrap().name, "一級");
        assert_eq!(rank_for(6_100, &RANKS).unwrap().name, "二級");
        assert_eq!(rank_for(48_000, &RANKS).unwrap().name, "四級");
        assert_eq!(rank_for(48_100, &RANKS).unwrap().name, "五級");
    }

    #[test]
    fn unbounded_tail_always_matches() {
        assert_eq!(rank_for(u64::MAX / 2, &RANKS).unwrap().name, "五級");
    }

    #[test]
    fn longer_time_never_ranks_better() {
        let position = |ms| {
            let rank = rank_for(ms, &RANKS).unwrap();
            RANKS.iter().position(|r| r == rank).unwrap()
        };
        let mut prev = 0;
        for ms in (0..=60_000).step_by(100) {
            let pos = position(ms);
            assert!(pos >= prev, "rank improved at {ms} ms");
            prev = pos;
        }
    }

    #[test]
    fn bounded_table_fails_past_its_end() {
        let table = &RANKS[..2];
        assert!(matches!(
            rank_for(13_000, table),
            Err(GameError::Lookup(13_000))
        ));
    }
}
