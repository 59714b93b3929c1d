use crate::model::progress::Score;

pub const BRONZE_THRESHOLD: u32 = 50;
pub const SILVER_THRESHOLD: u32 = 100;
pub const GOLD_THRESHOLD: u32 = 150;

/// Achievement tier derived from the score. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Badge {
    Bronze,
    Silver,
    Gold,
}

impl Badge {
    /// Returns the highest tier whose threshold `score` reaches, or `None` below bronze.
    #[must_use]
    pub fn for_score(score: Score) -> Option<Self> {
        let points = score.points();
        if points >= GOLD_THRESHOLD {
            Some(Self::Gold)
        } else if points >= SILVER_THRESHOLD {
            Some(Self::Silver)
        } else if points >= BRONZE_THRESHOLD {
            Some(Self::Bronze)
        } else {
            None
        }
    }
}
