use rand::Rng;

pub const MIN_SCORE: u16 = 1;
pub const MAX_SCORE: u16 = 999;

/// Source of credit scores for new applications.
pub trait ScoreSource: Send + Sync {
    fn next_score(&self) -> u16;
}

/// Uniform draw from `MIN_SCORE..=MAX_SCORE`. Not cryptographically secure.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomScore;

impl ScoreSource for RandomScore {
    fn next_score(&self) -> u16 {
        rand::thread_rng().gen_range(MIN_SCORE..=MAX_SCORE)
    }
}

/// Always yields the same score.
#[derive(Debug, Clone, Copy)]
pub struct FixedScore(pub u16);

impl ScoreSource for FixedScore {
    fn next_score(&self) -> u16 {
        self.0
    }
}
