use crate::domain::model::{Document, FeedbackView};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsReport {
    pub total: u64,
    pub promoters: u64,
    pub passives: u64,
    pub detractors: u64,
    pub promoters_pct: f64,
    pub detractors_pct: f64,
    /// Percentage points in [-100, 100], never rounded.
    pub nps_score: f64,
}

/// Net Promoter Score breakdown. Promoters score >= 9, detractors <= 6, both
/// inclusive. Passives are whatever remains after subtraction, so a score
/// outside the 0-10 range (or a missing score) still counts as passive.
pub fn compute_nps(feedback: &[Document]) -> NpsReport {
    let total = feedback.len() as u64;

    let scores: Vec<FeedbackView> = feedback.iter().map(FeedbackView::from).collect();
    let promoters = scores
        .iter()
        .filter(|f| f.score.is_some_and(|s| s >= 9.0))
        .count() as u64;
    let detractors = scores
        .iter()
        .filter(|f| f.score.is_some_and(|s| s <= 6.0))
        .count() as u64;
    let passives = total - promoters - detractors;

    let promoters_pct = if total > 0 {
        promoters as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    let detractors_pct = if total > 0 {
        detractors as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    NpsReport {
        total,
        promoters,
        passives,
        detractors,
        promoters_pct,
        detractors_pct,
        nps_score: promoters_pct - detractors_pct,
    }
}
