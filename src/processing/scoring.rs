//! Sub-score composition and the final weighted blend

use serde::{Deserialize, Serialize};

pub const KEYWORD_WEIGHT: f64 = 0.50;
pub const COMPLETENESS_WEIGHT: f64 = 0.30;
pub const FORMAT_WEIGHT: f64 = 0.20;
pub const FORMAT_FLOOR: u32 = 10;
/// Largest share of the final score an external prediction can claim.
pub const MAX_PREDICTION_SHARE: f64 = 0.4;

const DENSITY_IDEAL_POINTS: f64 = 25.0;
const DENSITY_LOW_POINTS: f64 = 12.0;
const DENSITY_HIGH_POINTS: f64 = 5.0;
const DENSITY_STUFFING_POINTS: f64 = -20.0;

const POINTS_PER_UNIQUE_KEYWORD: f64 = 1.5;
const MAX_VARIETY_POINTS: f64 = 25.0;

const POINTS_PER_OVERLAP_PERCENT: f64 = 0.4;
const MAX_JOB_MATCH_POINTS: f64 = 30.0;
const NO_JOB_DESCRIPTION_POINTS: f64 = 5.0;

const POINTS_PER_METRIC: f64 = 6.0;
const MAX_METRIC_POINTS: f64 = 30.0;
const NO_METRICS_POINTS: f64 = -15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_score: u32,
    pub format_score: u32,
    pub completeness_score: u32,
    pub overall_score: u32,
}

/// A score predicted by some outside model, with its confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalPrediction {
    pub score: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordScoreInputs {
    pub keyword_density: f64,
    pub unique_keywords: usize,
    /// Job description overlap percentage, when a job description was given.
    pub job_overlap: Option<u32>,
    pub metric_count: usize,
}

/// Points contributed by each part of the keyword sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub density_points: f64,
    pub variety_points: f64,
    pub job_match_points: f64,
    pub metric_points: f64,
    pub total: u32,
}

pub fn keyword_score(inputs: &KeywordScoreInputs) -> KeywordScore {
    let density = inputs.keyword_density;
    let density_points = if (3.0..=8.0).contains(&density) {
        DENSITY_IDEAL_POINTS
    } else if (2.0..3.0).contains(&density) {
        DENSITY_LOW_POINTS
    } else if density > 8.0 && density <= 12.0 {
        DENSITY_HIGH_POINTS
    } else if density > 12.0 {
        DENSITY_STUFFING_POINTS
    } else {
        0.0
    };

    let variety_points =
        (inputs.unique_keywords as f64 * POINTS_PER_UNIQUE_KEYWORD).min(MAX_VARIETY_POINTS);

    let job_match_points = match inputs.job_overlap {
        Some(overlap) => (overlap as f64 * POINTS_PER_OVERLAP_PERCENT).min(MAX_JOB_MATCH_POINTS),
        None => NO_JOB_DESCRIPTION_POINTS,
    };

    let metric_points = if inputs.metric_count == 0 {
        NO_METRICS_POINTS
    } else {
        (inputs.metric_count as f64 * POINTS_PER_METRIC).min(MAX_METRIC_POINTS)
    };

    let raw = density_points + variety_points + job_match_points + metric_points;

    KeywordScore {
        density_points,
        variety_points,
        job_match_points,
        metric_points,
        total: clamp_score(raw),
    }
}

/// Format score is the ATS compatibility score, never below the floor.
pub fn format_score(ats_score: u32) -> u32 {
    ats_score.clamp(FORMAT_FLOOR, 100)
}

/// Blend the three sub-scores, optionally pulled toward an external prediction.
pub fn aggregate(
    keyword_score: u32,
    completeness_score: u32,
    format_score: u32,
    prediction: Option<&ExternalPrediction>,
) -> ScoreBreakdown {
    let base = keyword_score as f64 * KEYWORD_WEIGHT
        + completeness_score as f64 * COMPLETENESS_WEIGHT
        + format_score as f64 * FORMAT_WEIGHT;

    let blended = match prediction {
        Some(p) => {
            let confidence = p.confidence.clamp(0.0, 1.0);
            let predicted = p.score.clamp(0.0, 100.0);
            let share = confidence * MAX_PREDICTION_SHARE;
            base * (1.0 - share) + predicted * share
        }
        None => base,
    };

    ScoreBreakdown {
        keyword_score,
        format_score,
        completeness_score,
        overall_score: clamp_score(blended),
    }
}

fn clamp_score(raw: f64) -> u32 {
    raw.round().clamp(0.0, 100.0) as u32
}
