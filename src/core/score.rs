use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal risk band. Ordering follows severity: `Low < Moderate < High`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Both bounds are exclusive from below: a score sitting exactly on a
    /// threshold lands in the lower band.
    fn from_score(score: f64, moderate_above: f64, high_above: f64) -> Self {
        if score > high_above {
            Self::High
        } else if score > moderate_above {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Placeholder coefficients. Keep them as-is.
const CARDIO_MODERATE_ABOVE: f64 = 10.0;
const CARDIO_HIGH_ABOVE: f64 = 15.0;
const DIABETES_MODERATE_ABOVE: f64 = 15.0;
const DIABETES_HIGH_ABOVE: f64 = 20.0;
const COPD_MODERATE_ABOVE: f64 = 15.0;
const COPD_HIGH_ABOVE: f64 = 25.0;

const SMOKER_POINTS: f64 = 10.0;
const FAMILY_HISTORY_POINTS: f64 = 10.0;

fn flag_points(flag: bool, points: f64) -> f64 {
    if flag { points } else { 0.0 }
}

pub fn cardiovascular_score(
    age: i32,
    systolic_bp: i32,
    is_current_smoker: bool,
    cholesterol: i32,
) -> f64 {
    f64::from(age) * 0.1
        + f64::from(systolic_bp) * 0.05
        + flag_points(is_current_smoker, SMOKER_POINTS)
        + f64::from(cholesterol) * 0.02
}

pub fn cardiovascular_risk(
    age: i32,
    systolic_bp: i32,
    is_current_smoker: bool,
    cholesterol: i32,
) -> RiskLevel {
    let score = cardiovascular_score(age, systolic_bp, is_current_smoker, cholesterol);
    log::trace!("cardiovascular score {score:.2}");
    RiskLevel::from_score(score, CARDIO_MODERATE_ABOVE, CARDIO_HIGH_ABOVE)
}

pub fn diabetes_score(bmi: f64, age: i32, family_history: bool, fasting_glucose: i32) -> f64 {
    bmi * 0.3
        + f64::from(age) * 0.1
        + flag_points(family_history, FAMILY_HISTORY_POINTS)
        + f64::from(fasting_glucose) * 0.02
}

pub fn diabetes_risk(bmi: f64, age: i32, family_history: bool, fasting_glucose: i32) -> RiskLevel {
    let score = diabetes_score(bmi, age, family_history, fasting_glucose);
    log::trace!("diabetes score {score:.2}");
    RiskLevel::from_score(score, DIABETES_MODERATE_ABOVE, DIABETES_HIGH_ABOVE)
}

pub fn copd_score(smoking_years: i32, age: i32, fev1: i32) -> f64 {
    f64::from(smoking_years) * 0.5 + f64::from(age) * 0.2 - f64::from(fev1) * 0.1
}

pub fn copd_risk(smoking_years: i32, age: i32, fev1: i32) -> RiskLevel {
    let score = copd_score(smoking_years, age, fev1);
    log::trace!("copd score {score:.2}");
    RiskLevel::from_score(score, COPD_MODERATE_ABOVE, COPD_HIGH_ABOVE)
}
