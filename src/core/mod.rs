pub mod report;
pub mod score;

use crate::core::score::RiskLevel;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SmokingStatus {
    #[default]
    NonSmoker,
    CurrentSmoker,
    FormerSmoker,
}

impl SmokingStatus {
    pub fn is_current(self) -> bool {
        matches!(self, Self::CurrentSmoker)
    }
}

impl fmt::Display for SmokingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonSmoker => write!(f, "Non-smoker"),
            Self::CurrentSmoker => write!(f, "Current smoker"),
            Self::FormerSmoker => write!(f, "Former smoker"),
        }
    }
}

/// One filled-in form. Built once per evaluation and never mutated.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatientInputs {
    pub age: i32,
    pub bmi: f64,
    pub sex: Sex,
    pub smoking_status: SmokingStatus,
    pub systolic_bp: i32,
    pub cholesterol: i32,
    pub fasting_glucose: i32,
    pub family_history_diabetes: bool,
    pub smoking_years: i32,
    pub fev1: i32,
}

impl PatientInputs {
    pub fn is_current_smoker(&self) -> bool {
        self.smoking_status.is_current()
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Condition {
    Cardiovascular,
    Diabetes,
    #[serde(rename = "COPD")]
    Copd,
}

impl Condition {
    pub const ALL: [Self; 3] = [Self::Cardiovascular, Self::Diabetes, Self::Copd];
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cardiovascular => write!(f, "Cardiovascular"),
            Self::Diabetes => write!(f, "Diabetes"),
            Self::Copd => write!(f, "COPD"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RiskAssessment {
    pub cardiovascular: RiskLevel,
    pub diabetes: RiskLevel,
    pub copd: RiskLevel,
    pub assessed_at: DateTime<Local>,
}

impl RiskAssessment {
    pub fn level(&self, condition: Condition) -> RiskLevel {
        match condition {
            Condition::Cardiovascular => self.cardiovascular,
            Condition::Diabetes => self.diabetes,
            Condition::Copd => self.copd,
        }
    }

    /// Results in display order.
    pub fn results(&self) -> impl Iterator<Item = (Condition, RiskLevel)> + '_ {
        Condition::ALL
            .into_iter()
            .map(|condition| (condition, self.level(condition)))
    }

    pub fn highest(&self) -> RiskLevel {
        self.cardiovascular.max(self.diabetes).max(self.copd)
    }

    pub fn timestamp(&self) -> String {
        self.assessed_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

pub fn assess(inputs: &PatientInputs) -> RiskAssessment {
    assess_at(inputs, Local::now())
}

pub fn assess_at(inputs: &PatientInputs, assessed_at: DateTime<Local>) -> RiskAssessment {
    let assessment = RiskAssessment {
        cardiovascular: score::cardiovascular_risk(
            inputs.age,
            inputs.systolic_bp,
            inputs.is_current_smoker(),
            inputs.cholesterol,
        ),
        diabetes: score::diabetes_risk(
            inputs.bmi,
            inputs.age,
            inputs.family_history_diabetes,
            inputs.fasting_glucose,
        ),
        copd: score::copd_risk(inputs.smoking_years, inputs.age, inputs.fev1),
        assessed_at,
    };

    log::debug!(
        "assessed cardiovascular={} diabetes={} copd={}",
        assessment.cardiovascular,
        assessment.diabetes,
        assessment.copd
    );
    assessment
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn sample_inputs() -> PatientInputs {
        PatientInputs {
            age: 30,
            bmi: 22.0,
            sex: Sex::Male,
            smoking_status: SmokingStatus::NonSmoker,
            systolic_bp: 120,
            cholesterol: 180,
            fasting_glucose: 90,
            family_history_diabetes: true,
            smoking_years: 0,
            fev1: 80,
        }
    }

    #[test]
    fn default_form_values_assess_as_expected() {
        // cardio: 3 + 6 + 0 + 3.6 = 12.6, diabetes: 6.6 + 3 + 10 + 1.8 = 21.4,
        // copd: 0 + 6 - 8 = -2
        let assessment = assess(&sample_inputs());
        assert_eq!(assessment.cardiovascular, RiskLevel::Moderate);
        assert_eq!(assessment.diabetes, RiskLevel::High);
        assert_eq!(assessment.copd, RiskLevel::Low);
        assert_eq!(assessment.highest(), RiskLevel::High);
    }

    #[test]
    fn former_smoker_is_not_current() {
        let mut inputs = sample_inputs();
        inputs.smoking_status = SmokingStatus::FormerSmoker;
        let former = assess(&inputs);
        inputs.smoking_status = SmokingStatus::NonSmoker;
        let never = assess(&inputs);
        assert_eq!(former.cardiovascular, never.cardiovascular);

        inputs.smoking_status = SmokingStatus::CurrentSmoker;
        assert_eq!(assess(&inputs).cardiovascular, RiskLevel::High);
    }

    #[test]
    fn conditions_only_read_their_own_inputs() {
        let mut inputs = sample_inputs();
        let before = assess(&inputs);

        inputs.fev1 = 20;
        inputs.smoking_years = 60;
        let after = assess(&inputs);
        assert_eq!(before.cardiovascular, after.cardiovascular);
        assert_eq!(before.diabetes, after.diabetes);
        assert_ne!(before.copd, after.copd);
    }

    #[test]
    fn results_follow_display_order() {
        let assessment = assess(&sample_inputs());
        let order: Vec<Condition> = assessment.results().map(|(c, _)| c).collect();
        assert_eq!(order, Condition::ALL.to_vec());
    }

    #[test]
    fn timestamp_uses_fixed_layout() {
        let at = Local.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        let assessment = assess_at(&sample_inputs(), at);
        assert_eq!(assessment.timestamp(), "2024-03-05 07:08:09");
    }
}
