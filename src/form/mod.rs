pub mod prompt;

use crate::config::FormDefaults;
use crate::core::{PatientInputs, Sex, SmokingStatus};
use anyhow::{Result, bail};
use prompt::Prompter;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy)]
pub struct IntField {
    pub name: &'static str,
    pub label: &'static str,
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct FloatField {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

pub const AGE: IntField = IntField {
    name: "age",
    label: "Age",
    min: 18,
    max: 100,
};
pub const BMI: FloatField = FloatField {
    name: "bmi",
    label: "BMI",
    min: 10.0,
    max: 50.0,
};
pub const SYSTOLIC_BP: IntField = IntField {
    name: "systolic_bp",
    label: "Systolic Blood Pressure (mmHg)",
    min: 90,
    max: 200,
};
pub const CHOLESTEROL: IntField = IntField {
    name: "cholesterol",
    label: "Total Cholesterol (mg/dL)",
    min: 100,
    max: 300,
};
pub const FASTING_GLUCOSE: IntField = IntField {
    name: "fasting_glucose",
    label: "Fasting Glucose (mg/dL)",
    min: 50,
    max: 300,
};
pub const SMOKING_YEARS: IntField = IntField {
    name: "smoking_years",
    label: "Years of Smoking (if applicable)",
    min: 0,
    max: 60,
};
pub const FEV1: IntField = IntField {
    name: "fev1",
    label: "FEV1 (%)",
    min: 20,
    max: 100,
};

impl IntField {
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn check(&self, value: i32) -> Result<i32> {
        if !self.contains(value) {
            bail!(
                "{} must be between {} and {} (got {})",
                self.name,
                self.min,
                self.max,
                value
            );
        }
        Ok(value)
    }
}

impl FloatField {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn check(&self, value: f64) -> Result<f64> {
        if !self.contains(value) {
            bail!(
                "{} must be between {:.1} and {:.1} (got {})",
                self.name,
                self.min,
                self.max,
                value
            );
        }
        Ok(value)
    }
}

/// Range-checks every numeric field of an already-built form.
pub fn check_inputs(inputs: &PatientInputs) -> Result<()> {
    AGE.check(inputs.age)?;
    BMI.check(inputs.bmi)?;
    SYSTOLIC_BP.check(inputs.systolic_bp)?;
    CHOLESTEROL.check(inputs.cholesterol)?;
    FASTING_GLUCOSE.check(inputs.fasting_glucose)?;
    SMOKING_YEARS.check(inputs.smoking_years)?;
    FEV1.check(inputs.fev1)?;
    Ok(())
}

/// Field values supplied up front, e.g. from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    pub age: Option<i32>,
    pub bmi: Option<f64>,
    pub sex: Option<Sex>,
    pub smoking_status: Option<SmokingStatus>,
    pub systolic_bp: Option<i32>,
    pub cholesterol: Option<i32>,
    pub fasting_glucose: Option<i32>,
    pub family_history_diabetes: Option<bool>,
    pub smoking_years: Option<i32>,
    pub fev1: Option<i32>,
}

/// Builds the form from supplied answers, falling back to `defaults` for the
/// rest. Supplied values outside their range are rejected.
pub fn fill_from_defaults(answers: &Answers, defaults: &FormDefaults) -> Result<PatientInputs> {
    let inputs = PatientInputs {
        age: answers.age.unwrap_or(defaults.age),
        bmi: answers.bmi.unwrap_or(defaults.bmi),
        sex: answers.sex.unwrap_or(defaults.sex),
        smoking_status: answers.smoking_status.unwrap_or(defaults.smoking_status),
        systolic_bp: answers.systolic_bp.unwrap_or(defaults.systolic_bp),
        cholesterol: answers.cholesterol.unwrap_or(defaults.cholesterol),
        fasting_glucose: answers.fasting_glucose.unwrap_or(defaults.fasting_glucose),
        family_history_diabetes: answers
            .family_history_diabetes
            .unwrap_or(defaults.family_history_diabetes),
        smoking_years: answers.smoking_years.unwrap_or(defaults.smoking_years),
        fev1: answers.fev1.unwrap_or(defaults.fev1),
    };
    check_inputs(&inputs)?;
    Ok(inputs)
}

/// Builds the form, prompting for every field not already answered.
/// Answered flags are still range-checked before any prompt is shown.
pub fn fill_interactive<R: BufRead, W: Write>(
    answers: &Answers,
    defaults: &FormDefaults,
    prompter: &mut Prompter<R, W>,
) -> Result<PatientInputs> {
    fill_from_defaults(answers, defaults)?;

    prompter.section("Patient Information")?;
    let age = prompter.int_or(AGE, answers.age, defaults.age)?;
    let bmi = prompter.float_or(BMI, answers.bmi, defaults.bmi)?;
    let sex = prompter.choice_or("Sex", answers.sex, defaults.sex)?;
    let smoking_status =
        prompter.choice_or("Smoking Status", answers.smoking_status, defaults.smoking_status)?;

    prompter.section("Cardiovascular Risk Factors")?;
    let systolic_bp = prompter.int_or(SYSTOLIC_BP, answers.systolic_bp, defaults.systolic_bp)?;
    let cholesterol = prompter.int_or(CHOLESTEROL, answers.cholesterol, defaults.cholesterol)?;

    prompter.section("Diabetes Risk Factors")?;
    let fasting_glucose = prompter.int_or(
        FASTING_GLUCOSE,
        answers.fasting_glucose,
        defaults.fasting_glucose,
    )?;
    let family_history_diabetes = prompter.yes_no_or(
        "Family History of Diabetes",
        answers.family_history_diabetes,
        defaults.family_history_diabetes,
    )?;

    prompter.section("COPD Risk Factors")?;
    let smoking_years =
        prompter.int_or(SMOKING_YEARS, answers.smoking_years, defaults.smoking_years)?;
    let fev1 = prompter.int_or(FEV1, answers.fev1, defaults.fev1)?;

    Ok(PatientInputs {
        age,
        bmi,
        sex,
        smoking_status,
        systolic_bp,
        cholesterol,
        fasting_glucose,
        family_history_diabetes,
        smoking_years,
        fev1,
    })
}
