use crate::config::{Config, FailOn};
use crate::core::score::RiskLevel;
use crate::core::{Condition, PatientInputs, RiskAssessment};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

pub fn advice(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => {
            "Immediate lifestyle modification and medical consultation recommended."
        }
        RiskLevel::Moderate => "Consider lifestyle changes and regular monitoring.",
        RiskLevel::Low => "Maintain a healthy lifestyle and regular check-ups.",
    }
}

fn colored_level(level: RiskLevel) -> String {
    match level {
        RiskLevel::High => level.as_str().red().bold().to_string(),
        RiskLevel::Moderate => level.as_str().yellow().bold().to_string(),
        RiskLevel::Low => level.as_str().green().bold().to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

pub fn evaluate_exit(assessment: &RiskAssessment, cfg: &Config) -> ExitStatus {
    let reasons: Vec<String> = assessment
        .results()
        .filter(|(_, level)| cfg.general.fail_on.is_met_by(*level))
        .map(|(condition, level)| format!("{condition} risk is {level}"))
        .collect();

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConditionResult {
    pub condition: Condition,
    pub level: RiskLevel,
    pub advice: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub assessed_at: String,
    pub inputs: PatientInputs,
    pub results: Vec<ConditionResult>,
    pub fail_on: FailOn,
    pub exit: ExitStatus,
}

impl JsonReport {
    pub fn new(
        inputs: &PatientInputs,
        assessment: &RiskAssessment,
        cfg: &Config,
        exit: &ExitStatus,
    ) -> Self {
        Self {
            assessed_at: assessment.timestamp(),
            inputs: inputs.clone(),
            results: assessment
                .results()
                .map(|(condition, level)| ConditionResult {
                    condition,
                    level,
                    advice: advice(level),
                })
                .collect(),
            fail_on: cfg.general.fail_on,
            exit: exit.clone(),
        }
    }
}

pub fn print_human(inputs: &PatientInputs, assessment: &RiskAssessment, exit: &ExitStatus) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = write_human(&mut out, inputs, assessment, exit) {
        log::warn!("failed writing report: {err}");
    }
}

pub fn write_human<W: Write>(
    out: &mut W,
    inputs: &PatientInputs,
    assessment: &RiskAssessment,
    exit: &ExitStatus,
) -> io::Result<()> {
    writeln!(out, "{}", "Chronic Condition Risk Stratification".bold())?;

    writeln!(out)?;
    writeln!(out, "{}", "Patient Information".bold())?;
    writeln!(
        out,
        "age: {}  sex: {}  BMI: {:.1}  smoking: {}",
        inputs.age, inputs.sex, inputs.bmi, inputs.smoking_status
    )?;
    writeln!(
        out,
        "systolic BP: {} mmHg  cholesterol: {} mg/dL",
        inputs.systolic_bp, inputs.cholesterol
    )?;
    writeln!(
        out,
        "fasting glucose: {} mg/dL  family history of diabetes: {}",
        inputs.fasting_glucose,
        if inputs.family_history_diabetes { "Yes" } else { "No" }
    )?;
    writeln!(
        out,
        "years of smoking: {}  FEV1: {}%",
        inputs.smoking_years, inputs.fev1
    )?;

    writeln!(out)?;
    writeln!(out, "{}", "Risk Stratification Results".bold())?;
    for (condition, level) in assessment.results() {
        writeln!(out, "{} Risk Level: {}", condition, colored_level(level))?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Personalized Recommendations".bold())?;
    for (condition, level) in assessment.results() {
        writeln!(
            out,
            "{} Risk is {}. {}",
            condition,
            colored_level(level),
            advice(level)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Assessment Date: {}", assessment.timestamp())?;

    if !exit.ok {
        writeln!(out, "exit: FAILED ({})", exit.reason_line())?;
    }
    Ok(())
}
