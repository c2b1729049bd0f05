use crate::core::score::RiskLevel;
use crate::core::{Sex, SmokingStatus};
use crate::form::Answers;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "riskstrat",
    version,
    about = "Chronic condition risk stratification form"
)]
pub struct Cli {
    /// Show debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fill in the form and print cardiovascular, diabetes and COPD risk
    Assess(AssessArgs),
    /// Write a default riskstrat.toml into the current directory
    Init,
    /// Print the advisory message for a risk level
    Advice { level: LevelArg },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    Low,
    Moderate,
    High,
}

impl From<LevelArg> for RiskLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Low => RiskLevel::Low,
            LevelArg::Moderate => RiskLevel::Moderate,
            LevelArg::High => RiskLevel::High,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum YesNo {
    Yes,
    No,
}

impl From<YesNo> for bool {
    fn from(answer: YesNo) -> Self {
        matches!(answer, YesNo::Yes)
    }
}

#[derive(Debug, Args, Clone)]
pub struct AssessArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
    /// Never prompt; unanswered fields take their defaults
    #[arg(long)]
    pub no_input: bool,

    #[arg(long)]
    pub age: Option<i32>,
    #[arg(long)]
    pub bmi: Option<f64>,
    #[arg(long, value_enum)]
    pub sex: Option<Sex>,
    #[arg(long = "smoking", value_enum)]
    pub smoking_status: Option<SmokingStatus>,
    #[arg(long)]
    pub systolic_bp: Option<i32>,
    #[arg(long)]
    pub cholesterol: Option<i32>,
    #[arg(long)]
    pub fasting_glucose: Option<i32>,
    #[arg(long = "family-history", value_enum)]
    pub family_history_diabetes: Option<YesNo>,
    #[arg(long)]
    pub smoking_years: Option<i32>,
    #[arg(long)]
    pub fev1: Option<i32>,
}

impl AssessArgs {
    pub fn answers(&self) -> Answers {
        Answers {
            age: self.age,
            bmi: self.bmi,
            sex: self.sex,
            smoking_status: self.smoking_status,
            systolic_bp: self.systolic_bp,
            cholesterol: self.cholesterol,
            fasting_glucose: self.fasting_glucose,
            family_history_diabetes: self.family_history_diabetes.map(bool::from),
            smoking_years: self.smoking_years,
            fev1: self.fev1,
        }
    }
}
