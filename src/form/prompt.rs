use crate::form::{FloatField, IntField};
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Line-oriented prompter over any reader/writer pair.
///
/// An empty answer takes the default. Once input is exhausted every remaining
/// question takes its default too, so piping a short script into the form
/// never blocks.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    exhausted: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            exhausted: false,
        }
    }

    pub fn section(&mut self, title: &str) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "== {title}")?;
        Ok(())
    }

    pub fn int_or(&mut self, field: IntField, answered: Option<i32>, default: i32) -> Result<i32> {
        if let Some(value) = answered {
            return Ok(value);
        }
        let question = format!(
            "{} [{}-{}] ({})",
            field.label, field.min, field.max, default
        );
        self.ask(&question, default, |raw| {
            parse_number::<i32>(raw).and_then(|value| {
                field.contains(value).then_some(value).ok_or_else(|| {
                    format!(
                        "{} must be between {} and {}",
                        field.label, field.min, field.max
                    )
                })
            })
        })
    }

    pub fn float_or(
        &mut self,
        field: FloatField,
        answered: Option<f64>,
        default: f64,
    ) -> Result<f64> {
        if let Some(value) = answered {
            return Ok(value);
        }
        let question = format!(
            "{} [{:.1}-{:.1}] ({:.1})",
            field.label, field.min, field.max, default
        );
        self.ask(&question, default, |raw| {
            parse_number::<f64>(raw).and_then(|value| {
                field.contains(value).then_some(value).ok_or_else(|| {
                    format!(
                        "{} must be between {:.1} and {:.1}",
                        field.label, field.min, field.max
                    )
                })
            })
        })
    }

    pub fn choice_or<T>(&mut self, label: &str, answered: Option<T>, default: T) -> Result<T>
    where
        T: ValueEnum + Display + Copy,
    {
        if let Some(value) = answered {
            return Ok(value);
        }
        let names: Vec<String> = T::value_variants()
            .iter()
            .filter_map(|variant| variant.to_possible_value())
            .map(|value| value.get_name().to_string())
            .collect();
        let question = format!("{} [{}] ({})", label, names.join("/"), default);
        self.ask(&question, default, |raw| {
            <T as ValueEnum>::from_str(raw, true)
                .map_err(|_| format!("expected one of: {}", names.join(", ")))
        })
    }

    pub fn yes_no_or(&mut self, label: &str, answered: Option<bool>, default: bool) -> Result<bool> {
        if let Some(value) = answered {
            return Ok(value);
        }
        let question = format!("{} [yes/no] ({})", label, if default { "yes" } else { "no" });
        self.ask(&question, default, |raw| match raw.to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            _ => Err("expected yes or no".to_string()),
        })
    }

    fn ask<T, F>(&mut self, question: &str, default: T, parse: F) -> Result<T>
    where
        F: Fn(&str) -> std::result::Result<T, String>,
    {
        loop {
            if self.exhausted {
                return Ok(default);
            }

            write!(self.output, "{question}: ")?;
            self.output.flush().context("failed flushing prompt")?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed reading answer")?;
            if read == 0 {
                self.exhausted = true;
                writeln!(self.output)?;
                log::debug!("input closed, taking default for remaining fields");
                return Ok(default);
            }

            let answer = line.trim();
            if answer.is_empty() {
                return Ok(default);
            }

            match parse(answer) {
                Ok(value) => return Ok(value),
                Err(reason) => writeln!(self.output, "warning: {reason}, try again")?,
            }
        }
    }
}

fn parse_number<T: FromStr>(raw: &str) -> std::result::Result<T, String> {
    raw.parse::<T>()
        .map_err(|_| format!("'{raw}' is not a valid number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SmokingStatus;
    use crate::form::{AGE, BMI};
    use std::io::Cursor;

    fn run<T>(
        script: &str,
        ask: impl FnOnce(&mut Prompter<Cursor<&str>, &mut Vec<u8>>) -> Result<T>,
    ) -> (T, String) {
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(script), &mut output);
        let value = ask(&mut prompter).unwrap();
        (value, String::from_utf8(output).unwrap())
    }

    #[test]
    fn empty_answer_takes_default() {
        let (age, text) = run("\n", |p| p.int_or(AGE, None, 30));
        assert_eq!(age, 30);
        assert_eq!(text, "Age [18-100] (30): ");
    }

    #[test]
    fn invalid_answers_reprompt() {
        let (age, text) = run("abc\n101\n42\n", |p| p.int_or(AGE, None, 30));
        assert_eq!(age, 42);
        assert!(text.contains("warning: 'abc' is not a valid number, try again"));
        assert!(text.contains("warning: Age must be between 18 and 100, try again"));
        assert_eq!(text.matches("Age [18-100] (30): ").count(), 3);
    }

    #[test]
    fn float_prompt_rejects_nan() {
        let (bmi, text) = run("nan\n24.2\n", |p| p.float_or(BMI, None, 22.0));
        assert_eq!(bmi, 24.2);
        assert!(text.contains("BMI [10.0-50.0] (22.0): "));
        assert!(text.contains("warning: BMI must be between"));
    }

    #[test]
    fn closed_input_takes_defaults_from_then_on() {
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new("50"), &mut output);
        assert_eq!(prompter.int_or(AGE, None, 30).unwrap(), 50);
        assert_eq!(prompter.int_or(AGE, None, 30).unwrap(), 30);
        assert_eq!(prompter.int_or(AGE, None, 31).unwrap(), 31);
    }

    #[test]
    fn choices_accept_value_names() {
        let (status, text) = run("Former-Smoker\n", |p| {
            p.choice_or("Smoking Status", None, SmokingStatus::NonSmoker)
        });
        assert_eq!(status, SmokingStatus::FormerSmoker);
        assert!(text.starts_with(
            "Smoking Status [non-smoker/current-smoker/former-smoker] (Non-smoker): "
        ));
    }

    #[test]
    fn yes_no_answers() {
        let (history, _) = run("maybe\nN\n", |p| p.yes_no_or("Family History", None, true));
        assert!(!history);
    }

    #[test]
    fn answered_fields_skip_the_prompt() {
        let (age, text) = run("", |p| p.int_or(AGE, Some(64), 30));
        assert_eq!(age, 64);
        assert!(text.is_empty());
    }
}
