//! Prompt abstraction used by the reservation wizard.
//!
//! [`TerminalInteraction`] talks to a real terminal through dialoguer;
//! [`ScriptedInteraction`] replays a fixed list of answers so the wizard can
//! be exercised without a TTY.

use std::collections::VecDeque;

use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::errors::CliError;

/// Token that sends the wizard back one step.
pub const BACK_TOKEN: &str = "<BACK>";
/// Token that abandons the wizard.
pub const CANCEL_TOKEN: &str = "<CANCEL>";

/// Describes how prompts can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse<T> {
    Value(T),
    Back,
    Cancel,
}

/// Responses accepted when confirming the collected data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Confirm,
    Back,
    Cancel,
}

pub trait ReservationInteraction {
    fn prompt_text(&mut self, label: &str) -> Result<PromptResponse<String>, CliError>;

    /// Returns the index of the chosen option.
    fn prompt_choice(
        &mut self,
        label: &str,
        options: &[String],
    ) -> Result<PromptResponse<usize>, CliError>;

    fn confirm(&mut self, summary: &[String]) -> Result<ConfirmationResponse, CliError>;
}

pub struct TerminalInteraction {
    theme: ColorfulTheme,
}

impl TerminalInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalInteraction {
    fn default() -> Self {
        Self::new()
    }
}

const BACK_LABEL: &str = "← Retour";
const CANCEL_LABEL: &str = "✕ Annuler";

impl ReservationInteraction for TerminalInteraction {
    fn prompt_text(&mut self, label: &str) -> Result<PromptResponse<String>, CliError> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("{label} (< retour, :q annuler)"))
            .allow_empty(true)
            .interact_text()?;
        Ok(match value.trim() {
            "<" => PromptResponse::Back,
            ":q" => PromptResponse::Cancel,
            _ => PromptResponse::Value(value),
        })
    }

    fn prompt_choice(
        &mut self,
        label: &str,
        options: &[String],
    ) -> Result<PromptResponse<usize>, CliError> {
        let mut items: Vec<&str> = options.iter().map(String::as_str).collect();
        items.push(BACK_LABEL);
        items.push(CANCEL_LABEL);
        let selection = Select::with_theme(&self.theme)
            .with_prompt(label)
            .items(&items)
            .default(0)
            .interact()?;
        Ok(match selection {
            index if index < options.len() => PromptResponse::Value(index),
            index if index == options.len() => PromptResponse::Back,
            _ => PromptResponse::Cancel,
        })
    }

    fn confirm(&mut self, summary: &[String]) -> Result<ConfirmationResponse, CliError> {
        for line in summary {
            println!("  {line}");
        }
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Confirmer la réservation ?")
            .items(&["Confirmer", "Modifier", "Annuler"])
            .default(0)
            .interact()?;
        Ok(match selection {
            0 => ConfirmationResponse::Confirm,
            1 => ConfirmationResponse::Back,
            _ => ConfirmationResponse::Cancel,
        })
    }
}

/// Replays answers in order. Choices accept a 1-based index or the option text.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInteraction {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInteraction {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Labels of every prompt shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, label: &str) -> Result<String, CliError> {
        self.prompts.push(label.to_string());
        self.answers.pop_front().ok_or(CliError::ScriptExhausted)
    }
}

impl ReservationInteraction for ScriptedInteraction {
    fn prompt_text(&mut self, label: &str) -> Result<PromptResponse<String>, CliError> {
        let answer = self.next(label)?;
        Ok(match answer.as_str() {
            BACK_TOKEN => PromptResponse::Back,
            CANCEL_TOKEN => PromptResponse::Cancel,
            _ => PromptResponse::Value(answer),
        })
    }

    fn prompt_choice(
        &mut self,
        label: &str,
        options: &[String],
    ) -> Result<PromptResponse<usize>, CliError> {
        let answer = self.next(label)?;
        match answer.as_str() {
            BACK_TOKEN => return Ok(PromptResponse::Back),
            CANCEL_TOKEN => return Ok(PromptResponse::Cancel),
            _ => {}
        }
        let by_index = answer
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|index| *index < options.len());
        let by_label = || {
            options
                .iter()
                .position(|option| option.eq_ignore_ascii_case(answer.trim()))
        };
        by_index
            .or_else(by_label)
            .map(PromptResponse::Value)
            .ok_or_else(|| CliError::Input(format!("`{answer}` is not an option for {label}")))
    }

    fn confirm(&mut self, _summary: &[String]) -> Result<ConfirmationResponse, CliError> {
        let answer = self.next("confirm")?;
        let answer = answer.trim();
        if answer == BACK_TOKEN {
            return Ok(ConfirmationResponse::Back);
        }
        Ok(match answer.to_ascii_lowercase().as_str() {
            "yes" | "y" | "confirm" => ConfirmationResponse::Confirm,
            _ => ConfirmationResponse::Cancel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Matin".into(), "Après-midi".into()]
    }

    #[test]
    fn choices_resolve_by_index_or_label() {
        let mut script = ScriptedInteraction::new(["2", "matin", "9"]);
        assert_eq!(script.prompt_choice("slot", &options()).ok(), Some(PromptResponse::Value(1)));
        assert_eq!(script.prompt_choice("slot", &options()).ok(), Some(PromptResponse::Value(0)));
        assert!(matches!(
            script.prompt_choice("slot", &options()),
            Err(CliError::Input(_))
        ));
    }

    #[test]
    fn tokens_map_to_navigation() {
        let mut script = ScriptedInteraction::new([BACK_TOKEN, CANCEL_TOKEN, BACK_TOKEN]);
        assert_eq!(script.prompt_text("name").ok(), Some(PromptResponse::Back));
        assert_eq!(
            script.prompt_choice("slot", &options()).ok(),
            Some(PromptResponse::Cancel)
        );
        assert_eq!(script.confirm(&[]).ok(), Some(ConfirmationResponse::Back));
        assert!(matches!(script.prompt_text("name"), Err(CliError::ScriptExhausted)));
        assert_eq!(script.prompts().len(), 4);
    }
}
