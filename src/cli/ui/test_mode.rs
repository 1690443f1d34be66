//! Scripted answers for prompts, read from `CHAUFFEUR_TEST_TEXT_INPUTS`.
//!
//! Answers are separated by `|`. Markers such as `<BACK>` or `<ESC>` stand for
//! the matching keys.

use once_cell::sync::Lazy;
use std::{
    collections::VecDeque,
    env,
    sync::{Mutex, MutexGuard},
};

pub const TEXT_INPUTS_ENV: &str = "CHAUFFEUR_TEST_TEXT_INPUTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTestInput {
    Value(String),
    Keep,
    Back,
    Help,
    Cancel,
    Escape,
}

struct TextQueue {
    enabled: bool,
    inputs: VecDeque<TextTestInput>,
}

impl TextQueue {
    fn from_env() -> Self {
        match env::var(TEXT_INPUTS_ENV) {
            Ok(raw) => Self {
                enabled: true,
                inputs: parse_text_sequences(&raw),
            },
            Err(_) => Self {
                enabled: false,
                inputs: VecDeque::new(),
            },
        }
    }
}

static TEXT_INPUTS: Lazy<Mutex<TextQueue>> = Lazy::new(|| Mutex::new(TextQueue::from_env()));

fn queue() -> MutexGuard<'static, TextQueue> {
    TEXT_INPUTS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn is_enabled() -> bool {
    queue().enabled
}

/// Next scripted answer, or `None` when prompts should read the terminal.
///
/// An exhausted script cancels the prompt instead of blocking on stdin.
pub fn next_text_input(label: &str) -> Option<TextTestInput> {
    let mut guard = queue();
    if !guard.enabled {
        return None;
    }
    Some(guard.inputs.pop_front().unwrap_or_else(|| {
        tracing::warn!(prompt = label, "scripted inputs exhausted");
        TextTestInput::Cancel
    }))
}

fn parse_text_input(token: &str) -> TextTestInput {
    match token.to_ascii_uppercase().as_str() {
        "<ESC>" | "ESC" => TextTestInput::Escape,
        "<CANCEL>" => TextTestInput::Cancel,
        "<BACK>" => TextTestInput::Back,
        "<HELP>" => TextTestInput::Help,
        "<KEEP>" => TextTestInput::Keep,
        "<BLANK>" | "<EMPTY>" => TextTestInput::Value(String::new()),
        _ => TextTestInput::Value(token.to_string()),
    }
}

fn parse_text_sequences(raw: &str) -> VecDeque<TextTestInput> {
    raw.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_text_input)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_markers_and_values() {
        let parsed = parse_text_sequences("Sara Khan| <BACK> |<blank>|<ESC>||4111");
        assert_eq!(
            parsed,
            VecDeque::from(vec![
                TextTestInput::Value("Sara Khan".into()),
                TextTestInput::Back,
                TextTestInput::Value(String::new()),
                TextTestInput::Escape,
                TextTestInput::Value("4111".into()),
            ])
        );
    }
}
