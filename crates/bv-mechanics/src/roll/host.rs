//! The interaction host: presents a set of options and reports which one
//! the user picked.

use std::collections::VecDeque;

/// One selectable option in a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Stable key returned to the resolver.
    pub key: String,
    /// Text shown to the user.
    pub label: String,
}

/// A single-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicePrompt {
    /// Window title.
    pub title: String,
    /// Question text.
    pub content: String,
    /// Options in display order.
    pub options: Vec<ChoiceOption>,
    /// Key of the option preselected by the host, if any.
    pub default: Option<String>,
}

impl ChoicePrompt {
    /// Create a prompt with no options.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            options: Vec::new(),
            default: None,
        }
    }

    /// Add an option.
    pub fn with_option(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(ChoiceOption {
            key: key.into(),
            label: label.into(),
        });
        self
    }

    /// Mark an option as the default.
    pub fn with_default(mut self, key: impl Into<String>) -> Self {
        self.default = Some(key.into());
        self
    }

    /// Look up an option by key.
    pub fn option(&self, key: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.key == key)
    }
}

/// Something that can ask the user to pick one option.
///
/// Returns the selected key, or `None` if the prompt was dismissed.
pub trait ChoiceHost {
    /// Present a prompt and wait for the user's pick.
    fn choose(&mut self, prompt: &ChoicePrompt) -> Option<String>;
}

impl<F> ChoiceHost for F
where
    F: FnMut(&ChoicePrompt) -> Option<String>,
{
    fn choose(&mut self, prompt: &ChoicePrompt) -> Option<String> {
        self(prompt)
    }
}

/// A host that replays a fixed queue of answers and records every prompt.
///
/// Once the queue runs dry every further prompt is dismissed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHost {
    answers: VecDeque<Option<String>>,
    prompts: Vec<ChoicePrompt>,
}

impl ScriptedHost {
    /// Create a host with no answers queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer.
    pub fn answer(mut self, key: impl Into<String>) -> Self {
        self.answers.push_back(Some(key.into()));
        self
    }

    /// Queue a dismissal.
    pub fn dismiss(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    /// Every prompt presented so far.
    pub fn prompts(&self) -> &[ChoicePrompt] {
        &self.prompts
    }

    /// Number of answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl ChoiceHost for ScriptedHost {
    fn choose(&mut self, prompt: &ChoicePrompt) -> Option<String> {
        self.prompts.push(prompt.clone());
        self.answers.pop_front().flatten()
    }
}
