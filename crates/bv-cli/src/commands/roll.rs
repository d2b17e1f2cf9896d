use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;

use bv_mechanics::{
    ChatLog, ChatMessage, ChoiceHost, ChoicePrompt, Resolution, RollConfig, RollResolver,
    RollTrigger,
};
use colored::Colorize;

pub fn run(
    path: &Path,
    label: &str,
    formula: &str,
    table: Option<&str>,
    picks: Vec<String>,
    seed: u64,
) -> Result<(), String> {
    let sheet = super::load_sheet(path)?;
    let trigger = RollTrigger::from_label(label, formula, table).map_err(|e| e.to_string())?;

    let mut resolver = RollResolver::new(RollConfig::default().with_seed(seed));
    let stdin = io::stdin();
    let mut host = TerminalHost::new(picks, stdin.lock());
    let mut log = ChatLog::new();

    let resolution = resolver
        .resolve(&trigger, &sheet, &mut host, &mut log)
        .map_err(|e| e.to_string())?;

    match resolution {
        Resolution::Published => {
            for message in log.messages() {
                print_message(message);
            }
        }
        Resolution::Dismissed => println!("  {}", "Roll dismissed.".dimmed()),
        Resolution::Skipped => println!("  {}", "Nothing to roll for this method.".dimmed()),
    }

    Ok(())
}

fn print_message(message: &ChatMessage) {
    match message {
        ChatMessage::Roll(outcome) => {
            println!("  {}", outcome.flavor.bold());
            println!(
                "  {} {} {}",
                outcome.formula,
                outcome.dice.to_string().dimmed(),
                format!("-> {}", outcome.total).green().bold()
            );
        }
        ChatMessage::Announcement { flavor, content } => {
            println!("  {}", flavor.bold());
            for line in content.lines() {
                println!("  {}", line.trim_end());
            }
        }
    }
}

/// Answers prompts from `--pick` values first, then from a line reader.
///
/// A blank line takes the prompt's default; end of input dismisses.
struct TerminalHost<R> {
    picks: VecDeque<String>,
    input: R,
}

impl<R: BufRead> TerminalHost<R> {
    fn new(picks: Vec<String>, input: R) -> Self {
        Self {
            picks: picks.into(),
            input,
        }
    }

    fn read_answer(&mut self, prompt: &ChoicePrompt) -> Option<String> {
        println!("  {} {}", prompt.title.bold(), prompt.content);
        for (i, option) in prompt.options.iter().enumerate() {
            let marker = if prompt.default.as_deref() == Some(option.key.as_str()) {
                "*"
            } else {
                " "
            };
            println!(
                "  {marker}{:>2}) {} {}",
                i + 1,
                option.label,
                format!("[{}]", option.key).dimmed()
            );
        }
        print!("  > ");
        io::stdout().flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                println!();
                return None;
            }
            Ok(_) => {}
        }

        let answer = line.trim();
        if answer.is_empty() {
            return prompt.default.clone();
        }
        if let Ok(n) = answer.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| prompt.options.get(i))
                .map(|o| o.key.clone());
        }
        Some(answer.to_lowercase())
    }
}

impl<R: BufRead> ChoiceHost for TerminalHost<R> {
    fn choose(&mut self, prompt: &ChoicePrompt) -> Option<String> {
        match self.picks.pop_front() {
            Some(pick) => {
                tracing::debug!(pick = %pick, title = %prompt.title, "answering from --pick");
                Some(pick)
            }
            None => self.read_answer(prompt),
        }
    }
}
