use std::io::{BufRead, Write};

use anyhow::{Result, bail};

use crate::i18n::Catalog;

/// One numbered entry of a choice list. `key` is accepted as input in
/// place of the number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub key: String,
    pub label: String,
}

impl Choice {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Index(usize),
    Back,
    Close,
}

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn read_token(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            bail!("stdin closed");
        }
        Ok(line.trim().to_string())
    }

    /// Lists `choices` and reads a selection until one is valid.
    ///
    /// Choice keys win over the `b`/`q` shortcuts, so a list keyed by
    /// letters still accepts the spelled-out `back` and `quit`.
    pub fn choose(&mut self, prompt: &str, choices: &[Choice], catalog: &Catalog) -> Result<Pick> {
        loop {
            for (idx, choice) in choices.iter().enumerate() {
                writeln!(self.output, "  {}. {}", idx + 1, choice.label)?;
            }
            let token = self.read_token(prompt)?;
            if let Ok(n) = token.parse::<usize>()
                && n > 0
                && n <= choices.len()
            {
                return Ok(Pick::Index(n - 1));
            }
            if let Some(idx) = choices
                .iter()
                .position(|choice| choice.key.eq_ignore_ascii_case(&token))
            {
                return Ok(Pick::Index(idx));
            }
            match token.to_ascii_lowercase().as_str() {
                "b" | "back" => return Ok(Pick::Back),
                "q" | "quit" => return Ok(Pick::Close),
                _ => self.say(&catalog.tr("prompt.invalid_choice"))?,
            }
        }
    }

    pub fn confirm(&mut self, prompt: &str, default_yes: bool, catalog: &Catalog) -> Result<bool> {
        let suffix = if default_yes { "[Y/n]" } else { "[y/N]" };
        loop {
            let token = self
                .read_token(&format!("{prompt} {suffix}:"))?
                .to_ascii_lowercase();
            if token.is_empty() {
                return Ok(default_yes);
            }
            match token.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say(&catalog.tr("prompt.yes_no"))?,
            }
        }
    }
}
