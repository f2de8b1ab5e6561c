use crate::errors::TransEditError;
use anyhow::Result;
use console::style;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, queue};
use std::fmt::Display;
use std::io::{self, Write};

/// Candidate rows rendered below the select prompt at once.
const PAGE_SIZE: usize = 7;

/// The three questions the tools ask. For `select`, `source` maps the input
/// typed so far to the current candidate list; the caller owns the policy.
pub trait Prompt {
    fn input(&mut self, message: &str) -> Result<String>;
    fn confirm(&mut self, message: &str) -> Result<bool>;
    fn select(&mut self, message: &str, source: &dyn Fn(&str) -> Vec<String>) -> Result<String>;
}

/// Prints a `! text` conversation line, the tool's narrator voice.
pub fn msg(text: impl Display) {
    println!("{} {}", style("!").blue().bold(), style(text).white().bold());
}

pub fn blank_line() {
    println!();
}

/// Empty and anything not starting with `n` count as yes.
fn parse_yes_no(answer: &str) -> bool {
    !answer.trim().to_lowercase().starts_with('n')
}

/// Strips the trailing line terminator only; surrounding spaces are part of
/// the user's answer.
fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// First visible row of the candidate page: keeps `selected` on screen and
/// never runs the window past the end of the list.
fn page_start(offset: usize, selected: usize, len: usize) -> usize {
    let mut start = offset.min(selected).min(len.saturating_sub(PAGE_SIZE));
    if selected + 1 > start + PAGE_SIZE {
        start = selected + 1 - PAGE_SIZE;
    }
    start
}

/// Real terminal prompts: plain stdin lines for text and confirmation, a
/// crossterm raw-mode line editor with a live-filtered candidate list for
/// `select`.
pub struct TermPrompt;

impl TermPrompt {
    pub fn new() -> Self {
        Self
    }

    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Err(TransEditError::Interrupted.into());
        }
        Ok(strip_line_ending(&line).to_string())
    }
}

impl Prompt for TermPrompt {
    fn input(&mut self, message: &str) -> Result<String> {
        print!("{} {} ", style("?").green().bold(), style(message).bold());
        io::stdout().flush()?;
        self.read_line()
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        print!(
            "{} {} (Y/n) ",
            style("?").green().bold(),
            style(message).bold()
        );
        io::stdout().flush()?;
        Ok(parse_yes_no(&self.read_line()?))
    }

    fn select(&mut self, message: &str, source: &dyn Fn(&str) -> Vec<String>) -> Result<String> {
        let mut stdout = io::stdout();
        let guard = RawModeGuard::enable()?;
        let prefix = format!("{} {} ", style("?").green().bold(), style(message).bold());
        let mut input = String::new();
        let mut selected = 0usize;
        let mut offset = 0usize;

        let outcome = loop {
            let matches = source(&input);
            if !matches.is_empty() && selected >= matches.len() {
                selected = matches.len() - 1;
            }
            offset = page_start(offset, selected, matches.len());

            queue!(stdout, cursor::MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
            queue!(stdout, Print(&prefix), Print(&input))?;
            let visible = matches.len().saturating_sub(offset).min(PAGE_SIZE);
            for (i, key) in matches.iter().enumerate().skip(offset).take(PAGE_SIZE) {
                queue!(stdout, Print("\r\n"))?;
                if i == selected {
                    queue!(stdout, Print(style(format!("> {key}")).cyan()))?;
                } else {
                    queue!(stdout, Print(format!("  {key}")))?;
                }
            }
            if visible > 0 {
                queue!(stdout, cursor::MoveUp(visible as u16))?;
            }
            stdout.flush()?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break None,
                KeyCode::Esc => break None,
                KeyCode::Enter => {
                    if let Some(chosen) = matches.get(selected) {
                        break Some(chosen.clone());
                    }
                }
                KeyCode::Tab => {
                    if let Some(chosen) = matches.get(selected) {
                        input = chosen.clone();
                    }
                }
                KeyCode::Up => selected = selected.saturating_sub(1),
                KeyCode::Down => {
                    if selected + 1 < matches.len() {
                        selected += 1;
                    }
                }
                KeyCode::Backspace => {
                    input.pop();
                    selected = 0;
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    selected = 0;
                }
                _ => {}
            }
        };

        queue!(stdout, cursor::MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        match &outcome {
            Some(chosen) => queue!(stdout, Print(&prefix), Print(style(chosen).cyan()), Print("\r\n"))?,
            None => queue!(stdout, Print(&prefix), Print("\r\n"))?,
        }
        stdout.flush()?;
        drop(guard);

        outcome.ok_or_else(|| TransEditError::Interrupted.into())
    }
}

/// Raw mode with a hidden cursor for the duration of a select prompt;
/// restores the terminal on drop, on every exit path.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        let _ = queue!(stdout, cursor::Hide);
        let _ = stdout.flush();
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = queue!(stdout, cursor::Show);
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}
