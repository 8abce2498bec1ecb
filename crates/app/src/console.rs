//! Line oriented prompts over any reader/writer pair.
//!
//! Numeric prompts retry in place until the input parses; end of input is
//! reported as [`AppError::InputClosed`].

use std::{
    fmt::Display,
    io::{BufRead, Write},
    str::FromStr,
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal,
};
use engine::Money;

use crate::error::{AppError, Result};

pub struct Console<R, W> {
    input: R,
    output: W,
    mask_passwords: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            mask_passwords: false,
        }
    }

    /// Read passwords from the terminal with echo replaced by `*`.
    pub fn with_masked_passwords(mut self, mask: bool) -> Self {
        self.mask_passwords = mask;
        self
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `label` and returns the next line, trimmed.
    pub fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Repeats the prompt until the answer parses as `T`.
    pub fn prompt_parsed<T: FromStr>(&mut self, label: &str) -> Result<T> {
        let mut answer = self.prompt(label)?;
        loop {
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => answer = self.prompt("Please enter a valid number: ")?,
            }
        }
    }

    pub fn prompt_money(&mut self, label: &str) -> Result<Money> {
        let mut answer = self.prompt(label)?;
        loop {
            match answer.parse::<Money>() {
                Ok(value) => return Ok(value),
                Err(err) => answer = self.prompt(&format!("{err}. Try again: "))?,
            }
        }
    }

    /// `true` only for an answer starting with `y` or `Y`.
    pub fn prompt_yes_no(&mut self, label: &str) -> Result<bool> {
        let answer = self.prompt(label)?;
        Ok(matches!(answer.chars().next(), Some('y' | 'Y')))
    }

    pub fn wait_for_enter(&mut self, label: &str) -> Result<()> {
        self.prompt(label).map(|_| ())
    }

    pub fn prompt_password(&mut self, label: &str) -> Result<String> {
        if self.mask_passwords {
            self.read_masked(label)
        } else {
            self.prompt(label)
        }
    }

    fn read_masked(&mut self, label: &str) -> Result<String> {
        let _raw = RawModeGuard::enter()?;
        execute!(self.output, cursor::MoveToColumn(0), Print(label))?;

        let mut buf = String::new();
        loop {
            let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            else {
                continue;
            };

            match code {
                KeyCode::Enter => {
                    execute!(self.output, Print("\r\n"))?;
                    break;
                }
                KeyCode::Backspace => {
                    if buf.pop().is_some() {
                        execute!(
                            self.output,
                            cursor::MoveLeft(1),
                            Print(" "),
                            cursor::MoveLeft(1)
                        )?;
                    }
                }
                KeyCode::Char('c' | 'd') if modifiers.contains(KeyModifiers::CONTROL) => {
                    execute!(self.output, Print("\r\n"))?;
                    return Err(AppError::InputClosed);
                }
                KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                    buf.push(ch);
                    execute!(self.output, Print("*"))?;
                }
                _ => {}
            }
        }

        Ok(buf.trim().to_string())
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().map_err(|err| AppError::Terminal(err.to_string()))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
