// Line protocol between the presentation layer and the window manager.
// Every UI event (button click, drag sample, taskbar click, app launch)
// arrives as one line; every answer leaves as one JSON line.
use std::{
    io::{self, BufRead, Write},
    str::{FromStr, SplitWhitespace},
};

use log::trace;
use serde::Serialize;
use thiserror::Error;

use crate::deskwm::{Position, Size, WindowId};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("unable to encode answer: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown command {0}")]
    UnknownCommand(String),
    #[error("unknown application {0}")]
    UnknownApp(String),
    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },
    #[error("{command}: {argument} is not a number: {value}")]
    InvalidNumber {
        command: String,
        argument: &'static str,
        value: String,
    },
    #[error("screen: {width}x{height} is not a usable size")]
    InvalidScreen { width: i32, height: i32 },
    #[error("line is not valid utf-8")]
    InvalidEncoding,
}

impl ShellError {
    /// Bad input lines are reported back, broken streams end the session.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ShellError::Io(_) | ShellError::Json(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    Launch(String),
    Open {
        content: String,
        size: Size,
        position: Option<Position>,
    },
    Close(WindowId),
    Minimize(WindowId),
    Maximize(WindowId),
    Restore(WindowId),
    Focus(WindowId),
    Move(WindowId, Position),
    Resize(WindowId, Size),
    Title(WindowId, String),
    Taskbar(WindowId),
    Screen(i32, i32),
    List,
    Visible,
    Active,
    Quit,
}

struct Args<'a> {
    command: &'a str,
    words: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn word(&mut self, argument: &'static str) -> Result<&'a str, ShellError> {
        self.words.next().ok_or_else(|| ShellError::MissingArgument {
            command: self.command.to_string(),
            argument,
        })
    }

    fn number<T: FromStr>(&mut self, argument: &'static str) -> Result<T, ShellError> {
        let value = self.word(argument)?;
        value.parse().map_err(|_| ShellError::InvalidNumber {
            command: self.command.to_string(),
            argument,
            value: value.to_string(),
        })
    }

    fn id(&mut self) -> Result<WindowId, ShellError> {
        self.number("window id")
    }

    fn position(&mut self) -> Result<Position, ShellError> {
        Ok(Position {
            x: self.number("x")?,
            y: self.number("y")?,
        })
    }

    fn size(&mut self) -> Result<Size, ShellError> {
        Ok(Size {
            width: self.number("width")?,
            height: self.number("height")?,
        })
    }

    fn rest(self) -> String {
        self.words.collect::<Vec<_>>().join(" ")
    }
}

/// `Ok(None)` for blank lines and `#` comments.
pub fn parse_event(line: &str) -> Result<Option<ShellEvent>, ShellError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let command = match words.next() {
        Some(command) => command,
        None => return Ok(None),
    };
    let mut args = Args { command, words };

    let event = match command {
        "launch" => ShellEvent::Launch(args.word("app id")?.to_string()),
        "open" => {
            let content = args.word("content")?.to_string();
            let size = args.size()?;
            let position = if args.words.clone().next().is_some() {
                Some(args.position()?)
            } else {
                None
            };
            ShellEvent::Open {
                content,
                size,
                position,
            }
        }
        "close" => ShellEvent::Close(args.id()?),
        "minimize" => ShellEvent::Minimize(args.id()?),
        "maximize" => ShellEvent::Maximize(args.id()?),
        "restore" => ShellEvent::Restore(args.id()?),
        "focus" => ShellEvent::Focus(args.id()?),
        "move" => {
            let id = args.id()?;
            ShellEvent::Move(id, args.position()?)
        }
        "resize" => {
            let id = args.id()?;
            ShellEvent::Resize(id, args.size()?)
        }
        "title" => {
            let id = args.id()?;
            ShellEvent::Title(id, args.rest())
        }
        "taskbar" => ShellEvent::Taskbar(args.id()?),
        "screen" => {
            let width = args.number("width")?;
            let height = args.number("height")?;
            if width <= 0 || height <= 0 {
                return Err(ShellError::InvalidScreen { width, height });
            }
            ShellEvent::Screen(width, height)
        }
        "list" => ShellEvent::List,
        "visible" => ShellEvent::Visible,
        "active" => ShellEvent::Active,
        "quit" => ShellEvent::Quit,
        other => return Err(ShellError::UnknownCommand(other.to_string())),
    };
    Ok(Some(event))
}

#[derive(Serialize)]
struct ErrorAnswer {
    error: String,
}

/// Reads events from `input`, writes answers to `output`.
pub struct ShellAdapter<R, W> {
    input: R,
    output: W,
    line: Vec<u8>,
}

impl<R: BufRead, W: Write> ShellAdapter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ShellAdapter {
            input,
            output,
            line: Vec::new(),
        }
    }

    /// Next event, skipping blank lines. `Ok(None)` once the input is closed.
    pub fn next_event(&mut self) -> Result<Option<ShellEvent>, ShellError> {
        loop {
            self.line.clear();
            if self.input.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            // the bad line is already consumed, the next call moves on
            let line =
                std::str::from_utf8(&self.line).map_err(|_| ShellError::InvalidEncoding)?;
            trace!("received {:?}", line.trim_end());
            if let Some(event) = parse_event(line)? {
                return Ok(Some(event));
            }
        }
    }

    pub fn send<T: Serialize>(&mut self, answer: &T) -> Result<(), ShellError> {
        serde_json::to_writer(&mut self.output, answer)?;
        self.output.write_all(b"\n")?;
        self.output.flush()?;
        Ok(())
    }

    pub fn send_error(&mut self, error: &ShellError) -> Result<(), ShellError> {
        self.send(&ErrorAnswer {
            error: error.to_string(),
        })
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
