//! Parsing of submitted input lines.

use crate::model::{CommandError, Message};
use crate::transmit::FrameRate;

/// What a submitted line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/exit`
    Exit,
    /// `/connect`
    Connect,
    /// `/setfps <n>`
    SetFps(FrameRate),
    /// `/showfps`
    ShowFps,
    /// `/setred`
    SetRed,
    /// `/setgreen`
    SetGreen,
    /// Anything not starting with `/`.
    Send(Message),
}

impl Command {
    /// Parse a submitted line.
    ///
    /// Returns `Ok(None)` for blank input. Surrounding whitespace is ignored
    /// for commands; plain text is sent as typed.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if !trimmed.starts_with('/') {
            return Ok(Some(Self::Send(Message::new(line)?)));
        }

        let mut parts = trimmed.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        let command = match name {
            "/exit" => Self::Exit,
            "/connect" => Self::Connect,
            "/showfps" => Self::ShowFps,
            "/setred" => Self::SetRed,
            "/setgreen" => Self::SetGreen,
            "/setfps" => Self::SetFps(parse_rate(arg)?),
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_rate(arg: Option<&str>) -> Result<FrameRate, CommandError> {
    let arg = arg.ok_or_else(|| CommandError::InvalidArgument {
        command: "/setfps",
        reason: "missing frame rate".to_string(),
    })?;
    let fps: i64 = arg.parse().map_err(|_| CommandError::InvalidArgument {
        command: "/setfps",
        reason: format!("{:?} is not a number", arg),
    })?;
    Ok(FrameRate::new(fps)?)
}
