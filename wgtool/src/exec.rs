/*
 * SPDX-FileCopyrightText: 2022 Empo Inc.
 *
 * SPDX-License-Identifier: GPL-3.0-or-later
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

//! Blocking invocation of the external tools.
//!
//! Everything the crate does to the system goes through [`CommandRunner`],
//! so the platform layer and the status query can be exercised against a
//! scripted runner.

use std::borrow::Cow;
use std::ffi::OsString;
use std::path::PathBuf;

use shell_escape::unix::escape;

use crate::error::{Result, WgError};

/// Whether commands are prefixed with `sudo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elevation {
    None,
    Sudo,
}

impl Default for Elevation {
    fn default() -> Self {
        Elevation::None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// stdout followed by stderr, the way a terminal would show them.
    pub fn combined(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len());
        out.push_str(&self.stdout);
        out.push_str(&self.stderr);
        out
    }
}

pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str], stdin: Option<&[u8]>) -> Result<CommandOutput>;
}

/// Renders a command line for logs and error messages.
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(|x| escape(Cow::Borrowed(x)).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct SystemRunner {
    elevation: Elevation,
}

impl SystemRunner {
    pub fn new(elevation: Elevation) -> SystemRunner {
        SystemRunner { elevation }
    }

    pub fn elevation(&self) -> Elevation {
        self.elevation
    }

    fn resolve(tool: &str) -> Result<PathBuf> {
        match which::which(tool) {
            Ok(x) => Ok(x),
            Err(_) => Err(WgError::ToolNotFound {
                tool: tool.to_string(),
            }),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], stdin: Option<&[u8]>) -> Result<CommandOutput> {
        let binary = Self::resolve(program)?;
        let mut argv: Vec<OsString> = args.iter().map(OsString::from).collect();

        let line = match self.elevation {
            Elevation::None => command_line(program, args),
            Elevation::Sudo => format!("sudo {}", command_line(program, args)),
        };
        log::debug!("exec: {}", line);

        let expression = match self.elevation {
            Elevation::None => duct::cmd(binary, argv),
            Elevation::Sudo => {
                argv.insert(0, binary.into_os_string());
                duct::cmd(Self::resolve("sudo")?, argv)
            }
        };

        let mut expression = expression.stdout_capture().stderr_capture().unchecked();
        if let Some(input) = stdin {
            expression = expression.stdin_bytes(input.to_vec());
        }

        let output = expression.run()?;
        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !output.status.success() {
            return Err(WgError::CommandFailed {
                command: line,
                code: output.status.code().unwrap_or(-1),
                output: result.combined().trim().to_string(),
            });
        }

        Ok(result)
    }
}
