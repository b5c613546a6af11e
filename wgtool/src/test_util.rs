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

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Result, WgError};
use crate::exec::{command_line, CommandOutput, CommandRunner};

pub(crate) const PRIVKEY: &str = "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=";
pub(crate) const PUBKEY_A: &str = "AgICAgICAgICAgICAgICAgICAgICAgICAgICAgICAgI=";
pub(crate) const PUBKEY_B: &str = "AwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwM=";
pub(crate) const PUBKEY_C: &str = "BAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQ=";

#[derive(Debug, Clone)]
pub(crate) struct Invocation {
    pub line: String,
    pub stdin: Option<Vec<u8>>,
}

enum Reply {
    Stdout(String),
    Exit(i32),
}

/// Answers commands by command-line prefix and records every call.
/// Unmatched commands succeed with empty output.
pub(crate) struct ScriptedRunner {
    replies: Vec<(String, Reply)>,
    calls: Rc<RefCell<Vec<Invocation>>>,
}

impl ScriptedRunner {
    pub fn new() -> ScriptedRunner {
        ScriptedRunner {
            replies: vec![],
            calls: Rc::new(RefCell::new(vec![])),
        }
    }

    pub fn respond(mut self, prefix: &str, stdout: &str) -> ScriptedRunner {
        self.replies
            .push((prefix.to_string(), Reply::Stdout(stdout.to_string())));
        self
    }

    pub fn fail(mut self, prefix: &str, code: i32) -> ScriptedRunner {
        self.replies.push((prefix.to_string(), Reply::Exit(code)));
        self
    }

    pub fn calls(&self) -> Rc<RefCell<Vec<Invocation>>> {
        self.calls.clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str], stdin: Option<&[u8]>) -> Result<CommandOutput> {
        let line = command_line(program, args);
        self.calls.borrow_mut().push(Invocation {
            line: line.clone(),
            stdin: stdin.map(|x| x.to_vec()),
        });

        match self.replies.iter().find(|(prefix, _)| line.starts_with(prefix)) {
            Some((_, Reply::Stdout(x))) => Ok(CommandOutput {
                stdout: x.clone(),
                stderr: String::new(),
            }),
            Some((_, Reply::Exit(code))) => Err(WgError::CommandFailed {
                command: line,
                code: *code,
                output: String::new(),
            }),
            None => Ok(CommandOutput::default()),
        }
    }
}
