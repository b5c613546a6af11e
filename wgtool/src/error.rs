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

use custom_error::custom_error;

custom_error! {pub WgError
    BadParameter{msg: String} = "Bad parameter: {msg}",
    EntryNotFound{msg: String} = "Entry not found: {msg}",
    Internal{msg: String} = "Internal error: {msg}",
    Io{source: std::io::Error} = "I/O error: {source}",
    CommandFailed{command: String, code: i32, output: String} = "`{command}` exited with status {code}: {output}",
    ToolNotFound{tool: String} = "Required tool not found in PATH: {tool}",
    UnsupportedPlatform{os: String} = "Not supported os: {os}",
}

pub type Result<T> = std::result::Result<T, WgError>;
