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

use std::path::{Path, PathBuf};

use super::common::PlatformOps;
use crate::error::{Result, WgError};
use crate::exec::CommandRunner;
use crate::wgconf::InterfaceHeader;

/// Stand-in for an OS we have no commands for. Every operation fails
/// without touching the system.
pub struct Unsupported {
    os: String,
}

impl Unsupported {
    pub fn new(os: &str) -> Unsupported {
        Unsupported { os: os.to_string() }
    }

    fn error(&self) -> WgError {
        WgError::UnsupportedPlatform {
            os: self.os.clone(),
        }
    }
}

impl PlatformOps for Unsupported {
    fn os(&self) -> &str {
        &self.os
    }

    fn default_config_dir(&self) -> Result<PathBuf> {
        Err(self.error())
    }

    fn create_link(
        &self,
        _runner: &dyn CommandRunner,
        _name: &str,
        _addresses: &[String],
    ) -> Result<()> {
        Err(self.error())
    }

    fn render_header(&self, _header: &InterfaceHeader) -> Result<String> {
        Err(self.error())
    }

    fn apply(&self, _runner: &dyn CommandRunner, _name: &str, _config_path: &Path) -> Result<()> {
        Err(self.error())
    }

    fn down(&self, _runner: &dyn CommandRunner, _name: &str, _config_path: &Path) -> Result<()> {
        Err(self.error())
    }

    fn link_address(&self, _runner: &dyn CommandRunner, _name: &str) -> Result<Option<String>> {
        Err(self.error())
    }
}
