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

use crate::error::Result;
use crate::exec::CommandRunner;
use crate::wgconf::InterfaceHeader;

/// Everything that differs between operating systems.
pub trait PlatformOps {
    /// OS name this implementation was selected for.
    fn os(&self) -> &str;
    fn default_config_dir(&self) -> Result<PathBuf>;
    /// Creates the virtual link and assigns `addresses` to it, where the OS
    /// needs that done before the config is loaded.
    fn create_link(&self, runner: &dyn CommandRunner, name: &str, addresses: &[String])
        -> Result<()>;
    fn render_header(&self, header: &InterfaceHeader) -> Result<String>;
    /// Loads the config file and activates the interface.
    fn apply(&self, runner: &dyn CommandRunner, name: &str, config_path: &Path) -> Result<()>;
    fn down(&self, runner: &dyn CommandRunner, name: &str, config_path: &Path) -> Result<()>;
    /// First address the OS reports for the link, if any.
    fn link_address(&self, runner: &dyn CommandRunner, name: &str) -> Result<Option<String>>;
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
