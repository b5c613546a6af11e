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

use regex::Regex;

use super::common::{path_arg, PlatformOps};
use crate::error::{Result, WgError};
use crate::exec::CommandRunner;
use crate::wgconf::InterfaceHeader;

const CONFIG_DIR_NAME: &str = "wireguard";

lazy_static! {
    static ref IFCONFIG_INET_RE: Regex = Regex::new(r"(?m)^\s*inet6?\s+(\S+)").unwrap();
}

/// Userspace WireGuard driven through `wg-quick`, which creates the utun
/// device and assigns addresses itself.
pub struct Macos;

impl PlatformOps for Macos {
    fn os(&self) -> &str {
        "macos"
    }

    fn default_config_dir(&self) -> Result<PathBuf> {
        match dirs::home_dir() {
            Some(mut x) => {
                x.push(CONFIG_DIR_NAME);
                Ok(x)
            }
            None => Err(WgError::Internal {
                msg: "Unable to determine home directory".to_string(),
            }),
        }
    }

    fn create_link(
        &self,
        _runner: &dyn CommandRunner,
        _name: &str,
        _addresses: &[String],
    ) -> Result<()> {
        Ok(())
    }

    fn render_header(&self, header: &InterfaceHeader) -> Result<String> {
        let mut out = String::from("[Interface]\n");
        if !header.address.is_empty() {
            out.push_str(&format!("Address = {}\n", header.address));
        }
        out.push_str(&format!(
            "PrivateKey = {}\nListenPort = {}\n\n",
            header.private_key, header.listen_port
        ));
        Ok(out)
    }

    fn apply(&self, runner: &dyn CommandRunner, _name: &str, config_path: &Path) -> Result<()> {
        runner.run("wg-quick", &["up", path_arg(config_path).as_str()], None)?;
        Ok(())
    }

    fn down(&self, runner: &dyn CommandRunner, _name: &str, config_path: &Path) -> Result<()> {
        runner.run("wg-quick", &["down", path_arg(config_path).as_str()], None)?;
        Ok(())
    }

    fn link_address(&self, runner: &dyn CommandRunner, name: &str) -> Result<Option<String>> {
        let out = runner.run("ifconfig", &[name], None)?;
        Ok(IFCONFIG_INET_RE
            .captures(&out.stdout)
            .map(|x| x[1].to_string()))
    }
}
