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
use crate::error::Result;
use crate::exec::CommandRunner;
use crate::wgconf::InterfaceHeader;

const DEFAULT_CONFIG_DIR: &str = "/etc/wireguard";

lazy_static! {
    // 4: wg0    inet 10.0.0.1/24 scope global wg0\       valid_lft forever ...
    static ref IP_ADDR_RE: Regex = Regex::new(r"\binet6?\s+(\S+)").unwrap();
}

/// Kernel WireGuard driven through `ip` and `wg setconf`.
pub struct Linux;

impl PlatformOps for Linux {
    fn os(&self) -> &str {
        "linux"
    }

    fn default_config_dir(&self) -> Result<PathBuf> {
        Ok(PathBuf::from(DEFAULT_CONFIG_DIR))
    }

    fn create_link(
        &self,
        runner: &dyn CommandRunner,
        name: &str,
        addresses: &[String],
    ) -> Result<()> {
        runner.run("ip", &["link", "add", "dev", name, "type", "wireguard"], None)?;

        for address in addresses {
            runner.run("ip", &["address", "add", "dev", name, address.as_str()], None)?;
        }

        Ok(())
    }

    fn render_header(&self, header: &InterfaceHeader) -> Result<String> {
        // `wg setconf` rejects Address; it was assigned by create_link
        Ok(format!(
            "[Interface]\nPrivateKey = {}\nListenPort = {}\n\n",
            header.private_key, header.listen_port
        ))
    }

    fn apply(&self, runner: &dyn CommandRunner, name: &str, config_path: &Path) -> Result<()> {
        let path = path_arg(config_path);
        runner.run("wg", &["setconf", name, path.as_str()], None)?;
        runner.run("ip", &["link", "set", name, "up"], None)?;
        Ok(())
    }

    fn down(&self, runner: &dyn CommandRunner, name: &str, _config_path: &Path) -> Result<()> {
        runner.run("ip", &["link", "set", name, "down"], None)?;
        Ok(())
    }

    fn link_address(&self, runner: &dyn CommandRunner, name: &str) -> Result<Option<String>> {
        let out = runner.run("ip", &["-o", "addr", "show", "dev", name], None)?;
        Ok(IP_ADDR_RE
            .captures(&out.stdout)
            .map(|x| x[1].to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::{ScriptedRunner, PRIVKEY};

    #[test]
    fn test_create_link_commands() {
        let runner = ScriptedRunner::new();
        let calls = runner.calls();

        Linux
            .create_link(
                &runner,
                "wg0",
                &["10.0.0.1/24".to_string(), "fd00::1/64".to_string()],
            )
            .unwrap();

        let lines: Vec<String> = calls.borrow().iter().map(|x| x.line.clone()).collect();
        assert_eq!(
            lines,
            vec![
                "ip link add dev wg0 type wireguard",
                "ip address add dev wg0 10.0.0.1/24",
                "ip address add dev wg0 'fd00::1/64'",
            ]
        );
    }

    #[test]
    fn test_header_has_no_address() {
        let header = Linux
            .render_header(&InterfaceHeader {
                address: "10.0.0.1/24",
                private_key: PRIVKEY,
                listen_port: 51820,
            })
            .unwrap();

        assert_eq!(
            header,
            format!("[Interface]\nPrivateKey = {}\nListenPort = 51820\n\n", PRIVKEY)
        );
    }

    #[test]
    fn test_apply_stops_on_setconf_failure() {
        let runner = ScriptedRunner::new().fail("wg setconf", 1);
        let calls = runner.calls();

        assert!(Linux
            .apply(&runner, "wg0", Path::new("/etc/wireguard/wg0.conf"))
            .is_err());
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_link_address() {
        let runner = ScriptedRunner::new().respond(
            "ip -o addr show dev wg0",
            "4: wg0    inet 10.0.0.1/24 scope global wg0\\       valid_lft forever preferred_lft forever\n\
             4: wg0    inet6 fd00::1/64 scope global \\       valid_lft forever preferred_lft forever\n",
        );

        assert_eq!(
            Linux.link_address(&runner, "wg0").unwrap().as_deref(),
            Some("10.0.0.1/24")
        );
    }
}
