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

use ipnet::IpNet;
use regex::Regex;

use crate::backend::Backend;
use crate::error::{Result, WgError};
use crate::file::{create_dir, write_truncate};
use crate::keys::{validate_key, KeyPair};
use crate::peer::Peer;
use crate::wgconf::{render_peers, InterfaceHeader};

lazy_static! {
    // IFNAMSIZ minus the terminating NUL
    static ref IFNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_=+.\-]{1,15}$").unwrap();
}

#[derive(Debug, Clone)]
pub struct InterfaceOptions {
    /// Where `NAME.conf` goes. `None` means the platform default.
    pub config_dir: Option<PathBuf>,
    /// Where `private.key` and `public.key` live.
    pub key_dir: PathBuf,
}

impl Default for InterfaceOptions {
    fn default() -> Self {
        InterfaceOptions {
            config_dir: None,
            key_dir: PathBuf::from("."),
        }
    }
}

/// One local WireGuard interface and the peers it should be configured
/// with. Nothing reaches the system until [`NetInterface::apply`].
///
/// Not synchronised; callers sharing one across threads need their own
/// locking.
pub struct NetInterface {
    backend: Backend,
    name: String,
    address: String,
    keys: KeyPair,
    listen_port: u16,
    config_file_path: PathBuf,
    peers: Vec<Peer>,
}

impl NetInterface {
    /// Creates the link (where the platform needs one), generates a fresh
    /// key pair into `options.key_dir` and reads it back.
    ///
    /// `address` may hold several comma separated CIDRs.
    pub fn create(
        backend: Backend,
        name: &str,
        address: &str,
        listen_port: u16,
        options: &InterfaceOptions,
    ) -> Result<NetInterface> {
        validate_name(name)?;
        let addresses = split_addresses(address)?;
        let config_dir = config_dir(&backend, options)?;

        backend
            .platform()
            .create_link(backend.runner(), name, &addresses)?;
        create_dir(&config_dir, 0o755)?;

        KeyPair::generate(backend.runner(), &options.key_dir)?;
        let keys = KeyPair::load(&options.key_dir)?;

        log::info!("Created interface {} on {}", name, backend.platform().os());

        Ok(NetInterface {
            backend,
            name: name.to_string(),
            address: addresses.join(","),
            keys,
            listen_port,
            config_file_path: config_dir.join(format!("{}.conf", name)),
            peers: vec![],
        })
    }

    /// Attaches to an interface made earlier by [`NetInterface::create`]:
    /// no link is created and the stored keys are reused.
    pub fn existing(
        backend: Backend,
        name: &str,
        address: &str,
        listen_port: u16,
        options: &InterfaceOptions,
    ) -> Result<NetInterface> {
        validate_name(name)?;
        let addresses = split_addresses(address)?;
        let config_dir = config_dir(&backend, options)?;
        let keys = KeyPair::load(&options.key_dir)?;

        Ok(NetInterface {
            backend,
            name: name.to_string(),
            address: addresses.join(","),
            keys,
            listen_port,
            config_file_path: config_dir.join(format!("{}.conf", name)),
            peers: vec![],
        })
    }

    /// Appends a peer. Duplicates are not rejected.
    pub fn add_peer(
        &mut self,
        public_key: &str,
        allowed_ips: &str,
        endpoint: Option<&str>,
    ) -> Result<()> {
        validate_key(public_key)?;
        self.peers.push(Peer::new(public_key, allowed_ips, endpoint));
        Ok(())
    }

    /// Removes the first peer with `public_key`, returning whether one was
    /// found.
    pub fn remove_peer(&mut self, public_key: &str) -> bool {
        match self.peers.iter().position(|x| x.public_key == public_key) {
            Some(idx) => {
                self.peers.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn render(&self) -> Result<String> {
        let header = self.backend.platform().render_header(&InterfaceHeader {
            address: &self.address,
            private_key: self.keys.private_key(),
            listen_port: self.listen_port,
        })?;

        Ok(header + &render_peers(&self.peers))
    }

    /// Writes the config file, creating its directory when missing, and
    /// hands it to the platform tooling.
    pub fn apply(&self) -> Result<()> {
        let content = self.render()?;
        if let Some(dir) = self.config_file_path.parent() {
            create_dir(dir, 0o755)?;
        }
        write_truncate(&self.config_file_path, content.as_bytes(), 0o644)?;

        self.backend
            .platform()
            .apply(self.backend.runner(), &self.name, &self.config_file_path)?;

        log::info!(
            "Applied {} with {} peer(s) from {}",
            self.name,
            self.peers.len(),
            self.config_file_path.display()
        );
        Ok(())
    }

    pub fn down(&self) -> Result<()> {
        self.backend
            .platform()
            .down(self.backend.runner(), &self.name, &self.config_file_path)?;

        log::info!("Brought {} down", self.name);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn private_key(&self) -> &str {
        self.keys.private_key()
    }

    pub fn public_key(&self) -> &str {
        self.keys.public_key()
    }

    pub fn listen_port(&self) -> u16 {
        self.listen_port
    }

    pub fn config_file_path(&self) -> &Path {
        &self.config_file_path
    }

    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    match IFNAME_RE.is_match(name) {
        true => Ok(()),
        false => Err(WgError::BadParameter {
            msg: format!("Invalid interface name: {:?}", name),
        }),
    }
}

fn split_addresses(address: &str) -> Result<Vec<String>> {
    let mut out = vec![];
    for part in address.split(',').map(|x| x.trim()).filter(|x| !x.is_empty()) {
        if part.parse::<IpNet>().is_err() {
            return Err(WgError::BadParameter {
                msg: format!("Invalid address: {}", part),
            });
        }
        out.push(part.to_string());
    }

    Ok(out)
}

fn config_dir(backend: &Backend, options: &InterfaceOptions) -> Result<PathBuf> {
    match options.config_dir {
        Some(ref x) => Ok(x.clone()),
        None => backend.platform().default_config_dir(),
    }
}
