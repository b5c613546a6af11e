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

use std::fs;

use serde::Deserialize;
use wgtool::{Backend, InterfaceOptions, NetInterface, WgError};

use crate::error::CliError;

/// An interface and its peers as written by the operator.
#[derive(Deserialize, Debug)]
pub struct Profile {
    pub interface: ProfileInterface,
    #[serde(default)]
    pub peer: Vec<ProfilePeer>,
}

#[derive(Deserialize, Debug)]
pub struct ProfileInterface {
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub listen_port: u16,
}

#[derive(Deserialize, Debug)]
pub struct ProfilePeer {
    pub public_key: String,
    pub allowed_ips: String,
    pub endpoint: Option<String>,
}

pub fn read_profile(path: &str) -> Result<Profile, CliError> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

impl Profile {
    pub fn create(
        &self,
        backend: Backend,
        options: &InterfaceOptions,
    ) -> Result<NetInterface, WgError> {
        let iface = &self.interface;
        let mut out = NetInterface::create(
            backend,
            &iface.name,
            &iface.address,
            iface.listen_port,
            options,
        )?;
        self.add_peers(&mut out)?;
        Ok(out)
    }

    pub fn attach(
        &self,
        backend: Backend,
        options: &InterfaceOptions,
    ) -> Result<NetInterface, WgError> {
        let iface = &self.interface;
        let mut out = NetInterface::existing(
            backend,
            &iface.name,
            &iface.address,
            iface.listen_port,
            options,
        )?;
        self.add_peers(&mut out)?;
        Ok(out)
    }

    fn add_peers(&self, iface: &mut NetInterface) -> Result<(), WgError> {
        for peer in &self.peer {
            iface.add_peer(&peer.public_key, &peer.allowed_ips, peer.endpoint.as_deref())?;
        }
        Ok(())
    }
}
