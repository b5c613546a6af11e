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

use serde::Serialize;

/// A remote endpoint of an interface, identified by its public key.
///
/// `latest_handshake`, `transfer` and `persistent_keepalive` are only ever
/// filled in by the status parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Peer {
    pub(crate) public_key: String,
    pub(crate) allowed_ips: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) latest_handshake: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) transfer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) persistent_keepalive: Option<String>,
}

impl Peer {
    pub fn new(public_key: &str, allowed_ips: &str, endpoint: Option<&str>) -> Peer {
        Peer {
            public_key: public_key.to_string(),
            allowed_ips: allowed_ips.to_string(),
            endpoint: endpoint.map(|x| x.to_string()),
            ..Default::default()
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn allowed_ips(&self) -> &str {
        &self.allowed_ips
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn latest_handshake(&self) -> Option<&str> {
        self.latest_handshake.as_deref()
    }

    pub fn transfer(&self) -> Option<&str> {
        self.transfer.as_deref()
    }

    pub fn persistent_keepalive(&self) -> Option<&str> {
        self.persistent_keepalive.as_deref()
    }
}
