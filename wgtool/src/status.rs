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

//! Scraping `wg show` output into records.
//!
//! The text format of `wg show` is meant for humans and carries no version,
//! so this is best-effort: a line opening with `interface:` or `peer:`
//! starts a new block whose identifier is the rest of that line, and the
//! `key: value` lines that follow are matched on the key with whitespace
//! removed and case folded. Anything unrecognised is skipped, and a block
//! without an identifier or without a single field line is dropped.
//!
//! ```text
//! interface: wg0
//!   public key: dGhpcyBpcyBub3QgYSByZWFsIGtleSBidXQgaXQgaXM=
//!   private key: (hidden)
//!   listening port: 51820
//!
//! peer: Y2FuIHlvdSBwbGVhc2Ugc3RvcCBkZWNvZGluZyB0aGlzPw==
//!   endpoint: 203.0.113.5:51820
//!   allowed ips: 10.0.0.2/32
//!   latest handshake: 1 minute, 3 seconds ago
//!   transfer: 1.02 MiB received, 3.44 MiB sent
//! ```

use serde::Serialize;

use crate::backend::Backend;
use crate::error::Result;
use crate::exec::Elevation;
use crate::interface::validate_name;
use crate::peer::Peer;

const INTERFACE_TAG: &str = "interface";
const PEER_TAG: &str = "peer";

/// One interface as reported by the status command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    pub name: String,
    pub address: String,
    pub public_key: String,
    pub private_key: String,
    pub listen_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fwmark: Option<String>,
    #[serde(rename = "peer")]
    pub peers: Vec<Peer>,
}

#[derive(PartialEq)]
enum Kind {
    Interface,
    Peer,
}

struct Chunk {
    kind: Kind,
    id: String,
    fields: Vec<(String, String)>,
}

/// Runs `wg show [NAME]` and parses what it prints. The address of every
/// interface is then looked up through the platform, ignoring failures.
pub fn query_status(backend: &Backend, filter: Option<&str>) -> Result<Vec<InterfaceInfo>> {
    let mut args = vec!["show"];
    if let Some(name) = filter {
        validate_name(name)?;
        args.push(name);
    }

    let out = backend.runner().run("wg", &args, None)?;
    let mut infos = parse_status(&out.combined());

    for info in infos.iter_mut() {
        match backend.platform().link_address(backend.runner(), &info.name) {
            Ok(Some(x)) => info.address = x,
            Ok(None) => {}
            Err(e) => log::warn!("Failed to look up address of {}: {}", info.name, e),
        }
    }

    Ok(infos)
}

/// [`query_status`] on the current OS.
pub fn get_info(elevation: Elevation, filter: Option<&str>) -> Result<Vec<InterfaceInfo>> {
    query_status(&Backend::system(elevation), filter)
}

pub fn parse_status(output: &str) -> Vec<InterfaceInfo> {
    let mut infos: Vec<InterfaceInfo> = vec![];
    // None while inside a dropped interface block, so its peers go too
    let mut current: Option<InterfaceInfo> = None;

    for chunk in split_chunks(output) {
        if chunk.id.is_empty() || chunk.fields.is_empty() {
            log::trace!("Dropping malformed block {:?}", chunk.id);
            if chunk.kind == Kind::Interface {
                if let Some(x) = current.take() {
                    infos.push(x);
                }
            }
            continue;
        }

        match chunk.kind {
            Kind::Interface => {
                if let Some(x) = current.take() {
                    infos.push(x);
                }
                current = Some(parse_interface(chunk));
            }
            Kind::Peer => match current {
                Some(ref mut x) => x.peers.push(parse_peer(chunk)),
                None => log::trace!("Dropping peer {} outside an interface", chunk.id),
            },
        }
    }

    if let Some(x) = current {
        infos.push(x);
    }

    infos
}

fn split_chunks(output: &str) -> Vec<Chunk> {
    let mut chunks: Vec<Chunk> = vec![];

    for line in output.lines() {
        let (key, value) = match split_field(line) {
            Some(x) => x,
            None => continue,
        };

        let kind = match key.as_str() {
            INTERFACE_TAG => Some(Kind::Interface),
            PEER_TAG => Some(Kind::Peer),
            _ => None,
        };

        match kind {
            Some(kind) => chunks.push(Chunk {
                kind,
                id: value,
                fields: vec![],
            }),
            None => match chunks.last_mut() {
                Some(chunk) => chunk.fields.push((key, value)),
                None => log::trace!("Skipping line before first block: {}", line),
            },
        }
    }

    chunks
}

/// `"  Latest Handshake: 1 minute ago"` becomes
/// `("latesthandshake", "1 minute ago")`. Only the first colon separates.
fn split_field(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    let key: String = key
        .chars()
        .filter(|x| !x.is_whitespace())
        .flat_map(|x| x.to_lowercase())
        .collect();

    match key.is_empty() {
        true => None,
        false => Some((key, value.trim().to_string())),
    }
}

fn parse_interface(chunk: Chunk) -> InterfaceInfo {
    let mut info = InterfaceInfo {
        name: chunk.id,
        ..Default::default()
    };

    for (key, value) in chunk.fields {
        match key.as_str() {
            "publickey" => info.public_key = value,
            "privatekey" => info.private_key = value,
            "listeningport" => {
                info.listen_port = value.parse().unwrap_or_else(|_| {
                    log::trace!("Unparseable listening port {:?}", value);
                    0
                })
            }
            "fwmark" => info.fwmark = Some(value),
            _ => {}
        }
    }

    info
}

fn parse_peer(chunk: Chunk) -> Peer {
    let mut peer = Peer {
        public_key: chunk.id,
        ..Default::default()
    };

    for (key, value) in chunk.fields {
        match key.as_str() {
            "endpoint" => peer.endpoint = Some(value),
            "allowedips" => peer.allowed_ips = value,
            "latesthandshake" => peer.latest_handshake = Some(value),
            "transfer" => peer.transfer = Some(value),
            "persistentkeepalive" => peer.persistent_keepalive = Some(value),
            _ => {}
        }
    }

    peer
}
