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

//! The `wg`/`wg-quick` configuration file syntax.
//!
//! Rendering is split in two: the `[Interface]` header differs per platform
//! and comes from [`PlatformOps::render_header`](crate::PlatformOps), the
//! `[Peer]` sections are the same everywhere.

use std::fmt::Write;

use crate::error::{Result, WgError};
use crate::peer::Peer;

/// Fields the platform needs to render the `[Interface]` section.
pub struct InterfaceHeader<'a> {
    pub address: &'a str,
    pub private_key: &'a str,
    pub listen_port: u16,
}

pub fn render_peers(peers: &[Peer]) -> String {
    let mut out = String::new();
    for peer in peers {
        // Writing to a String never fails
        let _ = write!(
            out,
            "[Peer]\nPublicKey = {}\nAllowedIPs = {}\n",
            peer.public_key, peer.allowed_ips
        );
        if let Some(ref endpoint) = peer.endpoint {
            let _ = writeln!(out, "Endpoint = {}", endpoint);
        }
        out.push('\n');
    }

    out
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigInterface {
    pub address: Option<String>,
    pub private_key: Option<String>,
    pub listen_port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WgConfig {
    pub interface: ConfigInterface,
    pub peers: Vec<Peer>,
}

enum Section {
    Preamble,
    Interface,
    Peer(Peer),
}

/// Reads a config file back. Keys the renderer never writes (`DNS`, `MTU`,
/// `PresharedKey`, ...) are accepted and ignored.
pub fn parse_config(text: &str) -> Result<WgConfig> {
    let mut cfg = WgConfig::default();
    let mut section = Section::Preamble;

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            finish_section(&mut cfg, section, lineno)?;
            section = match line[1..line.len() - 1].trim().to_ascii_lowercase().as_str() {
                "interface" => Section::Interface,
                "peer" => Section::Peer(Peer::default()),
                other => {
                    return Err(WgError::BadParameter {
                        msg: format!("line {}: unknown section [{}]", lineno, other),
                    })
                }
            };
            continue;
        }

        let (key, value) = match line.split_once('=') {
            Some((k, v)) => (k.trim().to_ascii_lowercase(), v.trim().to_string()),
            None => {
                return Err(WgError::BadParameter {
                    msg: format!("line {}: expected `Key = Value`", lineno),
                })
            }
        };

        match section {
            Section::Preamble => {
                return Err(WgError::BadParameter {
                    msg: format!("line {}: key outside of a section", lineno),
                })
            }
            Section::Interface => match key.as_str() {
                "address" => append_list(&mut cfg.interface.address, value),
                "privatekey" => cfg.interface.private_key = Some(value),
                "listenport" => {
                    cfg.interface.listen_port = match value.parse() {
                        Ok(x) => Some(x),
                        Err(_) => {
                            return Err(WgError::BadParameter {
                                msg: format!("line {}: invalid ListenPort", lineno),
                            })
                        }
                    }
                }
                _ => log::trace!("Ignoring interface key {}", key),
            },
            Section::Peer(ref mut peer) => match key.as_str() {
                "publickey" => peer.public_key = value,
                "allowedips" => {
                    if peer.allowed_ips.is_empty() {
                        peer.allowed_ips = value;
                    } else {
                        peer.allowed_ips = format!("{},{}", peer.allowed_ips, value);
                    }
                }
                "endpoint" => peer.endpoint = Some(value),
                _ => log::trace!("Ignoring peer key {}", key),
            },
        }
    }

    let end = text.lines().count();
    finish_section(&mut cfg, section, end)?;

    Ok(cfg)
}

fn strip_comment(line: &str) -> &str {
    match line.find(|c| c == '#' || c == ';') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn append_list(target: &mut Option<String>, value: String) {
    *target = match target.take() {
        Some(x) => Some(format!("{},{}", x, value)),
        None => Some(value),
    };
}

fn finish_section(cfg: &mut WgConfig, section: Section, lineno: usize) -> Result<()> {
    if let Section::Peer(peer) = section {
        if peer.public_key.is_empty() {
            return Err(WgError::BadParameter {
                msg: format!("line {}: [Peer] without PublicKey", lineno),
            });
        }
        cfg.peers.push(peer);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::{PRIVKEY, PUBKEY_A, PUBKEY_B};

    #[test]
    fn test_render_peers() {
        let peers = vec![
            Peer::new(PUBKEY_A, "10.0.0.2/32", None),
            Peer::new(PUBKEY_B, "10.0.0.3/32, fd00::3/128", Some("203.0.113.5:51820")),
        ];

        let expected = format!(
            "[Peer]\nPublicKey = {}\nAllowedIPs = 10.0.0.2/32\n\n\
             [Peer]\nPublicKey = {}\nAllowedIPs = 10.0.0.3/32, fd00::3/128\nEndpoint = 203.0.113.5:51820\n\n",
            PUBKEY_A, PUBKEY_B
        );
        assert_eq!(render_peers(&peers), expected);
    }

    #[test]
    fn test_render_then_parse() {
        let peers = vec![
            Peer::new(PUBKEY_A, "10.0.0.2/32", Some("[2001:db8::1]:51820")),
            Peer::new(PUBKEY_B, "0.0.0.0/0", None),
        ];
        let text = format!(
            "[Interface]\nPrivateKey = {}\nListenPort = 51820\n\n{}",
            PRIVKEY,
            render_peers(&peers)
        );

        let cfg = parse_config(&text).unwrap();
        assert_eq!(cfg.interface.private_key.as_deref(), Some(PRIVKEY));
        assert_eq!(cfg.interface.listen_port, Some(51820));
        assert_eq!(cfg.peers, peers);
        assert!(cfg.peers.iter().all(|x| x.latest_handshake().is_none()));
    }

    #[test]
    fn test_parse_wg_quick_file() {
        let text = format!(
            r##"
# managed elsewhere
[Interface]
Address = 10.0.0.1/24
Address = fd00::1/64
PrivateKey = {}
ListenPort = 51820
DNS = 1.1.1.1

[peer]
PublicKey = {}
PresharedKey = {}
AllowedIPs = 10.0.0.2/32
AllowedIPs = fd00::2/128 ; second line
PersistentKeepalive = 25
"##,
            PRIVKEY, PUBKEY_A, PUBKEY_B
        );

        let cfg = parse_config(&text).unwrap();
        assert_eq!(
            cfg.interface.address.as_deref(),
            Some("10.0.0.1/24,fd00::1/64")
        );
        assert_eq!(cfg.peers.len(), 1);
        assert_eq!(cfg.peers[0].public_key(), PUBKEY_A);
        assert_eq!(cfg.peers[0].allowed_ips(), "10.0.0.2/32,fd00::2/128");
        assert_eq!(cfg.peers[0].endpoint(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_config("PrivateKey = x\n").is_err());
        assert!(parse_config("[Interface]\nListenPort = many\n").is_err());
        assert!(parse_config("[Peer]\nAllowedIPs = 10.0.0.2/32\n").is_err());
        assert!(parse_config("[Tunnel]\n").is_err());
        assert!(parse_config("[Interface]\nno separator\n").is_err());
    }
}
