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
use std::path::PathBuf;

use serde::Deserialize;
use wgtool::{Elevation, InterfaceOptions};

use crate::error::CliError;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/wgtool.toml";

#[derive(Deserialize, Default)]
pub struct Config {
    pub wireguard: Option<WireguardConfig>,
    pub log: Option<LogConfig>,
}

#[derive(Deserialize, Default)]
pub struct WireguardConfig {
    pub config_dir: Option<String>,
    pub key_dir: Option<String>,
    pub sudo: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
}

const DEFAULT_KEY_DIR: &str = ".";
const DEFAULT_LOG_LEVEL: &str = "info";

fn get_default_config() -> Config {
    Config {
        wireguard: Some(WireguardConfig {
            config_dir: None,
            key_dir: Some(DEFAULT_KEY_DIR.to_string()),
            sudo: Some(false),
        }),
        log: Some(LogConfig {
            level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }),
    }
}

fn parse_toml(tomlstr: &str) -> Result<Config, CliError> {
    let mut cfg: Config = toml::from_str(tomlstr)?;
    let default = get_default_config();

    let wg = cfg.wireguard.get_or_insert_with(Default::default);
    let default_wg = default.wireguard.unwrap_or_default();
    if wg.key_dir.is_none() {
        wg.key_dir = default_wg.key_dir;
    }
    if wg.sudo.is_none() {
        wg.sudo = default_wg.sudo;
    }

    let log = cfg.log.get_or_insert_with(Default::default);
    if log.level.is_none() {
        log.level = default.log.unwrap_or_default().level;
    }

    Ok(cfg)
}

/// Reads the settings file. A missing file is only an error when the path
/// was given explicitly.
pub fn read_config(cfgpath: Option<&str>) -> Result<Config, CliError> {
    let path = cfgpath.unwrap_or(DEFAULT_CONFIG_PATH);
    match fs::read_to_string(path) {
        Ok(x) => parse_toml(&x),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => match cfgpath {
            Some(_) => Err(CliError::Config {
                msg: format!("{} not found", path),
            }),
            None => Ok(get_default_config()),
        },
        Err(e) => Err(e.into()),
    }
}

impl Config {
    fn wireguard(&self) -> Option<&WireguardConfig> {
        self.wireguard.as_ref()
    }

    pub fn elevation(&self) -> Elevation {
        match self.wireguard().and_then(|x| x.sudo) {
            Some(true) => Elevation::Sudo,
            _ => Elevation::None,
        }
    }

    pub fn log_level(&self) -> &str {
        self.log
            .as_ref()
            .and_then(|x| x.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn interface_options(&self) -> InterfaceOptions {
        let wg = self.wireguard();
        InterfaceOptions {
            config_dir: wg.and_then(|x| x.config_dir.as_ref()).map(PathBuf::from),
            key_dir: PathBuf::from(
                wg.and_then(|x| x.key_dir.as_deref())
                    .unwrap_or(DEFAULT_KEY_DIR),
            ),
        }
    }
}
