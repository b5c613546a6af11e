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

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Result, WgError};
use crate::exec::CommandRunner;
use crate::file::{create_dir, write_secret, write_truncate};

pub const PRIVATE_KEY_FILE: &str = "private.key";
pub const PUBLIC_KEY_FILE: &str = "public.key";

const KEY_LEN: usize = 32;

/// Checks that `key` is a base64 encoded curve25519 key.
pub fn validate_key(key: &str) -> Result<()> {
    match base64::decode(key) {
        Ok(x) if x.len() == KEY_LEN => Ok(()),
        _ => Err(WgError::BadParameter {
            msg: "Invalid key format".to_string(),
        }),
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_key: String,
    public_key: String,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"(hidden)")
            .field("public_key", &self.public_key)
            .finish()
    }
}

impl KeyPair {
    /// Asks `wg` for a new key pair and stores it in `dir`.
    pub fn generate(runner: &dyn CommandRunner, dir: &Path) -> Result<KeyPair> {
        let private_key = runner.run("wg", &["genkey"], None)?.stdout.trim().to_string();
        validate_key(&private_key)?;

        let public_key = runner
            .run("wg", &["pubkey"], Some(private_key.as_bytes()))?
            .stdout
            .trim()
            .to_string();
        validate_key(&public_key)?;

        create_dir(dir, 0o755)?;
        write_secret(
            &dir.join(PRIVATE_KEY_FILE),
            format!("{}\n", private_key).as_bytes(),
        )?;
        write_truncate(
            &dir.join(PUBLIC_KEY_FILE),
            format!("{}\n", public_key).as_bytes(),
            0o644,
        )?;

        log::info!("Generated key pair in {}", dir.display());

        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    /// Reads a key pair written by [`KeyPair::generate`].
    pub fn load(dir: &Path) -> Result<KeyPair> {
        let private_key = read_key(&dir.join(PRIVATE_KEY_FILE))?;
        let public_key = read_key(&dir.join(PUBLIC_KEY_FILE))?;

        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

fn read_key(path: &Path) -> Result<String> {
    let key = match fs::read_to_string(path) {
        Ok(x) => x.trim().to_string(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(WgError::EntryNotFound {
                msg: format!("{} does not exist", path.display()),
            })
        }
        Err(e) => return Err(e.into()),
    };

    match validate_key(&key) {
        Ok(_) => Ok(key),
        Err(_) => Err(WgError::BadParameter {
            msg: format!("{} does not hold a valid key", path.display()),
        }),
    }
}
