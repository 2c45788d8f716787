// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Random identifiers for stored records.

use ring::rand::{SecureRandom, SystemRandom};

/// Largest integer a JavaScript client can represent exactly (2^53 - 1).
const MAX_JS_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Generate a 128-bit random document ID, hex encoded.
pub fn new_document_id() -> anyhow::Result<String> {
    let mut bytes = [0u8; 16];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| anyhow::anyhow!("System RNG unavailable"))?;
    Ok(hex::encode(bytes))
}

/// Generate a random, non-zero user ID that survives a round trip through JSON numbers.
pub fn new_user_id() -> anyhow::Result<u64> {
    let rng = SystemRandom::new();
    loop {
        let mut bytes = [0u8; 8];
        rng.fill(&mut bytes)
            .map_err(|_| anyhow::anyhow!("System RNG unavailable"))?;
        let id = u64::from_be_bytes(bytes) & MAX_JS_SAFE_INTEGER;
        if id != 0 {
            return Ok(id);
        }
    }
}
