// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

/// Formats raw key bytes for log lines and diagnostics, without decoding.
pub struct Raw;

impl Raw {
    /// Formats raw bytes as an escaped ASCII string.
    pub fn bytes(bytes: &[u8]) -> String {
        let escaped = bytes.iter().copied().flat_map(std::ascii::escape_default).collect::<Vec<_>>();
        format!("\"{}\"", String::from_utf8_lossy(&escaped))
    }

    /// Formats raw bytes as 0x-prefixed hex.
    pub fn hex(bytes: &[u8]) -> String {
        format!("0x{}", hex::encode(bytes))
    }
}
