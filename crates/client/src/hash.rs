// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! The hash function behind hash partitioning.
//!
//! Bucket assignment must agree bit for bit between client and server, which
//! pin seeded xxh64. Changing this function reshuffles every hash-partitioned
//! table.

use xxhash_rust::xxh64::xxh64;

/// Hashes encoded column bytes with a hash component's seed.
pub fn hash64(bytes: &[u8], seed: u32) -> u64 {
    xxh64(bytes, u64::from(seed))
}
