// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Small shared utilities.

pub use cowvec::CowVec;

mod cowvec;
