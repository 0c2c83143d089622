// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

#![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(not(debug_assertions), deny(warnings))]

//! Core type system and value representations shared across the Tessera
//! client crates.

pub use ordered_float::{OrderedF32, OrderedF64, OrderedFloatError};
pub use r#type::Type;
pub use value::Value;

mod ordered_float;
mod r#type;
pub mod util;
mod value;
