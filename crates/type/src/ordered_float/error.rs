// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use thiserror::Error;

/// NaN has no position in a total order and is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("nan is not an orderable float value")]
pub struct OrderedFloatError;
