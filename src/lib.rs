// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod advisor;
pub mod aggregate;
pub mod api;
pub mod budget;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod models;
pub mod store;
pub mod utils;
