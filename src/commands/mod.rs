// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analyze;
pub mod budgets;
pub mod dashboard;
pub mod exporter;
pub mod importer;
pub mod todos;
pub mod transactions;
pub mod watch;
