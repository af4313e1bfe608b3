// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod chat;
pub mod dashboard;
pub mod doctor;
pub mod expenses;
pub mod exporter;
pub mod rates;
pub mod report;
