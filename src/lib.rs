// Copyright (c) Qirsh.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod chat;
pub mod cli;
pub mod commands;
pub mod db;
pub mod fx;
pub mod models;
pub mod service;
pub mod store;
pub mod utils;
