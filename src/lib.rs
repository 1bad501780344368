// lib.rs for system76-hidpi-launcher
// This file allows the main crate to be used as a library by binaries in src/bin/

pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod launcher;
pub mod model;
pub mod resolver;
pub mod settings;
pub mod supervisor;
pub mod utils;
pub mod worker;
