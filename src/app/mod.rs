//! Host application: command-line interface over the plugin manager

pub mod cli;
pub mod commands;
pub mod error;
pub mod startup;
