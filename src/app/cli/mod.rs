//! Command-line arguments and settings file

pub mod args;
pub mod config;

#[cfg(test)]
mod tests;
