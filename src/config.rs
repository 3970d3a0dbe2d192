//! Layered settings: defaults, then `config.toml`, then `SPINDLE__*` variables.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
