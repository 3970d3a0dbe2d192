//! Application module: the UI model the runtime mutates and the renderer reads.
//!
//! `App` lives in `app::model` and holds the catalog cards, the selection,
//! the interaction mode and the modal forms in `app::forms`.

mod forms;
mod model;

pub use forms::*;
pub use model::*;

#[cfg(test)]
mod tests;
