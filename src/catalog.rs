//! Track catalog: the cards a catalog source reports and the playlist built from them.

mod build;
mod model;
mod source;

pub use build::{build_playlist, file_id_from_src, upload_src};
pub use model::*;
pub use source::{CatalogError, CatalogSource, DirectoryCatalog, ServerCatalog};

#[cfg(test)]
mod tests;
