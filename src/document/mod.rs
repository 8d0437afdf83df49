//! Canonical document model, response normalization, and table grids

pub mod grid;
pub mod models;
pub mod normalize;

pub use grid::build_grid;
pub use models::{
    BlockModel, LineModel, NormalizedDocument, PageModel, RichDocument, RichPage, TableCell,
    TableModel, WordModel,
};
pub use normalize::normalize;
