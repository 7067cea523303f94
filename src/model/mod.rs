//! Document model types.
//!
//! Raw analysis input (`AnalysisResult` and friends) is converted into the
//! cleaned `Paragraph` and `Table` types, which the layout stage turns into
//! ordered `ContentBlock`s per `Page`. `Chunk` is the final output record.

mod analysis;
mod chunk;
mod page;
mod paragraph;
mod table;

pub(crate) use analysis::page_count_of;
pub use analysis::{AnalysisResult, AnalyzedPage, BoundingRegion, RawCell, RawParagraph, RawTable};
pub use chunk::Chunk;
pub use page::{BlockRole, ContentBlock, Page, PARAGRAPH_TAG, TABLE_TAG};
pub use paragraph::{Paragraph, DEFAULT_ROLE};
pub use table::{Cell, CellKind, Table};
