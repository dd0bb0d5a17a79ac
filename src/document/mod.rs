//! Document model and the DOCX container it is read from and written to.

pub mod docx;
pub mod model;
pub mod style;
pub mod xml;

pub use docx::DocxPackage;
pub use model::{Block, Cell, Document, Inline, Paragraph, Row, Run, RunRef, Table};
pub use style::{ColorKind, HIGHLIGHT_COLORS, Rgb, RunStyle};
