pub mod sales_document;
pub mod uom;

pub use sales_document::{DocumentKind, SalesDocument, SalesLine};
pub use uom::WeightUom;
