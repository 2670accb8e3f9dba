pub mod geometry;
pub mod record;
pub mod token;

pub use geometry::{BoundingBox, Point};
pub use record::{ReportStatus, TaxBases, VatRate, ZReport};
pub use token::{validate_tokens, Token};
