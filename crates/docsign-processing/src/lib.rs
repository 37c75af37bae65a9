//! Docsign Processing Library
//!
//! Document transformations applied during signing. The only transformation today is the
//! signature stamp: a line of text drawn with an embedded TrueType font on the last page
//! of a PDF.

pub mod document;
pub mod font;
pub mod traits;

pub use document::PdfStamper;
pub use font::SignatureFont;
pub use traits::{DocumentTransformer, StampColor, StampError, TextStamp};
