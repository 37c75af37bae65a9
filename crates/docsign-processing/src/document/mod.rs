//! PDF document processing

pub mod stamper;

pub use stamper::PdfStamper;
