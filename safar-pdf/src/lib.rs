pub mod document;
pub mod layout;

pub use document::VoucherDoc;
pub use layout::render;

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("PDF generation failed: {0}")]
    Render(#[from] printpdf::Error),
}

pub type PdfResult<T> = Result<T, PdfError>;
