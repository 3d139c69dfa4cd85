use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::errors::ExtractionCause;

/// Extracts text page by page and concatenates it in page order.
///
/// The PDF parser can panic on some malformed inputs; a panic is reported as
/// an extraction failure instead of unwinding into the caller.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractionCause> {
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|payload| ExtractionCause::PdfPanic(panic_message(payload.as_ref())))??;

    Ok(join_pages(&pages))
}

/// Pages without extractable text arrive as empty strings and add nothing.
fn join_pages(pages: &[String]) -> String {
    pages.concat().trim().to_string()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
