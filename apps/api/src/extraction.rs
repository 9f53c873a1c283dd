//! Document text extraction for uploaded PDFs.
//!
//! Extraction is all-or-nothing: either every page parses and the combined
//! text is non-empty, or the whole document is rejected.

use std::any::Any;
use std::fmt;
use std::panic;

use pdf_extract::{output_doc_page, Document, OutputError, PlainTextOutput};
use thiserror::Error;
use tracing::{debug, error};

/// Which upload a document came from. Used in error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Resume,
    JobDescription,
}

impl DocumentRole {
    /// The multipart field name the document is uploaded under.
    pub fn field_name(self) -> &'static str {
        match self {
            DocumentRole::Resume => "resume",
            DocumentRole::JobDescription => "job_description",
        }
    }
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No text could be extracted from the {role} PDF")]
    Empty { role: DocumentRole },

    #[error("Failed to parse the {role} PDF: {message}")]
    Parse { role: DocumentRole, message: String },
}

/// Extracts the text of every page of a PDF, in page order.
///
/// Blocking and CPU-bound; async callers should run it on the blocking pool.
/// The parser panics on some malformed structures (a page with no MediaBox,
/// for one); those are reported as `Parse` like any other parser error.
pub fn extract_pdf_text(bytes: &[u8], role: DocumentRole) -> Result<String, ExtractionError> {
    let pages = match panic::catch_unwind(|| read_pages(bytes)) {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => return Err(parse_failure(role, e.to_string())),
        Err(payload) => {
            let message = format!("unsupported PDF structure ({})", panic_message(&*payload));
            return Err(parse_failure(role, message));
        }
    };

    debug!("Extracted {} page(s) from {role} PDF", pages.len());
    join_pages(pages, role)
}

/// Reads every page; the first page that fails fails the document.
fn read_pages(bytes: &[u8]) -> Result<Vec<String>, OutputError> {
    let mut doc = Document::load_mem(bytes)?;
    if doc.is_encrypted() {
        doc.decrypt("")?;
    }

    doc.get_pages()
        .keys()
        .map(|&page| -> Result<String, OutputError> {
            let mut text = String::new();
            output_doc_page(&doc, &mut PlainTextOutput::new(&mut text), page)?;
            Ok(text)
        })
        .collect()
}

fn parse_failure(role: DocumentRole, message: String) -> ExtractionError {
    error!("Error extracting text from {role} PDF: {message}");
    ExtractionError::Parse { role, message }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "parser panicked".to_string()
    }
}

/// Concatenates page texts and rejects an empty result.
fn join_pages(pages: Vec<String>, role: DocumentRole) -> Result<String, ExtractionError> {
    let text = pages.concat();
    if text.is_empty() {
        error!("No text could be extracted from {role} PDF");
        return Err(ExtractionError::Empty { role });
    }
    Ok(text)
}

#[cfg(test)]
pub(crate) mod tests {
    use pdf_extract::content::{Content, Operation};
    use pdf_extract::{dictionary, Object, Stream};

    use super::*;

    /// Builds a PDF with one Courier text line per page.
    pub(crate) fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        build_pdf(pages, |_| true)
    }

    /// A one-page PDF whose page tree carries no MediaBox.
    pub(crate) fn pdf_without_media_box(text: &str) -> Vec<u8> {
        build_pdf(&[text], |_| false)
    }

    /// `has_media_box` decides, per page index, whether the page declares a size.
    fn build_pdf(pages: &[&str], has_media_box: impl Fn(usize) -> bool) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let kids: Vec<Object> = pages
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let content = Content {
                    operations: vec![
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), 24.into()]),
                        Operation::new("Td", vec![72.into(), 700.into()]),
                        Operation::new("Tj", vec![Object::string_literal(*text)]),
                        Operation::new("ET", vec![]),
                    ],
                };
                let content_id =
                    doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
                let mut page = dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "Contents" => content_id,
                };
                if has_media_box(index) {
                    page.set(
                        "MediaBox",
                        Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
                    );
                }
                doc.add_object(page).into()
            })
            .collect();

        let tree = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "Resources" => resources_id,
        };
        doc.objects.insert(pages_id, Object::Dictionary(tree));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_extract_pdf_text_single_page() {
        let pdf = pdf_with_pages(&["Senior Rust Engineer"]);
        let text = extract_pdf_text(&pdf, DocumentRole::Resume).unwrap();
        assert!(text.contains("Senior Rust Engineer"), "got {text:?}");
    }

    #[test]
    fn test_extract_pdf_text_joins_pages_in_order() {
        let pdf = pdf_with_pages(&["Alpha page", "Bravo page"]);
        let text = extract_pdf_text(&pdf, DocumentRole::JobDescription).unwrap();

        let first = text.find("Alpha page").expect("first page text");
        let second = text.find("Bravo page").expect("second page text");
        assert!(first < second, "pages out of order: {text:?}");
    }

    #[test]
    fn test_extract_pdf_text_bad_later_page_fails_whole_document() {
        let pdf = build_pdf(&["Readable first page", "Broken second page"], |index| index == 0);
        let err = extract_pdf_text(&pdf, DocumentRole::JobDescription).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Parse {
                role: DocumentRole::JobDescription,
                ..
            }
        ));
    }

    #[test]
    fn test_extract_pdf_text_parser_panic_is_parse_error() {
        let pdf = pdf_without_media_box("No page size");
        let err = extract_pdf_text(&pdf, DocumentRole::Resume).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Parse {
                role: DocumentRole::Resume,
                ..
            }
        ));
    }

    #[test]
    fn test_join_pages_preserves_page_order() {
        let pages = vec![
            "Page one\n".to_string(),
            "Page two\n".to_string(),
            "Page three".to_string(),
        ];
        let text = join_pages(pages, DocumentRole::Resume).unwrap();
        assert_eq!(text, "Page one\nPage two\nPage three");
    }

    #[test]
    fn test_join_pages_empty_document_fails() {
        let err = join_pages(vec![], DocumentRole::Resume).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Empty {
                role: DocumentRole::Resume
            }
        ));
    }

    #[test]
    fn test_join_pages_all_pages_blank_fails() {
        let pages = vec![String::new(), String::new()];
        let err = join_pages(pages, DocumentRole::JobDescription).unwrap_err();
        assert!(matches!(err, ExtractionError::Empty { .. }));
        assert_eq!(
            err.to_string(),
            "No text could be extracted from the job_description PDF"
        );
    }

    #[test]
    fn test_extract_pdf_text_rejects_non_pdf_bytes() {
        let err = extract_pdf_text(b"definitely not a pdf", DocumentRole::Resume).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Parse {
                role: DocumentRole::Resume,
                ..
            }
        ));
    }

    #[test]
    fn test_document_role_field_names() {
        assert_eq!(DocumentRole::Resume.field_name(), "resume");
        assert_eq!(DocumentRole::JobDescription.field_name(), "job_description");
    }
}
