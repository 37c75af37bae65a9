//! Signature stamping for PDF documents.
//!
//! Only the last page is modified. Its resources are copied inline before the font is
//! registered, so dictionaries shared with (or inherited by) other pages stay untouched and
//! the earlier pages render exactly as before.

use std::path::PathBuf;
use std::time::Instant;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::font::SignatureFont;
use crate::traits::{DocumentTransformer, StampError, TextStamp};

const FONT_RESOURCE_PREFIX: &str = "FSig";
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// Stamps text onto the last page of a PDF using a TrueType font read from disk.
///
/// The font is read on every call so a font replaced or removed at runtime is picked up
/// (and reported as [`StampError::FontUnavailable`]) without a restart.
#[derive(Debug, Clone)]
pub struct PdfStamper {
    font_path: PathBuf,
}

impl PdfStamper {
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        Self {
            font_path: font_path.into(),
        }
    }

    pub fn font_path(&self) -> &std::path::Path {
        &self.font_path
    }
}

#[async_trait]
impl DocumentTransformer for PdfStamper {
    async fn apply_stamp(&self, data: Vec<u8>, stamp: &TextStamp) -> Result<Vec<u8>, StampError> {
        let font_path = self.font_path.clone();
        let stamp = stamp.clone();

        tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let input_size = data.len();

            let document = Document::load_mem(&data)
                .map_err(|e| StampError::DocumentLoad(e.to_string()))?;
            let font = SignatureFont::load(&font_path)?;
            let output = stamp_document(document, &font, &stamp)?;

            tracing::debug!(
                input_bytes = input_size,
                output_bytes = output.len(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Applied text stamp to PDF"
            );
            Ok(output)
        })
        .await
        .map_err(|e| StampError::Task(e.to_string()))?
    }
}

/// Draw `stamp` on the last page of `document` and serialize the result.
pub fn stamp_document(
    mut document: Document,
    font: &SignatureFont,
    stamp: &TextStamp,
) -> Result<Vec<u8>, StampError> {
    let page_id = document
        .get_pages()
        .values()
        .next_back()
        .copied()
        .ok_or_else(|| StampError::DocumentLoad("Document has no pages".to_string()))?;

    let embedded = font.embed(&mut document, &stamp.text)?;
    if !embedded.missing.is_empty() {
        tracing::warn!(
            missing = ?embedded.missing,
            "Signature font has no glyph for some characters; drawing .notdef"
        );
    }

    let mut resources = inherited_resources(&document, page_id)?;
    let mut fonts = match resources.get(b"Font") {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        Ok(Object::Reference(id)) => document
            .get_dictionary(*id)
            .map(Dictionary::clone)
            .unwrap_or_default(),
        _ => Dictionary::new(),
    };
    let font_name = fresh_resource_name(&fonts);
    fonts.set(font_name.clone(), Object::Reference(embedded.font_id));
    resources.set("Font", Object::Dictionary(fonts));

    let existing_contents = page_contents(&document, page_id)?;

    let save_state = encode_operations(vec![Operation::new("q", vec![])])?;
    let stamp_ops = encode_operations(vec![
        Operation::new("Q", vec![]),
        Operation::new("q", vec![]),
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(font_name.into_bytes()),
                Object::Real(stamp.size),
            ],
        ),
        Operation::new(
            "rg",
            vec![
                Object::Real(stamp.color.r),
                Object::Real(stamp.color.g),
                Object::Real(stamp.color.b),
            ],
        ),
        Operation::new("Td", vec![Object::Real(stamp.x), Object::Real(stamp.y)]),
        Operation::new(
            "Tj",
            vec![Object::String(embedded.encoded(), StringFormat::Hexadecimal)],
        ),
        Operation::new("ET", vec![]),
        Operation::new("Q", vec![]),
    ])?;

    let save_state_id = document.add_object(Stream::new(Dictionary::new(), save_state));
    let stamp_id = document.add_object(Stream::new(Dictionary::new(), stamp_ops));

    let mut contents = Vec::with_capacity(existing_contents.len() + 2);
    contents.push(Object::Reference(save_state_id));
    contents.extend(existing_contents);
    contents.push(Object::Reference(stamp_id));

    let page = document
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| StampError::Write(format!("Last page is not a dictionary: {}", e)))?;
    page.set("Resources", Object::Dictionary(resources));
    page.set("Contents", Object::Array(contents));

    let mut output = Vec::new();
    document
        .save_to(&mut output)
        .map_err(|e| StampError::Write(e.to_string()))?;
    Ok(output)
}

/// Resolve the page's resources, walking up the page tree for inherited ones.
fn inherited_resources(document: &Document, page_id: ObjectId) -> Result<Dictionary, StampError> {
    let mut node_id = page_id;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let node = document
            .get_dictionary(node_id)
            .map_err(|e| StampError::DocumentLoad(format!("Broken page tree: {}", e)))?;

        match node.get(b"Resources") {
            Ok(Object::Dictionary(dict)) => return Ok(dict.clone()),
            Ok(Object::Reference(id)) => {
                return Ok(document
                    .get_dictionary(*id)
                    .map(Dictionary::clone)
                    .unwrap_or_default());
            }
            _ => {}
        }

        match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => node_id = parent,
            Err(_) => break,
        }
    }
    Ok(Dictionary::new())
}

/// Existing content streams of a page as a flat list of references.
fn page_contents(document: &Document, page_id: ObjectId) -> Result<Vec<Object>, StampError> {
    let page = document
        .get_dictionary(page_id)
        .map_err(|e| StampError::DocumentLoad(format!("Broken page tree: {}", e)))?;

    let contents = match page.get(b"Contents") {
        Ok(Object::Reference(id)) => match document.get_object(*id) {
            Ok(Object::Array(items)) => items.clone(),
            _ => vec![Object::Reference(*id)],
        },
        Ok(Object::Array(items)) => items.clone(),
        _ => Vec::new(),
    };
    Ok(contents)
}

fn fresh_resource_name(fonts: &Dictionary) -> String {
    (1..)
        .map(|n| format!("{}{}", FONT_RESOURCE_PREFIX, n))
        .find(|name| !fonts.has(name.as_bytes()))
        .unwrap_or_else(|| FONT_RESOURCE_PREFIX.to_string())
}

fn encode_operations(operations: Vec<Operation>) -> Result<Vec<u8>, StampError> {
    Content { operations }
        .encode()
        .map_err(|e| StampError::Write(format!("Failed to encode content stream: {}", e)))
}
