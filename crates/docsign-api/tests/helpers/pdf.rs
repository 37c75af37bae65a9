//! Reading stamped text back out of a signed PDF.

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use std::collections::HashMap;

/// What a signed page draws in its final content stream.
#[derive(Debug)]
pub struct StampedText {
    pub text: String,
    pub position: (f32, f32),
    pub size: f32,
}

pub fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("signed output is a valid PDF")
}

/// Page ids in document order.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

fn content_refs(doc: &Document, page_id: ObjectId) -> Vec<ObjectId> {
    let page = doc.get_dictionary(page_id).unwrap();
    match page.get(b"Contents").unwrap() {
        Object::Reference(id) => vec![*id],
        Object::Array(items) => items.iter().map(|o| o.as_reference().unwrap()).collect(),
        other => panic!("unexpected Contents: {:?}", other),
    }
}

fn stream_bytes(doc: &Document, id: ObjectId) -> Vec<u8> {
    let stream = doc.get_object(id).unwrap().as_stream().unwrap();
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Text shown by every `Tj` on the page, decoded as raw bytes (fixture pages use Helvetica).
pub fn plain_text(doc: &Document, page_id: ObjectId) -> Vec<String> {
    content_refs(doc, page_id)
        .into_iter()
        .flat_map(|id| Content::decode(&stream_bytes(doc, id)).unwrap().operations)
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| {
            op.operands[0]
                .as_str()
                .ok()
                .map(|s| String::from_utf8_lossy(s).into_owned())
        })
        .collect()
}

/// Number of `Tj` operators across the page's content streams.
pub fn text_operator_count(doc: &Document, page_id: ObjectId) -> usize {
    content_refs(doc, page_id)
        .into_iter()
        .flat_map(|id| Content::decode(&stream_bytes(doc, id)).unwrap().operations)
        .filter(|op| op.operator == "Tj")
        .count()
}

/// Decode the text drawn by the page's last content stream through its font's ToUnicode map.
pub fn stamped_text(doc: &Document, page_id: ObjectId) -> Option<StampedText> {
    let last = *content_refs(doc, page_id).last()?;
    let operations = Content::decode(&stream_bytes(doc, last)).ok()?.operations;

    let tf = operations.iter().find(|op| op.operator == "Tf")?;
    let font_name = tf.operands[0].as_name().ok()?.to_vec();
    let size = tf.operands[1].as_float().ok()?;
    let td = operations.iter().find(|op| op.operator == "Td")?;
    let position = (td.operands[0].as_float().ok()?, td.operands[1].as_float().ok()?);
    let glyphs = operations
        .iter()
        .find(|op| op.operator == "Tj")?
        .operands[0]
        .as_str()
        .ok()?
        .to_vec();

    let page = doc.get_dictionary(page_id).ok()?;
    let resources = page.get(b"Resources").ok()?.as_dict().ok()?;
    let fonts = resources.get(b"Font").ok()?.as_dict().ok()?;
    let font = doc
        .get_dictionary(fonts.get(&font_name).ok()?.as_reference().ok()?)
        .ok()?;
    let cmap_id = font.get(b"ToUnicode").ok()?.as_reference().ok()?;
    let cmap = String::from_utf8(stream_bytes(doc, cmap_id)).ok()?;

    let mut map = HashMap::new();
    for line in cmap.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() == 2 && parts[0].starts_with('<') && parts[1].starts_with('<') {
            let gid = u16::from_str_radix(parts[0].trim_matches(['<', '>']), 16).ok()?;
            let unit = u16::from_str_radix(parts[1].trim_matches(['<', '>']), 16).ok()?;
            map.insert(gid, char::from_u32(u32::from(unit))?);
        }
    }

    let text = glyphs
        .chunks(2)
        .map(|pair| map.get(&u16::from_be_bytes([pair[0], pair[1]])).copied())
        .collect::<Option<String>>()?;

    Some(StampedText {
        text,
        position,
        size,
    })
}
