//! Signature font loading and embedding.
//!
//! The font is embedded whole (no subsetting) as a composite Type0 font with `Identity-H`
//! encoding, so content strings are raw 2-byte glyph ids. A `ToUnicode` CMap maps those ids
//! back to text for extraction and search.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use ttf_parser::{name_id, Face, GlyphId};

use crate::traits::StampError;

const FALLBACK_FONT_NAME: &str = "DocsignSignature";
const BFCHAR_CHUNK: usize = 100;

/// Raw TrueType bytes, validated on load and parsed again for each embed.
#[derive(Clone)]
pub struct SignatureFont {
    data: Vec<u8>,
}

/// Text run converted to glyph ids of an embedded font.
#[derive(Debug, Clone)]
pub struct EmbeddedText {
    /// Type0 font object to reference from the page resources.
    pub font_id: ObjectId,
    /// Glyph ids in logical order, one per input character.
    pub glyphs: Vec<u16>,
    /// Characters the font has no glyph for (drawn as `.notdef`).
    pub missing: Vec<char>,
}

impl EmbeddedText {
    /// Big-endian glyph id bytes for a `Tj` operand.
    pub fn encoded(&self) -> Vec<u8> {
        self.glyphs.iter().flat_map(|gid| gid.to_be_bytes()).collect()
    }
}

impl SignatureFont {
    /// Read and validate a TrueType font file.
    pub fn load(path: &Path) -> Result<Self, StampError> {
        let data = std::fs::read(path).map_err(|e| {
            StampError::FontUnavailable(format!("{}: {}", path.display(), e))
        })?;

        Face::parse(&data, 0).map_err(|e| {
            StampError::FontUnavailable(format!("{}: {}", path.display(), e))
        })?;

        Ok(Self { data })
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, StampError> {
        Face::parse(&data, 0).map_err(|e| StampError::FontUnavailable(e.to_string()))?;
        Ok(Self { data })
    }

    fn face(&self) -> Result<Face<'_>, StampError> {
        Face::parse(&self.data, 0).map_err(|e| StampError::FontUnavailable(e.to_string()))
    }

    /// Add the font objects to `doc` and map `text` to its glyphs.
    pub fn embed(&self, doc: &mut Document, text: &str) -> Result<EmbeddedText, StampError> {
        let face = self.face()?;
        let scale = 1000.0 / f32::from(face.units_per_em());
        let to_pdf_units = |v: i16| (f32::from(v) * scale).round() as i64;

        let mut glyphs = Vec::with_capacity(text.chars().count());
        let mut missing = Vec::new();
        let mut widths: BTreeMap<u16, i64> = BTreeMap::new();
        let mut unicode: BTreeMap<u16, char> = BTreeMap::new();

        for ch in text.chars() {
            let gid = match face.glyph_index(ch) {
                Some(GlyphId(gid)) => {
                    unicode.entry(gid).or_insert(ch);
                    gid
                }
                None => {
                    missing.push(ch);
                    0
                }
            };
            glyphs.push(gid);
            widths.entry(gid).or_insert_with(|| {
                let advance = face.glyph_hor_advance(GlyphId(gid)).unwrap_or(0);
                (f32::from(advance) * scale).round() as i64
            });
        }

        let base_font = postscript_name(&face);

        let font_file_id = doc.add_object(font_file_stream(&self.data)?);

        let bbox = face.global_bounding_box();
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(base_font.clone().into_bytes()),
            "Flags" => 32,
            "FontBBox" => vec![
                to_pdf_units(bbox.x_min).into(),
                to_pdf_units(bbox.y_min).into(),
                to_pdf_units(bbox.x_max).into(),
                to_pdf_units(bbox.y_max).into(),
            ],
            "ItalicAngle" => 0,
            "Ascent" => to_pdf_units(face.ascender()),
            "Descent" => to_pdf_units(face.descender()),
            "CapHeight" => to_pdf_units(face.capital_height().unwrap_or(face.ascender())),
            "StemV" => 80,
            "FontFile2" => font_file_id,
        });

        let mut w_array = Vec::with_capacity(widths.len() * 2);
        for (gid, width) in &widths {
            w_array.push(Object::Integer(i64::from(*gid)));
            w_array.push(Object::Array(vec![Object::Integer(*width)]));
        }

        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => Object::Name(base_font.clone().into_bytes()),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor_id,
            "CIDToGIDMap" => "Identity",
            "DW" => 1000,
            "W" => w_array,
        });

        let to_unicode_id = doc.add_object(to_unicode_cmap(&unicode));

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(base_font.into_bytes()),
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(cid_font_id)],
            "ToUnicode" => to_unicode_id,
        });

        Ok(EmbeddedText {
            font_id,
            glyphs,
            missing,
        })
    }
}

fn postscript_name(face: &Face<'_>) -> String {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == name_id::POST_SCRIPT_NAME)
        .find_map(|name| name.to_string())
        .map(|name| {
            name.chars()
                .filter(|c| c.is_ascii_graphic() && !"[](){}<>/%#".contains(*c))
                .collect::<String>()
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FONT_NAME.to_string())
}

fn font_file_stream(data: &[u8]) -> Result<Stream, StampError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| StampError::Write(format!("Failed to compress font: {}", e)))?;
    let compressed = encoder
        .finish()
        .map_err(|e| StampError::Write(format!("Failed to compress font: {}", e)))?;

    let dict = dictionary! {
        "Length1" => data.len() as i64,
        "Filter" => "FlateDecode",
    };
    Ok(Stream::new(dict, compressed).with_compression(false))
}

fn to_unicode_cmap(unicode: &BTreeMap<u16, char>) -> Stream {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(&u16, &char)> = unicode.iter().collect();
    for chunk in entries.chunks(BFCHAR_CHUNK) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, ch) in chunk {
            let mut units = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{:04X}", unit))
                .collect();
            cmap.push_str(&format!("<{:04X}> <{}>\n", gid, hex));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );

    Stream::new(lopdf::Dictionary::new(), cmap.into_bytes())
}
