use crate::{
    error::LabelError,
    refs::{ObjectReferences, RefType},
    units::Pt,
};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// A parsed TrueType or OpenType font. Fonts are embedded in their entirety in
/// the generated PDF.
pub struct Font {
    pub face: OwnedFace,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font").field("name", &self.name()).finish()
    }
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, LabelError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn name_entry(&self, name_id: u16) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Distance from the baseline to the top of the font at `size`
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    /// Distance from the baseline to the bottom of the font at `size`; usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.face.as_face_ref().glyph_index('\u{FFFD}').map(|i| i.0)
    }

    /// The glyph drawn for `ch`: its own, the replacement character, `?`, or
    /// `.notdef` as a last resort
    fn glyph_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Advance width of `text` at `size`. Newlines are ignored, characters the
    /// font doesn't have are measured as their fallback glyph.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let face = self.face.as_face_ref();
        let units: u32 = text
            .chars()
            .filter(|&ch| ch != '\n' && ch != '\r')
            .map(|ch| {
                face.glyph_hor_advance(GlyphId(self.glyph_or_fallback(ch)))
                    .unwrap_or_default() as u32
            })
            .sum();
        self.scaling(size) * units as f32
    }

    /// Encode `text` as big-endian glyph ids, as expected by an Identity-H font
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .flat_map(|ch| self.glyph_or_fallback(ch).to_be_bytes())
            .collect()
    }

    fn glyph_ids(&self) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();
        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0) {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    /// Advances of every glyph in the font, in glyph order, in 1/1000 em
    fn advances(&self) -> Vec<f32> {
        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;
        (0..face.number_of_glyphs())
            .map(|gid| face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling)
            .collect()
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));
        let advances = self.advances();

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);
        cid_font.default_width(advances.first().copied().unwrap_or(1000.0));
        cid_font.widths().consecutive(0, advances);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        cid_font.finish();

        id
    }

    fn write_font_data(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));
        let data = self.face.as_slice();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            data,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );

        let mut stream = writer.stream(id, &compressed);
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), data.len() as i32);
        stream.finish();

        id
    }

    fn write_descriptor(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);

        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let advances = self.advances();
        let max_width = advances.iter().copied().fold(0.0, f32::max);
        let avg_width = if advances.is_empty() {
            0.0
        } else {
            advances.iter().sum::<f32>() / advances.len() as f32
        };
        let bbox = face.global_bounding_box();

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(0.0);
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height().map(|h| h as f32 * scaling).unwrap_or(1000.0);
        descriptor.cap_height(cap_height);
        descriptor.x_height(face.x_height().map(|h| h as f32 * scaling).unwrap_or(cap_height));
        // not recorded in TrueType fonts; a typical regular weight stem
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width);
        descriptor.max_width(max_width);
        descriptor.missing_width(max_width);
        descriptor.font_file2(font_data_stream_id);
        descriptor.finish();

        id
    }

    fn to_unicode_cmap(&self) -> String {
        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mut ids: Vec<(u16, char)> = self.glyph_ids().into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);

        // bfchar blocks hold at most 100 entries
        for block in ids.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(id, ch) in block {
                let mut units = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{id:04x}> <{hex}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");
        map
    }

    fn write_to_unicode(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            self.to_unicode_cmap().as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.finish();
        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
        font.finish();
    }
}

/// The fonts of a document, looked up by name.
///
/// Fonts are registered under their full name, or `F<n>` when the face has
/// none. The first font added is the default a canvas starts with.
#[derive(Debug, Default)]
pub struct FontBook {
    fonts: Arena<Font>,
    by_name: HashMap<String, Id<Font>>,
    order: Vec<(String, Id<Font>)>,
}

impl FontBook {
    /// Register a font, returning its id and the name it can be selected by
    pub fn add(&mut self, font: Font) -> (Id<Font>, String) {
        let name = font
            .name()
            .filter(|name| !self.by_name.contains_key(name))
            .unwrap_or_else(|| format!("F{}", self.order.len()));
        let id = self.fonts.alloc(font);
        self.by_name.insert(name.clone(), id);
        self.order.push((name.clone(), id));
        (id, name)
    }

    pub fn id(&self, name: &str) -> Option<Id<Font>> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: Id<Font>) -> Option<&Font> {
        self.fonts.get(id)
    }

    /// The name and id of the first font added
    pub fn default_font(&self) -> Option<(&str, Id<Font>)> {
        self.order.first().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id<Font>, &Font)> {
        self.fonts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dejavu() -> Font {
        Font::load(include_bytes!("../assets/DejaVuSans.ttf").to_vec()).expect("font parses")
    }

    #[test]
    fn names_and_vertical_metrics() {
        let font = dejavu();
        assert_eq!(font.name().as_deref(), Some("DejaVu Sans"));
        assert_eq!(font.family().as_deref(), Some("DejaVu Sans"));
        // 2048 units per em, so a 2048pt size reads font units directly
        assert_eq!(font.ascent(Pt(2048.0)), Pt(1901.0));
        assert_eq!(font.descent(Pt(2048.0)), Pt(-483.0));
    }

    #[test]
    fn measures_glyph_advances() {
        let font = dejavu();
        assert_eq!(font.width_of_text("02C", Pt(2048.0)), Pt(4036.0));
        assert_eq!(font.width_of_text("02C", Pt(36.0)), Pt(70.9453125));
        assert_eq!(font.width_of_text("0\n2C", Pt(2048.0)), Pt(4036.0));
        assert_eq!(font.width_of_text("", Pt(12.0)), Pt(0.0));
    }

    #[test]
    fn missing_glyphs_fall_back_to_the_replacement_character() {
        let font = dejavu();
        assert_eq!(font.encode("A0"), vec![0, 36, 0, 19]);

        assert_eq!(font.glyph_id('\u{4E00}'), None);
        let replacement = font.replacement_glyph_id().expect("font has U+FFFD");
        assert_eq!(font.encode("\u{4E00}"), replacement.to_be_bytes().to_vec());
    }

    #[test]
    fn to_unicode_maps_glyphs_back_to_text() {
        let cmap = dejavu().to_unicode_cmap();
        assert!(cmap.contains("<0024> <0041>"));
        assert!(cmap.contains("<0013> <0030>"));
        assert!(cmap.trim_end().ends_with("end end"));
    }

    #[test]
    fn book_names_duplicate_faces_by_position() {
        let mut book = FontBook::default();
        assert!(book.default_font().is_none());

        let (first, name) = book.add(dejavu());
        assert_eq!(name, "DejaVu Sans");
        let (second, name) = book.add(dejavu());
        assert_eq!(name, "F1");

        assert_eq!(book.len(), 2);
        assert_eq!(book.id("DejaVu Sans"), Some(first));
        assert_eq!(book.id("F1"), Some(second));
        assert_eq!(book.default_font(), Some(("DejaVu Sans", first)));
    }
}
