use crate::{
    error::LabelError,
    font::{Font, FontBook},
    log::debug,
    page::Page,
    refs::{ObjectReferences, RefType},
};
use id_arena::Id;
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Debug, Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub fonts: FontBook,
    pub pages: Vec<Page>,
}

impl Document {
    /// Add a font to the document, returning its id and the name canvases
    /// select it by. The first font added is the default for every canvas.
    pub fn add_font(&mut self, font: Font) -> (Id<Font>, String) {
        self.fonts.add(font)
    }

    /// Append a page, returning its index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// A page together with the fonts, ready to be drawn on with
    /// [Page::canvas] or [Page::render_elements]
    pub fn page_mut(&mut self, index: usize) -> Option<(&mut Page, &FontBook)> {
        let Document { fonts, pages } = self;
        pages.get_mut(index).map(|page| (page, &*fonts))
    }

    /// Write the entire document to the writer. The whole document is
    /// rendered in memory first.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), LabelError> {
        let Document { fonts, pages } = self;

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (page_index, page) in pages.iter().enumerate() {
            page.write(&mut refs, page_index, &fonts, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        let bytes = writer.finish();
        debug!(pages = pages.len(), fonts = fonts.len(), bytes = bytes.len(), "wrote document");
        w.write_all(bytes.as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::rect::Rect;
    use crate::units::Pt;

    #[test]
    fn writes_a_pdf_without_fonts() {
        let mut document = Document::default();
        let mut page = Page::new(Pt(200.0), Pt(100.0));
        page.add_rect(Rect::from_origin_size(Pt(10.0), Pt(10.0), Pt(50.0), Pt(20.0)), colours::OUTLINE);
        assert_eq!(document.add_page(page), 0);
        assert_eq!(document.add_page(Page::new(Pt(200.0), Pt(100.0))), 1);

        let mut bytes = Vec::new();
        document.write(&mut bytes).expect("document writes");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.windows(6).any(|w| w == b"/Count"));
    }

    #[test]
    fn page_access_is_bounds_checked() {
        let mut document = Document::default();
        assert!(document.page_mut(0).is_none());
        document.add_page(Page::new(Pt(10.0), Pt(10.0)));
        let (page, fonts) = document.page_mut(0).expect("page exists");
        assert!(fonts.is_empty());
        assert_eq!(page.width(), Pt(10.0));
    }
}
