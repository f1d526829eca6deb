use crate::canvas::Canvas;
use crate::colour::{colours, Colour};
use crate::element::{Element, RenderReport};
use crate::error::LabelError;
use crate::font::{Font, FontBook};
use crate::log::debug;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use id_arena::Id;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Str};

/// Common page sizes as (width, height) in points, portrait
pub mod sizes {
    use crate::units::Pt;

    pub const LETTER: (Pt, Pt) = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
    pub const A4: (Pt, Pt) = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Baseline start, in page coordinates
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Rect {
        rect: Rect,
        colour: Colour,
    },
    Line {
        from: (Pt, Pt),
        to: (Pt, Pt),
        colour: Colour,
        width: Pt,
    },
}

#[derive(Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(width: Pt, height: Pt) -> Page {
        Page {
            media_box: Rect::from_origin_size(Pt(0.0), Pt(0.0), width, height),
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_rect(&mut self, rect: Rect, colour: Colour) {
        self.contents.push(PageContents::Rect { rect, colour });
    }

    pub fn add_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), colour: Colour, width: Pt) {
        self.contents.push(PageContents::Line {
            from,
            to,
            colour,
            width,
        });
    }

    /// Split the page inside `margin` into a grid of equally sized label
    /// regions separated by `gap`, listed row by row from the top left
    pub fn label_grid(&self, columns: usize, rows: usize, margin: Pt, gap: Pt) -> Vec<Rect> {
        if columns == 0 || rows == 0 {
            return Vec::new();
        }
        let width = (self.width() - margin * 2.0 - gap * (columns - 1) as f32) / columns as f32;
        let height = (self.height() - margin * 2.0 - gap * (rows - 1) as f32) / rows as f32;

        let mut regions = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            let y = self.height() - margin - height - (height + gap) * row as f32;
            for column in 0..columns {
                let x = margin + (width + gap) * column as f32;
                regions.push(Rect::from_origin_size(x, y, width, height));
            }
        }
        regions
    }

    /// A canvas drawing into `region` of this page, starting in the first font of `fonts`
    pub fn canvas<'p>(&'p mut self, fonts: &'p FontBook, region: Rect) -> Result<PageCanvas<'p>, LabelError> {
        let (name, id) = fonts.default_font().ok_or(LabelError::NoFonts)?;
        let style = PageStyle {
            font_name: name.to_string(),
            font: id,
            size: Pt(12.0),
            fill: colours::BLACK,
            stroke: colours::BLACK,
            line_width: Pt(1.0),
        };
        Ok(PageCanvas {
            page: self,
            fonts,
            region,
            style,
            stack: Vec::new(),
        })
    }

    /// Render each element into its region of the page. Elements that fail
    /// are recorded in the report and don't stop the rest.
    pub fn render_elements(&mut self, fonts: &FontBook, placements: &[(Rect, &dyn Element)]) -> RenderReport {
        let mut report = RenderReport::default();
        for (index, (region, element)) in placements.iter().enumerate() {
            let result = self
                .canvas(fonts, *region)
                .and_then(|mut canvas| element.render(&mut canvas));
            report.record(index, result);
        }
        report
    }

    fn set_fill(content: &mut Content, colour: Colour) {
        match colour {
            Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
            Colour::Grey { g } => content.set_fill_gray(g),
        };
    }

    fn set_stroke(content: &mut Content, colour: Colour) {
        match colour {
            Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => content.set_stroke_cmyk(c, m, y, k),
            Colour::Grey { g } => content.set_stroke_gray(g),
        };
    }

    fn render(&self, fonts: &FontBook) -> Vec<u8> {
        let mut content = Content::new();

        for page_content in self.contents.iter() {
            content.save_state();
            match page_content {
                PageContents::Text(span) => {
                    let Some(font) = fonts.get(span.font.id) else {
                        debug!(text = span.text.as_str(), "skipping span with an unknown font");
                        content.restore_state();
                        continue;
                    };
                    Self::set_fill(&mut content, span.colour);
                    let encoded = font.encode(&span.text);
                    content
                        .begin_text()
                        .set_font(
                            Name(format!("F{}", span.font.id.index()).as_bytes()),
                            span.font.size.0,
                        )
                        .next_line(span.coords.0 .0, span.coords.1 .0)
                        .show(Str(&encoded))
                        .end_text();
                }
                PageContents::Rect { rect, colour } => {
                    Self::set_fill(&mut content, *colour);
                    content
                        .rect(rect.x1.0, rect.y1.0, rect.width().0, rect.height().0)
                        .fill_nonzero();
                }
                PageContents::Line {
                    from,
                    to,
                    colour,
                    width,
                } => {
                    Self::set_stroke(&mut content, *colour);
                    content
                        .set_line_width(width.0)
                        .move_to(from.0 .0, from.1 .0)
                        .line_to(to.0 .0, to.1 .0)
                        .stroke();
                }
            }
            content.restore_state();
        }

        content.finish()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, page_index: usize, fonts: &FontBook, writer: &mut Pdf) -> Result<(), LabelError> {
        let page_tree_id = refs.get(RefType::PageTree).ok_or(LabelError::MissingReference("page tree"))?;
        let id = refs.get(RefType::Page(page_index)).ok_or(LabelError::MissingReference("page"))?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(page_tree_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            let font_ref = refs
                .get(RefType::Font(font_id.index()))
                .ok_or(LabelError::MissingReference("font"))?;
            resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = self.render(fonts);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(content_id, &compressed);
        stream.filter(Filter::FlateDecode);
        stream.finish();
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct PageStyle {
    font_name: String,
    font: Id<Font>,
    size: Pt,
    fill: Colour,
    stroke: Colour,
    line_width: Pt,
}

/// A [Canvas] over a region of a [Page]. Coordinates are relative to the
/// bottom-left corner of the region; text is measured with the real glyph
/// advances of the document fonts.
pub struct PageCanvas<'p> {
    page: &'p mut Page,
    fonts: &'p FontBook,
    region: Rect,
    style: PageStyle,
    stack: Vec<PageStyle>,
}

impl PageCanvas<'_> {
    fn to_page(&self, (x, y): (Pt, Pt)) -> (Pt, Pt) {
        (self.region.x1 + x, self.region.y1 + y)
    }
}

impl Canvas for PageCanvas<'_> {
    fn width(&self) -> Pt {
        self.region.width()
    }

    fn height(&self) -> Pt {
        self.region.height()
    }

    fn font_name(&self) -> &str {
        &self.style.font_name
    }

    fn fill_colour(&self) -> Colour {
        self.style.fill
    }

    fn measure_width(&self, text: &str, font_name: &str, size: Pt) -> Pt {
        self.fonts
            .id(font_name)
            .or_else(|| self.fonts.default_font().map(|(_, id)| id))
            .and_then(|id| self.fonts.get(id))
            .map(|font| font.width_of_text(text, size))
            .unwrap_or_default()
    }

    fn set_font(&mut self, name: &str) -> Result<(), LabelError> {
        let id = self
            .fonts
            .id(name)
            .ok_or_else(|| LabelError::UnknownFont(name.to_string()))?;
        self.style.font = id;
        self.style.font_name = name.to_string();
        Ok(())
    }

    fn set_font_size(&mut self, size: Pt) {
        self.style.size = size;
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.style.fill = colour;
    }

    fn set_stroke_colour(&mut self, colour: Colour) {
        self.style.stroke = colour;
    }

    fn set_line_width(&mut self, width: Pt) {
        self.style.line_width = width;
    }

    fn draw_string(&mut self, x: Pt, y: Pt, text: &str) {
        let coords = self.to_page((x, y));
        self.page.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id: self.style.font,
                size: self.style.size,
            },
            colour: self.style.fill,
            coords,
        });
    }

    fn fill_rect(&mut self, rect: Rect) {
        let rect = rect.translate(self.region.x1, self.region.y1);
        self.page.add_rect(rect, self.style.fill);
    }

    fn stroke_line(&mut self, from: (Pt, Pt), to: (Pt, Pt)) {
        let (from, to) = (self.to_page(from), self.to_page(to));
        self.page.add_line(from, to, self.style.stroke, self.style.line_width);
    }

    fn save_style_state(&mut self) {
        self.stack.push(self.style.clone());
    }

    fn restore_style_state(&mut self) {
        if let Some(style) = self.stack.pop() {
            self.style = style;
        }
    }
}
