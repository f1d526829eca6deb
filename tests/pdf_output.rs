use pdf_labels::*;

fn dejavu() -> Font {
    Font::load(include_bytes!("../assets/DejaVuSans.ttf").to_vec()).expect("font parses")
}

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn spans(page: &Page) -> Vec<&SpanLayout> {
    page.contents
        .iter()
        .filter_map(|content| match content {
            PageContents::Text(span) => Some(span),
            _ => None,
        })
        .collect()
}

#[test]
fn labels_render_with_an_embedded_font() {
    init_logging();
    let mut document = Document::default();
    let (font_id, font_name) = document.add_font(dejavu());
    assert_eq!(font_name, "DejaVu Sans");
    assert_eq!(document.fonts.len(), 1);

    // three 1in x 2in labels side by side
    let mut page = Page::new(Pt(216.0), Pt(144.0));
    let regions = page.label_grid(3, 1, Pt(0.0), Pt(0.0));
    assert_eq!(regions[1], Rect::from_origin_size(Pt(72.0), Pt(0.0), Pt(72.0), Pt(144.0)));

    let resistor = Resistor::new(10_200.0);
    let code = resistor.marking_label(MarkingScheme::Eia96);
    let bands = ResistorElement::new(10_200.0);
    let value = TextElement::new(format!("10.2k{} 1%", Resistor::UNIT));
    let placements: [(Rect, &dyn Element); 3] =
        [(regions[0], &code), (regions[1], &bands), (regions[2], &value)];

    let report = page.render_elements(&document.fonts, &placements);
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.rendered, 3);

    let spans = spans(&page);
    let font = document.fonts.get(font_id).expect("font registered");

    // "02C" is 4036/2048 em wide: 36pt is the largest whole size inside 72pt
    let code_span = spans.iter().find(|span| span.text == "02C").expect("code drawn");
    assert_eq!(code_span.font, SpanFont { id: font_id, size: Pt(36.0) });
    assert!(font.width_of_text("02C", Pt(37.0)) > Pt(72.0));
    // centred: (72 - 70.9453125) / 2, and (144 - 36) / 2 + 36 * 0.25
    assert_eq!(code_span.coords, (Pt(0.52734375), Pt(63.0)));
    assert!(font.descent(code_span.font.size) < Pt(0.0));
    assert!(code_span.coords.1 + font.descent(code_span.font.size) >= Pt(0.0));

    for span in spans.iter().filter(|span| span.text != "02C") {
        let right = span.coords.0 + font.width_of_text(&span.text, span.font.size);
        assert!(span.coords.0 >= Pt(144.0), "{span:?}");
        assert!(right <= Pt(216.0) + Pt(1e-3), "{span:?}");
        assert!(span.coords.1 >= Pt(0.0), "{span:?}");
    }

    let band_rects: Vec<Rect> = page
        .contents
        .iter()
        .filter_map(|content| match content {
            PageContents::Rect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect();
    assert!(!band_rects.is_empty());
    assert!(band_rects.iter().all(|r| r.x1 >= Pt(72.0) && r.x2 <= Pt(144.0)));

    document.add_page(page);
    let mut bytes = Vec::new();
    document.write(&mut bytes).expect("document writes");

    assert!(bytes.starts_with(b"%PDF-"));
    let keys: [&[u8]; 4] = [b"/FontFile2", b"/ToUnicode", b"/Identity-H", b"/F0"];
    for key in keys {
        assert!(bytes.windows(key.len()).any(|w| w == key), "{}", String::from_utf8_lossy(key));
    }
}

#[test]
fn unknown_fonts_fail_only_their_own_label() {
    init_logging();
    let mut document = Document::default();
    document.add_font(dejavu());
    let mut page = Page::new(Pt(144.0), Pt(72.0));
    let regions = page.label_grid(2, 1, Pt(0.0), Pt(0.0));

    let good = TextElement::new("470");
    let bad = TextElement::new("470").with_font("Fira Mono");
    let placements: [(Rect, &dyn Element); 2] = [(regions[0], &bad), (regions[1], &good)];

    let report = page.render_elements(&document.fonts, &placements);
    assert_eq!(report.rendered, 1);
    assert!(matches!(&report.failures[..], [(0, LabelError::UnknownFont(name))] if name == "Fira Mono"));
    assert_eq!(spans(&page).len(), 1);
    assert!(spans(&page)[0].coords.0 >= Pt(72.0));
}
