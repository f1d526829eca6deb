use pdf_labels::encode::bands::BandRequirement;
use pdf_labels::layout::{HorizontalAlign, VerticalAlign};
use pdf_labels::*;

fn main() {
    // RUST_LOG=pdf_labels=debug shows every size the layout tries
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // load a font to embed and use; the first font added is the default for every label
    let dejavu = include_bytes!("../assets/DejaVuSans.ttf");
    let dejavu = Font::load(dejavu.to_vec()).expect("can load font");

    let mut doc = Document::default();
    doc.add_font(dejavu);

    // a US Letter sheet of 1in x 2.5in drawer labels, three across
    let mut page = Page::new(sizes::LETTER.0, sizes::LETTER.1);
    let regions = page.label_grid(3, 10, In(0.5).into(), Pt(4.0));

    let values = [10.0, 47.0, 100.0, 470.0, 1_000.0, 4_700.0, 10_200.0, 47_500.0, 100_000.0, 1_000_000.0];

    // each row: the value in words, its colour bands, and its EIA-96 code
    let mut elements: Vec<Box<dyn Element>> = Vec::new();
    for &value in values.iter() {
        let resistor = Resistor::new(value);
        elements.push(Box::new(
            TextElement::new(format!("{value}{} 1% 0.25W metal film", Resistor::UNIT))
                .with_alignment(HorizontalAlign::Left, VerticalAlign::Center),
        ));
        elements.push(Box::new(
            ResistorElement::new(value)
                .with_tolerance(BandRequirement::Exactly(1.0))
                .with_unrepresentable(UnrepresentableBehavior::DrawX),
        ));
        elements.push(Box::new(resistor.marking_label(MarkingScheme::Eia96)));
    }

    let placements: Vec<(Rect, &dyn Element)> = regions
        .iter()
        .copied()
        .zip(elements.iter().map(|element| &**element))
        .collect();
    let report = page.render_elements(&doc.fonts, &placements);
    for (index, error) in report.failures.iter() {
        eprintln!("label {index} was left blank: {error}");
    }

    // a cut line under every label
    for region in regions {
        page.add_line((region.x1, region.y1), (region.x2, region.y1), colours::OUTLINE, Pt(0.25));
    }

    doc.add_page(page);

    let mut out = std::fs::File::create("resistor-sheet.pdf").expect("can create output file");
    doc.write(&mut out).expect("can write document");
}
