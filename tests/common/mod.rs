//! Shared fixtures: small PDFs built with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One text line of a fixture page.
#[derive(Debug, Clone, Copy)]
pub struct TextLine {
    pub text: &'static str,
    pub size: f32,
    pub bold: bool,
}

pub fn heading(text: &'static str, size: f32) -> TextLine {
    TextLine {
        text,
        size,
        bold: true,
    }
}

pub fn body(text: &'static str) -> TextLine {
    TextLine {
        text,
        size: 11.0,
        bold: false,
    }
}

/// Build a PDF with one page per entry, lines laid out top to bottom.
pub fn build_pdf(pages: &[Vec<TextLine>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        let mut y = 760.0;
        for line in lines {
            let font = if line.bold { "F2" } else { "F1" };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font.as_bytes().to_vec()), Object::Real(line.size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(72), Object::Real(y)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(line.text)]));
            operations.push(Operation::new("ET", vec![]));
            y -= 30.0;
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("save pdf");
    buffer
}

/// A two-page report with a title, two sections and a subsection.
pub fn report_pdf() -> Vec<u8> {
    build_pdf(&[
        vec![
            heading("Quarterly Review", 24.0),
            body("This document summarizes the quarter."),
            heading("Revenue", 16.0),
            body("Revenue grew in every region."),
            heading("Regional Detail", 13.0),
            body("The north region led overall growth."),
        ],
        vec![
            heading("Outlook", 16.0),
            body("We expect continued growth next year."),
            body("Hiring will resume in the spring."),
        ],
    ])
}

/// A page of body text with no typographic hierarchy.
pub fn plain_pdf() -> Vec<u8> {
    build_pdf(&[vec![
        body("Meeting notes from the weekly sync."),
        body("Everyone reviewed the open tickets."),
        body("The next sync is scheduled for Monday."),
    ]])
}
