//! Résumé layout: one free function that draws a `Profile` onto any `DocumentWriter`.

use crate::layout::FontStyle;
use crate::models::profile::Profile;
use crate::render::writer::{Align, DocumentWriter, HeaderLine, Rgb, RunningHeader};

const TEXT_COLOR: Rgb = Rgb(33, 37, 41);
const SECTION_FILL: Rgb = Rgb(245, 245, 245);

const NAME_SIZE_PT: f32 = 18.0;
const CONTACT_SIZE_PT: f32 = 9.0;
const SECTION_TITLE_SIZE_PT: f32 = 11.0;
const BODY_SIZE_PT: f32 = 10.0;

const SECTION_BAR_HEIGHT: f32 = 8.0;
const BODY_LINE_HEIGHT: f32 = 6.0;

pub const BULLET_PREFIX: &str = "- ";

enum SectionBody<'a> {
    Paragraph(String),
    Bullets(&'a [String]),
}

/// Body sections in their fixed order.
fn body_sections(profile: &Profile) -> [(&'static str, SectionBody<'_>); 4] {
    [
        (
            "PROFESSIONAL SUMMARY",
            SectionBody::Paragraph(profile.summary.clone()),
        ),
        (
            "TECHNICAL EXPERTISE",
            SectionBody::Paragraph(profile.skills.join(", ")),
        ),
        ("EXPERIENCE", SectionBody::Bullets(&profile.experience)),
        ("EDUCATION", SectionBody::Bullets(&profile.education)),
    ]
}

/// Running header: upper-cased name over a centered "email | phone" line.
pub fn profile_header(profile: &Profile) -> RunningHeader {
    RunningHeader {
        lines: vec![
            HeaderLine {
                text: profile.name.to_uppercase(),
                style: FontStyle::Bold,
                size_pt: NAME_SIZE_PT,
                line_height: 10.0,
            },
            HeaderLine {
                text: format!("{} | {}", profile.email, profile.phone),
                style: FontStyle::Regular,
                size_pt: CONTACT_SIZE_PT,
                line_height: 5.0,
            },
        ],
        gap_after: 5.0,
    }
}

/// Draws the full résumé. The writer's geometry fixes margins before anything is laid out.
pub fn render_profile<W: DocumentWriter + ?Sized>(writer: &mut W, profile: &Profile) {
    writer.set_text_color(TEXT_COLOR);
    writer.set_running_header(profile_header(profile));
    writer.add_page();

    let width = writer.geometry().printable_width();

    for (title, body) in body_sections(profile) {
        writer.set_font(FontStyle::Bold, SECTION_TITLE_SIZE_PT);
        writer.set_fill_color(SECTION_FILL);
        writer.cell(width, SECTION_BAR_HEIGHT, &format!("  {title}"), Align::Left, true);
        writer.ln(2.0);

        writer.set_font(FontStyle::Regular, BODY_SIZE_PT);
        match body {
            SectionBody::Paragraph(text) => {
                writer.multi_cell(width, BODY_LINE_HEIGHT, &text, Align::Left);
            }
            SectionBody::Bullets(items) => {
                for item in items {
                    writer.multi_cell(
                        width,
                        BODY_LINE_HEIGHT,
                        &format!("{BULLET_PREFIX}{item}"),
                        Align::Left,
                    );
                    writer.ln(1.0);
                }
            }
        }
        writer.ln(4.0);
    }
}
