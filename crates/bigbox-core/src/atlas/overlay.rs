//! Debug overlay: a border and a one-letter label on every packed face

use image::{Rgba, RgbaImage};

use super::FacePlacement;
use crate::constants::{DEBUG_BORDER_COLOR, DEBUG_LABEL_COLOR};

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

/// Draw borders and labels. Sizes scale with the smallest face dimension.
pub(super) fn draw(image: &mut RgbaImage, placements: &[FacePlacement], min_face_dim: u32) {
    let (aw, ah) = image.dimensions();
    let thickness = (min_face_dim / 32).max(1);
    let glyph_scale = (min_face_dim / 4 / GLYPH_HEIGHT).max(1);

    for placement in placements {
        let r = placement.region;
        let rect = PixelRect {
            x0: (r.u0 * aw as f32).round() as u32,
            y0: (r.v0 * ah as f32).round() as u32,
            x1: (r.u1 * aw as f32).round() as u32,
            y1: (r.v1 * ah as f32).round() as u32,
        };
        draw_border(image, &rect, thickness);
        draw_label(image, &rect, placement.face.label(), glyph_scale);
    }
}

struct PixelRect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PixelRect {
    fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

fn draw_border(image: &mut RgbaImage, rect: &PixelRect, thickness: u32) {
    let color = Rgba(DEBUG_BORDER_COLOR);
    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            let edge = x < rect.x0 + thickness
                || y < rect.y0 + thickness
                || x + thickness >= rect.x1
                || y + thickness >= rect.y1;
            if edge {
                image.put_pixel(x, y, color);
            }
        }
    }
}

fn draw_label(image: &mut RgbaImage, rect: &PixelRect, label: char, scale: u32) {
    let Some(rows) = glyph(label) else {
        return;
    };
    let color = Rgba(DEBUG_LABEL_COLOR);
    let (gw, gh) = (GLYPH_WIDTH * scale, GLYPH_HEIGHT * scale);
    let cx = (rect.x0 + rect.x1) / 2;
    let cy = (rect.y0 + rect.y1) / 2;
    let left = cx.saturating_sub(gw / 2);
    let top = cy.saturating_sub(gh / 2);

    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let x = left + col * scale + dx;
                    let y = top + row as u32 * scale + dy;
                    if rect.contains(x, y) {
                        image.put_pixel(x, y, color);
                    }
                }
            }
        }
    }
}

/// 5×7 bitmaps for the face labels, one byte per row (low 5 bits).
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        _ => return None,
    };
    Some(rows)
}
