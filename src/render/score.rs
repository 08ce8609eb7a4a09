//! Score glyph layout
//!
//! Large digits are centred at the top of the screen during play, with each
//! glyph advanced by its own visible width. Small digits are right-aligned on
//! the score board and kerned tighter around the narrow "1".

use crate::sim::{Rect, Sprite, Viewport};

/// Transparent padding on the right of each large digit, in authored pixels
const LARGE_DIGIT_PADDING: [f32; 10] = [6.0, 5.0, 5.0, 4.0, 5.0, 5.0, 4.0, 4.0, 5.0, 5.0];

/// Top of the large score as a fraction of the viewport height
const LARGE_SCORE_TOP: f32 = 0.115;

/// Horizontal offset of the rightmost small digit
const SMALL_SCORE_RIGHT_X: f32 = -0.292;
const SMALL_DIGIT_STEP: f32 = 0.058;

fn digits(value: u32) -> Vec<u8> {
    value
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect()
}

/// Rectangles for the in-play score
pub fn large_score(value: u32, viewport: &Viewport) -> Vec<(Sprite, Rect)> {
    let digits = digits(value);
    let scale = viewport.scale();
    let advances: Vec<f32> = digits
        .iter()
        .map(|&d| {
            let rect = viewport.locate(Sprite::LargeDigit(d), 0.0, 0.0);
            rect.width - LARGE_DIGIT_PADDING[usize::from(d)] * scale
        })
        .collect();

    let total: f32 = advances.iter().sum();
    let mut x = (viewport.width - total) / 2.0;
    let y = viewport.height * LARGE_SCORE_TOP;

    digits
        .iter()
        .zip(&advances)
        .map(|(&d, advance)| {
            let sprite = Sprite::LargeDigit(d);
            let size = viewport.locate(sprite, 0.0, 0.0);
            let rect = Rect::new(x, y, size.width, size.height);
            x += advance;
            (sprite, rect)
        })
        .collect()
}

/// Rectangles for a score-board number, laid out right to left
pub fn small_score(value: u32, offset_y: f32, viewport: &Viewport) -> Vec<(Sprite, Rect)> {
    let mut reversed = digits(value);
    reversed.reverse();

    let mut offset_x = SMALL_SCORE_RIGHT_X;
    let mut placed = Vec::with_capacity(reversed.len());
    for (index, &d) in reversed.iter().enumerate() {
        if d == 1 {
            offset_x -= if index == 0 { 0.006 } else { 0.008 };
        }

        let sprite = Sprite::SmallDigit(d);
        placed.push((sprite, viewport.locate(sprite, offset_x, offset_y)));

        offset_x += SMALL_DIGIT_STEP;
        if d == 1 {
            if let Some(&next) = reversed.get(index + 1) {
                offset_x -= if next == 1 { 0.006 } else { 0.008 };
            }
        }
    }
    placed
}
