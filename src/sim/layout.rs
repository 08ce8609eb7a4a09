//! Sprite catalogue and screen layout
//!
//! Every sprite is authored for a 288 px wide surface. Layout scales it to the
//! current viewport width, keeps its aspect ratio, centres it and then shifts
//! it by an offset expressed as a fraction of the viewport.

use glam::Vec2;

use crate::consts::REFERENCE_WIDTH;

/// Medal tiers awarded on the end screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Medal {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Medal {
    /// Medal earned for a final score, if any
    pub fn for_score(score: u32) -> Option<Self> {
        match score {
            0..=9 => None,
            10..=19 => Some(Medal::Bronze),
            20..=29 => Some(Medal::Silver),
            30..=39 => Some(Medal::Gold),
            _ => Some(Medal::Platinum),
        }
    }

    pub fn tier(self) -> u8 {
        self as u8
    }
}

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background(u8),
    Logo,
    StartButton,
    GetReady,
    TapHint,
    GameOver,
    Board,
    NewBadge,
    Ground,
    /// Obstacle segment hanging from the top (opening faces down)
    ObstacleTop,
    /// Obstacle segment rising from the ground (opening faces up)
    ObstacleBottom,
    Bird { costume: u8, wing: u8 },
    Medal(Medal),
    Glitter(u8),
    SmallDigit(u8),
    LargeDigit(u8),
}

impl Sprite {
    /// Authored pixel size of the sprite
    pub fn native_size(self) -> Vec2 {
        let (w, h) = match self {
            Sprite::Background(_) => (288.0, 512.0),
            Sprite::Logo => (178.0, 48.0),
            Sprite::StartButton => (104.0, 58.0),
            Sprite::GetReady => (184.0, 50.0),
            Sprite::TapHint => (114.0, 98.0),
            Sprite::GameOver => (192.0, 42.0),
            Sprite::Board => (226.0, 116.0),
            Sprite::NewBadge => (32.0, 14.0),
            Sprite::Ground => (336.0, 112.0),
            Sprite::ObstacleTop | Sprite::ObstacleBottom => (52.0, 320.0),
            Sprite::Bird { .. } => (34.0, 24.0),
            Sprite::Medal(_) => (44.0, 44.0),
            Sprite::Glitter(_) => (10.0, 10.0),
            Sprite::SmallDigit(_) => (12.0, 14.0),
            Sprite::LargeDigit(_) => (24.0, 36.0),
        };
        Vec2::new(w, h)
    }

    /// Describe how a decoded image differs from the authored size, if it does
    pub fn size_mismatch(self, width: u32, height: u32) -> Option<String> {
        let expected = self.native_size();
        if width as f32 == expected.x && height as f32 == expected.y {
            None
        } else {
            Some(format!(
                "image is {width}x{height}, layout expects {}x{}",
                expected.x, expected.y
            ))
        }
    }

    /// Asset file stem, e.g. `bird1_2` resolves to `img/bird1_2.png`
    pub fn asset_name(self) -> String {
        match self {
            Sprite::Background(i) => format!("bg{i}"),
            Sprite::Logo => "logo".to_string(),
            Sprite::StartButton => "start".to_string(),
            Sprite::GetReady => "ready".to_string(),
            Sprite::TapHint => "tap".to_string(),
            Sprite::GameOver => "over".to_string(),
            Sprite::Board => "board".to_string(),
            Sprite::NewBadge => "new".to_string(),
            Sprite::Ground => "land".to_string(),
            Sprite::ObstacleTop => "pipe0".to_string(),
            Sprite::ObstacleBottom => "pipe1".to_string(),
            Sprite::Bird { costume, wing } => format!("bird{costume}_{wing}"),
            Sprite::Medal(m) => format!("medal{}", m.tier()),
            Sprite::Glitter(i) => format!("glitter{i}"),
            Sprite::SmallDigit(d) => format!("small_num{d}"),
            Sprite::LargeDigit(d) => format!("large_num{d}"),
        }
    }

    /// Every sprite the game can ask for, used for preloading
    pub fn all() -> Vec<Sprite> {
        let mut sprites = vec![
            Sprite::Logo,
            Sprite::StartButton,
            Sprite::GetReady,
            Sprite::TapHint,
            Sprite::GameOver,
            Sprite::Board,
            Sprite::NewBadge,
            Sprite::Ground,
            Sprite::ObstacleTop,
            Sprite::ObstacleBottom,
            Sprite::Medal(Medal::Bronze),
            Sprite::Medal(Medal::Silver),
            Sprite::Medal(Medal::Gold),
            Sprite::Medal(Medal::Platinum),
        ];
        sprites.extend((0..crate::consts::BACKGROUNDS).map(Sprite::Background));
        for costume in 0..crate::consts::COSTUMES {
            for wing in 0..crate::consts::WING_FRAMES {
                sprites.push(Sprite::Bird { costume, wing });
            }
        }
        sprites.extend((0..3).map(Sprite::Glitter));
        sprites.extend((0..10).map(Sprite::SmallDigit));
        sprites.extend((0..10).map(Sprite::LargeDigit));
        sprites
    }
}

/// Axis-aligned rectangle in surface pixels (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Size of the render surface in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: 512.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Pixels per authored sprite pixel
    #[inline]
    pub fn scale(&self) -> f32 {
        self.width / REFERENCE_WIDTH
    }

    /// Place a sprite at the given centre offsets
    pub fn locate(&self, sprite: Sprite, offset_x: f32, offset_y: f32) -> Rect {
        let native = sprite.native_size();
        let width = native.x * self.scale();
        let height = native.y / native.x * width;
        Rect {
            x: (self.width - width) / 2.0 - self.width * offset_x,
            y: (self.height - height) / 2.0 - self.height * offset_y,
            width,
            height,
        }
    }

    /// The whole surface
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medal_thresholds() {
        assert_eq!(Medal::for_score(0), None);
        assert_eq!(Medal::for_score(9), None);
        assert_eq!(Medal::for_score(10), Some(Medal::Bronze));
        assert_eq!(Medal::for_score(19), Some(Medal::Bronze));
        assert_eq!(Medal::for_score(20), Some(Medal::Silver));
        assert_eq!(Medal::for_score(30), Some(Medal::Gold));
        assert_eq!(Medal::for_score(39), Some(Medal::Gold));
        assert_eq!(Medal::for_score(40), Some(Medal::Platinum));
        assert_eq!(Medal::for_score(999), Some(Medal::Platinum));
    }

    #[test]
    fn test_locate_centered_at_reference_size() {
        let viewport = Viewport::new(288.0, 512.0);
        let rect = viewport.locate(Sprite::Background(0), 0.0, 0.0);
        assert_eq!(rect, Rect::new(0.0, 0.0, 288.0, 512.0));
    }

    #[test]
    fn test_locate_offsets_move_left_and_up() {
        let viewport = Viewport::new(288.0, 512.0);
        let centered = viewport.locate(Sprite::Logo, 0.0, 0.0);
        let shifted = viewport.locate(Sprite::Logo, 0.5, 0.25);
        assert!((centered.x - shifted.x - 144.0).abs() < 1e-4);
        assert!((centered.y - shifted.y - 128.0).abs() < 1e-4);
    }

    #[test]
    fn test_locate_scales_with_width() {
        let viewport = Viewport::new(576.0, 1024.0);
        let rect = viewport.locate(Sprite::Bird { costume: 0, wing: 0 }, 0.0, 0.0);
        assert!((rect.width - 68.0).abs() < 1e-4);
        assert!((rect.height - 48.0).abs() < 1e-4);
    }

    #[test]
    fn test_all_sprites_have_unique_asset_names() {
        let sprites = Sprite::all();
        let mut names: Vec<String> = sprites.iter().map(|s| s.asset_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), sprites.len());
        assert_eq!(sprites.len(), 14 + 2 + 9 + 3 + 20);
    }

    #[test]
    fn test_size_mismatch_reports_wrong_assets() {
        assert_eq!(Sprite::Bird { costume: 0, wing: 1 }.size_mismatch(34, 24), None);
        let report = Sprite::ObstacleTop.size_mismatch(52, 400).unwrap();
        assert!(report.contains("52x400"));
        assert!(report.contains("52x320"));
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(30.0, 15.0)));
        assert!(!rect.contains(Vec2::new(30.1, 12.0)));
    }
}
