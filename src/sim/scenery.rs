//! Scrolling world: obstacle columns, the ground strip and the medal sparkle

use rand::Rng;

use super::layout::{Rect, Sprite, Viewport};
use crate::consts::*;
use crate::frames;

/// One obstacle column: a top and a bottom segment around a vertical gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleColumn {
    /// Horizontal offset (grows as the column moves left across the screen)
    pub x: f32,
    /// Vertical offset of the bottom segment; the top segment sits
    /// `gap_height` above it
    pub gap_y: f32,
    /// One-shot scoring flag, cleared once the bird has passed this column
    pub credit: bool,
}

/// The two obstacle columns, recycled as they leave the screen
#[derive(Debug, Clone, PartialEq)]
pub struct ObstaclePair {
    pub columns: [ObstacleColumn; 2],
    pub gap_height: f32,
}

impl Default for ObstaclePair {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstaclePair {
    pub fn new() -> Self {
        Self {
            columns: OBSTACLE_START_X.map(|x| ObstacleColumn {
                x,
                gap_y: 0.0,
                credit: true,
            }),
            gap_height: GAP_HEIGHT,
        }
    }

    /// Move both columns back off-screen to the right and re-arm scoring
    pub fn reset(&mut self) {
        for (column, x) in self.columns.iter_mut().zip(OBSTACLE_START_X) {
            column.x = x;
            column.credit = true;
        }
    }

    /// Pick fresh gap heights for both columns
    pub fn randomize_gaps<R: Rng>(&mut self, rng: &mut R) {
        for column in &mut self.columns {
            column.gap_y = random_gap_y(rng);
        }
    }

    /// Scroll the columns, recycling any that left the screen.
    ///
    /// Returns the number of columns the bird passed this step.
    pub fn advance<R: Rng>(&mut self, dt: f32, rng: &mut R) -> u32 {
        let step = OBSTACLE_SPEED * frames(dt);
        let mut passed = 0;

        for column in &mut self.columns {
            column.x += step;
            if column.x >= OBSTACLE_RECYCLE_X {
                column.x = OBSTACLE_SPAWN_X;
                column.gap_y = random_gap_y(rng);
                column.credit = true;
            }

            if column.x > SCORE_THRESHOLD_X && column.credit {
                column.credit = false;
                passed += 1;
            }
        }

        passed
    }

    /// Screen rectangles of every segment: `[top0, bottom0, top1, bottom1]`
    pub fn segments(&self, viewport: &Viewport) -> [(Sprite, Rect); 4] {
        let [a, b] = self.columns;
        [
            (
                Sprite::ObstacleTop,
                viewport.locate(Sprite::ObstacleTop, a.x, a.gap_y + self.gap_height),
            ),
            (
                Sprite::ObstacleBottom,
                viewport.locate(Sprite::ObstacleBottom, a.x, a.gap_y),
            ),
            (
                Sprite::ObstacleTop,
                viewport.locate(Sprite::ObstacleTop, b.x, b.gap_y + self.gap_height),
            ),
            (
                Sprite::ObstacleBottom,
                viewport.locate(Sprite::ObstacleBottom, b.x, b.gap_y),
            ),
        ]
    }
}

fn random_gap_y<R: Rng>(rng: &mut R) -> f32 {
    GAP_MIN_Y + rng.random::<f32>() * (GAP_MAX_Y - GAP_MIN_Y)
}

/// Two ground tiles leapfrogging each other for an endless strip
#[derive(Debug, Clone, PartialEq)]
pub struct GroundScroller {
    pub offsets: [f32; 2],
}

impl Default for GroundScroller {
    fn default() -> Self {
        Self {
            offsets: [0.0, -GROUND_WRAP_X],
        }
    }
}

impl GroundScroller {
    pub fn advance(&mut self, dt: f32) {
        let step = GROUND_SPEED * frames(dt);
        for offset in &mut self.offsets {
            *offset += step;
            if *offset >= GROUND_WRAP_X {
                *offset = -GROUND_WRAP_X;
            }
        }
    }

    pub fn tiles(&self, viewport: &Viewport) -> [Rect; 2] {
        self.offsets
            .map(|offset| viewport.locate(Sprite::Ground, offset, GROUND_Y))
    }
}

/// Sparkle that flickers over the medal on the end screen
#[derive(Debug, Clone, PartialEq)]
pub struct Glitter {
    pub x: f32,
    pub y: f32,
    frame: i8,
    rising: bool,
    ticks: f32,
}

impl Default for Glitter {
    fn default() -> Self {
        Self {
            x: GLITTER_X_MIN,
            y: GLITTER_Y_MAX,
            frame: 0,
            rising: true,
            ticks: 0.0,
        }
    }
}

impl Glitter {
    /// Costume to draw (0..=2)
    pub fn frame(&self) -> u8 {
        self.frame.clamp(0, 2) as u8
    }

    /// Restart the sparkle at a random spot on the medal
    pub fn relocate<R: Rng>(&mut self, rng: &mut R) {
        self.x = GLITTER_X_MIN + rng.random::<f32>() * GLITTER_X_SPAN;
        self.y = GLITTER_Y_MAX - rng.random::<f32>() * GLITTER_Y_SPAN;
        self.frame = 0;
        self.rising = true;
    }

    /// Cycle 0→1→2→1→0 every `GLITTER_INTERVAL` ticks, then jump elsewhere
    pub fn advance<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if self.ticks >= GLITTER_INTERVAL {
            if self.rising {
                self.frame += 1;
                if self.frame >= 2 {
                    self.rising = false;
                }
            } else {
                self.frame -= 1;
            }
            self.ticks = 0.0;
        }
        self.ticks += frames(dt);

        if self.frame < 0 {
            self.relocate(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_column_recycles_to_spawn() {
        let mut rng = rng();
        let mut pair = ObstaclePair::new();
        pair.columns[0].x = OBSTACLE_RECYCLE_X - 0.001;
        pair.columns[0].credit = false;

        pair.advance(DEFAULT_FRAME_DT, &mut rng);

        let column = pair.columns[0];
        assert_eq!(column.x, OBSTACLE_SPAWN_X);
        assert!(column.credit);
        assert!(column.gap_y >= GAP_MIN_Y && column.gap_y < GAP_MAX_Y);
    }

    #[test]
    fn test_recycled_gaps_stay_in_range() {
        let mut rng = rng();
        let mut pair = ObstaclePair::new();
        pair.randomize_gaps(&mut rng);
        for _ in 0..5_000 {
            pair.advance(DEFAULT_FRAME_DT, &mut rng);
            for column in pair.columns {
                assert!(column.gap_y >= GAP_MIN_Y && column.gap_y <= GAP_MAX_Y);
                assert!(column.x < OBSTACLE_RECYCLE_X);
            }
        }
    }

    #[test]
    fn test_columns_keep_their_spacing() {
        let mut rng = rng();
        let mut pair = ObstaclePair::new();
        let spacing = pair.columns[0].x - pair.columns[1].x;
        pair.advance(0.5, &mut rng);
        let moved = pair.columns[0].x - pair.columns[1].x;
        assert!((spacing - moved).abs() < 1e-4);
    }

    #[test]
    fn test_reset_restores_start_and_credit() {
        let mut rng = rng();
        let mut pair = ObstaclePair::new();
        for _ in 0..400 {
            pair.advance(DEFAULT_FRAME_DT, &mut rng);
        }
        pair.reset();
        assert_eq!(pair.columns[0].x, OBSTACLE_START_X[0]);
        assert_eq!(pair.columns[1].x, OBSTACLE_START_X[1]);
        assert!(pair.columns.iter().all(|c| c.credit));
    }

    #[test]
    fn test_segments_frame_the_gap() {
        let viewport = Viewport::new(288.0, 512.0);
        let mut pair = ObstaclePair::new();
        pair.columns[0].x = 0.0;
        pair.columns[0].gap_y = -0.4;
        let [(top_sprite, top), (bottom_sprite, bottom), ..] = pair.segments(&viewport);
        assert_eq!(top_sprite, Sprite::ObstacleTop);
        assert_eq!(bottom_sprite, Sprite::ObstacleBottom);
        // Opening between the bottom edge of the top segment and the top of the bottom one
        let opening = bottom.y - (top.y + top.height);
        let expected = GAP_HEIGHT * 512.0 - 320.0;
        assert!((opening - expected).abs() < 1e-3);
    }

    #[test]
    fn test_ground_wraps_back() {
        let mut ground = GroundScroller::default();
        ground.offsets[0] = GROUND_WRAP_X - 0.001;
        ground.advance(DEFAULT_FRAME_DT);
        assert_eq!(ground.offsets[0], -GROUND_WRAP_X);
        assert!(ground.offsets[1] > -GROUND_WRAP_X);
    }

    #[test]
    fn test_ground_offsets_stay_bounded() {
        let mut ground = GroundScroller::default();
        for _ in 0..10_000 {
            ground.advance(DEFAULT_FRAME_DT);
            for offset in ground.offsets {
                assert!((-GROUND_WRAP_X..GROUND_WRAP_X).contains(&offset));
            }
        }
    }

    #[test]
    fn test_glitter_cycles_and_relocates() {
        let mut rng = rng();
        let mut glitter = Glitter::default();
        let mut frames_seen = vec![glitter.frame()];
        let mut moved = false;
        let start = (glitter.x, glitter.y);
        for _ in 0..200 {
            glitter.advance(DEFAULT_FRAME_DT, &mut rng);
            if frames_seen.last() != Some(&glitter.frame()) {
                frames_seen.push(glitter.frame());
            }
            moved |= (glitter.x, glitter.y) != start;
            assert!(glitter.frame() <= 2);
            assert!(glitter.x >= GLITTER_X_MIN && glitter.x <= GLITTER_X_MIN + GLITTER_X_SPAN);
            assert!(glitter.y <= GLITTER_Y_MAX && glitter.y >= GLITTER_Y_MAX - GLITTER_Y_SPAN);
        }
        assert_eq!(&frames_seen[..5], &[0, 1, 2, 1, 0]);
        assert!(moved);
    }

    proptest! {
        #[test]
        fn prop_each_pass_scores_exactly_once(
            steps in proptest::collection::vec(0.001f32..0.1, 1..400),
        ) {
            let mut rng = rng();
            let mut pair = ObstaclePair::new();
            // Column 0 starts just before the scoring line; column 1 far away
            pair.columns[0].x = SCORE_THRESHOLD_X - 0.05;
            pair.columns[1].x = -100.0;

            let mut total = 0;
            for dt in steps {
                if pair.columns[0].x + OBSTACLE_SPEED * frames(dt) >= OBSTACLE_RECYCLE_X {
                    break;
                }
                total += pair.advance(dt, &mut rng);
            }
            let expected = u32::from(pair.columns[0].x > SCORE_THRESHOLD_X);
            prop_assert_eq!(total, expected);
        }
    }
}
