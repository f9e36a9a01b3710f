//! Cursor smoothing: margin remap, moving average, exponential pull.
//!
//! The raw index fingertip is mapped from an inset tracking region to the
//! full target surface, denoised with a short moving average, then eased
//! toward with a fixed exponential factor. State deliberately persists
//! across gestures and mode changes so the cursor does not jump when
//! pointing resumes.

use std::collections::VecDeque;

use nalgebra::{Point2, Vector2};

pub struct CursorSmoother {
    margin: f32,
    smoothing: f32,
    history_size: usize,
    screen_w: f32,
    screen_h: f32,
    history: VecDeque<Vector2<f32>>,
    /// Starts at the screen center.
    smoothed: Vector2<f32>,
}

impl CursorSmoother {
    pub fn new(margin: f32, smoothing: f32, history_size: usize, screen_w: u32, screen_h: u32) -> Self {
        let screen_w = screen_w as f32;
        let screen_h = screen_h as f32;
        Self {
            margin,
            smoothing,
            history_size,
            screen_w,
            screen_h,
            history: VecDeque::with_capacity(history_size),
            smoothed: Vector2::new(screen_w / 2.0, screen_h / 2.0),
        }
    }

    /// Feed the normalized index fingertip; returns the next cursor
    /// position in screen pixels.
    pub fn update(&mut self, tip: Point2<f32>) -> (i32, i32) {
        let raw = Vector2::new(
            self.remap(tip.x) * self.screen_w,
            self.remap(tip.y) * self.screen_h,
        );

        if self.history.len() == self.history_size {
            self.history.pop_front();
        }
        self.history.push_back(raw);

        let sum: Vector2<f32> = self.history.iter().sum();
        let target = sum / self.history.len() as f32;

        self.smoothed += (target - self.smoothed) * self.smoothing;
        (
            self.smoothed.x.round() as i32,
            self.smoothed.y.round() as i32,
        )
    }

    /// Map the usable tracking region [margin, 1-margin] onto [0, 1].
    fn remap(&self, v: f32) -> f32 {
        ((v - self.margin) / (1.0 - 2.0 * self.margin)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoother() -> CursorSmoother {
        CursorSmoother::new(0.05, 0.4, 5, 1920, 1080)
    }

    #[test]
    fn edges_of_tracking_region_reach_screen_corners() {
        let mut s = smoother();
        // hold the tip at the tracking-region corner until converged
        let mut pos = (0, 0);
        for _ in 0..100 {
            pos = s.update(Point2::new(0.05, 0.05));
        }
        assert_eq!(pos, (0, 0));
        for _ in 0..100 {
            pos = s.update(Point2::new(0.95, 0.95));
        }
        assert_eq!(pos, (1920, 1080));
    }

    #[test]
    fn outside_margin_clamps() {
        let mut s = smoother();
        let mut pos = (0, 0);
        for _ in 0..100 {
            pos = s.update(Point2::new(-0.2, 1.3));
        }
        assert_eq!(pos, (0, 1080));
    }

    #[test]
    fn converges_monotonically_without_overshoot() {
        let mut s = smoother();
        let target = Point2::new(0.5, 0.5);
        // start from center; jump the hand to one side, then hold still
        let still = Point2::new(0.8, 0.5);
        let target_x = s.remap(still.x) * 1920.0;
        let mut prev = s.update(target).0 as f32;
        let mut last_dist = (target_x - prev).abs();
        for _ in 0..60 {
            let (x, _) = s.update(still);
            let x = x as f32;
            let dist = (target_x - x).abs();
            assert!(x >= prev, "moved away from target");
            assert!(dist <= last_dist + 0.5, "overshot the target");
            prev = x;
            last_dist = dist;
        }
        assert!(last_dist < 1.0);
    }
}
