use macroquad::prelude::*;

/// How state time past the last frame is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Stop on the last frame.
    #[default]
    Normal,
    /// Wrap back to the first frame.
    Loop,
}

/// Atlas regions shown one after another at a fixed rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Regions in play order
    pub frames: Vec<Rect>,
    /// Seconds per frame
    pub frame_duration: f32,
    /// Behaviour past the last frame
    pub mode: PlayMode,
}

impl Animation {
    /// Animation showing each of `frames` for `frame_duration` seconds.
    pub fn new(frame_duration: f32, frames: Vec<Rect>, mode: PlayMode) -> Self {
        Self {
            frames,
            frame_duration,
            mode,
        }
    }

    /// Index of the frame shown at `state_time`, `None` without frames.
    pub fn key_frame_index(&self, state_time: f32) -> Option<usize> {
        if self.frames.is_empty() {
            return None;
        }
        let last = self.frames.len() - 1;
        if last == 0 || self.frame_duration <= 0.0 {
            return Some(0);
        }

        let n = (state_time.max(0.0) / self.frame_duration) as usize;
        Some(match self.mode {
            PlayMode::Normal => n.min(last),
            PlayMode::Loop => n % self.frames.len(),
        })
    }

    /// Region shown at `state_time`.
    pub fn key_frame(&self, state_time: f32) -> Option<Rect> {
        self.key_frame_index(state_time).map(|i| self.frames[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: usize) -> Vec<Rect> {
        (0..n).map(|i| Rect::new(i as f32 * 16.0, 0.0, 16.0, 16.0)).collect()
    }

    #[test]
    fn normal_mode_clamps_to_last_frame() {
        let anim = Animation::new(0.1, frames(3), PlayMode::Normal);
        assert_eq!(anim.key_frame_index(0.0), Some(0));
        assert_eq!(anim.key_frame_index(0.15), Some(1));
        assert_eq!(anim.key_frame_index(10.0), Some(2));
    }

    #[test]
    fn loop_mode_wraps() {
        let anim = Animation::new(0.25, frames(4), PlayMode::Loop);
        assert_eq!(anim.key_frame_index(1.1), Some(0));
        assert_eq!(anim.key_frame(1.3), Some(Rect::new(16.0, 0.0, 16.0, 16.0)));
    }

    #[test]
    fn empty_animation_has_no_frame() {
        let anim = Animation::new(0.1, Vec::new(), PlayMode::Loop);
        assert_eq!(anim.key_frame(1.0), None);
    }
}
