//! Sprite animation playback clock.
//!
//! Sprites are drawn by frame index; this module only decides which frame is
//! current. Machines use it to gate transitions on "animation finished" and to
//! open hit-boxes on a specific frame of an attack.

/// How a frame range is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    #[default]
    Loop,
    PingPong,
    LoopReverse,
    NoLoop,
}

/// Inclusive range of sprite-sheet frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub first: u16,
    pub last: u16,
}

impl FrameRange {
    pub const fn new(first: u16, last: u16) -> Self {
        Self { first, last }
    }

    pub const fn single(frame: u16) -> Self {
        Self::new(frame, frame)
    }
}

/// Playback state of one animated sprite.
#[derive(Debug, Clone)]
pub struct AnimInstance {
    pub range: FrameRange,
    pub mode: PlayMode,
    pub frame: u16,
    frame_time: f32,
    elapsed: f32,
    forward: bool,
    finished: bool,
}

impl AnimInstance {
    pub fn new(range: FrameRange, mode: PlayMode, frame_time: f32) -> Self {
        let mut inst = Self {
            range,
            mode,
            frame: range.first,
            frame_time: frame_time.max(0.001),
            elapsed: 0.0,
            forward: true,
            finished: false,
        };
        inst.reset_range(range, mode);
        inst
    }

    /// Switch to `range` unless it is already playing, in which case only the
    /// mode changes and playback continues from the current frame.
    pub fn set_range(&mut self, range: FrameRange, mode: PlayMode) {
        if self.range == range {
            self.set_mode(mode);
        } else {
            self.reset_range(range, mode);
        }
    }

    /// Restart playback of `range` from its first frame.
    pub fn reset_range(&mut self, range: FrameRange, mode: PlayMode) {
        self.range = range;
        self.mode = mode;
        self.frame = match mode {
            PlayMode::LoopReverse => range.last,
            _ => range.first,
        };
        self.elapsed = 0.0;
        self.forward = true;
        self.finished = false;
    }

    pub fn set_mode(&mut self, mode: PlayMode) {
        if self.mode != mode {
            self.mode = mode;
            self.finished = false;
        }
    }

    /// Advance playback by `dt` seconds. Returns true when the range wrapped
    /// around (or bounced, for ping-pong) during this call.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.finished {
            return false;
        }
        self.elapsed += dt;
        let mut wrapped = false;
        while self.elapsed >= self.frame_time && !self.finished {
            self.elapsed -= self.frame_time;
            wrapped |= self.advance();
        }
        wrapped
    }

    fn advance(&mut self) -> bool {
        let FrameRange { first, last } = self.range;
        match self.mode {
            PlayMode::Loop => {
                if self.frame >= last {
                    self.frame = first;
                    true
                } else {
                    self.frame += 1;
                    false
                }
            }
            PlayMode::LoopReverse => {
                if self.frame <= first {
                    self.frame = last;
                    true
                } else {
                    self.frame -= 1;
                    false
                }
            }
            PlayMode::PingPong => {
                if self.forward {
                    if self.frame >= last {
                        self.forward = false;
                        self.frame = self.frame.saturating_sub(1).max(first);
                        true
                    } else {
                        self.frame += 1;
                        false
                    }
                } else if self.frame <= first {
                    self.forward = true;
                    self.frame = (self.frame + 1).min(last);
                    true
                } else {
                    self.frame -= 1;
                    false
                }
            }
            PlayMode::NoLoop => {
                if self.frame >= last {
                    self.finished = true;
                } else {
                    self.frame += 1;
                }
                false
            }
        }
    }

    /// True once a `NoLoop` range has shown its last frame for a full frame
    /// time.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True while the frame `offset` frames into the range is showing.
    pub fn is_relative_frame(&self, offset: u16) -> bool {
        self.frame == self.range.first + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FT: f32 = 0.1;

    #[test]
    fn no_loop_finishes_after_every_frame_has_shown() {
        let mut anim = AnimInstance::new(FrameRange::new(4, 6), PlayMode::NoLoop, FT);

        anim.tick(0.25);
        assert_eq!(anim.frame, 6);
        assert!(!anim.is_finished());

        anim.tick(0.06);
        assert!(anim.is_finished());
        assert_eq!(anim.frame, 6);
    }

    #[test]
    fn loop_wraps_and_reports_it() {
        let mut anim = AnimInstance::new(FrameRange::new(0, 1), PlayMode::Loop, FT);

        assert!(!anim.tick(0.1));
        assert_eq!(anim.frame, 1);
        assert!(anim.tick(0.1));
        assert_eq!(anim.frame, 0);
        assert!(!anim.is_finished());
    }

    #[test]
    fn loop_reverse_starts_at_the_end() {
        let mut anim = AnimInstance::new(FrameRange::new(2, 4), PlayMode::LoopReverse, FT);
        assert_eq!(anim.frame, 4);

        anim.tick(0.1);
        assert_eq!(anim.frame, 3);
    }

    #[test]
    fn ping_pong_bounces_between_ends() {
        let mut anim = AnimInstance::new(FrameRange::new(0, 2), PlayMode::PingPong, FT);
        let mut seen = Vec::new();
        for _ in 0..6 {
            anim.tick(0.1);
            seen.push(anim.frame);
        }
        assert_eq!(seen, vec![1, 2, 1, 0, 1, 2]);
    }

    #[test]
    fn set_range_keeps_frame_when_range_is_unchanged() {
        let range = FrameRange::new(0, 3);
        let mut anim = AnimInstance::new(range, PlayMode::Loop, FT);
        anim.tick(0.1);
        anim.tick(0.1);

        anim.set_range(range, PlayMode::PingPong);
        assert_eq!(anim.frame, 2);

        anim.set_range(FrameRange::new(5, 7), PlayMode::Loop);
        assert_eq!(anim.frame, 5);
    }

    #[test]
    fn relative_frame_is_measured_from_range_start() {
        let mut anim = AnimInstance::new(FrameRange::new(10, 12), PlayMode::NoLoop, FT);
        assert!(anim.is_relative_frame(0));

        anim.tick(0.1);
        assert!(anim.is_relative_frame(1));
        assert!(!anim.is_relative_frame(0));
    }
}
