//! Time-driven sprite animation.
//!
//! Frames advance when the clock passes `next_advance_at`, independent of
//! the tick rate, so pacing is the same at any frame rate.

use std::time::Duration;

use crate::entities::{Animation, AnimationTrack};

impl AnimationTrack {
    /// Number of frames in the sprite strip backing this track.
    pub fn frame_count(self) -> usize {
        match self {
            AnimationTrack::IdleLeft | AnimationTrack::IdleRight => 4,
            AnimationTrack::RunLeft | AnimationTrack::RunRight => 8,
            AnimationTrack::Crab => 2,
            AnimationTrack::Coin => 4,
            AnimationTrack::Portal => 8,
        }
    }

    pub fn is_running(self) -> bool {
        matches!(self, AnimationTrack::RunLeft | AnimationTrack::RunRight)
    }
}

impl Animation {
    pub fn new(track: AnimationTrack, interval: Duration, now: Duration) -> Self {
        Animation {
            track,
            frame: 0,
            interval,
            next_advance_at: now + interval,
        }
    }

    /// Step to the next frame (wrapping) if the interval has elapsed.
    /// Returns whether the frame changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        if now < self.next_advance_at {
            return false;
        }
        self.frame = (self.frame + 1) % self.track.frame_count();
        self.next_advance_at = now + self.interval;
        true
    }

    /// Switch to another track, restarting at frame 0.  A no-op when the
    /// track is already active.
    pub fn switch(&mut self, track: AnimationTrack) {
        if self.track != track {
            self.track = track;
            self.frame = 0;
        }
    }
}
