//! # Frame Deciders
//!
//! A frame decider picks which frame of a sprite an object shows. It is a
//! pure function of object state, except for the deciders that draw from the
//! render's seeded RNG.
//!
//! A decider may answer [`DecidedFrame::Random`] ("pick uniformly now"); the
//! compositor resolves that against the sprite's frame count with
//! [`resolve_frame`]. Every other answer is already a concrete index.

use rand::Rng;

use crate::object::{GameObject, ObjectState};

/// Decider output before it is matched against a sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecidedFrame {
    /// A concrete frame index.
    Index(i32),
    /// Any frame, chosen uniformly by the caller.
    Random,
}

/// The `Ready` animation of an infantry sequence: `start,count,facing_stride`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadySequence {
    /// First frame of the animation.
    pub start: i32,
    /// Frames per facing.
    pub count: i32,
    /// Distance between consecutive facings in the frame table.
    pub count_next: i32,
}

impl Default for ReadySequence {
    fn default() -> Self {
        Self {
            start: 0,
            count: 1,
            count_next: 1,
        }
    }
}

impl ReadySequence {
    /// Parses `"start,count,next"`. Anything else (wrong field count,
    /// non-numeric field) yields `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let mut fields = value.split(',').map(|f| f.trim().parse::<i32>());
        let start = fields.next()?.ok()?;
        let count = fields.next()?.ok()?;
        let count_next = fields.next()?.ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Self {
            start,
            count,
            count_next,
        })
    }
}

/// Strategy selecting a frame from object state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameDecider {
    /// Always frame 0.
    #[default]
    Null,
    /// A rule-driven fixed frame.
    Fixed(i32),
    /// Uniform over the sprite's frames.
    Random,
    /// The overlay data byte (tiberium stage, wall connections, gate state).
    OverlayValue,
    /// Infantry standing in their ready pose.
    Infantry {
        /// Ready animation window.
        ready: ReadySequence,
        /// Ignore the map facing and pick one at random.
        random_facing: bool,
    },
}

/// Number of facings in an infantry ready animation.
const INFANTRY_FACINGS: i32 = 8;

impl FrameDecider {
    /// Decides a frame for `obj`.
    pub fn decide<R: Rng>(&self, obj: &GameObject, rng: &mut R) -> DecidedFrame {
        match *self {
            Self::Null => DecidedFrame::Index(0),
            Self::Fixed(index) => DecidedFrame::Index(index),
            Self::Random => DecidedFrame::Random,
            Self::OverlayValue => DecidedFrame::Index(obj.overlay_value().map_or(0, i32::from)),
            Self::Infantry {
                ready,
                random_facing,
            } => {
                let direction = if random_facing {
                    rng.gen_range(0..256)
                } else {
                    match obj.state {
                        ObjectState::Unit { direction, .. } => i32::from(direction),
                        _ => 0,
                    }
                };
                // map directions run clockwise, sprite facings counter-clockwise
                let facing = (INFANTRY_FACINGS - direction / 32) % INFANTRY_FACINGS;
                let step = if ready.count > 1 {
                    rng.gen_range(0..ready.count)
                } else {
                    0
                };
                DecidedFrame::Index(ready.start + facing * ready.count_next + step)
            }
        }
    }
}

/// Turns a decided frame into an index below `num_images`.
///
/// `Random` is drawn uniformly; concrete indices outside the table yield
/// `None` and the draw call is skipped.
pub fn resolve_frame<R: Rng>(
    decided: DecidedFrame,
    num_images: usize,
    rng: &mut R,
) -> Option<usize> {
    if num_images == 0 {
        return None;
    }
    match decided {
        DecidedFrame::Random => Some(rng.gen_range(0..num_images)),
        DecidedFrame::Index(index) => usize::try_from(index).ok().filter(|&i| i < num_images),
    }
}
