//! Animation cycle: A frame counter advanced once per tick.

/// Steps through `frames` animation frames, holding each one for
/// `ticks_per_frame` ticks and wrapping around at the end.
///
/// ```
/// use termframe::widget::Cycle;
///
/// let mut spinner = Cycle::new(4, 2);
/// assert!(!spinner.advance());
/// assert!(spinner.advance());
/// assert_eq!(spinner.frame(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    frames: usize,
    ticks_per_frame: u32,
    frame: usize,
    counter: u32,
}

impl Cycle {
    /// Create a cycle. Zero counts are treated as one.
    pub const fn new(frames: usize, ticks_per_frame: u32) -> Self {
        Self {
            frames: if frames == 0 { 1 } else { frames },
            ticks_per_frame: if ticks_per_frame == 0 { 1 } else { ticks_per_frame },
            frame: 0,
            counter: 0,
        }
    }

    /// Count one tick. Returns `true` when the frame changed.
    pub fn advance(&mut self) -> bool {
        self.counter += 1;
        if self.counter < self.ticks_per_frame {
            return false;
        }
        self.counter = 0;
        let previous = self.frame;
        self.frame = (self.frame + 1) % self.frames;
        self.frame != previous
    }

    /// Current frame index.
    #[inline]
    pub const fn frame(&self) -> usize {
        self.frame
    }

    /// Number of frames in the cycle.
    #[inline]
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// Pick the current frame out of a slice of the cycle's length.
    ///
    /// Returns `None` if `items` is shorter than the frame index.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.frame)
    }

    /// Back to the first frame.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.counter = 0;
    }
}
