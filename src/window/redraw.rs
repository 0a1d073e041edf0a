use winit::dpi::PhysicalSize;

/// Decides when the image has to be drawn again.
///
/// The first frame is always drawn; after that only a change in window size
/// schedules another one.
#[derive(Debug, Clone, Copy)]
pub struct RedrawTracker {
    last_size: PhysicalSize<u32>,
    pending: bool,
}

impl RedrawTracker {
    pub fn new(initial_size: PhysicalSize<u32>) -> Self {
        Self {
            last_size: initial_size,
            pending: true,
        }
    }

    /// Records the current size. Returns true if it differs from the last one.
    pub fn observe(&mut self, size: PhysicalSize<u32>) -> bool {
        if size == self.last_size {
            return false;
        }
        self.last_size = size;
        self.pending = true;
        true
    }

    /// Returns whether a redraw is due and clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_size(&self) -> PhysicalSize<u32> {
        self.last_size
    }
}
