// Swipe-to-reveal tracking for list rows

/// Travel needed before a released swipe counts as a selection
pub const SWIPE_THRESHOLD: u16 = 40;

/// Swipe units per terminal column of mouse travel
pub const UNITS_PER_COLUMN: u16 = 4;

/// Backend-independent pointer input, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { column: u16, row: u16 },
    Drag { column: u16 },
    Up,
}

/// Accumulates horizontal travel on one row.
///
/// The tracker knows nothing about mice or keys; callers feed it positions
/// or step amounts and get back the row index when a swipe completes.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: u16,
    row: Option<usize>,
    origin: Option<u16>,
    distance: u16,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold,
            row: None,
            origin: None,
            distance: 0,
        }
    }

    pub fn active_row(&self) -> Option<usize> {
        self.row
    }

    /// Starts tracking a pointer pressed at `column` on `row`
    pub fn begin(&mut self, row: usize, column: u16) {
        self.row = Some(row);
        self.origin = Some(column);
        self.distance = 0;
    }

    /// Updates travel from the pointer's current column
    pub fn drag(&mut self, column: u16) {
        if let Some(origin) = self.origin {
            self.distance = origin.abs_diff(column).saturating_mul(UNITS_PER_COLUMN);
        }
    }

    /// Adds travel without a pointer, starting a swipe on `row` if needed
    pub fn nudge(&mut self, row: usize, amount: u16) {
        if self.row != Some(row) {
            self.row = Some(row);
            self.origin = None;
            self.distance = 0;
        }
        self.distance = self.distance.saturating_add(amount);
    }

    /// Ends the swipe; returns the row if it travelled past the threshold
    pub fn release(&mut self) -> Option<usize> {
        let completed = self.row.filter(|_| self.distance >= self.threshold);
        self.cancel();
        completed
    }

    pub fn cancel(&mut self) {
        self.row = None;
        self.origin = None;
        self.distance = 0;
    }

    /// Fraction of the threshold covered, for drawing the revealed action
    pub fn progress(&self) -> f32 {
        if self.threshold == 0 {
            return 1.0;
        }
        (self.distance as f32 / self.threshold as f32).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_past_threshold_selects() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(2, 60);
        swipe.drag(45);
        assert_eq!(swipe.progress(), 1.0);
        assert_eq!(swipe.release(), Some(2));
        assert_eq!(swipe.active_row(), None);
    }

    #[test]
    fn test_short_drag_does_not_select() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(0, 60);
        swipe.drag(55);
        assert!(swipe.progress() < 1.0);
        assert_eq!(swipe.release(), None);
    }

    #[test]
    fn test_drag_in_either_direction_counts() {
        let mut swipe = SwipeTracker::default();
        swipe.begin(1, 10);
        swipe.drag(20);
        assert_eq!(swipe.release(), Some(1));
    }

    #[test]
    fn test_nudges_accumulate() {
        let mut swipe = SwipeTracker::default();
        swipe.nudge(3, 20);
        assert_eq!(swipe.progress(), 0.5);
        swipe.nudge(3, 20);
        assert_eq!(swipe.release(), Some(3));
    }

    #[test]
    fn test_nudge_on_other_row_restarts() {
        let mut swipe = SwipeTracker::default();
        swipe.nudge(0, 30);
        swipe.nudge(1, 30);
        assert_eq!(swipe.release(), None);
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let mut swipe = SwipeTracker::default();
        swipe.drag(100);
        assert_eq!(swipe.progress(), 0.0);
        assert_eq!(swipe.release(), None);
    }
}
