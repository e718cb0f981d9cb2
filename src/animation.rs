// Entry animation timing for list rows
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Length of one row's fade/slide-in
pub const ENTRY_DURATION: Duration = Duration::from_millis(500);

/// Extra delay per row position
pub const ENTRY_STAGGER: Duration = Duration::from_millis(200);

/// Starting vertical offset; animates down to zero
pub const ENTRY_OFFSET: f32 = 20.0;

/// Animated properties of a row at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowFrame {
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
    /// Vertical displacement, [`ENTRY_OFFSET`] down to 0.0
    pub offset: f32,
}

impl RowFrame {
    pub const HIDDEN: RowFrame = RowFrame {
        opacity: 0.0,
        offset: ENTRY_OFFSET,
    };

    pub const SETTLED: RowFrame = RowFrame {
        opacity: 1.0,
        offset: 0.0,
    };

    pub fn is_settled(&self) -> bool {
        self.opacity >= 1.0 && self.offset <= 0.0
    }
}

fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Frame for the row at `index`, `elapsed` after it was mounted
pub fn entry_frame(index: usize, elapsed: Duration) -> RowFrame {
    let delay = ENTRY_STAGGER * index as u32;
    if elapsed <= delay {
        return RowFrame::HIDDEN;
    }
    let t = (elapsed - delay).as_secs_f32() / ENTRY_DURATION.as_secs_f32();
    if t >= 1.0 {
        return RowFrame::SETTLED;
    }
    let progress = ease_in_out(t);
    RowFrame {
        opacity: progress,
        offset: ENTRY_OFFSET * (1.0 - progress),
    }
}

#[derive(Debug, Clone, Copy)]
struct RowClock {
    index: usize,
    mounted_at: Instant,
}

/// Tracks when each row (by identity key) was mounted at its position.
///
/// A row restarts its animation when it first appears or when its position
/// in the rendered sequence changes.
#[derive(Debug)]
pub struct EntryAnimator {
    enabled: bool,
    rows: HashMap<String, RowClock>,
}

impl EntryAnimator {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            rows: HashMap::new(),
        }
    }

    /// Reconciles with the keys currently rendered, in order
    pub fn sync<I>(&mut self, keys: I, now: Instant)
    where
        I: IntoIterator<Item = String>,
    {
        let mut next = HashMap::new();
        for (index, key) in keys.into_iter().enumerate() {
            let clock = match self.rows.get(&key) {
                Some(clock) if clock.index == index => *clock,
                _ => RowClock {
                    index,
                    mounted_at: now,
                },
            };
            next.insert(key, clock);
        }
        self.rows = next;
    }

    pub fn frame(&self, key: &str, now: Instant) -> RowFrame {
        if !self.enabled {
            return RowFrame::SETTLED;
        }
        match self.rows.get(key) {
            Some(clock) => {
                entry_frame(clock.index, now.saturating_duration_since(clock.mounted_at))
            }
            None => RowFrame::HIDDEN,
        }
    }

    /// Whether any tracked row is still mid-animation
    pub fn is_animating(&self, now: Instant) -> bool {
        self.enabled
            && self.rows.values().any(|clock| {
                !entry_frame(clock.index, now.saturating_duration_since(clock.mounted_at))
                    .is_settled()
            })
    }

    /// Forgets all rows; called when the list screen remounts
    pub fn reset(&mut self) {
        self.rows.clear();
    }
}
