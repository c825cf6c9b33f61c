//! # Gesture Interpreter
//!
//! Turns a released drag into at most one swipe direction.
//!
//! ```text
//! DragSample (offset px, velocity px/s) + origin
//!     │
//!     ├─ |dy| > |dx| ? vertical : horizontal
//!     ├─ |offset| > 50px  OR  |velocity| > 500px/s ?  else → None (snap back)
//!     └─ sign → Up / Down / Left / Right
//! ```
//!
//! Horizontal swipes that start inside the market card scroller belong to
//! that scroller, so they never classify. Vertical swipes are unaffected.
//!
//! Also here: the debounce window for accepted swipes and the tap tracker
//! that tells single taps from double taps. Both compare timestamps and
//! hold no timers.

use std::time::{Duration, Instant};

use crate::core::navigation::NavEvent;

pub const DEFAULT_OFFSET_THRESHOLD_PX: f64 = 50.0;
pub const DEFAULT_VELOCITY_THRESHOLD_PX_S: f64 = 500.0;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// State of a drag at the moment it was released.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSample {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Pixels per second.
    pub velocity_x: f64,
    pub velocity_y: f64,
}

impl DragSample {
    pub fn new(offset_x: f64, offset_y: f64, velocity_x: f64, velocity_y: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            velocity_x,
            velocity_y,
        }
    }
}

/// Where the drag started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureOrigin {
    #[default]
    Feed,
    /// Inside the horizontally scrolling market cards.
    MarketScroller,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The navigation a swipe in this direction performs.
    /// Vertical moves between stories, horizontal between categories.
    pub fn nav_event(&self) -> NavEvent {
        match self {
            Direction::Up => NavEvent::Advance,
            Direction::Down => NavEvent::Retreat,
            Direction::Left => NavEvent::NextCategory,
            Direction::Right => NavEvent::PrevCategory,
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Left => "←",
            Direction::Right => "→",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Direction::Up => "Swipe up for next",
            Direction::Down => "Swipe down for previous",
            Direction::Left => "Swipe left for next category",
            Direction::Right => "Swipe right for previous category",
        }
    }
}

/// Commit thresholds. A swipe commits when either is exceeded on its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThresholds {
    pub offset_px: f64,
    pub velocity_px_s: f64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            offset_px: DEFAULT_OFFSET_THRESHOLD_PX,
            velocity_px_s: DEFAULT_VELOCITY_THRESHOLD_PX_S,
        }
    }
}

/// Classify a released drag. Pure: same input, same answer.
pub fn classify(
    sample: &DragSample,
    origin: GestureOrigin,
    thresholds: &SwipeThresholds,
) -> Option<Direction> {
    if sample.offset_y.abs() > sample.offset_x.abs() {
        axis_direction(
            sample.offset_y,
            sample.velocity_y,
            thresholds,
            Direction::Down,
            Direction::Up,
        )
    } else if origin == GestureOrigin::MarketScroller {
        None
    } else {
        axis_direction(
            sample.offset_x,
            sample.velocity_x,
            thresholds,
            Direction::Right,
            Direction::Left,
        )
    }
}

/// Positive side is checked first, so a drag that overshoots one way but
/// flicks back the other resolves to the positive direction.
fn axis_direction(
    offset: f64,
    velocity: f64,
    thresholds: &SwipeThresholds,
    positive: Direction,
    negative: Direction,
) -> Option<Direction> {
    if offset > thresholds.offset_px || velocity > thresholds.velocity_px_s {
        Some(positive)
    } else if offset < -thresholds.offset_px || velocity < -thresholds.velocity_px_s {
        Some(negative)
    } else {
        None
    }
}

/// Drops swipes that land too soon after the last accepted one, so a single
/// continuous drag can't be processed twice.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// True if `now` is outside the window; records it as the last accepted time.
    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted
            && now.saturating_duration_since(last) < self.window
        {
            return false;
        }
        self.last_accepted = Some(now);
        true
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tap {
    Single,
    Double,
}

/// Pairs taps at the same spot into double taps.
#[derive(Debug, Clone)]
pub struct TapTracker {
    window: Duration,
    last: Option<(Instant, (u16, u16))>,
}

impl TapTracker {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn tap(&mut self, now: Instant, position: (u16, u16)) -> Tap {
        match self.last {
            Some((at, pos))
                if pos == position && now.saturating_duration_since(at) < self.window =>
            {
                self.last = None;
                Tap::Double
            }
            _ => {
                self.last = Some((now, position));
                Tap::Single
            }
        }
    }
}

impl Default for TapTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_WINDOW)
    }
}
