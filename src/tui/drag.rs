//! # Drag Tracking
//!
//! Terminals report mouse drags as a stream of cell positions. This turns
//! one press → drag → release sequence into the pixel-space `DragSample`
//! the gesture interpreter expects.
//!
//! - offset: (release cell − press cell) × cell size in px
//! - velocity: displacement over the last 100 ms before release, in px/s
//!
//! A release at the press cell with no movement in between is a tap.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::core::gesture::{DragSample, GestureOrigin};

/// Samples older than this (relative to release) don't count toward velocity.
pub const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerRelease {
    Tap { col: u16, row: u16 },
    Drag { sample: DragSample, origin: GestureOrigin },
}

#[derive(Debug, Clone, Copy)]
struct Point {
    at: Instant,
    col: u16,
    row: u16,
}

struct ActiveDrag {
    origin: GestureOrigin,
    start: Point,
    moved: bool,
    recent: VecDeque<Point>,
}

pub struct DragTracker {
    cell_width_px: f64,
    cell_height_px: f64,
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new(cell_width_px: f64, cell_height_px: f64) -> Self {
        Self {
            cell_width_px,
            cell_height_px,
            active: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.as_ref().is_some_and(|d| d.moved)
    }

    pub fn press(&mut self, col: u16, row: u16, at: Instant, origin: GestureOrigin) {
        let start = Point { at, col, row };
        self.active = Some(ActiveDrag {
            origin,
            start,
            moved: false,
            recent: VecDeque::from([start]),
        });
    }

    pub fn moved(&mut self, col: u16, row: u16, at: Instant) {
        let Some(drag) = self.active.as_mut() else {
            return;
        };
        if (col, row) != (drag.start.col, drag.start.row) {
            drag.moved = true;
        }
        drag.recent.push_back(Point { at, col, row });
        while let Some(front) = drag.recent.front()
            && at.saturating_duration_since(front.at) > VELOCITY_WINDOW
            && drag.recent.len() > 1
        {
            drag.recent.pop_front();
        }
    }

    /// Finish the sequence. None if no press was seen.
    pub fn release(&mut self, col: u16, row: u16, at: Instant) -> Option<PointerRelease> {
        let drag = self.active.take()?;
        let end = Point { at, col, row };
        if !drag.moved && (col, row) == (drag.start.col, drag.start.row) {
            return Some(PointerRelease::Tap { col, row });
        }

        let offset_x = self.px_x(drag.start.col, end.col);
        let offset_y = self.px_y(drag.start.row, end.row);

        // Earliest point still inside the window before release.
        let anchor = drag
            .recent
            .iter()
            .find(|p| at.saturating_duration_since(p.at) <= VELOCITY_WINDOW)
            .copied()
            .unwrap_or(end);
        let elapsed = at.saturating_duration_since(anchor.at).as_secs_f64();
        let (velocity_x, velocity_y) = if elapsed > 0.0 {
            (
                self.px_x(anchor.col, end.col) / elapsed,
                self.px_y(anchor.row, end.row) / elapsed,
            )
        } else {
            (0.0, 0.0)
        };

        Some(PointerRelease::Drag {
            sample: DragSample::new(offset_x, offset_y, velocity_x, velocity_y),
            origin: drag.origin,
        })
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    fn px_x(&self, from: u16, to: u16) -> f64 {
        (f64::from(to) - f64::from(from)) * self.cell_width_px
    }

    fn px_y(&self, from: u16, to: u16) -> f64 {
        (f64::from(to) - f64::from(from)) * self.cell_height_px
    }
}
