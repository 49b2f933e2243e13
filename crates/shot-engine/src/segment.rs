//! Trajectory segmentation.
//!
//! Scans an ordered position stream for candidate shot windows. The scan
//! is a lazy iterator over an immutable slice: its cursor lives in the
//! iterator, so calling [`TrajectorySegmenter::scan`] again on the same
//! positions replays the exact same sequence of windows.
//!
//! # Algorithm
//!
//! 1. Take up to `max_len` positions starting at the cursor.
//! 2. Stop once fewer than `min_len` positions remain.
//! 3. Ask the attempt detector about the window.
//! 4. On acceptance, jump past the whole window (attempts never overlap);
//!    on rejection, advance by exactly one position.

use std::iter::FusedIterator;
use std::ops::Deref;

use courtvision_model::position::{FrameIndex, Position};

use crate::attempt::{AttemptDecision, ShotAttemptDetector};

/// A contiguous run of positions under evaluation as a shot attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotWindow<'a> {
    positions: &'a [Position],
    start_index: usize,
}

impl<'a> ShotWindow<'a> {
    pub fn new(positions: &'a [Position], start_index: usize) -> Self {
        Self {
            positions,
            start_index,
        }
    }

    /// Index of the first position within the scanned stream.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn frame_start(&self) -> Option<FrameIndex> {
        self.positions.first().map(|p| p.frame)
    }

    pub fn frame_end(&self) -> Option<FrameIndex> {
        self.positions.last().map(|p| p.frame)
    }
}

impl Deref for ShotWindow<'_> {
    type Target = [Position];

    fn deref(&self) -> &Self::Target {
        self.positions
    }
}

/// One step of a segmentation scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScannedWindow<'a> {
    pub window: ShotWindow<'a>,
    pub decision: AttemptDecision,
    /// Scan cursor after this step: positions consumed so far.
    pub cursor: usize,
}

/// Produces candidate shot windows from a position stream.
#[derive(Debug, Clone, Copy)]
pub struct TrajectorySegmenter {
    min_len: usize,
    max_len: usize,
}

impl TrajectorySegmenter {
    pub fn new(min_len: usize, max_len: usize) -> Self {
        let min_len = min_len.max(1);
        Self {
            min_len,
            max_len: max_len.max(min_len),
        }
    }

    /// Lazily scan `positions`, consulting `detector` for each window.
    pub fn scan<'a>(
        &self,
        positions: &'a [Position],
        detector: &'a ShotAttemptDetector,
    ) -> WindowScan<'a> {
        WindowScan {
            positions,
            detector,
            cursor: 0,
            min_len: self.min_len,
            max_len: self.max_len,
        }
    }
}

/// Iterator returned by [`TrajectorySegmenter::scan`].
#[derive(Debug, Clone)]
pub struct WindowScan<'a> {
    positions: &'a [Position],
    detector: &'a ShotAttemptDetector,
    cursor: usize,
    min_len: usize,
    max_len: usize,
}

impl<'a> WindowScan<'a> {
    /// Accepted windows only.
    pub fn accepted(self) -> impl Iterator<Item = ShotWindow<'a>> {
        self.filter(|step| step.decision.is_accepted())
            .map(|step| step.window)
    }
}

impl<'a> Iterator for WindowScan<'a> {
    type Item = ScannedWindow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.positions.len().saturating_sub(self.cursor);
        if remaining < self.min_len {
            return None;
        }

        let end = self.cursor + remaining.min(self.max_len);
        let window = ShotWindow::new(&self.positions[self.cursor..end], self.cursor);
        let decision = self.detector.evaluate(&window);

        self.cursor += if decision.is_accepted() {
            window.len()
        } else {
            1
        };

        Some(ScannedWindow {
            window,
            decision,
            cursor: self.cursor,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.positions.len().saturating_sub(self.cursor);
        if remaining < self.min_len {
            return (0, Some(0));
        }
        let candidates = remaining - self.min_len + 1;
        (candidates.div_ceil(self.max_len), Some(candidates))
    }
}

impl FusedIterator for WindowScan<'_> {}
