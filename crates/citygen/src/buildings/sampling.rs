//! Scan-grid sampling helpers.

use std::collections::VecDeque;

/// Regular grid of cell centers covering a disk of radius `extent`.
#[derive(Debug, Clone, Copy)]
pub struct ScanGrid {
    extent: f64,
    cells_per_axis: usize,
    step: f64,
}

impl ScanGrid {
    /// `resolution` is scan points per km along each axis.
    pub fn new(extent: f64, resolution: f64) -> Self {
        let cells_per_axis = ((2.0 * extent * resolution).ceil() as usize).max(1);
        Self {
            extent,
            cells_per_axis,
            step: 2.0 * extent / cells_per_axis as f64,
        }
    }

    pub fn cells_per_axis(&self) -> usize {
        self.cells_per_axis
    }

    /// Area of one scan cell in km².
    pub fn cell_area(&self) -> f64 {
        self.step * self.step
    }

    /// Cell centers inside the disk, row by row.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let n = self.cells_per_axis;
        let extent_sq = self.extent * self.extent;
        (0..n)
            .flat_map(move |i| (0..n).map(move |j| (i, j)))
            .map(move |(i, j)| {
                (
                    -self.extent + (i as f64 + 0.5) * self.step,
                    -self.extent + (j as f64 + 0.5) * self.step,
                )
            })
            .filter(move |(x, y)| x * x + y * y <= extent_sq)
    }
}

/// Minimum-separation check against only the most recent positions.
///
/// This is a sliding-window approximation: it keeps scan-order neighbors
/// apart but does not guarantee separation from positions that have left the
/// window.
#[derive(Debug, Clone)]
pub struct SeparationWindow {
    recent: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl SeparationWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn is_clear(&self, x: f64, y: f64, min_distance: f64) -> bool {
        let min_sq = min_distance * min_distance;
        self.recent.iter().all(|(ox, oy)| {
            let dx = x - ox;
            let dy = y - oy;
            dx * dx + dy * dy >= min_sq
        })
    }

    pub fn push(&mut self, x: f64, y: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back((x, y));
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }
}
