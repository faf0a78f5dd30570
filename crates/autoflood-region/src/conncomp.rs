//! Connected component analysis
//!
//! This module provides functions for finding and labeling connected components
//! in binary masks. Rows are scanned as runs of set pixels; runs that touch a
//! run of the previous row are merged with a Union-Find (disjoint set) data
//! structure, then provisional labels are flattened to `1..=n` in raster order
//! of first appearance.

use crate::error::RegionResult;
use autoflood_core::{Box, Mask};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// A connected component in a mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Unique label for this component (1-based)
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
}

impl ConnectedComponent {
    /// Create a new connected component
    pub fn new(label: u32, pixel_count: u32, bounds: Box) -> Self {
        Self {
            label,
            pixel_count,
            bounds,
        }
    }
}

/// Per-pixel component labels, 0 for background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    num_labels: usize,
}

impl LabelMap {
    /// Number of connected components (excluding background).
    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the raw labels slice.
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Label at `(x, y)`, `None` outside the map.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[y as usize * self.width as usize + x as usize])
    }

    /// Mask of the pixels carrying `label`
    pub fn component_mask(&self, label: u32) -> Mask {
        let w = self.width as usize;
        Mask::from_fn(self.width, self.height, |x, y| {
            label != 0 && self.labels[y as usize * w + x as usize] == label
        })
    }

    /// Pixel count and bounding box of every component, ordered by label.
    pub fn components(&self) -> Vec<ConnectedComponent> {
        let mut stats: Vec<Option<ConnectedComponent>> = vec![None; self.num_labels];
        let w = self.width as usize;
        for (i, &label) in self.labels.iter().enumerate() {
            if label == 0 {
                continue;
            }
            let (x, y) = ((i % w) as u32, (i / w) as u32);
            let cc = stats[(label - 1) as usize]
                .get_or_insert_with(|| ConnectedComponent::new(label, 0, Box::from_pixel(x, y)));
            cc.pixel_count += 1;
            cc.bounds.include_pixel(x, y);
        }
        stats.into_iter().flatten().collect()
    }
}

/// A horizontal run of set pixels.
#[derive(Debug, Clone, Copy)]
struct Run {
    start: u32, // inclusive
    end: u32,   // exclusive
    label: u32,
}

impl Run {
    /// Column range of the previous row that can touch this run.
    fn search_window(&self, connectivity: ConnectivityType) -> (u32, u32) {
        match connectivity {
            ConnectivityType::FourWay => (self.start, self.end),
            ConnectivityType::EightWay => (self.start.saturating_sub(1), self.end + 1),
        }
    }
}

fn runs_connected(prev: &Run, curr: &Run, connectivity: ConnectivityType) -> bool {
    match connectivity {
        ConnectivityType::FourWay => prev.start < curr.end && prev.end > curr.start,
        ConnectivityType::EightWay => prev.start < curr.end + 1 && prev.end + 1 > curr.start,
    }
}

fn extract_runs(row: &[bool], runs: &mut Vec<Run>) {
    let mut start = None;
    for (x, &set) in row.iter().enumerate() {
        match (set, start) {
            (true, None) => start = Some(x as u32),
            (false, Some(s)) => {
                runs.push(Run {
                    start: s,
                    end: x as u32,
                    label: 0,
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(Run {
            start: s,
            end: row.len() as u32,
            label: 0,
        });
    }
}

/// Union-find over provisional labels `1..`
#[derive(Debug)]
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        Self {
            parent: Vec::with_capacity(256),
        }
    }

    fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32 + 1;
        self.parent.push(label);
        label
    }

    /// Find root with path compression.
    fn find(&mut self, label: u32) -> u32 {
        let mut root = label;
        while self.parent[(root - 1) as usize] != root {
            root = self.parent[(root - 1) as usize];
        }
        let mut current = label;
        while current != root {
            let next = self.parent[(current - 1) as usize];
            self.parent[(current - 1) as usize] = root;
            current = next;
        }
        root
    }

    /// The smaller root wins, so a root is always the first-seen label of
    /// its set.
    fn union(&mut self, a: u32, b: u32) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            let (smaller, larger) = if root_a < root_b {
                (root_a, root_b)
            } else {
                (root_b, root_a)
            };
            self.parent[(larger - 1) as usize] = smaller;
        }
    }

    /// Rewrite provisional labels to sequential `1..=n`, returning `n`.
    fn flatten_labels(&mut self, labels: &mut [u32]) -> usize {
        let len = self.parent.len();
        let mut label_map = vec![0u32; len + 1];
        let mut num_labels = 0u32;

        for i in 1..=len as u32 {
            let root = self.find(i);
            if label_map[root as usize] == 0 {
                num_labels += 1;
                label_map[root as usize] = num_labels;
            }
            label_map[i as usize] = label_map[root as usize];
        }

        for l in labels.iter_mut().filter(|l| **l != 0) {
            *l = label_map[*l as usize];
        }

        num_labels as usize
    }
}

/// Label all connected components in a mask
///
/// Labels are 1-based and assigned in raster order of each component's
/// first pixel.
pub fn label_connected_components(
    mask: &Mask,
    connectivity: ConnectivityType,
) -> RegionResult<LabelMap> {
    let (width, height) = mask.dimensions();
    let w = width as usize;
    let mut labels = vec![0u32; w * height as usize];
    let mut uf = UnionFind::new();
    let mut prev_runs: Vec<Run> = Vec::new();
    let mut curr_runs: Vec<Run> = Vec::new();

    for (y, row) in mask.data().chunks(w.max(1)).enumerate() {
        curr_runs.clear();
        extract_runs(row, &mut curr_runs);

        let mut prev_idx = 0;
        for run in curr_runs.iter_mut() {
            let (search_start, search_end) = run.search_window(connectivity);
            while prev_idx < prev_runs.len() && prev_runs[prev_idx].end <= search_start {
                prev_idx += 1;
            }

            let mut assigned = None;
            let mut check_idx = prev_idx;
            while check_idx < prev_runs.len() && prev_runs[check_idx].start < search_end {
                let prev = &prev_runs[check_idx];
                if runs_connected(prev, run, connectivity) {
                    match assigned {
                        Some(label) if label != prev.label => uf.union(label, prev.label),
                        None => assigned = Some(prev.label),
                        _ => {}
                    }
                }
                check_idx += 1;
            }
            run.label = assigned.unwrap_or_else(|| uf.make_set());

            let row_start = y * w;
            labels[row_start + run.start as usize..row_start + run.end as usize].fill(run.label);
        }

        std::mem::swap(&mut prev_runs, &mut curr_runs);
    }

    let num_labels = uf.flatten_labels(&mut labels);
    Ok(LabelMap {
        width,
        height,
        labels,
        num_labels,
    })
}

/// Find all connected components in a mask
///
/// Returns a vector of connected components ordered by label, each with a
/// pixel count and bounding box.
pub fn find_connected_components(
    mask: &Mask,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    Ok(label_connected_components(mask, connectivity)?.components())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> Mask {
        let h = rows.len() as u32;
        let w = rows.first().map_or(0, |r| r.len()) as u32;
        Mask::from_fn(w, h, |x, y| rows[y as usize].as_bytes()[x as usize] == b'#')
    }

    #[test]
    fn test_empty_mask() {
        let ccs = find_connected_components(&Mask::new(5, 5), ConnectivityType::FourWay).unwrap();
        assert!(ccs.is_empty());
        let ccs = find_connected_components(&Mask::new(0, 0), ConnectivityType::FourWay).unwrap();
        assert!(ccs.is_empty());
    }

    #[test]
    fn test_diagonal_connectivity() {
        let mask = mask_from_rows(&["#..", ".#.", "..#"]);
        let four = find_connected_components(&mask, ConnectivityType::FourWay).unwrap();
        let eight = find_connected_components(&mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(four.len(), 3);
        assert_eq!(eight.len(), 1);
        assert_eq!(eight[0].pixel_count, 3);
        assert_eq!(eight[0].bounds, Box::new(0, 0, 3, 3).unwrap());
    }

    #[test]
    fn test_u_shape_merges() {
        // Two arms that only join on the last row
        let mask = mask_from_rows(&["#...#", "#...#", "#####"]);
        let map = label_connected_components(&mask, ConnectivityType::FourWay).unwrap();
        assert_eq!(map.num_labels(), 1);
        assert_eq!(map.get(4, 0), Some(1));
        assert_eq!(map.get(2, 1), Some(0));
        assert_eq!(map.get(5, 0), None);
    }

    #[test]
    fn test_labels_in_raster_order() {
        let mask = mask_from_rows(&["..#..", "#....", "....#"]);
        let ccs = find_connected_components(&mask, ConnectivityType::FourWay).unwrap();
        let labels: Vec<_> = ccs
            .iter()
            .map(|c| (c.label, c.bounds.x, c.bounds.y))
            .collect();
        assert_eq!(labels, vec![(1, 2, 0), (2, 0, 1), (3, 4, 2)]);
    }

    #[test]
    fn test_component_mask() {
        let mask = mask_from_rows(&["##..#", "##..#"]);
        let map = label_connected_components(&mask, ConnectivityType::FourWay).unwrap();
        let second = map.component_mask(2);
        assert_eq!(second.count(), 2);
        assert!(second.is_set(4, 0));
        assert!(second.is_subset_of(&mask));
        assert_eq!(map.component_mask(0).count(), 0);
    }
}
