//! A* point-to-point planner.
//!
//! Nodes are allocated in a growable arena indexed by integer; the parent
//! link is stored as an optional index rather than a pointer, so the
//! parent chain cannot become cyclic (g-cost strictly increases along it).

use crate::grid::Grid;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

struct ArenaNode {
    x: i32,
    y: i32,
    g_cost: f64,
    parent: Option<usize>,
}

#[derive(Copy, Clone, PartialEq)]
struct OpenEntry {
    f_cost: f64,
    index: usize,
    order: usize,
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap on f_cost; ties break on insertion order
        // so iteration is deterministic given a fixed insertion sequence.
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn manhattan(x0: i32, y0: i32, x1: i32, y1: i32) -> f64 {
    ((x0 - x1).abs() + (y0 - y1).abs()) as f64
}

/// Find a shortest path from `start` to `goal` on `grid`, treating
/// {free, dock} cells as traversable. `None` if unreachable, if either
/// endpoint is non-traversable, or if start == goal and non-traversable.
pub fn find_path(grid: &Grid, start: (i32, i32), goal: (i32, i32), allow_diagonal: bool) -> Option<Vec<(i32, i32)>> {
    if !grid.is_valid_position(start.0, start.1) || !grid.is_valid_position(goal.0, goal.1) {
        return None;
    }

    if start == goal {
        return Some(vec![start]);
    }

    let mut arena: Vec<ArenaNode> = Vec::new();
    let mut index_of: HashMap<(i32, i32), usize> = HashMap::new();
    let mut open = BinaryHeap::new();
    let mut closed: HashMap<(i32, i32), bool> = HashMap::new();
    let mut order = 0usize;

    arena.push(ArenaNode {
        x: start.0,
        y: start.1,
        g_cost: 0.0,
        parent: None,
    });
    index_of.insert(start, 0);
    open.push(OpenEntry {
        f_cost: manhattan(start.0, start.1, goal.0, goal.1),
        index: 0,
        order,
    });

    while let Some(current) = open.pop() {
        let (cx, cy, cg) = {
            let node = &arena[current.index];
            (node.x, node.y, node.g_cost)
        };

        if (cx, cy) == goal {
            return Some(reconstruct(&arena, current.index));
        }

        if *closed.get(&(cx, cy)).unwrap_or(&false) {
            continue;
        }
        closed.insert((cx, cy), true);

        for (nx, ny, cost) in neighbors(grid, cx, cy, allow_diagonal) {
            if *closed.get(&(nx, ny)).unwrap_or(&false) {
                continue;
            }

            let tentative_g = cg + cost;

            let better = match index_of.get(&(nx, ny)) {
                Some(&idx) => tentative_g < arena[idx].g_cost,
                None => true,
            };

            if better {
                let idx = match index_of.get(&(nx, ny)) {
                    Some(&idx) => {
                        arena[idx].g_cost = tentative_g;
                        arena[idx].parent = Some(current.index);
                        idx
                    }
                    None => {
                        arena.push(ArenaNode {
                            x: nx,
                            y: ny,
                            g_cost: tentative_g,
                            parent: Some(current.index),
                        });
                        let idx = arena.len() - 1;
                        index_of.insert((nx, ny), idx);
                        idx
                    }
                };

                order += 1;
                open.push(OpenEntry {
                    f_cost: tentative_g + manhattan(nx, ny, goal.0, goal.1),
                    index: idx,
                    order,
                });
            }
        }
    }

    None
}

/// Total Euclidean length of a path (sum of step distances).
pub fn path_length(path: &[(i32, i32)]) -> f64 {
    path.windows(2)
        .map(|w| {
            let (x0, y0) = w[0];
            let (x1, y1) = w[1];
            (((x1 - x0).pow(2) + (y1 - y0).pow(2)) as f64).sqrt()
        })
        .sum()
}

fn neighbors(grid: &Grid, x: i32, y: i32, allow_diagonal: bool) -> Vec<(i32, i32, f64)> {
    let mut result = Vec::new();

    let cardinal = [(0, -1), (0, 1), (-1, 0), (1, 0)];
    for (dx, dy) in cardinal {
        let (nx, ny) = (x + dx, y + dy);
        if grid.is_valid_position(nx, ny) {
            result.push((nx, ny, 1.0));
        }
    }

    if allow_diagonal {
        let diagonal = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
        for (dx, dy) in diagonal {
            let (nx, ny) = (x + dx, y + dy);
            // No corner-cutting: both orthogonal neighbors must also be
            // traversable.
            if grid.is_valid_position(nx, ny)
                && grid.is_valid_position(x + dx, y)
                && grid.is_valid_position(x, y + dy)
            {
                result.push((nx, ny, std::f64::consts::SQRT_2));
            }
        }
    }

    result
}

fn reconstruct(arena: &[ArenaNode], mut index: usize) -> Vec<(i32, i32)> {
    let mut path = Vec::new();
    loop {
        let node = &arena[index];
        path.push((node.x, node.y));
        match node.parent {
            Some(parent) => index = parent,
            None => break,
        }
    }
    path.reverse();
    path
}
