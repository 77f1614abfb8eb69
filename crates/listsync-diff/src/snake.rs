//! Shortest-edit-script search (Myers, linear space).
//!
//! Finds the diagonals (runs of identity-matched pairs) between the old and
//! new sequences. Each range is split at its middle snake, found by searching
//! forward from the top-left and backward from the bottom-right corner at the
//! same time. Sub-ranges go onto an explicit work-list instead of the call
//! stack, so deep edit scripts cannot overflow it.
//!
//! Coordinates are `isize` inside the search: diagonals are numbered
//! `k = x - y` and go negative.

use crate::callback::{same_item, DiffCallback};
use crate::error::Result;

/// A run of `size` identity-matched pairs starting at old `x`, new `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Diagonal {
    pub x: usize,
    pub y: usize,
    pub size: usize,
}

impl Diagonal {
    pub fn new(x: usize, y: usize, size: usize) -> Self {
        Self { x, y, size }
    }

    pub fn end_x(&self) -> usize {
        self.x + self.size
    }

    pub fn end_y(&self) -> usize {
        self.y + self.size
    }
}

/// Half-open old/new ranges still to be searched.
#[derive(Clone, Copy, Debug)]
struct Range {
    old_start: isize,
    old_end: isize,
    new_start: isize,
    new_end: isize,
}

impl Range {
    fn old_size(&self) -> isize {
        self.old_end - self.old_start
    }

    fn new_size(&self) -> isize {
        self.new_end - self.new_start
    }
}

/// A middle snake: at most one edit step followed (or, when `reverse`,
/// preceded) by a diagonal run.
#[derive(Clone, Copy, Debug)]
struct Snake {
    start_x: isize,
    start_y: isize,
    end_x: isize,
    end_y: isize,
    reverse: bool,
}

impl Snake {
    fn diagonal_size(&self) -> isize {
        (self.end_x - self.start_x).min(self.end_y - self.start_y)
    }

    fn has_edit(&self) -> bool {
        self.end_y - self.start_y != self.end_x - self.start_x
    }

    fn is_insertion(&self) -> bool {
        self.end_y - self.start_y > self.end_x - self.start_x
    }

    fn to_diagonal(self) -> Diagonal {
        let size = self.diagonal_size() as usize;
        let (x, y) = if !self.has_edit() || self.reverse {
            (self.start_x, self.start_y)
        } else if self.is_insertion() {
            (self.start_x, self.start_y + 1)
        } else {
            (self.start_x + 1, self.start_y)
        };
        Diagonal::new(x as usize, y as usize, size)
    }
}

/// Furthest-reaching x per diagonal, indexable by negative `k`.
struct CenteredArray {
    data: Vec<isize>,
    mid: isize,
}

impl CenteredArray {
    fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
            mid: (size / 2) as isize,
        }
    }

    fn get(&self, k: isize) -> isize {
        self.data[(k + self.mid) as usize]
    }

    fn set(&mut self, k: isize, value: isize) {
        self.data[(k + self.mid) as usize] = value;
    }
}

/// Compute every diagonal between `0..old_size` and `0..new_size`, sorted by
/// old index.
///
/// Callers must have checked that `old_size + new_size` fits in an `isize`.
pub(crate) fn find_diagonals<C: DiffCallback + ?Sized>(
    old_size: usize,
    new_size: usize,
    cb: &C,
) -> Result<Vec<Diagonal>> {
    let max = (old_size + new_size + 1) / 2;
    let mut forward = CenteredArray::new(max * 2 + 1);
    let mut backward = CenteredArray::new(max * 2 + 1);

    let mut diagonals = Vec::new();
    let mut work = vec![Range {
        old_start: 0,
        old_end: old_size as isize,
        new_start: 0,
        new_end: new_size as isize,
    }];

    while let Some(range) = work.pop() {
        let Some(snake) = mid_point(&range, cb, &mut forward, &mut backward)? else {
            continue;
        };
        if snake.diagonal_size() > 0 {
            diagonals.push(snake.to_diagonal());
        }
        work.push(Range {
            old_end: snake.start_x,
            new_end: snake.start_y,
            ..range
        });
        work.push(Range {
            old_start: snake.end_x,
            new_start: snake.end_y,
            ..range
        });
    }

    diagonals.sort_by_key(|d| d.x);
    Ok(diagonals)
}

fn mid_point<C: DiffCallback + ?Sized>(
    range: &Range,
    cb: &C,
    forward: &mut CenteredArray,
    backward: &mut CenteredArray,
) -> Result<Option<Snake>> {
    if range.old_size() < 1 || range.new_size() < 1 {
        return Ok(None);
    }
    let max = (range.old_size() + range.new_size() + 1) / 2;
    forward.set(1, range.old_start);
    backward.set(1, range.old_end);
    for d in 0..max {
        if let Some(snake) = search_forward(range, cb, forward, backward, d)? {
            return Ok(Some(snake));
        }
        if let Some(snake) = search_backward(range, cb, forward, backward, d)? {
            return Ok(Some(snake));
        }
    }
    Ok(None)
}

fn search_forward<C: DiffCallback + ?Sized>(
    range: &Range,
    cb: &C,
    forward: &mut CenteredArray,
    backward: &CenteredArray,
    d: isize,
) -> Result<Option<Snake>> {
    let delta = range.old_size() - range.new_size();
    // Paths can only overlap on an odd delta while searching forward.
    let check = delta.rem_euclid(2) == 1;

    let mut k = -d;
    while k <= d {
        // Step down (insertion) from k + 1, or right (removal) from k - 1.
        let (start_x, mut x) = if k == -d || (k != d && forward.get(k + 1) > forward.get(k - 1)) {
            let x = forward.get(k + 1);
            (x, x)
        } else {
            let x = forward.get(k - 1);
            (x, x + 1)
        };
        let mut y = range.new_start + (x - range.old_start) - k;
        let start_y = if d == 0 || x != start_x { y } else { y - 1 };

        while x < range.old_end && y < range.new_end && same_item(cb, x as usize, y as usize)? {
            x += 1;
            y += 1;
        }
        forward.set(k, x);

        if check {
            let backward_k = delta - k;
            if backward_k >= -d + 1 && backward_k <= d - 1 && backward.get(backward_k) <= x {
                return Ok(Some(Snake {
                    start_x,
                    start_y,
                    end_x: x,
                    end_y: y,
                    reverse: false,
                }));
            }
        }
        k += 2;
    }
    Ok(None)
}

fn search_backward<C: DiffCallback + ?Sized>(
    range: &Range,
    cb: &C,
    forward: &CenteredArray,
    backward: &mut CenteredArray,
    d: isize,
) -> Result<Option<Snake>> {
    let delta = range.old_size() - range.new_size();
    let check = delta.rem_euclid(2) == 0;

    let mut k = -d;
    while k <= d {
        let (start_x, mut x) = if k == -d || (k != d && backward.get(k + 1) < backward.get(k - 1)) {
            let x = backward.get(k + 1);
            (x, x)
        } else {
            let x = backward.get(k - 1);
            (x, x - 1)
        };
        let mut y = range.new_end - ((range.old_end - x) - k);
        let start_y = if d == 0 || x != start_x { y } else { y + 1 };

        while x > range.old_start
            && y > range.new_start
            && same_item(cb, (x - 1) as usize, (y - 1) as usize)?
        {
            x -= 1;
            y -= 1;
        }
        backward.set(k, x);

        if check {
            let forward_k = delta - k;
            if forward_k >= -d && forward_k <= d && forward.get(forward_k) >= x {
                return Ok(Some(Snake {
                    start_x: x,
                    start_y: y,
                    end_x: start_x,
                    end_y: start_y,
                    reverse: true,
                }));
            }
        }
        k += 2;
    }
    Ok(None)
}
