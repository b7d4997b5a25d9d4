//! `[loopCount, loop0VertexCount, x0, y0, x1, y1, …, loop1VertexCount, …]`
//!
//! The first loop is the boundary of a shape, subsequent loops are its holes.
//! The encoding is self-delimiting: its length follows from the counts it contains.

use crate::NestyError;
use crate::geometry::primitives::Point;

/// Upper bound on the number of loops of a single shape
pub const MAX_LOOPS: i64 = 1 << 16;

/// Upper bound on the number of vertices of a single loop
pub const MAX_LOOP_VERTICES: i64 = 1 << 24;

/// Walks the headers of an encoding and returns its total length in `i64`s.
///
/// `read(i)` returns the value at index `i`, or `None` if the encoding ends before it.
/// Every count is validated before it is used to compute the position of the next read,
/// so a malformed header never leads to reads beyond what the headers read so far describe.
pub fn encoded_len(read: impl Fn(usize) -> Option<i64>) -> crate::Result<usize> {
    let truncated = || NestyError::InvalidGeometry("truncated path encoding".to_string());

    let n_loops = read(0).ok_or_else(truncated)?;
    if !(1..=MAX_LOOPS).contains(&n_loops) {
        return Err(NestyError::InvalidGeometry(format!(
            "invalid loop count: {n_loops}"
        )));
    }

    let mut pos = 1;
    for i in 0..n_loops {
        let n_vertices = read(pos).ok_or_else(truncated)?;
        if !(0..=MAX_LOOP_VERTICES).contains(&n_vertices) {
            return Err(NestyError::InvalidGeometry(format!(
                "invalid vertex count of loop {i}: {n_vertices}"
            )));
        }
        pos += 1 + 2 * n_vertices as usize;
    }
    Ok(pos)
}

/// Decodes a complete encoding into its loops. Trailing values are rejected.
pub fn decode_paths(paths: &[i64]) -> crate::Result<Vec<Vec<Point>>> {
    let len = encoded_len(|i| paths.get(i).copied())?;
    match len.cmp(&paths.len()) {
        std::cmp::Ordering::Greater => {
            return Err(NestyError::InvalidGeometry(format!(
                "truncated path encoding: expected {len} values, got {}",
                paths.len()
            )));
        }
        std::cmp::Ordering::Less => {
            return Err(NestyError::InvalidGeometry(format!(
                "path encoding has {} trailing values",
                paths.len() - len
            )));
        }
        std::cmp::Ordering::Equal => {}
    }

    let n_loops = paths[0] as usize;
    let mut loops = Vec::with_capacity(n_loops);
    let mut pos = 1;
    for _ in 0..n_loops {
        let n_vertices = paths[pos] as usize;
        let coords = &paths[pos + 1..pos + 1 + 2 * n_vertices];
        loops.push(coords.chunks_exact(2).map(|c| Point(c[0], c[1])).collect());
        pos += 1 + 2 * n_vertices;
    }
    Ok(loops)
}

/// Inverse of [`decode_paths`]
pub fn encode_paths(loops: &[Vec<Point>]) -> Vec<i64> {
    let mut paths = vec![loops.len() as i64];
    for l in loops {
        paths.push(l.len() as i64);
        paths.extend(l.iter().flat_map(|p| [p.0, p.1]));
    }
    paths
}
