//! `[placementCount, (shapeId, instanceIndex, binDefId, binInstance, x, y, rotation, mirrored) × placementCount,
//! unplacedCount, shapeId × unplacedCount]`, all `i64`, `mirrored ∈ {0, 1}`.

use crate::NestyError;
use crate::entities::{Placement, Solution};

/// Number of `i64`s per encoded placement
pub const PLACEMENT_STRIDE: usize = 8;

/// Encodes a solution into a flat buffer.
pub fn encode_solution(solution: &Solution) -> Vec<i64> {
    let mut flat = Vec::with_capacity(
        2 + PLACEMENT_STRIDE * solution.placements.len() + solution.unplaced.len(),
    );
    flat.push(solution.placements.len() as i64);
    for p in &solution.placements {
        flat.extend([
            p.shape_id as i64,
            p.instance_index as i64,
            p.bin_def_id as i64,
            p.bin_instance as i64,
            p.x,
            p.y,
            p.rotation as i64,
            p.mirrored as i64,
        ]);
    }
    flat.push(solution.unplaced.len() as i64);
    flat.extend(solution.unplaced.iter().map(|id| *id as i64));
    flat
}

/// Total length of a buffer produced by [`encode_solution`], computed from its counts.
///
/// `read(i)` must return the value at index `i`; only the two count fields are read.
pub fn flat_len(read: impl Fn(usize) -> i64) -> usize {
    let n_placements = read(0).max(0) as usize;
    let unplaced_pos = 1 + PLACEMENT_STRIDE * n_placements;
    let n_unplaced = read(unplaced_pos).max(0) as usize;
    unplaced_pos + 1 + n_unplaced
}

/// Decodes a flat buffer back into a [`Solution`], rejecting truncated or inconsistent buffers.
pub fn decode_solution(flat: &[i64]) -> crate::Result<Solution> {
    let mut reader = FlatReader { flat, pos: 0 };

    let n_placements = reader.count("placement count")?;
    let mut placements = Vec::with_capacity(n_placements);
    for _ in 0..n_placements {
        let shape_id = reader.id("shape id")?;
        let instance_index = reader.count("instance index")?;
        let bin_def_id = reader.id("bin definition id")?;
        let bin_instance = reader.count("bin instance")?;
        let x = reader.next("x")?;
        let y = reader.next("y")?;
        let rotation = reader.next("rotation")?;
        if !(0..360).contains(&rotation) {
            return Err(NestyError::MalformedSolution(format!(
                "rotation out of range: {rotation}"
            )));
        }
        let mirrored = match reader.next("mirrored")? {
            0 => false,
            1 => true,
            v => {
                return Err(NestyError::MalformedSolution(format!(
                    "mirrored flag must be 0 or 1, got {v}"
                )));
            }
        };
        placements.push(Placement {
            shape_id,
            instance_index,
            bin_def_id,
            bin_instance,
            x,
            y,
            rotation: rotation as i32,
            mirrored,
        });
    }

    let n_unplaced = reader.count("unplaced count")?;
    let unplaced = (0..n_unplaced)
        .map(|_| reader.id("unplaced shape id"))
        .collect::<crate::Result<Vec<_>>>()?;

    if reader.pos != flat.len() {
        return Err(NestyError::MalformedSolution(format!(
            "{} trailing values",
            flat.len() - reader.pos
        )));
    }

    Ok(Solution {
        placements,
        unplaced,
    })
}

struct FlatReader<'a> {
    flat: &'a [i64],
    pos: usize,
}

impl FlatReader<'_> {
    fn next(&mut self, field: &str) -> crate::Result<i64> {
        let v = self.flat.get(self.pos).copied().ok_or_else(|| {
            NestyError::MalformedSolution(format!("truncated buffer, missing {field}"))
        })?;
        self.pos += 1;
        Ok(v)
    }

    fn count(&mut self, field: &str) -> crate::Result<usize> {
        let v = self.next(field)?;
        //a count can never exceed the number of values left in the buffer
        match usize::try_from(v) {
            Ok(c) if c <= self.flat.len() - self.pos => Ok(c),
            _ => Err(NestyError::MalformedSolution(format!(
                "invalid {field}: {v}"
            ))),
        }
    }

    fn id(&mut self, field: &str) -> crate::Result<i32> {
        let v = self.next(field)?;
        i32::try_from(v)
            .map_err(|_| NestyError::MalformedSolution(format!("{field} out of range: {v}")))
    }
}
