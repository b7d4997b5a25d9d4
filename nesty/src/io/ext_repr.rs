use serde::{Deserialize, Serialize};

use crate::entities::{BinType, Placement, SolutionStats};

/// External representation of a nesting job: a catalogue together with its session-wide parameters.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtCatalogue {
    /// The name of the job
    pub name: String,
    /// Minimum gap between any two placed shapes
    #[serde(default)]
    pub spacing: i64,
    /// Margin removed from every bin edge
    #[serde(default)]
    pub trimming: i64,
    pub bins: Vec<ExtBin>,
    pub shapes: Vec<ExtShape>,
}

/// External representation of a [`BinDef`](crate::entities::BinDef).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtBin {
    pub id: i32,
    pub count: i32,
    pub length: i64,
    pub width: i64,
    #[serde(rename = "type", default = "default_bin_type")]
    pub bin_type: BinType,
}

fn default_bin_type() -> BinType {
    BinType::Rectangle
}

/// External representation of a [`ShapeDef`](crate::entities::ShapeDef).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtShape {
    pub id: i32,
    pub count: i32,
    /// Closed loops, the first one is the boundary, the others are holes
    pub paths: Vec<ExtLoop>,
}

/// A closed loop of vertices, the closing vertex may be repeated.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtLoop(pub Vec<(i64, i64)>);

/// External representation of a [`Solution`](crate::entities::Solution)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSolution {
    /// Placements grouped per opened bin instance
    pub layouts: Vec<ExtLayout>,
    /// One shape id per instance that could not be placed
    pub unplaced: Vec<i32>,
    pub stats: SolutionStats,
    /// Time taken to compute the solution, in milliseconds
    pub run_time_ms: u64,
}

/// One opened bin instance and the shapes placed on it
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtLayout {
    pub bin_def_id: i32,
    pub bin_instance: usize,
    pub placements: Vec<Placement>,
    /// Placed shape area divided by bin area
    pub density: f64,
}
