use serde::{Deserialize, Serialize};

use nesty::io::ext_repr::{ExtCatalogue, ExtSolution};

use crate::config::BLFConfig;

/// Everything written to the solution file: the job, its solution and the config used to produce it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BLFOutput {
    #[serde(flatten)]
    pub instance: ExtCatalogue,
    pub solution: ExtSolution,
    pub config: BLFConfig,
}
