use flowlay::io::ext_repr::{ExtInstance, ExtSolution};
use serde::{Deserialize, Serialize};

use crate::config::GsaConfig;

#[derive(Serialize, Deserialize, Clone)]
pub struct FlowOutput {
    #[serde(flatten)]
    pub instance: ExtInstance,
    /// The initial layout, evaluated
    pub initial: ExtSolution,
    pub solution: ExtSolution,
    pub config: GsaConfig,
}
