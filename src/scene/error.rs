use thiserror::Error;

use super::builder::BuildStage;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("asset has no `{0}` node")]
    MissingPart(&'static str),

    #[error("asset node `{0}` has no triangle geometry")]
    EmptyPart(&'static str),

    #[error("scene cannot go from {from} to {to}")]
    InvalidTransition { from: BuildStage, to: BuildStage },
}
