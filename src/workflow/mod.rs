mod controller;
mod state;

pub use controller::{WorkflowController, WorkflowSnapshot};
pub use state::{WorkflowStage, WorkflowState};
