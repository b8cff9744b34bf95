use std::fmt;

use serde::Serialize;

/// States of the publication workflow. `Failed` is reachable from every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkflowState {
    CheckFork,
    CreateForkIfMissing,
    WaitForForkReady,
    CreateBranch,
    CommitFile,
    OpenPR,
    Done,
    Failed,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::CheckFork => "CheckFork",
            WorkflowState::CreateForkIfMissing => "CreateForkIfMissing",
            WorkflowState::WaitForForkReady => "WaitForForkReady",
            WorkflowState::CreateBranch => "CreateBranch",
            WorkflowState::CommitFile => "CommitFile",
            WorkflowState::OpenPR => "OpenPR",
            WorkflowState::Done => "Done",
            WorkflowState::Failed => "Failed",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
