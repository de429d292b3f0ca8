//! Galaxy job orchestration for the AMR relay.
//!
//! Uploads sequence files into a Galaxy history, launches AMRFinderPlus with
//! fallback over candidate tool identifiers, and observes job and dataset
//! state. Every component talks to Galaxy through `amr_galaxy::GalaxyTransport`.

pub mod amr_workflow;
pub mod candidate_resolution;
pub mod galaxy_catalog;
pub mod remote_ids;
pub mod remote_state;
pub mod status_tracker;
pub mod tool_invocation;
pub mod upload_orchestrator;
pub mod workflow_error;

#[cfg(test)]
mod test_support;

pub use amr_workflow::{AmrWorkflow, WorkflowConfig};
pub use candidate_resolution::{resolve_ordered_candidates, CandidatesExhausted, ResolvedCandidate};
pub use galaxy_catalog::{GalaxyCatalog, DEFAULT_TOOL_SEARCH_QUERY};
pub use remote_state::RemoteState;
pub use status_tracker::{DatasetResult, JobStatus, StatusTracker};
pub use tool_invocation::{
    AmrFinderParameters, ToolInvocation, ToolInvocationResolver, AMRFINDERPLUS_TOOL_CANDIDATES,
    DEFAULT_ORGANISM,
};
pub use upload_orchestrator::{
    DatasetDescriptor, UploadConfig, UploadOrchestrator, UploadResponseShape, UploadedDataset,
    DEFAULT_HISTORY_NAME, DEFAULT_MAX_UPLOAD_BYTES,
};
pub use workflow_error::AmrWorkflowError;
