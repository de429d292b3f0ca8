//! Route paths and limits for the AMR relay.

pub(super) const HEALTH_ENDPOINT: &str = "/health";
pub(super) const TEST_GALAXY_ENDPOINT: &str = "/api/test-galaxy";
pub(super) const UPLOAD_ENDPOINT: &str = "/api/upload";
pub(super) const RUN_AMRFINDER_ENDPOINT: &str = "/api/run-amrfinder";
pub(super) const JOB_STATUS_ENDPOINT: &str = "/api/job-status/{job_id}";
pub(super) const DATASET_ENDPOINT: &str = "/api/dataset/{dataset_id}";
pub(super) const HISTORIES_ENDPOINT: &str = "/api/histories";
pub(super) const TOOLS_SEARCH_ENDPOINT: &str = "/api/tools/search";
pub(super) const TOOL_DETAIL_ENDPOINT: &str = "/api/tools/{*tool_id}";
pub(super) const UPLOAD_FILE_FIELD: &str = "file";
pub(super) const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
