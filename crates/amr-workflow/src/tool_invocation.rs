//! AMRFinderPlus job submission with fallback over candidate tool identifiers.

use std::sync::Arc;

use amr_galaxy::{GalaxyRequest, GalaxyTransport};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::candidate_resolution::{resolve_ordered_candidates, CandidatesExhausted};
use crate::AmrWorkflowError;

pub const DEFAULT_ORGANISM: &str = "Bacteria";

/// Tool identifiers tried in order; the toolshed path and version differ between deployments.
pub const AMRFINDERPLUS_TOOL_CANDIDATES: [&str; 4] = [
    "toolshed.g2.bx.psu.edu/repos/iuc/amrfinderplus/amrfinderplus/3.11.26+galaxy0",
    "toolshed.g2.bx.psu.edu/repos/iuc/amrfinderplus/amrfinderplus/3.11.4+galaxy0",
    "amrfinderplus",
    "toolshed.g2.bx.psu.edu/repos/iuc/amrfinderplus/amrfinderplus",
];

const NUCLEOTIDE_INPUT: &str = "nucleotide_input";
const HISTORY_DATASET_SOURCE: &str = "hda";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Tool parameters sent with every AMRFinderPlus submission.
pub struct AmrFinderParameters {
    pub organism: String,
    pub report_all_equal: bool,
    pub plus: bool,
    pub name: bool,
}

impl AmrFinderParameters {
    /// Lower-cases the organism; a blank organism falls back to `Bacteria`.
    pub fn for_organism(organism: &str) -> Self {
        let organism = match organism.trim() {
            "" => DEFAULT_ORGANISM,
            trimmed => trimmed,
        };
        Self {
            organism: organism.to_lowercase(),
            report_all_equal: true,
            plus: true,
            name: true,
        }
    }

    fn to_inputs(&self, dataset_id: &str) -> Value {
        let mut inputs = Map::new();
        inputs.insert(
            NUCLEOTIDE_INPUT.to_string(),
            json!({ "src": HISTORY_DATASET_SOURCE, "id": dataset_id }),
        );
        inputs.insert("organism".to_string(), json!(self.organism));
        inputs.insert("report_all_equal".to_string(), json!(self.report_all_equal));
        inputs.insert("plus".to_string(), json!(self.plus));
        inputs.insert("name".to_string(), json!(self.name));
        Value::Object(inputs)
    }
}

/// Builds the `POST /tools` payload for one candidate.
pub fn build_tool_invocation_payload(
    tool_id: &str,
    dataset_id: &str,
    history_id: Option<&str>,
    parameters: &AmrFinderParameters,
) -> Value {
    let mut payload = json!({
        "tool_id": tool_id,
        "inputs": parameters.to_inputs(dataset_id),
    });
    if let Some(history_id) = history_id {
        payload["history_id"] = Value::String(history_id.to_string());
    }
    payload
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// An accepted submission.
pub struct ToolInvocation {
    pub job_id: String,
    pub tool_id: String,
    pub attempts: usize,
    pub job_info: Value,
}

#[derive(Clone)]
/// Submits AMRFinderPlus jobs, trying each configured tool id until Galaxy accepts one.
pub struct ToolInvocationResolver {
    transport: Arc<dyn GalaxyTransport>,
    candidates: Vec<String>,
}

impl ToolInvocationResolver {
    pub fn new(transport: Arc<dyn GalaxyTransport>) -> Self {
        Self::with_candidates(
            transport,
            AMRFINDERPLUS_TOOL_CANDIDATES
                .iter()
                .map(|candidate| candidate.to_string())
                .collect(),
        )
    }

    pub fn with_candidates(transport: Arc<dyn GalaxyTransport>, candidates: Vec<String>) -> Self {
        Self {
            transport,
            candidates,
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub async fn invoke(
        &self,
        dataset_id: &str,
        organism: &str,
        history_id: Option<&str>,
    ) -> Result<ToolInvocation, AmrWorkflowError> {
        let dataset_id = dataset_id.trim();
        if dataset_id.is_empty() {
            return Err(AmrWorkflowError::validation("dataset_id is required"));
        }
        if self.candidates.is_empty() {
            return Err(AmrWorkflowError::validation(
                "no amrfinder tool candidates are configured",
            ));
        }
        let history_id = history_id.map(str::trim).filter(|id| !id.is_empty());
        let parameters = AmrFinderParameters::for_organism(organism);
        tracing::info!(
            dataset_id,
            organism = parameters.organism.as_str(),
            history_id = history_id.unwrap_or("<current>"),
            "submitting amrfinder job"
        );

        let transport = self.transport.as_ref();
        let resolution = resolve_ordered_candidates(&self.candidates, |index, tool_id: &String| {
            let request = GalaxyRequest::post(
                "/tools",
                build_tool_invocation_payload(tool_id, dataset_id, history_id, &parameters),
            );
            let tool_id = tool_id.clone();
            async move {
                tracing::debug!(
                    tool_id = tool_id.as_str(),
                    attempt = index + 1,
                    "trying amrfinder tool candidate"
                );
                transport.call(request).await.inspect_err(|error| {
                    tracing::warn!(
                        tool_id = tool_id.as_str(),
                        attempt = index + 1,
                        error = %error,
                        "amrfinder tool candidate rejected"
                    );
                })
            }
        })
        .await;

        let resolved = match resolution {
            Ok(resolved) => resolved,
            Err(CandidatesExhausted {
                attempts,
                last_error: Some(last_error),
            }) => {
                return Err(AmrWorkflowError::AllToolCandidatesFailed {
                    attempts,
                    last_error,
                });
            }
            Err(CandidatesExhausted {
                last_error: None, ..
            }) => {
                return Err(AmrWorkflowError::validation(
                    "no amrfinder tool candidates are configured",
                ));
            }
        };

        let attempts = resolved.attempts();
        let tool_id = self.candidates[resolved.index].clone();
        let job_info = resolved.value.into_json();
        let job_id = first_job_id(&job_info, &tool_id)?;
        tracing::info!(
            job_id = job_id.as_str(),
            tool_id = tool_id.as_str(),
            attempts,
            "amrfinder job submitted"
        );
        Ok(ToolInvocation {
            job_id,
            tool_id,
            attempts,
            job_info,
        })
    }
}

fn first_job_id(job_info: &Value, tool_id: &str) -> Result<String, AmrWorkflowError> {
    let Some(first_job) = job_info
        .get("jobs")
        .and_then(Value::as_array)
        .and_then(|jobs| jobs.first())
    else {
        return Err(AmrWorkflowError::EmptyJobList {
            tool_id: tool_id.to_string(),
        });
    };
    first_job
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| AmrWorkflowError::unexpected("tool invocation", "first job has no id"))
}
