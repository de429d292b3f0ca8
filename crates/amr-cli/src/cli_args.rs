use amr_galaxy::{GalaxyClientConfig, DEFAULT_GALAXY_BASE_URL, DEFAULT_GALAXY_REQUEST_TIMEOUT_MS};
use amr_gateway::AmrRelayServerConfig;
use amr_workflow::{UploadConfig, WorkflowConfig, DEFAULT_HISTORY_NAME, DEFAULT_MAX_UPLOAD_BYTES};
use clap::Parser;

fn parse_positive_usize(value: &str) -> Result<usize, String> {
    let parsed = value
        .parse::<usize>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "amr-relay",
    about = "Relay that runs AMRFinderPlus on Galaxy without exposing the Galaxy API key",
    version
)]
pub struct Cli {
    #[arg(
        long,
        env = "AMR_RELAY_BIND",
        default_value = "127.0.0.1:3001",
        help = "Socket address the relay listens on"
    )]
    pub bind: String,

    #[arg(
        long = "galaxy-url",
        env = "GALAXY_URL",
        default_value = DEFAULT_GALAXY_BASE_URL,
        help = "Base URL of the Galaxy deployment (without the /api suffix)"
    )]
    pub galaxy_url: String,

    #[arg(
        long = "galaxy-api-key",
        env = "GALAXY_API_KEY",
        hide_env_values = true,
        help = "Galaxy API key attached to every upstream request"
    )]
    pub galaxy_api_key: String,

    #[arg(
        long = "galaxy-request-timeout-ms",
        env = "GALAXY_REQUEST_TIMEOUT_MS",
        default_value_t = DEFAULT_GALAXY_REQUEST_TIMEOUT_MS,
        value_parser = parse_positive_u64,
        help = "Per-request timeout for Galaxy API calls"
    )]
    pub galaxy_request_timeout_ms: u64,

    #[arg(
        long = "max-upload-bytes",
        env = "AMR_RELAY_MAX_UPLOAD_BYTES",
        default_value_t = DEFAULT_MAX_UPLOAD_BYTES,
        value_parser = parse_positive_usize,
        help = "Largest accepted sequence file"
    )]
    pub max_upload_bytes: usize,

    #[arg(
        long = "history-name",
        env = "AMR_RELAY_HISTORY_NAME",
        default_value = DEFAULT_HISTORY_NAME,
        help = "Name given to the Galaxy history created when none exists"
    )]
    pub history_name: String,

    #[arg(
        long = "amrfinder-tool-id",
        env = "AMR_RELAY_AMRFINDER_TOOL_IDS",
        value_delimiter = ',',
        help = "Ordered AMRFinderPlus tool id candidates; defaults to the built-in toolshed ids"
    )]
    pub amrfinder_tool_ids: Vec<String>,
}

impl Cli {
    pub fn relay_server_config(&self) -> AmrRelayServerConfig {
        let mut workflow = WorkflowConfig {
            upload: UploadConfig {
                max_upload_bytes: self.max_upload_bytes,
                history_name: self.history_name.trim().to_string(),
            },
            ..WorkflowConfig::default()
        };
        let tool_ids: Vec<String> = self
            .amrfinder_tool_ids
            .iter()
            .map(|tool_id| tool_id.trim())
            .filter(|tool_id| !tool_id.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        if !tool_ids.is_empty() {
            workflow.tool_candidates = tool_ids;
        }

        AmrRelayServerConfig {
            bind: self.bind.trim().to_string(),
            galaxy: GalaxyClientConfig {
                base_url: self.galaxy_url.trim().to_string(),
                api_key: self.galaxy_api_key.trim().to_string(),
                request_timeout_ms: self.galaxy_request_timeout_ms,
            },
            workflow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amr_workflow::AMRFINDERPLUS_TOOL_CANDIDATES;

    #[test]
    fn unit_defaults_match_relay_conventions() {
        let cli = Cli::try_parse_from(["amr-relay", "--galaxy-api-key", "secret"])
            .expect("parse defaults");
        let config = cli.relay_server_config();

        assert_eq!(config.bind, "127.0.0.1:3001");
        assert_eq!(config.galaxy.base_url, "https://usegalaxy.org");
        assert_eq!(config.galaxy.request_timeout_ms, 60_000);
        assert_eq!(config.workflow.upload.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(config.workflow.upload.history_name, "AMRFinder Analysis");
        assert_eq!(
            config.workflow.tool_candidates,
            AMRFINDERPLUS_TOOL_CANDIDATES
                .iter()
                .map(|candidate| candidate.to_string())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn functional_tool_id_override_replaces_candidates_in_order() {
        let cli = Cli::try_parse_from([
            "amr-relay",
            "--galaxy-api-key",
            "secret",
            "--amrfinder-tool-id",
            "custom/amrfinderplus/4.0, amrfinderplus",
        ])
        .expect("parse override");

        assert_eq!(
            cli.relay_server_config().workflow.tool_candidates,
            vec!["custom/amrfinderplus/4.0", "amrfinderplus"]
        );
    }

    #[test]
    fn regression_zero_timeout_and_upload_limit_are_rejected() {
        for args in [
            ["amr-relay", "--galaxy-api-key", "k", "--galaxy-request-timeout-ms", "0"],
            ["amr-relay", "--galaxy-api-key", "k", "--max-upload-bytes", "0"],
        ] {
            let error = Cli::try_parse_from(args).expect_err("zero must be rejected");
            assert!(error.to_string().contains("value must be greater than 0"));
        }
    }
}
