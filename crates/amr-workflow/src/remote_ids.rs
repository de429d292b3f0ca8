//! Validation for caller-supplied ids that become Galaxy request path segments.

use crate::AmrWorkflowError;

/// Accepts a Galaxy encoded id (job, dataset): one non-empty ASCII alphanumeric segment.
pub fn encoded_id<'a>(value: &'a str, field: &str) -> Result<&'a str, AmrWorkflowError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AmrWorkflowError::validation(format!("{field} is required")));
    }
    if !trimmed.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return Err(AmrWorkflowError::validation(format!(
            "{field} must contain only ascii letters and digits"
        )));
    }
    Ok(trimmed)
}

/// Accepts a tool id, which may be a `/`-separated toolshed path.
///
/// Every segment must be non-empty, must not be `.` or `..`, and may only use
/// ascii letters, digits and `._+-`.
pub fn tool_id(value: &str) -> Result<&str, AmrWorkflowError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AmrWorkflowError::validation("tool_id is required"));
    }
    for segment in trimmed.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(AmrWorkflowError::validation(format!(
                "tool_id '{trimmed}' has an empty or relative path segment"
            )));
        }
        if !segment
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '+' | '-'))
        {
            return Err(AmrWorkflowError::validation(format!(
                "tool_id '{trimmed}' contains characters outside [A-Za-z0-9._+-/]"
            )));
        }
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_encoded_id_accepts_galaxy_hex_ids_and_trims() {
        assert_eq!(
            encoded_id(" f2db41e1fa331b3e ", "job_id").expect("hex id"),
            "f2db41e1fa331b3e"
        );
        assert_eq!(encoded_id("job42", "job_id").expect("alnum id"), "job42");
    }

    #[test]
    fn regression_encoded_id_rejects_path_and_query_characters() {
        for hostile in [
            "../users/current/api_key",
            "ds1/display",
            "ds1?keys=all",
            "ds1#x",
            "a b",
            "ds%2F1",
        ] {
            let error = encoded_id(hostile, "dataset_id").expect_err("hostile id");
            assert!(error.is_validation(), "{hostile}: {error}");
        }
        assert!(encoded_id("  ", "dataset_id")
            .expect_err("blank")
            .to_string()
            .contains("dataset_id is required"));
    }

    #[test]
    fn unit_tool_id_accepts_toolshed_paths() {
        let toolshed = "toolshed.g2.bx.psu.edu/repos/iuc/amrfinderplus/amrfinderplus/3.11.26+galaxy0";
        assert_eq!(tool_id(toolshed).expect("toolshed id"), toolshed);
        assert_eq!(tool_id("amrfinderplus").expect("short id"), "amrfinderplus");
    }

    #[test]
    fn regression_tool_id_rejects_traversal_and_query_injection() {
        for hostile in [
            "../users/current/api_key",
            "amrfinderplus/../../users/current/api_key",
            "./amrfinderplus",
            "repos//amrfinderplus",
            "/amrfinderplus",
            "amrfinderplus/",
            "amrfinderplus?q=x",
            "amrfinderplus#frag",
            "amr finder",
            "amrfinderplus%2F..",
            "amrfinderplus\\..",
        ] {
            let error = tool_id(hostile).expect_err("hostile tool id");
            assert!(error.is_validation(), "{hostile}: {error}");
        }
    }
}
