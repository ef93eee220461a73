use crate::client::{ApiRequest, ApiResponse, Transport};
use crate::error::Result;
use log::warn;
use std::fmt;

/// What the service said about a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Accepted,
    Rejected { status: u16, reason: String },
}

impl MutationOutcome {
    pub fn from_response(response: &ApiResponse) -> Self {
        if response.is_success() {
            MutationOutcome::Accepted
        } else {
            MutationOutcome::Rejected {
                status: response.status,
                reason: response.text(),
            }
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, MutationOutcome::Accepted)
    }
}

impl fmt::Display for MutationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationOutcome::Accepted => write!(f, "accepted"),
            MutationOutcome::Rejected { status, reason } if reason.is_empty() => {
                write!(f, "rejected with status {}", status)
            }
            MutationOutcome::Rejected { status, reason } => {
                write!(f, "rejected with status {}: {}", status, reason)
            }
        }
    }
}

/// Sends a mutation and waits for its response.
pub(crate) async fn send_mutation(
    transport: &dyn Transport,
    request: ApiRequest,
) -> Result<MutationOutcome> {
    let method = request.method;
    let path = request.path.clone();
    let response = transport.execute(request).await?;
    let outcome = MutationOutcome::from_response(&response);
    if let MutationOutcome::Rejected { .. } = &outcome {
        warn!("{} {} {}", method, path, outcome);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_status() {
        let accepted = ApiResponse { status: 201, body: Vec::new() };
        assert!(MutationOutcome::from_response(&accepted).is_accepted());

        let rejected = ApiResponse {
            status: 404,
            body: br#"{"error":"Recipe not found"}"#.to_vec(),
        };
        let outcome = MutationOutcome::from_response(&rejected);
        assert_eq!(
            outcome.to_string(),
            r#"rejected with status 404: {"error":"Recipe not found"}"#
        );
    }
}
