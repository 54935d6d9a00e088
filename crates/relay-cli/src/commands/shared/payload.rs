use relay_client::ClientError;
use relay_core::errors::ErrorKind;
use serde::Serialize;

/// Turn a client failure into a CLI error, echoing what was submitted when
/// the failure was transient so the same command can be re-run unchanged.
pub fn keep_payload_on_failure<T, P: Serialize>(
    result: Result<T, ClientError>,
    payload: &P,
    what: &str,
) -> anyhow::Result<T> {
    result.map_err(|error| {
        if let Some(echo) = describe_failure(&error, payload, what) {
            eprintln!("{echo}");
        }
        anyhow::Error::new(error).context(format!("{what} failed"))
    })
}

fn describe_failure<P: Serialize>(error: &ClientError, payload: &P, what: &str) -> Option<String> {
    if error.kind() != ErrorKind::Transient {
        return None;
    }
    let json = serde_json::to_string_pretty(payload).ok()?;
    Some(format!(
        "{what} may not have reached the backend. Submitted payload (safe to re-run, the same idempotency key is reused):\n{json}"
    ))
}
