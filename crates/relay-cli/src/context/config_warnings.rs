use relay_config::RelayConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &RelayConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &RelayConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.identity.is_configured() && has_single_underscore_key(&env_keys, "RELAY_IDENTITY") {
        warnings.push(
            "Identity config appears incomplete while RELAY_IDENTITY_* env vars exist. Use double underscores (example: RELAY_IDENTITY__USER_ID)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "RELAY_API") {
        warnings.push(format!(
            "RELAY_API_* env vars are ignored; using api.base_url = {}. Use double underscores (example: RELAY_API__BASE_URL).",
            config.api.base_url
        ));
    }

    warnings
}

/// `RELAY_API_BASE_URL` rather than `RELAY_API__BASE_URL`.
fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(section)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
