use anyhow::Context;
use relay_config::RelayConfig;

use crate::cli::GlobalFlags;

/// Load layered config (`.env` included) and apply `--user` / `--space`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RelayConfig> {
    let mut config = RelayConfig::load_with_dotenv().context("failed to load relay config")?;
    apply_identity_overrides(&mut config, flags);
    Ok(config)
}

fn apply_identity_overrides(config: &mut RelayConfig, flags: &GlobalFlags) {
    if let Some(user) = &flags.user {
        if *user != config.identity.user_id {
            // The configured display name belongs to someone else.
            config.identity.user_name.clear();
        }
        config.identity.user_id.clone_from(user);
    }
    if let Some(space) = &flags.space {
        config.identity.space_id.clone_from(space);
    }
}
