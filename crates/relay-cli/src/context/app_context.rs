use anyhow::Context;
use chrono::{NaiveDate, Utc};
use relay_client::{BackendClient, ClientOptions};
use relay_config::RelayConfig;
use relay_core::identity::Actor;
use relay_core::report::CostRate;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub client: BackendClient,
    pub config: RelayConfig,
}

impl AppContext {
    /// Build the backend client from the loaded config.
    pub fn init(config: RelayConfig) -> anyhow::Result<Self> {
        let client = BackendClient::new(ClientOptions {
            base_url: config.api.base_url.clone(),
            timeout: config.api.timeout(),
            user_agent: config.api.user_agent.clone(),
            retry: config.retry.policy(),
            poll: config.poll.policy(),
        })
        .context("failed to initialize backend client")?;

        Ok(Self { client, config })
    }

    /// The acting user; required by dispatch and the personal board.
    pub fn actor(&self) -> anyhow::Result<Actor> {
        self.config.identity.actor().context(
            "no user configured: set identity.user_id in .relay/config.toml, \
             RELAY_IDENTITY__USER_ID, or pass --user",
        )
    }

    pub fn space_id(&self) -> anyhow::Result<&str> {
        let space = self.config.identity.space_id.as_str();
        if space.is_empty() {
            anyhow::bail!(
                "no space configured: set identity.space_id in .relay/config.toml, \
                 RELAY_IDENTITY__SPACE_ID, or pass --space"
            );
        }
        Ok(space)
    }

    pub fn cost_rate(&self) -> CostRate {
        self.config.report.cost_rate()
    }

    /// Calendar day that date ranges resolve against.
    pub fn today() -> NaiveDate {
        Utc::now().date_naive()
    }
}
