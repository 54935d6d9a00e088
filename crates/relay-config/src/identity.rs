//! Who is acting, and in which space.
//!
//! These values are passed explicitly into board and dispatch calls; nothing
//! reads them from process-wide state.

use relay_core::identity::{Actor, SpaceContext};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub user_id: String,

    /// Display name; falls back to the user ID.
    #[serde(default)]
    pub user_name: String,

    #[serde(default)]
    pub space_id: String,
}

impl IdentityConfig {
    pub fn is_configured(&self) -> bool {
        !self.user_id.is_empty() && !self.space_id.is_empty()
    }

    /// The configured actor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when no user ID is set.
    pub fn actor(&self) -> Result<Actor, ConfigError> {
        if self.user_id.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "identity".into(),
            });
        }
        let name = if self.user_name.is_empty() {
            &self.user_id
        } else {
            &self.user_name
        };
        Ok(Actor::new(self.user_id.clone(), name.clone()))
    }

    /// Actor plus space.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] unless both user and space are
    /// set.
    pub fn context(&self) -> Result<SpaceContext, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "identity".into(),
            });
        }
        Ok(SpaceContext {
            space_id: self.space_id.clone(),
            actor: self.actor()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = IdentityConfig::default();
        assert!(!config.is_configured());
        assert!(config.actor().is_err());
        assert!(config.context().is_err());
    }

    #[test]
    fn user_name_falls_back_to_id() {
        let config = IdentityConfig {
            user_id: "u1".into(),
            user_name: String::new(),
            space_id: "spc-1".into(),
        };
        let ctx = config.context().unwrap();
        assert_eq!(ctx.actor.user_name, "u1");
        assert_eq!(ctx.space_id, "spc-1");
    }
}
