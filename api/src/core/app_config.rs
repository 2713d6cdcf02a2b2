use ai_llm_service::error_handler::env_opt;

use crate::error_handler::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// HTTP server settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Per-session history cap (`HISTORY_MAX_TURNS`); `None` is unbounded.
    pub history_max_turns: Option<usize>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            history_max_turns: None,
        }
    }
}

impl ApiConfig {
    /// Reads `HOST`, `PORT` and `HISTORY_MAX_TURNS`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(env_opt)
    }

    /// Same as [`ApiConfig::from_env`], reading variables through `var`.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = match var("PORT") {
            Some(p) => p
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("PORT: expected u16, got `{p}`")))?,
            None => DEFAULT_PORT,
        };
        let history_max_turns = match var("HISTORY_MAX_TURNS") {
            Some(v) => match v.parse::<usize>() {
                Ok(0) | Err(_) => {
                    return Err(AppError::Config(format!(
                        "HISTORY_MAX_TURNS: expected a positive integer, got `{v}`"
                    )));
                }
                Ok(n) => Some(n),
            },
            None => None,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            history_max_turns,
        })
    }

    /// `host:port` for logs; binding resolves names such as `localhost`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn default_binds_all_interfaces_on_8080() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.address(), "0.0.0.0:8080");
        assert_eq!(cfg.history_max_turns, None);
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        assert_eq!(from_vars(&[]).unwrap(), ApiConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = from_vars(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("HISTORY_MAX_TURNS", "20"),
        ])
        .unwrap();
        assert_eq!(cfg.address(), "127.0.0.1:3000");
        assert_eq!(cfg.history_max_turns, Some(20));
    }

    #[test]
    fn malformed_port_is_a_config_error() {
        for bad in ["http", "70000", "-1"] {
            assert!(matches!(from_vars(&[("PORT", bad)]), Err(AppError::Config(_))));
        }
    }

    #[test]
    fn history_cap_must_be_positive() {
        assert!(matches!(
            from_vars(&[("HISTORY_MAX_TURNS", "0")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            from_vars(&[("HISTORY_MAX_TURNS", "many")]),
            Err(AppError::Config(_))
        ));
    }
}
