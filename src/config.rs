//! Runtime configuration resolved from CLI flags, the environment and `.env`.

use std::path::PathBuf;

use crate::cli::CommonArgs;

pub const DATA_ENV: &str = "BIKES_DATA";
pub const LOG_DIR_ENV: &str = "BIKES_LOG_DIR";

const DEFAULT_DATA: &str = "day.csv";
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub log_dir: PathBuf,
}

impl DashboardConfig {
    /// Flags win over environment variables, which win over defaults.
    pub fn resolve(args: &CommonArgs) -> Self {
        dotenvy::dotenv().ok();
        Self::resolve_with(args, |key| std::env::var(key).ok())
    }

    fn resolve_with(args: &CommonArgs, env: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |flag: &Option<PathBuf>, key: &str, default: &str| {
            flag.clone()
                .or_else(|| env(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(default))
        };
        Self {
            data_path: pick(&args.data, DATA_ENV, DEFAULT_DATA),
            log_dir: pick(&args.log_dir, LOG_DIR_ENV, DEFAULT_LOG_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = DashboardConfig::resolve_with(&CommonArgs::default(), |_| None);
        assert_eq!(cfg.data_path, PathBuf::from("day.csv"));
        assert_eq!(cfg.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn env_overrides_default_and_flag_overrides_env() {
        let env = |key: &str| match key {
            DATA_ENV => Some("env.csv".to_string()),
            LOG_DIR_ENV => Some("  ".to_string()),
            _ => None,
        };
        let cfg = DashboardConfig::resolve_with(&CommonArgs::default(), env);
        assert_eq!(cfg.data_path, PathBuf::from("env.csv"));
        assert_eq!(cfg.log_dir, PathBuf::from("logs"));

        let args = CommonArgs {
            data: Some(PathBuf::from("flag.csv")),
            log_dir: None,
        };
        let cfg = DashboardConfig::resolve_with(&args, env);
        assert_eq!(cfg.data_path, PathBuf::from("flag.csv"));
    }
}
