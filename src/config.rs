use std::str::FromStr;

use crate::error::QuizError;
use crate::quiz::session::SkipPolicy;

pub const DEFAULT_SEED: u64 = 7;
pub const DEFAULT_QUESTION_COUNT: usize = 50;

/// Quiz defaults offered to every user. The bot token itself is read by
/// teloxide from `TELOXIDE_TOKEN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u64,
    pub question_count: usize,
    pub skip_policy: SkipPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            question_count: DEFAULT_QUESTION_COUNT,
            skip_policy: SkipPolicy::ReviewAsIncorrect,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, QuizError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, QuizError> {
        let defaults = Self::default();

        let seed = parse_var(&lookup, "QUIZ_SEED")?.unwrap_or(defaults.seed);
        let question_count =
            parse_var(&lookup, "QUIZ_QUESTION_COUNT")?.unwrap_or(defaults.question_count);
        if question_count == 0 {
            return Err(QuizError::InvalidConfiguration(
                "QUIZ_QUESTION_COUNT must be at least 1".to_string(),
            ));
        }
        let skip_policy = match parse_var::<bool>(&lookup, "QUIZ_REVIEW_SKIPPED")? {
            Some(false) => SkipPolicy::ExcludeFromReview,
            Some(true) => SkipPolicy::ReviewAsIncorrect,
            None => defaults.skip_policy,
        };

        Ok(Self {
            seed,
            question_count,
            skip_policy,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, QuizError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            QuizError::InvalidConfiguration(format!("{} has an invalid value '{}'", key, raw))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, QuizError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("QUIZ_SEED", "42"),
            ("QUIZ_QUESTION_COUNT", " 20 "),
            ("QUIZ_REVIEW_SKIPPED", "false"),
        ])
        .unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.question_count, 20);
        assert_eq!(config.skip_policy, SkipPolicy::ExcludeFromReview);
    }

    #[test]
    fn rejects_bad_values() {
        let err = config_from(&[("QUIZ_SEED", "-1")]).unwrap_err();
        assert!(matches!(err, QuizError::InvalidConfiguration(ref m) if m.contains("QUIZ_SEED")));
        assert!(config_from(&[("QUIZ_QUESTION_COUNT", "0")]).is_err());
        assert!(config_from(&[("QUIZ_REVIEW_SKIPPED", "maybe")]).is_err());
    }
}
