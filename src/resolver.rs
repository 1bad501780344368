//! Configuration Resolver: effective model and disable switch

use serde::Serialize;

use crate::config;
use crate::model::DetectModel;
use crate::settings::Settings;

/// Resolved launcher configuration, read-only once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub model: String,
    pub disabled: bool,
}

/// How the persisted `disable-hidpi` value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisableFlagPolicy {
    /// Only the exact string "True" disables
    #[default]
    Strict,
    /// "true" (also JSON `true`) disables as well
    Lenient,
}

/// Explicit override if non-empty, detection otherwise. Detection is not run
/// when an override is present.
pub fn resolve_model(model_override: Option<&str>, detector: &dyn DetectModel) -> String {
    match model_override {
        Some(model) if !model.is_empty() => model.to_string(),
        _ => detector.detect_model(),
    }
}

/// Exact-match interpretation of the persisted disable switch
pub fn is_disabled(settings: &Settings) -> bool {
    settings.get(config::settings::DISABLE_KEY) == Some(config::settings::DISABLE_VALUE)
}

fn is_disabled_with(settings: &Settings, policy: DisableFlagPolicy) -> bool {
    let strict = is_disabled(settings);
    if policy == DisableFlagPolicy::Strict || strict {
        return strict;
    }
    let lenient = settings
        .get(config::settings::DISABLE_KEY)
        .is_some_and(|v| v == "true");
    if lenient {
        log::warn!(
            "{} is {:?}; only {:?} disables without --lenient-disable-flag",
            config::settings::DISABLE_KEY,
            settings.get(config::settings::DISABLE_KEY).unwrap_or_default(),
            config::settings::DISABLE_VALUE
        );
    }
    lenient
}

pub fn resolve(
    model_override: Option<&str>,
    detector: &dyn DetectModel,
    settings: &Settings,
    policy: DisableFlagPolicy,
) -> EffectiveConfig {
    let model = resolve_model(model_override, detector);
    let disabled = is_disabled_with(settings, policy);

    log::info!("Model: {}", model);
    if disabled {
        log::info!("HiDPI support disabled by {}", config::settings::DISABLE_KEY);
    } else {
        log::info!("HiDPI support enabled");
    }

    EffectiveConfig { model, disabled }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn settings(value: Option<&str>) -> Settings {
        value
            .map(|v| (config::settings::DISABLE_KEY, v))
            .into_iter()
            .collect()
    }

    #[test]
    fn override_wins_without_detection() {
        let calls = Cell::new(0);
        let detector = || {
            calls.set(calls.get() + 1);
            "oryp5".to_string()
        };
        assert_eq!(resolve_model(Some("galp3-b"), &detector), "galp3-b");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn empty_override_falls_back_to_detection() {
        let detector = || "oryp5".to_string();
        assert_eq!(resolve_model(Some(""), &detector), "oryp5");
        assert_eq!(resolve_model(None, &detector), "oryp5");
    }

    #[test]
    fn override_is_not_validated() {
        let detector = || "oryp5".to_string();
        assert_eq!(resolve_model(Some("not a model!"), &detector), "not a model!");
    }

    #[test]
    fn only_exact_true_disables() {
        assert!(is_disabled(&settings(Some("True"))));
        for value in ["true", "TRUE", "1", "yes", "True ", ""] {
            assert!(!is_disabled(&settings(Some(value))), "{:?}", value);
        }
        assert!(!is_disabled(&settings(None)));
    }

    #[test]
    fn lenient_policy_accepts_exact_lowercase() {
        let lenient = DisableFlagPolicy::Lenient;
        assert!(is_disabled_with(&settings(Some("True")), lenient));
        assert!(is_disabled_with(&settings(Some("true")), lenient));
        assert!(!is_disabled_with(&settings(Some("TRUE")), lenient));
        assert!(!is_disabled_with(&settings(Some("tRuE")), lenient));
        assert!(!is_disabled_with(&settings(Some("1")), lenient));
        assert!(!is_disabled_with(&settings(None), lenient));
        assert!(!is_disabled_with(&settings(Some("true")), DisableFlagPolicy::Strict));
    }

    #[test]
    fn resolves_detected_model_with_empty_settings() {
        let detector = || "oryp5".to_string();
        let effective = resolve(None, &detector, &Settings::default(), DisableFlagPolicy::Strict);
        assert_eq!(
            effective,
            EffectiveConfig {
                model: "oryp5".to_string(),
                disabled: false
            }
        );
    }
}
