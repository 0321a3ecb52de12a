//! Built-in mode-combination profiles.
//!
//! These guarantee the tool is usable with zero configuration: when no
//! profile directory yields any valid profile, resolution falls back to
//! this fixed table.

use crate::profile::{Profile, ProfileRegistry};
use std::collections::HashMap;

/// The seven operation modes every built-in profile assigns a model to.
pub const MODE_NAMES: [&str; 7] = [
    "default",
    "orchestrator",
    "architect",
    "code",
    "debug",
    "ask",
    "administrator",
];

fn builtin(id: &str, name: &str, description: &str, models: [&str; 7]) -> Profile {
    let modes: HashMap<String, String> = MODE_NAMES
        .iter()
        .zip(models.iter())
        .map(|(mode, model)| (mode.to_string(), model.to_string()))
        .collect();
    Profile::new(id, name, description, modes)
}

/// Return the fixed table of built-in mode-combination profiles.
pub fn builtin_profiles() -> ProfileRegistry {
    ProfileRegistry::from_profiles(vec![
        builtin(
            "lopr",
            "Low-Price (Economy)",
            "Budget-friendly model combinations for cost-conscious usage",
            [
                "llama-4-maverick",
                "deepseek-v3.2-exp",
                "minimax-m2",
                "minimax-m2",
                "deepseek-v3.1-terminus",
                "llama-4-maverick",
                "deepseek-v3.2-exp",
            ],
        ),
        builtin(
            "copr",
            "Complex-Programming (Agentic Coding)",
            "Optimized for complex programming tasks and agentic workflows",
            [
                "gpt-5-mini",
                "claude-sonnet-4.5",
                "gemini-2.5-pro",
                "qwen3-coder",
                "claude-haiku-4.5",
                "glm-4.6",
                "glm-4.6",
            ],
        ),
        builtin(
            "hiq",
            "High-Quality (Premium)",
            "Premium models for highest quality output",
            [
                "gemini-2.5-pro",
                "claude-sonnet-4.5",
                "gpt-5",
                "claude-sonnet-4.5",
                "claude-sonnet-4.5",
                "gemini-2.5-pro",
                "gpt-5",
            ],
        ),
        builtin(
            "bas",
            "Balanced-Speed (speed)",
            "Balanced performance with good speed",
            [
                "grok-code-fast-1",
                "gemini-2.5-flash",
                "gpt-5-mini",
                "grok-code-fast-1",
                "gemini-2.5-flash",
                "grok-code-fast-1",
                "gemini-2.5-flash",
            ],
        ),
        builtin(
            "res",
            "Repository-Scale (big codebases)",
            "Optimized for large codebases and repository-scale tasks",
            [
                "gemini-2.5-flash",
                "gemini-2.5-pro",
                "qwen3-max",
                "qwen3-coder",
                "glm-4.6",
                "llama-4-maverick",
                "qwen3-max",
            ],
        ),
        builtin(
            "ags",
            "Agent-Specialist (Autonome Workflows)",
            "Specialized for autonomous workflows and agent operations",
            [
                "minimax-m2",
                "claude-sonnet-4.5",
                "deepseek-v3.1-terminus",
                "glm-4.6",
                "claude-haiku-4.5",
                "gpt-5-mini",
                "deepseek-v3.1-terminus",
            ],
        ),
        builtin(
            "refo",
            "Research-Focused (analyse & science)",
            "Optimized for research, analysis, and scientific tasks",
            [
                "qwen3-max",
                "gemini-2.5-pro",
                "gpt-5",
                "mistral-large",
                "claude-sonnet-4.5",
                "gemini-2.5-flash",
                "mistral-large",
            ],
        ),
        builtin(
            "buco",
            "Budget-Conscious-Pro (budget and efficiency)",
            "Professional quality with budget consciousness",
            [
                "gemini-2.5-flash",
                "gpt-5-mini",
                "qwen3-coder",
                "grok-code-fast-1",
                "claude-haiku-4.5",
                "deepseek-v3.2-exp",
                "minimax-m2",
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_identities() {
        let registry = builtin_profiles();
        let ids: Vec<&str> = registry.ids().collect();
        assert_eq!(
            ids,
            vec!["lopr", "copr", "hiq", "bas", "res", "ags", "refo", "buco"]
        );
    }

    #[test]
    fn test_every_builtin_has_the_seven_modes() {
        for profile in builtin_profiles().iter() {
            assert_eq!(
                profile.modes.len(),
                MODE_NAMES.len(),
                "profile {} has wrong mode count",
                profile.id
            );
            for mode in MODE_NAMES {
                assert!(
                    profile.modes.contains_key(mode),
                    "profile {} is missing mode {}",
                    profile.id,
                    mode
                );
            }
        }
    }

    #[test]
    fn test_lopr_mode_models() {
        let registry = builtin_profiles();
        let lopr = registry.get("lopr").unwrap();
        assert_eq!(lopr.name, "Low-Price (Economy)");
        assert_eq!(lopr.modes["default"], "llama-4-maverick");
        assert_eq!(lopr.modes["orchestrator"], "deepseek-v3.2-exp");
        assert_eq!(lopr.modes["debug"], "deepseek-v3.1-terminus");
    }
}
