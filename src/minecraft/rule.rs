use crate::json::meta::{Action, Rule};

use super::{TARGET_ARCH, TARGET_OS};

/// Evaluates a rule list against the running platform.
///
/// Rules are scanned in order and every matching rule overwrites the verdict
/// with its action, so a later match wins over an earlier one. An empty list,
/// or a list where nothing matches, allows.
pub fn rules_allow(rules: &[Rule]) -> bool {
    rules_allow_on(rules, TARGET_OS, TARGET_ARCH)
}

/// Rule evaluation for argument nodes: platform rules as in [`rules_allow`],
/// plus feature gates. Custom resolution is unsupported, so any rule asking
/// for it excludes the node outright; demo-only nodes are kept only when the
/// launching user is a demo account.
pub fn argument_rules_allow(rules: &[Rule], is_demo_user: bool) -> bool {
    argument_rules_allow_on(rules, is_demo_user, TARGET_OS, TARGET_ARCH)
}

fn rules_allow_on(rules: &[Rule], os: &str, arch: &str) -> bool {
    let mut verdict = true;
    for rule in rules {
        if platform_matches(rule, os, arch) {
            verdict = rule.action == Action::Allow;
        }
    }
    verdict
}

fn argument_rules_allow_on(rules: &[Rule], is_demo_user: bool, os: &str, arch: &str) -> bool {
    let mut verdict = true;
    for rule in rules {
        if let Some(features) = &rule.features {
            if features.has_custom_resolution.is_some() {
                return false;
            }
            if features.is_demo_user.is_some() && !is_demo_user {
                return false;
            }
        }
        if platform_matches(rule, os, arch) {
            verdict = rule.action == Action::Allow;
        }
    }
    verdict
}

fn platform_matches(rule: &Rule, os: &str, arch: &str) -> bool {
    if let Some(os_rule) = &rule.os {
        if os_rule.name.as_deref().is_some_and(|name| name != os) {
            return false;
        }
        if os_rule.arch.as_deref().is_some_and(|rule_arch| rule_arch != arch) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_rules(value: serde_json::Value) -> Vec<Rule> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_list_allows() {
        assert!(rules_allow_on(&[], "linux", "x86_64"));
    }

    #[test]
    fn disallow_for_matching_os_excludes() {
        let rules = parse_rules(json!([
            {"action": "disallow", "os": {"name": "linux"}}
        ]));
        assert!(!rules_allow_on(&rules, "linux", "x86_64"));
        assert!(rules_allow_on(&rules, "windows", "x86_64"));
    }

    #[test]
    fn allow_for_other_os_does_not_match_but_default_allows() {
        let rules = parse_rules(json!([
            {"action": "allow", "os": {"name": "osx"}}
        ]));
        // Nothing matched, so the default verdict stands.
        assert!(rules_allow_on(&rules, "linux", "x86_64"));
    }

    #[test]
    fn later_matching_rule_wins() {
        let rules = parse_rules(json!([
            {"action": "allow"},
            {"action": "disallow", "os": {"name": "linux"}}
        ]));
        assert!(!rules_allow_on(&rules, "linux", "x86_64"));

        let rules = parse_rules(json!([
            {"action": "disallow", "os": {"name": "linux"}},
            {"action": "allow"}
        ]));
        assert!(rules_allow_on(&rules, "linux", "x86_64"));
    }

    #[test]
    fn arch_mismatch_does_not_match() {
        let rules = parse_rules(json!([
            {"action": "disallow", "os": {"name": "linux", "arch": "x86"}}
        ]));
        assert!(rules_allow_on(&rules, "linux", "x86_64"));
        assert!(!rules_allow_on(&rules, "linux", "x86"));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let rules = parse_rules(json!([
            {"action": "allow", "os": {"name": "linux"}},
            {"action": "disallow", "os": {"arch": "x86_64"}}
        ]));
        let first = rules_allow_on(&rules, "linux", "x86_64");
        for _ in 0..10 {
            assert_eq!(rules_allow_on(&rules, "linux", "x86_64"), first);
        }
    }

    #[test]
    fn custom_resolution_rule_always_excludes() {
        let rules = parse_rules(json!([
            {"action": "allow", "features": {"has_custom_resolution": true}}
        ]));
        assert!(!argument_rules_allow_on(&rules, false, "linux", "x86_64"));
        assert!(!argument_rules_allow_on(&rules, true, "linux", "x86_64"));
    }

    #[test]
    fn demo_rule_gates_on_demo_user() {
        let rules = parse_rules(json!([
            {"action": "allow", "features": {"is_demo_user": true}}
        ]));
        assert!(!argument_rules_allow_on(&rules, false, "linux", "x86_64"));
        assert!(argument_rules_allow_on(&rules, true, "linux", "x86_64"));
    }
}
