//! Guard - no destructive action before ownership is validated
//!
//! The planner is untrusted for this rule. Whatever it proposes, a
//! `replace`/`cancel` on an unvalidated state is rewritten to `validate`.

use tracing::warn;

use super::PlanDecision;
use crate::domain::Action;

/// Appended to the rationale when a decision is rewritten
pub const GUARD_ANNOTATION: &str = " | Guarded: validating before action";

/// Upper bound on the rationale length, in characters
pub const MAX_REASON_CHARS: usize = 500;

/// Apply the validate-before-destroy rule to a planner decision
pub fn guard(mut decision: PlanDecision, validated: bool) -> PlanDecision {
    if decision.next_action.is_destructive() && !validated {
        warn!(
            requested = %decision.next_action,
            "guard: destructive action before validation, rewriting to validate"
        );
        decision.next_action = Action::Validate;
        decision.reason = annotate(&decision.reason);
    }
    decision
}

/// Append the annotation, trimming the earlier rationale so the annotation survives the cap
fn annotate(reason: &str) -> String {
    let budget = MAX_REASON_CHARS - GUARD_ANNOTATION.chars().count();
    let mut annotated: String = reason.chars().take(budget).collect();
    annotated.push_str(GUARD_ANNOTATION);
    annotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Intent;
    use proptest::prelude::*;

    fn decision(action: Action, reason: &str) -> PlanDecision {
        PlanDecision {
            next_action: action,
            intent: Some(Intent::Cancel),
            assistant_message: "msg".to_string(),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_rewrites_cancel_before_validation() {
        let guarded = guard(decision(Action::Cancel, "user wants to cancel"), false);
        assert_eq!(guarded.next_action, Action::Validate);
        assert_eq!(guarded.reason, "user wants to cancel | Guarded: validating before action");
        assert_eq!(guarded.assistant_message, "msg");
        assert_eq!(guarded.intent, Some(Intent::Cancel));
    }

    #[test]
    fn test_rewrites_replace_before_validation() {
        let guarded = guard(decision(Action::Replace, ""), false);
        assert_eq!(guarded.next_action, Action::Validate);
        assert_eq!(guarded.reason, GUARD_ANNOTATION);
    }

    #[test]
    fn test_passes_through_after_validation() {
        let original = decision(Action::Cancel, "validated, cancelling");
        assert_eq!(guard(original.clone(), true), original);
    }

    #[test]
    fn test_passes_through_non_destructive() {
        for action in [Action::Validate, Action::Finish] {
            let original = decision(action, "r");
            assert_eq!(guard(original.clone(), false), original);
        }
    }

    #[test]
    fn test_long_reason_is_capped_and_keeps_annotation() {
        let long = "x".repeat(2_000);
        let guarded = guard(decision(Action::Replace, &long), false);

        assert_eq!(guarded.reason.chars().count(), MAX_REASON_CHARS);
        assert!(guarded.reason.ends_with(GUARD_ANNOTATION));
        assert!(guarded.reason.starts_with("xxx"));
    }

    #[test]
    fn test_cap_counts_characters_not_bytes() {
        let long = "é".repeat(600);
        let guarded = guard(decision(Action::Cancel, &long), false);
        assert_eq!(guarded.reason.chars().count(), MAX_REASON_CHARS);
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop::sample::select(Action::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_never_destructive_when_unvalidated(action in any_action(), reason in ".{0,800}") {
            let guarded = guard(decision(action, &reason), false);
            prop_assert!(!guarded.next_action.is_destructive());
            if action.is_destructive() {
                prop_assert_eq!(guarded.next_action, Action::Validate);
                prop_assert!(guarded.reason.chars().count() <= MAX_REASON_CHARS);
                prop_assert!(guarded.reason.ends_with(GUARD_ANNOTATION));
            } else {
                prop_assert_eq!(guarded.reason, reason);
            }
        }

        #[test]
        fn prop_identity_when_validated(action in any_action(), reason in ".{0,100}") {
            let original = decision(action, &reason);
            prop_assert_eq!(guard(original.clone(), true), original);
        }
    }
}
