/*!
SLD resolution: depth-first, left-to-right goal reduction against a [HornProgram], bounded by an
inference counter and a wall-clock [Deadline] (spec.md §4.4.2).

Equality is not compiled into a separate `eq_d(X,Y,D)` meta-predicate; instead, whenever the
resolver is about to resolve an equality-headed goal literal against an equality-headed program
clause, it threads a same-purpose depth counter (`equality_chain_depth`) and refuses once it
exceeds [crate::config::HornEngineConfig::equality_depth] (default 5) — the concretisation of
spec.md §9's "explicit depth counter threaded through the derived relation" this implementer
chose, recorded in DESIGN.md.
*/

use super::translate::HornProgram;
use super::unify::unify_args;
use crate::ast::subst::Substitution;
use crate::axioms::arithmetic;
use crate::clausify::{Literal, EQ_PREDICATE};
use crate::engines::Deadline;
use crate::types::FolError;

/// Tunables for one [prove_goal] call.
#[derive(Clone, Copy, Debug)]
pub struct SldConfig {
    pub max_inferences: u64,
    pub equality_depth: u32,
    pub enable_equality: bool,
    pub enable_arithmetic: bool,
}

struct SldState<'a> {
    program: &'a HornProgram,
    config: SldConfig,
    deadline: Deadline,
    inferences: u64,
    rename_counter: u64,
}

/// The result of an SLD search: `Some(subst)` on success (carrying the goal variables' bindings),
/// `None` if the search space was exhausted without a proof.
type InnerOutcome = Result<Option<Substitution>, FolError>;

/// The outcome of a [prove_goal] call: the binding (if any) plus the number of resolution steps
/// taken, surfaced by the Horn engine as `ProveStatistics.inferences` (spec.md §6).
#[derive(Clone, Debug)]
pub struct SldOutcome {
    pub bindings: Option<Substitution>,
    pub inferences: u64,
}

/// Attempts to prove the conjunctive `goal` against `program`.
pub fn prove_goal(program: &HornProgram, goal: &[Literal], config: SldConfig, deadline: Deadline) -> Result<SldOutcome, FolError> {
    let mut state = SldState { program, config, deadline, inferences: 0, rename_counter: 0 };
    let bindings = state.solve(goal, &Substitution::new(), 0)?;
    Ok(SldOutcome { bindings, inferences: state.inferences })
}

impl<'a> SldState<'a> {
    fn solve(&mut self, goals: &[Literal], subst: &Substitution, equality_chain_depth: u32) -> InnerOutcome {
        if self.deadline.expired() {
            return Err(FolError::Timeout);
        }
        let Some((first, rest)) = goals.split_first() else {
            return Ok(Some(subst.clone()));
        };
        let current = first.apply(subst);

        if self.config.enable_arithmetic {
            if let Some(rel) = arithmetic::lookup(&current.predicate, current.args.len()) {
                self.inferences += 1;
                if self.inferences > self.config.max_inferences {
                    return Err(FolError::InferenceLimitExceeded { limit: self.config.max_inferences });
                }
                return match arithmetic::evaluate(rel, &current.args) {
                    Some(true) => self.solve(rest, subst, equality_chain_depth),
                    _ => Ok(None),
                };
            }
        }

        if self.config.enable_equality && &*current.predicate == EQ_PREDICATE && current.args[0] == current.args[1] {
            // Reflexivity short-circuits without consuming an equality-chain step.
            return self.solve(rest, subst, equality_chain_depth);
        }

        self.resolve_against_program(&current, rest, subst, equality_chain_depth)
    }

    fn resolve_against_program(
        &mut self,
        goal_literal: &Literal,
        rest: &[Literal],
        subst: &Substitution,
        equality_chain_depth: u32,
    ) -> InnerOutcome {
        let is_equality_step = self.config.enable_equality && &*goal_literal.predicate == EQ_PREDICATE;
        if is_equality_step && equality_chain_depth >= self.config.equality_depth {
            return Ok(None);
        }

        for clause in &self.program.clauses {
            if self.deadline.expired() {
                return Err(FolError::Timeout);
            }
            let Some(head) = &clause.head else { continue };
            if head.predicate != goal_literal.predicate || head.args.len() != goal_literal.args.len() {
                continue;
            }

            self.inferences += 1;
            if self.inferences > self.config.max_inferences {
                return Err(FolError::InferenceLimitExceeded { limit: self.config.max_inferences });
            }

            self.rename_counter += 1;
            let renamed = clause.rename_apart(&format!("#{}", self.rename_counter));
            let mut trial = subst.clone();
            let Some(renamed_head) = &renamed.head else { continue };
            if !unify_args(&renamed_head.args, &goal_literal.args, &mut trial) {
                continue;
            }

            let mut new_goals = renamed.body.clone();
            new_goals.extend_from_slice(rest);

            let next_depth = if is_equality_step && &*renamed_head.predicate == EQ_PREDICATE {
                equality_chain_depth + 1
            } else {
                equality_chain_depth
            };

            if let Some(result) = self.solve(&new_goals, &trial, next_depth)? {
                return Ok(Some(result));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::Term;
    use crate::clausify::{clausify, Strategy};
    use crate::engines::horn::translate::translate;
    use crate::normalize::SkolemEnv;
    use crate::parser::parse;
    use std::time::Duration;

    fn default_config() -> SldConfig {
        SldConfig { max_inferences: 1_000, equality_depth: 5, enable_equality: true, enable_arithmetic: true }
    }

    fn program_from(sources: &[&str]) -> HornProgram {
        let mut env = SkolemEnv::new();
        let mut clauses = crate::clausify::ClauseSet::default();
        for src in sources {
            let f = parse(src).unwrap();
            let (cs, _) = clausify(&f, Strategy::Standard, 10_000, None, &mut env).unwrap();
            clauses.extend(cs);
        }
        translate(&clauses).unwrap()
    }

    #[test]
    fn proves_socrates_syllogism() {
        let program = program_from(&["all x (man(x) -> mortal(x)).", "man(socrates)."]);
        let goal = vec![Literal::new("mortal", vec![Term::constant("socrates")], false)];
        let deadline = Deadline::after(Duration::from_secs(5));
        let result = prove_goal(&program, &goal, default_config(), deadline).unwrap();
        assert!(result.bindings.is_some());
        assert!(result.inferences > 0);
    }

    #[test]
    fn fails_when_goal_is_not_entailed() {
        let program = program_from(&["happy(john)."]);
        let goal = vec![Literal::new("happy", vec![Term::constant("mary")], false)];
        let deadline = Deadline::after(Duration::from_secs(5));
        let result = prove_goal(&program, &goal, default_config(), deadline).unwrap();
        assert!(result.bindings.is_none());
    }

    #[test]
    fn proves_propositional_modus_ponens() {
        let program = program_from(&["p -> q.", "p."]);
        let goal = vec![Literal::new("q", vec![], false)];
        let deadline = Deadline::after(Duration::from_secs(5));
        let result = prove_goal(&program, &goal, default_config(), deadline).unwrap();
        assert!(result.bindings.is_some());
    }

    #[test]
    fn binds_existential_goal_variable() {
        let program = program_from(&["p(a)."]);
        let goal = vec![Literal::new("p", vec![Term::var("x")], false)];
        let deadline = Deadline::after(Duration::from_secs(5));
        let bindings = prove_goal(&program, &goal, default_config(), deadline).unwrap().bindings.unwrap();
        assert_eq!(bindings.get("x"), Some(&Term::constant("a")));
    }
}
