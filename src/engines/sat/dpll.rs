/*!
A small DPLL-style propositional kernel: unit propagation plus splitting, no watched literals,
no clause learning, no VSIDS. This is a deliberate scope reduction from the teacher's CDCL solver
(DESIGN.md records the decision): spec.md only asks the SAT engine to "call the propositional SAT
kernel" over a grounded Herbrand base of modest size, not to solve industrial CNF benchmarks, so
the simplest correct backtracking search is the right amount of machinery.
*/

use crate::engines::Deadline;
use crate::types::FolError;
use std::collections::BTreeMap;

/// A ground propositional clause: signed DIMACS-style variable indices.
pub type PropClause = Vec<i64>;

/// Simplifies `clauses` under `assignment`: drops satisfied clauses, drops falsified literals
/// from the remainder. Returns `None` on conflict (some clause reduced to empty).
fn simplify(clauses: &[PropClause], assignment: &BTreeMap<i64, bool>) -> Option<Vec<PropClause>> {
    let mut out = Vec::with_capacity(clauses.len());
    for clause in clauses {
        let mut satisfied = false;
        let mut reduced = Vec::new();
        for &lit in clause {
            let var = lit.abs();
            match assignment.get(&var) {
                Some(&value) => {
                    let holds = if lit > 0 { value } else { !value };
                    if holds {
                        satisfied = true;
                        break;
                    }
                    // falsified literal: drop it, keep scanning the rest of the clause
                }
                None => reduced.push(lit),
            }
        }
        if satisfied {
            continue;
        }
        if reduced.is_empty() {
            return None;
        }
        out.push(reduced);
    }
    Some(out)
}

fn dpll(original: &[PropClause], assignment: &mut BTreeMap<i64, bool>, deadline: Deadline) -> Result<Option<BTreeMap<i64, bool>>, FolError> {
    if deadline.expired() {
        return Err(FolError::Timeout);
    }
    let reduced = match simplify(original, assignment) {
        Some(r) => r,
        None => return Ok(None),
    };
    if reduced.is_empty() {
        return Ok(Some(assignment.clone()));
    }

    if let Some(unit_lit) = reduced.iter().find(|c| c.len() == 1).map(|c| c[0]) {
        let mut next = assignment.clone();
        next.insert(unit_lit.abs(), unit_lit > 0);
        return dpll(original, &mut next, deadline);
    }

    let var = reduced[0][0].abs();
    let mut try_true = assignment.clone();
    try_true.insert(var, true);
    if let Some(model) = dpll(original, &mut try_true, deadline)? {
        return Ok(Some(model));
    }

    let mut try_false = assignment.clone();
    try_false.insert(var, false);
    dpll(original, &mut try_false, deadline)
}

/// Solves `clauses`, returning a satisfying assignment (variable index -> truth value) if one
/// exists, covering every variable mentioned by at least one clause.
pub fn solve(clauses: &[PropClause], deadline: Deadline) -> Result<Option<BTreeMap<i64, bool>>, FolError> {
    let mut assignment = BTreeMap::new();
    dpll(clauses, &mut assignment, deadline)
}
