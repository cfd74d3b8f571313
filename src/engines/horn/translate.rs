/*!
Translate a Horn [ClauseSet] into a [HornProgram]: for each clause, the single positive literal
(if any) becomes the clause head and the negated literals become the body, in their un-negated
form (spec.md §4.4.2 — "translate clauses to a Prolog-like program").

The teacher's naming convention for a textual Prolog dump (upper-case variables, lower-case
atoms) has no work to do here: [Term::Variable] and [Term::Constant] already carry that
distinction in the type itself, so nothing needs re-deriving from letter case. Equality is kept
as an ordinary predicate (`=`) rather than split into `eq_fact`/`eq`; [super::sld]'s resolution
depth counter plays the role spec.md §9 assigns to an `eq_d(X,Y,D)` relation, bounding exactly the
same recursive equality chains without a second generated predicate family.
*/

use crate::clausify::{Clause, ClauseSet, Literal};
use crate::types::FolError;

/// A single program clause: `head :- body`. `head = None` marks an integrity constraint (a
/// clause with no positive literal) — present in a refutation's clause set as the negated goal,
/// not as an ordinary premise.
#[derive(Clone, Debug, PartialEq)]
pub struct HornClause {
    pub head: Option<Literal>,
    pub body: Vec<Literal>,
}

impl HornClause {
    fn from_clause(clause: &Clause) -> HornClause {
        let mut head = None;
        let mut body = Vec::new();
        for lit in &clause.literals {
            if lit.negated {
                body.push(lit.negate());
            } else {
                head = Some(lit.clone());
            }
        }
        HornClause { head, body }
    }

    pub fn free_variables(&self) -> Vec<std::sync::Arc<str>> {
        let mut out = Vec::new();
        let mut push = |lit: &Literal| {
            for v in lit.free_variables() {
                if !out.contains(&v) {
                    out.push(v);
                }
            }
        };
        if let Some(h) = &self.head {
            push(h);
        }
        for b in &self.body {
            push(b);
        }
        out
    }

    /// Renames this clause's free variables apart with a fresh suffix, so repeated uses of the
    /// same program clause within one derivation do not share variables (spec.md §4.2's
    /// standardise-apart discipline, applied here at resolution time).
    pub fn rename_apart(&self, suffix: &str) -> HornClause {
        use crate::ast::subst::Substitution;
        use crate::ast::term::Term;
        let mut subst = Substitution::new();
        for v in self.free_variables() {
            subst.insert(v.clone(), Term::var(format!("{v}{suffix}")));
        }
        HornClause { head: self.head.as_ref().map(|h| h.apply(&subst)), body: self.body.iter().map(|b| b.apply(&subst)).collect() }
    }
}

/// A Horn program: an ordered list of clauses, resolved against depth-first in source order
/// (spec.md §4.4.2 "SLD resolution with depth-first search").
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HornProgram {
    pub clauses: Vec<HornClause>,
}

/// Translates `clauses` into a [HornProgram]. Fails with [FolError::NonHorn] if any clause has
/// more than one positive literal — the manager uses this to fall through to the SAT engine
/// (spec.md §4.4.2).
pub fn translate(clauses: &ClauseSet) -> Result<HornProgram, FolError> {
    if !clauses.is_horn() {
        return Err(FolError::NonHorn);
    }
    Ok(HornProgram { clauses: clauses.clauses.iter().map(HornClause::from_clause).collect() })
}
