//! Systems of equations by recursive substitution
//!
//! The first unknown is solved from every equation that depends on it. Each
//! root is substituted into the other equations and the reduced system is
//! solved for the remaining unknowns. Later bindings are then substituted
//! back into the root, so every branch is fully explicit.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use super::Solver;
use super::strategy::Unknown;
use crate::{Branch, Equation, Expr, SolutionBranchList, SolveError, System};

pub(crate) fn solve_system(
    solver: &Solver,
    system: &System,
    unknowns: &[Expr],
) -> Result<SolutionBranchList, SolveError> {
    if unknowns.is_empty() {
        return Ok(Vec::new());
    }
    let unknowns = validate_unknowns(unknowns)?;
    let residuals: Vec<Expr> = system.iter().map(Equation::residual).collect();

    let branches = solve_reduced(solver, &residuals, &unknowns, 0)?;
    debug!(%system, branches = branches.len(), "system solved");
    Ok(branches)
}

fn validate_unknowns(unknowns: &[Expr]) -> Result<Vec<Unknown>, SolveError> {
    let mut validated: Vec<Unknown> = Vec::with_capacity(unknowns.len());
    for expr in unknowns {
        let unknown = Unknown::new(expr)?;
        if validated.iter().any(|u| u.symbol() == unknown.symbol()) {
            return Err(SolveError::DuplicateUnknown {
                unknown: unknown.name().to_string(),
            });
        }
        validated.push(unknown);
    }
    Ok(validated)
}

/// Two branches agree when they bind the same unknowns in the same order to
/// values that are structurally equal or numerically within `tolerance`
fn same_branch(a: &Branch, b: &Branch, tolerance: f64) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.lhs() == y.lhs()
                && (x.rhs() == y.rhs()
                    || matches!(
                        (x.rhs().eval_constant(), y.rhs().eval_constant()),
                        (Some(p), Some(q)) if (p - q).norm() <= tolerance
                    ))
        })
}

/// Append `branch` unless an equivalent branch is already present
fn merge(out: &mut SolutionBranchList, branch: Branch, tolerance: f64) {
    if !out.iter().any(|b| same_branch(b, &branch, tolerance)) {
        out.push(branch);
    }
}

/// Once every unknown is bound, the leftover equations must hold.
/// Only numeric residuals can refute a branch.
fn is_consistent(residuals: &[Expr], tolerance: f64) -> bool {
    residuals.iter().all(|r| {
        if r.is_identically_zero() {
            return true;
        }
        match r.eval_constant() {
            Some(value) => value.norm() <= tolerance,
            None => true,
        }
    })
}

fn solve_reduced(
    solver: &Solver,
    residuals: &[Expr],
    unknowns: &[Unknown],
    deferred: usize,
) -> Result<SolutionBranchList, SolveError> {
    let tolerance = solver.options().consistency_tolerance;
    let Some((first, rest)) = unknowns.split_first() else {
        return Ok(if is_consistent(residuals, tolerance) {
            vec![Branch::new()]
        } else {
            debug!(remaining = residuals.len(), "branch refuted by leftover equations");
            Vec::new()
        });
    };

    if residuals.is_empty() {
        // Nothing constrains any unknown
        return Ok(vec![unknowns.iter().map(|u| u.bind(u.expr().clone())).collect()]);
    }

    let mut out = SolutionBranchList::new();
    let mut constrained = false;
    let mut solved = false;
    let mut non_numeric = None;

    for (index, residual) in residuals.iter().enumerate() {
        if residual.diff(first.name()).is_identically_zero() {
            continue;
        }
        constrained = true;

        let roots = match solver.solve_residual(residual, first) {
            Ok(roots) => roots,
            // Other unknowns are still free in this equation
            Err(err @ SolveError::NonNumeric { .. }) => {
                debug!(%residual, unknown = first.name(), "equation not solvable yet");
                non_numeric.get_or_insert(err);
                continue;
            }
            Err(err) => return Err(err),
        };
        solved = true;
        let others: Vec<Expr> = residuals
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(_, r)| r.clone())
            .collect();

        let expand_root = |root: &Equation| -> Result<SolutionBranchList, SolveError> {
            let value = root.rhs();
            let reduced: Vec<Expr> = others
                .iter()
                .map(|r| r.substitute(first.name(), value))
                .collect();
            let tails = solve_reduced(solver, &reduced, rest, 0)?;
            Ok(tails
                .into_iter()
                .map(|tail| {
                    let explicit = tail.back_substitute(value);
                    tail.prepended(first.bind(explicit))
                })
                .collect())
        };

        #[cfg(feature = "parallel")]
        let per_root: Vec<Result<SolutionBranchList, SolveError>> =
            roots.as_slice().par_iter().map(expand_root).collect();
        #[cfg(not(feature = "parallel"))]
        let per_root: Vec<Result<SolutionBranchList, SolveError>> =
            roots.iter().map(expand_root).collect();

        for branches in per_root {
            for branch in branches? {
                merge(&mut out, branch, tolerance);
            }
        }
    }

    if !constrained {
        // Free variable: it stays as itself, the rest is solved as before
        debug!(unknown = first.name(), "free variable");
        let binding = first.bind(first.expr().clone());
        for tail in solve_reduced(solver, residuals, rest, 0)? {
            merge(&mut out, tail.prepended(binding.clone()), tolerance);
        }
    } else if !solved && let Some(err) = non_numeric {
        // Every constraining equation still needs another unknown: solve the
        // others first, at most one full rotation of the unknown order
        if deferred + 1 >= unknowns.len() {
            return Err(err);
        }
        debug!(unknown = first.name(), "deferring unknown");
        let rotated: Vec<Unknown> = rest.iter().chain(std::iter::once(first)).cloned().collect();
        for branch in solve_reduced(solver, residuals, &rotated, deferred + 1)? {
            merge(&mut out, branch.rotated_right(), tolerance);
        }
    }

    Ok(out)
}
