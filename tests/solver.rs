use mipbb::config::SolverConfig;
use mipbb::cuts::CuttingMode;
use mipbb::lp::{EnumBackend, LpModel};
use mipbb::model::{Constraint, ParsedInstance, Variable};
use mipbb::search::Solver;
use mipbb::state::State;

fn config(mutate: impl FnOnce(&mut SolverConfig)) -> SolverConfig {
    let mut c = SolverConfig::default();
    mutate(&mut c);
    c
}

fn run(instance: ParsedInstance, config: SolverConfig) -> mipbb::MipState {
    let lp = LpModel::from_parsed(instance, Box::new(EnumBackend::new()), &config);
    Solver::new(config).run(lp).unwrap()
}

/// `min x + y` s.t. `x + y >= 2`, both integer in `[0,5]`: every vertex of
/// this polytope is already integral, so the root relaxation alone is the
/// answer and the search never opens a stack.
fn already_integral_instance() -> ParsedInstance {
    let mut c = Constraint::new(0, 2.0, f64::INFINITY);
    c.add_term(0, 1.0);
    c.add_term(1, 1.0);
    let x = Variable::new(0, "x", 0.0, 5.0, true);
    let y = Variable::new(1, "y", 0.0, 5.0, true);
    ParsedInstance { variables: vec![x, y], constraints: vec![c], objective: vec![1.0, 1.0] }
}

#[test]
fn root_optimal_integer_converges_without_branching() {
    let state = run(already_integral_instance(), config(|_| {}));
    assert_eq!(state.state, State::Converged);
    assert_eq!(state.branch_count, 0);
    assert!((state.primal.unwrap() - 2.0).abs() < 1e-6);
}

/// `min -(x + y)` s.t. `x + y <= 1.5`, both binary: the unit square cut by
/// the diagonal has two fractional vertices, `(1, 0.5)` and `(0.5, 1)`, so
/// the root relaxation is `Branchable` and the search must branch at least
/// once to reach an integral incumbent.
fn fractional_binary_instance() -> ParsedInstance {
    let mut c = Constraint::new(0, f64::NEG_INFINITY, 1.5);
    c.add_term(0, 1.0);
    c.add_term(1, 1.0);
    let x = Variable::new(0, "x", 0.0, 1.0, true);
    let y = Variable::new(1, "y", 0.0, 1.0, true);
    ParsedInstance { variables: vec![x, y], constraints: vec![c], objective: vec![-1.0, -1.0] }
}

#[test]
fn small_pure_integer_feasibility_finds_the_optimum_through_branching() {
    let state = run(fractional_binary_instance(), config(|_| {}));
    assert_eq!(state.state, State::Converged);
    assert!(state.branch_count > 0);
    assert!((state.primal.unwrap() - (-1.0)).abs() < 1e-6);
    assert_eq!(state.incumbent.len(), 2);
    let sum: f64 = state.incumbent.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
}

/// `x` integer, pinned to `1.5` by an equality row: the root relaxation is
/// fractional and `Branchable`, but both branch children restrict `x` to an
/// integer range that excludes `1.5`, so every leaf below the root is
/// `Infeasible`. The whole instance is genuinely infeasible, and each
/// infeasible leaf should drive a FUIP cut.
fn pinned_fractional_instance() -> ParsedInstance {
    let mut c = Constraint::new(0, 1.5, 1.5);
    c.add_term(0, 1.0);
    let x = Variable::new(0, "x", 0.0, 5.0, true);
    ParsedInstance { variables: vec![x], constraints: vec![c], objective: vec![1.0] }
}

#[test]
fn infeasible_leaves_derive_fuip_cuts_and_the_search_reports_infeasible() {
    let state = run(
        pinned_fractional_instance(),
        config(|c| {
            // Presolve would otherwise reject the pinned row's fractional
            // equality at the root, before any branch exists to cut from.
            c.presolve_enabled = false;
            c.cutting_mode = CuttingMode::Fuip;
        }),
    );
    assert_eq!(state.state, State::Infeasible);
    assert!(state.cut_count > 0);
}

#[test]
fn trivial_cut_gating_respects_the_trivial_graph_cut_flag() {
    let rejecting = run(
        pinned_fractional_instance(),
        config(|c| {
            c.presolve_enabled = false;
            c.cutting_mode = CuttingMode::Fuip;
            c.trivial_graph_cut = false;
        }),
    );
    assert_eq!(rejecting.cut_count, 0);

    let accepting = run(
        pinned_fractional_instance(),
        config(|c| {
            c.presolve_enabled = false;
            c.cutting_mode = CuttingMode::Fuip;
            c.trivial_graph_cut = true;
        }),
    );
    assert!(accepting.cut_count > 0);
}

#[test]
fn sibling_branches_do_not_leak_bound_changes_into_each_other() {
    let cfg = SolverConfig::default();
    let lp = LpModel::from_parsed(fractional_binary_instance(), Box::new(EnumBackend::new()), &cfg);
    let mut left = lp.copy();
    let mut right = lp.copy();

    left.change_var_bounds(0, 0.0, 0.0);
    left.solve(None).unwrap();
    right.solve(None).unwrap();

    assert_eq!(right.vars[0].bound().lower, 0.0);
    assert_eq!(right.vars[0].bound().upper, 1.0);
}

/// A generous convergence tolerance should let the primal/dual gap close
/// as soon as the first incumbent is found, without the stack having to
/// empty out through exhaustive branching.
#[test]
fn a_wide_convergence_tolerance_stops_the_search_early() {
    let state = run(
        fractional_binary_instance(),
        config(|c| {
            c.convergence_tolerance = 10.0;
        }),
    );
    assert_eq!(state.state, State::Converged);
    assert!(state.resolved_node_count < 4);
}
