//! Breadth-first exploration strategies.
//!
//! Both strategies grow a breadth-first tree from the agent over traversable
//! cells. Every reached cell owns exactly one loop-free path back to the
//! agent (its first discovery), so the candidate set is bounded by the grid
//! area.
//!
//! A risk-free path to the goal always wins. Otherwise:
//!
//! - [`FrontierRankedSearch`] ranks every path by class (frontier-extending,
//!   then risk-free, then risky), then by accumulated danger and revisit
//!   cost, then by length.
//! - [`InformationGainSearch`] heads for the first unknown cell discovered.
//!
//! Once nothing reachable touches unknown territory, both fall back to the
//! full ranking over the risk-free and risky classes. No path is reported
//! only when the tree is empty, i.e. the agent is boxed in. Revisit costs and
//! the episode step cap bound any wandering that follows.

use ordered_float::OrderedFloat;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

use crate::belief::CellStatus;
use crate::error::Result;
use crate::planner::{PlanContext, PlanStep, PlanningStrategy};
use crate::types::Cell;

/// Ranking class of a candidate path, best first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PathClass {
    /// Some cell on the path is unknown or touches an unknown cell
    Frontier,
    /// Zero danger on every cell
    RiskFree,
    Risky,
}

/// A scored candidate path
#[derive(Clone, Debug)]
pub struct Candidate {
    pub path: Vec<Cell>,
    pub class: PathClass,
    pub cost: f32,
}

impl Candidate {
    fn rank(&self) -> (PathClass, OrderedFloat<f32>, usize) {
        (self.class, OrderedFloat(self.cost), self.path.len())
    }

    fn target(&self) -> Option<Cell> {
        self.path.last().copied()
    }
}

/// Breadth-first tree rooted at the agent
pub struct BfsTree {
    root: Cell,
    /// Reached cells in discovery order, root excluded
    order: Vec<Cell>,
    parent: HashMap<Cell, Cell>,
}

impl BfsTree {
    pub fn grow(ctx: &PlanContext<'_>) -> Self {
        let root = ctx.start;
        let mut order = Vec::new();
        let mut parent = HashMap::new();
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            for next in ctx.successors(current) {
                if next == root || parent.contains_key(&next) {
                    continue;
                }
                parent.insert(next, current);
                order.push(next);
                queue.push_back(next);
            }
        }

        BfsTree { root, order, parent }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.parent.contains_key(&cell)
    }

    pub fn reached(&self) -> &[Cell] {
        &self.order
    }

    /// Path from the cell after the root to `target`, inclusive
    pub fn path_to(&self, target: Cell) -> Option<Vec<Cell>> {
        let mut path = Vec::new();
        let mut current = target;
        while current != self.root {
            path.push(current);
            current = *self.parent.get(&current)?;
        }
        path.reverse();
        Some(path)
    }
}

/// Score one path under the context's beliefs and visit counts
pub fn classify(ctx: &PlanContext<'_>, path: Vec<Cell>) -> Candidate {
    let size = ctx.beliefs.size();
    let touches_unknown = path.iter().any(|&cell| {
        ctx.beliefs.status(cell) == CellStatus::Unknown
            || cell
                .neighbors(size)
                .any(|n| ctx.beliefs.status(n) == CellStatus::Unknown)
    });
    let risk_free = path.iter().all(|&cell| ctx.beliefs.probability(cell) == 0.0);
    let cost = path
        .iter()
        .map(|&cell| {
            ctx.beliefs.probability(cell) * ctx.config.risk_weight
                + ctx.visits.get(cell) as f32 * ctx.config.revisit_weight
        })
        .sum();

    let class = if touches_unknown {
        PathClass::Frontier
    } else if risk_free {
        PathClass::RiskFree
    } else {
        PathClass::Risky
    };
    Candidate { path, class, cost }
}

fn goal_candidate(ctx: &PlanContext<'_>, tree: &BfsTree) -> Option<Candidate> {
    if !tree.contains(ctx.goal) {
        return None;
    }
    tree.path_to(ctx.goal).map(|path| classify(ctx, path))
}

fn is_risk_free(ctx: &PlanContext<'_>, candidate: &Candidate) -> bool {
    candidate
        .path
        .iter()
        .all(|&cell| ctx.beliefs.probability(cell) == 0.0)
}

/// Risk-free goal path, if the goal is reachable without any danger
fn safe_goal(ctx: &PlanContext<'_>, tree: &BfsTree) -> Option<Candidate> {
    goal_candidate(ctx, tree).filter(|c| is_risk_free(ctx, c))
}

/// Best path in the highest-priority non-empty class
fn best_ranked(ctx: &PlanContext<'_>, tree: &BfsTree) -> Option<Candidate> {
    tree.reached()
        .iter()
        .filter_map(|&cell| tree.path_to(cell))
        .map(|path| classify(ctx, path))
        .min_by_key(Candidate::rank)
}

fn finish(
    strategy: &'static str,
    ctx: &PlanContext<'_>,
    candidate: Option<Candidate>,
) -> Result<PlanStep> {
    let candidate = candidate.ok_or_else(|| ctx.no_path())?;
    let step = PlanStep::from_path(ctx, &candidate.path).ok_or_else(|| ctx.no_path())?;
    debug!(
        strategy,
        from = %ctx.start,
        next = %step.next,
        target = ?candidate.target(),
        class = ?candidate.class,
        cost = candidate.cost,
        "exploration step"
    );
    Ok(step)
}

/// Ranks every breadth-first path by exploration value
#[derive(Clone, Copy, Debug, Default)]
pub struct FrontierRankedSearch;

impl FrontierRankedSearch {
    /// Best candidate, ranked as described in the module docs
    pub fn select(&self, ctx: &PlanContext<'_>) -> Option<Candidate> {
        let tree = BfsTree::grow(ctx);
        safe_goal(ctx, &tree).or_else(|| best_ranked(ctx, &tree))
    }
}

impl PlanningStrategy for FrontierRankedSearch {
    fn name(&self) -> &'static str {
        "frontier-ranked"
    }

    fn plan(&self, ctx: &PlanContext<'_>) -> Result<PlanStep> {
        finish(self.name(), ctx, self.select(ctx))
    }
}

/// Greedy frontier search: the first unknown cell reached wins
#[derive(Clone, Copy, Debug, Default)]
pub struct InformationGainSearch;

impl InformationGainSearch {
    pub fn select(&self, ctx: &PlanContext<'_>) -> Option<Candidate> {
        let tree = BfsTree::grow(ctx);
        if let Some(goal) = safe_goal(ctx, &tree) {
            return Some(goal);
        }

        tree.reached()
            .iter()
            .find(|&&cell| ctx.beliefs.status(cell) == CellStatus::Unknown)
            .and_then(|&cell| tree.path_to(cell))
            .map(|path| classify(ctx, path))
            .or_else(|| best_ranked(ctx, &tree))
    }
}

impl PlanningStrategy for InformationGainSearch {
    fn name(&self) -> &'static str {
        "information-gain"
    }

    fn plan(&self, ctx: &PlanContext<'_>) -> Result<PlanStep> {
        finish(self.name(), ctx, self.select(ctx))
    }
}
