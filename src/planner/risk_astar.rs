//! Risk-weighted best-first search.
//!
//! Step cost into a cell is `1 + danger * risk_weight`, priority is cost so far
//! plus Manhattan distance to the goal. The risk term makes the heuristic
//! inadmissible, so this is a greedy risk-aware search rather than a strict
//! shortest-path guarantee. Equal priorities pop in discovery order.

use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use tracing::debug;

use crate::error::Result;
use crate::planner::{PlanContext, PlanStep, PlanningStrategy};
use crate::types::Cell;

type OpenEntry = (Reverse<OrderedFloat<f32>>, Reverse<u64>, Cell);

#[derive(Clone, Copy, Debug, Default)]
pub struct RiskWeightedSearch;

impl RiskWeightedSearch {
    /// Full path from the cell after `ctx.start` up to and including the goal
    pub fn find_path(&self, ctx: &PlanContext<'_>) -> Option<Vec<Cell>> {
        let (start, goal) = (ctx.start, ctx.goal);
        if start == goal || !ctx.is_traversable(goal) {
            return None;
        }

        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut cost_so_far: HashMap<Cell, f32> = HashMap::new();
        let mut sequence = 0u64;

        cost_so_far.insert(start, 0.0);
        open.push((Reverse(OrderedFloat(0.0)), Reverse(sequence), start));

        while let Some((Reverse(OrderedFloat(priority)), _, current)) = open.pop() {
            if current == goal {
                break;
            }
            let current_cost = cost_so_far.get(&current).copied().unwrap_or(f32::INFINITY);
            // stale entry, a cheaper route was queued later
            if priority > current_cost + current.manhattan(goal) as f32 {
                continue;
            }

            for next in ctx.successors(current) {
                let danger = ctx.beliefs.probability(next);
                let cost = current_cost + 1.0 + danger * ctx.config.risk_weight;
                let improved = cost_so_far.get(&next).map_or(true, |&known| cost < known);
                if improved {
                    cost_so_far.insert(next, cost);
                    came_from.insert(next, current);
                    sequence += 1;
                    let priority = cost + next.manhattan(goal) as f32;
                    open.push((Reverse(OrderedFloat(priority)), Reverse(sequence), next));
                }
            }
        }

        let mut path = Vec::new();
        let mut current = goal;
        while current != start {
            path.push(current);
            current = *came_from.get(&current)?;
        }
        path.reverse();
        Some(path)
    }
}

impl PlanningStrategy for RiskWeightedSearch {
    fn name(&self) -> &'static str {
        "risk-weighted"
    }

    fn plan(&self, ctx: &PlanContext<'_>) -> Result<PlanStep> {
        let path = self.find_path(ctx).ok_or_else(|| ctx.no_path())?;
        let step = PlanStep::from_path(ctx, &path).ok_or_else(|| ctx.no_path())?;
        debug!(
            from = %ctx.start,
            next = %step.next,
            danger = step.danger,
            distance = step.distance,
            path_len = step.path_len,
            "risk-weighted step"
        );
        Ok(step)
    }
}
