//! UCT (Upper Confidence bound applied to Trees) child selection.

use crate::error::SearchError;
use crate::game::GameState;
use crate::search_node::{first_best, Estimate};
use crate::tree::SearchTree;
use ego_tree::NodeId;

/// Exploration constant of the UCB1 formula.
pub const EXPLORATION_PARAMETER: f64 = std::f64::consts::SQRT_2;

/// Scores a child for descent: `value / visits + C * sqrt(ln(parent_visits) / visits)`.
///
/// A child that was never visited scores [`Estimate::Unvisited`], which outranks every
/// finite score.
pub fn uct_score(value: i64, parent_visits: u32, node_visits: u32) -> Estimate {
    if node_visits == 0 {
        return Estimate::Unvisited;
    }

    let visits = f64::from(node_visits);
    // a visited child implies a visited parent, clamp anyway so ln() stays finite
    let parent_visits = f64::from(parent_visits.max(1));
    Estimate::Score(
        (value as f64) / visits + EXPLORATION_PARAMETER * f64::sqrt(f64::ln(parent_visits) / visits),
    )
}

/// Returns the child of `id` with the highest UCT score, or `None` for a leaf.
///
/// The parent visit count is read once from `id`. Ties go to the first child.
pub fn select_child<G: GameState>(
    tree: &SearchTree<G>,
    id: NodeId,
) -> Result<Option<NodeId>, SearchError> {
    let parent_visits = tree.node(id)?.visits;
    let mut scored = Vec::new();
    for child_id in tree.children(id)? {
        let child = tree.node(child_id)?;
        scored.push((child_id, uct_score(child.value, parent_visits, child.visits)));
    }
    Ok(first_best(scored))
}
