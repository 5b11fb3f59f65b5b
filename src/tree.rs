use crate::error::SearchError;
use crate::game::{GameState, Player};
use crate::random::RandomGenerator;
use crate::search_node::{first_best, SearchNode};
use ego_tree::{NodeId, Tree};

/// Arena holding the nodes of one search invocation.
///
/// Parents own their children through the arena, children point back to their parent
/// by `NodeId`. The whole tree is dropped when the search returns.
pub struct SearchTree<G: GameState> {
    tree: Tree<SearchNode<G>>,
}

impl<G: GameState> SearchTree<G> {
    /// Creates a tree whose root is a copy of `state` with `player` to move.
    pub fn new(state: &G, player: Player) -> Self {
        Self {
            tree: Tree::new(SearchNode::new_root(state, player)),
        }
    }

    /// Id of the root node.
    pub fn root_id(&self) -> NodeId {
        self.tree.root().id()
    }

    /// Returns the node stored under `id`.
    pub fn node(&self, id: NodeId) -> Result<&SearchNode<G>, SearchError> {
        self.tree
            .get(id)
            .map(|node| node.value())
            .ok_or_else(|| missing(id))
    }

    /// Applies `update` to the node stored under `id`.
    pub fn update<F>(&mut self, id: NodeId, update: F) -> Result<(), SearchError>
    where
        F: FnOnce(&mut SearchNode<G>),
    {
        let mut node = self.tree.get_mut(id).ok_or_else(|| missing(id))?;
        update(node.value());
        Ok(())
    }

    /// The parent of `id`, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, SearchError> {
        let node = self.tree.get(id).ok_or_else(|| missing(id))?;
        Ok(node.parent().map(|parent| parent.id()))
    }

    /// Ids of the children of `id`, in move generation order.
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>, SearchError> {
        let node = self.tree.get(id).ok_or_else(|| missing(id))?;
        Ok(node.children().map(|child| child.id()).collect())
    }

    /// Whether `id` has been expanded into at least one child.
    pub fn has_children(&self, id: NodeId) -> Result<bool, SearchError> {
        let node = self.tree.get(id).ok_or_else(|| missing(id))?;
        Ok(node.has_children())
    }

    /// Creates one child per legal move of the node's state and returns how many were added.
    ///
    /// Each child gets its own copy of the parent state with the move applied and the
    /// opponent to move. A node that already has children is left untouched.
    pub fn expand(&mut self, id: NodeId) -> Result<usize, SearchError> {
        if self.has_children(id)? {
            return Ok(0);
        }

        let parent = self.node(id)?;
        let children: Vec<SearchNode<G>> = parent
            .state
            .legal_moves()
            .into_iter()
            .map(|mv| {
                let mut state = parent.state.clone();
                state.apply_move(&mv);
                SearchNode::new_child(state, parent.player_to_move, mv)
            })
            .collect();

        let count = children.len();
        let mut node = self.tree.get_mut(id).ok_or_else(|| missing(id))?;
        for child in children {
            node.append(child);
        }
        Ok(count)
    }

    /// Returns a uniformly random child of `id`.
    pub fn pick_random_child<K: RandomGenerator>(
        &self,
        id: NodeId,
        random: &mut K,
    ) -> Result<NodeId, SearchError> {
        let children = self.children(id)?;
        random
            .pick_from_slice(&children)
            .copied()
            .ok_or_else(|| SearchError::InvalidState("cannot pick a child of a leaf".to_string()))
    }

    /// Returns the child of `id` with the highest average reward.
    ///
    /// An unvisited child outranks every visited one. Ties go to the first child.
    pub fn pick_best_by_average_reward(&self, id: NodeId) -> Result<NodeId, SearchError> {
        let node = self.tree.get(id).ok_or_else(|| missing(id))?;
        first_best(
            node.children()
                .map(|child| (child.id(), child.value().average_reward())),
        )
        .ok_or_else(|| SearchError::InvalidState("cannot rank the children of a leaf".to_string()))
    }

    /// Returns `id` followed by all of its ancestors up to and including the root.
    pub fn path_to_root(&self, id: NodeId) -> Result<Vec<NodeId>, SearchError> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current)? {
            path.push(parent);
            current = parent;
        }
        Ok(path)
    }

    /// The move stored on `id`. Only the root has none.
    pub fn last_move(&self, id: NodeId) -> Result<G::Move, SearchError> {
        self.node(id)?
            .last_move
            .clone()
            .ok_or_else(|| SearchError::InvalidState("the root node has no move".to_string()))
    }
}

fn missing(id: NodeId) -> SearchError {
    SearchError::InvalidState(format!("node {:?} is not part of the tree", id))
}

#[cfg(test)]
mod tests {
    use super::SearchTree;
    use crate::error::SearchError;
    use crate::game::{GameState, Player};
    use crate::games::nim::Nim;
    use crate::random::CustomNumberGenerator;

    #[test]
    fn expand_creates_one_child_per_move() {
        // arrange
        let mut tree = SearchTree::new(&Nim::new(5), Player::First);
        let root = tree.root_id();

        // act
        let added = tree.expand(root).unwrap();

        // assert
        assert_eq!(added, 3);
        let children = tree.children(root).unwrap();
        let moves: Vec<u8> = children
            .iter()
            .map(|id| tree.last_move(*id).unwrap())
            .collect();
        assert_eq!(moves, vec![1, 2, 3]);
        for (id, taken) in children.iter().zip([1u8, 2, 3]) {
            let child = tree.node(*id).unwrap();
            assert_eq!(child.player_to_move, Player::Second);
            assert_eq!(child.state.stones(), 5 - taken);
            assert_eq!(tree.parent(*id).unwrap(), Some(root));
        }
    }

    #[test]
    fn expanding_twice_does_not_duplicate() {
        let mut tree = SearchTree::new(&Nim::new(4), Player::First);
        let root = tree.root_id();
        tree.expand(root).unwrap();
        assert_eq!(tree.expand(root).unwrap(), 0);
        assert_eq!(tree.children(root).unwrap().len(), 3);
    }

    #[test]
    fn expanding_a_terminal_state_adds_nothing() {
        let mut tree = SearchTree::new(&Nim::new(0), Player::First);
        let root = tree.root_id();
        assert_eq!(tree.expand(root).unwrap(), 0);
        assert!(!tree.has_children(root).unwrap());
    }

    #[test]
    fn children_do_not_share_state_with_the_root() {
        // arrange
        let original = Nim::new(6);
        let mut tree = SearchTree::new(&original, Player::First);
        let root = tree.root_id();
        tree.expand(root).unwrap();
        let child = tree.children(root).unwrap()[0];

        // act
        tree.update(child, |node| node.state.apply_move(&1)).unwrap();

        // assert
        assert_eq!(tree.node(root).unwrap().state.stones(), 6);
        assert_eq!(tree.node(child).unwrap().state.stones(), 4);
        assert_eq!(original.stones(), 6);
    }

    #[test]
    fn random_child_of_leaf_is_invalid_state() {
        let tree = SearchTree::new(&Nim::new(3), Player::First);
        let mut random = CustomNumberGenerator::default();
        let result = tree.pick_random_child(tree.root_id(), &mut random);
        assert!(matches!(result, Err(SearchError::InvalidState(_))));
        assert!(matches!(
            tree.pick_best_by_average_reward(tree.root_id()),
            Err(SearchError::InvalidState(_))
        ));
    }

    #[test]
    fn random_child_is_a_child() {
        let mut tree = SearchTree::new(&Nim::new(7), Player::First);
        let root = tree.root_id();
        tree.expand(root).unwrap();
        let children = tree.children(root).unwrap();
        let mut random = CustomNumberGenerator::new(11);
        for _ in 0..20 {
            let picked = tree.pick_random_child(root, &mut random).unwrap();
            assert!(children.contains(&picked));
        }
    }

    #[test]
    fn unvisited_child_wins_average_reward_ranking() {
        // arrange
        let mut tree = SearchTree::new(&Nim::new(5), Player::First);
        let root = tree.root_id();
        tree.expand(root).unwrap();
        let children = tree.children(root).unwrap();
        tree.update(children[0], |node| {
            node.visits = 1;
            node.value = i64::from(i32::MAX);
        })
        .unwrap();
        tree.update(children[2], |node| {
            node.visits = 3;
            node.value = 30;
        })
        .unwrap();

        // act
        let best = tree.pick_best_by_average_reward(root).unwrap();

        // assert
        assert_eq!(best, children[1]);
    }

    #[test]
    fn average_reward_ties_go_to_first_child() {
        let mut tree = SearchTree::new(&Nim::new(5), Player::First);
        let root = tree.root_id();
        tree.expand(root).unwrap();
        let children = tree.children(root).unwrap();
        for id in &children {
            tree.update(*id, |node| {
                node.visits = 2;
                node.value = 8;
            })
            .unwrap();
        }
        tree.update(children[0], |node| node.value = 2).unwrap();

        assert_eq!(tree.pick_best_by_average_reward(root).unwrap(), children[1]);
    }

    #[test]
    fn path_to_root_ends_at_root() {
        let mut tree = SearchTree::new(&Nim::new(5), Player::First);
        let root = tree.root_id();
        tree.expand(root).unwrap();
        let child = tree.children(root).unwrap()[0];
        tree.expand(child).unwrap();
        let grandchild = tree.children(child).unwrap()[1];

        assert_eq!(
            tree.path_to_root(grandchild).unwrap(),
            vec![grandchild, child, root]
        );
        assert!(matches!(
            tree.last_move(root),
            Err(SearchError::InvalidState(_))
        ));
    }
}
