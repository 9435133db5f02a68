//! Hover-driven hierarchical part explorer
//!
//! The explorer owns the model hierarchy and the column stack. Hovering an
//! entry lights that entry's branch, ghosts the rest of the model, and
//! regenerates the next column from the hovered node's children.

pub mod columns;
pub mod highlight;

pub use columns::{Column, ColumnStack, Entry};

use glam::Mat4;
use log::debug;

use crate::error::ViewerError;
use crate::scene::{NodeId, SceneTree};

/// Explorer state: the hierarchy being explored plus its columns
#[derive(Debug, Clone)]
pub struct PartExplorer {
    tree: SceneTree,
    columns: ColumnStack,
}

impl PartExplorer {
    /// Take ownership of the tree and list the root's children in column 0
    pub fn new(tree: SceneTree, column_height: f32) -> Self {
        let mut columns = ColumnStack::new(column_height);
        columns.populate_column(&tree, tree.root(), 0);
        Self { tree, columns }
    }

    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    pub fn columns(&self) -> &ColumnStack {
        &self.columns
    }

    pub fn selection_path(&self) -> Vec<NodeId> {
        self.columns.selection_path()
    }

    /// Replace the transform of the tree root (model placement)
    pub fn set_root_transform(&mut self, transform: Mat4) {
        let root = self.tree.root();
        self.tree.node_mut(root).transform = transform;
    }

    /// Walk from `node`'s parent `depth` further steps up the hierarchy
    pub fn ancestor_at_depth(&self, node: NodeId, depth: usize) -> Result<NodeId, ViewerError> {
        let missing = || ViewerError::MissingNode { node, depth };
        let mut ancestor = self.tree.parent(node).ok_or_else(missing)?;
        for _ in 0..depth {
            ancestor = self.tree.parent(ancestor).ok_or_else(missing)?;
        }
        Ok(ancestor)
    }

    /// Pointer entered entry `index` of column `depth`.
    ///
    /// Re-hovering the active entry runs every step again; the outcome is
    /// the same as hovering it once.
    pub fn on_entry_hover(&mut self, depth: usize, index: usize) -> Result<(), ViewerError> {
        let node = self
            .columns
            .entry(depth, index)
            .map(|entry| entry.node)
            .ok_or(ViewerError::UnknownEntry { depth, index })?;
        let ancestor = self.ancestor_at_depth(node, depth)?;

        debug!(
            "Hover '{}' ({}) at depth {}, repainting from {}",
            self.tree.label(node),
            node,
            depth,
            ancestor
        );

        self.columns.activate(depth, index);
        highlight::paint(&mut self.tree, ancestor, false);
        highlight::paint(&mut self.tree, node, true);
        self.columns.clear_deeper(depth);
        self.columns.populate_column(&self.tree, node, depth + 1);
        Ok(())
    }

    /// Back to the initial state: original materials, only column 0 shown
    pub fn reset(&mut self) {
        highlight::restore_all(&mut self.tree);
        self.columns.clear();
        self.columns.populate_column(&self.tree, self.tree.root(), 0);
    }
}

/// Turns per-frame hover state into pointer-enter events
#[derive(Debug, Default, Clone)]
pub struct HoverTracker {
    last: Option<(usize, usize)>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the entry hovered this frame; returns it when the pointer has
    /// just entered it
    pub fn update(&mut self, hovered: Option<(usize, usize)>) -> Option<(usize, usize)> {
        let entered = match hovered {
            Some(entry) if self.last != Some(entry) => Some(entry),
            _ => None,
        };
        self.last = hovered;
        entered
    }

    /// Forget the last hovered entry, e.g. after the columns were rebuilt
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{HighlightState, MaterialId, MaterialLibrary, MeshId, SceneTreeBuilder};

    struct Fixture {
        explorer: PartExplorer,
        a: NodeId,
        a1: NodeId,
        a2: NodeId,
        b: NodeId,
    }

    /// root [A, B]; A [A1, A2]; B leaf. A1, A2 and B are meshes.
    fn fixture() -> Fixture {
        let mut builder = SceneTreeBuilder::new();
        let root = builder.root();
        let a = builder.add_group(root, "A", Mat4::IDENTITY);
        let a1 = builder.add_mesh(a, "A1", Mat4::IDENTITY, MeshId(0), MaterialId(1));
        let a2 = builder.add_mesh(a, "A2", Mat4::IDENTITY, MeshId(1), MaterialId(2));
        let b = builder.add_mesh(root, "B", Mat4::IDENTITY, MeshId(2), MaterialId(3));
        Fixture {
            explorer: PartExplorer::new(builder.build(), 120.0),
            a,
            a1,
            a2,
            b,
        }
    }

    fn labels(explorer: &PartExplorer, depth: usize) -> Vec<String> {
        explorer.columns().columns()[depth].entries.iter().map(|e| e.label.clone()).collect()
    }

    #[test]
    fn test_initial_column_lists_root_children() {
        let f = fixture();
        assert_eq!(f.explorer.columns().len(), 1);
        assert_eq!(labels(&f.explorer, 0), vec!["A", "B"]);
        assert!(f.explorer.selection_path().is_empty());
    }

    #[test]
    fn test_hover_branch_then_leaf() {
        let mut f = fixture();

        f.explorer.on_entry_hover(0, 0).unwrap();
        assert_eq!(f.explorer.columns().len(), 2);
        assert_eq!(labels(&f.explorer, 1), vec!["A1", "A2"]);

        let tree = f.explorer.tree();
        assert_eq!(tree.node(f.b).material, Some(MaterialLibrary::DIMMED));
        assert_eq!(tree.node(f.a1).material, Some(MaterialId(1)));
        assert_eq!(tree.node(f.a2).material, Some(MaterialId(2)));
        assert_eq!(f.explorer.selection_path(), vec![f.a]);

        f.explorer.on_entry_hover(0, 1).unwrap();
        assert_eq!(f.explorer.columns().len(), 1);

        let tree = f.explorer.tree();
        assert_eq!(tree.node(f.a1).material, Some(MaterialLibrary::DIMMED));
        assert_eq!(tree.node(f.a2).material, Some(MaterialLibrary::DIMMED));
        assert_eq!(tree.node(f.b).material, Some(MaterialId(3)));
        assert_eq!(tree.node(f.b).highlight, HighlightState::Highlighted);
        assert_eq!(f.explorer.selection_path(), vec![f.b]);
    }

    #[test]
    fn test_deeper_hover_highlights_only_its_subtree() {
        let mut f = fixture();
        f.explorer.on_entry_hover(0, 0).unwrap();
        f.explorer.on_entry_hover(1, 1).unwrap();

        let tree = f.explorer.tree();
        assert_eq!(tree.node(f.a1).material, Some(MaterialLibrary::DIMMED));
        assert_eq!(tree.node(f.a2).material, Some(MaterialId(2)));
        assert_eq!(tree.node(f.b).material, Some(MaterialLibrary::DIMMED));

        // A2 is a leaf: nothing deeper than column 1
        assert_eq!(f.explorer.columns().len(), 2);
        assert_eq!(f.explorer.selection_path(), vec![f.a, f.a2]);
        assert_eq!(f.explorer.selection_path().len(), 2);
    }

    #[test]
    fn test_three_levels_through_unnamed_group() {
        let mut builder = SceneTreeBuilder::new();
        let root = builder.root();
        let a = builder.add_group(root, "A", Mat4::IDENTITY);
        let unnamed = builder.add_group(a, "", Mat4::IDENTITY);
        let deep = builder.add_mesh(unnamed, "deep", Mat4::IDENTITY, MeshId(0), MaterialId(1));
        let other = builder.add_mesh(a, "other", Mat4::IDENTITY, MeshId(1), MaterialId(2));
        let b = builder.add_mesh(root, "B", Mat4::IDENTITY, MeshId(2), MaterialId(3));
        let mut explorer = PartExplorer::new(builder.build(), 120.0);

        explorer.on_entry_hover(0, 0).unwrap();
        assert_eq!(labels(&explorer, 1), vec!["", "other"]);

        explorer.on_entry_hover(1, 0).unwrap();
        assert_eq!(explorer.columns().len(), 3);
        assert_eq!(labels(&explorer, 2), vec!["deep"]);
        let tree = explorer.tree();
        assert_eq!(tree.node(deep).material, Some(MaterialId(1)));
        assert_eq!(tree.node(other).material, Some(MaterialLibrary::DIMMED));
        assert_eq!(tree.node(b).material, Some(MaterialLibrary::DIMMED));

        explorer.on_entry_hover(2, 0).unwrap();
        assert_eq!(explorer.columns().len(), 3);
        assert_eq!(explorer.selection_path(), vec![a, unnamed, deep]);
        assert_eq!(explorer.tree().node(deep).material, Some(MaterialId(1)));

        explorer.on_entry_hover(0, 1).unwrap();
        assert_eq!(explorer.columns().len(), 1);
        assert_eq!(explorer.selection_path(), vec![b]);
        let tree = explorer.tree();
        assert_eq!(tree.node(deep).material, Some(MaterialLibrary::DIMMED));
        assert_eq!(tree.node(other).material, Some(MaterialLibrary::DIMMED));
        assert_eq!(tree.node(b).material, Some(MaterialId(3)));
    }

    #[test]
    fn test_switching_parent_replaces_next_column() {
        let mut builder = SceneTreeBuilder::new();
        let root = builder.root();
        let x = builder.add_group(root, "X", Mat4::IDENTITY);
        builder.add_group(x, "X1", Mat4::IDENTITY);
        let y = builder.add_group(root, "Y", Mat4::IDENTITY);
        builder.add_group(y, "Y1", Mat4::IDENTITY);
        builder.add_group(y, "Y2", Mat4::IDENTITY);
        let mut explorer = PartExplorer::new(builder.build(), 120.0);

        explorer.on_entry_hover(0, 0).unwrap();
        explorer.on_entry_hover(0, 1).unwrap();
        assert_eq!(labels(&explorer, 1), vec!["Y1", "Y2"]);
    }

    #[test]
    fn test_rehover_is_idempotent() {
        let mut f = fixture();
        f.explorer.on_entry_hover(0, 0).unwrap();
        let columns_once = f.explorer.columns().columns().to_vec();
        let materials_once: Vec<_> = [f.a1, f.a2, f.b].iter().map(|&n| f.explorer.tree().node(n).material).collect();

        f.explorer.on_entry_hover(0, 0).unwrap();
        let materials_twice: Vec<_> = [f.a1, f.a2, f.b].iter().map(|&n| f.explorer.tree().node(n).material).collect();
        assert_eq!(f.explorer.columns().columns(), columns_once.as_slice());
        assert_eq!(materials_once, materials_twice);
    }

    #[test]
    fn test_single_active_entry_per_column() {
        let mut f = fixture();
        for index in [0, 1, 0, 1, 1] {
            f.explorer.on_entry_hover(0, index).unwrap();
            for column in f.explorer.columns().columns() {
                assert!(column.entries.iter().filter(|e| e.active).count() <= 1);
            }
        }
    }

    #[test]
    fn test_unknown_entry_is_rejected() {
        let mut f = fixture();
        let err = f.explorer.on_entry_hover(3, 0).unwrap_err();
        assert_eq!(err, ViewerError::UnknownEntry { depth: 3, index: 0 });
        assert_eq!(f.explorer.columns().len(), 1);
    }

    #[test]
    fn test_ancestor_resolution() {
        let f = fixture();
        let root = f.explorer.tree().root();
        assert_eq!(f.explorer.ancestor_at_depth(f.a, 0), Ok(root));
        assert_eq!(f.explorer.ancestor_at_depth(f.a1, 1), Ok(root));
        assert_eq!(
            f.explorer.ancestor_at_depth(f.a1, 2),
            Err(ViewerError::MissingNode { node: f.a1, depth: 2 })
        );
    }

    #[test]
    fn test_reset_restores_materials_and_columns() {
        let mut f = fixture();
        f.explorer.on_entry_hover(0, 0).unwrap();
        f.explorer.reset();

        assert_eq!(f.explorer.columns().len(), 1);
        assert!(f.explorer.selection_path().is_empty());
        assert_eq!(f.explorer.tree().node(f.b).material, Some(MaterialId(3)));
    }

    #[test]
    fn test_hover_tracker_fires_on_enter_only() {
        let mut tracker = HoverTracker::new();
        assert_eq!(tracker.update(Some((0, 1))), Some((0, 1)));
        assert_eq!(tracker.update(Some((0, 1))), None);
        assert_eq!(tracker.update(None), None);
        assert_eq!(tracker.update(Some((0, 1))), Some((0, 1)));
        assert_eq!(tracker.update(Some((1, 0))), Some((1, 0)));
    }
}
