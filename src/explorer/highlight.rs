//! Material swapping for hovered and non-hovered subtrees

use crate::scene::{HighlightState, MaterialLibrary, NodeId, SceneTree};

/// Paint `node` and its whole subtree.
///
/// Every mesh node first captures its original material (once per session).
/// Then it is either restored to that material (`hovered`) or switched to
/// the shared dimmed material. Group nodes carry no material and are only
/// walked through.
pub fn paint(tree: &mut SceneTree, node: NodeId, hovered: bool) {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        paint_node(tree, current, hovered);
        stack.extend_from_slice(tree.children(current));
    }
}

fn paint_node(tree: &mut SceneTree, id: NodeId, hovered: bool) {
    let node = tree.node_mut(id);
    if !node.is_mesh() {
        return;
    }
    if node.saved_material.is_none() {
        node.saved_material = node.material;
    }
    if hovered {
        node.material = node.saved_material;
        node.highlight = HighlightState::Highlighted;
    } else {
        node.material = Some(MaterialLibrary::DIMMED);
        node.highlight = HighlightState::Dimmed;
    }
}

/// Put every mesh back on its captured material and forget the highlight
pub fn restore_all(tree: &mut SceneTree) {
    let ids: Vec<NodeId> = tree.ids().collect();
    for id in ids {
        let node = tree.node_mut(id);
        if let Some(saved) = node.saved_material {
            node.material = Some(saved);
        }
        node.highlight = HighlightState::Neutral;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MaterialId, MeshId, SceneTreeBuilder};
    use glam::Mat4;

    #[test]
    fn test_dim_then_highlight_restores_original() {
        let mut builder = SceneTreeBuilder::new();
        let root = builder.root();
        let part = builder.add_mesh(root, "part", Mat4::IDENTITY, MeshId(0), MaterialId(5));
        let mut tree = builder.build();

        paint(&mut tree, root, false);
        assert_eq!(tree.node(part).material, Some(MaterialLibrary::DIMMED));
        assert_eq!(tree.node(part).highlight, HighlightState::Dimmed);
        assert_eq!(tree.node(part).saved_material, Some(MaterialId(5)));

        paint(&mut tree, part, true);
        assert_eq!(tree.node(part).material, Some(MaterialId(5)));
        assert_eq!(tree.node(part).highlight, HighlightState::Highlighted);
    }

    #[test]
    fn test_capture_happens_once() {
        let mut builder = SceneTreeBuilder::new();
        let root = builder.root();
        let part = builder.add_mesh(root, "part", Mat4::IDENTITY, MeshId(0), MaterialId(3));
        let mut tree = builder.build();

        // Dimmed twice in a row: the second capture must not save the dimmed material
        paint(&mut tree, part, false);
        paint(&mut tree, part, false);
        assert_eq!(tree.node(part).saved_material, Some(MaterialId(3)));

        paint(&mut tree, part, true);
        assert_eq!(tree.node(part).material, Some(MaterialId(3)));
    }

    #[test]
    fn test_recursion_passes_through_groups() {
        let mut builder = SceneTreeBuilder::new();
        let root = builder.root();
        let group = builder.add_group(root, "group", Mat4::IDENTITY);
        let inner = builder.add_group(group, "inner", Mat4::IDENTITY);
        let leaf = builder.add_mesh(inner, "leaf", Mat4::IDENTITY, MeshId(0), MaterialId(1));
        let mut tree = builder.build();

        paint(&mut tree, group, false);
        assert_eq!(tree.node(leaf).material, Some(MaterialLibrary::DIMMED));
        assert_eq!(tree.node(group).material, None);
        assert_eq!(tree.node(group).highlight, HighlightState::Neutral);
    }

    #[test]
    fn test_restore_all() {
        let mut builder = SceneTreeBuilder::new();
        let root = builder.root();
        let part = builder.add_mesh(root, "part", Mat4::IDENTITY, MeshId(0), MaterialId(2));
        let mut tree = builder.build();

        paint(&mut tree, root, false);
        restore_all(&mut tree);
        assert_eq!(tree.node(part).material, Some(MaterialId(2)));
        assert_eq!(tree.node(part).highlight, HighlightState::Neutral);
    }
}
