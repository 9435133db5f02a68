//! Per-depth columns of the part explorer
//!
//! Column `d` lists the children of the entry selected in column `d - 1`
//! (column 0 lists the children of the tree root). Columns are created
//! lazily, never reordered, and dropped when a shallower selection changes.

use egui::Color32;

use crate::scene::{NodeId, SceneTree};
use crate::theme;

/// One row of a column, bound to a single node
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub node: NodeId,
    pub depth: usize,
    pub label: String,
    pub active: bool,
}

/// UI listing of sibling nodes at one depth
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub depth: usize,
    pub height: f32,
    pub background: Color32,
    pub entries: Vec<Entry>,
}

impl Column {
    /// Index of the active entry, if any
    pub fn active_index(&self) -> Option<usize> {
        self.entries.iter().position(|entry| entry.active)
    }

    pub fn active_node(&self) -> Option<NodeId> {
        self.entries.iter().find(|entry| entry.active).map(|entry| entry.node)
    }
}

/// Ordered stack of columns, index == depth
#[derive(Debug, Clone)]
pub struct ColumnStack {
    columns: Vec<Column>,
    column_height: f32,
}

impl ColumnStack {
    pub fn new(column_height: f32) -> Self {
        Self {
            columns: Vec::new(),
            column_height,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, depth: usize) -> Option<&Column> {
        self.columns.get(depth)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn entry(&self, depth: usize, index: usize) -> Option<&Entry> {
        self.columns.get(depth).and_then(|column| column.entries.get(index))
    }

    /// Existing column at `depth`, or a freshly styled empty one appended in
    /// depth order
    pub fn ensure_column(&mut self, depth: usize) -> &mut Column {
        while self.columns.len() <= depth {
            let new_depth = self.columns.len();
            self.columns.push(Column {
                depth: new_depth,
                height: self.column_height,
                background: theme::column_color(new_depth),
                entries: Vec::new(),
            });
        }
        &mut self.columns[depth]
    }

    /// Append one entry per child of `parent` to the column at `depth`.
    /// A parent without children leaves the stack untouched.
    pub fn populate_column(&mut self, tree: &SceneTree, parent: NodeId, depth: usize) {
        let children = tree.children(parent);
        if children.is_empty() {
            return;
        }
        let column = self.ensure_column(depth);
        column.entries.extend(children.iter().map(|&child| Entry {
            node: child,
            depth,
            label: tree.label(child).to_string(),
            active: false,
        }));
    }

    /// Delete every column deeper than `depth`
    pub fn clear_deeper(&mut self, depth: usize) {
        self.columns.truncate(depth + 1);
    }

    /// Make `index` the only active entry of column `depth`
    pub fn activate(&mut self, depth: usize, index: usize) -> bool {
        let Some(column) = self.columns.get_mut(depth) else {
            return false;
        };
        if index >= column.entries.len() {
            return false;
        }
        for (i, entry) in column.entries.iter_mut().enumerate() {
            entry.active = i == index;
        }
        true
    }

    /// Active nodes from depth 0 down to the deepest active column
    pub fn selection_path(&self) -> Vec<NodeId> {
        self.columns.iter().map_while(Column::active_node).collect()
    }

    pub fn clear(&mut self) {
        self.columns.clear();
    }
}
