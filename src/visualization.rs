use std::fmt::Write;

use crate::tree::{Side, TitleTree};

/// Escape a title for use inside a quoted DOT label
fn escape_label(title: &str) -> String {
    title.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Visualization tools for the title index
#[derive(Debug)]
pub struct TreeVisualization;

impl TreeVisualization {
    /// Generate a DOT graph of the tree, one node per entry, edges labelled
    /// with the side they hang from
    #[must_use]
    pub fn generate_dot<V>(tree: &TitleTree<V>) -> String {
        let mut dot = String::from("digraph title_index {\n");
        dot.push_str("  node [shape=box, style=filled, fillcolor=lightblue];\n");

        tree.for_each_edge(|id, parent, title| {
            let label = escape_label(title);
            let fill = if parent.is_none() { ", fillcolor=palegreen" } else { "" };
            // writing into a String cannot fail
            let _ = writeln!(dot, "  n{id} [label=\"{label}\"{fill}];");
            if let Some((parent_id, side)) = parent {
                let edge = if side == Side::Left { "L" } else { "R" };
                let _ = writeln!(dot, "  n{parent_id} -> n{id} [label=\"{edge}\"];");
            }
        });

        dot.push_str("}\n");
        dot
    }

    /// Render the tree as an indented outline, children below their parent,
    /// left child first
    #[must_use]
    pub fn render_outline<V>(tree: &TitleTree<V>) -> String {
        if tree.is_empty() {
            return "(empty)\n".to_string();
        }

        let mut outline = String::new();
        tree.for_each_preorder(|depth, side, title| {
            let marker = match side {
                Side::Root => "*",
                Side::Left => "L",
                Side::Right => "R",
            };
            let _ = writeln!(outline, "{}{marker} {title}", "  ".repeat(depth));
        });
        outline
    }

    /// Print a summary of the tree shape
    pub fn print_stats<V>(tree: &TitleTree<V>) {
        println!("=== Title Index Statistics ===");
        println!("Entries: {}", tree.len());
        println!("Height: {}", tree.height());
        match tree.min() {
            Some((title, _)) => println!("First title: {title}"),
            None => println!("First title: (none)"),
        }
    }
}
