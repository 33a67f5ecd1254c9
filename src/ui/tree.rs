//! ui::tree
//!
//! Tree rendering of documents for `config get` and `config list`.
//!
//! # Example Output
//!
//! ```text
//! cli
//! ├── color_palette = "latte"
//! └── rich
//!     ├── palette = "solarized"
//!     └── style = "box"
//! ```

use crate::core::types::{Document, Value};

/// Render `doc` as a tree under a `title` line.
pub fn render_tree(title: &str, doc: &Document) -> String {
    let mut out = String::from(title);
    render_children(doc, "", &mut out);
    out
}

fn render_children(doc: &Document, indent: &str, out: &mut String) {
    let count = doc.len();
    for (i, (name, value)) in doc.iter().enumerate() {
        let last = i + 1 == count;
        let (branch, continuation) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };

        out.push('\n');
        out.push_str(indent);
        out.push_str(branch);

        match value {
            Value::Table(child) => {
                out.push_str(name);
                render_children(child, &format!("{}{}", indent, continuation), out);
            }
            leaf => out.push_str(&format!("{} = {}", name, leaf)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_tables() {
        let doc: Document =
            toml::from_str("a = 1\n[b]\nc = \"x\"\n[b.d]\ne = true\n[f]\ng = [1, 2]\n").unwrap();

        let expected = "\
root
├── a = 1
├── b
│   ├── c = \"x\"
│   └── d
│       └── e = true
└── f
    └── g = [1, 2]";

        assert_eq!(render_tree("root", &doc), expected);
    }

    #[test]
    fn empty_document_is_title_only() {
        assert_eq!(render_tree("empty", &Document::new()), "empty");
    }
}
