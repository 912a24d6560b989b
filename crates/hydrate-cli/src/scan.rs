use std::collections::BTreeMap;

use hydrate_node::Node;
use serde::Serialize;

/// Summary of the tagged mappings in a document.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Nesting depth of the whole document.
    pub depth: usize,
    /// Mappings whose tag key holds a string.
    pub tagged: usize,
    /// Mappings whose tag key holds anything else.
    pub malformed: usize,
    /// Tagged mappings per tag, sorted by tag.
    pub tags: BTreeMap<String, usize>,
}

/// Count tagged mappings under `tag_key` anywhere in `node`.
pub fn scan(node: &Node, tag_key: &str) -> ScanReport {
    let mut report = ScanReport {
        depth: node.depth(),
        ..Default::default()
    };
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        match node {
            Node::Sequence(items) => stack.extend(items),
            Node::Mapping(map) => {
                match map.get(tag_key) {
                    Some(Node::String(tag)) => {
                        report.tagged += 1;
                        *report.tags.entry(tag.clone()).or_default() += 1;
                    }
                    Some(_) => report.malformed += 1,
                    None => {}
                }
                stack.extend(map.values());
            }
            _ => {}
        }
    }
    report
}
