//! Iterative tree rewriting shared by the decoder and encoder.
//!
//! Both directions rebuild a tree bottom-up while replacing some nodes
//! (tagged mappings or hydrated objects) with something built from their
//! payload. The walk keeps its own stack of frames on the heap, so input
//! depth never turns into call-stack depth.

use std::vec;

use hydrate_node::{Mapping, Node};

use crate::error::{CodecError, CodecResult};

/// How a [`Rewrite`] treats a node it was asked to open.
pub(crate) enum Opened<W> {
    /// Walk the node as-is.
    Keep(Node),
    /// Walk `payload`, then hand it to [`Rewrite::close`] with `wrapper`.
    /// An absent payload closes with an empty mapping.
    Wrap { wrapper: W, payload: Option<Node> },
}

/// One direction of the codec.
pub(crate) trait Rewrite {
    /// State carried from `open` to `close` for a replaced node.
    type Wrapper;

    fn max_depth(&self) -> usize;

    /// Whether `node` occupies a nesting level.
    fn opens(&self, node: &Node) -> bool {
        node.is_container()
    }

    /// Inspect a mapping or object before its children are walked.
    fn open(&self, node: Node) -> CodecResult<Opened<Self::Wrapper>>;

    /// Build the replacement node from a fully rewritten payload.
    fn close(&self, wrapper: Self::Wrapper, payload: Node) -> CodecResult<Node>;
}

enum Frame<W> {
    Sequence {
        items: vec::IntoIter<Node>,
        out: Vec<Node>,
    },
    Mapping {
        entries: vec::IntoIter<(String, Node)>,
        key: Option<String>,
        out: Mapping,
    },
    Wrapped {
        wrapper: W,
        input: Option<Node>,
        output: Option<Node>,
    },
}

impl<W> Frame<W> {
    fn sequence(items: Vec<Node>) -> Self {
        Self::Sequence {
            out: Vec::with_capacity(items.len()),
            items: items.into_iter(),
        }
    }

    fn mapping(map: Mapping) -> Self {
        Self::Mapping {
            out: Mapping::with_capacity(map.len()),
            entries: map.into_iter(),
            key: None,
        }
    }

    fn next_child(&mut self) -> Option<Node> {
        match self {
            Self::Sequence { items, .. } => items.next(),
            Self::Mapping { entries, key, .. } => entries.next().map(|(k, v)| {
                *key = Some(k);
                v
            }),
            Self::Wrapped { input, .. } => input.take(),
        }
    }

    fn accept(&mut self, value: Node) {
        match self {
            Self::Sequence { out, .. } => out.push(value),
            Self::Mapping { key, out, .. } => {
                if let Some(key) = key.take() {
                    out.push_unique(key, value);
                }
            }
            Self::Wrapped { output, .. } => *output = Some(value),
        }
    }

    fn finish<R: Rewrite<Wrapper = W>>(self, pass: &R) -> CodecResult<Node> {
        match self {
            Self::Sequence { out, .. } => Ok(Node::Sequence(out)),
            Self::Mapping { out, .. } => Ok(Node::Mapping(out)),
            Self::Wrapped {
                wrapper, output, ..
            } => pass.close(wrapper, output.unwrap_or_else(|| Node::Mapping(Mapping::new()))),
        }
    }

    /// Everything this frame still owns, flattened into one node.
    fn into_remainder(self) -> Node {
        match self {
            Self::Sequence { items, out } => Node::Sequence(out.into_iter().chain(items).collect()),
            Self::Mapping { entries, out, .. } => Node::Sequence(
                out.into_values()
                    .chain(entries.map(|(_, v)| v))
                    .collect(),
            ),
            Self::Wrapped { input, output, .. } => {
                Node::Sequence(input.into_iter().chain(output).collect())
            }
        }
    }
}

enum Step<W> {
    Done(Node),
    Descend(Frame<W>),
}

/// Rewrite `root` bottom-up.
///
/// On failure, whatever the walk still holds is dismantled iteratively
/// before the error is returned.
pub(crate) fn rewrite<R: Rewrite>(pass: &R, root: Node) -> CodecResult<Node> {
    let mut stack = Vec::new();
    let result = walk(pass, root, &mut stack);
    if result.is_err() {
        for frame in stack {
            frame.into_remainder().dismantle();
        }
    }
    result
}

fn walk<R: Rewrite>(
    pass: &R,
    root: Node,
    stack: &mut Vec<Frame<R::Wrapper>>,
) -> CodecResult<Node> {
    let mut finished = match enter(pass, root, 0)? {
        Step::Done(value) => return Ok(value),
        Step::Descend(frame) => {
            stack.push(frame);
            None
        }
    };

    while let Some(mut frame) = stack.pop() {
        if let Some(value) = finished.take() {
            frame.accept(value);
        }
        match frame.next_child() {
            Some(child) => {
                stack.push(frame);
                match enter(pass, child, stack.len())? {
                    Step::Done(value) => finished = Some(value),
                    Step::Descend(next) => stack.push(next),
                }
            }
            None => finished = Some(frame.finish(pass)?),
        }
    }

    // The root frame is the last one popped, so its value is what remains.
    Ok(finished.unwrap_or_default())
}

/// Classify `node`, which sits below `depth` open frames.
fn enter<R: Rewrite>(pass: &R, node: Node, depth: usize) -> CodecResult<Step<R::Wrapper>> {
    if depth >= pass.max_depth() && pass.opens(&node) {
        node.dismantle();
        return Err(CodecError::DepthExceeded {
            limit: pass.max_depth(),
        });
    }
    match node {
        Node::Sequence(items) => Ok(Step::Descend(Frame::sequence(items))),
        node @ (Node::Mapping(_) | Node::Object(_)) => match pass.open(node)? {
            Opened::Keep(Node::Sequence(items)) => Ok(Step::Descend(Frame::sequence(items))),
            Opened::Keep(Node::Mapping(map)) => Ok(Step::Descend(Frame::mapping(map))),
            Opened::Keep(other) => Ok(Step::Done(other)),
            Opened::Wrap { wrapper, payload } => Ok(Step::Descend(Frame::Wrapped {
                wrapper,
                input: payload,
                output: None,
            })),
        },
        other => Ok(Step::Done(other)),
    }
}
