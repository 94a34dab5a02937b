//! Strongly connected components via Tarjan's algorithm.
//!
//! The depth-first search runs on an explicit stack of `(vertex, next edge)`
//! frames, so the depth of the task graph never touches the native call stack.

use crate::graph::{Graph, VertexId};
use crate::metrics::{Metrics, Timer};

const UNVISITED: usize = usize::MAX;

/// SCC partition of a graph.
#[derive(Clone, Debug, Default)]
pub struct SccDecomposition {
    /// Components in the order Tarjan completes them (reverse topological
    /// order of the condensation). Members are in stack-pop order, so the
    /// component root comes last.
    pub components: Vec<Vec<VertexId>>,
    /// Component index of each vertex.
    pub component_of: Vec<usize>,
    cyclic: Vec<bool>,
    pub metrics: Metrics,
}

impl SccDecomposition {
    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of vertices covered by the partition.
    pub fn vertex_count(&self) -> usize {
        self.component_of.len()
    }

    /// Component containing `vertex`, if it is in range.
    pub fn component_of(&self, vertex: VertexId) -> Option<usize> {
        self.component_of.get(vertex).copied()
    }

    /// Whether `component` contains a cycle: more than one member, or a
    /// single member with a self-loop.
    pub fn is_cyclic(&self, component: usize) -> bool {
        self.cyclic.get(component).copied().unwrap_or(false)
    }

    /// Indices of all cyclic components.
    pub fn cyclic_components(&self) -> impl Iterator<Item = usize> + '_ {
        self.cyclic
            .iter()
            .enumerate()
            .filter(|(_, &cyclic)| cyclic)
            .map(|(idx, _)| idx)
    }
}

struct Frame {
    vertex: VertexId,
    next_edge: usize,
}

struct Tarjan<'a> {
    graph: &'a Graph,
    next_index: usize,
    index: Vec<usize>,
    low_link: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<VertexId>,
    frames: Vec<Frame>,
    components: Vec<Vec<VertexId>>,
    metrics: Metrics,
}

impl<'a> Tarjan<'a> {
    fn new(graph: &'a Graph) -> Self {
        let n = graph.vertex_count();
        Self {
            graph,
            next_index: 0,
            index: vec![UNVISITED; n],
            low_link: vec![UNVISITED; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            frames: Vec::new(),
            components: Vec::new(),
            metrics: Metrics::default(),
        }
    }

    fn discover(&mut self, vertex: VertexId) {
        self.index[vertex] = self.next_index;
        self.low_link[vertex] = self.next_index;
        self.next_index += 1;
        self.stack.push(vertex);
        self.on_stack[vertex] = true;
        self.frames.push(Frame {
            vertex,
            next_edge: 0,
        });
        self.metrics.dfs_visits += 1;
    }

    fn strong_connect(&mut self, root: VertexId) {
        self.discover(root);

        while let Some(frame) = self.frames.last_mut() {
            let v = frame.vertex;
            let edges = self.graph.neighbors(v);

            if frame.next_edge < edges.len() {
                let w = edges[frame.next_edge].to;
                frame.next_edge += 1;
                self.metrics.edges_explored += 1;

                if self.index[w] == UNVISITED {
                    self.discover(w);
                } else if self.on_stack[w] {
                    self.low_link[v] = self.low_link[v].min(self.index[w]);
                }
                continue;
            }

            // All edges of v explored: return to the parent frame.
            self.frames.pop();
            if let Some(parent) = self.frames.last() {
                let p = parent.vertex;
                self.low_link[p] = self.low_link[p].min(self.low_link[v]);
            }

            if self.low_link[v] == self.index[v] {
                self.pop_component(v);
            }
        }
    }

    fn pop_component(&mut self, root: VertexId) {
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            component.push(w);
            if w == root {
                break;
            }
        }
        self.components.push(component);
    }
}

/// Partition `graph` into strongly connected components.
///
/// Searches start from every undiscovered vertex in ascending id order, so
/// the output is fully determined by the adjacency order. A graph without
/// edges yields one singleton per vertex, in id order.
pub fn decompose_scc(graph: &Graph) -> SccDecomposition {
    let n = graph.vertex_count();
    let mut tarjan = Tarjan::new(graph);

    let timer = Timer::start();
    for vertex in 0..n {
        if tarjan.index[vertex] == UNVISITED {
            tarjan.strong_connect(vertex);
        }
    }
    timer.stop(&mut tarjan.metrics);

    let components = tarjan.components;
    let mut component_of = vec![0; n];
    for (idx, component) in components.iter().enumerate() {
        for &v in component {
            component_of[v] = idx;
        }
    }

    let cyclic = components
        .iter()
        .map(|component| match component.as_slice() {
            [only] => graph.neighbors(*only).iter().any(|e| e.to == *only),
            _ => true,
        })
        .collect();

    SccDecomposition {
        components,
        component_of,
        cyclic,
        metrics: tarjan.metrics,
    }
}
