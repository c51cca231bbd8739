//! Random graphs: a Prüfer-coded spanning tree plus rejection-sampled edges.

use super::Grid;
use crate::{
    error::*,
    lazy::Lazy,
    primitive::{Arithmetic, Integer, Op, Primitive},
    random::Random,
    render::Descriptor,
};
use log::debug;
use rand::Rng;
use std::collections::HashSet;

/// Structural flags of a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphOptions {
    pub connected: bool,
    pub duplicate: bool,
    pub dag: bool,
    pub self_edge: bool,
    pub directed: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        GraphOptions {
            connected: true,
            duplicate: false,
            dag: false,
            self_edge: false,
            directed: false,
        }
    }
}

impl GraphOptions {
    /// Require a spanning tree under the edges.
    pub fn connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    /// Allow parallel edges.
    pub fn duplicate(mut self, duplicate: bool) -> Self {
        self.duplicate = duplicate;
        self
    }

    /// Orient every edge from the smaller label to the larger one.
    pub fn dag(mut self, dag: bool) -> Self {
        self.dag = dag;
        self
    }

    /// Allow edges from a node to itself.
    pub fn self_edge(mut self, self_edge: bool) -> Self {
        self.self_edge = self_edge;
        self
    }

    /// Treat edges as one-way in the adjacency matrix.
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }
}

/// How the spanning tree's Prüfer sequence is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeShape {
    /// Uniform over labelled trees.
    Random,
    /// A path.
    Line,
    /// One centre joined to every other node.
    Star,
    /// No node has degree above `k`.
    Bounded(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge<T> {
    pub u: usize,
    pub v: usize,
    pub weight: Option<T>,
}

/// `nodes` labelled `1..=nodes` joined by `edges` edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<W: Primitive = Integer> {
    nodes: usize,
    edges: usize,
    weight: Option<W>,
    options: GraphOptions,
    shape: TreeShape,
    cache: Lazy<Vec<Edge<W::Value>>>,
}

impl Graph<Integer> {
    pub fn new(nodes: usize, edges: usize, options: GraphOptions) -> Result<Self> {
        Graph::build(nodes, edges, options, TreeShape::Random)
    }

    /// A uniformly random labelled tree.
    pub fn tree(nodes: usize) -> Result<Self> {
        Graph::build(nodes, nodes.saturating_sub(1), GraphOptions::default(), TreeShape::Random)
    }

    /// A path through every node in random order.
    pub fn line(nodes: usize) -> Result<Self> {
        Graph::build(nodes, nodes.saturating_sub(1), GraphOptions::default(), TreeShape::Line)
    }

    /// A star around a random centre.
    pub fn star(nodes: usize) -> Result<Self> {
        Graph::build(nodes, nodes.saturating_sub(1), GraphOptions::default(), TreeShape::Star)
    }

    /// A tree whose maximum degree is at most `max_degree`.
    pub fn bounded_tree(nodes: usize, max_degree: usize) -> Result<Self> {
        Graph::build(
            nodes,
            nodes.saturating_sub(1),
            GraphOptions::default(),
            TreeShape::Bounded(max_degree),
        )
    }

    /// A connected DAG with edges from smaller to larger labels.
    pub fn dag(nodes: usize, edges: usize) -> Result<Self> {
        Graph::build(nodes, edges, GraphOptions::default().dag(true), TreeShape::Random)
    }

    fn build(nodes: usize, edges: usize, options: GraphOptions, shape: TreeShape) -> Result<Self> {
        validate(nodes, edges, &options, shape)?;
        Ok(Graph {
            nodes,
            edges,
            weight: None,
            options,
            shape,
            cache: Lazy::new(),
        })
    }
}

impl<W: Primitive> Graph<W> {
    /// Attach a weight recipe, drawn once per edge.
    pub fn with_weight<V: Primitive>(self, weight: V) -> Graph<V> {
        Graph {
            nodes: self.nodes,
            edges: self.edges,
            weight: Some(weight),
            options: self.options,
            shape: self.shape,
            cache: Lazy::new(),
        }
    }

    /// Number of nodes.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Number of edges generated.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Structural options.
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// The edges, generating first if needed.
    pub fn val(&mut self, rng: &mut Random) -> Result<&[Edge<W::Value>]> {
        Ok(self.generate(rng)?.as_slice())
    }

    fn generate(&mut self, rng: &mut Random) -> Result<&mut Vec<Edge<W::Value>>> {
        let Graph {
            nodes,
            edges,
            weight,
            options,
            shape,
            cache,
        } = self;
        cache.get_or_try_init(|| {
            let pairs = random_pairs(*nodes, *edges, options, *shape, rng)?;
            pairs
                .into_iter()
                .map(|(u, v)| -> Result<Edge<W::Value>> {
                    let drawn = weight.as_ref().map(|recipe| recipe.draw(rng)).transpose()?;
                    Ok(Edge { u, v, weight: drawn })
                })
                .collect()
        })
    }
}

impl<W: Arithmetic + Default> Graph<W> {
    /// `nodes x nodes` matrix of summed edge weights (`1` for unweighted edges).
    ///
    /// Symmetric unless the graph is directed or a DAG.
    pub fn adj_matrix(&mut self, rng: &mut Random) -> Result<Grid<W>> {
        let n = self.nodes;
        let symmetric = !(self.options.directed || self.options.dag);
        let mut cells = vec![vec![W::zero(); n]; n];
        for edge in self.generate(rng)?.iter() {
            let amount = edge.weight.clone().unwrap_or_else(W::unit);
            let (u, v) = (edge.u - 1, edge.v - 1);
            cells[u][v] = W::combine(&cells[u][v], Op::Add, &amount)?;
            if symmetric && u != v {
                cells[v][u] = W::combine(&cells[v][u], Op::Add, &amount)?;
            }
        }
        let mut grid = Grid::of(n, n, self.weight.clone().unwrap_or_default());
        grid.set_cells(cells)?;
        Ok(grid)
    }
}

impl<W: Primitive> Descriptor for Graph<W> {
    fn render(&mut self, rng: &mut Random) -> Result<String> {
        self.generate(rng)?;
        let Graph { weight, cache, .. } = self;
        let lines: Vec<String> = cache
            .get()
            .into_iter()
            .flatten()
            .map(|edge| match (&edge.weight, weight.as_ref()) {
                (Some(value), Some(recipe)) => format!("{} {} {}", edge.u, edge.v, recipe.format(value)),
                _ => format!("{} {}", edge.u, edge.v),
            })
            .collect();
        Ok(lines.join("\n"))
    }

    fn is_generated(&self) -> bool {
        self.cache.is_generated()
    }

    fn reset(&mut self) {
        self.cache.reset();
    }
}

fn validate(nodes: usize, edges: usize, options: &GraphOptions, shape: TreeShape) -> Result<()> {
    if options.connected && edges < nodes.saturating_sub(1) {
        return Err(TcgenError::invalid_argument(format!(
            "{edges} edges cannot connect {nodes} nodes"
        )));
    }
    let simple_max = (nodes as u128) * (nodes as u128).saturating_sub(1) / 2;
    if !options.duplicate && edges as u128 > simple_max {
        return Err(TcgenError::invalid_argument(format!(
            "{edges} edges exceed the {simple_max} distinct pairs of {nodes} nodes"
        )));
    }
    if options.dag && options.self_edge {
        return Err(TcgenError::invalid_argument("a DAG cannot have self edges"));
    }
    if edges > 0 && (nodes == 0 || (nodes < 2 && !options.self_edge)) {
        return Err(TcgenError::invalid_argument(format!(
            "cannot place {edges} edges on {nodes} nodes"
        )));
    }
    if let TreeShape::Bounded(k) = shape {
        if k < 2 && nodes > 2 {
            return Err(TcgenError::invalid_argument(format!(
                "a tree on {nodes} nodes needs a degree bound of at least 2, got {k}"
            )));
        }
    }
    Ok(())
}

/// Endpoints of every edge: the spanning tree first, then the extra edges.
fn random_pairs(
    nodes: usize,
    edges: usize,
    options: &GraphOptions,
    shape: TreeShape,
    rng: &mut Random,
) -> Result<Vec<(usize, usize)>> {
    let orient = |u: usize, v: usize| if options.dag { (u.min(v), u.max(v)) } else { (u, v) };
    let mut pairs = Vec::with_capacity(edges);
    let mut seen = HashSet::new();

    if options.connected && nodes >= 2 {
        debug!("Building {shape:?} spanning tree on {nodes} nodes");
        let sequence = prufer_sequence(shape, nodes, rng);
        for (u, v) in decode_prufer(&sequence, nodes) {
            seen.insert((u.min(v), u.max(v)));
            pairs.push(orient(u, v));
        }
    }

    debug!("Sampling {} additional edges", edges.saturating_sub(pairs.len()));
    // Unbounded: dense simple graphs may retry many times.
    while pairs.len() < edges {
        let u = rng.gen_range(1..=nodes);
        let v = rng.gen_range(1..=nodes);
        if u == v && !options.self_edge {
            continue;
        }
        if !seen.insert((u.min(v), u.max(v))) && !options.duplicate {
            continue;
        }
        pairs.push(orient(u, v));
    }
    Ok(pairs)
}

/// A Prüfer sequence of length `nodes - 2` for the requested shape.
///
/// Structured shapes repeat each label of a random permutation in runs:
/// runs of one give a path, runs of `k - 1` cap the degree at `k`, and a
/// single run of `nodes - 2` gives a star.
fn prufer_sequence(shape: TreeShape, nodes: usize, rng: &mut Random) -> Vec<usize> {
    let len = nodes.saturating_sub(2);
    let run = match shape {
        TreeShape::Random => return (0..len).map(|_| rng.gen_range(1..=nodes)).collect(),
        TreeShape::Line => 1,
        TreeShape::Star => len.max(1),
        TreeShape::Bounded(k) => k.saturating_sub(1).max(1),
    };
    let mut labels: Vec<usize> = (1..=nodes).collect();
    rng.shuffle(&mut labels);
    labels
        .into_iter()
        .flat_map(|label| std::iter::repeat(label).take(run))
        .take(len)
        .collect()
}

/// Linear-time Prüfer decoding into `nodes - 1` edges.
fn decode_prufer(sequence: &[usize], nodes: usize) -> Vec<(usize, usize)> {
    let mut degree = vec![1usize; nodes + 1];
    degree[0] = 0;
    for &label in sequence {
        degree[label] += 1;
    }

    let next_leaf = |degree: &[usize], mut from: usize| {
        while degree[from] != 1 {
            from += 1;
        }
        from
    };

    let mut edges = Vec::with_capacity(nodes.saturating_sub(1));
    let mut pointer = next_leaf(&degree, 1);
    let mut leaf = pointer;
    for &parent in sequence {
        edges.push((leaf, parent));
        degree[leaf] = 0;
        degree[parent] -= 1;
        if degree[parent] == 1 && parent < pointer {
            leaf = parent;
        } else {
            pointer = next_leaf(&degree, pointer + 1);
            leaf = pointer;
        }
    }
    edges.push((leaf, nodes));
    edges
}
