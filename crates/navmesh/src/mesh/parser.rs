//! `mesh v2` file parsing (§4.7).
//!
//! Header grammar: literal `mesh`, version `2`, counts `V P`, then `V`
//! vertex records `x y k id_1 ... id_k` (k >= 2, id_i = -1 where that slot
//! around the vertex touches the outside of the mesh rather than a
//! polygon), then `P` polygon records `n v_1 ... v_n p_1 ... p_n` (n >= 3,
//! p_i = -1 for boundary). A trailing extra token is a fatal error.

use anyhow::{bail, ensure, Context, Result};
use nalgebra::Vector2;

use super::ring::RingArena;
use super::types::{MeshSession, PolyEdge, Polygon, Vertex};
use super::unionfind::UnionFind;

struct Tokenizer<'a> {
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            tokens: input.split_whitespace(),
        }
    }

    fn next(&mut self, what: &str) -> Result<&'a str> {
        self.tokens
            .next()
            .with_context(|| format!("error reading {what}"))
    }

    fn next_f64(&mut self, what: &str) -> Result<f64> {
        self.next(what)?
            .parse()
            .with_context(|| format!("error parsing {what} as a number"))
    }

    fn next_usize(&mut self, what: &str) -> Result<usize> {
        self.next(what)?
            .parse()
            .with_context(|| format!("error parsing {what} as a non-negative integer"))
    }

    fn next_i64(&mut self, what: &str) -> Result<i64> {
        self.next(what)?
            .parse()
            .with_context(|| format!("error parsing {what} as an integer"))
    }
}

pub fn parse_mesh(input: &str) -> Result<MeshSession> {
    let mut t = Tokenizer::new(input);

    let header = t.next("header")?;
    ensure!(header == "mesh", "invalid header (expecting 'mesh'), got '{header}'");
    let version = t.next_usize("version number")?;
    ensure!(version == 2, "invalid version (expecting 2), got {version}");

    let v_count = t.next_usize("vertex count")?;
    let p_count = t.next_usize("polygon count")?;
    ensure!(v_count >= 1, "invalid number of vertices: {v_count}");
    ensure!(p_count >= 1, "invalid number of polygons: {p_count}");

    let mut vertices = Vec::with_capacity(v_count);
    let mut poly_rings: RingArena<Option<usize>> = RingArena::new();

    for _ in 0..v_count {
        let x = t.next_f64("a vertex's x coordinate")?;
        let y = t.next_f64("a vertex's y coordinate")?;
        let k = t.next_usize("a vertex's neighbour count")?;
        ensure!(k >= 2, "invalid number of neighbours around a point: {k}");
        let mut ids = Vec::with_capacity(k);
        for _ in 0..k {
            let raw = t.next_i64("a vertex's neighbouring polygon")?;
            if raw == -1 {
                ids.push(None);
            } else {
                let pid = usize::try_from(raw)
                    .ok()
                    .filter(|&p| p < p_count)
                    .with_context(|| format!("invalid polygon index when getting vertex: {raw}"))?;
                ids.push(Some(pid));
            }
        }
        let head = poly_rings.build_ring(&ids);
        vertices.push(Vertex {
            p: Vector2::new(x, y),
            num_polygons: k as u32,
            poly_ring_head: head,
        });
    }

    let mut polygons = Vec::with_capacity(p_count);
    let mut edge_rings: RingArena<PolyEdge> = RingArena::new();

    for _ in 0..p_count {
        let n = t.next_usize("number of vertices of a polygon")?;
        ensure!(n >= 3, "invalid number of vertices in a polygon: {n}");
        let mut vs = Vec::with_capacity(n);
        for _ in 0..n {
            let vid = t.next_usize("a polygon's vertex")?;
            ensure!(vid < v_count, "invalid vertex index when getting polygon: {vid}");
            vs.push(vid);
        }
        let mut neighbors = Vec::with_capacity(n);
        for _ in 0..n {
            let raw = t.next_i64("a polygon's neighbouring polygon")?;
            if raw == -1 {
                neighbors.push(None);
            } else {
                let pid = usize::try_from(raw)
                    .ok()
                    .filter(|&p| p < p_count)
                    .with_context(|| format!("invalid polygon index when getting polygon: {raw}"))?;
                neighbors.push(Some(pid));
            }
        }
        let edges: Vec<PolyEdge> = vs
            .iter()
            .zip(neighbors.iter())
            .map(|(&vertex, &neighbor)| PolyEdge { vertex, neighbor })
            .collect();
        let head = edge_rings.build_ring(&edges);
        polygons.push(Polygon {
            num_vertices: n as u32,
            num_traversable: neighbors.iter().filter(|n| n.is_some()).count() as u32,
            ring_head: head,
        });
    }

    if t.tokens.next().is_some() {
        bail!("error parsing mesh (read too much)");
    }

    let uf = UnionFind::new(p_count);
    Ok(MeshSession {
        vertices,
        polygons,
        edge_rings,
        poly_rings,
        uf,
    })
}
