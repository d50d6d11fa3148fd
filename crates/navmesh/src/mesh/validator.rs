//! Structural and geometric validation (§4.8).
//!
//! Runs after merging (or directly on a freshly parsed mesh) and fails fast
//! with a diagnostic identifying the offending polygon or vertex, rather
//! than letting a broken invariant surface later as a panic deep in the
//! merger.

use anyhow::{bail, Result};

use crate::geom2::{is_clockwise, GeomCfg};

use super::types::{MeshSession, PolygonId, VertexId};

/// Check every live polygon's ring closes, is convex, and every live
/// vertex's incident-polygon ring closes and agrees with which polygons
/// actually reference it. Bails on the first violation found.
pub fn validate_mesh(session: &MeshSession, cfg: &GeomCfg) -> Result<()> {
    for p in 0..session.polygons.len() {
        if !session.is_polygon_live(p) {
            continue;
        }
        validate_polygon_ring(session, p)?;
        validate_polygon_convex(session, cfg, p)?;
        validate_mutual_adjacency(session, p)?;
    }
    for v in 0..session.vertices.len() {
        if !session.is_vertex_live(v) {
            continue;
        }
        validate_vertex_ring(session, v)?;
    }
    Ok(())
}

fn validate_polygon_ring(session: &MeshSession, p: PolygonId) -> Result<()> {
    let head = session.polygons[p].ring_head;
    let len = session.edge_rings.ring_len(head);
    let expected = session.polygons[p].num_vertices as usize;
    if len != expected {
        bail!(
            "polygon {p} ring length {len} does not match recorded vertex count {expected}"
        );
    }
    let vertices = session.edge_rings.values(head);
    let distinct: std::collections::HashSet<_> = vertices.iter().map(|e| e.vertex).collect();
    if distinct.len() != vertices.len() {
        bail!("polygon {p} ring revisits a vertex");
    }
    for edge in &vertices {
        if !session.is_vertex_live(edge.vertex) {
            bail!(
                "polygon {p} references tombstoned vertex {}",
                edge.vertex
            );
        }
    }
    Ok(())
}

fn validate_polygon_convex(session: &MeshSession, cfg: &GeomCfg, p: PolygonId) -> Result<()> {
    let head = session.polygons[p].ring_head;
    let ring = session.edge_rings.values(head);
    let n = ring.len();
    for i in 0..n {
        let prev = session.vertices[ring[(i + n - 1) % n].vertex].p;
        let cur = session.vertices[ring[i].vertex].p;
        let next = session.vertices[ring[(i + 1) % n].vertex].p;
        if !is_clockwise(prev, cur, next, cfg) {
            bail!("polygon {p} is not convex at vertex {}", ring[i].vertex);
        }
    }
    Ok(())
}

fn validate_mutual_adjacency(session: &MeshSession, p: PolygonId) -> Result<()> {
    let head = session.polygons[p].ring_head;
    let ring = session.edge_rings.values(head);
    for edge in &ring {
        let Some(neighbor) = edge.neighbor else {
            continue;
        };
        if !session.is_polygon_live(neighbor) {
            bail!("polygon {p} borders tombstoned polygon {neighbor}");
        }
        let their_ring = session.edge_ring(neighbor);
        let points_back = their_ring.iter().any(|e| e.neighbor == Some(p));
        if !points_back {
            bail!("polygon {p} and polygon {neighbor} disagree about bordering each other");
        }
    }
    Ok(())
}

fn validate_vertex_ring(session: &MeshSession, v: VertexId) -> Result<()> {
    let head = session.vertices[v].poly_ring_head;
    let len = session.poly_rings.ring_len(head);
    let expected = session.vertices[v].num_polygons as usize;
    if len != expected {
        bail!(
            "vertex {v} incident-polygon ring length {len} does not match recorded count {expected}"
        );
    }
    for entry in session.poly_rings.values(head) {
        let Some(p) = entry else { continue };
        if !session.is_polygon_live(p) {
            bail!("vertex {v} lists tombstoned polygon {p} as incident");
        }
        let owns_v = session.edge_ring(p).iter().any(|e| e.vertex == v);
        if !owns_v {
            bail!("vertex {v} claims incidence to polygon {p}, which doesn't reference it");
        }
    }
    Ok(())
}
