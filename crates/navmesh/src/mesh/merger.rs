//! Convex polygon merging across shared edges (§4.7).
//!
//! Each polygon's boundary is one [`super::ring::RingArena`] ring of
//! [`PolyEdge`] nodes; node `n` holds the vertex an edge starts at plus the
//! polygon across that edge (`None` on the mesh boundary). Alignment
//! between "the edge" and "its neighbor" is structural — `n.neighbor` always
//! means "across the edge from `n.vertex` to the next node's vertex" — so
//! there is no separate neighbor-ring to keep in step (see DESIGN.md for why
//! this differs from a literal two-ring transliteration).
//!
//! Merging two polygons `x` and `m` across the edge `A -> B` splices their
//! rings together at `A` and `B` and drops the now-internal edge, gated by a
//! convexity check at each of the two new corners. If a splice endpoint
//! drops to one incident polygon and the merged ring no longer turns there,
//! it's a straight-edge interior point rather than a corner and gets
//! spliced back out and tombstoned (`maybe_remove_straight_vertex`).

use anyhow::Result;

use crate::geom2::{cross, is_clockwise, GeomCfg};

use super::ring::NodeId;
use super::types::{MeshSession, PolyEdge, PolygonId, VertexId};

/// The four ring nodes and two corner triples involved in merging across one
/// edge, precomputed so `can_merge` and the actual splice agree on exactly
/// what they're looking at.
struct EdgeSplice {
    /// Node holding `A` in `x`'s ring (`next` holds `B`).
    n: NodeId,
    /// Node holding `B` in `m`'s ring (`next` holds `A`).
    q: NodeId,
    prev_n: NodeId,
    nxt2_n: NodeId,
    prev_q: NodeId,
    nxt2_q: NodeId,
    a: VertexId,
    b: VertexId,
}

fn locate_splice(session: &MeshSession, m: PolygonId, n: NodeId) -> EdgeSplice {
    let rings = &session.edge_rings;
    let a = rings.val(n).vertex;
    let nxt_n = rings.next(n);
    let b = rings.val(nxt_n).vertex;

    let m_head = session.polygons[m].ring_head;
    // q is the node whose successor holds `a`; by construction that node
    // holds `b`, i.e. it's m's side of the shared edge, walked backwards.
    let q = rings
        .find_predecessor(m_head, |e: PolyEdge| e.vertex == a)
        .expect("mutual edge must exist in neighbor's ring");
    let nxt_q = rings.next(q);

    let x_head_node = n; // any node in x's ring works as a scan start
    let prev_n = rings
        .find_predecessor(x_head_node, |e: PolyEdge| e.vertex == a)
        .expect("a's predecessor must exist in its own ring");
    let nxt2_n = rings.next(nxt_n);

    let prev_q = rings
        .find_predecessor(m_head, |e: PolyEdge| e.vertex == b)
        .expect("b's predecessor must exist in its own ring");
    let nxt2_q = rings.next(nxt_q);

    EdgeSplice {
        n,
        q,
        prev_n,
        nxt2_n,
        prev_q,
        nxt2_q,
        a,
        b,
    }
}

/// Would merging `x` and its neighbor across the edge at ring node `n` keep
/// both new corners convex? Pure: makes no changes.
fn can_merge(session: &MeshSession, cfg: &GeomCfg, splice: &EdgeSplice) -> bool {
    let rings = &session.edge_rings;
    let z = session.vertices[rings.val(splice.prev_n).vertex].p;
    let w = session.vertices[rings.val(splice.nxt2_n).vertex].p;
    let wp = session.vertices[rings.val(splice.nxt2_q).vertex].p;
    let zp = session.vertices[rings.val(splice.prev_q).vertex].p;
    let pa = session.vertices[splice.a].p;
    let pb = session.vertices[splice.b].p;

    is_clockwise(z, pa, wp, cfg) && is_clockwise(zp, pb, w, cfg)
}

/// Try to merge `x` (canonical id) with its neighbor across the edge
/// starting at ring node `n`. Returns whether a merge happened.
fn try_merge_at(session: &mut MeshSession, cfg: &GeomCfg, x: PolygonId, n: NodeId) -> bool {
    let m = match session.edge_rings.val(n).neighbor {
        Some(m) => session.find(m),
        None => return false,
    };
    if m == x {
        // Already merged into `x` along a different shared edge.
        return false;
    }

    let splice = locate_splice(session, m, n);
    if !can_merge(session, cfg, &splice) {
        return false;
    }
    tracing::trace!(x, m, a = splice.a, b = splice.b, "merging polygons across shared edge");

    // Every vertex of `m` other than the splice pair keeps its place in the
    // merged ring but must now call itself incident to `x` instead of the
    // polygon that's about to be tombstoned.
    let m_head = session.polygons[m].ring_head;
    let m_ring = session.edge_rings.values(m_head);

    let rings = &mut session.edge_rings;
    // nxt_n / nxt_q are the soon-to-be-orphaned duplicate entries for B (in
    // x) and A (in m); `n` and `q` inherit their neighbor fields since they
    // take over the edges those nodes used to represent.
    let nxt_n = rings.next(splice.n);
    let b_edge_neighbor = rings.val(nxt_n).neighbor;
    let nxt_q = rings.next(splice.q);
    let a_edge_neighbor = rings.val(nxt_q).neighbor;
    let y = a_edge_neighbor; // neighbor across the new A->W' edge

    rings.set_next(splice.n, splice.nxt2_q);
    rings.set_next(splice.q, splice.nxt2_n);
    rings.set_val(
        splice.n,
        PolyEdge {
            vertex: splice.a,
            neighbor: a_edge_neighbor,
        },
    );
    rings.set_val(
        splice.q,
        PolyEdge {
            vertex: splice.b,
            neighbor: b_edge_neighbor,
        },
    );

    if let Some(y) = y {
        let y = session.find(y);
        if y != x {
            let y_head = session.polygons[y].ring_head;
            if let Some(back) = session
                .edge_rings
                .find_predecessor(y_head, |e: PolyEdge| e.vertex == splice.a)
            {
                let v = session.edge_rings.val(back).vertex;
                session.edge_rings.set_val(back, PolyEdge { vertex: v, neighbor: Some(x) });
            }
        }
    }

    if session.polygons[x].ring_head == nxt_n || session.polygons[x].ring_head == nxt_q {
        session.polygons[x].ring_head = splice.n;
    }

    let vx = session.polygons[x].num_vertices;
    let vm = session.polygons[m].num_vertices;
    let tx = session.polygons[x].num_traversable;
    let tm = session.polygons[m].num_traversable;
    session.polygons[x].num_vertices = vx + vm - 2;
    session.polygons[x].num_traversable = tx + tm - 2;
    session.polygons[m].num_vertices = 0;
    session.polygons[m].num_traversable = 0;

    remove_incidence(session, splice.a, m);
    remove_incidence(session, splice.b, m);
    for edge in &m_ring {
        if edge.vertex != splice.a && edge.vertex != splice.b {
            retarget_incidence(session, edge.vertex, m, x);
        }
    }

    maybe_remove_straight_vertex(session, cfg, x, splice.a);
    maybe_remove_straight_vertex(session, cfg, x, splice.b);

    session.uf.merge(x, m);
    true
}

fn remove_incidence(session: &mut MeshSession, v: VertexId, gone: PolygonId) {
    let head = session.vertices[v].poly_ring_head;
    if let Some(new_head) = session.poly_rings.remove_value(head, Some(gone)) {
        session.vertices[v].poly_ring_head = new_head;
        session.vertices[v].num_polygons -= 1;
    }
}

/// Ring-surgery step 3: a splice endpoint that's now incident to only one
/// polygon is a real corner only if the merged ring still turns there. If
/// `v`'s two neighbors in `x`'s ring are collinear with it, `v` has become
/// an interior point of a straight edge and is spliced out of the ring and
/// tombstoned. Degree dropping to one is not sufficient by itself — a
/// splice endpoint that stays a genuine convex corner (e.g. a diagonal
/// merge) also drops to one incident polygon but must be kept.
fn maybe_remove_straight_vertex(
    session: &mut MeshSession,
    cfg: &GeomCfg,
    x: PolygonId,
    v: VertexId,
) {
    if session.vertices[v].num_polygons != 1 {
        return;
    }
    let head = session.polygons[x].ring_head;
    let Some(pred) = session
        .edge_rings
        .find_predecessor(head, |e: PolyEdge| e.vertex == v)
    else {
        return;
    };
    let node = session.edge_rings.next(pred);
    let succ = session.edge_rings.next(node);
    if succ == pred {
        // Only two nodes left in the ring; nothing to collapse into.
        return;
    }

    let prev_p = session.vertices[session.edge_rings.val(pred).vertex].p;
    let v_p = session.vertices[v].p;
    let next_p = session.vertices[session.edge_rings.val(succ).vertex].p;
    if cross(prev_p, v_p, next_p).abs() > cfg.eps_cw {
        return;
    }

    session.edge_rings.set_next(pred, succ);
    if session.polygons[x].ring_head == node {
        session.polygons[x].ring_head = pred;
    }
    session.polygons[x].num_vertices -= 1;
    session.vertices[v].num_polygons = 0;
}

/// `v` was incident to `old` (now tombstoned, absorbed into `new`); relabel
/// that incidence entry in place so `v`'s count is unaffected.
fn retarget_incidence(session: &mut MeshSession, v: VertexId, old: PolygonId, new: PolygonId) {
    let head = session.vertices[v].poly_ring_head;
    session.poly_rings.replace_value(head, Some(old), Some(new));
}

/// Repeatedly merge convex-compatible neighbor pairs until no more merges
/// apply anywhere in the mesh.
pub fn merge_mesh(session: &mut MeshSession, cfg: &GeomCfg) -> Result<()> {
    let _span = tracing::debug_span!(
        "merge_mesh",
        vertices = session.vertices.len(),
        polygons = session.polygons.len()
    )
    .entered();
    let mut passes = 0u32;
    loop {
        passes += 1;
        let mut merged_any = false;
        for x in 0..session.polygons.len() {
            if session.find(x) != x || !session.is_polygon_live(x) {
                continue;
            }
            let mut node = session.polygons[x].ring_head;
            loop {
                let next_node = session.edge_rings.next(node);
                if try_merge_at(session, cfg, x, node) {
                    merged_any = true;
                    node = session.polygons[x].ring_head;
                    continue;
                }
                node = next_node;
                if node == session.polygons[x].ring_head {
                    break;
                }
            }
        }
        if !merged_any {
            break;
        }
    }
    tracing::debug!(passes, "merge pass settled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector2;

    use super::*;
    use super::super::ring::RingArena;
    use super::super::types::{Polygon, Vertex};
    use super::super::unionfind::UnionFind;

    /// One polygon, ring `Z -> A -> other -> C -> Z`, `A` at index 1. Each
    /// vertex is given a trivial single-entry incidence ring pointing at
    /// polygon 0 (irrelevant to `maybe_remove_straight_vertex`, which only
    /// reads `num_polygons` and the edge ring) except `A`, whose count is set
    /// by the caller to the value under test.
    fn one_polygon_session(
        z: (f64, f64),
        a: (f64, f64),
        other: (f64, f64),
        c: (f64, f64),
        a_num_polygons: u32,
    ) -> MeshSession {
        let mut poly_rings: RingArena<Option<PolygonId>> = RingArena::new();
        let points = [z, a, other, c];
        let mut vertices = Vec::with_capacity(4);
        for &(x, y) in &points {
            let head = poly_rings.build_ring(&[Some(0)]);
            vertices.push(Vertex {
                p: Vector2::new(x, y),
                num_polygons: 1,
                poly_ring_head: head,
            });
        }
        vertices[1].num_polygons = a_num_polygons;

        let mut edge_rings: RingArena<PolyEdge> = RingArena::new();
        let edges: Vec<PolyEdge> = (0..4)
            .map(|vertex| PolyEdge { vertex, neighbor: None })
            .collect();
        let ring_head = edge_rings.build_ring(&edges);
        let polygons = vec![Polygon {
            num_vertices: 4,
            num_traversable: 0,
            ring_head,
        }];

        MeshSession {
            vertices,
            polygons,
            edge_rings,
            poly_rings,
            uf: UnionFind::new(1),
        }
    }

    #[test]
    fn straight_vertex_is_spliced_out_of_the_ring_and_tombstoned() {
        // Z, A, W all on y = 0: A is a dead-straight interior point.
        let mut session = one_polygon_session((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0), 1);
        maybe_remove_straight_vertex(&mut session, &GeomCfg::default(), 0, 1);

        assert_eq!(session.vertices[1].num_polygons, 0);
        assert_eq!(session.polygons[0].num_vertices, 3);
        let ring: Vec<VertexId> = session.edge_ring(0).iter().map(|e| e.vertex).collect();
        assert_eq!(ring, vec![0, 2, 3]);
    }

    #[test]
    fn a_real_corner_is_kept_despite_dropping_to_one_incident_polygon() {
        // A turns a genuine corner (not collinear with its neighbors).
        let mut session = one_polygon_session((0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), 1);
        maybe_remove_straight_vertex(&mut session, &GeomCfg::default(), 0, 1);

        assert_eq!(session.vertices[1].num_polygons, 1);
        assert_eq!(session.polygons[0].num_vertices, 4);
        let ring: Vec<VertexId> = session.edge_ring(0).iter().map(|e| e.vertex).collect();
        assert_eq!(ring, vec![0, 1, 2, 3]);
    }

    #[test]
    fn a_straight_vertex_still_incident_to_two_polygons_is_kept() {
        // Same collinear geometry as the removal case, but A hasn't actually
        // dropped to a single incident polygon yet.
        let mut session = one_polygon_session((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0), 2);
        maybe_remove_straight_vertex(&mut session, &GeomCfg::default(), 0, 1);

        assert_eq!(session.vertices[1].num_polygons, 2);
        assert_eq!(session.polygons[0].num_vertices, 4);
    }
}
