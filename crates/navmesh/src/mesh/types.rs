use crate::geom2::Point2;

use super::ring::{NodeId, RingArena};
use super::unionfind::UnionFind;

pub type VertexId = usize;
pub type PolygonId = usize;

/// One directed edge of a polygon's ring: the vertex it starts at, and the
/// polygon sharing the edge from that vertex to the ring's next one (`None`
/// for a boundary edge). This collapses the source format's separate,
/// index-aligned vertex ring and neighbor ring into one ring whose
/// alignment is structural rather than a maintained invariant — see
/// DESIGN.md.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolyEdge {
    pub vertex: VertexId,
    pub neighbor: Option<PolygonId>,
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub p: Point2,
    /// 0 marks a tombstoned vertex.
    pub num_polygons: u32,
    pub poly_ring_head: NodeId,
}

#[derive(Clone, Debug)]
pub struct Polygon {
    /// 0 marks a tombstoned polygon.
    pub num_vertices: u32,
    pub num_traversable: u32,
    pub ring_head: NodeId,
}

/// Owns both mesh arrays and both ring arenas, plus the union-find over
/// polygon identities. The one driver struct the merger and validator
/// operate on by `&mut` (§5 "global mutable state" redesigned as a
/// session owned by the caller).
#[derive(Clone, Debug)]
pub struct MeshSession {
    pub vertices: Vec<Vertex>,
    pub polygons: Vec<Polygon>,
    pub(crate) edge_rings: RingArena<PolyEdge>,
    /// Each vertex's incident-polygon ring. An entry is `None` where the
    /// source format recorded `-1`, meaning that slot around the vertex
    /// touches the outside of the mesh rather than a polygon.
    pub(crate) poly_rings: RingArena<Option<PolygonId>>,
    pub(crate) uf: UnionFind,
}

impl MeshSession {
    pub fn is_vertex_live(&self, v: VertexId) -> bool {
        self.vertices[v].num_polygons != 0
    }

    pub fn is_polygon_live(&self, p: PolygonId) -> bool {
        self.polygons[p].num_vertices != 0
    }

    /// Canonical id for a (possibly merged-away) polygon.
    pub fn find(&mut self, p: PolygonId) -> PolygonId {
        self.uf.find(p)
    }

    pub fn vertex_ring(&self, v: VertexId) -> Vec<Option<PolygonId>> {
        self.poly_rings.values(self.vertices[v].poly_ring_head)
    }

    pub fn edge_ring(&self, p: PolygonId) -> Vec<PolyEdge> {
        self.edge_rings.values(self.polygons[p].ring_head)
    }
}
