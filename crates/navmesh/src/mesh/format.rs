//! `mesh v2` output (§4.7), with tombstoned vertices/polygons dropped and
//! the remaining ids remapped to a dense `0..count` range so the emitted
//! file is itself a valid, minimal `mesh v2` input.

use std::io::{self, Write};

use super::types::MeshSession;

/// Prefix-sum remap from old id to new compact id; `None` for tombstoned
/// entries.
fn compact_ids(live: &[bool]) -> Vec<Option<usize>> {
    let mut next = 0usize;
    live.iter()
        .map(|&is_live| {
            if is_live {
                let id = next;
                next += 1;
                Some(id)
            } else {
                None
            }
        })
        .collect()
}

pub fn write_mesh(session: &MeshSession, mut out: impl Write) -> io::Result<()> {
    let vertex_live: Vec<bool> = (0..session.vertices.len())
        .map(|v| session.is_vertex_live(v))
        .collect();
    let polygon_live: Vec<bool> = (0..session.polygons.len())
        .map(|p| session.is_polygon_live(p))
        .collect();
    let vertex_map = compact_ids(&vertex_live);
    let polygon_map = compact_ids(&polygon_live);

    let v_count = vertex_map.iter().filter(|m| m.is_some()).count();
    let p_count = polygon_map.iter().filter(|m| m.is_some()).count();

    writeln!(out, "mesh")?;
    writeln!(out, "2")?;
    writeln!(out, "{v_count} {p_count}")?;

    for v in 0..session.vertices.len() {
        if !vertex_live[v] {
            continue;
        }
        let p = session.vertices[v].p;
        let ring = session.vertex_ring(v);
        write!(out, "{} {} {}", p.x, p.y, ring.len())?;
        for poly in ring {
            match poly {
                Some(poly) => {
                    let new_id = polygon_map[poly]
                        .expect("live vertex cannot reference a tombstoned polygon");
                    write!(out, " {new_id}")?;
                }
                None => write!(out, " -1")?,
            }
        }
        writeln!(out)?;
    }

    for poly in 0..session.polygons.len() {
        if !polygon_live[poly] {
            continue;
        }
        let ring = session.edge_ring(poly);
        write!(out, "{}", ring.len())?;
        for edge in &ring {
            let new_id = vertex_map[edge.vertex].expect("live polygon cannot reference a tombstoned vertex");
            write!(out, " {new_id}")?;
        }
        for edge in &ring {
            match edge.neighbor {
                Some(n) => {
                    let new_id = polygon_map[n].expect("live polygon cannot border a tombstoned polygon");
                    write!(out, " {new_id}")?;
                }
                None => write!(out, " -1")?,
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::parse_mesh;

    #[test]
    fn round_trips_a_mesh_with_no_merges() {
        let input = "mesh 2\n5 4\n\
            0 0 2 0 3\n\
            2 0 2 2 3\n\
            2 2 2 1 2\n\
            0 2 2 0 1\n\
            1 1 4 0 1 2 3\n\
            3 0 3 4 -1 1 3\n\
            3 3 2 4 -1 2 0\n\
            3 2 1 4 -1 3 1\n\
            3 1 0 4 -1 0 2\n";
        let session = parse_mesh(input).unwrap();
        let mut out = Vec::new();
        write_mesh(&session, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let reparsed = parse_mesh(&text).unwrap();
        assert_eq!(reparsed.vertices.len(), session.vertices.len());
        assert_eq!(reparsed.polygons.len(), session.polygons.len());
    }
}
