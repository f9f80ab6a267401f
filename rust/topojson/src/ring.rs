// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ring and line assembly from signed arc references.
//!
//! Consecutive arcs of a ring meet at a shared junction: the last coordinate
//! of one arc is the first coordinate of the next. Assembly keeps the whole
//! first arc and only the trailing coordinates of every following arc, so the
//! output never contains zero-length segments at junctions.

use crate::arc::ArcRef;
use crate::error::{Error, Result};
use crate::topology::{Coordinate, Topology};

impl Topology {
    /// Concatenates the arcs of a line, dropping duplicated junctions.
    ///
    /// Unlike [`Topology::assemble_ring`], the result does not need to close.
    pub fn assemble_line(&self, refs: &[ArcRef]) -> Result<Vec<Coordinate>> {
        let mut out = Vec::new();
        for &r in refs {
            self.append_arc(&mut out, r)?;
        }
        if out.is_empty() {
            return Err(Error::EmptyRing);
        }
        Ok(out)
    }

    /// Concatenates the arcs of a ring and checks that it closes.
    ///
    /// The first and last coordinates must agree within the topology's ring
    /// tolerance on both axes.
    pub fn assemble_ring(&self, refs: &[ArcRef]) -> Result<Vec<Coordinate>> {
        let ring = self.assemble_line(refs)?;

        // assemble_line never returns an empty sequence
        let first = ring[0];
        let last = ring[ring.len() - 1];
        if !first.approx_eq(&last, self.ring_tolerance) {
            return Err(Error::UnclosedRing { first, last });
        }

        Ok(ring)
    }

    fn append_arc(&self, out: &mut Vec<Coordinate>, reference: ArcRef) -> Result<()> {
        let points = self.arc(reference)?;
        out.reserve(points.len());

        if out.is_empty() {
            out.extend(points);
        } else {
            out.extend(points.skip(1));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc::Arc;
    use crate::transform::Transform;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn refs(ids: &[i32]) -> Vec<ArcRef> {
        ids.iter().copied().map(ArcRef).collect()
    }

    fn square_topology() -> Topology {
        let raw: [&[[f64; 2]]; 4] = [
            &[[0.0, 0.0], [2.0, 0.0]],
            &[[2.0, 0.0], [0.0, 2.0]],
            &[[2.0, 2.0], [-2.0, -2.0]],
            // closed loop inside the square
            &[[0.5, 0.5], [1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]],
        ];
        let arcs = raw
            .iter()
            .map(|points| Arc::decode(points, &Transform::IDENTITY, true))
            .collect();
        Topology::with_arcs(arcs, Transform::IDENTITY, None, 1e-9)
    }

    #[test]
    fn assembles_square_with_junction_dedup() {
        let topo = square_topology();
        let ring = topo.assemble_ring(&refs(&[0, 1, 2])).unwrap();

        assert_eq!(
            ring,
            vec![c(0.0, 0.0), c(2.0, 0.0), c(2.0, 2.0), c(0.0, 0.0)]
        );
    }

    #[test]
    fn assembles_reversed_ring() {
        let topo = square_topology();
        let ring = topo.assemble_ring(&refs(&[-3, -2, -1])).unwrap();

        assert_eq!(
            ring,
            vec![c(0.0, 0.0), c(2.0, 2.0), c(2.0, 0.0), c(0.0, 0.0)]
        );
    }

    #[test]
    fn single_arc_ring() {
        let topo = square_topology();
        let ring = topo.assemble_ring(&refs(&[-4])).unwrap();

        assert_eq!(
            ring,
            vec![
                c(0.5, 0.5),
                c(0.5, 1.5),
                c(1.5, 1.5),
                c(1.5, 0.5),
                c(0.5, 0.5),
            ]
        );
    }

    #[test]
    fn open_ring_is_rejected() {
        let topo = square_topology();

        match topo.assemble_ring(&refs(&[0, 1])) {
            Err(Error::UnclosedRing { first, last }) => {
                assert_eq!(first, c(0.0, 0.0));
                assert_eq!(last, c(2.0, 2.0));
            }
            other => panic!("expected UnclosedRing, got {:?}", other),
        }
    }

    #[test]
    fn line_does_not_need_to_close() {
        let topo = square_topology();
        let line = topo.assemble_line(&refs(&[0, 1])).unwrap();

        assert_eq!(line, vec![c(0.0, 0.0), c(2.0, 0.0), c(2.0, 2.0)]);
    }

    #[test]
    fn empty_ring_is_rejected() {
        let topo = square_topology();
        assert!(matches!(topo.assemble_ring(&[]), Err(Error::EmptyRing)));
        assert!(matches!(topo.assemble_line(&[]), Err(Error::EmptyRing)));
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let topo = square_topology();
        assert!(matches!(
            topo.assemble_ring(&refs(&[0, 1, 9])),
            Err(Error::ArcIndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn closure_within_tolerance() {
        let raw: [&[[f64; 2]]; 2] = [
            &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            &[[1.0, 1.0], [-1.0, -1.0 + 1e-12]],
        ];
        let arcs = raw
            .iter()
            .map(|points| Arc::decode(points, &Transform::IDENTITY, true))
            .collect();
        let topo = Topology::with_arcs(arcs, Transform::IDENTITY, None, 1e-9);

        let ring = topo.assemble_ring(&refs(&[0, 1])).unwrap();
        assert_eq!(ring.len(), 4);
    }
}
