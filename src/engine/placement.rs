use tracing::trace;

use crate::error::{Result, TilingError};
use crate::tiling::{is_supported_side_count, ShapeData, Tiling};

/// Places the shape-group phases onto the structure's open edges.
///
/// Each phase walks the previous group's edges in radial order and, per
/// non-skip token, consumes the next unmatched edge, builds a polygon
/// outward from it and re-runs edge matching immediately, so later
/// tokens in the same phase see updated connectivity. A skip token
/// advances past one unmatched edge without placing anything; the offset
/// accumulates across the phase.
///
/// # Errors
///
/// Returns [`TilingError::InvalidShape`] when a token names an
/// unsupported side count.
pub fn place_phases(
    tiling: &mut Tiling,
    stage: u32,
    stage_placement: &mut u32,
    phases: &[Vec<u32>],
) -> Result<()> {
    for phase in phases {
        // The edges to walk come from the group added by the previous
        // phase (or the seed), captured before the new group opens.
        let tail = tiling.groups().len() - 1;
        let edges = tiling.sorted_segments(tiling.group_segments(tail));
        let group = tiling.push_group(Some(stage));

        let mut skip = 0;
        for &token in phase {
            if token == 0 {
                skip += 1;
                continue;
            }
            if !is_supported_side_count(token) {
                return Err(TilingError::InvalidShape);
            }

            let mut offset = skip;
            for &edge in &edges {
                if tiling.is_connected(edge) {
                    continue;
                }
                if offset > 0 {
                    offset -= 1;
                    continue;
                }

                let (e1, e2) = tiling.segment_points(edge);
                *stage_placement += 1;
                let mut shape = ShapeData::from_line_segment(token as usize, e1, e2);
                shape.set_stage_placement(*stage_placement);
                trace!(token, placement = *stage_placement, "placing shape");

                tiling.add_shape(group, shape);
                tiling.connect_segments();
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::seed::seed_shape;

    fn seeded(sides: u32) -> (Tiling, u32) {
        let mut tiling = Tiling::new();
        let group = tiling.push_group(Some(0));
        let mut shape = seed_shape(sides, 50.0).unwrap();
        shape.set_stage_placement(1);
        tiling.add_shape(group, shape);
        (tiling, 1)
    }

    #[test]
    fn fills_every_seed_edge() {
        let (mut tiling, mut placement) = seeded(3);
        place_phases(&mut tiling, 0, &mut placement, &[vec![3, 3, 3]]).unwrap();

        assert_eq!(tiling.shapes_in_order().count(), 4);
        assert_eq!(placement, 4);

        // All three seed edges are now matched.
        let seed = tiling.shapes_in_order().next().unwrap();
        let connected = tiling
            .shape(seed)
            .segments
            .iter()
            .filter(|&&s| tiling.is_connected(s))
            .count();
        assert_eq!(connected, 3);
    }

    #[test]
    fn skip_token_leaves_an_edge_open() {
        let (mut tiling, mut placement) = seeded(4);
        place_phases(&mut tiling, 0, &mut placement, &[vec![0, 4, 4, 4]]).unwrap();

        assert_eq!(tiling.shapes_in_order().count(), 4);

        let seed = tiling.shapes_in_order().next().unwrap();
        let open = tiling
            .shape(seed)
            .segments
            .iter()
            .filter(|&&s| !tiling.is_connected(s))
            .count();
        assert_eq!(open, 1);
    }

    #[test]
    fn placed_shapes_carry_stage_and_placement_order() {
        let (mut tiling, mut placement) = seeded(6);
        place_phases(&mut tiling, 0, &mut placement, &[vec![3, 3]]).unwrap();

        let placements: Vec<Option<u32>> = tiling
            .shapes_in_order()
            .map(|id| tiling.shape(id).stage_placement)
            .collect();
        assert_eq!(placements, vec![Some(1), Some(2), Some(3)]);

        let stages: Vec<Option<u32>> = tiling
            .shapes_in_order()
            .map(|id| tiling.shape(id).stage)
            .collect();
        assert_eq!(stages, vec![Some(0), Some(0), Some(0)]);
    }

    #[test]
    fn second_phase_walks_the_previous_group() {
        let (mut tiling, mut placement) = seeded(3);
        place_phases(&mut tiling, 0, &mut placement, &[vec![3, 3, 3], vec![3]]).unwrap();

        // Seed + 3 first-phase shapes + 1 second-phase shape.
        assert_eq!(tiling.shapes_in_order().count(), 5);
        assert_eq!(tiling.groups().len(), 3);
    }

    #[test]
    fn unsupported_token_is_rejected() {
        let (mut tiling, mut placement) = seeded(3);
        let result = place_phases(&mut tiling, 0, &mut placement, &[vec![5]]);
        assert_eq!(result, Err(TilingError::InvalidShape));
        // Partial structure survives: the seed is still there.
        assert_eq!(tiling.shapes_in_order().count(), 1);
    }
}
