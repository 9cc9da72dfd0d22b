use tracing::debug;

use crate::error::{Result, TilingError};
use crate::export::AntwerpOptions;
use crate::tiling::Tiling;

use super::transforms::{self, ResolvedTransform};

/// Repeats the whole transform sequence until the visible area is
/// covered, progress stalls, or the repeat budget runs out.
///
/// Repetition only engages when more than one transform was specified
/// and `max_repeat` is not zero. Coverage is measured against half the
/// canvas diagonal; progress is the pair of disconnected-edge min/max
/// distances recomputed by each connect pass. A sweep that moves
/// neither is the heuristic signal that the sequence does not tile.
///
/// # Errors
///
/// Returns [`TilingError::TransformNoChange`] when a full sweep makes no
/// measurable progress, or any error the transforms themselves raise.
pub fn run(
    tiling: &mut Tiling,
    stage: &mut u32,
    transforms: &[ResolvedTransform],
    options: &AntwerpOptions,
) -> Result<()> {
    if transforms.len() <= 1 || options.max_repeat == Some(0) {
        return Ok(());
    }
    if tiling.disconnected_min.is_none() || tiling.disconnected_max.is_none() {
        return Ok(());
    }

    let radius = options.height.hypot(options.width) / 2.0;
    let mut budget = options.max_repeat;

    while tiling.disconnected_min.is_some_and(|min| min < radius) {
        for transform in transforms {
            transforms::apply(tiling, stage, transform)?;
        }

        let before = (tiling.disconnected_min, tiling.disconnected_max);
        tiling.connect_segments();
        let after = (tiling.disconnected_min, tiling.disconnected_max);
        debug!(?after, radius, "repetition sweep");

        if after == before {
            return Err(TilingError::TransformNoChange);
        }

        if let Some(budget) = budget.as_mut() {
            *budget -= 1;
            if *budget == 0 {
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
    use crate::engine::anchors::enumerate;
    use crate::engine::seed::seed_shape;
    use crate::notation::to_entities;

    fn options(max_repeat: Option<u32>) -> AntwerpOptions {
        AntwerpOptions {
            configuration: String::new(),
            shape_size: 100.0,
            width: 500.0,
            height: 500.0,
            max_repeat,
        }
    }

    fn seeded_with(configuration: &str) -> (Tiling, u32, Vec<ResolvedTransform>) {
        let entities = to_entities(configuration);
        let mut tiling = Tiling::new();
        let group = tiling.push_group(Some(0));
        tiling.add_shape(group, seed_shape(entities.seed.unwrap(), 50.0).unwrap());
        tiling.flatten();

        let mut stage = 0;
        let mut transforms: Vec<ResolvedTransform> = entities
            .transforms
            .into_iter()
            .map(ResolvedTransform::new)
            .collect();
        for transform in &mut transforms {
            transform.resolve(&enumerate(&tiling)).unwrap();
            transforms::apply(&mut tiling, &mut stage, transform).unwrap();
            tiling.connect_segments();
        }
        (tiling, stage, transforms)
    }

    #[test]
    fn single_transform_never_repeats() {
        let (mut tiling, mut stage, transforms) = seeded_with("3/m90");
        let shapes = tiling.shapes_in_order().count();

        run(&mut tiling, &mut stage, &transforms, &options(None)).unwrap();

        assert_eq!(tiling.shapes_in_order().count(), shapes);
    }

    #[test]
    fn zero_budget_disables_repetition() {
        let (mut tiling, mut stage, transforms) = seeded_with("3/r180/r180");
        let shapes = tiling.shapes_in_order().count();

        run(&mut tiling, &mut stage, &transforms, &options(Some(0))).unwrap();

        assert_eq!(tiling.shapes_in_order().count(), shapes);
    }

    #[test]
    fn stalled_sequence_is_detected() {
        // Two half-turns produce a structure already closed under both
        // transforms: every sweep reproduces existing shapes and the
        // disconnected range cannot move.
        let (mut tiling, mut stage, transforms) = seeded_with("3/r180/r180");

        let result = run(&mut tiling, &mut stage, &transforms, &options(Some(5)));

        assert_eq!(result, Err(TilingError::TransformNoChange));
    }

    #[test]
    fn budget_caps_sweeps_before_convergence() {
        // A sequence that keeps growing outward: the point-relative
        // half-turn translates the structure, so every sweep makes
        // progress and only the budget stops the loop.
        let (mut tiling, mut stage, transforms) = seeded_with("4/m45/r(h1)");
        let before = tiling.shapes_in_order().count();

        run(&mut tiling, &mut stage, &transforms, &options(Some(2))).unwrap();

        assert!(tiling.shapes_in_order().count() > before);
    }
}
