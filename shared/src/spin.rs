use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::WheelError;
use crate::segments::Segment;

/// Rotation carried across spins. The rotation only ever grows, so the wheel keeps turning
/// in one direction from spin to spin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinState {
    pub cumulative_rotation: f64,
    pub is_animating: bool,
}

impl SpinState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Outcome of a single spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    pub selected_segment: Segment,
    pub final_rotation: f64,
    pub animation_duration_ms: u64,
}

/// The two random values behind a spin: whole turns in `[3, 6)` and a resting offset in
/// `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinDraw {
    pub full_turns: f64,
    pub offset: f64,
}

impl SpinDraw {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let offset = rng.gen_range(0.0..FULL_TURN_DEGREES);
        let full_turns = rng.gen_range(MIN_FULL_TURNS..MAX_FULL_TURNS);
        Self { full_turns, offset }
    }

    pub fn target_from(&self, cumulative_rotation: f64) -> f64 {
        cumulative_rotation + self.full_turns * FULL_TURN_DEGREES + self.offset
    }
}

/// Runs one spin against `segments`, advancing `state` to the new target rotation and
/// marking it as animating. The caller clears `is_animating` once `SPIN_DURATION_MS` has
/// elapsed.
pub fn spin<R: Rng + ?Sized>(
    state: &mut SpinState,
    segments: &[Segment],
    rng: &mut R,
) -> Result<SpinResult, WheelError> {
    if segments.is_empty() {
        return Err(WheelError::EmptyWheel);
    }

    let draw = SpinDraw::random(rng);
    let target = draw.target_from(state.cumulative_rotation);
    let selected = resolve(target, segments)?.clone();

    state.cumulative_rotation = target;
    state.is_animating = true;

    log::debug!(
        "Spin of {:.2} turns (+{:.2} deg) to {:.2} landed on '{}'",
        draw.full_turns,
        draw.offset,
        target,
        selected.label
    );

    Ok(SpinResult {
        selected_segment: selected,
        final_rotation: target,
        animation_duration_ms: SPIN_DURATION_MS,
    })
}

/// Translates a wheel rotation into the angle under the pointer. The wheel turns clockwise
/// while segment angles grow the other way, so the rotation is inverted first.
pub fn normalize_angle(target_rotation: f64) -> f64 {
    (FULL_TURN_DEGREES - target_rotation.rem_euclid(FULL_TURN_DEGREES)).rem_euclid(FULL_TURN_DEGREES)
}

/// Segment that a wheel at `target_rotation` stops on.
pub fn resolve(target_rotation: f64, segments: &[Segment]) -> Result<&Segment, WheelError> {
    segment_at(normalize_angle(target_rotation), segments)
}

/// Segment whose `[start, end)` range holds `angle`. Angles outside every range (exactly 360,
/// rounding drift, NaN) resolve to the first segment.
pub fn segment_at(angle: f64, segments: &[Segment]) -> Result<&Segment, WheelError> {
    let first = segments.first().ok_or(WheelError::EmptyWheel)?;
    match segments.iter().find(|s| s.contains(angle)) {
        Some(segment) => Ok(segment),
        None => {
            log::warn!("Angle {} matched no segment, falling back to '{}'", angle, first.label);
            Ok(first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::build;
    use crate::segments::tests::items;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn three() -> Vec<Segment> {
        build(&items(&["火锅", "烧烤", "沙拉"]))
    }

    #[test]
    fn test_resolve_example() {
        let segments = three();
        assert_eq!(normalize_angle(125.0), 235.0);
        assert_eq!(resolve(125.0, &segments).unwrap().label, "烧烤");
    }

    #[test]
    fn test_resolve_zero_and_full_turn_pick_first() {
        let segments = three();
        assert_eq!(resolve(0.0, &segments).unwrap().id, segments[0].id);
        assert_eq!(resolve(360.0, &segments).unwrap().id, segments[0].id);
        assert_eq!(resolve(720.0, &segments).unwrap().id, segments[0].id);
    }

    #[test]
    fn test_unmatched_angle_falls_back_to_first() {
        let segments = three();
        assert_eq!(segment_at(360.0, &segments).unwrap().id, segments[0].id);
        assert_eq!(segment_at(0.0, &segments).unwrap().id, segments[0].id);
        assert_eq!(segment_at(f64::NAN, &segments).unwrap().id, segments[0].id);
        assert_eq!(segment_at(-0.5, &segments).unwrap().id, segments[0].id);
    }

    #[test]
    fn test_resolve_boundaries() {
        let segments = three();
        // pointer angle 120 is the start of the second slice
        assert_eq!(resolve(240.0, &segments).unwrap().label, "烧烤");
        // pointer angle just under 360
        assert_eq!(resolve(0.5, &segments).unwrap().label, "沙拉");
        assert_eq!(resolve(359.5, &segments).unwrap().label, "火锅");
    }

    #[test]
    fn test_resolve_covers_every_rotation() {
        let segments = build(&items(&["a", "b", "c", "d", "e", "f", "g"]));
        let mut rotation = 0.0;
        while rotation < 1080.0 {
            let angle = normalize_angle(rotation);
            let hits = segments.iter().filter(|s| s.contains(angle)).count();
            assert_eq!(hits, 1, "rotation {} angle {}", rotation, angle);
            assert!(resolve(rotation, &segments).is_ok());
            rotation += 0.37;
        }
    }

    #[test]
    fn test_empty_wheel_is_rejected() {
        let mut state = SpinState::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(spin(&mut state, &[], &mut rng), Err(WheelError::EmptyWheel));
        assert_eq!(state, SpinState::new());
        assert_eq!(resolve(10.0, &[]), Err(WheelError::EmptyWheel));
    }

    #[test]
    fn test_draw_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let draw = SpinDraw::random(&mut rng);
            assert!(draw.full_turns >= 3.0 && draw.full_turns < 6.0);
            assert!(draw.offset >= 0.0 && draw.offset < 360.0);
        }
    }

    #[test]
    fn test_rotation_never_decreases() {
        let segments = three();
        let mut state = SpinState::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let before = state.cumulative_rotation;
            let result = spin(&mut state, &segments, &mut rng).unwrap();
            let advanced = result.final_rotation - before;
            assert!(advanced >= 3.0 * 360.0 && advanced < 7.0 * 360.0);
            assert_eq!(state.cumulative_rotation, result.final_rotation);
            assert!(state.is_animating);
            assert_eq!(result.animation_duration_ms, 3000);
            assert_eq!(
                resolve(result.final_rotation, &segments).unwrap(),
                &result.selected_segment
            );
            state.is_animating = false;
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let segments = three();
        let run = || {
            let mut state = SpinState::new();
            let mut rng = StdRng::seed_from_u64(99);
            spin(&mut state, &segments, &mut rng).unwrap()
        };
        assert_eq!(run(), run());
    }
}
