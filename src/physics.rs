/*
 * Physics Module
 *
 * This module runs the flock: spawning the school once the fish mesh is
 * available, and advancing every fish by one frame.
 *
 * Neighbor search is exhaustive, every fish against every other fish. That is
 * O(n^2) per frame and fine for a few dozen fish; a few thousand would need a
 * spatial index.
 *
 * There is no time delta. One call is one displayed frame, so the school
 * swims faster on high refresh rate displays.
 */

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::camera::Viewport;
use crate::fish::{Fish, FishId, FishTransform, PALETTE};
use crate::params::FlockParams;

// Create a school of fish scattered through the visible volume
pub fn spawn_flock<R: Rng + ?Sized>(params: &FlockParams, viewport: Viewport, rng: &mut R) -> Vec<Fish> {
    let bounds = viewport.bounds(params.depth_bound).half_extents();

    (0..params.num_fish)
        .map(|i| {
            let position = Vec3::new(
                random_symmetric(rng, bounds.x),
                random_symmetric(rng, bounds.y),
                random_symmetric(rng, bounds.z),
            );

            // Random initial heading at a modest speed
            let heading = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-0.5..0.5),
            )
            .normalize_or_zero();
            let speed = rng.gen_range(0.5..1.0) * params.max_speed;

            let color = PALETTE[rng.gen_range(0..PALETTE.len())];
            let mut fish = Fish::new(FishId(i as u32), position, heading * speed, color);
            fish.face(params.min_facing_speed);
            fish
        })
        .collect()
}

// Advance every fish by one frame
pub fn step<R: Rng + ?Sized>(
    flock: &mut [Fish],
    pointer: Vec2,
    viewport: Viewport,
    params: &FlockParams,
    rng: &mut R,
) {
    if flock.is_empty() {
        return;
    }

    let bounds = viewport.bounds(params.depth_bound);
    let target = viewport.screen_to_sim(pointer).extend(0.0);

    // Every fish steers against the same snapshot of the school
    let snapshot: &[Fish] = flock;
    let forces: Vec<Vec3> = snapshot
        .iter()
        .map(|fish| fish.steering_force(snapshot, target, params))
        .collect();

    for (fish, force) in flock.iter_mut().zip(forces) {
        let jitter = sample_jitter(rng, params.jitter);
        fish.integrate(force, jitter, params, &bounds);
    }
}

// Positions and orientations the scene should show this frame
pub fn transforms(flock: &[Fish]) -> impl Iterator<Item = FishTransform> + '_ {
    flock.iter().map(Fish::transform)
}

fn sample_jitter<R: Rng + ?Sized>(rng: &mut R, half_range: Vec3) -> Vec3 {
    Vec3::new(
        random_symmetric(rng, half_range.x),
        random_symmetric(rng, half_range.y),
        random_symmetric(rng, half_range.z),
    )
}

fn random_symmetric<R: Rng + ?Sized>(rng: &mut R, half_range: f32) -> f32 {
    if half_range > 0.0 {
        rng.gen_range(-half_range..half_range)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn spawned_fish_have_sequential_ids_inside_bounds() {
        let params = FlockParams::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = SmallRng::seed_from_u64(1);

        let flock = spawn_flock(&params, viewport, &mut rng);

        assert_eq!(flock.len(), params.num_fish);
        let bounds = viewport.bounds(params.depth_bound);
        for (i, fish) in flock.iter().enumerate() {
            assert_eq!(fish.id(), FishId(i as u32));
            assert!(bounds.contains(fish.position));
            assert!(fish.velocity.length() <= params.max_speed);
        }
    }

    #[test]
    fn step_on_empty_flock_is_a_no_op() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut flock: Vec<Fish> = Vec::new();
        step(&mut flock, Vec2::ZERO, Viewport::new(10.0, 10.0), &FlockParams::default(), &mut rng);
        assert!(flock.is_empty());
    }

    #[test]
    fn zero_jitter_range_samples_zero() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(sample_jitter(&mut rng, Vec3::ZERO), Vec3::ZERO);
    }
}
