/*
 * Starfield Module
 *
 * A fixed set of faint points in screen space whose brightness wobbles
 * around a per-star base value. Stars are placed once for the viewport the
 * backdrop starts with and do not move when the window is resized.
 */

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::params::StarfieldParams;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    // Screen space, top-left origin, y down
    pub position: Vec2,
    pub base_opacity: f32,
    pub opacity: f32,
    pub twinkle_phase: f32,
}

/// Anything stars can be painted onto.
pub trait StarSurface {
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, alpha: f32);
}

// Scatter `count` stars uniformly over the viewport
pub fn initialize<R: Rng + ?Sized>(
    count: usize,
    width: f32,
    height: f32,
    params: &StarfieldParams,
    rng: &mut R,
) -> Vec<Star> {
    (0..count)
        .map(|_| {
            let base_opacity = rng.gen_range(params.min_base_opacity..params.max_base_opacity);
            Star {
                position: Vec2::new(random_up_to(rng, width), random_up_to(rng, height)),
                base_opacity,
                opacity: base_opacity,
                twinkle_phase: rng.gen_range(0.0..TAU),
            }
        })
        .collect()
}

// Move every star one step along its twinkle cycle
pub fn advance(stars: &mut [Star], delta_phase: f32, amplitude: f32) {
    for star in stars {
        star.twinkle_phase += delta_phase;
        star.opacity = star.base_opacity + star.twinkle_phase.sin() * amplitude;
    }
}

// Wipe the surface and paint each star. No surface, nothing to do.
pub fn render<S: StarSurface + ?Sized>(surface: Option<&mut S>, stars: &[Star], radius: f32) {
    let Some(surface) = surface else {
        return;
    };

    surface.clear();
    for star in stars {
        surface.fill_circle(star.position, radius, star.opacity);
    }
}

fn random_up_to<R: Rng + ?Sized>(rng: &mut R, limit: f32) -> f32 {
    if limit > 0.0 {
        rng.gen_range(0.0..limit)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        circles: Vec<(Vec2, f32, f32)>,
    }

    impl StarSurface for Recorder {
        fn clear(&mut self) {
            self.clears += 1;
            self.circles.clear();
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, alpha: f32) {
            self.circles.push((center, radius, alpha));
        }
    }

    #[test]
    fn initialized_stars_respect_ranges() {
        let params = StarfieldParams::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let stars = initialize(200, 640.0, 480.0, &params, &mut rng);

        assert_eq!(stars.len(), 200);
        for star in &stars {
            assert!((0.0..640.0).contains(&star.position.x));
            assert!((0.0..480.0).contains(&star.position.y));
            assert!((0.2..0.5).contains(&star.base_opacity));
            assert!((0.0..TAU).contains(&star.twinkle_phase));
        }
    }

    #[test]
    fn one_advance_from_zero_phase() {
        let mut stars = vec![Star {
            position: Vec2::ZERO,
            base_opacity: 0.3,
            opacity: 0.3,
            twinkle_phase: 0.0,
        }];

        advance(&mut stars, 0.02, 0.1);

        assert!((stars[0].twinkle_phase - 0.02).abs() < 1e-6);
        assert!((stars[0].opacity - 0.302).abs() < 1e-4);
    }

    #[test]
    fn render_clears_then_draws_every_star() {
        let params = StarfieldParams::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let stars = initialize(3, 100.0, 100.0, &params, &mut rng);
        let mut surface = Recorder::default();

        render(Some(&mut surface), &stars, 1.5);

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), 3);
        assert_eq!(surface.circles[1], (stars[1].position, 1.5, stars[1].opacity));
    }

    #[test]
    fn render_without_surface_does_nothing() {
        let stars = vec![Star {
            position: Vec2::ZERO,
            base_opacity: 0.3,
            opacity: 0.3,
            twinkle_phase: 0.0,
        }];
        render::<Recorder>(None, &stars, 1.5);
    }
}
