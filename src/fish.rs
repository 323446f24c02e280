/*
 * Fish Module
 *
 * This module defines the Fish struct and its behavior.
 * Each fish steers by three flocking rules plus an attraction to the pointer:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 * 4. Pointer attraction: Drift towards the cursor when it is close
 *
 * A fish only knows plain vectors; turning it into something drawable is
 * the scene composer's job.
 */

use std::f32::consts::FRAC_PI_2;

use glam::{Mat3, Quat, Vec3};

use crate::camera::Bounds;
use crate::params::FlockParams;

/// Axis the fish mesh is authored facing along.
pub const ASSET_FORWARD: Vec3 = Vec3::NEG_X;

/// Stable identity of a fish within one flock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FishId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FishColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FishColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// Colors handed out to new fish
pub const PALETTE: [FishColor; 6] = [
    FishColor::new(255, 140, 66),
    FishColor::new(255, 209, 102),
    FishColor::new(6, 214, 160),
    FishColor::new(17, 138, 178),
    FishColor::new(239, 71, 111),
    FishColor::new(200, 200, 220),
];

/// Where a fish is and which way it faces, ready to hand to a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishTransform {
    pub id: FishId,
    pub position: Vec3,
    pub orientation: Quat,
}

#[derive(Debug, Clone)]
pub struct Fish {
    id: FishId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub orientation: Quat,
    color: FishColor,
}

impl Fish {
    pub fn new(id: FishId, position: Vec3, velocity: Vec3, color: FishColor) -> Self {
        Self {
            id,
            position,
            velocity,
            orientation: Quat::IDENTITY,
            color,
        }
    }

    pub fn id(&self) -> FishId {
        self.id
    }

    pub fn color(&self) -> FishColor {
        self.color
    }

    pub fn transform(&self) -> FishTransform {
        FishTransform {
            id: self.id,
            position: self.position,
            orientation: self.orientation,
        }
    }

    // Unit vector away from close neighbors, each weighted by inverse distance
    pub fn separation(&self, flock: &[Fish], perception_radius: f32) -> Vec3 {
        let mut steering = Vec3::ZERO;
        let mut count = 0;

        for other in flock {
            let d = self.position.distance(other.position);

            // Coincident fish have no usable direction
            if d > 0.0 && d < perception_radius {
                let diff = (self.position - other.position).normalize() / d;
                steering += diff;
                count += 1;
            }
        }

        if count > 0 {
            steering /= count as f32;
        }

        steering.normalize_or_zero()
    }

    // Unit vector along the average heading of neighbors
    pub fn alignment(&self, flock: &[Fish], perception_radius: f32) -> Vec3 {
        let mut steering = Vec3::ZERO;
        let mut count = 0;

        for other in flock {
            if other.id == self.id {
                continue;
            }
            if self.position.distance(other.position) < perception_radius {
                steering += other.velocity;
                count += 1;
            }
        }

        if count > 0 {
            steering /= count as f32;
        }

        steering.normalize_or_zero()
    }

    // Unit vector towards the centroid of neighbors
    pub fn cohesion(&self, flock: &[Fish], perception_radius: f32) -> Vec3 {
        let mut centroid = Vec3::ZERO;
        let mut count = 0;

        for other in flock {
            if other.id == self.id {
                continue;
            }
            if self.position.distance(other.position) < perception_radius {
                centroid += other.position;
                count += 1;
            }
        }

        if count == 0 {
            return Vec3::ZERO;
        }

        centroid /= count as f32;
        (centroid - self.position).normalize_or_zero()
    }

    // Unit vector towards the pointer if it is within range
    pub fn pointer_attraction(&self, target: Vec3, radius: f32) -> Vec3 {
        let offset = target - self.position;
        let d = offset.length();

        if d > 0.0 && d < radius {
            offset / d
        } else {
            Vec3::ZERO
        }
    }

    /// Weighted sum of every steering rule, checked against the whole flock.
    pub fn steering_force(&self, flock: &[Fish], pointer: Vec3, params: &FlockParams) -> Vec3 {
        self.separation(flock, params.separation_radius) * params.separation_weight
            + self.alignment(flock, params.alignment_radius) * params.alignment_weight
            + self.cohesion(flock, params.cohesion_radius) * params.cohesion_weight
            + self.pointer_attraction(pointer, params.pointer_radius) * params.pointer_weight
    }

    /// Advance one frame: apply the force and noise, cap and damp the speed,
    /// move, bounce off the bounds and turn to face the direction of travel.
    pub fn integrate(&mut self, steering: Vec3, jitter: Vec3, params: &FlockParams, bounds: &Bounds) {
        self.velocity += steering;
        self.velocity += jitter;

        // Limit speed
        if self.velocity.length() > params.max_speed {
            self.velocity = self.velocity.normalize() * params.max_speed;
        }

        self.velocity *= params.damping;
        self.position += self.velocity;

        self.reflect(bounds, params.bounce);
        self.face(params.min_facing_speed);
    }

    // Bounce off the walls, losing some energy, and clamp back inside
    pub fn reflect(&mut self, bounds: &Bounds, bounce: f32) {
        let half = bounds.half_extents();

        for axis in 0..3 {
            let limit = half[axis];
            if self.position[axis] > limit || self.position[axis] < -limit {
                self.velocity[axis] *= -bounce;
                self.position[axis] = self.position[axis].clamp(-limit, limit);
            }
        }
    }

    // Point the mesh along the velocity; slow fish keep their last heading
    pub fn face(&mut self, min_speed: f32) {
        if self.velocity.length() > min_speed {
            let direction = self.velocity.normalize();
            self.orientation = look_rotation(direction) * Quat::from_rotation_y(FRAC_PI_2);
        }
    }
}

/// Rotation taking local +Z onto `direction`, keeping +Y as up where possible.
pub fn look_rotation(direction: Vec3) -> Quat {
    let z = direction.normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }

    let mut x = Vec3::Y.cross(z);
    if x.length_squared() < 1e-12 {
        // Looking straight up or down
        x = Vec3::X;
    }
    let x = x.normalize();
    let y = z.cross(x);

    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}
