//! Components used by the world module.
use std::f32::consts::TAU;

use bevy::prelude::*;

/// The main directional light (the "sun"), circling the origin at a fixed
/// height and radius.
#[derive(Component, Debug, Clone)]
pub struct PrimarySun {
    radius: f32,
    height: f32,
    angle: f32,
    angular_speed: f32,
}

impl PrimarySun {
    pub fn new(radius: f32, height: f32, period_secs: f32) -> Self {
        let angular_speed = if period_secs > 0.0 {
            TAU / period_secs
        } else {
            0.0
        };
        Self {
            radius,
            height,
            angle: 0.0,
            angular_speed,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.angle.sin(),
            self.height,
            self.radius * self.angle.cos(),
        )
    }

    /// Moves the sun `dt` seconds further along its circle.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.angle = (self.angle + self.angular_speed * dt).rem_euclid(TAU);
        self.position()
    }
}

/// Walks an entity around a closed loop of waypoints at a constant speed.
#[derive(Component, Debug, Clone)]
pub struct PathFollower {
    waypoints: Vec<Vec3>,
    speed: f32,
    next: usize,
}

impl PathFollower {
    pub fn new(waypoints: Vec<Vec3>, speed: f32) -> Self {
        Self {
            waypoints,
            speed: speed.max(0.0),
            next: 0,
        }
    }

    /// Waypoint currently being walked towards.
    pub fn heading(&self) -> Option<Vec3> {
        self.waypoints.get(self.next).copied()
    }

    /// Moves `position` up to `speed * dt` along the loop, carrying leftover
    /// distance past each reached waypoint.
    pub fn advance(&mut self, position: Vec3, dt: f32) -> Vec3 {
        if self.waypoints.is_empty() {
            return position;
        }
        let mut budget = self.speed * dt;
        let mut position = position;
        for _ in 0..=self.waypoints.len() {
            let waypoint = self.waypoints[self.next];
            let remaining = position.distance(waypoint);
            if remaining > budget {
                return position + (waypoint - position) / remaining * budget;
            }
            budget -= remaining;
            position = waypoint;
            self.next = (self.next + 1) % self.waypoints.len();
        }
        position
    }
}
