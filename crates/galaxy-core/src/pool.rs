//! Fixed-capacity ring buffer of heart particles.
//!
//! Slots are allocated once and recycled. Live particles occupy the circular
//! range `[first_active, first_free)`. `add` never fails: when the write
//! cursor catches up with the oldest live slot, that slot is evicted by
//! advancing `first_active`. Consequently at most `len - 1` particles are live
//! at once, and the slot just written can overwrite a particle that has not
//! yet expired.

use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeartParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub age: f32,
}

impl HeartParticle {
    /// Re-seed a slot. Acceleration is the velocity scaled by `effect`.
    pub fn initialize(&mut self, position: Vec2, velocity: Vec2, effect: f32) {
        self.position = position;
        self.velocity = velocity;
        self.acceleration = velocity * effect;
        self.age = 0.0;
    }

    /// Explicit Euler: position advances with the pre-step velocity.
    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.velocity += self.acceleration * dt;
        self.age += dt;
    }
}

pub struct ParticlePool {
    particles: Vec<HeartParticle>,
    first_active: usize,
    first_free: usize,
    duration: f32,
    effect: f32,
}

impl ParticlePool {
    /// `length` must be at least 1.
    pub fn new(length: usize, duration: f32, effect: f32) -> Self {
        Self {
            particles: vec![HeartParticle::default(); length.max(1)],
            first_active: 0,
            first_free: 0,
            duration,
            effect,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn first_active(&self) -> usize {
        self.first_active
    }

    #[inline]
    pub fn first_free(&self) -> usize {
        self.first_free
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Number of slots in the live range.
    pub fn active_len(&self) -> usize {
        let n = self.particles.len();
        (self.first_free + n - self.first_active) % n
    }

    pub fn add(&mut self, position: Vec2, velocity: Vec2) {
        let n = self.particles.len();
        self.particles[self.first_free].initialize(position, velocity, self.effect);
        self.first_free += 1;
        if self.first_free == n {
            self.first_free = 0;
        }
        if self.first_active == self.first_free {
            self.first_active += 1;
        }
        if self.first_active == n {
            self.first_active = 0;
        }
    }

    /// Integrate every live particle, then retire expired ones in pool order.
    pub fn update(&mut self, dt: f32) {
        let (head, tail) = self.active_ranges();
        for p in &mut self.particles[head] {
            p.update(dt);
        }
        for p in &mut self.particles[tail] {
            p.update(dt);
        }

        let n = self.particles.len();
        while self.particles[self.first_active].age >= self.duration
            && self.first_active != self.first_free
        {
            self.first_active += 1;
            if self.first_active == n {
                self.first_active = 0;
            }
        }
    }

    /// Live particles, oldest first.
    pub fn iter_active(&self) -> impl Iterator<Item = &HeartParticle> + '_ {
        let (head, tail) = self.active_ranges();
        self.particles[head].iter().chain(self.particles[tail].iter())
    }

    fn active_ranges(&self) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        if self.first_active <= self.first_free {
            (self.first_active..self.first_free, 0..0)
        } else {
            (self.first_active..self.particles.len(), 0..self.first_free)
        }
    }
}
