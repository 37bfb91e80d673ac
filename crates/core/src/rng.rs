//! RNG module - uniform shape draws for spawning
//!
//! Each spawn is an independent uniform draw over the seven shapes (no bag).
//! A small LCG keeps draws deterministic for a given seed, and the
//! [`ShapeSource`] trait lets tests script the exact spawn sequence.

use crate::types::ShapeKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

/// Supplies the shape of each newly spawned piece
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

/// Uniform draw over [`ShapeKind::ALL`]
#[derive(Debug, Clone)]
pub struct UniformShapes {
    rng: SimpleRng,
}

impl UniformShapes {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for UniformShapes {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeSource for UniformShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let idx = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }
}

/// Repeats a fixed sequence of shapes forever
#[derive(Debug, Clone)]
pub struct ScriptedShapes {
    shapes: Vec<ShapeKind>,
    next: usize,
}

impl ScriptedShapes {
    /// An empty script falls back to repeating `ShapeKind::I`.
    pub fn new(shapes: impl Into<Vec<ShapeKind>>) -> Self {
        let mut shapes = shapes.into();
        if shapes.is_empty() {
            shapes.push(ShapeKind::I);
        }
        Self { shapes, next: 0 }
    }
}

impl ShapeSource for ScriptedShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.shapes[self.next];
        self.next = (self.next + 1) % self.shapes.len();
        kind
    }
}
