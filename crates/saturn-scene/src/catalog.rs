//! Physical parameters of the default Saturn system.
//!
//! Distances and radii are scene units (planet radius 2). Orbital periods are
//! in simulated days; one day lasts `day_duration` seconds at nominal speed.

use glam::Vec3;

/// The central body.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetSpec {
    pub radius: f32,
    pub sectors: u32,
    pub stacks: u32,
    pub color: Vec3,
}

/// One flat ring band.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSpec {
    pub name: &'static str,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub segments: u32,
    /// Spin in degrees per second.
    pub rotation_speed: f32,
    pub color: Vec3,
}

/// One orbiting moon.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonSpec {
    pub name: &'static str,
    pub distance: f32,
    pub radius: f32,
    pub orbital_period_days: f32,
    /// Self-rotation in degrees per second.
    pub spin_speed: f32,
    pub color: Vec3,
}

impl MoonSpec {
    /// Tessellation used for every moon sphere.
    pub const SECTORS: u32 = 32;
    pub const STACKS: u32 = 32;

    /// Orbital angular speed in degrees per second: one turn per period.
    pub fn orbital_speed(&self) -> f32 {
        360.0 / self.orbital_period_days
    }
}

/// Everything needed to populate a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemCatalog {
    pub planet: PlanetSpec,
    pub rings: Vec<RingSpec>,
    pub moons: Vec<MoonSpec>,
}

impl Default for SystemCatalog {
    fn default() -> Self {
        Self::saturn()
    }
}

const fn ring(
    name: &'static str,
    inner_radius: f32,
    outer_radius: f32,
    rotation_speed: f32,
    color: [f32; 3],
) -> RingSpec {
    RingSpec {
        name,
        inner_radius,
        outer_radius,
        segments: 100,
        rotation_speed,
        color: Vec3::from_array(color),
    }
}

const fn moon(
    name: &'static str,
    distance: f32,
    radius: f32,
    orbital_period_days: f32,
    spin_speed: f32,
    color: [f32; 3],
) -> MoonSpec {
    MoonSpec {
        name,
        distance,
        radius,
        orbital_period_days,
        spin_speed,
        color: Vec3::from_array(color),
    }
}

impl SystemCatalog {
    /// Saturn with its D, C, B, A and F rings and ten moons.
    pub fn saturn() -> Self {
        Self {
            planet: PlanetSpec {
                radius: 2.0,
                sectors: 64,
                stacks: 64,
                color: Vec3::new(1.0, 0.9, 0.6),
            },
            rings: vec![
                ring("D", 2.30, 2.56, 40.0, [0.6, 0.6, 0.55]),
                ring("C", 2.56, 3.16, 30.0, [0.7, 0.65, 0.5]),
                ring("B", 3.16, 4.03, 25.0, [0.9, 0.8, 0.6]),
                ring("A", 4.19, 4.70, 20.0, [0.8, 0.7, 0.5]),
                ring("F", 4.81, 4.82, 18.0, [0.85, 0.85, 0.9]),
            ],
            moons: vec![
                moon("Titan", 15.0, 0.5, 159.5, 30.0, [0.8, 0.8, 1.0]),
                moon("Enceladus", 6.0, 0.15, 13.7, 20.0, [1.0, 0.7, 0.7]),
                moon("Dione", 8.0, 0.3, 27.4, 15.0, [0.9, 0.9, 0.6]),
                moon("Rhea", 10.0, 0.4, 45.2, 12.0, [0.6, 1.0, 0.6]),
                moon("Mimas", 7.0, 0.1, 9.4, 25.0, [1.0, 1.0, 1.0]),
                moon("Hyperion", 12.0, 0.12, 212.8, 10.0, [1.0, 0.5, 0.5]),
                moon("Iapetus", 20.0, 0.35, 793.3, 8.0, [0.4, 0.7, 1.0]),
                moon("Janus", 6.5, 0.13, 6.9, 18.0, [0.7, 1.0, 0.7]),
                moon("Phoebe", 30.0, 0.2, 5505.6, 5.0, [1.0, 0.9, 0.6]),
                moon("Pandora", 6.2, 0.1, 6.3, 22.0, [0.8, 0.6, 1.0]),
            ],
        }
    }
}
