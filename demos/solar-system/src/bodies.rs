/// Scene content: planet table, moons, rings, belt, backdrop and the
/// planet fact sheet shown by the host's info panel.
///
/// Distances and sizes are scene units, chosen for readability rather than
/// realism.

use glam::Vec3;
use orrery_engine::{Color, Rng};

use crate::orbit::OrbitState;

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLANET_COUNT: usize = 8;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 22.0;
pub const SUN_TEXTURE: &str = "sun.jpg";
pub const SUN_FLARE_TEXTURE: &str = "solarflare.jpg";
/// Spin per step, radians.
pub const SUN_SPIN: f32 = 0.001;
pub const SUN_FLARE_COLOR: Color = Color::new(1.0, 0.333, 0.0);

// ── Planets ──────────────────────────────────────────────────────────

/// Static description of one planet.
#[derive(Debug, Clone, Copy)]
pub struct PlanetDesc {
    pub name: &'static str,
    pub texture: &'static str,
    pub radius: f32,
    pub orbit_radius: f32,
    /// Radians per second at speed multiplier 1.
    pub orbit_speed: f32,
    /// X coordinate of the slot this planet takes in aligned mode.
    pub align_x: f32,
    pub has_rings: bool,
    pub orbit_color: Color,
}

impl PlanetDesc {
    /// Where the planet settles in aligned mode.
    pub fn align_target(&self) -> Vec3 {
        Vec3::new(self.align_x, 0.0, 0.0)
    }
}

pub const PLANETS: [PlanetDesc; PLANET_COUNT] = [
    PlanetDesc { name: "Mercury", texture: "mercury.jpg",       radius: 0.9,  orbit_radius: 23.51,  orbit_speed: 2.5,   align_x: 25.0,  has_rings: false, orbit_color: Color::new(1.0, 1.0, 1.0) },
    PlanetDesc { name: "Venus",   texture: "venus_surface.jpg", radius: 1.9,  orbit_radius: 30.60,  orbit_speed: 0.97,  align_x: 32.0,  has_rings: false, orbit_color: Color::new(1.0, 1.0, 0.878) },
    PlanetDesc { name: "Earth",   texture: "earth_daymap.jpg",  radius: 2.0,  orbit_radius: 36.05,  orbit_speed: 0.60,  align_x: 40.0,  has_rings: false, orbit_color: Color::new(0.678, 0.847, 0.902) },
    PlanetDesc { name: "Mars",    texture: "mars.jpg",          radius: 1.6,  orbit_radius: 44.40,  orbit_speed: 0.32,  align_x: 50.0,  has_rings: false, orbit_color: Color::new(1.0, 0.8, 0.6) },
    PlanetDesc { name: "Jupiter", texture: "jupiter.jpg",       radius: 8.94, orbit_radius: 70.65,  orbit_speed: 0.051, align_x: 80.0,  has_rings: false, orbit_color: Color::new(0.565, 0.933, 0.565) },
    PlanetDesc { name: "Saturn",  texture: "saturn.jpg",        radius: 6.28, orbit_radius: 100.45, orbit_speed: 0.025, align_x: 110.0, has_rings: true,  orbit_color: Color::new(0.961, 0.871, 0.702) },
    PlanetDesc { name: "Uranus",  texture: "uranus.jpg",        radius: 3.0,  orbit_radius: 120.0,  orbit_speed: 0.08,  align_x: 135.0, has_rings: true,  orbit_color: Color::new(1.0, 0.714, 0.757) },
    PlanetDesc { name: "Neptune", texture: "neptune.jpg",       radius: 6.74, orbit_radius: 130.35, orbit_speed: 0.015, align_x: 155.0, has_rings: false, orbit_color: Color::new(0.678, 0.847, 0.902) },
];

pub const ORBIT_LINE_ALPHA: f32 = 0.35;
pub const ORBIT_LINE_WIDTH: f32 = 0.15;
pub const ORBIT_SAMPLES: usize = 96;

// ── Moons & rings ────────────────────────────────────────────────────

/// Circular orbit around a parent planet.
#[derive(Debug, Clone, Copy)]
pub struct MoonDesc {
    pub name: &'static str,
    pub parent: usize,
    pub texture: &'static str,
    pub radius: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
}

pub const MOONS: [MoonDesc; 1] = [
    MoonDesc { name: "Moon", parent: EARTH, texture: "moon.jpg", radius: 0.6, orbit_radius: 3.0, orbit_speed: 0.4 },
];

pub const RING_TEXTURE: &str = "saturn_ring_alpha.png";
pub const RING_INNER_FACTOR: f32 = 1.2;
pub const RING_OUTER_FACTOR: f32 = 2.2;
/// Spin per step, radians.
pub const RING_SPIN: f32 = 0.01;

/// Translucent sphere drawn just above a planet's surface.
#[derive(Debug, Clone, Copy)]
pub struct ShellDesc {
    pub name: &'static str,
    pub parent: usize,
    pub texture: &'static str,
    /// Added to the parent radius.
    pub lift: f32,
    pub alpha: f32,
    pub emissive: f32,
}

pub const SHELLS: [ShellDesc; 2] = [
    ShellDesc { name: "earth-lights", parent: EARTH, texture: "earth_nightmap.jpg", lift: 0.005, alpha: 0.5, emissive: 1.5 },
    ShellDesc { name: "earth-clouds", parent: EARTH, texture: "earth_cloud.jpg",    lift: 0.01,  alpha: 0.4, emissive: 0.0 },
];

// ── Asteroid belt ────────────────────────────────────────────────────

pub const ASTEROID_COUNT: usize = 1000;
pub const ASTEROID_RADIUS_MIN: f32 = 55.0;
pub const ASTEROID_RADIUS_MAX: f32 = 65.0;
pub const ASTEROID_HALF_THICKNESS: f32 = 1.0;
pub const ASTEROID_SPEED_MIN: f32 = 0.06;
pub const ASTEROID_SPEED_MAX: f32 = 0.18;
pub const ASTEROID_SIZE: f32 = 0.15;
pub const ASTEROID_COLOR: Color = Color::new(0.533, 0.533, 0.533);
pub const ASTEROID_SPIN: f32 = 0.01;
pub const ASTEROID_SEED: u64 = 0xA57E_401D;

/// Deterministic belt: same seed, same belt.
pub fn generate_belt(seed: u64) -> Vec<OrbitState> {
    let mut rng = Rng::new(seed);
    (0..ASTEROID_COUNT)
        .map(|_| {
            let angle = rng.range(0.0, std::f32::consts::TAU);
            let radius = rng.range(ASTEROID_RADIUS_MIN, ASTEROID_RADIUS_MAX);
            let y = rng.range(-ASTEROID_HALF_THICKNESS, ASTEROID_HALF_THICKNESS);
            let speed = rng.range(ASTEROID_SPEED_MIN, ASTEROID_SPEED_MAX);
            OrbitState::new(radius, speed)
                .with_angle(angle)
                .with_vertical_offset(y)
        })
        .collect()
}

// ── Black hole backdrop ──────────────────────────────────────────────

pub const BLACK_HOLE_POS: Vec3 = Vec3::new(0.0, 0.0, -300.0);
pub const BLACK_HOLE_CORE_RADIUS: f32 = 25.0;
pub const BLACK_HOLE_DISK_INNER: f32 = 28.0;
pub const BLACK_HOLE_DISK_OUTER: f32 = 60.0;
pub const BLACK_HOLE_DISK_TEXTURE: &str = "blackhole_disk.jpg";

/// Every texture the scene refers to, for the default manifest.
pub fn texture_names() -> Vec<&'static str> {
    let mut names = vec![SUN_TEXTURE, SUN_FLARE_TEXTURE, RING_TEXTURE, BLACK_HOLE_DISK_TEXTURE];
    names.extend(PLANETS.iter().map(|p| p.texture));
    names.extend(MOONS.iter().map(|m| m.texture));
    names.extend(SHELLS.iter().map(|l| l.texture));
    names
}

// ── Planet fact sheet ────────────────────────────────────────────────

pub struct PlanetInfo {
    pub gravity: &'static str,
    pub mass: &'static str,
    pub distance_from_sun: &'static str,
    pub moons: &'static str,
    pub temperature: &'static str,
    pub description: &'static str,
}

pub const PLANET_INFO: [PlanetInfo; PLANET_COUNT] = [
    PlanetInfo {
        gravity: "3.7 m/s²",
        mass: "3.3 × 10²³ kg",
        distance_from_sun: "57.9 M km",
        moons: "0",
        temperature: "167°C",
        description: "Mercury is the closest planet to the Sun and has no significant atmosphere.",
    },
    PlanetInfo {
        gravity: "8.87 m/s²",
        mass: "4.87 × 10²⁴ kg",
        distance_from_sun: "108.2 M km",
        moons: "0",
        temperature: "464°C",
        description: "Venus has a dense atmosphere made mostly of carbon dioxide.",
    },
    PlanetInfo {
        gravity: "9.81 m/s²",
        mass: "5.97 × 10²⁴ kg",
        distance_from_sun: "149.6 M km",
        moons: "1 (the Moon)",
        temperature: "15°C",
        description: "Our blue planet harbors life and has a protective magnetic field.",
    },
    PlanetInfo {
        gravity: "3.71 m/s²",
        mass: "6.42 × 10²³ kg",
        distance_from_sun: "227.9 M km",
        moons: "2 (Phobos, Deimos)",
        temperature: "-63°C",
        description: "Mars is known as the red planet, with large polar ice caps.",
    },
    PlanetInfo {
        gravity: "24.79 m/s²",
        mass: "1.90 × 10²⁷ kg",
        distance_from_sun: "778.5 M km",
        moons: "79+",
        temperature: "-108°C",
        description: "Jupiter is the largest planet in the solar system, famous for its Great Red Spot.",
    },
    PlanetInfo {
        gravity: "10.44 m/s²",
        mass: "5.68 × 10²⁶ kg",
        distance_from_sun: "1.43 B km",
        moons: "83+",
        temperature: "-139°C",
        description: "Saturn has the most spectacular rings in the solar system.",
    },
    PlanetInfo {
        gravity: "8.69 m/s²",
        mass: "8.68 × 10²⁵ kg",
        distance_from_sun: "2.87 B km",
        moons: "27",
        temperature: "-195°C",
        description: "Uranus has an extreme axial tilt and spins almost on its side.",
    },
    PlanetInfo {
        gravity: "11.15 m/s²",
        mass: "1.02 × 10²⁶ kg",
        distance_from_sun: "4.5 B km",
        moons: "14",
        temperature: "-200°C",
        description: "Neptune is the farthest planet, known for its violent winds.",
    },
];

/// Name and fact sheet as one block of text, or an empty string for an
/// unknown index.
pub fn describe(index: usize) -> String {
    match (PLANETS.get(index), PLANET_INFO.get(index)) {
        (Some(planet), Some(info)) => format!(
            "{}\nGravity: {}\nMass: {}\nDistance from the Sun: {}\nMoons: {}\nTemperature: {}\n{}",
            planet.name,
            info.gravity,
            info.mass,
            info.distance_from_sun,
            info.moons,
            info.temperature,
            info.description,
        ),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_line_up() {
        assert_eq!(PLANETS.len(), PLANET_COUNT);
        assert_eq!(PLANET_INFO.len(), PLANET_COUNT);
        assert_eq!(PLANETS[SATURN].name, "Saturn");
        assert_eq!(PLANETS[NEPTUNE].name, "Neptune");
    }

    #[test]
    fn orbits_are_ordered_outward() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].orbit_radius < pair[1].orbit_radius);
            assert!(pair[0].align_x < pair[1].align_x);
        }
    }

    #[test]
    fn only_saturn_and_uranus_have_rings() {
        let ringed: Vec<usize> = (0..PLANET_COUNT).filter(|&i| PLANETS[i].has_rings).collect();
        assert_eq!(ringed, vec![SATURN, URANUS]);
    }

    #[test]
    fn moon_parents_valid() {
        for moon in &MOONS {
            assert!(moon.parent < PLANET_COUNT, "moon {} has invalid parent", moon.name);
        }
    }

    #[test]
    fn belt_in_range_and_deterministic() {
        let belt = generate_belt(ASTEROID_SEED);
        assert_eq!(belt.len(), ASTEROID_COUNT);
        for orbit in &belt {
            assert!(orbit.radius >= ASTEROID_RADIUS_MIN && orbit.radius <= ASTEROID_RADIUS_MAX);
            assert!(orbit.vertical_offset.abs() <= ASTEROID_HALF_THICKNESS);
            assert!(orbit.angular_speed >= ASTEROID_SPEED_MIN && orbit.angular_speed <= ASTEROID_SPEED_MAX);
        }
        assert_eq!(belt, generate_belt(ASTEROID_SEED));
    }

    #[test]
    fn describe_known_and_unknown() {
        let text = describe(EARTH);
        assert!(text.starts_with("Earth\n"));
        assert!(text.contains("9.81 m/s²"));
        assert!(describe(PLANET_COUNT).is_empty());
    }

    #[test]
    fn texture_names_cover_scene() {
        let names = texture_names();
        assert!(names.contains(&"sun.jpg"));
        assert!(names.contains(&"moon.jpg"));
        assert!(names.contains(&"neptune.jpg"));
    }

    #[test]
    fn shells_sit_on_earth() {
        for shell in &SHELLS {
            assert_eq!(shell.parent, EARTH);
            assert!(shell.lift > 0.0 && shell.alpha < 1.0);
            assert!(texture_names().contains(&shell.texture));
        }
    }
}
