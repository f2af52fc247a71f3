//! Room template tables.
//!
//! A template is pure data: interior dimensions, a base material color, and
//! the obstacle layout. Obstacle offsets are relative to the room center;
//! the room's spawn position along the travel axis is applied when a plan
//! is generated.

use glam::Vec3;

/// The room themes the generator can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomKind {
    Office,
    Warehouse,
    Lab,
    Library,
    Kitchen,
}

impl RoomKind {
    pub const ALL: [RoomKind; 5] = [
        RoomKind::Office,
        RoomKind::Warehouse,
        RoomKind::Lab,
        RoomKind::Library,
        RoomKind::Kitchen,
    ];

    /// Look up a kind by name. Unknown names fall back to the office room
    /// so world generation never halts on bad data.
    pub fn from_name(name: &str) -> RoomKind {
        match name {
            "office" => RoomKind::Office,
            "warehouse" => RoomKind::Warehouse,
            "lab" => RoomKind::Lab,
            "library" => RoomKind::Library,
            "kitchen" => RoomKind::Kitchen,
            other => {
                log::debug!("unknown room template '{}', using office", other);
                RoomKind::Office
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RoomKind::Office => "office",
            RoomKind::Warehouse => "warehouse",
            RoomKind::Lab => "lab",
            RoomKind::Library => "library",
            RoomKind::Kitchen => "kitchen",
        }
    }
}

/// Scripted motion for a kinematic obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Sinusoidal slide along `axis` with the given amplitude and rate.
    Slide {
        axis: Vec3,
        amplitude: f32,
        rate: f32,
    },
    /// Continuous spin about the vertical axis, radians per second.
    Spin { speed: f32 },
}

/// One obstacle in a template: a box at an offset from the room center.
/// Obstacles with a motion are kinematic; the rest are static scenery.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleSpec {
    pub offset: Vec3,
    /// Full extents of the box.
    pub size: Vec3,
    pub motion: Option<Motion>,
}

impl ObstacleSpec {
    const fn fixed(offset: Vec3, size: Vec3) -> Self {
        Self {
            offset,
            size,
            motion: None,
        }
    }

    const fn moving(offset: Vec3, size: Vec3, motion: Motion) -> Self {
        Self {
            offset,
            size,
            motion: Some(motion),
        }
    }
}

/// Resolved template data for one room kind.
#[derive(Debug, Clone)]
pub struct RoomTemplate {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub base_color: [f32; 3],
    pub obstacles: Vec<ObstacleSpec>,
}

/// Resolve a room kind to its template.
pub fn template(kind: RoomKind) -> RoomTemplate {
    match kind {
        RoomKind::Office => RoomTemplate {
            width: 20.0,
            height: 20.0,
            depth: 30.0,
            base_color: [0.96, 0.96, 0.86],
            obstacles: vec![
                // desk
                ObstacleSpec::fixed(Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 2.0)),
                // shelves
                ObstacleSpec::fixed(Vec3::new(-8.0, 0.0, -5.0), Vec3::new(1.0, 6.0, 3.0)),
                ObstacleSpec::fixed(Vec3::new(8.0, 0.0, -5.0), Vec3::new(1.0, 6.0, 3.0)),
            ],
        },
        RoomKind::Warehouse => RoomTemplate {
            width: 25.0,
            height: 25.0,
            depth: 40.0,
            base_color: [0.83, 0.83, 0.83],
            obstacles: vec![
                // crates
                ObstacleSpec::fixed(Vec3::new(-6.0, 0.0, -10.0), Vec3::new(2.0, 2.0, 2.0)),
                ObstacleSpec::fixed(Vec3::new(6.0, 0.0, -10.0), Vec3::new(2.0, 2.0, 2.0)),
                ObstacleSpec::fixed(Vec3::new(0.0, 0.0, -15.0), Vec3::new(3.0, 3.0, 3.0)),
                // suspended pallet swinging across the aisle
                ObstacleSpec::moving(
                    Vec3::new(0.0, 4.0, 5.0),
                    Vec3::new(3.0, 1.0, 2.0),
                    Motion::Slide {
                        axis: Vec3::X,
                        amplitude: 6.0,
                        rate: 0.8,
                    },
                ),
            ],
        },
        RoomKind::Lab => RoomTemplate {
            width: 18.0,
            height: 18.0,
            depth: 25.0,
            base_color: [0.9, 0.9, 0.98],
            obstacles: vec![
                // table
                ObstacleSpec::fixed(Vec3::new(0.0, 0.0, -5.0), Vec3::new(4.0, 1.0, 2.0)),
                // machines
                ObstacleSpec::fixed(Vec3::new(-7.0, 0.0, -10.0), Vec3::new(2.0, 4.0, 2.0)),
                ObstacleSpec::fixed(Vec3::new(7.0, 0.0, -10.0), Vec3::new(2.0, 4.0, 2.0)),
                // centrifuge arm
                ObstacleSpec::moving(
                    Vec3::new(0.0, 3.0, 4.0),
                    Vec3::new(5.0, 0.4, 0.6),
                    Motion::Spin { speed: 1.6 },
                ),
            ],
        },
        RoomKind::Library => RoomTemplate {
            width: 22.0,
            height: 20.0,
            depth: 32.0,
            base_color: [0.82, 0.71, 0.55],
            obstacles: vec![
                // bookcases
                ObstacleSpec::fixed(Vec3::new(-8.0, 0.0, -8.0), Vec3::new(1.0, 7.0, 4.0)),
                ObstacleSpec::fixed(Vec3::new(8.0, 0.0, -8.0), Vec3::new(1.0, 7.0, 4.0)),
                // reading table
                ObstacleSpec::fixed(Vec3::new(0.0, 0.0, -2.0), Vec3::new(4.0, 1.0, 2.0)),
                // book cart rolling between the stacks
                ObstacleSpec::moving(
                    Vec3::new(0.0, 0.0, 8.0),
                    Vec3::new(2.0, 2.0, 1.0),
                    Motion::Slide {
                        axis: Vec3::X,
                        amplitude: 5.0,
                        rate: 1.0,
                    },
                ),
            ],
        },
        RoomKind::Kitchen => RoomTemplate {
            width: 18.0,
            height: 16.0,
            depth: 26.0,
            base_color: [0.94, 0.9, 0.84],
            obstacles: vec![
                // counter and island
                ObstacleSpec::fixed(Vec3::new(-6.0, 0.0, -6.0), Vec3::new(4.0, 1.0, 2.0)),
                ObstacleSpec::fixed(Vec3::new(0.0, 0.0, -10.0), Vec3::new(3.0, 1.0, 2.0)),
                // fridge
                ObstacleSpec::fixed(Vec3::new(6.0, 0.0, -4.0), Vec3::new(2.0, 5.0, 2.0)),
                // ceiling fan
                ObstacleSpec::moving(
                    Vec3::new(0.0, 5.0, 2.0),
                    Vec3::new(4.0, 0.2, 0.5),
                    Motion::Spin { speed: 2.0 },
                ),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_office() {
        assert_eq!(RoomKind::from_name("cathedral"), RoomKind::Office);
        assert_eq!(RoomKind::from_name(""), RoomKind::Office);
        assert_eq!(RoomKind::from_name("kitchen"), RoomKind::Kitchen);
    }

    #[test]
    fn every_kind_has_a_usable_template() {
        for kind in RoomKind::ALL {
            let t = template(kind);
            assert!(t.width > 0.0 && t.height > 0.0 && t.depth > 0.0);
            assert!(!t.obstacles.is_empty(), "{:?} has no obstacles", kind);
            // Obstacles must fit inside the room footprint.
            for o in &t.obstacles {
                assert!(o.offset.x.abs() + o.size.x / 2.0 <= t.width / 2.0);
            }
        }
    }

    #[test]
    fn name_round_trips() {
        for kind in RoomKind::ALL {
            assert_eq!(RoomKind::from_name(kind.name()), kind);
        }
    }
}
