use flock_core::{Boid, ConeTest, FlockConfig, FlockSimulation, Vector2D};
use serde::{Deserialize, Serialize};

/// A 2D position in field coordinates (origin at the center)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vector2D> for Position {
    fn from(v: Vector2D) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Position> for Vector2D {
    fn from(p: Position) -> Self {
        Vector2D::new(p.x, p.y)
    }
}

/// Pointer update from the input layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttractorUpdate {
    /// Step before which the update is applied.
    #[serde(default)]
    pub at_step: u64,
    /// None clears the attractor
    pub position: Option<Position>,
}

/// Flock settings as read from a JSON file. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockSettings {
    pub boid_count: usize,
    pub width: f32,
    pub height: f32,
    /// Steps per second; 0 runs unthrottled.
    pub fps: u32,
    pub speed: f32,
    pub initial_heading: f32,
    pub visible_distance: f32,
    pub visible_angle: f32,
    pub separation_weight: f32,
    pub separation_range: f32,
    pub separation_angle: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub tracking_weight: f32,
    pub legacy_cone: bool,
}

impl Default for FlockSettings {
    fn default() -> Self {
        let config = FlockConfig::default();
        Self {
            boid_count: 300,
            width: 800.0,
            height: 600.0,
            fps: 10,
            speed: config.speed,
            initial_heading: config.initial_heading,
            visible_distance: config.visible_distance,
            visible_angle: config.visible_angle,
            separation_weight: config.separation_weight,
            separation_range: config.separation_range,
            separation_angle: config.separation_angle,
            alignment_weight: config.alignment_weight,
            cohesion_weight: config.cohesion_weight,
            tracking_weight: config.tracking_weight,
            legacy_cone: config.cone_test == ConeTest::Legacy,
        }
    }
}

impl FlockSettings {
    pub fn to_config(&self) -> FlockConfig {
        FlockConfig {
            speed: self.speed,
            initial_heading: self.initial_heading,
            visible_distance: self.visible_distance,
            visible_angle: self.visible_angle,
            separation_weight: self.separation_weight,
            separation_range: self.separation_range,
            separation_angle: self.separation_angle,
            alignment_weight: self.alignment_weight,
            cohesion_weight: self.cohesion_weight,
            tracking_weight: self.tracking_weight,
            cone_test: if self.legacy_cone {
                ConeTest::Legacy
            } else {
                ConeTest::SignedDifference
            },
        }
    }
}

/// One boid as handed to a renderer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSnapshot {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    /// Number of boids currently in view.
    pub neighbors: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<[Position; 3]>,
}

impl AgentSnapshot {
    pub fn new(id: usize, boid: &Boid, neighbors: usize, with_outline: bool) -> Self {
        Self {
            id,
            x: boid.position.x,
            y: boid.position.y,
            heading: boid.heading,
            neighbors,
            outline: with_outline.then(|| boid.outline().map(Position::from)),
        }
    }
}

/// Full state of the flock after a step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub step: u64,
    pub width: f32,
    pub height: f32,
    pub attractor: Option<Position>,
    pub agents: Vec<AgentSnapshot>,
}

impl FrameSnapshot {
    pub fn capture(flock: &FlockSimulation, with_outline: bool) -> Self {
        let agents = flock
            .boids()
            .iter()
            .enumerate()
            .map(|(id, boid)| AgentSnapshot::new(id, boid, flock.neighbors(id).len(), with_outline))
            .collect();

        Self {
            step: flock.step_count(),
            width: flock.width(),
            height: flock.height(),
            attractor: flock.attractor().map(Position::from),
            agents,
        }
    }
}

/// Status reported by a driver when it stops
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlockStatus {
    pub boid_count: usize,
    pub steps: u64,
    pub fps: u32,
    pub attractor_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn two_boid_flock() -> FlockSimulation {
        let config = FlockConfig::default();
        let boids = vec![
            Boid::new(Vector2D::new(0.0, 0.0), &config)
                .with_heading(0.0)
                .with_perception(100.0, TAU),
            Boid::new(Vector2D::new(30.0, 40.0), &config).with_perception(10.0, TAU),
        ];
        FlockSimulation::from_boids(400.0, 300.0, config, boids).unwrap()
    }

    #[test]
    fn test_default_settings_match_core_config() {
        assert_eq!(FlockSettings::default().to_config(), FlockConfig::default());
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings: FlockSettings =
            serde_json::from_str(r#"{"boid_count": 12, "legacy_cone": true}"#).unwrap();

        assert_eq!(settings.boid_count, 12);
        assert_eq!(settings.width, 800.0);
        assert_eq!(settings.fps, 10);
        assert_eq!(settings.to_config().cone_test, ConeTest::Legacy);
    }

    #[test]
    fn test_capture_frame() {
        let mut flock = two_boid_flock();
        flock.set_attractor(Some(Vector2D::new(1.0, 2.0)));

        let frame = FrameSnapshot::capture(&flock, false);

        assert_eq!(frame.step, 0);
        assert_eq!(frame.width, 400.0);
        assert_eq!(frame.attractor, Some(Position::new(1.0, 2.0)));
        assert_eq!(frame.agents.len(), 2);
        // The first boid sees the second, which cannot see that far.
        assert_eq!(frame.agents[0].neighbors, 1);
        assert_eq!(frame.agents[1].neighbors, 0);
        assert!(frame.agents[0].outline.is_none());
    }

    #[test]
    fn test_outline_is_serialized_only_when_requested() {
        let flock = two_boid_flock();

        let bare = serde_json::to_string(&FrameSnapshot::capture(&flock, false)).unwrap();
        let drawn = serde_json::to_string(&FrameSnapshot::capture(&flock, true)).unwrap();

        assert!(!bare.contains("outline"));
        assert!(drawn.contains("outline"));
    }

    #[test]
    fn test_attractor_update_parsing() {
        let clear: AttractorUpdate = serde_json::from_str(r#"{"position":null}"#).unwrap();
        assert_eq!(clear.at_step, 0);
        assert!(clear.position.is_none());

        let moved: AttractorUpdate =
            serde_json::from_str(r#"{"at_step":5,"position":{"x":1.5,"y":-2.0}}"#).unwrap();
        assert_eq!(moved.at_step, 5);
        assert_eq!(moved.position, Some(Position::new(1.5, -2.0)));
    }
}
