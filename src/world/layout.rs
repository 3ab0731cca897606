//! World domain: the test level as plain data.

use bevy::prelude::*;

use crate::combat::TurretConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Ground,
    Wall,
}

/// A static box of level geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: &'static str,
    pub kind: BlockKind,
    pub center: Vec2,
    pub size: Vec2,
    /// Degrees around z; slopes are tilted ground blocks.
    pub tilt: f32,
}

impl Block {
    fn ground(name: &'static str, center: Vec2, size: Vec2) -> Self {
        Self {
            name,
            kind: BlockKind::Ground,
            center,
            size,
            tilt: 0.0,
        }
    }

    fn wall(name: &'static str, center: Vec2, size: Vec2) -> Self {
        Self {
            name,
            kind: BlockKind::Wall,
            ..Self::ground(name, center, size)
        }
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.size.y * 0.5
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub blocks: Vec<Block>,
    /// Ability name and position of each unlock trigger.
    pub triggers: Vec<(String, Vec2)>,
    pub checkpoints: Vec<(String, Vec2)>,
    /// Center and size of the kill pit sensor.
    pub kill_zone: (Vec2, Vec2),
    pub turrets: Vec<(Vec2, TurretConfig)>,
    /// Pushable boxes saved with checkpoints.
    pub crates: Vec<(String, Vec2)>,
}

impl LevelLayout {
    /// Flat start, a small ledge, a downhill slope, a pit and a turret room.
    pub fn test_level() -> Self {
        Self {
            blocks: vec![
                Block::ground("Start floor", Vec2::new(-200.0, -200.0), Vec2::new(600.0, 40.0)),
                Block::ground("Spike ledge", Vec2::new(-40.0, -172.0), Vec2::new(40.0, 16.0)),
                Block::ground("Upper floor", Vec2::new(300.0, -20.0), Vec2::new(400.0, 40.0)),
                Block::ground("Step", Vec2::new(80.0, -110.0), Vec2::new(120.0, 20.0)),
                Block {
                    tilt: -25.0,
                    ..Block::ground("Slope", Vec2::new(640.0, -120.0), Vec2::new(320.0, 30.0))
                },
                Block::ground("Far floor", Vec2::new(1250.0, -220.0), Vec2::new(700.0, 40.0)),
                Block::wall("Left wall", Vec2::new(-520.0, 50.0), Vec2::new(40.0, 560.0)),
                Block::wall("Right wall", Vec2::new(1620.0, 50.0), Vec2::new(40.0, 600.0)),
            ],
            triggers: vec![
                ("Dash".to_string(), Vec2::new(-120.0, -150.0)),
                ("Shield".to_string(), Vec2::new(350.0, 30.0)),
                ("Punch".to_string(), Vec2::new(1000.0, -170.0)),
            ],
            checkpoints: vec![
                ("upper".to_string(), Vec2::new(200.0, 30.0)),
                ("far".to_string(), Vec2::new(950.0, -170.0)),
            ],
            kill_zone: (Vec2::new(600.0, -420.0), Vec2::new(2400.0, 60.0)),
            turrets: vec![(
                Vec2::new(1450.0, -150.0),
                TurretConfig {
                    angle: 160.0,
                    max_angle_diff: 30.0,
                    interval: 1.5,
                    ..Default::default()
                },
            )],
            crates: vec![("Crate".to_string(), Vec2::new(1200.0, -180.0))],
        }
    }
}
