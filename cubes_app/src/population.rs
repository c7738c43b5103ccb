//! Gravity-cubes scene layout
//!
//! Two blue side walls just outside the visible area, two white platforms
//! spanning most of the width, and a handful of randomly placed cubes that
//! tumble between them as gravity tilts.

use rand::Rng;

use tilt_engine::prelude::*;

/// Cube palette, cycled by spawn order
const CUBE_COLORS: [Color; 3] = [Color::RED, Color::YELLOW, Color::BLUE];

/// Population strategy for the gravity-cubes layout
pub struct GravityCubes;

impl ScenePopulation for GravityCubes {
    fn walls(&self, _config: &SceneConfig) -> Vec<WallSpec> {
        vec![
            // Right and left side walls
            WallSpec { color: Color::BLUE },
            WallSpec { color: Color::BLUE },
            // Upper and lower platforms
            WallSpec { color: Color::WHITE },
            WallSpec { color: Color::WHITE },
        ]
    }

    fn initial_bodies(&self, metrics: &SurfaceMetrics, config: &SceneConfig) -> Vec<BodySpawn> {
        let mut rng = rand::thread_rng();
        // Surfaces too small to leave a body-sized margin spawn at center;
        // gen_range panics on an empty range
        let half_width = metrics.width_f() / 2.0 - config.body_size;
        let half_height = metrics.height_f() / 2.0 - config.body_size;

        (0..config.initial_bodies)
            .map(|i| BodySpawn {
                x: if half_width > 0.0 {
                    rng.gen_range(-half_width..half_width)
                } else {
                    0.0
                },
                y: if half_height > 0.0 {
                    rng.gen_range(0.0..half_height)
                } else {
                    0.0
                },
                size: config.body_size,
                color: self.spawn_color(i),
            })
            .collect()
    }

    fn wall_placement(
        &self,
        index: usize,
        metrics: &SurfaceMetrics,
        config: &SceneConfig,
    ) -> WallPlacement {
        let width = metrics.width_f();
        let height = metrics.height_f();
        let thickness = config.wall_thickness;

        match index {
            // Side walls sit one thickness outside the visible edge
            0 => WallPlacement {
                x: width / 2.0 + thickness,
                y: 0.0,
                width: thickness,
                height,
            },
            1 => WallPlacement {
                x: -(width / 2.0 + thickness),
                y: 0.0,
                width: thickness,
                height,
            },
            // Platforms offset from center, spanning most of the width
            2 => WallPlacement {
                x: -width / 7.0,
                y: height / 6.0,
                width: width / 1.4,
                height: thickness,
            },
            _ => WallPlacement {
                x: width / 7.0,
                y: -height / 6.0,
                width: width / 1.4,
                height: thickness,
            },
        }
    }

    fn spawn_color(&self, existing: usize) -> Color {
        CUBE_COLORS[existing % CUBE_COLORS.len()]
    }
}
