//! Scene-level integration tests
//!
//! Exercises the full lifecycle against headless collaborators: a shared
//! layout probe whose size tests can change, a recording render surface, and
//! a scripted orientation source.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use approx::assert_relative_eq;

use crate::display::{LayoutProbe, SurfaceMetrics};
use crate::input::{InputError, OrientationSample, OrientationSource};
use crate::render::{Color, MeshInstance, OrthographicCamera, RenderError, RenderSurface};
use crate::scene::{
    BodySpawn, Scene, SceneConfig, SceneContext, SceneError, ScenePopulation, SceneState,
    WallPlacement, WallSpec,
};

// ---------------------------------------------------------------------------
// Headless collaborators
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct SharedProbe {
    size: Rc<Cell<(u32, u32)>>,
    ratio: f32,
}

impl SharedProbe {
    fn new(width: u32, height: u32) -> Self {
        Self {
            size: Rc::new(Cell::new((width, height))),
            ratio: 1.0,
        }
    }
}

impl LayoutProbe for SharedProbe {
    fn container_size(&self) -> (u32, u32) {
        self.size.get()
    }

    fn pixel_ratio(&self) -> f32 {
        self.ratio
    }

    fn container_position(&self) -> (f32, f32) {
        (0.0, 0.0)
    }
}

#[derive(Default)]
struct RenderLog {
    draws: usize,
    output_size: Option<(u32, u32)>,
    pixel_ratio: Option<f32>,
    last_frame: Vec<MeshInstance>,
}

#[derive(Clone)]
struct RecordingSurface(Rc<RefCell<RenderLog>>);

impl RecordingSurface {
    fn new() -> (Self, Rc<RefCell<RenderLog>>) {
        let log = Rc::new(RefCell::new(RenderLog::default()));
        (Self(Rc::clone(&log)), log)
    }
}

impl RenderSurface for RecordingSurface {
    fn set_output_size(&mut self, width: u32, height: u32, _preserve_aspect: bool) {
        self.0.borrow_mut().output_size = Some((width, height));
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.0.borrow_mut().pixel_ratio = Some(ratio);
    }

    fn draw(
        &mut self,
        instances: &[MeshInstance],
        _camera: &OrthographicCamera,
    ) -> Result<(), RenderError> {
        let mut log = self.0.borrow_mut();
        log.draws += 1;
        log.last_frame = instances.to_vec();
        Ok(())
    }
}

struct ScriptedOrientation {
    queue: VecDeque<OrientationSample>,
    subscribed: Rc<Cell<bool>>,
}

impl OrientationSource for ScriptedOrientation {
    fn subscribe(&mut self) -> Result<(), InputError> {
        self.subscribed.set(true);
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.subscribed.set(false);
    }

    fn latest(&mut self) -> Option<OrientationSample> {
        self.queue.pop_front()
    }
}

/// Population with a configurable number of open-air cubes and an optional
/// floor spanning the surface bottom
struct TestPopulation {
    cubes: usize,
    with_floor: bool,
}

impl ScenePopulation for TestPopulation {
    fn walls(&self, _config: &SceneConfig) -> Vec<WallSpec> {
        if self.with_floor {
            vec![WallSpec {
                color: Color::WHITE,
            }]
        } else {
            Vec::new()
        }
    }

    fn initial_bodies(&self, metrics: &SurfaceMetrics, config: &SceneConfig) -> Vec<BodySpawn> {
        (0..self.cubes)
            .map(|i| BodySpawn {
                x: (i as f32 - self.cubes as f32 / 2.0) * (config.body_size + 5.0),
                y: metrics.height_f() / 4.0,
                size: config.body_size,
                color: Color::RED,
            })
            .collect()
    }

    fn wall_placement(
        &self,
        _index: usize,
        metrics: &SurfaceMetrics,
        config: &SceneConfig,
    ) -> WallPlacement {
        WallPlacement {
            x: 0.0,
            y: -metrics.height_f() / 2.0,
            width: metrics.width_f(),
            height: config.wall_thickness,
        }
    }
}

fn scene_with(
    cubes: usize,
    with_floor: bool,
) -> (Scene, Rc<RefCell<RenderLog>>, SharedProbe) {
    let probe = SharedProbe::new(800, 600);
    let (surface, log) = RecordingSurface::new();
    let context = SceneContext::new(Box::new(probe.clone()), Box::new(surface));
    let scene = Scene::new(
        "test-scene",
        context,
        Box::new(TestPopulation { cubes, with_floor }),
        SceneConfig::default(),
    )
    .expect("scene construction");
    (scene, log, probe)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_construction_reaches_active_with_population() {
    let (scene, log, _) = scene_with(5, true);
    assert_eq!(scene.state(), SceneState::Active);
    assert_eq!(scene.body_count(), 5);
    assert_eq!(scene.walls().len(), 1);
    assert_eq!(scene.world().body_count(), 6);
    assert!(scene.world().is_running());
    // First resize already reached the render collaborator
    assert_eq!(log.borrow().output_size, Some((800, 600)));
}

#[test]
fn test_destroy_releases_everything_and_is_terminal() {
    let (mut scene, _log, _) = scene_with(3, true);
    scene.destroy();

    assert_eq!(scene.state(), SceneState::Destroyed);
    assert_eq!(scene.world().body_count(), 0);
    assert!(!scene.world().is_running());

    assert!(matches!(scene.update(), Err(SceneError::Destroyed)));
    assert!(matches!(scene.resize(), Err(SceneError::Destroyed)));
    assert!(matches!(scene.add_body(0.0, 0.0), Err(SceneError::Destroyed)));

    // Idempotent
    scene.destroy();
    assert_eq!(scene.state(), SceneState::Destroyed);
}

#[test]
fn test_destroy_unsubscribes_orientation_source() {
    let subscribed = Rc::new(Cell::new(false));
    let mut source = ScriptedOrientation {
        queue: VecDeque::new(),
        subscribed: Rc::clone(&subscribed),
    };
    source.subscribe().unwrap();

    let probe = SharedProbe::new(800, 600);
    let (surface, _) = RecordingSurface::new();
    let context = SceneContext::new(Box::new(probe), Box::new(surface))
        .with_orientation(Box::new(source));
    let mut scene = Scene::new(
        "orientation-scene",
        context,
        Box::new(TestPopulation {
            cubes: 1,
            with_floor: false,
        }),
        SceneConfig::default(),
    )
    .unwrap();

    assert!(subscribed.get());
    scene.destroy();
    assert!(!subscribed.get());
}

// ---------------------------------------------------------------------------
// Synchronization
// ---------------------------------------------------------------------------

#[test]
fn test_update_mirrors_physics_pose_into_render() {
    let (mut scene, log, _) = scene_with(4, false);

    scene.pump_physics(10.0 / 60.0).unwrap();
    scene.update().unwrap();

    let log = log.borrow();
    assert_eq!(log.last_frame.len(), 4);
    for (instance, body) in log.last_frame.iter().zip(scene.bodies()) {
        let rigid = scene.world().body(body.handle()).unwrap();
        assert_relative_eq!(instance.position.x, rigid.physics_position().x);
        assert_relative_eq!(instance.position.y, -rigid.physics_position().y);
        assert_relative_eq!(instance.rotation_z, -rigid.angle());
    }
}

#[test]
fn test_update_is_idempotent_between_steps() {
    let (mut scene, log, _) = scene_with(3, false);

    scene.pump_physics(5.0 / 60.0).unwrap();
    scene.update().unwrap();
    let first = log.borrow().last_frame.clone();

    // No physics steps in between: same pose, one more draw
    scene.update().unwrap();
    assert_eq!(log.borrow().last_frame, first);
    assert_eq!(log.borrow().draws, 2);
}

#[test]
fn test_update_never_steps_physics() {
    let (mut scene, _, _) = scene_with(2, false);
    let initial: Vec<f32> = scene
        .bodies()
        .iter()
        .map(|b| scene.world().body(b.handle()).unwrap().physics_position().y)
        .collect();

    for _ in 0..10 {
        scene.update().unwrap();
    }

    for (body, y) in scene.bodies().iter().zip(initial) {
        assert_relative_eq!(
            scene.world().body(body.handle()).unwrap().physics_position().y,
            y
        );
    }
}

// ---------------------------------------------------------------------------
// Resize
// ---------------------------------------------------------------------------

#[test]
fn test_resize_is_idempotent_without_surface_change() {
    let (mut scene, _, _) = scene_with(2, true);

    scene.resize().unwrap();
    let camera = scene.camera().clone();
    let wall_mesh = *scene.walls()[0].mesh();

    scene.resize().unwrap();
    assert_eq!(scene.camera(), &camera);
    assert_eq!(scene.walls()[0].mesh(), &wall_mesh);
}

#[test]
fn test_resize_follows_surface_growth() {
    let (mut scene, log, probe) = scene_with(0, true);

    probe.size.set((1600, 900));
    scene.resize().unwrap();

    assert_relative_eq!(scene.camera().right, 800.0);
    assert_relative_eq!(scene.camera().top, 450.0);
    assert_eq!(log.borrow().output_size, Some((1600, 900)));

    // The floor wall was re-derived from the new metrics
    let wall = scene.walls()[0].mesh();
    assert_relative_eq!(wall.scale.x, 1600.0);
    assert_relative_eq!(wall.position.y, -450.0);

    let rigid = scene.world().body(scene.walls()[0].handle()).unwrap();
    assert_relative_eq!(rigid.size().x, 1600.0);
}

#[test]
fn test_repeated_wall_rescales_do_not_drift() {
    let (mut scene, _, probe) = scene_with(0, true);

    for _ in 0..5 {
        probe.size.set((1024, 768));
        scene.resize().unwrap();
        probe.size.set((800, 600));
        scene.resize().unwrap();
    }

    let rigid = scene.world().body(scene.walls()[0].handle()).unwrap();
    assert_relative_eq!(rigid.size().x, 800.0, epsilon = 1e-3);
    assert_relative_eq!(rigid.size().y, 10.0, epsilon = 1e-4);
}

// ---------------------------------------------------------------------------
// Body add/remove
// ---------------------------------------------------------------------------

#[test]
fn test_add_and_remove_keep_collections_in_lockstep() {
    let (mut scene, _, _) = scene_with(2, false);
    assert_eq!(scene.world().body_count(), 2);

    let handle = scene.add_body(10.0, 20.0).unwrap();
    assert_eq!(scene.body_count(), 3);
    assert_eq!(scene.world().body_count(), 3);

    scene.remove_body(handle).unwrap();
    assert_eq!(scene.body_count(), 2);
    assert_eq!(scene.world().body_count(), 2);
    assert!(!scene.world().contains(handle));

    // Removing again is a no-op
    scene.remove_body(handle).unwrap();
    assert_eq!(scene.world().body_count(), 2);

    // The registry invariant still holds for the next frame
    scene.update().unwrap();
}

#[test]
fn test_steps_after_removal_ignore_disposed_body() {
    let (mut scene, _, _) = scene_with(1, false);
    let handle = scene.add_body(0.0, 100.0).unwrap();
    scene.remove_body(handle).unwrap();

    scene.pump_physics(30.0 / 60.0).unwrap();
    scene.update().unwrap();
    assert!(!scene.world().contains(handle));
}

// ---------------------------------------------------------------------------
// Orientation input
// ---------------------------------------------------------------------------

#[test]
fn test_orientation_mapping_normalizes_by_90_degrees() {
    let (mut scene, _, _) = scene_with(0, false);

    scene.on_orientation_input(90.0, 45.0).unwrap();
    let gravity = scene.world().gravity();
    assert_relative_eq!(gravity.x, 1.0);
    assert_relative_eq!(gravity.y, 0.5);
}

#[test]
fn test_orientation_mapping_clamps_out_of_range_tilt() {
    let (mut scene, _, _) = scene_with(0, false);

    scene.on_orientation_input(200.0, -200.0).unwrap();
    let gravity = scene.world().gravity();
    assert_relative_eq!(gravity.x, 1.0);
    assert_relative_eq!(gravity.y, -1.0);
}

#[test]
fn test_update_consumes_orientation_source() {
    let subscribed = Rc::new(Cell::new(true));
    let source = ScriptedOrientation {
        queue: VecDeque::from([OrientationSample {
            alpha: 0.0,
            beta: 90.0,
            gamma: 0.0,
        }]),
        subscribed,
    };

    let probe = SharedProbe::new(800, 600);
    let (surface, _) = RecordingSurface::new();
    let context = SceneContext::new(Box::new(probe), Box::new(surface))
        .with_orientation(Box::new(source));
    let mut scene = Scene::new(
        "tilted",
        context,
        Box::new(TestPopulation {
            cubes: 0,
            with_floor: false,
        }),
        SceneConfig::default(),
    )
    .unwrap();

    scene.update().unwrap();
    assert_relative_eq!(scene.world().gravity().x, 1.0);
    assert_relative_eq!(scene.world().gravity().y, 0.0);
}

// ---------------------------------------------------------------------------
// Runtime tweaks
// ---------------------------------------------------------------------------

#[test]
fn test_scroll_refreshes_surface_without_redrawing() {
    let (mut scene, log, _) = scene_with(2, false);
    let draws = log.borrow().draws;
    scene.scroll().unwrap();
    assert_eq!(log.borrow().draws, draws);
}

#[test]
fn test_gravity_scale_rescales_acceleration() {
    let (mut scene, _, _) = scene_with(0, false);

    scene.set_gravity_scale(0.25).unwrap();
    assert_relative_eq!(scene.world().gravity().scale, 0.25);
    assert_relative_eq!(scene.config().gravity_scale, 0.25);

    // Direction is untouched
    assert_relative_eq!(scene.world().gravity().y, 1.0);
}

#[test]
fn test_body_size_changes_render_half_only() {
    let (mut scene, _, _) = scene_with(3, false);
    let physics_size = scene
        .world()
        .body(scene.bodies()[0].handle())
        .unwrap()
        .size();

    scene.set_body_size(50.0).unwrap();

    for body in scene.bodies() {
        assert_relative_eq!(body.mesh().scale.x, 50.0);
    }
    // Physics geometry of dynamic bodies is fixed post-creation
    assert_relative_eq!(
        scene
            .world()
            .body(scene.bodies()[0].handle())
            .unwrap()
            .size()
            .x,
        physics_size.x
    );
    assert_relative_eq!(scene.config().body_size, 50.0);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn test_gravity_visibly_moves_every_free_body() {
    let (mut scene, log, _) = scene_with(6, false);

    let initial: Vec<(f32, f32)> = scene
        .bodies()
        .iter()
        .map(|b| {
            let p = scene.world().body(b.handle()).unwrap().render_position();
            (p.x, p.y)
        })
        .collect();

    scene.pump_physics(60.5 / 60.0).unwrap();
    scene.pump_physics(60.5 / 60.0).unwrap();
    scene.update().unwrap();

    for (instance, (_, y0)) in log.borrow().last_frame.iter().zip(initial) {
        assert!(
            instance.position.y < y0,
            "body should have fallen from y={} but is at y={}",
            y0,
            instance.position.y
        );
    }
}

#[test]
fn test_floor_bounds_every_falling_body() {
    let (mut scene, _, _) = scene_with(6, true);
    let config = scene.config().clone();

    // Floor top surface in render space
    let floor_top = -300.0 + config.wall_thickness / 2.0;

    for _ in 0..20 {
        scene.pump_physics(30.5 / 60.0).unwrap();
        scene.update().unwrap();
    }

    for body in scene.bodies() {
        let position = scene.world().body(body.handle()).unwrap().render_position();
        let bottom = position.y - config.body_size / 2.0;
        assert!(
            bottom >= floor_top - 1.0,
            "body bottom {} sank below floor top {}",
            bottom,
            floor_top
        );
    }
}
