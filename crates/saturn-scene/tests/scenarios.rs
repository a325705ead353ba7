use glam::{Mat4, Vec3};
use saturn_mesh::Mesh;
use saturn_render::{DrawList, FlatUniforms, MeshHandle, MeshUploader, ShaderUniforms};
use saturn_scene::{ControlInput, SceneSettings, Simulation, SystemCatalog};

/// Records every draw with the uniforms that were bound when it was issued.
#[derive(Default)]
struct RecordingTarget {
    current: FlatUniforms,
    draws: Vec<(MeshHandle, FlatUniforms)>,
}

impl ShaderUniforms for RecordingTarget {
    fn set_matrix4(&mut self, name: &str, value: Mat4) {
        self.current.set_matrix4(name, value);
    }

    fn set_vector3(&mut self, name: &str, value: Vec3) {
        self.current.set_vector3(name, value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.current.set_float(name, value);
    }
}

impl DrawList for RecordingTarget {
    fn draw(&mut self, mesh: MeshHandle) {
        self.draws.push((mesh, self.current));
    }
}

#[derive(Default)]
struct LabelUploader {
    labels: Vec<String>,
}

impl MeshUploader for LabelUploader {
    fn upload(&mut self, label: &str, _mesh: &Mesh) -> MeshHandle {
        self.labels.push(label.to_string());
        MeshHandle::new(self.labels.len() as u32 - 1)
    }
}

fn saturn() -> (Simulation, LabelUploader) {
    let mut uploader = LabelUploader::default();
    let sim = Simulation::build(
        &mut uploader,
        &SystemCatalog::saturn(),
        SceneSettings::default(),
    )
    .expect("default catalog builds");
    (sim, uploader)
}

fn render(sim: &Simulation) -> RecordingTarget {
    let mut target = RecordingTarget::default();
    sim.render(&mut target, 16.0 / 9.0);
    target
}

fn press(key: u8) -> ControlInput {
    ControlInput {
        time_scale_key: Some(key),
        ..Default::default()
    }
}

#[test]
fn time_scale_zero_freezes_all_bodies() {
    let (mut sim, _) = saturn();
    sim.update(0.37, &ControlInput::default());
    sim.update(0.0, &press(0));

    let planet = sim.state().planet_rotation;
    let moons: Vec<(f32, f32)> = sim
        .moons()
        .iter()
        .map(|m| (m.orbital_angle(), m.spin_angle()))
        .collect();
    let rings: Vec<f32> = sim.rings().iter().map(|r| r.rotation_angle()).collect();

    for _ in 0..500 {
        sim.update(0.1, &ControlInput::default());
    }

    assert_eq!(sim.state().planet_rotation, planet);
    for (moon, (orbit, spin)) in sim.moons().iter().zip(&moons) {
        assert_eq!(moon.orbital_angle(), *orbit, "{} moved", moon.name);
        assert_eq!(moon.spin_angle(), *spin, "{} spun", moon.name);
    }
    for (ring, angle) in sim.rings().iter().zip(&rings) {
        assert_eq!(ring.rotation_angle(), *angle, "ring {} spun", ring.name);
    }
}

#[test]
fn camera_still_moves_while_paused() {
    let (mut sim, _) = saturn();
    sim.update(0.0, &press(0));
    sim.update(
        0.1,
        &ControlInput {
            yaw_right: true,
            ..Default::default()
        },
    );
    assert!((sim.state().yaw - 10.0).abs() < 1e-3);
    assert_eq!(sim.state().planet_rotation, 0.0);
}

#[test]
fn render_is_idempotent_without_update() {
    let (mut sim, _) = saturn();
    for _ in 0..13 {
        sim.update(
            0.21,
            &ControlInput {
                pitch_down: true,
                yaw_left: true,
                ..Default::default()
            },
        );
    }

    let first = render(&sim);
    let second = render(&sim);
    assert_eq!(first.draws, second.draws);
}

#[test]
fn draws_planet_then_rings_then_moons() {
    let (sim, uploader) = saturn();
    let target = render(&sim);

    let order: Vec<&str> = target
        .draws
        .iter()
        .map(|(mesh, _)| uploader.labels[mesh.index() as usize].as_str())
        .collect();

    assert_eq!(order[0], "planet");
    assert!(order[1..6].iter().all(|l| l.starts_with("ring-")));
    assert!(order[6..].iter().all(|l| l.starts_with("moon-")));
    assert_eq!(order.len(), 16);
}

#[test]
fn shared_uniforms_are_set_for_every_draw() {
    let (sim, _) = saturn();
    let target = render(&sim);

    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -30.0)).to_cols_array_2d();
    let projection = sim.settings().projection.matrix(16.0 / 9.0).to_cols_array_2d();
    for (_, uniforms) in &target.draws {
        assert_eq!(uniforms.view, view);
        assert_eq!(uniforms.projection, projection);
        assert_eq!(uniforms.brightness, 1.0);
    }
}

#[test]
fn each_body_gets_its_own_color() {
    let (sim, _) = saturn();
    let target = render(&sim);

    assert_eq!(target.draws[0].1.object_color, [1.0, 0.9, 0.6]);
    assert_eq!(target.draws[1].1.object_color, [0.6, 0.6, 0.55]);
    assert_eq!(target.draws[6].1.object_color, [0.8, 0.8, 1.0]);
}

#[test]
fn planet_model_follows_user_rotation_and_spin() {
    let (mut sim, _) = saturn();
    sim.update(
        0.25,
        &ControlInput {
            pitch_down: true,
            ..Default::default()
        },
    );
    let target = render(&sim);

    let state = sim.state();
    let expected = state.user_rotation() * Mat4::from_rotation_y(state.planet_rotation.to_radians());
    let actual = Mat4::from_cols_array_2d(&target.draws[0].1.model);
    assert!(actual.abs_diff_eq(expected, 1e-6));
}

#[test]
fn angles_stay_wrapped_over_long_runs() {
    let (mut sim, _) = saturn();
    sim.update(0.0, &press(9));
    for frame in 0..20_000 {
        let input = ControlInput {
            pitch_up: frame % 3 == 0,
            yaw_right: frame % 5 == 0,
            ..Default::default()
        };
        sim.update(0.25, &input);
    }

    let in_range = |a: f32| (0.0..360.0).contains(&a);
    let state = sim.state();
    assert!(in_range(state.planet_rotation));
    assert!(in_range(state.pitch));
    assert!(in_range(state.yaw));
    assert!(sim.moons().iter().all(|m| in_range(m.orbital_angle()) && in_range(m.spin_angle())));
    assert!(sim.rings().iter().all(|r| in_range(r.rotation_angle())));
}

#[test]
fn titan_returns_after_one_period_at_nominal_speed() {
    let (mut sim, _) = saturn();
    let titan = |sim: &Simulation| sim.moons()[0].orbital_angle();

    sim.update(1.0, &ControlInput::default());
    assert!((titan(&sim) - 2.256).abs() < 2e-3);

    for _ in 1..159 {
        sim.update(1.0, &ControlInput::default());
    }
    sim.update(0.5, &ControlInput::default());

    let angle = titan(&sim);
    assert!(angle.min(360.0 - angle) < 0.01, "Titan at {angle} after one period");
}
