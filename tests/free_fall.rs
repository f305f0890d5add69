use physics::{Body, Vec3, World};

#[test]
fn box_in_free_fall_matches_analytic_solution() {
    let mut world = World::new();
    let id = world.add_body(Body::new(1.0).with_position(Vec3::new(0.0, 10.0, 0.0)));

    let dt = 0.001_f32;
    let steps = 500_usize;
    for _ in 0..steps {
        world.step(dt);
    }

    let t = dt * steps as f32;
    let expected = 10.0 - 0.5 * 9.81 * t * t;
    let diff = (world.body(id).position.y - expected).abs();
    assert!(diff < 1e-3, "diff={diff}");
}

#[test]
fn zero_gravity_body_with_no_contacts_stays_at_rest() {
    let mut world = World::new();
    world.set_gravity(Vec3::ZERO);
    let id = world.add_body(Body::new(1.0).with_position(Vec3::new(1.0, 2.0, 3.0)));

    for _ in 0..50 {
        world.step(1.0 / 60.0);
    }

    assert_eq!(world.body(id).position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(world.body(id).velocity, Vec3::ZERO);
}
