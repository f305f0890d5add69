use physics::{Body, World};

#[test]
fn body_ids_are_dense_and_assigned_in_insertion_order() {
    let mut world = World::new();
    let ids: Vec<_> = (0..5)
        .map(|i| world.add_body(Body::new(1.0).with_position(physics::Vec3::new(i as f32, 0.0, 0.0))))
        .collect();
    assert_eq!(world.body_count(), 5);
    for (expected_index, id) in ids.iter().enumerate() {
        assert_eq!(world.body(*id).position.x, expected_index as f32);
    }
}

#[test]
fn body_ids_are_never_reused_across_additions() {
    let mut world = World::new();
    let first = world.add_body(Body::new(1.0));
    let second = world.add_body(Body::new(1.0));
    let third = world.add_body(Body::new(1.0));
    assert_ne!(first, second);
    assert_ne!(second, third);
    assert_ne!(first, third);
}
