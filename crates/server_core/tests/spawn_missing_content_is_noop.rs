mod util;

use glam::Vec3;

#[test]
fn unknown_lair_template_touches_no_collaborator() {
    let h = util::harness();
    let out = h.svc.spawn_lair("no_such_lair", util::ASHFALL, Vec3::ZERO, 3);
    assert!(out.is_none());
    assert_eq!(h.objects.calls(), 0, "object service not called");
    assert_eq!(h.sim.add_count(), 0, "simulation not called");
}

#[test]
fn unknown_mobile_template_touches_no_collaborator() {
    let h = util::harness();
    let out = h.svc.spawn_creature("no_such_mobile", util::ASHFALL, Vec3::ZERO);
    assert!(out.is_none());
    assert_eq!(h.objects.calls(), 0);
    assert_eq!(h.sim.add_count(), 0);
}

#[test]
fn materialization_failure_stops_before_configuration() {
    let h = util::harness_with(util::CountingObjects::failing());
    h.svc
        .templates()
        .register_lair("den", "rat", 2, 99)
        .unwrap();
    let out = h.svc.spawn_lair("den", util::ASHFALL, Vec3::ZERO, 2);
    assert!(out.is_none());
    assert_eq!(h.objects.calls(), 1, "materialization was attempted once");
    assert_eq!(h.sim.add_count(), 0, "nothing reaches the simulation");
}
