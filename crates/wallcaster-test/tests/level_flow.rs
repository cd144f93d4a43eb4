//! Level data alongside a window session.

use approx::assert_relative_eq;
use wallcaster_core::level::{LevelStore, Wall};
use wallcaster_input::KeyCode;
use wallcaster_platform::PlatformEvent;
use wallcaster_test::TestRig;

#[test]
fn level_outlives_window_session() {
    let mut level = LevelStore::new();
    level.reset().unwrap();
    level.add_wall(-4.0, 4.0, 4.0, 4.0).unwrap();
    level.add_wall(-4.0, -4.0, 4.0, -4.0).unwrap();

    let mut rig = TestRig::single_gpu();
    rig.system.open("RayCast", 960, 540).unwrap();
    rig.system.bind_key(0_u32, KeyCode::KeyW).unwrap();

    rig.backend.push_frame(vec![PlatformEvent::KeyDown(KeyCode::KeyW)]);
    rig.system.update();
    assert!(rig.system.is_bind_pressed(0_u32));

    rig.backend.push_frame(vec![PlatformEvent::CloseRequested]);
    rig.system.update();
    assert!(!rig.system.is_open());
    rig.system.close();

    assert_eq!(level.count(), 2);
    assert_eq!(level.wall_at(0).unwrap(), Wall::new(-4.0, 4.0, 4.0, 4.0));
    assert_relative_eq!(level.wall_at(1).unwrap().length(), 8.0);

    level.dispose();
    assert_eq!(level.count(), 0);
    assert_eq!(rig.log.live_resources(), 0);
}
