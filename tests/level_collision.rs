//! Collision resolution and camera tracking through [`Level::update`].

use glam::DVec2;
use mariana::input::Axis;
use mariana::{InputEvent, InputState, Level, TILE_SIZE};
use rstest::rstest;
use test_utils::MapText;

fn steer(level: &mut Level, axes: DVec2) -> InputState {
    let state = InputState {
        horizontal: axes.x,
        vertical: axes.y,
        ..InputState::default()
    };
    level.update(
        1.0,
        &mut vec![
            InputEvent::AxisMoved(Axis::PlayerHoriz),
            InputEvent::AxisMoved(Axis::PlayerVert),
        ],
        &state,
    );
    state
}

fn run(level: &mut Level, state: &InputState, frames: u32, mut check: impl FnMut(&Level)) {
    for _ in 0..frames {
        level.update(1.0, &mut Vec::new(), state);
        check(level);
    }
}

#[test]
fn pillar_blocks_horizontal_movement() {
    let mut level = MapText::bordered(8, 6)
        .wall(4, 2)
        .spawn(2, 2)
        .level()
        .expect("arena builds");
    let state = steer(&mut level, DVec2::new(1.0, 0.0));
    run(&mut level, &state, 60, |current| {
        assert!(current.player().bounding_box().right() <= 4.0 * TILE_SIZE);
    });
    assert!(level.player().on_wall);
}

#[rstest]
#[case::up_right(DVec2::new(1.0, -1.0))]
#[case::up_left(DVec2::new(-1.0, -1.0))]
fn diagonal_into_wall_slides_along_it(#[case] axes: DVec2) {
    let mut level = MapText::bordered(12, 6)
        .spawn(6, 1)
        .level()
        .expect("corridor builds");
    let start_x = level.player().body.position.x;
    let state = steer(&mut level, axes);
    run(&mut level, &state, 30, |current| {
        assert!(current.player().body.position.y >= TILE_SIZE);
    });
    let moved = level.player().body.position.x - start_x;
    assert!(moved * axes.x > 40.0, "player should slide, moved {moved}");
}

#[test]
fn open_ground_clears_on_wall() {
    let mut level = MapText::bordered(8, 6).spawn(2, 2).level().expect("arena builds");
    level.player_mut().on_wall = true;
    level.update(1.0, &mut Vec::new(), &InputState::default());
    assert!(!level.player().on_wall);
}

#[test]
fn camera_keeps_player_inside_dead_zone() {
    let mut level = MapText::new(60, 30).spawn(2, 2).level().expect("field builds");
    assert_eq!(level.camera().offset(), DVec2::ZERO);
    let state = steer(&mut level, DVec2::new(1.0, 1.0));
    run(&mut level, &state, 400, |current| {
        let screen = current.player_screen_rect();
        let zone = current.camera().dead_zone();
        assert!(screen.x <= zone.right() + 1e-9, "x {} escaped", screen.x);
        assert!(screen.y <= zone.bottom() + 1e-9, "y {} escaped", screen.y);
    });
    assert!(level.camera().offset().x > 0.0);
    assert!(level.camera().offset().y > 0.0);
}

#[test]
fn camera_stops_at_map_edge() {
    let mut level = MapText::bordered(30, 15).spawn(2, 2).level().expect("field builds");
    let state = steer(&mut level, DVec2::new(1.0, 0.0));
    run(&mut level, &state, 600, |_| {});
    let max_x = level.map().width_px() - 1280.0;
    assert_eq!(level.camera().offset().x, max_x);
    assert!(level.player_screen_rect().x > level.camera().dead_zone().right());
}

#[test]
fn visible_tiles_follow_camera() {
    let mut level = MapText::new(60, 30).spawn(2, 2).level().expect("field builds");
    let state = steer(&mut level, DVec2::new(1.0, 0.0));
    run(&mut level, &state, 300, |_| {});
    let offset = level.camera().offset();
    let tiles = level.visible_tiles();
    assert!(!tiles.is_empty());
    for tile in &tiles {
        assert!(tile.rect.right() > 0.0 && tile.rect.x < 1280.0);
        assert_eq!(tile.rect.corner(), tile.coord.world_rect().corner() - offset);
    }
}
