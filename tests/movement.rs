//! Movement properties of the kinematic body and the player controller.

use approx::assert_relative_eq;
use glam::DVec2;
use mariana::input::{acceleration_from_axes, Axis, Button};
use mariana::{GameConfig, InputEvent, InputState, Level, MotionState, PlayerController};
use rstest::{fixture, rstest};
use test_utils::{assert_speed_within, frictionless, player_at, MapText};

#[fixture]
fn player() -> PlayerController {
    player_at(DVec2::ZERO, frictionless())
}

#[rstest]
#[case(DVec2::new(1.0, 0.0))]
#[case(DVec2::new(-1.0, 1.0))]
#[case(DVec2::new(0.3, -0.9))]
#[case(DVec2::new(5.0, 5.0))]
fn normal_speed_never_exceeds_max_velocity(mut player: PlayerController, #[case] accel: DVec2) {
    player.body.acceleration = accel;
    for _ in 0..50 {
        player.update(1.0);
        assert_speed_within(&player, 5.0);
    }
}

#[rstest]
fn sprint_raises_cap_and_acceleration(mut player: PlayerController) {
    player.is_sprinting = true;
    player.body.acceleration = DVec2::new(1.0, 0.0);
    player.update(1.0);
    assert_relative_eq!(player.body.velocity.x, 2.0);
    for _ in 0..20 {
        player.update(1.0);
        assert_speed_within(&player, 7.0);
    }
    assert_eq!(player.motion_state(), MotionState::Sprinting);
    assert_relative_eq!(player.speed(), 7.0);
}

#[rstest]
fn dash_cap_applies_while_dashing(mut player: PlayerController) {
    player.body.acceleration = DVec2::new(0.0, -1.0);
    player.dash();
    for _ in 0..40 {
        player.update(1.0);
        assert_speed_within(&player, 9.0);
    }
}

#[rstest]
#[case(DVec2::new(1.0, 0.0))]
#[case(DVec2::new(1.0, 1.0))]
#[case(DVec2::new(-1.0, 1.0))]
#[case(DVec2::new(0.0, -1.0))]
fn full_input_gives_full_acceleration(#[case] axes: DVec2) {
    assert_relative_eq!(acceleration_from_axes(axes, 1.0).length(), 1.0, epsilon = 1e-12);
}

#[rstest]
#[case(DVec2::new(3.0, 0.5))]
#[case(DVec2::new(-2.0, -2.0))]
fn clamped_acceleration_stays_in_range(mut player: PlayerController, #[case] accel: DVec2) {
    player.body.acceleration = accel;
    player.body.clamp_acceleration();
    assert!(player.body.acceleration.x.abs() <= 1.0);
    assert!(player.body.acceleration.y.abs() <= 1.0);
}

#[rstest]
fn coasting_comes_to_rest_without_reversing() {
    let mut player = player_at(DVec2::ZERO, mariana::MovementProfile::default());
    player.body.velocity = DVec2::new(4.0, -3.0);
    for _ in 0..60 {
        player.update(1.0);
        assert!(player.body.velocity.x >= 0.0);
        assert!(player.body.velocity.y <= 0.0);
    }
    assert_eq!(player.body.velocity, DVec2::ZERO);
}

#[test]
fn level_converges_to_max_velocity() {
    let mut config = GameConfig::default();
    config.player.movement = frictionless();
    let map = MapText::new(40, 10).spawn(2, 5).build(&[]).expect("open map builds");
    let mut level = Level::new(map, &config);
    let right = InputState {
        horizontal: 1.0,
        ..InputState::default()
    };

    level.update(1.0, &mut vec![InputEvent::AxisMoved(Axis::PlayerHoriz)], &right);
    for _ in 1..10 {
        level.update(1.0, &mut Vec::new(), &right);
        assert_speed_within(level.player(), 5.0);
    }
    assert_relative_eq!(level.player().body.velocity.x, 5.0);
    assert_eq!(level.player().body.velocity.y, 0.0);
}

#[test]
fn sprint_release_in_same_frame_does_not_block_dash() {
    let mut level = MapText::new(40, 10).spawn(2, 5).level().expect("open map builds");
    let right = InputState {
        horizontal: 1.0,
        sprint: true,
        ..InputState::default()
    };
    level.update(
        1.0,
        &mut vec![
            InputEvent::AxisMoved(Axis::PlayerHoriz),
            InputEvent::ButtonDown(Button::Sprint),
        ],
        &right,
    );
    assert!(level.player().is_sprinting);

    level.update(
        1.0,
        &mut vec![
            InputEvent::ButtonUp(Button::Sprint),
            InputEvent::ButtonDown(Button::Dash),
        ],
        &InputState { sprint: false, ..right },
    );
    assert!(level.player().is_dashing);
    assert!(!level.player().is_sprinting);
}
