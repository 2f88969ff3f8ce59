//! Behavioural test: the dash lifecycle driven through [`Level::update`].
//!
//! A dash launches along the held direction, holds its speed, bleeds off
//! through the recovery ramp and can only be repeated after the button has
//! been released.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use approx::assert_relative_eq;
use mariana::input::{Axis, Button};
use mariana::{InputEvent, InputState, Level, MotionState};
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use test_utils::MapText;

const RIGHT: InputState = InputState {
    horizontal: 1.0,
    vertical: 0.0,
    dash: false,
    sprint: false,
};

const IDLE: InputState = InputState {
    horizontal: 0.0,
    vertical: 0.0,
    dash: false,
    sprint: false,
};

/// An open field large enough that no wall is reached during a dash.
#[derive(Debug, Clone)]
struct DashFixture {
    level: Level,
}

impl DashFixture {
    fn bootstrap() -> Self {
        let level = MapText::new(60, 12)
            .spawn(2, 6)
            .level()
            .unwrap_or_else(|e| panic!("open field should build: {e:#}"));
        Self { level }
    }

    fn reset(&mut self) {
        *self = Self::bootstrap();
    }

    fn send(&mut self, events: &[InputEvent], state: InputState) {
        self.level.update(1.0, &mut events.to_vec(), &state);
    }

    fn idle(&mut self, frames: u32, state: InputState) {
        for _ in 0..frames {
            self.send(&[], state);
        }
    }

    fn hold_right(&mut self) {
        self.send(&[InputEvent::AxisMoved(Axis::PlayerHoriz)], RIGHT);
    }

    fn press_dash(&mut self, state: InputState) {
        self.send(&[InputEvent::ButtonDown(Button::Dash)], state);
    }

    fn release_dash(&mut self, state: InputState) {
        self.send(&[InputEvent::ButtonUp(Button::Dash)], state);
    }
}

#[test]
fn dash_lifecycle() {
    run_serial(&rspec::given(
        "a player standing in an open field",
        DashFixture::bootstrap(),
        |scenario: &mut Scenario<DashFixture>| {
            scenario.when("dash is pressed with no direction held", |ctx| {
                ctx.before_each(|state| {
                    state.reset();
                    state.press_dash(IDLE);
                });

                ctx.then("nothing happens and the dash stays armed", |state| {
                    let player = state.level.player();
                    assert!(!player.is_dashing);
                    assert!(player.can_dash);
                    assert_eq!(player.speed(), 0.0);
                });
            });

            scenario.when("dash is pressed while holding right", |ctx| {
                ctx.before_each(|state| {
                    state.reset();
                    state.hold_right();
                    state.press_dash(RIGHT);
                });

                ctx.then("the player moves at dash speed", |state| {
                    let player = state.level.player();
                    assert_eq!(player.motion_state(), MotionState::Dashing);
                    assert_relative_eq!(player.body.velocity.x, 9.0);
                    assert_eq!(player.body.velocity.y, 0.0);
                    assert!(!player.can_dash);
                });

                ctx.then("the hold timer has started", |state| {
                    let player = state.level.player();
                    assert_relative_eq!(player.dash_timer, 19.0);
                });
            });

            scenario.when("the hold runs out and the direction is released", |ctx| {
                ctx.before_each(|state| {
                    state.reset();
                    state.hold_right();
                    state.press_dash(RIGHT);
                    state.send(&[InputEvent::AxisMoved(Axis::PlayerHoriz)], IDLE);
                    state.idle(60, IDLE);
                });

                ctx.then("the dash has ended below the normal cap", |state| {
                    let player = state.level.player();
                    assert!(!player.is_dashing);
                    assert!(player.speed() <= 5.0);
                });
            });

            scenario.when("dash is pressed twice without a release", |ctx| {
                ctx.before_each(|state| {
                    state.reset();
                    state.hold_right();
                    state.press_dash(RIGHT);
                    state.send(&[InputEvent::AxisMoved(Axis::PlayerHoriz)], IDLE);
                    state.idle(60, IDLE);
                    state.hold_right();
                    state.press_dash(RIGHT);
                });

                ctx.then("the second press is ignored", |state| {
                    let player = state.level.player();
                    assert!(!player.is_dashing);
                    assert!(player.speed() <= 5.0);
                });
            });

            scenario.when("the button is released before the second press", |ctx| {
                ctx.before_each(|state| {
                    state.reset();
                    state.hold_right();
                    state.press_dash(RIGHT);
                    state.release_dash(RIGHT);
                    state.idle(60, RIGHT);
                    state.press_dash(RIGHT);
                });

                ctx.then("a new dash starts", |state| {
                    let player = state.level.player();
                    assert!(player.is_dashing);
                    assert_relative_eq!(player.body.velocity.x, 9.0);
                });
            });
        },
    ));
}
