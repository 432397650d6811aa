//! End-to-end playback scenarios against the in-memory host.

use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use glam::Vec2;
use rstest::rstest;
use shoal::easing::{Ease, Transition};
use shoal::{
    ActorEvent, CommonParams, DirectionalParams, Handle, PathDriver, PathError, TweenPhase, TweenSpec,
    UpdateOutcome,
};
use static_assertions::assert_impl_all;
use test_utils::assert_vec2_near;
use test_utils::scene::{centred_group, common, directional, line_path, straight_path, Scene};

assert_impl_all!(PathDriver: Send, Sync);

const DT: f32 = 1.0 / 60.0;

fn sprite_position(scene: &Scene, sprite: Handle) -> Vec2 {
    scene.host.sprite(sprite).expect("sprite exists").position
}

#[test]
fn straight_path_walkthrough() {
    let mut scene = Scene::default();
    let (actor, sprite) = scene.add_directional(|a, s| directional(a, s, straight_path()));

    let start = scene.driver.seek(&mut scene.host, actor, 0.0);
    assert_eq!(start, Ok(UpdateOutcome::Alive));
    let state = scene.host.sprite(sprite).expect("sprite exists");
    assert_eq!(state.position, Vec2::ZERO);
    assert_relative_eq!(state.rotation, 0.0);
    assert!(state.active);

    scene
        .driver
        .seek(&mut scene.host, actor, 1.5)
        .expect("registered");
    assert_vec2_near(sprite_position(&scene, sprite), Vec2::new(1.0, 0.0), 1e-5);

    scene
        .driver
        .seek(&mut scene.host, actor, 2.0)
        .expect("registered");
    assert_vec2_near(sprite_position(&scene, sprite), Vec2::new(2.0, 0.0), 1e-5);
    assert!(scene.host.events().is_empty());

    let end = scene.driver.seek(&mut scene.host, actor, 3.0);
    assert_eq!(end, Ok(UpdateOutcome::Finished));
    assert_eq!(scene.host.events(), &[(actor, ActorEvent::Fadeout)]);
    assert!(scene.driver.contains(actor));

    let rewound = scene.driver.seek(&mut scene.host, actor, 1.0);
    assert_eq!(rewound, Ok(UpdateOutcome::Alive));
    assert_vec2_near(sprite_position(&scene, sprite), Vec2::new(1.0, 0.0), 1e-5);
}

#[test]
fn hidden_actor_fades_in_over_two_seconds_while_moving() {
    let mut scene = Scene::default();
    let (actor, sprite) = scene.add_directional(|a, s| {
        DirectionalParams::new(CommonParams {
            hidden: true,
            ..common(a, s, 1.0, line_path(5))
        })
    });
    assert_eq!(scene.host.sprite(sprite).expect("sprite").opacity, 0.0);

    scene.run(90, DT);
    let halfway = scene.host.sprite(sprite).expect("sprite");
    assert_relative_eq!(halfway.opacity, 0.75, epsilon = 1e-4);
    assert_vec2_near(halfway.position, Vec2::new(1.0, 0.0), 1e-5);

    scene.run(30, DT);
    assert_relative_eq!(
        scene.host.sprite(sprite).expect("sprite").opacity,
        1.0,
        epsilon = 1e-4
    );

    scene.run(2, DT);
    let state = scene.driver.actor(actor).expect("still swimming").state();
    assert!(state.is_activated());
    assert_eq!(scene.host.sprite(sprite).expect("sprite").opacity, 1.0);
}

#[test]
fn delayed_actor_waits_untouched() {
    let mut scene = Scene::default();
    let (actor, sprite) = scene.add_directional(|a, s| {
        DirectionalParams::new(CommonParams {
            delay: 1.0,
            ..common(a, s, 1.0, straight_path())
        })
    });
    scene.run(30, DT);
    let state = scene.host.sprite(sprite).expect("sprite");
    assert!(!state.active);
    assert_eq!(state.position, Vec2::ZERO);
    assert_relative_eq!(
        scene.driver.actor(actor).expect("registered").state().elapsed(),
        0.5,
        epsilon = 1e-5
    );
}

#[test]
fn length_is_points_over_ratio() {
    let mut scene = Scene::default();
    let (actor, _) = scene.add_directional(|a, s| {
        DirectionalParams::new(common(a, s, 2.0, straight_path()))
    });
    assert_relative_eq!(scene.driver.length(actor).expect("registered"), 1.5);
}

#[rstest]
#[case(0.0, 0)]
#[case(1.5, 1)]
#[case(2.5, 2)]
#[case(3.9, 3)]
fn reverse_traversal_mirrors_forward(#[case] elapsed: f32, #[case] index: i16) {
    let mut scene = Scene::default();
    let (ahead, ahead_sprite) = scene.add_directional(|a, s| directional(a, s, line_path(4)));
    let (behind, behind_sprite) = scene.add_directional(|a, s| DirectionalParams {
        forward: false,
        ..directional(a, s, line_path(4))
    });

    scene
        .driver
        .seek(&mut scene.host, ahead, elapsed)
        .expect("registered");
    scene
        .driver
        .seek(&mut scene.host, behind, elapsed)
        .expect("registered");

    let (forward_x, mirrored_x) = (f32::from(index), f32::from(3 - index));
    assert_vec2_near(
        sprite_position(&scene, ahead_sprite),
        Vec2::new(forward_x, 0.0),
        1e-5,
    );
    assert_vec2_near(
        sprite_position(&scene, behind_sprite),
        Vec2::new(mirrored_x, 0.0),
        1e-5,
    );
}

#[test]
fn stale_presentation_only_removes_its_actor() {
    let mut scene = Scene::default();
    let (doomed, doomed_sprite) = scene.add_directional(|a, s| directional(a, s, line_path(6)));
    let (survivor, survivor_sprite) =
        scene.add_directional(|a, s| directional(a, s, line_path(6)));

    let mut control = Scene::default();
    let (_, control_sprite) = control.add_directional(|a, s| directional(a, s, line_path(6)));

    scene.run(40, DT);
    control.run(40, DT);
    scene.host.despawn(doomed_sprite);

    let summary = scene.driver.tick(&mut scene.host, DT);
    control.run(1, DT);
    assert_eq!(summary.detached, vec![doomed]);
    assert_eq!(summary.advanced, 1);
    assert!(!scene.driver.contains(doomed));
    assert!(scene.driver.contains(survivor));
    assert_eq!(
        scene.host.sprite(survivor_sprite),
        control.host.sprite(control_sprite)
    );
}

#[test]
fn tweened_swimmer_never_swims_backwards() {
    let tween = TweenSpec::from_phases(vec![
        TweenPhase::new(0.4, 3.0, Transition::Quad, Ease::Out),
        TweenPhase::new(0.8, 1.0, Transition::Sine, Ease::InOut),
    ]);
    let mut scene = Scene::default();
    let (actor, sprite) = scene.add_directional(|a, s| DirectionalParams {
        tween: Some(tween),
        ..DirectionalParams::new(common(a, s, 10.0, line_path(60)))
    });

    let mut last_x = 0.0;
    while scene.driver.contains(actor) {
        scene.driver.tick(&mut scene.host, DT);
        let x = sprite_position(&scene, sprite).x;
        assert!(x >= last_x, "moved back from {last_x} to {x}");
        last_x = x;
    }
    assert_relative_eq!(last_x, 59.0, epsilon = 1e-4);
}

#[test]
fn uneven_tween_fades_out_once_when_warped_progress_runs_out() {
    let ratio = 5.0;
    let count = 30.0;
    let tween = TweenSpec::from_phases(vec![
        TweenPhase::new(0.1, 3.0, Transition::Linear, Ease::In),
        TweenPhase::new(0.3, 1.0, Transition::Sine, Ease::InOut),
        TweenPhase::new(0.7, 2.0, Transition::Quad, Ease::Out),
    ]);
    let mut scene = Scene::default();
    let (actor, sprite) = scene.add_directional(|a, s| DirectionalParams {
        tween: Some(tween.clone()),
        ..DirectionalParams::new(common(a, s, ratio, line_path(30)))
    });

    let mut last_x = 0.0;
    let mut finished = false;
    for _ in 0..2_000 {
        let before = scene
            .driver
            .actor(actor)
            .expect("still swimming")
            .state()
            .active_time();
        let summary = scene.driver.tick(&mut scene.host, DT);
        let reached = tween.warp(before + DT) * ratio;
        if summary.finished.contains(&actor) {
            assert!(reached >= count, "finished early at {reached}");
            finished = true;
            break;
        }
        assert!(reached < count, "still swimming at {reached}");
        let x = sprite_position(&scene, sprite).x;
        assert!(x >= last_x, "moved back from {last_x} to {x}");
        last_x = x;
    }

    assert!(finished);
    assert_relative_eq!(last_x, 29.0, epsilon = 1e-4);
    assert_eq!(scene.host.events(), &[(actor, ActorEvent::Fadeout)]);
    assert!(scene.driver.is_empty());
}

#[test]
fn centred_group_faces_centre_then_smooths() {
    let centre = Vec2::new(0.0, 5.0);
    let mut scene = Scene::default();
    let (actor, sprite) =
        scene.add_group(|a, s| centred_group(a, s, line_path(4), centre, 2));
    assert_relative_eq!(
        scene.host.sprite(sprite).expect("sprite").rotation,
        FRAC_PI_2
    );

    scene
        .driver
        .seek(&mut scene.host, actor, 1.5)
        .expect("registered");
    let facing = scene.host.sprite(sprite).expect("sprite").rotation;
    assert_relative_eq!(facing, 5.0_f32.atan2(-1.0));

    scene
        .driver
        .seek(&mut scene.host, actor, 2.5)
        .expect("registered");
    let smoothed = scene.host.sprite(sprite).expect("sprite").rotation;
    assert_relative_eq!(smoothed, facing - facing / 8.0, epsilon = 1e-6);
}

#[test]
fn adding_against_missing_objects_fails_cleanly() {
    let mut scene = Scene::default();
    let (actor, sprite) = scene.spawn_pair();
    scene.host.despawn(actor);
    let result = scene
        .driver
        .add_directional(&mut scene.host, directional(actor, sprite, straight_path()));
    assert!(matches!(result, Err(PathError::InvalidArgument(_))));
    assert!(scene.driver.is_empty());
}
