//! Animation tests
//!
//! Tests for:
//! - Keyframe sampling at, between and beyond keys
//! - Timeline evaluation into node transforms
//! - Ticker looping
//! - Animator registration and update order
//! - Binding clips with different tick rates to one loop period

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::{Quat, Vec3};

use tessera::TesseraError;
use tessera::animation::{
    AnimationClip, Animator, Binder, InterpolationMode, KeyframeTrack, NodeChannel, Ticker,
    Timeline,
};
use tessera::scene::{NodeHandle, Scene};
use tessera::settings::AnimationSettings;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

/// Same rotation, either sign.
fn quat_approx(a: Quat, b: Quat) -> bool {
    a.abs_diff_eq(b, 1e-4) || a.abs_diff_eq(-b, 1e-4)
}

const A: Vec3 = Vec3::new(1.0, 2.0, 3.0);
const B: Vec3 = Vec3::new(5.0, -2.0, 7.0);

fn position_track() -> KeyframeTrack<Vec3> {
    KeyframeTrack::from_keys([(0.0, A), (10.0, B)]).unwrap()
}

fn scene_with_node(name: &str) -> (Scene, NodeHandle) {
    let mut scene = Scene::new();
    let root = scene.root();
    let node = scene.add_child(root, name).unwrap();
    (scene, node)
}

fn position_of(scene: &Scene, node: NodeHandle) -> Vec3 {
    scene.node(node).unwrap().transform.position
}

// ============================================================================
// Track sampling
// ============================================================================

#[test]
fn sample_at_first_key_returns_first_value() {
    let track = position_track();
    assert_eq!(track.sample(0.0, InterpolationMode::Linear), Some(A));
}

#[test]
fn sample_before_first_key_holds_first_value() {
    let track = KeyframeTrack::from_keys([(5.0, A), (10.0, B)]).unwrap();
    assert_eq!(track.sample(1.0, InterpolationMode::Linear), Some(A));
}

#[test]
fn sample_midpoint_blends() {
    let track = position_track();
    let mid = track.sample(5.0, InterpolationMode::Linear).unwrap();
    assert!(vec3_approx(mid, (A + B) * 0.5));

    let quarter = track.sample(2.5, InterpolationMode::Linear).unwrap();
    assert!(vec3_approx(quarter, A.lerp(B, 0.25)));
}

#[test]
fn sample_past_last_key_holds_last_value() {
    let track = position_track();
    assert_eq!(track.sample(10.0, InterpolationMode::Linear), Some(B));
    assert_eq!(track.sample(250.0, InterpolationMode::Linear), Some(B));
}

#[test]
fn single_key_track_is_constant() {
    let track = KeyframeTrack::from_keys([(3.0, A)]).unwrap();
    for tick in [0.0, 3.0, 9.0] {
        assert_eq!(track.sample(tick, InterpolationMode::Linear), Some(A));
    }
}

#[test]
fn coincident_keys_do_not_divide_by_zero() {
    let track = KeyframeTrack::from_keys([(0.0, A), (4.0, A), (4.0, B), (8.0, B)]).unwrap();
    let v = track.sample(4.0 + 1e-3, InterpolationMode::Linear).unwrap();
    assert!(v.is_finite());
}

#[test]
fn rotation_linear_vs_spherical() {
    let track = KeyframeTrack::from_keys([
        (0.0, Quat::IDENTITY),
        (1.0, Quat::from_rotation_y(FRAC_PI_2)),
    ])
    .unwrap();

    let linear = track.sample(0.5, InterpolationMode::Linear).unwrap();
    let spherical = track.sample(0.5, InterpolationMode::Spherical).unwrap();

    // Componentwise blend is shorter than unit length.
    assert!(linear.length() < 0.99);
    assert!(approx_eq(spherical.length(), 1.0));
    assert!(quat_approx(spherical, Quat::from_rotation_y(FRAC_PI_4)));

    // Both agree on the rotation axis and direction.
    assert!(quat_approx(linear.normalize(), spherical));
}

// ============================================================================
// Timeline
// ============================================================================

#[test]
fn timeline_writes_only_animated_channels() {
    let (mut scene, node) = scene_with_node("Arm");
    scene.node_mut(node).unwrap().transform.scale = Vec3::splat(2.0);

    let timeline = Timeline::with_tracks(
        node,
        position_track(),
        KeyframeTrack::empty(),
        KeyframeTrack::empty(),
    );
    timeline.evaluate(5.0, &mut scene).unwrap();

    let t = &scene.node(node).unwrap().transform;
    assert!(vec3_approx(t.position, (A + B) * 0.5));
    assert_eq!(t.scale, Vec3::splat(2.0));
    assert_eq!(t.rotation, Quat::IDENTITY);
}

#[test]
fn timeline_without_keys_is_a_no_op() {
    let (mut scene, node) = scene_with_node("Idle");
    scene.node_mut(node).unwrap().transform.position = A;

    let timeline = Timeline::new(node);
    assert_eq!(timeline.last_key_tick(), 0.0);
    timeline.evaluate(3.0, &mut scene).unwrap();
    assert_eq!(position_of(&scene, node), A);
}

#[test]
fn timeline_updates_world_matrix_on_next_traversal() {
    let (mut scene, node) = scene_with_node("Mover");
    scene.update_world_matrices().unwrap();

    let timeline = Timeline::with_tracks(
        node,
        position_track(),
        KeyframeTrack::empty(),
        KeyframeTrack::empty(),
    );
    timeline.evaluate(10.0, &mut scene).unwrap();
    scene.update_world_matrices().unwrap();

    let world = scene.node(node).unwrap().world_matrix();
    assert!(vec3_approx(world.w_axis.truncate(), B));
}

#[test]
fn linear_rotation_blend_keeps_world_axes_unit_length() {
    let (mut scene, node) = scene_with_node("Spinner");
    let half_turn = Quat::from_rotation_z(std::f32::consts::PI);
    let rotation = KeyframeTrack::from_keys([(0.0, Quat::IDENTITY), (10.0, half_turn)]).unwrap();
    let timeline = Timeline::with_tracks(
        node,
        KeyframeTrack::empty(),
        rotation,
        KeyframeTrack::empty(),
    )
    .with_rotation_mode(InterpolationMode::Linear);

    timeline.evaluate(5.0, &mut scene).unwrap();
    // The stored blend is left as sampled.
    let stored = scene.node(node).unwrap().transform.rotation;
    assert!(!approx_eq(stored.length(), 1.0));

    scene.update_world_matrices().unwrap();
    let world = *scene.node(node).unwrap().world_matrix();
    for axis in [world.x_axis, world.y_axis, world.z_axis] {
        assert!((axis.truncate().length() - 1.0).abs() < 1e-4);
    }
    assert!((world.determinant() - 1.0).abs() < 1e-4);
    assert!(vec3_approx(
        world.transform_vector3(Vec3::X),
        Quat::from_rotation_z(FRAC_PI_2) * Vec3::X
    ));
}

#[test]
fn timeline_on_stale_node_fails() {
    let timeline = Timeline::new(NodeHandle::default());
    let mut scene = Scene::new();
    assert!(matches!(
        timeline.evaluate(0.0, &mut scene),
        Err(TesseraError::InvalidHandle)
    ));
}

// ============================================================================
// Ticker
// ============================================================================

#[test]
fn ticker_wraps_and_applies() {
    let (mut scene, node) = scene_with_node("Looped");
    let timeline = Timeline::with_tracks(
        node,
        position_track(),
        KeyframeTrack::empty(),
        KeyframeTrack::empty(),
    );
    let mut ticker = Ticker::new(timeline, 1.0, 10.0).unwrap();

    ticker.update(12.0, &mut scene).unwrap();
    assert!(approx_eq(ticker.current_tick(), 2.0));
    assert!(vec3_approx(position_of(&scene, node), A.lerp(B, 0.2)));
}

#[test]
fn ticker_rate_scales_elapsed_time() {
    let (_, node) = scene_with_node("Fast");
    let mut ticker = Ticker::new(Timeline::new(node), 24.0, 48.0).unwrap();
    assert!(approx_eq(ticker.advance(0.5).unwrap(), 12.0));
    assert!(approx_eq(ticker.advance(2.0).unwrap(), 12.0));
}

#[test]
fn ticker_tick_stays_in_loop_range() {
    let (_, node) = scene_with_node("Range");
    let mut ticker = Ticker::new(Timeline::new(node), 3.0, 7.0).unwrap();
    for step in [0.1, 5.0, -2.3, 100.0, -0.0001, 0.33] {
        let tick = ticker.advance(step).unwrap();
        assert!((0.0..7.0).contains(&tick), "tick {tick} out of range");
    }
}

#[test]
fn ticker_seek_wraps() {
    let (_, node) = scene_with_node("Seek");
    let mut ticker = Ticker::new(Timeline::new(node), 1.0, 10.0).unwrap();
    ticker.seek(23.0).unwrap();
    assert!(approx_eq(ticker.current_tick(), 3.0));
    assert!(ticker.seek(f32::NAN).is_err());
}

// ============================================================================
// Animator
// ============================================================================

fn constant_ticker(node: NodeHandle, value: Vec3) -> Ticker {
    let track = KeyframeTrack::from_keys([(0.0, value)]).unwrap();
    let timeline = Timeline::with_tracks(node, track, KeyframeTrack::empty(), KeyframeTrack::empty());
    Ticker::new(timeline, 1.0, 1.0).unwrap()
}

#[test]
fn animator_runs_tickers_in_registration_order() {
    let (mut scene, node) = scene_with_node("Shared");
    let mut animator = Animator::new();
    let first = animator.register(constant_ticker(node, A));
    let second = animator.register(constant_ticker(node, B));
    assert_eq!(animator.len(), 2);

    let keys: Vec<_> = animator.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec![first, second]);

    animator.update(0.1, &mut scene).unwrap();
    assert_eq!(position_of(&scene, node), B);

    assert!(animator.deregister(second).is_some());
    assert!(animator.deregister(second).is_none());
    animator.update(0.1, &mut scene).unwrap();
    assert_eq!(position_of(&scene, node), A);
}

#[test]
fn animator_deregister_node_and_clear() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.add_child(root, "A").unwrap();
    let b = scene.add_child(root, "B").unwrap();

    let mut animator = Animator::new();
    animator.register(constant_ticker(a, A));
    animator.register(constant_ticker(a, B));
    let kept = animator.register(constant_ticker(b, A));

    assert_eq!(animator.deregister_node(a), 2);
    assert_eq!(animator.len(), 1);
    assert!(animator.get(kept).is_some());

    animator.clear();
    assert!(animator.is_empty());
    animator.update(1.0, &mut scene).unwrap();
}

#[test]
fn animator_advances_every_ticker() {
    let (mut scene, node) = scene_with_node("Clock");
    let mut animator = Animator::new();
    let key = animator.register(Ticker::new(Timeline::new(node), 2.0, 100.0).unwrap());

    for _ in 0..3 {
        animator.update(1.5, &mut scene).unwrap();
    }
    assert!(approx_eq(animator.get(key).unwrap().current_tick(), 9.0));
}

// ============================================================================
// Binder
// ============================================================================

fn clip(name: &str, tps: f32, duration: f32, node_name: &str, last_key: f32) -> AnimationClip {
    let mut channel = NodeChannel::new(node_name);
    channel.position = KeyframeTrack::from_keys([(0.0, Vec3::ZERO), (last_key, Vec3::X)]).unwrap();
    AnimationClip::new(name, tps, duration, vec![channel]).unwrap()
}

#[test]
fn clips_share_the_longest_period() {
    let mut scene = Scene::new();
    let root = scene.root();
    scene.add_child(root, "Walker").unwrap();
    scene.add_child(root, "Waver").unwrap();

    // 48 ticks at 24 tps is 2 s; 10 ticks at 10 tps is 1 s.
    let clips = vec![
        clip("Walk", 24.0, 48.0, "Walker", 48.0),
        clip("Wave", 10.0, 10.0, "Waver", 10.0),
    ];
    assert!(approx_eq(Binder::shared_period_seconds(&clips), 2.0));

    let tickers = Binder::bind(&scene, &clips, &AnimationSettings::default()).unwrap();
    assert_eq!(tickers.len(), 2);
    assert!(approx_eq(tickers[0].duration(), 48.0));
    assert!(approx_eq(tickers[0].rate(), 24.0));
    assert!(approx_eq(tickers[1].duration(), 20.0));
    assert!(approx_eq(tickers[1].rate(), 10.0));
    assert_eq!(tickers[1].timeline().node(), scene.find("Waver").unwrap());
}

#[test]
fn shorter_clip_holds_last_key_until_wrap() {
    let (mut scene, node) = scene_with_node("Waver");
    scene.add_child(node, "Walker").unwrap();
    let clips = vec![
        clip("Walk", 24.0, 48.0, "Walker", 48.0),
        clip("Wave", 10.0, 10.0, "Waver", 10.0),
    ];
    let mut tickers = Binder::bind(&scene, &clips, &AnimationSettings::default()).unwrap();

    // 1.5 s in: the 1 s clip is past its last key but has not wrapped.
    tickers[1].update(1.5, &mut scene).unwrap();
    assert_eq!(position_of(&scene, node), Vec3::X);
}

#[test]
fn bind_uses_configured_rotation_mode() {
    let (scene, _) = scene_with_node("Spinner");
    let clips = vec![clip("Spin", 30.0, 30.0, "Spinner", 30.0)];
    let settings = AnimationSettings {
        rotation_interpolation: InterpolationMode::Spherical,
    };
    let tickers = Binder::bind(&scene, &clips, &settings).unwrap();
    assert_eq!(tickers[0].timeline().rotation_mode, InterpolationMode::Spherical);
}

#[test]
fn bind_fails_on_unknown_node() {
    let (scene, _) = scene_with_node("Present");
    let clips = vec![clip("Broken", 24.0, 24.0, "Missing", 24.0)];
    assert!(matches!(
        Binder::bind(&scene, &clips, &AnimationSettings::default()),
        Err(TesseraError::NodeNotFound(name)) if name == "Missing"
    ));
}

#[test]
fn bind_with_no_clips_is_empty() {
    let scene = Scene::new();
    assert_eq!(Binder::shared_period_seconds(&[]), 0.0);
    assert!(Binder::bind(&scene, &[], &AnimationSettings::default()).unwrap().is_empty());
}
