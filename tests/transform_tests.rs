//! Transform and TransformSystem tests
//!
//! Tests for:
//! - Transform TRS operations and dirty checking
//! - Delta edits (translate, rotate, rotate_euler, scale_by)
//! - Matrix decomposition round trips
//! - Node composition with pivots and rebasing matrices
//! - Iterative hierarchy propagation

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::{Mat4, Quat, Vec3};
use slotmap::SlotMap;

use tessera::scene::NodeHandle;
use tessera::scene::node::Node;
use tessera::scene::transform::Transform;
use tessera::scene::transform_system::update_hierarchy;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

fn mat4_approx(a: &Mat4, b: &Mat4) -> bool {
    a.abs_diff_eq(*b, 1e-4)
}

/// Same rotation, either sign.
fn quat_approx(a: Quat, b: Quat) -> bool {
    a.abs_diff_eq(b, 1e-4) || a.abs_diff_eq(-b, 1e-4)
}

// ============================================================================
// Transform Unit Tests
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let mut t = Transform::new();
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::ONE);
    t.update_local_matrix();
    assert_eq!(*t.local_matrix(), Mat4::IDENTITY);
}

#[test]
fn transform_update_local_matrix_dirty_check() {
    let mut t = Transform::new();

    // First call always rebuilds
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.position = Vec3::new(1.0, 2.0, 3.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.rotation = Quat::from_rotation_y(FRAC_PI_2);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.scale = Vec3::splat(2.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());
}

#[test]
fn local_matrix_applies_scale_then_rotation_then_translation() {
    let mut t = Transform::from_trs(
        Vec3::new(10.0, 0.0, 0.0),
        Quat::from_rotation_z(FRAC_PI_2),
        Vec3::new(2.0, 1.0, 1.0),
    );
    t.update_local_matrix();

    // X is scaled to 2, turned onto +Y, then moved by +10 X.
    let p = t.local_matrix().transform_point3(Vec3::X);
    assert!(vec3_approx(p, Vec3::new(10.0, 2.0, 0.0)));
}

#[test]
fn decompose_recompose_round_trip() {
    let position = Vec3::new(5.0, -3.0, 7.0);
    let rotation = Quat::from_euler(glam::EulerRot::XYZ, 0.3, -1.1, 2.0);
    let scale = Vec3::new(2.0, 3.0, 1.5);
    let original = Mat4::from_scale_rotation_translation(scale, rotation, position);

    let mut t = Transform::from_matrix(original);
    assert!(t.position.abs_diff_eq(position, 1e-4));
    assert!(t.scale.abs_diff_eq(scale, 1e-4));
    assert!(quat_approx(t.rotation, rotation));

    t.update_local_matrix();
    assert!(mat4_approx(t.local_matrix(), &original));
    assert!(mat4_approx(&Transform::from_matrix(*t.local_matrix()).compose(), &original));
}

#[test]
fn apply_local_matrix_marks_dirty() {
    let mut t = Transform::new();
    t.update_local_matrix();
    t.apply_local_matrix(Mat4::from_translation(Vec3::Y));
    assert!(t.update_local_matrix());
    assert!(vec3_approx(t.position, Vec3::Y));
}

#[test]
fn transform_euler_roundtrip() {
    let mut t = Transform::new();
    let (x, y, z) = (0.3, 0.7, 1.2);
    t.set_rotation_euler(x, y, z);

    let euler = t.rotation_euler();
    assert!(approx_eq(euler.x, x));
    assert!(approx_eq(euler.y, y));
    assert!(approx_eq(euler.z, z));
}

#[test]
fn set_rotation_euler_matches_rotate_euler_from_identity() {
    let (x, y, z) = (0.4, -0.9, 1.3);
    let mut set = Transform::new();
    set.set_rotation_euler(x, y, z);
    let mut delta = Transform::new();
    delta.rotate_euler(x, y, z);
    assert!(quat_approx(set.rotation, delta.rotation));

    let euler = delta.rotation_euler();
    assert!(vec3_approx(euler, Vec3::new(x, y, z)));
}

#[test]
fn unnormalized_rotation_composes_as_its_direction() {
    let unit = Quat::from_rotation_z(FRAC_PI_4);
    let scaled = Transform::from_trs(Vec3::ZERO, unit * 0.5, Vec3::ONE);
    let reference = Transform::from_trs(Vec3::ZERO, unit, Vec3::ONE);
    assert!(mat4_approx(&scaled.compose(), &reference.compose()));

    let zero = Transform::from_trs(Vec3::X, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0), Vec3::ONE);
    assert!(mat4_approx(&zero.compose(), &Mat4::from_translation(Vec3::X)));
}

// ============================================================================
// Delta edits
// ============================================================================

#[test]
fn translate_accumulates() {
    let mut t = Transform::new();
    t.translate(Vec3::X);
    t.translate(Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(t.position, Vec3::new(1.0, 2.0, 0.0));
}

#[test]
fn rotate_keeps_position_and_normalizes() {
    let mut t = Transform::from_trs(Vec3::new(3.0, 0.0, 0.0), Quat::IDENTITY, Vec3::ONE);
    for _ in 0..4 {
        t.rotate(Quat::from_rotation_y(FRAC_PI_4));
    }
    assert_eq!(t.position, Vec3::new(3.0, 0.0, 0.0));
    assert!(approx_eq(t.rotation.length(), 1.0));
    assert!(quat_approx(t.rotation, Quat::from_rotation_y(FRAC_PI_2 * 2.0)));
}

#[test]
fn rotate_is_applied_on_top_of_current_rotation() {
    let mut t = Transform::new();
    t.rotate(Quat::from_rotation_x(FRAC_PI_2));
    t.rotate(Quat::from_rotation_z(FRAC_PI_2));
    let expected = Quat::from_rotation_z(FRAC_PI_2) * Quat::from_rotation_x(FRAC_PI_2);
    assert!(quat_approx(t.rotation, expected));
}

#[test]
fn rotate_euler_applies_x_then_y_then_z() {
    let mut t = Transform::new();
    t.rotate_euler(FRAC_PI_2, FRAC_PI_2, 0.0);
    let expected = Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(FRAC_PI_2);
    assert!(quat_approx(t.rotation, expected));

    // +Z goes to -Y under X, then stays under Y.
    let v = t.rotation * Vec3::Z;
    assert!(vec3_approx(v, -Vec3::Y));
}

#[test]
fn scale_by_moves_offset_with_scale() {
    let mut t = Transform::from_trs(Vec3::new(1.0, -2.0, 0.5), Quat::IDENTITY, Vec3::ONE);
    t.scale_by(Vec3::new(2.0, 3.0, 4.0));
    assert_eq!(t.scale, Vec3::new(2.0, 3.0, 4.0));
    assert_eq!(t.position, Vec3::new(2.0, -6.0, 2.0));
}

#[test]
fn absolute_setters_overwrite() {
    let mut t = Transform::new();
    t.update_local_matrix();
    t.set_position(Vec3::ONE);
    t.set_rotation(Quat::from_rotation_x(1.0));
    t.set_scale(Vec3::splat(0.5));
    assert!(t.is_dirty());
    assert!(t.update_local_matrix());
    assert!(!t.is_dirty());
}

// ============================================================================
// Node composition
// ============================================================================

#[test]
fn composed_local_without_pivot_is_local() {
    let mut node = Node::new("n");
    node.transform.position = Vec3::new(1.0, 2.0, 3.0);
    node.transform.update_local_matrix();
    assert!(mat4_approx(&node.composed_local(), node.transform.local_matrix()));
}

// ============================================================================
// Hierarchy propagation
// ============================================================================

fn create_chain(length: usize) -> (SlotMap<NodeHandle, Node>, Vec<NodeHandle>) {
    let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
    let mut handles: Vec<NodeHandle> = Vec::new();
    for i in 0..length {
        let mut node = Node::new(format!("n{i}"));
        node.transform.position = Vec3::new(1.0, 0.0, 0.0);
        handles.push(nodes.insert(node));
    }
    (nodes, handles)
}

#[test]
fn single_node_update_uses_parent_world() {
    let (mut nodes, handles) = create_chain(1);
    let parent = Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0));
    update_hierarchy(&mut nodes, handles[0], parent, true, 4).unwrap();
    let world = nodes[handles[0]].world_matrix();
    assert!(vec3_approx(world.w_axis.truncate(), Vec3::new(1.0, 5.0, 0.0)));
}

#[test]
fn unchanged_node_keeps_world_matrix() {
    let (mut nodes, handles) = create_chain(1);
    update_hierarchy(&mut nodes, handles[0], Mat4::IDENTITY, true, 4).unwrap();
    let before = *nodes[handles[0]].world_matrix();

    // Nothing changed and the parent is reported unchanged.
    update_hierarchy(&mut nodes, handles[0], Mat4::from_translation(Vec3::Y), false, 4).unwrap();
    assert_eq!(*nodes[handles[0]].world_matrix(), before);
}
