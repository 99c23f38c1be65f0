mod common;

use common::*;
use lustre::assets::{FixedUniform, Geometry, Mesh, Shader, ShaderCombination};
use lustre::rendering::{BufferId, MAIN_PASS, ProgramId};
use lustre::utils::crc32_str;
use nalgebra::{Matrix4, Vector3};
use smallvec::SmallVec;

#[test]
fn uniform_sets_bind_program_once_while_it_stays_active() {
    let (mut renderer, ops) = recording_renderer();
    let a = ready_shader("a", 7);
    let b = ready_shader("b", 9);

    renderer.set_uniform(&a, "u_time", crc32_str("u_time"), 1.0f32);
    renderer.set_uniform(&a, "u_color", crc32_str("u_color"), Vector3::new(1.0, 0.0, 0.0));
    renderer.set_uniform(&a, "u_time", crc32_str("u_time"), 2.0f32);
    assert_eq!(program_binds(&ops), 1);

    renderer.set_uniform(&b, "u_time", crc32_str("u_time"), 3.0f32);
    assert_eq!(program_binds(&ops), 2);

    // switching back is a real program change again
    renderer.set_uniform(&a, "u_time", crc32_str("u_time"), 4.0f32);
    assert_eq!(program_binds(&ops), 3);

    // every upload still happened
    assert_eq!(count(&ops, |op| matches!(op, GpuOp::UniformFloat(3, _))), 4);
}

#[test]
fn missing_uniform_is_a_silent_noop() {
    let (mut renderer, ops) = recording_renderer();
    let shader = ready_shader("a", 7);

    renderer.set_uniform(&shader, "u_absent", crc32_str("u_absent"), 1i32);

    assert!(ops.borrow().is_empty());
}

#[test]
fn fixed_uniforms_reuse_the_bound_program() {
    let (mut renderer, ops) = recording_renderer();
    let shader = ready_shader("a", 7);

    renderer.set_fixed_uniform(&shader, FixedUniform::ViewMatrix, Matrix4::identity());
    renderer.set_fixed_uniform(&shader, FixedUniform::WorldMatrix, Matrix4::identity());

    assert_eq!(program_binds(&ops), 1);
    assert_eq!(count(&ops, |op| matches!(op, GpuOp::UniformMatrix(_))), 2);
}

#[test]
fn apply_shader_rebinds_even_when_already_bound() {
    let (mut renderer, ops) = recording_renderer();
    let mut shader = ready_shader("a", 7);

    renderer.apply_shader(&mut shader, 0);
    renderer.apply_shader(&mut shader, 0);

    // combination switches force the bind, and view + projection are
    // re-uploaded each time
    assert_eq!(program_binds(&ops), 2);
    assert_eq!(count(&ops, |op| matches!(op, GpuOp::UniformMatrix(0))), 2);
    assert_eq!(count(&ops, |op| matches!(op, GpuOp::UniformMatrix(1))), 2);
}

#[test]
fn apply_shader_without_matching_combination_is_skipped() {
    let (mut renderer, ops) = recording_renderer();
    let mut shader = ready_shader("a", 7);

    renderer.set_pass(crc32_str("SHADOW"));
    renderer.apply_shader(&mut shader, 0);

    assert_eq!(program_binds(&ops), 0);
}

#[test]
fn consecutive_binds_of_the_same_mesh_collapse() {
    let (mut renderer, ops) = recording_renderer();
    let material = ready_material(&renderer, "m", 7);
    let geometry = Geometry::new(BufferId(1), BufferId(2));
    let first = Mesh::new(material, 0, 3, test_layout());
    let second = Mesh::new(material, 3, 3, test_layout());

    renderer.bind_geometry(&geometry, &first);
    renderer.bind_geometry(&geometry, &first);
    renderer.bind_geometry(&geometry, &second);
    renderer.bind_geometry(&geometry, &first);

    // three distinct consecutive mesh identities
    assert_eq!(buffer_binds(&ops), 3);
    // each bind enables the layout's two attributes
    assert_eq!(count(&ops, |op| matches!(op, GpuOp::EnableAttribute(_))), 6);
    // the open layout is ended before each switch
    assert_eq!(count(&ops, |op| matches!(op, GpuOp::DisableAttribute(_))), 4);
    assert_eq!(renderer.bind_state().bound_mesh(), Some(first.id()));
}

#[test]
fn layout_ends_before_the_next_buffers_bind() {
    let (mut renderer, ops) = recording_renderer();
    let material = ready_material(&renderer, "m", 7);
    let geometry = Geometry::new(BufferId(1), BufferId(2));
    let first = Mesh::new(material, 0, 3, test_layout());
    let second = Mesh::new(material, 3, 3, test_layout());

    renderer.bind_geometry(&geometry, &first);
    clear(&ops);
    renderer.bind_geometry(&geometry, &second);

    let ops = ops.borrow();
    let disable = ops
        .iter()
        .position(|op| matches!(op, GpuOp::DisableAttribute(_)));
    let bind = ops.iter().position(|op| matches!(op, GpuOp::BindBuffers(_, _)));
    assert!(disable.is_some() && bind.is_some());
    assert!(disable < bind, "previous layout must end first: {ops:?}");
}

#[test]
fn cleanup_is_idempotent() {
    let (mut renderer, ops) = recording_renderer();
    let material = ready_material(&renderer, "m", 7);
    let geometry = Geometry::new(BufferId(1), BufferId(2));
    let mesh = Mesh::new(material, 0, 3, test_layout());
    renderer.bind_geometry(&geometry, &mesh);

    renderer.cleanup();
    assert_eq!(renderer.bind_state().bound_mesh(), None);
    assert_eq!(renderer.bind_state().bound_geometry(), None);
    assert_eq!(renderer.bind_state().bound_program(), None);

    clear(&ops);
    renderer.cleanup();

    // no stale layout to end the second time; the unbinds repeat verbatim
    assert_eq!(
        *ops.borrow(),
        vec![GpuOp::UnbindBuffers, GpuOp::UnbindProgram, GpuOp::UnbindTextures]
    );
    assert_eq!(renderer.bind_state().bound_mesh(), None);
    assert_eq!(renderer.bind_state().bound_geometry(), None);
    assert_eq!(renderer.bind_state().bound_program(), None);
}

#[test]
fn render_geometry_is_pure_submission() {
    let (mut renderer, ops) = recording_renderer();

    renderer.render_geometry(12, 36);

    assert_eq!(*ops.borrow(), vec![GpuOp::Draw(12, 36)]);
}

#[test]
fn instanced_draws_reset_every_declared_divisor() {
    let (mut renderer, ops) = recording_renderer();
    let mut shader = Shader::new("instanced");
    shader.add_combination(
        ShaderCombination::builder()
            .pass(MAIN_PASS)
            .mask(0)
            .program(ProgramId(5))
            .fixed_locations([0, 1, 2])
            .attribute_locations(SmallVec::from_slice(&[0, 1, -1, 3]))
            .build(),
    );
    shader.set_current_combination(0, MAIN_PASS);

    renderer.render_instanced_geometry(0, 6, 10, &shader);

    assert_eq!(
        *ops.borrow(),
        vec![
            GpuOp::SetDivisor(0, 0),
            GpuOp::SetDivisor(1, 0),
            GpuOp::SetDivisor(3, 0),
            GpuOp::DrawInstanced(0, 6, 10),
        ]
    );
}
