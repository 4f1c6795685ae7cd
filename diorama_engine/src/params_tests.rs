/// Tests for RenderParameters
///
/// Derivation must copy, never alias: mutating a derived set leaves the base
/// and every sibling untouched.

use super::*;

fn base() -> RenderParameters {
    RenderParameters::base(Mat4::from_translation(Vec3::Z * -5.0), Mat4::IDENTITY)
}

// ============================================================================
// BASE
// ============================================================================

#[test]
fn test_base_contents() {
    let params = base();
    assert_eq!(params.len(), 4);
    assert_eq!(params.scale(), Some(Vec3::ONE));
    assert_eq!(params.position(), Some(Vec3::ZERO));
    assert!(params.contains(ParamKey::ViewMatrix));
    assert!(params.contains(ParamKey::ProjectionMatrix));
    assert!(params.color().is_none());
}

// ============================================================================
// DERIVE
// ============================================================================

#[test]
fn test_derive_overrides_and_keeps_rest() {
    let base = base();
    let derived = base.derive(&[
        (ParamKey::Color, ParamValue::Vec3(Vec3::ZERO)),
        (ParamKey::Scale, ParamValue::Vec3(Vec3::new(0.99, 0.99, 1.0))),
    ]);

    assert_eq!(derived.color(), Some(Vec4::new(0.0, 0.0, 0.0, 1.0)));
    assert_eq!(derived.scale(), Some(Vec3::new(0.99, 0.99, 1.0)));
    assert_eq!(derived.get(ParamKey::ViewMatrix), base.get(ParamKey::ViewMatrix));
    assert_eq!(derived.position(), Some(Vec3::ZERO));
}

#[test]
fn test_derive_does_not_mutate_base() {
    let base = base();
    let _ = base.derive(&[(ParamKey::Position, ParamValue::Vec3(Vec3::ONE))]);
    assert_eq!(base.position(), Some(Vec3::ZERO));
}

#[test]
fn test_siblings_do_not_alias() {
    let base = base();
    let mut a = base.derive(&[]);
    let b = base.derive(&[]);

    a.set_position(Vec3::new(0.0, -1.0, 0.5));

    assert_eq!(a.position(), Some(Vec3::new(0.0, -1.0, 0.5)));
    assert_eq!(b.position(), Some(Vec3::ZERO));
    assert_eq!(base.position(), Some(Vec3::ZERO));
}

#[test]
fn test_chained_derivation() {
    // scene -> outline -> wolf outline
    let scene = base().derive(&[(ParamKey::Color, ParamValue::Vec3(Vec3::ONE))]);
    let outline = scene.derive(&[
        (ParamKey::LineWidth, ParamValue::Scalar(0.02)),
        (ParamKey::Color, ParamValue::Vec3(Vec3::ZERO)),
    ]);
    let wolf_outline = outline.derive(&[(ParamKey::Position, ParamValue::Vec3(Vec3::new(0.0, -0.63, 0.0)))]);

    assert_eq!(wolf_outline.line_width(), Some(0.02));
    assert_eq!(wolf_outline.color(), Some(Vec4::new(0.0, 0.0, 0.0, 1.0)));
    assert_eq!(scene.line_width(), None);
    assert_eq!(outline.position(), Some(Vec3::ZERO));
}

#[test]
fn test_malformed_override_is_ignored() {
    let base = base();
    let derived = base.derive(&[
        (ParamKey::Position, ParamValue::Scalar(3.0)),
        (ParamKey::LineWidth, ParamValue::Vec3(Vec3::ONE)),
    ]);
    assert_eq!(derived, base);
}

#[test]
fn test_set_reports_type_mismatch() {
    let mut params = RenderParameters::new();
    assert!(!params.set(ParamKey::ViewMatrix, ParamValue::Vec4(Vec4::ONE)));
    assert!(params.is_empty());
    assert!(params.set(ParamKey::Color, ParamValue::Vec4(Vec4::new(1.0, 0.0, 0.0, 0.5))));
    assert_eq!(params.color(), Some(Vec4::new(1.0, 0.0, 0.0, 0.5)));
}

// ============================================================================
// UNIFORM BLOCK
// ============================================================================

#[test]
fn test_uniform_block_layout() {
    assert_eq!(std::mem::size_of::<UniformBlock>(), 192);
}

#[test]
fn test_uniform_block_contents() {
    let params = base().derive(&[
        (ParamKey::Position, ParamValue::Vec3(Vec3::new(0.0, 0.0, -2.0))),
        (ParamKey::Color, ParamValue::Vec3(Vec3::ZERO)),
        (ParamKey::LineWidth, ParamValue::Scalar(0.02)),
    ]);
    let block = params.to_uniform_block();

    assert_eq!(block.position, [0.0, 0.0, -2.0, 1.0]);
    assert_eq!(block.color, [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(block.line_width, 0.02);
    assert_eq!(block.view[3][2], -5.0);
    assert_eq!(bytemuck::bytes_of(&block).len(), 192);
}

#[test]
fn test_uniform_block_defaults_for_empty_set() {
    let block = RenderParameters::new().to_uniform_block();
    assert_eq!(block.view, Mat4::IDENTITY.to_cols_array_2d());
    assert_eq!(block.scale, [1.0, 1.0, 1.0, 0.0]);
    assert_eq!(block.color, [1.0, 1.0, 1.0, 1.0]);
}
