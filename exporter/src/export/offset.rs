//! Constraint frame offsets
//!
//! Bullet expects each constraint frame relative to the bodies it links. The
//! offset of object B seen from object A is B's pose in A's local frame with
//! A's scale removed, so A's non-uniform scale does not leak into the frame.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Scale components below this magnitude are treated as zero
pub const SCALE_EPSILON: f32 = 1e-6;

/// Translation, rotation and scale of a world matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposed {
    pub translation: Vec3,
    /// Unit quaternion with `w >= 0`
    pub rotation: Quat,
    pub scale: Vec3,
}

/// Split a matrix into translation, rotation and scale
///
/// Axes scaled to zero carry no direction. Their rotation is rebuilt from the
/// remaining axes, and a fully collapsed matrix has the identity rotation.
pub fn decompose(matrix: &Mat4) -> Decomposed {
    let axes = [
        matrix.x_axis.truncate(),
        matrix.y_axis.truncate(),
        matrix.z_axis.truncate(),
    ];
    if axes.iter().all(|axis| axis.length() >= SCALE_EPSILON) {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        return Decomposed {
            translation,
            rotation: canonical(rotation),
            scale,
        };
    }

    Decomposed {
        translation: matrix.w_axis.truncate(),
        rotation: canonical(collapsed_rotation(axes)),
        scale: Vec3::new(axes[0].length(), axes[1].length(), axes[2].length()),
    }
}

fn collapsed_rotation(axes: [Vec3; 3]) -> Quat {
    let [x, y, z] = axes.map(|axis| (axis.length() >= SCALE_EPSILON).then(|| axis.normalize()));

    let basis = match (x, y, z) {
        (Some(x), Some(y), None) => x
            .cross(y)
            .try_normalize()
            .map(|z| Mat3::from_cols(x, z.cross(x), z)),
        (Some(x), None, Some(z)) => z
            .cross(x)
            .try_normalize()
            .map(|y| Mat3::from_cols(x, y, x.cross(y))),
        (None, Some(y), Some(z)) => y
            .cross(z)
            .try_normalize()
            .map(|x| Mat3::from_cols(x, y, x.cross(y))),
        _ => None,
    };
    if let Some(basis) = basis {
        return Quat::from_mat3(&basis);
    }

    // One usable axis left: shortest arc from its rest direction
    match (x, y, z) {
        (Some(x), _, _) => Quat::from_rotation_arc(Vec3::X, x),
        (_, Some(y), _) => Quat::from_rotation_arc(Vec3::Y, y),
        (_, _, Some(z)) => Quat::from_rotation_arc(Vec3::Z, z),
        _ => Quat::IDENTITY,
    }
}

/// Pose of B in A's local, unscaled frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub translation: Vec3,
    /// Unit quaternion with `w >= 0`
    pub rotation: Quat,
}

/// The reference object's scale has a (near) zero component
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("reference scale {scale} has a zero component")]
pub struct DegenerateScale {
    pub scale: Vec3,
}

/// Compute the offset from `a` (reference) to `b` (constraint owner).
///
/// The relative transform is `R(a)⁻¹ · T(-t(a)) · T(t(b)) · R(b)`; its
/// translation is then divided component-wise by `a`'s scale.
pub fn offset_from_a_to_b(a: &Mat4, b: &Mat4) -> Result<Offset, DegenerateScale> {
    let a = decompose(a);
    let b = decompose(b);

    if a.scale.abs().min_element() < SCALE_EPSILON {
        return Err(DegenerateScale { scale: a.scale });
    }

    let relative = Mat4::from_quat(a.rotation.inverse())
        * Mat4::from_translation(-a.translation)
        * Mat4::from_translation(b.translation)
        * Mat4::from_quat(b.rotation);
    let (_, rotation, translation) = relative.to_scale_rotation_translation();

    Ok(Offset {
        translation: translation / a.scale,
        rotation: canonical(rotation),
    })
}

/// Normalize and pick the hemisphere with a non-negative scalar part
fn canonical(rotation: Quat) -> Quat {
    let rotation = rotation.normalize();
    if rotation.w < 0.0 {
        -rotation
    } else {
        rotation
    }
}
