//! Rigid body constraints
//!
//! A constraint lives on its own object and links up to two other objects.
//! The kind-specific limit and spring settings are a tagged union so each
//! kind carries only the parameters it actually uses.

use hecs::Entity;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

/// One of the six degrees of freedom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    LinX,
    LinY,
    LinZ,
    AngX,
    AngY,
    AngZ,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::LinX,
        Axis::LinY,
        Axis::LinZ,
        Axis::AngX,
        Axis::AngY,
        Axis::AngZ,
    ];

    /// Suffix used by limit keys, e.g. `use_limit_lin_x`
    pub fn limit_key(self) -> &'static str {
        match self {
            Axis::LinX => "lin_x",
            Axis::LinY => "lin_y",
            Axis::LinZ => "lin_z",
            Axis::AngX => "ang_x",
            Axis::AngY => "ang_y",
            Axis::AngZ => "ang_z",
        }
    }

    /// Suffix used by spring keys; linear axes are bare, e.g. `use_spring_x`
    pub fn spring_key(self) -> &'static str {
        match self {
            Axis::LinX => "x",
            Axis::LinY => "y",
            Axis::LinZ => "z",
            Axis::AngX => "ang_x",
            Axis::AngY => "ang_y",
            Axis::AngZ => "ang_z",
        }
    }
}

/// Lower/upper limit on one axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AxisLimit {
    pub enabled: bool,
    pub lower: f32,
    pub upper: f32,
}

impl Default for AxisLimit {
    fn default() -> Self {
        Self::linear()
    }
}

impl AxisLimit {
    /// Enabled limit with the given range
    pub fn new(lower: f32, upper: f32) -> Self {
        Self {
            enabled: true,
            lower,
            upper,
        }
    }

    /// Host default for translation axes (metres)
    pub fn linear() -> Self {
        Self {
            enabled: false,
            lower: -1.0,
            upper: 1.0,
        }
    }

    /// Host default for rotation axes (radians)
    pub fn angular() -> Self {
        Self {
            enabled: false,
            lower: -FRAC_PI_4,
            upper: FRAC_PI_4,
        }
    }
}

/// Spring on one axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AxisSpring {
    pub enabled: bool,
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for AxisSpring {
    fn default() -> Self {
        Self {
            enabled: false,
            stiffness: 10.0,
            damping: 0.5,
        }
    }
}

impl AxisSpring {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            enabled: true,
            stiffness,
            damping,
        }
    }
}

/// Limits on all six axes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SixAxisLimits {
    pub lin_x: AxisLimit,
    pub lin_y: AxisLimit,
    pub lin_z: AxisLimit,
    pub ang_x: AxisLimit,
    pub ang_y: AxisLimit,
    pub ang_z: AxisLimit,
}

impl Default for SixAxisLimits {
    fn default() -> Self {
        Self {
            lin_x: AxisLimit::linear(),
            lin_y: AxisLimit::linear(),
            lin_z: AxisLimit::linear(),
            ang_x: AxisLimit::angular(),
            ang_y: AxisLimit::angular(),
            ang_z: AxisLimit::angular(),
        }
    }
}

impl SixAxisLimits {
    /// Limits in lin x/y/z, ang x/y/z order
    pub fn axes(&self) -> [(Axis, AxisLimit); 6] {
        [
            (Axis::LinX, self.lin_x),
            (Axis::LinY, self.lin_y),
            (Axis::LinZ, self.lin_z),
            (Axis::AngX, self.ang_x),
            (Axis::AngY, self.ang_y),
            (Axis::AngZ, self.ang_z),
        ]
    }
}

/// Springs on all six axes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SixAxisSprings {
    pub x: AxisSpring,
    pub y: AxisSpring,
    pub z: AxisSpring,
    pub ang_x: AxisSpring,
    pub ang_y: AxisSpring,
    pub ang_z: AxisSpring,
}

impl SixAxisSprings {
    /// Springs in x/y/z, ang x/y/z order
    pub fn axes(&self) -> [(Axis, AxisSpring); 6] {
        [
            (Axis::LinX, self.x),
            (Axis::LinY, self.y),
            (Axis::LinZ, self.z),
            (Axis::AngX, self.ang_x),
            (Axis::AngY, self.ang_y),
            (Axis::AngZ, self.ang_z),
        ]
    }
}

/// Constraint kind identifiers, written with the host's names
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintType {
    Fixed,
    Point,
    Hinge,
    Slider,
    Piston,
    Generic,
    GenericSpring,
    Motor,
}

/// Kind of a constraint together with the settings only that kind uses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintKind {
    Fixed,
    Point,
    /// Rotation about the local Z axis
    Hinge {
        #[serde(default = "AxisLimit::angular")]
        limit_ang_z: AxisLimit,
    },
    /// Translation along the local X axis
    Slider {
        #[serde(default = "AxisLimit::linear")]
        limit_lin_x: AxisLimit,
    },
    /// Translation along and rotation about the local X axis
    Piston {
        #[serde(default = "AxisLimit::linear")]
        limit_lin_x: AxisLimit,
        #[serde(default = "AxisLimit::angular")]
        limit_ang_x: AxisLimit,
    },
    Generic {
        #[serde(default)]
        limits: SixAxisLimits,
    },
    GenericSpring {
        #[serde(default)]
        limits: SixAxisLimits,
        #[serde(default)]
        springs: SixAxisSprings,
    },
    /// Motors are written with common settings only
    Motor,
}

impl ConstraintKind {
    pub fn constraint_type(&self) -> ConstraintType {
        match self {
            ConstraintKind::Fixed => ConstraintType::Fixed,
            ConstraintKind::Point => ConstraintType::Point,
            ConstraintKind::Hinge { .. } => ConstraintType::Hinge,
            ConstraintKind::Slider { .. } => ConstraintType::Slider,
            ConstraintKind::Piston { .. } => ConstraintType::Piston,
            ConstraintKind::Generic { .. } => ConstraintType::Generic,
            ConstraintKind::GenericSpring { .. } => ConstraintType::GenericSpring,
            ConstraintKind::Motor => ConstraintType::Motor,
        }
    }

    /// Axis limits this kind exports, in output order
    pub fn limits(&self) -> Vec<(Axis, AxisLimit)> {
        match self {
            ConstraintKind::Hinge { limit_ang_z } => vec![(Axis::AngZ, *limit_ang_z)],
            ConstraintKind::Slider { limit_lin_x } => vec![(Axis::LinX, *limit_lin_x)],
            ConstraintKind::Piston {
                limit_lin_x,
                limit_ang_x,
            } => vec![(Axis::LinX, *limit_lin_x), (Axis::AngX, *limit_ang_x)],
            ConstraintKind::Generic { limits } | ConstraintKind::GenericSpring { limits, .. } => {
                limits.axes().to_vec()
            }
            ConstraintKind::Fixed | ConstraintKind::Point | ConstraintKind::Motor => Vec::new(),
        }
    }

    /// Axis springs this kind exports, in output order
    pub fn springs(&self) -> Vec<(Axis, AxisSpring)> {
        match self {
            ConstraintKind::GenericSpring { springs, .. } => springs.axes().to_vec(),
            _ => Vec::new(),
        }
    }
}

/// Settings shared by every constraint kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConstraintSettings {
    pub enabled: bool,
    /// Disable collisions between the two linked bodies
    pub disable_collisions: bool,
    /// Impulse above which the constraint breaks when `use_breaking` is set
    pub breaking_threshold: f32,
    pub use_breaking: bool,
    pub use_override_solver_iterations: bool,
    pub solver_iterations: u32,
}

impl Default for ConstraintSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            disable_collisions: true,
            breaking_threshold: 10.0,
            use_breaking: false,
            use_override_solver_iterations: false,
            solver_iterations: 10,
        }
    }
}

/// Constraint component with live entity links
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBodyConstraint {
    pub object1: Option<Entity>,
    pub object2: Option<Entity>,
    pub settings: ConstraintSettings,
    pub kind: ConstraintKind,
}

impl RigidBodyConstraint {
    /// Unlinked constraint with default settings
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            object1: None,
            object2: None,
            settings: ConstraintSettings::default(),
            kind,
        }
    }

    /// Link the constraint to two objects
    pub fn between(mut self, object1: Entity, object2: Entity) -> Self {
        self.object1 = Some(object1);
        self.object2 = Some(object2);
        self
    }

    pub fn with_settings(mut self, settings: ConstraintSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Serializable form of [`RigidBodyConstraint`]
///
/// `object1`/`object2` are entity indices in the scene file and are remapped
/// to live entities during instantiation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstraintData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object1: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object2: Option<u64>,
    #[serde(flatten)]
    pub settings: ConstraintSettings,
    #[serde(flatten)]
    pub kind: ConstraintKind,
}

impl ConstraintData {
    /// Resolve the object ids, returning the first id the mapper does not know
    pub fn try_to_constraint<F>(&self, entity_mapper: F) -> Result<RigidBodyConstraint, u64>
    where
        F: Fn(u64) -> Option<Entity>,
    {
        let remap = |id: Option<u64>| -> Result<Option<Entity>, u64> {
            id.map(|id| entity_mapper(id).ok_or(id)).transpose()
        };
        Ok(RigidBodyConstraint {
            object1: remap(self.object1)?,
            object2: remap(self.object2)?,
            settings: self.settings,
            kind: self.kind.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hinge_from_json() {
        let json = r#"{
            "type": "HINGE",
            "object1": 0,
            "object2": 2,
            "breaking_threshold": 25.0,
            "limit_ang_z": { "enabled": true, "lower": -0.5, "upper": 0.5 }
        }"#;
        let data: ConstraintData = serde_json::from_str(json).unwrap();
        assert_eq!(data.object1, Some(0));
        assert_eq!(data.object2, Some(2));
        assert_eq!(data.settings.breaking_threshold, 25.0);
        assert!(data.settings.enabled);
        assert_eq!(
            data.kind,
            ConstraintKind::Hinge {
                limit_ang_z: AxisLimit::new(-0.5, 0.5)
            }
        );
    }

    #[test]
    fn test_unit_kinds_and_defaults() {
        let data: ConstraintData =
            serde_json::from_str(r#"{"type": "FIXED", "enabled": false}"#).unwrap();
        assert_eq!(data.kind, ConstraintKind::Fixed);
        assert!(!data.settings.enabled);
        assert_eq!(data.settings.solver_iterations, 10);
        assert!(data.object1.is_none());

        let data: ConstraintData =
            serde_json::from_str(r#"{"type": "GENERIC_SPRING"}"#).unwrap();
        assert_eq!(data.kind.constraint_type(), ConstraintType::GenericSpring);
        assert_eq!(data.kind.limits().len(), 6);
        assert_eq!(data.kind.springs().len(), 6);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<ConstraintData, _> = serde_json::from_str(r#"{"type": "ROPE"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_field_sets() {
        let hinge = ConstraintKind::Hinge {
            limit_ang_z: AxisLimit::angular(),
        };
        assert_eq!(hinge.limits().len(), 1);
        assert_eq!(hinge.limits()[0].0, Axis::AngZ);
        assert!(hinge.springs().is_empty());

        let piston = ConstraintKind::Piston {
            limit_lin_x: AxisLimit::linear(),
            limit_ang_x: AxisLimit::angular(),
        };
        let axes: Vec<Axis> = piston.limits().iter().map(|(a, _)| *a).collect();
        assert_eq!(axes, vec![Axis::LinX, Axis::AngX]);

        assert!(ConstraintKind::Motor.limits().is_empty());
        assert!(ConstraintKind::Point.springs().is_empty());
    }

    #[test]
    fn test_remap_objects() {
        let data = ConstraintData {
            object1: Some(4),
            object2: None,
            settings: ConstraintSettings::default(),
            kind: ConstraintKind::Point,
        };
        let constraint = data
            .try_to_constraint(|id| (id == 4).then_some(Entity::DANGLING))
            .unwrap();
        assert_eq!(constraint.object1, Some(Entity::DANGLING));
        assert_eq!(constraint.object2, None);

        let missing = data.try_to_constraint(|_| None);
        assert_eq!(missing, Err(4));
    }

    #[test]
    fn test_axis_keys() {
        let limit_keys: Vec<&str> = Axis::ALL.iter().map(|a| a.limit_key()).collect();
        assert_eq!(
            limit_keys,
            vec!["lin_x", "lin_y", "lin_z", "ang_x", "ang_y", "ang_z"]
        );
        assert_eq!(Axis::LinY.spring_key(), "y");
        assert_eq!(Axis::AngY.spring_key(), "ang_y");
    }
}
