use serde::{Deserialize, Serialize};

/// Rotation axes a joint can articulate around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointAxis {
    X,
    Y,
}

impl JointAxis {
    /// The other axis of the pair.
    pub fn alternate(self) -> Self {
        match self {
            JointAxis::X => JointAxis::Y,
            JointAxis::Y => JointAxis::X,
        }
    }
}

/// Position / rotation / scale, applied in that order.
/// Rotation is Euler XYZ in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

fn unit_scale() -> [f32; 3] {
    [1.0; 3]
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Phong material for a geometry node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse reflectance (RGB)
    pub kd: [f32; 3],
    /// Specular reflectance (RGB)
    #[serde(default)]
    pub ks: [f32; 3],
    #[serde(default)]
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: [0.7, 0.7, 0.7],
            ks: [0.0, 0.0, 0.0],
            shininess: 0.0,
        }
    }
}

/// Axis-aligned hitbox for coarse collision queries.
/// Carried on geometry nodes; the interaction core only stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    #[serde(default)]
    pub center: [f32; 3],
    #[serde(default = "unit_half_extents")]
    pub half_extents: [f32; 3],
}

fn unit_half_extents() -> [f32; 3] {
    [0.5; 3]
}

impl Default for Hitbox {
    fn default() -> Self {
        Self {
            center: [0.0; 3],
            half_extents: [0.5; 3],
        }
    }
}

impl Hitbox {
    /// Coarse AABB overlap test.
    pub fn intersects(&self, other: &Hitbox) -> bool {
        (0..3).all(|i| {
            (self.center[i] - other.center[i]).abs()
                <= self.half_extents[i] + other.half_extents[i]
        })
    }
}

/// Angular range of one joint axis, in degrees.
/// `initial` is the pose at scene load; `min <= initial <= max`
/// is expected from the authoring side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointRange {
    #[serde(default)]
    pub initial: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for JointRange {
    fn default() -> Self {
        Self {
            initial: 0.0,
            min: 0.0,
            max: 0.0,
        }
    }
}

/// One node of the puppet description tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDescription {
    Inner {
        name: String,
        #[serde(default)]
        transform: Transform,
        #[serde(default)]
        children: Vec<NodeDescription>,
    },
    Geometry {
        name: String,
        #[serde(default)]
        transform: Transform,
        /// Mesh identifier into the viewer's mesh table ("cube", "sphere", ...)
        mesh: String,
        #[serde(default)]
        material: Material,
        #[serde(default)]
        hitbox: Hitbox,
        #[serde(default)]
        children: Vec<NodeDescription>,
    },
    Joint {
        name: String,
        #[serde(default)]
        transform: Transform,
        #[serde(default)]
        x: JointRange,
        #[serde(default)]
        y: JointRange,
        /// Axis driven by a horizontal joint drag. Absent means
        /// "resolve from the legacy name table, else X".
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bend_axis: Option<JointAxis>,
        /// Whether a vertical joint drag swings this joint about its
        /// alternate axis. Absent means "resolve from the legacy name
        /// table, else false".
        #[serde(default, skip_serializing_if = "Option::is_none")]
        swing: Option<bool>,
        #[serde(default)]
        children: Vec<NodeDescription>,
    },
}

impl NodeDescription {
    pub fn name(&self) -> &str {
        match self {
            NodeDescription::Inner { name, .. }
            | NodeDescription::Geometry { name, .. }
            | NodeDescription::Joint { name, .. } => name,
        }
    }

    pub fn children(&self) -> &[NodeDescription] {
        match self {
            NodeDescription::Inner { children, .. }
            | NodeDescription::Geometry { children, .. }
            | NodeDescription::Joint { children, .. } => children,
        }
    }
}

/// Complete puppet description, as loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuppetDescription {
    #[serde(default)]
    pub name: String,
    pub root: NodeDescription,
}

/// Bend axis for joints whose description predates the explicit
/// `bend_axis` attribute. Closed table, not user-configurable.
pub fn legacy_bend_axis(name: &str) -> Option<JointAxis> {
    match name {
        "leftElbow-hand" | "rightElbow-hand" | "leftArm-elbow" | "rightArm-elbow" => {
            Some(JointAxis::Y)
        }
        _ => None,
    }
}

/// Swing designation for joints whose description predates the
/// explicit `swing` attribute.
pub fn legacy_swing(name: &str) -> bool {
    name == "neckJoint"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_defaults() {
        let t: Transform = serde_json::from_str("{}").unwrap();
        assert_eq!(t.position, [0.0; 3]);
        assert_eq!(t.scale, [1.0; 3]);
    }

    #[test]
    fn test_node_description_tagged_serde() {
        let json = r#"{
            "kind": "joint",
            "name": "neckJoint",
            "x": { "initial": 0.0, "min": -45.0, "max": 45.0 },
            "children": [
                { "kind": "geometry", "name": "head", "mesh": "sphere" }
            ]
        }"#;
        let node: NodeDescription = serde_json::from_str(json).unwrap();
        match &node {
            NodeDescription::Joint { name, x, children, bend_axis, swing, .. } => {
                assert_eq!(name, "neckJoint");
                assert_eq!(x.min, -45.0);
                assert_eq!(children.len(), 1);
                assert!(bend_axis.is_none());
                assert!(swing.is_none());
            }
            _ => panic!("Expected Joint"),
        }
    }

    #[test]
    fn test_description_round_trip() {
        let puppet = PuppetDescription {
            name: "test".to_string(),
            root: NodeDescription::Inner {
                name: "root".to_string(),
                transform: Transform::new(),
                children: vec![NodeDescription::Geometry {
                    name: "torso".to_string(),
                    transform: Transform::new(),
                    mesh: "cube".to_string(),
                    material: Material::default(),
                    hitbox: Hitbox::default(),
                    children: vec![],
                }],
            },
        };
        let json = serde_json::to_string(&puppet).unwrap();
        let back: PuppetDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(puppet, back);
    }

    #[test]
    fn test_legacy_bend_axis_table() {
        assert_eq!(legacy_bend_axis("leftElbow-hand"), Some(JointAxis::Y));
        assert_eq!(legacy_bend_axis("rightArm-elbow"), Some(JointAxis::Y));
        assert_eq!(legacy_bend_axis("hipJoint"), None);
        assert!(legacy_swing("neckJoint"));
        assert!(!legacy_swing("leftElbow-hand"));
    }

    #[test]
    fn test_joint_axis_alternate() {
        assert_eq!(JointAxis::X.alternate(), JointAxis::Y);
        assert_eq!(JointAxis::Y.alternate(), JointAxis::X);
    }

    #[test]
    fn test_hitbox_intersects() {
        let a = Hitbox {
            center: [0.0; 3],
            half_extents: [1.0; 3],
        };
        let b = Hitbox {
            center: [1.5, 0.0, 0.0],
            half_extents: [1.0; 3],
        };
        let c = Hitbox {
            center: [3.0, 0.0, 0.0],
            half_extents: [0.5; 3],
        };
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(b.intersects(&c));
    }
}
