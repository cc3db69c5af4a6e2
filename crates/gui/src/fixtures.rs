//! Puppet description factories shared by tests and the harness.

use shared::{
    Hitbox, JointRange, Material, NodeDescription, PuppetDescription, Transform,
};

fn at(position: [f32; 3]) -> Transform {
    Transform {
        position,
        ..Transform::new()
    }
}

fn range(min: f32, max: f32) -> JointRange {
    JointRange {
        initial: 0.0,
        min,
        max,
    }
}

fn geometry(name: &str, mesh: &str, position: [f32; 3]) -> NodeDescription {
    NodeDescription::Geometry {
        name: name.to_string(),
        transform: at(position),
        mesh: mesh.to_string(),
        material: Material::default(),
        hitbox: Hitbox::default(),
        children: vec![],
    }
}

/// Minimal articulated puppet: a torso and a head on a neck joint,
/// pushed back so the default camera sees it.
///
/// ```text
/// root (inner, at z = -5)
/// ├── torso (geometry, cube)
/// └── neckJoint (joint, x in [-45, 45], swing via the legacy table)
///     └── head (geometry, sphere, 0.6 above the pivot)
/// ```
pub fn simple_puppet() -> PuppetDescription {
    PuppetDescription {
        name: "simple".to_string(),
        root: NodeDescription::Inner {
            name: "root".to_string(),
            transform: at([0.0, 0.0, -5.0]),
            children: vec![
                geometry("torso", "cube", [0.0, 0.0, 0.0]),
                NodeDescription::Joint {
                    name: "neckJoint".to_string(),
                    transform: at([0.0, 0.8, 0.0]),
                    x: range(-45.0, 45.0),
                    y: range(-180.0, 180.0),
                    bend_axis: None,
                    swing: None,
                    children: vec![geometry("head", "sphere", [0.0, 0.6, 0.0])],
                },
            ],
        },
    }
}

/// Puppet with a two-joint arm chain plus a neck, for exercising
/// legacy bend-axis resolution and mixed swing/non-swing selections.
pub fn arm_puppet() -> PuppetDescription {
    PuppetDescription {
        name: "arm".to_string(),
        root: NodeDescription::Inner {
            name: "root".to_string(),
            transform: at([0.0, 0.0, -5.0]),
            children: vec![
                geometry("torso", "cube", [0.0, 0.0, 0.0]),
                NodeDescription::Joint {
                    name: "neckJoint".to_string(),
                    transform: at([0.0, 0.8, 0.0]),
                    x: range(-45.0, 45.0),
                    y: range(-180.0, 180.0),
                    bend_axis: None,
                    swing: None,
                    children: vec![geometry("head", "sphere", [0.0, 0.6, 0.0])],
                },
                NodeDescription::Joint {
                    name: "leftShoulder".to_string(),
                    transform: at([-0.9, 0.5, 0.0]),
                    x: range(-180.0, 80.0),
                    y: range(0.0, 0.0),
                    bend_axis: None,
                    swing: None,
                    children: vec![
                        geometry("leftArm", "cube", [0.0, -0.5, 0.0]),
                        NodeDescription::Joint {
                            name: "leftElbow-hand".to_string(),
                            transform: at([0.0, -1.0, 0.0]),
                            x: range(-120.0, 0.0),
                            y: range(-90.0, 90.0),
                            bend_axis: None,
                            swing: None,
                            children: vec![geometry("leftHand", "sphere", [0.0, -0.4, 0.0])],
                        },
                    ],
                },
            ],
        },
    }
}
