//! Puppet scene graph: node tree, render traversal, picking.
//!
//! Nodes store their transform relative to the parent frame; world
//! poses are computed on demand during traversal and never cached.

mod joint;

pub use joint::{AxisState, JointState};

use glam::{EulerRot, Mat4, Quat, Vec3};
use shared::{
    legacy_bend_axis, legacy_swing, Hitbox, JointAxis, Material, NodeDescription,
    PuppetDescription, Transform,
};

/// Unique node identifier, assigned in creation (pre-)order.
pub type NodeId = u32;

/// Payload of a geometry node. The interaction core reads the
/// material and carries the hitbox; it mutates neither.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    pub mesh: String,
    pub material: Material,
    pub hitbox: Hitbox,
}

/// Node kind tag. Dispatch happens on this tag at traversal time;
/// there are no downcasts.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Inner,
    Geometry(GeometryData),
    Joint(JointState),
}

/// A node of the puppet scene graph. Children are exclusively owned,
/// so the tree is acyclic by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Pose relative to the parent frame.
    pub transform: Mat4,
    pub children: Vec<SceneNode>,
    pub selected: bool,
}

/// Everything the rendering collaborator needs to draw one geometry
/// node, snapshotted from a traversal.
#[derive(Debug, Clone)]
pub struct RenderItem {
    pub node_id: NodeId,
    pub mesh: String,
    pub model: Mat4,
    pub kd: [f32; 3],
    pub ks: [f32; 3],
    pub shininess: f32,
    pub selected: bool,
}

impl SceneNode {
    pub fn is_joint(&self) -> bool {
        matches!(self.kind, NodeKind::Joint(_))
    }

    pub fn is_geometry(&self) -> bool {
        matches!(self.kind, NodeKind::Geometry(_))
    }

    pub fn joint(&self) -> Option<&JointState> {
        match &self.kind {
            NodeKind::Joint(j) => Some(j),
            _ => None,
        }
    }

    pub fn joint_mut(&mut self) -> Option<&mut JointState> {
        match &mut self.kind {
            NodeKind::Joint(j) => Some(j),
            _ => None,
        }
    }

    /// Local pose: the stored transform, composed with the current
    /// joint rotation for joint nodes.
    pub fn local_pose(&self) -> Mat4 {
        match &self.kind {
            NodeKind::Joint(j) => self.transform * j.rotation_matrix(),
            _ => self.transform,
        }
    }

    /// Find a node by id.
    pub fn find(&self, id: NodeId) -> Option<&SceneNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Find a node by id, mutably.
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Visit every node in pre-order.
    pub fn visit(&self, visit: &mut impl FnMut(&SceneNode)) {
        visit(self);
        for child in &self.children {
            child.visit(visit);
        }
    }

    /// Clear the selection flag on this node and every descendant.
    pub fn deselect_all(&mut self) {
        self.selected = false;
        for child in &mut self.children {
            child.deselect_all();
        }
    }

    /// Toggle this node's selection flag and mirror the new value
    /// onto its direct geometry children, so the highlight shows on
    /// the meshes a joint articulates.
    pub fn toggle_selected(&mut self) -> bool {
        self.selected = !self.selected;
        for child in &mut self.children {
            if child.is_geometry() {
                child.selected = self.selected;
            }
        }
        self.selected
    }
}

/// Convert a TRS description transform to a matrix.
/// Rotation is Euler XYZ, degrees.
pub fn transform_matrix(t: &Transform) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::from(t.scale),
        Quat::from_euler(
            EulerRot::XYZ,
            t.rotation[0].to_radians(),
            t.rotation[1].to_radians(),
            t.rotation[2].to_radians(),
        ),
        Vec3::from(t.position),
    )
}

/// Build the runtime tree from a description, assigning ids in
/// pre-order starting from 0.
pub fn build(description: &PuppetDescription) -> SceneNode {
    let mut next_id: NodeId = 0;
    build_node(&description.root, &mut next_id)
}

fn build_node(desc: &NodeDescription, next_id: &mut NodeId) -> SceneNode {
    let id = *next_id;
    *next_id += 1;

    let (kind, transform) = match desc {
        NodeDescription::Inner { transform, .. } => (NodeKind::Inner, transform),
        NodeDescription::Geometry {
            transform,
            mesh,
            material,
            hitbox,
            ..
        } => (
            NodeKind::Geometry(GeometryData {
                mesh: mesh.clone(),
                material: material.clone(),
                hitbox: hitbox.clone(),
            }),
            transform,
        ),
        NodeDescription::Joint {
            name,
            transform,
            x,
            y,
            bend_axis,
            swing,
            ..
        } => {
            let bend = bend_axis
                .or_else(|| legacy_bend_axis(name))
                .unwrap_or(JointAxis::X);
            let swing = swing.unwrap_or_else(|| legacy_swing(name));
            (NodeKind::Joint(JointState::new(*x, *y, bend, swing)), transform)
        }
    };

    SceneNode {
        id,
        name: desc.name().to_string(),
        kind,
        transform: transform_matrix(transform),
        children: desc
            .children()
            .iter()
            .map(|c| build_node(c, next_id))
            .collect(),
        selected: false,
    }
}

/// Pre-order walk over every geometry node reachable from `root`,
/// yielding the node together with its world transform (the product
/// of local poses from the root down, root included). The world
/// transform is threaded as an accumulator; stored node transforms
/// are never written.
pub fn for_each_renderable(root: &SceneNode, mut visit: impl FnMut(&SceneNode, Mat4)) {
    fn walk(node: &SceneNode, parent_world: Mat4, visit: &mut impl FnMut(&SceneNode, Mat4)) {
        let world = parent_world * node.local_pose();
        if node.is_geometry() {
            visit(node, world);
        }
        for child in &node.children {
            walk(child, world, visit);
        }
    }
    walk(root, Mat4::IDENTITY, &mut visit);
}

/// Snapshot the renderable scene into draw items for the renderer.
pub fn collect_render_items(root: &SceneNode) -> Vec<RenderItem> {
    let mut items = Vec::new();
    for_each_renderable(root, |node, world| {
        if let NodeKind::Geometry(g) = &node.kind {
            items.push(RenderItem {
                node_id: node.id,
                mesh: g.mesh.clone(),
                model: world,
                kd: g.material.kd,
                ks: g.material.ks,
                shininess: g.material.shininess,
                selected: node.selected,
            });
        }
    });
    items
}

/// Resolve a renderer-produced integer id to the joint that owns it
/// and toggle that joint's selection: a joint's own id matches, and
/// so does the id of any of its direct children (geometry meshes act
/// as proxies for their owning joint). Returns the toggled joint's
/// id, or `None` (and no state change) when nothing matches.
pub fn pick(root: &mut SceneNode, id: u32) -> Option<NodeId> {
    if root.is_joint() {
        let own = root.id == id;
        let child = root.children.iter().any(|c| c.id == id);
        if own || child {
            root.toggle_selected();
            return Some(root.id);
        }
    }
    for child in &mut root.children {
        if let Some(joint_id) = pick(child, id) {
            return Some(joint_id);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn build_simple() -> SceneNode {
        build(&fixtures::simple_puppet())
    }

    #[test]
    fn test_build_assigns_preorder_ids() {
        let root = build_simple();
        let mut ids = Vec::new();
        root.visit(&mut |n| ids.push(n.id));
        let expected: Vec<NodeId> = (0..ids.len() as NodeId).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_traversal_yields_geometry_only() {
        let root = build_simple();
        let mut names = Vec::new();
        for_each_renderable(&root, |node, _| names.push(node.name.clone()));
        assert!(names.contains(&"torso".to_string()));
        assert!(names.contains(&"head".to_string()));
        assert!(!names.contains(&"neckJoint".to_string()));
    }

    #[test]
    fn test_traversal_composes_world_transforms() {
        // root(translate 0,0,-5) -> torso(identity), so the torso's
        // world transform carries the root translation.
        let root = build_simple();
        let mut torso_world = None;
        for_each_renderable(&root, |node, world| {
            if node.name == "torso" {
                torso_world = Some(world);
            }
        });
        let world = torso_world.expect("torso not visited");
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin.z - (-5.0)).abs() < 1e-5);
    }

    #[test]
    fn test_traversal_leaves_stored_transforms_untouched() {
        let root = build_simple();
        let mut before = Vec::new();
        root.visit(&mut |n| before.push(n.transform));

        for_each_renderable(&root, |_, _| {});
        for_each_renderable(&root, |_, _| {});

        let mut after = Vec::new();
        root.visit(&mut |n| after.push(n.transform));
        // Bit-identical, not merely approximately equal.
        for (b, a) in before.iter().zip(after.iter()) {
            assert_eq!(b.to_cols_array(), a.to_cols_array());
        }
    }

    #[test]
    fn test_joint_rotation_moves_child_world_transform() {
        let mut root = build_simple();
        let neck_id = root
            .find_mut(0)
            .unwrap()
            .children
            .iter()
            .find(|c| c.name == "neckJoint")
            .map(|c| c.id)
            .unwrap();

        let head_z_before = head_world_origin(&root).z;
        root.find_mut(neck_id)
            .unwrap()
            .joint_mut()
            .unwrap()
            .rotate(JointAxis::X, 45.0);
        let head_after = head_world_origin(&root);
        // Head sits above the joint pivot; an X rotation moves it in z.
        assert!((head_after.z - head_z_before).abs() > 1e-3);
    }

    fn head_world_origin(root: &SceneNode) -> Vec3 {
        let mut origin = Vec3::ZERO;
        for_each_renderable(root, |node, world| {
            if node.name == "head" {
                origin = world.transform_point3(Vec3::ZERO);
            }
        });
        origin
    }

    #[test]
    fn test_pick_joint_by_own_id() {
        let mut root = build_simple();
        let neck_id = find_by_name(&root, "neckJoint");
        let toggled = pick(&mut root, neck_id);
        assert_eq!(toggled, Some(neck_id));
        assert!(root.find(neck_id).unwrap().selected);
        // Toggle again deselects.
        pick(&mut root, neck_id);
        assert!(!root.find(neck_id).unwrap().selected);
    }

    #[test]
    fn test_pick_geometry_child_selects_parent_joint() {
        let mut root = build_simple();
        let neck_id = find_by_name(&root, "neckJoint");
        let head_id = find_by_name(&root, "head");
        let toggled = pick(&mut root, head_id);
        assert_eq!(toggled, Some(neck_id));
        assert!(root.find(neck_id).unwrap().selected);
        // The geometry child is highlighted but is not the pick result.
        assert!(root.find(head_id).unwrap().selected);
    }

    #[test]
    fn test_pick_unknown_id_is_noop() {
        let mut root = build_simple();
        assert_eq!(pick(&mut root, 9999), None);
        let mut any_selected = false;
        root.visit(&mut |n| any_selected |= n.selected);
        assert!(!any_selected);
    }

    #[test]
    fn test_pick_non_joint_geometry_is_noop() {
        // The torso hangs off an inner node, not a joint; clicking it
        // selects nothing.
        let mut root = build_simple();
        let torso_id = find_by_name(&root, "torso");
        assert_eq!(pick(&mut root, torso_id), None);
    }

    #[test]
    fn test_legacy_axis_resolution_at_build() {
        let root = build(&fixtures::arm_puppet());
        let elbow_id = find_by_name(&root, "leftElbow-hand");
        let joint = root.find(elbow_id).unwrap().joint().unwrap();
        assert_eq!(joint.bend_axis, JointAxis::Y);

        let shoulder_id = find_by_name(&root, "leftShoulder");
        let joint = root.find(shoulder_id).unwrap().joint().unwrap();
        assert_eq!(joint.bend_axis, JointAxis::X);
    }

    fn find_by_name(root: &SceneNode, name: &str) -> NodeId {
        let mut found = None;
        root.visit(&mut |n| {
            if n.name == name {
                found = Some(n.id);
            }
        });
        found.unwrap_or_else(|| panic!("no node named {name}"))
    }
}
