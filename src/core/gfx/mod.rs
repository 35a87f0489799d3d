use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use rustc_hash::FxHashMap;
use std::rc::Rc;

// Shader parameter names shared by every playfield material.
pub const PARAM_COLOR: &str = "Color";
pub const PARAM_GLOW_STATE: &str = "GlowState";
pub const PARAM_LASER_COLOR: &str = "LaserColor";
pub const PARAM_HILITE_COLOR: &str = "HiliteColor";

// --- Public Data Contract ---

/// Flat billboard vertex in object-local space (X lateral, Z travel, Y = 0).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

impl TexturedVertex {
    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self {
            pos: [x, y, z],
            uv: [u, v],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Alpha,
    Add,
    #[allow(dead_code)]
    Multiply,
    #[allow(dead_code)]
    Subtract,
}

/// Which corner of a plane sits on the local origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    BottomLeft,
    BottomRight,
}

/// Texture-space sub-rectangle, `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl UvRect {
    pub const FULL: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    #[inline(always)]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<TexturedVertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn new(vertices: Vec<TexturedVertex>, indices: Vec<u16>) -> Self {
        debug_assert!(
            indices.iter().all(|&i| (i as usize) < vertices.len()),
            "mesh index out of range of its {} vertices",
            vertices.len()
        );
        Self { vertices, indices }
    }

    /// Builds a flat quad on the XZ plane. The anchored (bottom) edge lies on
    /// z = 0 and the plane extends towards -Z, the direction objects travel in.
    pub fn plane(width: f32, height: f32, anchor: Anchor, uv: UvRect) -> Self {
        let (x0, x1) = match anchor {
            Anchor::BottomLeft => (0.0, width),
            Anchor::BottomRight => (-width, 0.0),
        };
        let (u0, u1) = (uv.x, uv.x + uv.w);
        let (v_far, v_near) = (uv.y, uv.y + uv.h);

        let vertices = vec![
            TexturedVertex::new(x0, 0.0, 0.0, u0, v_near),
            TexturedVertex::new(x0, 0.0, -height, u0, v_far),
            TexturedVertex::new(x1, 0.0, -height, u1, v_far),
            TexturedVertex::new(x1, 0.0, 0.0, u1, v_near),
        ];
        Self::new(vertices, vec![0, 1, 2, 0, 2, 3])
    }

    #[inline(always)]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline(always)]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Raw vertex bytes for upload.
    #[inline(always)]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Lateral (x) extent covered by the mesh, `None` when empty.
    pub fn x_bounds(&self) -> Option<(f32, f32)> {
        let mut it = self.vertices.iter().map(|v| v.pos[0]);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x))))
    }
}

// A handle to a loaded texture; identity only, pixels live with the backend.
#[derive(Debug, PartialEq, Eq)]
pub struct Texture {
    pub id: u32,
    pub key: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Material {
    pub id: u32,
    pub key: String,
    pub blend: BlendMode,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Int(i32),
    Vec3(Vec3),
    Vec4(Vec4),
}

/// Named shader parameters for a single drawable.
///
/// `revision` advances on every write, redundant or not, so the backend (and
/// tests) can observe each push.
#[derive(Clone, Debug, Default)]
pub struct Params {
    values: FxHashMap<&'static str, ParamValue>,
    revision: u64,
}

impl Params {
    #[inline(always)]
    pub fn set(&mut self, name: &'static str, value: ParamValue) {
        self.values.insert(name, value);
        self.revision += 1;
    }

    #[inline(always)]
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied()
    }

    #[inline(always)]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Drawable {
    pub texture: Rc<Texture>,
    pub material: Rc<Material>,
    pub mesh: Rc<Mesh>,
    pub blend: BlendMode,
    pub params: Params,
}

impl Drawable {
    pub fn new(texture: Rc<Texture>, material: Rc<Material>, mesh: Rc<Mesh>) -> Self {
        let blend = material.blend;
        Self {
            texture,
            material,
            mesh,
            blend,
            params: Params::default(),
        }
    }

    #[inline(always)]
    pub fn draw_to_queue<'a>(&'a self, queue: &mut RenderQueue<'a>, transform: Mat4) {
        queue.push(self, transform);
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RenderItem<'a> {
    pub drawable: &'a Drawable,
    pub transform: Mat4,
}

/// Per-frame list of submitted drawables, kept in submission order. Sorting
/// and batching are left to the backend.
#[derive(Debug, Default)]
pub struct RenderQueue<'a> {
    items: Vec<RenderItem<'a>>,
}

impl<'a> RenderQueue<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn push(&mut self, drawable: &'a Drawable, transform: Mat4) {
        self.items.push(RenderItem {
            drawable,
            transform,
        });
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderItem<'a>> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_right_plane_extends_left_and_away() {
        let mesh = Mesh::plane(0.5, 2.0, Anchor::BottomRight, UvRect::new(0.0, 0.0, 0.5, 1.0));
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.x_bounds(), Some((-0.5, 0.0)));
        let zs: Vec<f32> = mesh.vertices.iter().map(|v| v.pos[2]).collect();
        assert!(zs.iter().all(|&z| z == 0.0 || z == -2.0), "got {zs:?}");
        let max_u = mesh.vertices.iter().map(|v| v.uv[0]).fold(0.0, f32::max);
        assert!((max_u - 0.5).abs() <= f32::EPSILON);
    }

    #[test]
    fn vertex_bytes_cover_every_vertex() {
        let mesh = Mesh::plane(1.0, 1.0, Anchor::BottomLeft, UvRect::FULL);
        assert_eq!(
            mesh.vertex_bytes().len(),
            mesh.vertex_count() * std::mem::size_of::<TexturedVertex>()
        );
        assert_eq!(std::mem::size_of::<TexturedVertex>(), 20);
    }

    #[test]
    fn params_count_redundant_writes() {
        let mut params = Params::default();
        params.set(PARAM_GLOW_STATE, ParamValue::Float(0.5));
        params.set(PARAM_GLOW_STATE, ParamValue::Float(0.5));
        assert_eq!(params.revision(), 2);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get(PARAM_GLOW_STATE), Some(ParamValue::Float(0.5)));
    }

    #[test]
    fn queue_keeps_submission_order() {
        let texture = Rc::new(Texture {
            id: 0,
            key: "t".to_string(),
        });
        let material = Rc::new(Material {
            id: 0,
            key: "m".to_string(),
            blend: BlendMode::Alpha,
        });
        let mesh = Rc::new(Mesh::plane(1.0, 1.0, Anchor::BottomLeft, UvRect::FULL));
        let a = Drawable::new(texture.clone(), material.clone(), mesh.clone());
        let b = Drawable::new(texture, material, mesh);

        let mut queue = RenderQueue::new();
        a.draw_to_queue(&mut queue, Mat4::IDENTITY);
        b.draw_to_queue(&mut queue, Mat4::from_scale(Vec3::splat(2.0)));
        assert_eq!(queue.len(), 2);
        let order: Vec<bool> = queue
            .iter()
            .map(|item| std::ptr::eq(item.drawable, &a))
            .collect();
        assert_eq!(order, vec![true, false]);
        queue.clear();
        assert!(queue.is_empty());
    }
}
