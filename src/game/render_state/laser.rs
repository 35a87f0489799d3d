use super::{GlowCell, Glowing, Render, push_glow_param, scale};
use crate::assets::{MAT_LASER, ResourceManager, TEX_LASER};
use crate::core::gfx::{
    BlendMode, Drawable, Mesh, PARAM_HILITE_COLOR, PARAM_LASER_COLOR, ParamValue, RenderQueue,
    TexturedVertex,
};
use crate::game::chart::{AnalogObject, ChartTime};
use glam::{Mat4, Vec3};
use log::trace;
use std::rc::Rc;

pub const LASER_WIDTH: f32 = 2.0;
/// Chart time covered by one ribbon slice of an eased segment.
pub const AUTO_RESOLUTION: ChartTime = 1.0 / 64.0;
const MIN_SEGMENTS: usize = 4;
const HILITE_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.0);

/// Lateral travel range; range-extended lasers cover twice the track.
#[inline(always)]
pub fn laser_range(range_extended: bool) -> f32 {
    5.0 / 6.0 * if range_extended { 2.0 } else { 1.0 }
}

/// Lateral edges of a laser at one analog value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaserBounds {
    pub center: f32,
    pub left: f32,
    pub right: f32,
    /// Edges at half the laser width, used by the slam taper.
    pub left_half: f32,
    pub right_half: f32,
}

impl LaserBounds {
    pub fn new(value: f32, range_extended: bool) -> Self {
        const W: f32 = LASER_WIDTH / 6.0;
        let center = laser_range(range_extended) * (value - 0.5);
        Self {
            center,
            left: center - W / 2.0,
            right: center + W / 2.0,
            left_half: center - W / 4.0,
            right_half: center + W / 4.0,
        }
    }
}

/// Ribbon slice count for an eased segment of the given length.
#[inline(always)]
pub fn segment_count(duration: ChartTime) -> usize {
    MIN_SEGMENTS.max((duration / AUTO_RESOLUTION).floor() as usize)
}

/// Builds the unit-length (z in [-1, 0]) mesh of a laser segment.
pub fn build_laser_mesh(object: &AnalogObject) -> Mesh {
    let i = LaserBounds::new(object.initial_value, object.range_extended);
    let f = LaserBounds::new(object.final_value, object.range_extended);

    if !object.shape.is_curved() {
        let vertices = vec![
            TexturedVertex::new(i.left, 0.0, 0.0, 0.0, 1.0),
            TexturedVertex::new(f.left, 0.0, -1.0, 0.0, 0.0),
            TexturedVertex::new(f.right, 0.0, -1.0, 1.0, 0.0),
            TexturedVertex::new(i.right, 0.0, 0.0, 1.0, 1.0),
        ];
        return Mesh::new(vertices, vec![0, 1, 2, 0, 2, 3]);
    }

    let segments = segment_count(object.duration);
    debug_assert!(
        (segments + 1) * 2 <= usize::from(u16::MAX),
        "laser segment too long for 16-bit indices: {segments} slices"
    );

    let mut indices = Vec::with_capacity(segments * 6);
    for s in 0..segments {
        let base = (s * 2) as u16;
        indices.extend_from_slice(&[base, base + 3, base + 1, base, base + 2, base + 3]);
    }

    let mut vertices = Vec::with_capacity((segments + 1) * 2);
    for v in 0..=segments {
        let alpha = v as f32 / segments as f32;
        let xa = object.shape.sample(alpha, object.curve_a, object.curve_b);
        let xl = i.left + (f.left - i.left) * xa;
        let xr = i.right + (f.right - i.right) * xa;
        // The texture scrolls one full repeat along the ribbon.
        let tex_v = -alpha;
        vertices.push(TexturedVertex::new(xl, 0.0, -alpha, 0.0, tex_v));
        vertices.push(TexturedVertex::new(xr, 0.0, -alpha, 1.0, tex_v));
    }

    Mesh::new(vertices, indices)
}

/// Additive laser drawable over an owned procedural mesh.
pub(crate) fn laser_drawable(mesh: Mesh, color: Vec3, resources: &mut ResourceManager) -> Drawable {
    let mut drawable = Drawable::new(
        resources.texture(TEX_LASER),
        resources.material(MAT_LASER),
        Rc::new(mesh),
    );
    drawable.blend = BlendMode::Add;
    drawable.params.set(PARAM_LASER_COLOR, ParamValue::Vec3(color));
    drawable.params.set(PARAM_HILITE_COLOR, ParamValue::Vec3(HILITE_COLOR));
    drawable
}

#[derive(Debug)]
pub struct LaserRenderState<'c> {
    pub object: &'c AnalogObject,
    drawable: Drawable,
    glow: GlowCell,
}

impl<'c> LaserRenderState<'c> {
    pub fn new(object: &'c AnalogObject, color: Vec3, resources: &mut ResourceManager) -> Self {
        debug_assert!(!object.is_instant(), "analog for segment render state was a slam");

        let mesh = build_laser_mesh(object);
        trace!(
            "Laser render state: {:?} {:.3} -> {:.3}, {} verts / {} indices",
            object.shape,
            object.initial_value,
            object.final_value,
            mesh.vertex_count(),
            mesh.index_count()
        );

        let mut state = Self {
            object,
            drawable: laser_drawable(mesh, color, resources),
            glow: GlowCell::default(),
        };
        state.set_glow(0.0);
        state.set_glow_state(1);
        state
    }

    pub fn drawable(&self) -> &Drawable {
        &self.drawable
    }

    pub fn mesh(&self) -> &Mesh {
        &self.drawable.mesh
    }
}

impl Glowing for LaserRenderState<'_> {
    fn glow(&self) -> f32 {
        self.glow.glow
    }

    fn glow_state(&self) -> i32 {
        self.glow.state
    }

    fn set_glow(&mut self, glow: f32) {
        self.glow.glow = glow;
        push_glow_param(std::slice::from_mut(&mut self.drawable), ParamValue::Float(glow));
    }

    fn set_glow_state(&mut self, state: i32) {
        self.glow.state = state;
        push_glow_param(std::slice::from_mut(&mut self.drawable), ParamValue::Int(state));
    }
}

impl Render for LaserRenderState<'_> {
    fn render<'a>(&'a self, queue: &mut RenderQueue<'a>, world: Mat4, len: f32) {
        self.drawable.draw_to_queue(queue, world * scale(1.0, 1.0, len));
    }
}
