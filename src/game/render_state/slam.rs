use super::laser::{LaserBounds, laser_drawable};
use super::{GlowCell, Glowing, Render, push_glow_param, scale};
use crate::assets::ResourceManager;
use crate::core::gfx::{Drawable, Mesh, ParamValue, RenderQueue, TexturedVertex};
use crate::game::chart::AnalogObject;
use glam::{Mat4, Vec3};
use log::trace;

const SLAM_INDICES: [u16; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlamDirection {
    Rising,
    /// Also taken when both values are equal.
    Falling,
}

impl SlamDirection {
    pub fn of(object: &AnalogObject) -> Self {
        if object.initial_value < object.final_value {
            Self::Rising
        } else {
            Self::Falling
        }
    }
}

/// Builds the tapered 4-triangle flick for a slam.
///
/// The positions and texture coordinates are hand-authored; each triangle
/// owns its three vertices.
pub fn build_slam_mesh(object: &AnalogObject) -> Mesh {
    let i = LaserBounds::new(object.initial_value, object.range_extended);
    let f = LaserBounds::new(object.final_value, object.range_extended);
    let v = TexturedVertex::new;

    #[rustfmt::skip]
    let vertices = match SlamDirection::of(object) {
        SlamDirection::Rising => vec![
            v(i.left,       0.0,  0.0, 0.00, 0.875),
            v(i.left,       0.0, -1.5, 0.00, 0.500),
            v(i.right_half, 0.0,  0.0, 0.75, 0.875),

            v(i.right,      0.0,  0.5, 1.00, 0.000),
            v(i.left,       0.0, -1.5, 0.00, 0.500),
            v(f.left,       0.0, -1.5, 0.00, 0.000),

            v(i.right,      0.0,  0.5, 1.00, 1.000),
            v(f.left,       0.0, -1.5, 0.00, 0.000),
            v(f.right,      0.0,  0.5, 1.00, 1.000),

            v(f.right,      0.0,  0.5, 1.00, 0.500),
            v(f.left_half,  0.0, -1.0, 0.25, 0.125),
            v(f.right,      0.0, -1.0, 1.00, 0.125),
        ],
        SlamDirection::Falling => vec![
            v(i.left_half,  0.0,  0.0, 0.25, 0.875),
            v(i.right,      0.0, -1.5, 1.00, 0.500),
            v(i.right,      0.0,  0.0, 1.00, 0.875),

            v(i.left,       0.0,  0.5, 0.00, 1.000),
            v(f.right,      0.0, -1.5, 1.00, 0.000),
            v(i.right,      0.0, -1.5, 1.00, 1.000),

            v(i.left,       0.0,  0.5, 0.00, 1.000),
            v(f.left,       0.0,  0.5, 0.00, 0.000),
            v(f.right,      0.0, -1.5, 1.00, 0.000),

            v(f.left,       0.0,  0.5, 0.00, 0.500),
            v(f.left,       0.0, -1.0, 0.00, 0.125),
            v(f.right_half, 0.0, -1.0, 0.75, 0.125),
        ],
    };

    Mesh::new(vertices, SLAM_INDICES.to_vec())
}

#[derive(Debug)]
pub struct SlamRenderState<'c> {
    pub object: &'c AnalogObject,
    direction: SlamDirection,
    drawable: Drawable,
    glow: GlowCell,
}

impl<'c> SlamRenderState<'c> {
    pub fn new(object: &'c AnalogObject, color: Vec3, resources: &mut ResourceManager) -> Self {
        debug_assert!(object.is_instant(), "Analog for slam render state wasn't a slam");

        let direction = SlamDirection::of(object);
        trace!(
            "Slam render state: {direction:?} {:.3} -> {:.3}",
            object.initial_value, object.final_value
        );

        let mut state = Self {
            object,
            direction,
            drawable: laser_drawable(build_slam_mesh(object), color, resources),
            glow: GlowCell::default(),
        };
        state.set_glow(0.0);
        state.set_glow_state(1);
        state
    }

    #[inline(always)]
    pub fn direction(&self) -> SlamDirection {
        self.direction
    }

    pub fn drawable(&self) -> &Drawable {
        &self.drawable
    }

    pub fn mesh(&self) -> &Mesh {
        &self.drawable.mesh
    }
}

impl Glowing for SlamRenderState<'_> {
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

impl Render for SlamRenderState<'_> {
    fn render<'a>(&'a self, queue: &mut RenderQueue<'a>, world: Mat4, len: f32) {
        self.drawable.draw_to_queue(queue, world * scale(1.0, 1.0, len));
    }
}
