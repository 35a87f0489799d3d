//! Per-object visuals for the 3D playfield.
//!
//! Every chart object that can appear on the track gets one [`RenderState`],
//! built once when it enters the visible window and dropped when it leaves.
//! Topology (drawable count, meshes) is fixed at construction; afterwards only
//! glow, glow state and split-draw mode change.

mod chip;
mod hold;
mod laser;
mod slam;
mod statics;

pub use chip::{ChipRenderState, chip_texture_key};
pub use hold::{HOLD_ENTRY_LENGTH, HOLD_EXIT_LENGTH, HoldRenderState, HoldTransforms};
pub use laser::{
    AUTO_RESOLUTION, LASER_WIDTH, LaserBounds, LaserRenderState, build_laser_mesh, laser_range,
    segment_count,
};
pub use slam::{SlamDirection, SlamRenderState, build_slam_mesh};
pub use statics::StaticMeshes;

use crate::assets::ResourceManager;
use crate::core::gfx::{Drawable, PARAM_GLOW_STATE, ParamValue, RenderQueue};
use crate::game::chart::{AnalogObject, ButtonObject};
use glam::{Mat4, Vec3};

/// Restricts a two-half object to one of its halves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SplitDraw {
    #[default]
    Full,
    Left,
    Right,
}

impl SplitDraw {
    /// 0 = full, 1 = left, 2 = right.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Full),
            1 => Some(Self::Left),
            2 => Some(Self::Right),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        match self {
            Self::Full => 0,
            Self::Left => 1,
            Self::Right => 2,
        }
    }

    /// Offset of the selected half inside a left/right drawable pair.
    #[inline(always)]
    pub const fn half(self) -> Option<usize> {
        match self {
            Self::Full => None,
            Self::Left => Some(0),
            Self::Right => Some(1),
        }
    }
}

pub trait Render {
    /// Submits this object's drawables. `len` is the current on-screen length
    /// in world units and must not be negative.
    fn render<'a>(&'a self, queue: &mut RenderQueue<'a>, world: Mat4, len: f32);
}

/// Judgement-driven glow. Every write is pushed to the drawables, even when
/// the value did not change.
pub trait Glowing {
    fn glow(&self) -> f32;
    fn glow_state(&self) -> i32;
    fn set_glow(&mut self, glow: f32);
    fn set_glow_state(&mut self, state: i32);
}

pub trait SplitDrawable {
    fn split_draw(&self) -> SplitDraw;
    fn set_split_draw(&mut self, mode: SplitDraw);
}

// Stored glow values; -1 marks "never written".
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GlowCell {
    pub glow: f32,
    pub state: i32,
}

impl Default for GlowCell {
    fn default() -> Self {
        Self {
            glow: -1.0,
            state: -1,
        }
    }
}

pub(crate) fn push_glow_param(drawables: &mut [Drawable], value: ParamValue) {
    for d in drawables {
        d.params.set(PARAM_GLOW_STATE, value);
    }
}

#[inline(always)]
pub(crate) fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(x, y, z))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderStateKind {
    Chip,
    Hold,
    Slam,
    Laser,
}

/// Closed set of playfield visuals.
#[derive(Debug)]
pub enum RenderState<'c> {
    Chip(ChipRenderState<'c>),
    Hold(HoldRenderState<'c>),
    Slam(SlamRenderState<'c>),
    Laser(LaserRenderState<'c>),
}

impl<'c> RenderState<'c> {
    pub fn for_button(
        object: &'c ButtonObject,
        resources: &mut ResourceManager,
        statics: &StaticMeshes,
    ) -> Self {
        if object.is_chip() {
            Self::Chip(ChipRenderState::new(object, resources, statics))
        } else {
            Self::Hold(HoldRenderState::new(object, resources, statics))
        }
    }

    pub fn for_analog(object: &'c AnalogObject, color: Vec3, resources: &mut ResourceManager) -> Self {
        if object.is_instant() {
            Self::Slam(SlamRenderState::new(object, color, resources))
        } else {
            Self::Laser(LaserRenderState::new(object, color, resources))
        }
    }

    pub fn kind(&self) -> RenderStateKind {
        match self {
            Self::Chip(_) => RenderStateKind::Chip,
            Self::Hold(_) => RenderStateKind::Hold,
            Self::Slam(_) => RenderStateKind::Slam,
            Self::Laser(_) => RenderStateKind::Laser,
        }
    }

    pub fn as_glowing(&self) -> Option<&dyn Glowing> {
        match self {
            Self::Chip(_) => None,
            Self::Hold(s) => Some(s),
            Self::Slam(s) => Some(s),
            Self::Laser(s) => Some(s),
        }
    }

    pub fn as_glowing_mut(&mut self) -> Option<&mut dyn Glowing> {
        match self {
            Self::Chip(_) => None,
            Self::Hold(s) => Some(s),
            Self::Slam(s) => Some(s),
            Self::Laser(s) => Some(s),
        }
    }

    pub fn as_split_drawable_mut(&mut self) -> Option<&mut dyn SplitDrawable> {
        match self {
            Self::Chip(s) => Some(s),
            Self::Hold(s) => Some(s),
            Self::Slam(_) | Self::Laser(_) => None,
        }
    }
}

impl Render for RenderState<'_> {
    fn render<'a>(&'a self, queue: &mut RenderQueue<'a>, world: Mat4, len: f32) {
        debug_assert!(len >= 0.0, "render length must not be negative; got {len}");
        match self {
            Self::Chip(s) => s.render(queue, world, len),
            Self::Hold(s) => s.render(queue, world, len),
            Self::Slam(s) => s.render(queue, world, len),
            Self::Laser(s) => s.render(queue, world, len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::curve::CurveShape;

    fn drawn(state: &RenderState<'_>, len: f32) -> usize {
        let mut queue = RenderQueue::new();
        state.render(&mut queue, Mat4::IDENTITY, len);
        queue.len()
    }

    #[test]
    fn split_draw_index_roundtrip() {
        for mode in [SplitDraw::Full, SplitDraw::Left, SplitDraw::Right] {
            assert_eq!(SplitDraw::from_index(mode.index()), Some(mode));
        }
        assert_eq!(SplitDraw::from_index(3), None);
        assert_eq!(SplitDraw::default(), SplitDraw::Full);
    }

    #[test]
    fn factories_pick_the_matching_variant() {
        let mut resources = ResourceManager::warmed();
        let statics = StaticMeshes::new();
        let chip = ButtonObject::chip(0.0, 1);
        let hold = ButtonObject::hold(0.0, 1.0, 5);
        let slam = AnalogObject::slam(0.0, 0, 0.0, 1.0);
        let seg = AnalogObject::segment(0.0, 0.5, 1, 1.0, 0.0);

        let kinds = [
            RenderState::for_button(&chip, &mut resources, &statics).kind(),
            RenderState::for_button(&hold, &mut resources, &statics).kind(),
            RenderState::for_analog(&slam, Vec3::X, &mut resources).kind(),
            RenderState::for_analog(&seg, Vec3::Y, &mut resources).kind(),
        ];
        assert_eq!(
            kinds,
            [
                RenderStateKind::Chip,
                RenderStateKind::Hold,
                RenderStateKind::Slam,
                RenderStateKind::Laser
            ]
        );
    }

    #[test]
    fn full_draw_never_emits_less_than_a_split_half() {
        let mut resources = ResourceManager::warmed();
        let statics = StaticMeshes::new();
        let chip = ButtonObject::chip(0.0, 4);
        let hold = ButtonObject::hold(0.0, 2.0, 0);
        let slam = AnalogObject::slam(0.0, 0, 0.8, 0.2);
        let seg = AnalogObject::segment(0.0, 0.5, 1, 0.0, 1.0).with_shape(CurveShape::Cosine, 0.0, 0.0);

        let mut states = vec![
            RenderState::for_button(&chip, &mut resources, &statics),
            RenderState::for_button(&hold, &mut resources, &statics),
            RenderState::for_analog(&slam, Vec3::ONE, &mut resources),
            RenderState::for_analog(&seg, Vec3::ONE, &mut resources),
        ];

        for state in &mut states {
            let full = drawn(state, 3.0);
            for mode in [SplitDraw::Left, SplitDraw::Right] {
                let split = match state.as_split_drawable_mut() {
                    Some(s) => {
                        s.set_split_draw(mode);
                        let n = drawn(state, 3.0);
                        assert!(full > n, "{:?}: full={full}, split={n}", state.kind());
                        n
                    }
                    None => drawn(state, 3.0),
                };
                assert!(full >= split);
            }
        }
    }

    #[test]
    fn glow_writes_go_through_the_capability() {
        let mut resources = ResourceManager::warmed();
        let statics = StaticMeshes::new();
        let chip = ButtonObject::chip(0.0, 0);
        let hold = ButtonObject::hold(0.0, 1.0, 0);

        let mut chip_state = RenderState::for_button(&chip, &mut resources, &statics);
        assert!(chip_state.as_glowing_mut().is_none());

        let mut hold_state = RenderState::for_button(&hold, &mut resources, &statics);
        let glow = hold_state.as_glowing_mut().expect("holds glow");
        glow.set_glow(0.7);
        glow.set_glow_state(0);
        let read = hold_state.as_glowing().expect("holds glow");
        assert_eq!(read.glow(), 0.7);
        assert_eq!(read.glow_state(), 0);
    }

    #[test]
    fn lasers_do_not_split() {
        let mut resources = ResourceManager::warmed();
        let slam = AnalogObject::slam(0.0, 0, 0.0, 1.0);
        let mut state = RenderState::for_analog(&slam, Vec3::ONE, &mut resources);
        assert!(state.as_split_drawable_mut().is_none());
    }
}
