use super::{
    GlowCell, Glowing, Render, SplitDraw, SplitDrawable, StaticMeshes, push_glow_param, scale,
};
use crate::assets::{MAT_BASIC, MAT_HOLD, ResourceManager, TEX_BT_HOLD, TEX_FX_HOLD};
use crate::core::gfx::{Drawable, Material, PARAM_COLOR, ParamValue, RenderQueue, Texture};
use crate::game::chart::ButtonObject;
use glam::{Mat4, Vec3, Vec4};
use log::trace;
use std::rc::Rc;

pub const HOLD_ENTRY_LENGTH: f32 = 0.15;
pub const HOLD_EXIT_LENGTH: f32 = HOLD_ENTRY_LENGTH;

// Drawable pairs, left half first.
const BODY: usize = 0;
const ENTRY: usize = 2;
const EXIT: usize = 4;

/// Local transforms of the three hold parts for a given on-screen length.
///
/// Nothing is clamped: below `HOLD_ENTRY_LENGTH + HOLD_EXIT_LENGTH` the body
/// scale goes negative and the caps overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoldTransforms {
    pub body: Mat4,
    pub entry: Mat4,
    pub exit: Mat4,
}

impl HoldTransforms {
    pub fn new(width: f32, len: f32) -> Self {
        let body_len = len - HOLD_EXIT_LENGTH - HOLD_ENTRY_LENGTH;
        Self {
            body: Mat4::from_translation(Vec3::new(0.0, 0.0, -HOLD_ENTRY_LENGTH))
                * scale(width, 1.0, body_len),
            entry: scale(width, 1.0, HOLD_ENTRY_LENGTH),
            exit: Mat4::from_translation(Vec3::new(0.0, 0.0, -len + HOLD_EXIT_LENGTH))
                * scale(width, 1.0, HOLD_EXIT_LENGTH),
        }
    }
}

#[derive(Debug)]
pub struct HoldRenderState<'c> {
    pub object: &'c ButtonObject,
    width: f32,
    drawables: [Drawable; 6],
    split: SplitDraw,
    glow: GlowCell,
}

impl<'c> HoldRenderState<'c> {
    pub fn new(object: &'c ButtonObject, resources: &mut ResourceManager, statics: &StaticMeshes) -> Self {
        debug_assert!(object.is_hold(), "Chip object passed to render state which expects a hold");

        let base = if object.is_fx() { TEX_FX_HOLD } else { TEX_BT_HOLD };
        let body_tex = resources.texture(base);
        let entry_tex = resources.texture(&format!("{base}_entry"));
        let exit_tex = resources.texture(&format!("{base}_exit"));
        let hold_mat = resources.material(MAT_HOLD);
        let basic_mat = resources.material(MAT_BASIC);

        let [left, right] = statics.hold_halves();
        let pair = |tex: &Rc<Texture>, mat: &Rc<Material>| {
            [
                Drawable::new(Rc::clone(tex), Rc::clone(mat), Rc::clone(left)),
                Drawable::new(Rc::clone(tex), Rc::clone(mat), Rc::clone(right)),
            ]
        };
        let [body_l, body_r] = pair(&body_tex, &hold_mat);
        let [entry_l, entry_r] = pair(&entry_tex, &basic_mat);
        let [exit_l, exit_r] = pair(&exit_tex, &hold_mat);

        let mut drawables = [body_l, body_r, entry_l, entry_r, exit_l, exit_r];
        for d in &mut drawables {
            d.params.set(PARAM_COLOR, ParamValue::Vec4(Vec4::ONE));
        }

        trace!("Hold render state: lane {} -> '{base}'", object.lane);
        let mut state = Self {
            object,
            width: f32::from(object.width_class()),
            drawables,
            split: SplitDraw::Full,
            glow: GlowCell::default(),
        };
        // Holds start in the active visual state.
        state.set_glow(0.0);
        state.set_glow_state(1);
        state
    }

    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }
}

impl Glowing for HoldRenderState<'_> {
    fn glow(&self) -> f32 {
        self.glow.glow
    }

    fn glow_state(&self) -> i32 {
        self.glow.state
    }

    fn set_glow(&mut self, glow: f32) {
        self.glow.glow = glow;
        push_glow_param(&mut self.drawables, ParamValue::Float(glow));
    }

    fn set_glow_state(&mut self, state: i32) {
        self.glow.state = state;
        push_glow_param(&mut self.drawables, ParamValue::Int(state));
    }
}

impl SplitDrawable for HoldRenderState<'_> {
    fn split_draw(&self) -> SplitDraw {
        self.split
    }

    fn set_split_draw(&mut self, mode: SplitDraw) {
        self.split = mode;
    }
}

impl Render for HoldRenderState<'_> {
    fn render<'a>(&'a self, queue: &mut RenderQueue<'a>, world: Mat4, len: f32) {
        let parts = HoldTransforms::new(self.width, len);
        let placed = [
            (BODY, world * parts.body),
            (ENTRY, world * parts.entry),
            (EXIT, world * parts.exit),
        ];

        // One half selection applies to body and both caps alike.
        for (first, transform) in placed {
            match self.split.half() {
                None => {
                    self.drawables[first].draw_to_queue(queue, transform);
                    self.drawables[first + 1].draw_to_queue(queue, transform);
                }
                Some(half) => self.drawables[first + half].draw_to_queue(queue, transform),
            }
        }
    }
}
