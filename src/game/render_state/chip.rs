use super::{Render, SplitDraw, SplitDrawable, StaticMeshes, scale};
use crate::assets::{
    MAT_CHIP, ResourceManager, TEX_BT_CHIP, TEX_BT_CHIP_SAMPLE, TEX_FX_CHIP, TEX_FX_CHIP_SAMPLE,
};
use crate::core::gfx::{Drawable, RenderQueue};
use crate::game::chart::ButtonObject;
use glam::Mat4;
use log::trace;
use std::rc::Rc;

pub fn chip_texture_key(object: &ButtonObject) -> &'static str {
    match (object.is_fx(), object.has_sample) {
        (false, false) => TEX_BT_CHIP,
        (false, true) => TEX_BT_CHIP_SAMPLE,
        (true, false) => TEX_FX_CHIP,
        (true, true) => TEX_FX_CHIP_SAMPLE,
    }
}

#[derive(Debug)]
pub struct ChipRenderState<'c> {
    pub object: &'c ButtonObject,
    width: f32,
    drawables: [Drawable; 2],
    split: SplitDraw,
}

impl<'c> ChipRenderState<'c> {
    pub fn new(object: &'c ButtonObject, resources: &mut ResourceManager, statics: &StaticMeshes) -> Self {
        debug_assert!(object.is_chip(), "Hold object passed to render state which expects a chip");

        let texture = resources.texture(chip_texture_key(object));
        let material = resources.material(MAT_CHIP);
        let drawables = statics
            .chip_halves()
            .map(|mesh| Drawable::new(Rc::clone(&texture), Rc::clone(&material), Rc::clone(mesh)));

        trace!("Chip render state: lane {} -> '{}'", object.lane, texture.key);
        Self {
            object,
            width: f32::from(object.width_class()),
            drawables,
            split: SplitDraw::Full,
        }
    }

    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }
}

impl SplitDrawable for ChipRenderState<'_> {
    fn split_draw(&self) -> SplitDraw {
        self.split
    }

    fn set_split_draw(&mut self, mode: SplitDraw) {
        self.split = mode;
    }
}

impl Render for ChipRenderState<'_> {
    fn render<'a>(&'a self, queue: &mut RenderQueue<'a>, world: Mat4, len: f32) {
        let transform = world * scale(self.width, 1.0, len);
        match self.split.half() {
            None => {
                for d in &self.drawables {
                    d.draw_to_queue(queue, transform);
                }
            }
            Some(half) => self.drawables[half].draw_to_queue(queue, transform),
        }
    }
}
