use crate::core::gfx::{BlendMode, Material, Texture};
use log::{debug, info};
use rustc_hash::FxHashMap;
use std::rc::Rc;

// --- Well-known resource keys ---

pub const TEX_BT_CHIP: &str = "textures/game/bt_chip";
pub const TEX_BT_CHIP_SAMPLE: &str = "textures/game/bt_chip_sample";
pub const TEX_FX_CHIP: &str = "textures/game/fx_chip";
pub const TEX_FX_CHIP_SAMPLE: &str = "textures/game/fx_chip_sample";
pub const TEX_BT_HOLD: &str = "textures/game/bt_hold";
pub const TEX_FX_HOLD: &str = "textures/game/fx_hold";
pub const TEX_LASER: &str = "textures/game/laser";

pub const MAT_CHIP: &str = "materials/chip";
pub const MAT_HOLD: &str = "materials/hold";
pub const MAT_BASIC: &str = "materials/basic";
pub const MAT_LASER: &str = "materials/laser";

/// Every texture the playfield objects reference, caps included.
pub const PLAYFIELD_TEXTURES: [&str; 11] = [
    TEX_BT_CHIP,
    TEX_BT_CHIP_SAMPLE,
    TEX_FX_CHIP,
    TEX_FX_CHIP_SAMPLE,
    TEX_BT_HOLD,
    "textures/game/bt_hold_entry",
    "textures/game/bt_hold_exit",
    TEX_FX_HOLD,
    "textures/game/fx_hold_entry",
    "textures/game/fx_hold_exit",
    TEX_LASER,
];

pub const PLAYFIELD_MATERIALS: [&str; 4] = [MAT_CHIP, MAT_HOLD, MAT_BASIC, MAT_LASER];

/// String-keyed cache of shared texture and material handles.
///
/// Lookups are expected to hit an already warmed cache; a miss registers a
/// fresh handle so object construction never fails on a missing key.
#[derive(Debug, Default)]
pub struct ResourceManager {
    textures: FxHashMap<String, Rc<Texture>>,
    materials: FxHashMap<String, Rc<Material>>,
    next_id: u32,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager with every playfield texture and material registered.
    pub fn warmed() -> Self {
        let mut resources = Self::new();
        resources.warm(&PLAYFIELD_TEXTURES, &PLAYFIELD_MATERIALS);
        resources
    }

    pub fn warm(&mut self, textures: &[&str], materials: &[&str]) {
        for key in textures {
            self.texture(key);
        }
        for key in materials {
            self.material(key);
        }
        info!(
            "Resource cache warmed: {} textures, {} materials",
            self.textures.len(),
            self.materials.len()
        );
    }

    pub fn texture(&mut self, key: &str) -> Rc<Texture> {
        if let Some(tex) = self.textures.get(key) {
            return Rc::clone(tex);
        }
        debug!("Texture cache miss for '{key}', registering handle.");
        let tex = Rc::new(Texture {
            id: self.alloc_id(),
            key: key.to_string(),
        });
        self.textures.insert(key.to_string(), Rc::clone(&tex));
        tex
    }

    pub fn material(&mut self, key: &str) -> Rc<Material> {
        if let Some(mat) = self.materials.get(key) {
            return Rc::clone(mat);
        }
        debug!("Material cache miss for '{key}', registering handle.");
        let mat = Rc::new(Material {
            id: self.alloc_id(),
            key: key.to_string(),
            blend: BlendMode::Alpha,
        });
        self.materials.insert(key.to_string(), Rc::clone(&mat));
        mat
    }

    #[inline(always)]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    #[inline(always)]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_lookups_share_one_handle() {
        let mut resources = ResourceManager::new();
        let a = resources.texture(TEX_LASER);
        let b = resources.texture(TEX_LASER);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(resources.texture_count(), 1);
    }

    #[test]
    fn warmed_cache_holds_every_playfield_key() {
        let mut resources = ResourceManager::warmed();
        assert_eq!(resources.texture_count(), PLAYFIELD_TEXTURES.len());
        assert_eq!(resources.material_count(), PLAYFIELD_MATERIALS.len());
        resources.texture("textures/game/fx_hold_exit");
        resources.material(MAT_LASER);
        assert_eq!(resources.texture_count(), PLAYFIELD_TEXTURES.len());
        assert_eq!(resources.material_count(), PLAYFIELD_MATERIALS.len());
    }

    #[test]
    fn handles_get_distinct_ids() {
        let mut resources = ResourceManager::new();
        let tex = resources.texture(TEX_BT_CHIP);
        let mat = resources.material(MAT_CHIP);
        assert_ne!(tex.id, mat.id);
        assert_eq!(mat.blend, BlendMode::Alpha);
    }
}
