use crate::core::gfx::{Anchor, Mesh, UvRect};
use log::debug;
use std::rc::Rc;

const HALF_QUAD_WIDTH: f32 = 1.0 / 12.0;
const CHIP_HEIGHT: f32 = 0.1;
const HOLD_HEIGHT: f32 = 1.0;

const LEFT_UV: UvRect = UvRect::new(0.0, 0.0, 0.5, 1.0);
const RIGHT_UV: UvRect = UvRect::new(0.5, 0.0, 0.5, 1.0);

/// Half-quad meshes shared by every chip and hold of a play session.
///
/// Render states keep `Rc` clones and never release them; the meshes go away
/// with the last clone once this cache is dropped at session end.
#[derive(Debug)]
pub struct StaticMeshes {
    pub chip_left: Rc<Mesh>,
    pub chip_right: Rc<Mesh>,
    pub hold_left: Rc<Mesh>,
    pub hold_right: Rc<Mesh>,
}

impl StaticMeshes {
    pub fn new() -> Self {
        let half = |height: f32, anchor: Anchor, uv: UvRect| {
            Rc::new(Mesh::plane(HALF_QUAD_WIDTH, height, anchor, uv))
        };
        debug!("Building shared chip/hold half-quad meshes.");
        Self {
            chip_left: half(CHIP_HEIGHT, Anchor::BottomRight, LEFT_UV),
            chip_right: half(CHIP_HEIGHT, Anchor::BottomLeft, RIGHT_UV),
            hold_left: half(HOLD_HEIGHT, Anchor::BottomRight, LEFT_UV),
            hold_right: half(HOLD_HEIGHT, Anchor::BottomLeft, RIGHT_UV),
        }
    }

    /// `(left, right)` halves for chips.
    #[inline(always)]
    pub fn chip_halves(&self) -> [&Rc<Mesh>; 2] {
        [&self.chip_left, &self.chip_right]
    }

    /// `(left, right)` halves for hold bodies and caps.
    #[inline(always)]
    pub fn hold_halves(&self) -> [&Rc<Mesh>; 2] {
        [&self.hold_left, &self.hold_right]
    }
}

impl Default for StaticMeshes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_meet_at_the_lane_center() {
        let statics = StaticMeshes::new();
        let (l_lo, l_hi) = statics.chip_left.x_bounds().expect("left verts");
        let (r_lo, r_hi) = statics.chip_right.x_bounds().expect("right verts");
        assert!((l_lo + HALF_QUAD_WIDTH).abs() <= f32::EPSILON && l_hi == 0.0);
        assert!(r_lo == 0.0 && (r_hi - HALF_QUAD_WIDTH).abs() <= f32::EPSILON);
    }

    #[test]
    fn hold_halves_span_one_unit_of_travel() {
        let statics = StaticMeshes::new();
        for mesh in statics.hold_halves() {
            let min_z = mesh.vertices.iter().map(|v| v.pos[2]).fold(0.0, f32::min);
            assert!((min_z + HOLD_HEIGHT).abs() <= f32::EPSILON, "got {min_z}");
        }
        for mesh in statics.chip_halves() {
            let min_z = mesh.vertices.iter().map(|v| v.pos[2]).fold(0.0, f32::min);
            assert!((min_z + CHIP_HEIGHT).abs() <= f32::EPSILON, "got {min_z}");
        }
    }

    #[test]
    fn uv_halves_do_not_overlap() {
        let statics = StaticMeshes::new();
        assert!(statics.hold_left.vertices.iter().all(|v| v.uv[0] <= 0.5));
        assert!(statics.hold_right.vertices.iter().all(|v| v.uv[0] >= 0.5));
    }
}
