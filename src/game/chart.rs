use crate::game::curve::CurveShape;
use serde::{Deserialize, Serialize};

/// Lanes 0..4 are BT buttons, everything from here up is an FX lane.
pub const BUTTON_LANE_COUNT: u8 = 4;

/// Chart position and length are measured in measures.
pub type ChartTime = f64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonKind {
    Chip,
    Hold,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ButtonObject {
    pub position: ChartTime,
    pub duration: ChartTime,
    pub lane: u8,
    pub kind: ButtonKind,
    /// Keysound attached; chips with one use the "_sample" texture.
    pub has_sample: bool,
}

impl ButtonObject {
    pub fn chip(position: ChartTime, lane: u8) -> Self {
        Self {
            position,
            duration: 0.0,
            lane,
            kind: ButtonKind::Chip,
            has_sample: false,
        }
    }

    pub fn hold(position: ChartTime, duration: ChartTime, lane: u8) -> Self {
        Self {
            position,
            duration,
            lane,
            kind: ButtonKind::Hold,
            has_sample: false,
        }
    }

    pub fn with_sample(mut self) -> Self {
        self.has_sample = true;
        self
    }

    #[inline(always)]
    pub fn is_chip(&self) -> bool {
        self.kind == ButtonKind::Chip
    }

    #[inline(always)]
    pub fn is_hold(&self) -> bool {
        self.kind == ButtonKind::Hold
    }

    #[inline(always)]
    pub fn is_fx(&self) -> bool {
        self.lane >= BUTTON_LANE_COUNT
    }

    /// Lane width multiplier: BT lanes are one unit wide, FX lanes two.
    #[inline(always)]
    pub fn width_class(&self) -> u8 {
        if self.is_fx() { 2 } else { 1 }
    }
}

/// One laser node pair: a slam when `instant`, otherwise a segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalogObject {
    pub position: ChartTime,
    pub duration: ChartTime,
    /// 0 = left laser, 1 = right laser.
    pub lane: u8,
    pub initial_value: f32,
    pub final_value: f32,
    pub instant: bool,
    /// Doubles the lateral travel range.
    pub range_extended: bool,
    pub shape: CurveShape,
    pub curve_a: f32,
    pub curve_b: f32,
}

impl AnalogObject {
    pub fn slam(position: ChartTime, lane: u8, initial_value: f32, final_value: f32) -> Self {
        Self {
            position,
            duration: 0.0,
            lane,
            initial_value,
            final_value,
            instant: true,
            range_extended: false,
            shape: CurveShape::Linear,
            curve_a: 0.0,
            curve_b: 0.0,
        }
    }

    pub fn segment(
        position: ChartTime,
        duration: ChartTime,
        lane: u8,
        initial_value: f32,
        final_value: f32,
    ) -> Self {
        Self {
            position,
            duration,
            lane,
            initial_value,
            final_value,
            instant: false,
            range_extended: false,
            shape: CurveShape::Linear,
            curve_a: 0.0,
            curve_b: 0.0,
        }
    }

    pub fn with_shape(mut self, shape: CurveShape, curve_a: f32, curve_b: f32) -> Self {
        self.shape = shape;
        self.curve_a = curve_a;
        self.curve_b = curve_b;
        self
    }

    pub fn with_range_extended(mut self, range_extended: bool) -> Self {
        self.range_extended = range_extended;
        self
    }

    #[inline(always)]
    pub fn is_instant(&self) -> bool {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_class_splits_bt_and_fx_lanes() {
        for lane in 0..BUTTON_LANE_COUNT {
            assert_eq!(ButtonObject::chip(0.0, lane).width_class(), 1, "lane {lane}");
        }
        for lane in BUTTON_LANE_COUNT..8 {
            assert_eq!(ButtonObject::hold(0.0, 1.0, lane).width_class(), 2, "lane {lane}");
        }
    }

    #[test]
    fn builders_set_kind_flags() {
        let chip = ButtonObject::chip(1.0, 2).with_sample();
        assert!(chip.is_chip() && chip.has_sample && !chip.is_hold());
        let slam = AnalogObject::slam(0.0, 0, 0.0, 1.0);
        assert!(slam.is_instant());
        let seg = AnalogObject::segment(0.0, 0.5, 1, 1.0, 0.0)
            .with_shape(CurveShape::ThreePoint, 0.2, 0.9)
            .with_range_extended(true);
        assert!(!seg.is_instant() && seg.range_extended);
        assert_eq!(seg.shape, CurveShape::ThreePoint);
    }

    #[test]
    fn analog_objects_roundtrip_through_json() {
        let seg = AnalogObject::segment(4.0, 0.25, 1, 0.2, 0.8).with_shape(CurveShape::Cosine, 0.0, 0.0);
        let json = serde_json::to_string(&seg).expect("serialize analog");
        let back: AnalogObject = serde_json::from_str(&json).expect("deserialize analog");
        assert_eq!(back, seg);
    }
}
