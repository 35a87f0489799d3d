use glam::{Mat4, Vec3};
use neurosonic_field::assets::ResourceManager;
use neurosonic_field::config;
use neurosonic_field::core::gfx::RenderQueue;
use neurosonic_field::game::chart::{AnalogObject, ButtonObject};
use neurosonic_field::game::curve::CurveShape;
use neurosonic_field::game::render_state::{Render, RenderState, SplitDraw, StaticMeshes};
use std::time::Instant;

// World units of track per measure at 1x scroll.
const UNITS_PER_MEASURE: f32 = 4.0;
// Lateral spacing between adjacent BT lanes.
const LANE_SPACING: f32 = 1.0 / 6.0;

fn demo_chart() -> (Vec<ButtonObject>, Vec<AnalogObject>) {
    let buttons = vec![
        ButtonObject::chip(0.0, 0),
        ButtonObject::chip(0.25, 1).with_sample(),
        ButtonObject::chip(0.5, 4),
        ButtonObject::hold(0.5, 1.0, 2),
        ButtonObject::hold(1.0, 0.5, 5),
    ];
    let analogs = vec![
        AnalogObject::segment(0.0, 0.5, 0, 0.0, 0.6),
        AnalogObject::slam(0.5, 0, 0.6, 0.1),
        AnalogObject::segment(0.25, 1.0, 1, 1.0, 0.3).with_shape(CurveShape::Cosine, 0.0, 0.0),
        AnalogObject::segment(1.25, 0.75, 1, 0.3, 0.9)
            .with_shape(CurveShape::ThreePoint, 0.2, 0.8)
            .with_range_extended(true),
        AnalogObject::slam(2.0, 1, 0.2, 0.9),
    ];
    (buttons, analogs)
}

fn lane_x(lane: u8) -> f32 {
    match lane {
        0..=3 => (f32::from(lane) - 1.5) * LANE_SPACING,
        // FX lanes sit centered over two BT lanes each.
        4 => -LANE_SPACING,
        _ => LANE_SPACING,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install logger immediately, then set runtime max level from config after loading it.
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .try_init();
    log::set_max_level(log::LevelFilter::Warn);

    config::load();
    let cfg = config::get();
    log::set_max_level(cfg.log_level.as_level_filter());

    let mut resources = ResourceManager::warmed();
    let statics = StaticMeshes::new();
    let (buttons, analogs) = demo_chart();

    let build_started = Instant::now();
    let mut states: Vec<(f32, f32, f32, RenderState<'_>)> = Vec::new();
    for b in &buttons {
        let state = RenderState::for_button(b, &mut resources, &statics);
        states.push((b.position as f32, b.duration as f32, lane_x(b.lane), state));
    }
    for a in &analogs {
        let state = RenderState::for_analog(a, cfg.laser_color(a.lane), &mut resources);
        states.push((a.position as f32, a.duration as f32, 0.0, state));
    }
    log::info!(
        "Built {} render states in {:?}",
        states.len(),
        build_started.elapsed()
    );

    // Judgement feedback: first hold released, right FX hold split for an effect.
    for (_, _, _, state) in &mut states {
        let released = matches!(&*state, RenderState::Hold(h) if h.object.lane == 2);
        let isolated = matches!(&*state, RenderState::Hold(h) if h.object.is_fx());
        if released && let Some(glow) = state.as_glowing_mut() {
            glow.set_glow_state(0);
        }
        if isolated && let Some(split) = state.as_split_drawable_mut() {
            split.set_split_draw(SplitDraw::Right);
        }
    }

    let mut queue = RenderQueue::with_capacity(states.len() * 6);
    let frame_started = Instant::now();
    for (position, duration, x, state) in &states {
        let world = Mat4::from_translation(Vec3::new(*x, 0.0, -position * UNITS_PER_MEASURE));
        // Slams get a fixed visual length; everything else spans its duration.
        let len = if *duration > 0.0 {
            duration * UNITS_PER_MEASURE
        } else {
            0.25
        };
        state.render(&mut queue, world, len);
    }
    log::info!(
        "Queued {} drawables for {} objects in {:?}",
        queue.len(),
        states.len(),
        frame_started.elapsed()
    );

    for item in queue.iter() {
        log::debug!(
            "{} / {} ({} verts, {:?})",
            item.drawable.material.key,
            item.drawable.texture.key,
            item.drawable.mesh.vertex_count(),
            item.drawable.blend
        );
    }
    Ok(())
}
