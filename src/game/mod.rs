pub mod chart;
pub mod curve;
pub mod render_state;
pub mod scores;
