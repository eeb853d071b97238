// Bot pipeline: trigger matching and the polling cycle around the engine.

pub mod cycle;
pub mod trigger;
