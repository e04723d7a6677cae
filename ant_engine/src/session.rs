// session.rs - One running simulation: engine, rate controller, active configuration

use std::sync::Arc;
use std::time::Duration;

use crate::config::{self, Configuration};
use crate::engine::Engine;
use crate::error::Result;
use crate::presets::PRESETS;
use crate::rate::{DEFAULT_RATE, RateController};

/// Where the engine's default configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveConfig {
    Preset(usize),
    /// Loaded from text; holds the configuration's name.
    Custom(String),
}

pub struct Session {
    engine: Engine,
    rate: RateController,
    active: ActiveConfig,
}

impl Session {
    /// Paused session on the first preset at the default rate.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let config = Arc::new(PRESETS[0].build()?);
        Ok(Self {
            engine: Engine::new(config, width, height),
            rate: RateController::new(DEFAULT_RATE),
            active: ActiveConfig::Preset(0),
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn rate(&self) -> &RateController {
        &self.rate
    }

    pub fn active(&self) -> &ActiveConfig {
        &self.active
    }

    /// Apply a built-in preset; resets the grid and ants. Unknown indices
    /// are ignored.
    pub fn select_preset(&mut self, index: usize) -> Result<()> {
        let Some(preset) = PRESETS.get(index) else {
            return Ok(());
        };
        self.apply(Arc::new(preset.build()?), ActiveConfig::Preset(index));
        Ok(())
    }

    /// Parse, validate and apply configuration text. On error nothing
    /// changes.
    pub fn load_config(&mut self, text: &str) -> Result<Arc<Configuration>> {
        let config = Arc::new(config::parse(text)?);
        let name = config.name().to_owned();
        self.apply(Arc::clone(&config), ActiveConfig::Custom(name));
        Ok(config)
    }

    /// Canonical text of the current default configuration.
    pub fn export_config(&self) -> Result<String> {
        self.engine.config().to_json()
    }

    fn apply(&mut self, config: Arc<Configuration>, active: ActiveConfig) {
        self.engine.set_config(config);
        self.active = active;
    }

    pub fn add_ant(&mut self, x: i64, y: i64) -> usize {
        self.engine.add_ant(x, y, None)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.engine.resize(width, height);
    }

    pub fn clear(&mut self) {
        self.engine.clear();
    }

    /// Single manual step, allowed while paused.
    pub fn step(&mut self) {
        self.engine.step();
    }

    pub fn is_running(&self) -> bool {
        !self.rate.is_paused()
    }

    pub fn play(&mut self) {
        self.rate.resume();
    }

    pub fn pause(&mut self) {
        self.rate.pause();
    }

    pub fn toggle_running(&mut self) {
        self.rate.toggle();
    }

    pub fn set_slider(&mut self, value: u32) {
        self.rate.set_slider(value);
    }

    pub fn set_rate(&mut self, steps_per_second: u32) {
        self.rate.set_rate(steps_per_second);
    }

    pub fn slider(&self) -> u32 {
        self.rate.slider()
    }

    pub fn steps_per_second(&self) -> u32 {
        self.rate.steps_per_second()
    }

    /// Called once per rendered frame with the time since the previous one.
    pub fn frame(&mut self, elapsed: Duration) -> u64 {
        self.rate.catch_up(elapsed, &mut self.engine)
    }

    pub async fn run_for(&mut self, duration: Duration) -> u64 {
        self.rate.run_for(&mut self.engine, duration).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::grid::CELL_SIZE;

    fn session() -> Session {
        Session::new(20 * CELL_SIZE, 20 * CELL_SIZE).unwrap()
    }

    #[test]
    fn starts_paused_on_first_preset() {
        let session = session();
        assert!(!session.is_running());
        assert_eq!(session.active(), &ActiveConfig::Preset(0));
        assert_eq!(session.steps_per_second(), DEFAULT_RATE);
        assert_eq!(session.engine().config().name(), PRESETS[0].name);
    }

    #[test]
    fn preset_selection_resets() {
        let mut session = session();
        session.add_ant(10, 10);
        session.step();
        session.select_preset(2).unwrap();
        assert_eq!(session.active(), &ActiveConfig::Preset(2));
        assert!(session.engine().ants().is_empty());
        assert_eq!(session.engine().grid().painted().count(), 0);

        session.select_preset(999).unwrap();
        assert_eq!(session.active(), &ActiveConfig::Preset(2));
    }

    #[test]
    fn load_and_export_round_trip() {
        let mut session = session();
        let text = PRESETS[1].build().unwrap().to_json().unwrap();
        let loaded = session.load_config(&text).unwrap();
        assert_eq!(session.active(), &ActiveConfig::Custom("RLR".into()));
        assert_eq!(session.export_config().unwrap(), text);
        assert_eq!(loaded.colors(), 3);
    }

    #[test]
    fn rejected_text_changes_nothing() {
        let mut session = session();
        session.add_ant(3, 3);
        let err = session.load_config("{\"name\": \"x\", \"colors\": 0}").unwrap_err();
        assert_eq!(err, ConfigError::InvalidColorCount);
        assert_eq!(session.engine().ants().len(), 1);
        assert_eq!(session.active(), &ActiveConfig::Preset(0));
    }

    #[test]
    fn frames_only_step_while_running() {
        let mut session = session();
        session.add_ant(10, 10);
        assert_eq!(session.frame(Duration::from_secs(1)), 0);

        session.play();
        let ran: u64 = (0..20).map(|_| session.frame(Duration::from_millis(50))).sum();
        assert_eq!(ran, u64::from(DEFAULT_RATE));
        assert_eq!(session.engine().steps(), ran);

        session.toggle_running();
        assert!(!session.is_running());
    }

    #[test]
    fn slider_sets_rate() {
        let mut session = session();
        session.set_slider(60);
        assert_eq!(session.steps_per_second(), 1000);
        assert_eq!(session.slider(), 60);
    }
}
