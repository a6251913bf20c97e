//! Dashboard application state.

use std::time::Instant;

use crate::assets::AssetStatus;
use crate::config::DashboardConfig;
use crate::grid::GridSnapshot;
use crate::model::LoadPredictor;
use crate::sensor::{SensorReading, SimulatedSensor};
use crate::session::{Session, unix_now};

/// Refresh interval multipliers (slowest → fastest).
const SPEED_FACTORS: [f64; 5] = [4.0, 2.0, 1.0, 0.5, 0.25];

/// Default speed index (configured `refresh_ms`).
const DEFAULT_SPEED_IDX: usize = 2;

/// Columns in the device grid.
pub const GRID_COLUMNS: usize = 4;

/// TUI application state.
pub struct App {
    config: DashboardConfig,
    predictor: Box<dyn LoadPredictor>,
    sensor: SimulatedSensor,
    /// Tracked devices and power history.
    pub session: Session,
    /// User-controlled reading; drift samples around it.
    pub set_point: SensorReading,
    /// Result of the latest refresh.
    pub snapshot: GridSnapshot,
    /// Circuit diagram probe result.
    pub asset: AssetStatus,
    /// Name of the active preset.
    pub preset_name: String,
    /// Index of the highlighted device.
    pub selected: usize,
    /// Text being typed for a new device, when in add mode.
    pub input: Option<String>,
    /// Whether ticks jitter the reading and refresh automatically.
    pub drifting: bool,
    /// Current index into `SPEED_FACTORS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last automatic refresh ran.
    pub last_tick: Instant,
}

impl App {
    /// Creates the app and runs the first refresh.
    ///
    /// `config` must already be validated.
    pub fn new(
        config: DashboardConfig,
        predictor: Box<dyn LoadPredictor>,
        asset: AssetStatus,
        preset_name: impl Into<String>,
    ) -> Self {
        let mut session = Session::from_config(&config);
        let set_point = config.default_reading();
        let snapshot = session.refresh(predictor.as_ref(), set_point, unix_now());
        Self {
            sensor: config.simulated_sensor(),
            config,
            predictor,
            session,
            set_point,
            snapshot,
            asset,
            preset_name: preset_name.into(),
            selected: 0,
            input: None,
            drifting: true,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Re-evaluates at the current set point.
    pub fn refresh(&mut self) {
        self.refresh_with(self.set_point);
    }

    fn refresh_with(&mut self, reading: SensorReading) {
        self.snapshot = self
            .session
            .refresh(self.predictor.as_ref(), reading, unix_now());
        let len = self.session.devices().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Applies startup overrides and restarts the history from them.
    ///
    /// The sample recorded by [`App::new`] at the config default is dropped,
    /// so the chart starts at `reading` with the edited device list.
    pub fn start_with(&mut self, reading: SensorReading, remove: &[String], add: &[String]) {
        self.set_point = reading;
        for name in remove {
            self.session.remove_device(name);
        }
        for name in add {
            self.session.add_device(name);
        }
        self.session.clear_history();
        self.refresh();
    }

    /// Automatic refresh: samples the simulated sensor around the set point.
    pub fn tick(&mut self) {
        let reading = self.sensor.sample(self.set_point);
        self.refresh_with(reading);
    }

    /// Moves the voltage set point by `steps` increments and refreshes.
    pub fn nudge_voltage(&mut self, steps: f32) {
        self.set_point
            .nudge_voltage(&self.config.sensors.voltage, steps);
        self.refresh();
    }

    /// Moves the amperage set point by `steps` increments and refreshes.
    pub fn nudge_amperage(&mut self, steps: f32) {
        self.set_point
            .nudge_amperage(&self.config.sensors.amperage, steps);
        self.refresh();
    }

    /// Enters add-device mode with an empty buffer.
    pub fn begin_input(&mut self) {
        self.input = Some(String::new());
    }

    /// Appends a typed character to the add buffer.
    pub fn push_char(&mut self, c: char) {
        if let Some(buf) = &mut self.input {
            buf.push(c);
        }
    }

    /// Deletes the last character of the add buffer.
    pub fn pop_char(&mut self) {
        if let Some(buf) = &mut self.input {
            buf.pop();
        }
    }

    /// Leaves add mode without adding.
    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    /// Adds the buffered name (ignored when empty or duplicate) and refreshes.
    pub fn submit_input(&mut self) {
        let Some(name) = self.input.take() else {
            return;
        };
        if self.session.add_device(&name) {
            self.selected = self.session.devices().len() - 1;
        }
        self.refresh();
    }

    /// Highlights the next device, wrapping around.
    pub fn select_next(&mut self) {
        let len = self.session.devices().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Highlights the previous device, wrapping around.
    pub fn select_prev(&mut self) {
        let len = self.session.devices().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Removes the highlighted device and refreshes.
    pub fn remove_selected(&mut self) {
        let Some(name) = self.session.devices().names().get(self.selected).cloned() else {
            return;
        };
        self.session.remove_device(&name);
        self.refresh();
    }

    /// Toggles automatic drift refreshes.
    pub fn toggle_drift(&mut self) {
        self.drifting = !self.drifting;
    }

    /// Shortens the automatic refresh interval.
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_FACTORS.len() {
            self.speed_idx += 1;
        }
    }

    /// Lengthens the automatic refresh interval.
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Returns the current automatic refresh interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        let ms = self.config.simulation.refresh_ms as f64 * SPEED_FACTORS[self.speed_idx];
        (ms as u64).max(1)
    }

    /// Switches to a different preset, keeping the loaded model.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(mut config) = DashboardConfig::from_preset(name) else {
            return;
        };
        config.model = self.config.model.clone();
        config.assets = self.config.assets.clone();
        self.session = Session::from_config(&config);
        self.sensor = config.simulated_sensor();
        self.set_point = config.default_reading();
        self.config = config;
        self.preset_name = name.to_string();
        self.selected = 0;
        self.input = None;
        self.refresh();
    }

    /// Restores the seeded session and default reading.
    pub fn reset(&mut self) {
        self.session.reset();
        self.sensor = self.config.simulated_sensor();
        self.set_point = self.config.default_reading();
        self.selected = 0;
        self.input = None;
        self.refresh();
    }

    /// Returns `true` while the add-device prompt is open.
    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::LoadPrediction;

    fn app_with(label: &'static str) -> App {
        App::new(
            DashboardConfig::home(),
            Box::new(move |_: f32, _: f32| LoadPrediction::new(label)),
            AssetStatus::Disabled,
            "home",
        )
    }

    /// High above 20 A, Low otherwise.
    fn amps_app() -> App {
        App::new(
            DashboardConfig::home(),
            Box::new(|_: f32, a: f32| LoadPrediction::new(if a > 20.0 { "High" } else { "Low" })),
            AssetStatus::Disabled,
            "home",
        )
    }

    #[test]
    fn new_runs_first_refresh() {
        let app = app_with("Low");
        assert_eq!(app.session.history().len(), 1);
        assert_eq!(app.snapshot.devices.len(), 3);
        assert_eq!(app.snapshot.reading, SensorReading::new(230.0, 5.0));
    }

    #[test]
    fn startup_overrides_replace_default_sample() {
        let mut app = amps_app();
        app.start_with(
            SensorReading::new(230.0, 25.0),
            &["Refrigerator".to_string()],
            &["Oven".to_string()],
        );
        assert_eq!(app.session.history().len(), 1);
        let latest = app.session.history().latest().map(|s| s.power_w);
        assert_eq!(latest, Some(230.0 * 25.0));
        assert_eq!(app.snapshot.devices.len(), 3);
        assert_eq!(app.snapshot.saved_w, 4000);
    }

    #[test]
    fn every_interaction_appends_one_sample() {
        let mut app = app_with("Low");
        app.nudge_voltage(1.0);
        app.nudge_amperage(-1.0);
        app.tick();
        assert_eq!(app.session.history().len(), 4);
    }

    #[test]
    fn history_caps_at_configured_len() {
        let mut app = app_with("Low");
        for _ in 0..50 {
            app.tick();
        }
        assert_eq!(app.session.history().len(), 20);
    }

    #[test]
    fn raising_amperage_triggers_shedding() {
        let mut app = amps_app();
        assert_eq!(app.snapshot.saved_w, 0);
        for _ in 0..40 {
            app.nudge_amperage(1.0);
        }
        assert!(app.snapshot.prediction.is_high());
        assert_eq!(app.snapshot.saved_w, 2000);
    }

    #[test]
    fn add_mode_appends_device() {
        let mut app = app_with("High");
        app.begin_input();
        for c in "Oven".chars() {
            app.push_char(c);
        }
        app.submit_input();
        assert!(!app.is_editing());
        assert_eq!(app.session.devices().len(), 4);
        assert_eq!(app.selected, 3);
        assert_eq!(app.snapshot.saved_w, 4000);
    }

    #[test]
    fn empty_or_duplicate_submit_is_no_op() {
        let mut app = app_with("Low");
        app.begin_input();
        app.submit_input();
        app.begin_input();
        for c in "Refrigerator".chars() {
            app.push_char(c);
        }
        app.submit_input();
        assert_eq!(app.session.devices().len(), 3);
    }

    #[test]
    fn cancel_and_backspace() {
        let mut app = app_with("Low");
        app.begin_input();
        app.push_char('x');
        app.push_char('y');
        app.pop_char();
        assert_eq!(app.input.as_deref(), Some("x"));
        app.cancel_input();
        assert!(!app.is_editing());
    }

    #[test]
    fn remove_selected_keeps_selection_in_range() {
        let mut app = app_with("Low");
        app.select_prev();
        assert_eq!(app.selected, 2);
        app.remove_selected();
        assert_eq!(app.session.devices().len(), 2);
        assert_eq!(app.selected, 1);
        app.remove_selected();
        app.remove_selected();
        assert!(app.session.devices().is_empty());
        app.remove_selected();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn selection_wraps() {
        let mut app = app_with("Low");
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn speed_controls_stay_in_bounds() {
        let mut app = app_with("Low");
        assert_eq!(app.tick_interval_ms(), 1000);
        for _ in 0..10 {
            app.speed_down();
        }
        assert_eq!(app.speed_idx, 0);
        assert_eq!(app.tick_interval_ms(), 4000);
        for _ in 0..10 {
            app.speed_up();
        }
        assert_eq!(app.speed_idx, SPEED_FACTORS.len() - 1);
        assert_eq!(app.tick_interval_ms(), 250);
    }

    #[test]
    fn switch_preset_resets_state() {
        let mut app = app_with("Low");
        app.tick();
        app.switch_preset("heatwave");
        assert_eq!(app.preset_name, "heatwave");
        assert_eq!(app.session.devices().len(), 4);
        assert_eq!(app.session.history().len(), 1);
        assert_eq!(app.set_point.amperage, 22.0);
    }

    #[test]
    fn unknown_preset_is_ignored() {
        let mut app = app_with("Low");
        app.switch_preset("bogus");
        assert_eq!(app.preset_name, "home");
    }

    #[test]
    fn reset_restores_seed() {
        let mut app = app_with("Low");
        app.remove_selected();
        app.nudge_voltage(5.0);
        app.reset();
        assert_eq!(app.session.devices().len(), 3);
        assert_eq!(app.set_point, SensorReading::new(230.0, 5.0));
        assert_eq!(app.session.history().len(), 1);
    }

    #[test]
    fn toggle_drift() {
        let mut app = app_with("Low");
        assert!(app.drifting);
        app.toggle_drift();
        assert!(!app.drifting);
    }
}
