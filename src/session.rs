//! Per-session dashboard state: tracked devices and power history.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::grid::{GridSnapshot, evaluate};
use crate::model::LoadPredictor;
use crate::sensor::SensorReading;

/// Devices every new session starts with.
pub const SEED_DEVICES: [&str; 3] = ["Medical Monitor", "Refrigerator", "Air Conditioner"];

/// Default number of power samples kept for the chart.
pub const DEFAULT_HISTORY_LEN: usize = 20;

/// Current wall-clock time in Unix seconds, for [`PowerSample::timestamp`].
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}

/// Ordered set of device names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedDevices {
    names: Vec<String>,
}

impl TrackedDevices {
    /// Builds a collection from `names`, dropping empties and duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut devices = Self::default();
        for name in names {
            devices.add(name);
        }
        devices
    }

    /// Appends `name` unless it is empty or already tracked.
    ///
    /// Returns `true` when the collection changed.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Removes `name` if tracked. Returns `true` when the collection changed.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(pos) = self.names.iter().position(|n| n == name) else {
            return false;
        };
        self.names.remove(pos);
        true
    }

    /// Returns `true` if `name` is tracked (exact, case-sensitive match).
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Tracked names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of tracked devices.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One point on the power chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerSample {
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    /// Live power draw (W).
    pub power_w: f32,
}

/// Rolling FIFO of the most recent power samples.
#[derive(Debug, Clone)]
pub struct PowerHistory {
    samples: VecDeque<PowerSample>,
    capacity: usize,
}

impl PowerHistory {
    /// Creates an empty history holding at most `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be > 0");
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a sample, evicting the oldest when full.
    pub fn push(&mut self, sample: PowerSample) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Iterates samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PowerSample> {
        self.samples.iter()
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<&PowerSample> {
        self.samples.back()
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` when no samples are held.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// State of one interactive session.
///
/// Created with seeded devices and an empty history; discarded when the
/// session ends. Every refresh runs one synchronous decision pass.
#[derive(Debug, Clone)]
pub struct Session {
    seed: Vec<String>,
    devices: TrackedDevices,
    history: PowerHistory,
}

impl Session {
    /// Creates a session seeded with `seed_devices`.
    ///
    /// # Panics
    ///
    /// Panics if `history_len` is zero.
    pub fn new<I, S>(seed_devices: I, history_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let devices = TrackedDevices::from_names(seed_devices);
        Self {
            seed: devices.names().to_vec(),
            devices,
            history: PowerHistory::new(history_len),
        }
    }

    /// Creates a session from a validated configuration.
    pub fn from_config(cfg: &DashboardConfig) -> Self {
        Self::new(cfg.session.devices.iter().cloned(), cfg.session.history_len)
    }

    /// Tracked devices.
    pub fn devices(&self) -> &TrackedDevices {
        &self.devices
    }

    /// Power history.
    pub fn history(&self) -> &PowerHistory {
        &self.history
    }

    /// Starts tracking `name`; empty or duplicate names are ignored.
    pub fn add_device(&mut self, name: &str) -> bool {
        let added = self.devices.add(name);
        if added {
            info!(device = name, "device added");
        } else {
            debug!(device = name, "ignored empty or duplicate device");
        }
        added
    }

    /// Stops tracking `name`.
    pub fn remove_device(&mut self, name: &str) -> bool {
        let removed = self.devices.remove(name);
        if removed {
            info!(device = name, "device removed");
        }
        removed
    }

    /// Runs one refresh pass and records its power sample.
    pub fn refresh<P>(&mut self, predictor: &P, reading: SensorReading, timestamp: f64) -> GridSnapshot
    where
        P: LoadPredictor + ?Sized,
    {
        let prediction = predictor.predict(reading.voltage, reading.amperage);
        let snapshot = evaluate(prediction, reading, self.devices.names());
        self.history.push(PowerSample {
            timestamp,
            power_w: snapshot.power_w,
        });
        debug!(
            power_w = snapshot.power_w,
            prediction = %snapshot.prediction,
            saved_w = snapshot.saved_w,
            "refreshed"
        );
        snapshot
    }

    /// Drops all recorded power samples, keeping the device list.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Restores the seeded device list and clears history.
    pub fn reset(&mut self) {
        self.devices = TrackedDevices::from_names(self.seed.iter().cloned());
        self.history.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SEED_DEVICES, DEFAULT_HISTORY_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::LoadPrediction;

    fn always(label: &'static str) -> impl Fn(f32, f32) -> LoadPrediction {
        move |_, _| LoadPrediction::new(label)
    }

    #[test]
    fn default_session_has_three_seed_devices() {
        let s = Session::default();
        assert_eq!(s.devices().names(), SEED_DEVICES);
        assert!(s.history().is_empty());
        assert_eq!(s.history().capacity(), 20);
    }

    #[test]
    fn duplicate_and_empty_adds_are_no_ops() {
        let mut s = Session::default();
        let before = s.devices().clone();
        assert!(!s.add_device("Refrigerator"));
        assert!(!s.add_device(""));
        assert_eq!(s.devices(), &before);
    }

    #[test]
    fn add_appends_and_remove_deletes_by_name() {
        let mut s = Session::default();
        assert!(s.add_device("Tesla Charger"));
        assert_eq!(s.devices().names().last().map(String::as_str), Some("Tesla Charger"));
        assert!(s.remove_device("Refrigerator"));
        assert!(!s.remove_device("Refrigerator"));
        assert_eq!(
            s.devices().names(),
            ["Medical Monitor", "Air Conditioner", "Tesla Charger"]
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut d = TrackedDevices::default();
        assert!(d.add("Oven"));
        assert!(d.add("oven"));
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn from_names_drops_duplicates() {
        let d = TrackedDevices::from_names(["a", "b", "a", "", "c"]);
        assert_eq!(d.names(), ["a", "b", "c"]);
    }

    #[test]
    fn history_caps_and_evicts_oldest() {
        let mut h = PowerHistory::new(20);
        for i in 0..25 {
            h.push(PowerSample {
                timestamp: f64::from(i),
                power_w: i as f32,
            });
            assert!(h.len() <= 20);
        }
        assert_eq!(h.len(), 20);
        assert_eq!(h.iter().next().map(|s| s.timestamp), Some(5.0));
        assert_eq!(h.latest().map(|s| s.timestamp), Some(24.0));
    }

    #[test]
    #[should_panic]
    fn zero_capacity_history_panics() {
        PowerHistory::new(0);
    }

    #[test]
    fn refresh_records_one_sample_per_pass() {
        let mut s = Session::default();
        let reading = SensorReading::new(230.0, 5.0);
        for t in 0..30 {
            s.refresh(&always("Low"), reading, f64::from(t));
        }
        assert_eq!(s.history().len(), 20);
        assert_eq!(s.history().latest().map(|p| p.timestamp), Some(29.0));
    }

    #[test]
    fn refresh_sheds_under_high_prediction() {
        let mut s = Session::default();
        let snapshot = s.refresh(&always("High"), SensorReading::new(240.0, 28.0), 0.0);
        assert_eq!(snapshot.saved_w, 2000);
        assert_eq!(snapshot.shed_count(), 1);

        let snapshot = s.refresh(&always("Low"), SensorReading::new(240.0, 28.0), 1.0);
        assert_eq!(snapshot.saved_w, 0);
    }

    #[test]
    fn refresh_accepts_trait_objects() {
        let predictor: Box<dyn LoadPredictor> = Box::new(always("High"));
        let mut s = Session::default();
        let snapshot = s.refresh(predictor.as_ref(), SensorReading::new(230.0, 5.0), 0.0);
        assert!(snapshot.prediction.is_high());
    }

    #[test]
    fn clear_history_keeps_devices() {
        let mut s = Session::default();
        s.add_device("Oven");
        s.refresh(&always("Low"), SensorReading::new(230.0, 5.0), 0.0);
        s.clear_history();
        assert!(s.history().is_empty());
        assert_eq!(s.devices().len(), 4);
    }

    #[test]
    fn reset_restores_seed_and_clears_history() {
        let mut s = Session::new(["Oven", "Fan"], 5);
        s.add_device("Heater");
        s.remove_device("Oven");
        s.refresh(&always("Low"), SensorReading::new(230.0, 5.0), 0.0);
        s.reset();
        assert_eq!(s.devices().names(), ["Oven", "Fan"]);
        assert!(s.history().is_empty());
    }
}
