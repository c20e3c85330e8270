//! Short-lived cache of the vendor's device listing.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::device::Device;
use crate::plugin::AvailableDevice;

/// Device views, power states and the time of the last refresh attempt.
///
/// The cache has no locking of its own; [`crate::LifxBridge`] keeps the
/// whole struct behind one mutex so a refresh is never observed half
/// applied.
#[derive(Debug, Default, Clone)]
pub struct DeviceCache {
    available: Vec<AvailableDevice>,
    states: HashMap<String, bool>,
    last_refresh: Option<Instant>,
}

impl DeviceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no refresh was ever attempted or the last attempt is older
    /// than `interval`.
    pub fn is_stale(&self, interval: Duration) -> bool {
        match self.last_refresh {
            None => true,
            Some(at) => at.elapsed() > interval,
        }
    }

    /// Record a refresh attempt. Called before the vendor is contacted, so a
    /// failing vendor is not asked again until the interval passes.
    pub fn mark_attempt(&mut self) {
        self.last_refresh = Some(Instant::now());
    }

    /// Forget the attempt time so the next read refreshes. Cached data stays.
    pub fn invalidate(&mut self) {
        self.last_refresh = None;
    }

    pub fn since_refresh(&self) -> Option<Duration> {
        self.last_refresh.map(|at| at.elapsed())
    }

    /// Apply a full vendor listing.
    ///
    /// The device views are rebuilt from scratch. Power states are
    /// overwritten for every listed device; entries for devices missing from
    /// the listing are left as they were. Entries without an id are skipped.
    pub fn replace(&mut self, devices: &[Device]) {
        let listed = devices.iter().filter(|device| !device.id.is_empty());

        self.available.clear();
        for device in listed {
            self.available.push(device.available());
            self.states.insert(device.id.clone(), device.power.is_on());
        }
    }

    pub fn set_power(&mut self, id: &str, on: bool) {
        self.states.insert(id.to_string(), on);
    }

    /// Cached power of `id`; unknown devices are off.
    pub fn power(&self, id: &str) -> bool {
        self.states.get(id).copied().unwrap_or(false)
    }

    pub fn available(&self) -> &[AvailableDevice] {
        &self.available
    }

    pub fn states(&self) -> &HashMap<String, bool> {
        &self.states
    }

    /// Number of devices with a known power state.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Product;
    use crate::types::PowerState;

    fn device(id: &str, power: PowerState) -> Device {
        Device {
            id: id.to_string(),
            power,
            product: Product {
                company: "LIFX".into(),
                name: "A19".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_fresh_cache_is_stale() {
        let cache = DeviceCache::new();
        assert!(cache.is_stale(Duration::from_secs(30)));
        assert!(cache.since_refresh().is_none());
    }

    #[test]
    fn test_attempt_suppresses_refresh() {
        let mut cache = DeviceCache::new();
        cache.mark_attempt();
        assert!(!cache.is_stale(Duration::from_secs(30)));

        cache.invalidate();
        assert!(cache.is_stale(Duration::from_secs(30)));
    }

    #[test]
    fn test_attempt_expires() {
        let mut cache = DeviceCache::new();
        cache.mark_attempt();
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.is_stale(Duration::from_millis(1)));
    }

    #[test]
    fn test_replace_overwrites_states() {
        let mut cache = DeviceCache::new();
        cache.replace(&[
            device("d1", PowerState::On),
            device("d2", PowerState::Off),
            device("d3", PowerState::Unknown),
        ]);

        assert_eq!(cache.len(), 3);
        assert!(cache.power("d1"));
        assert!(!cache.power("d2"));
        assert!(!cache.power("d3"));
        assert_eq!(cache.available().len(), 3);
        assert_eq!(cache.available()[0].unique_id, "d1");
    }

    #[test]
    fn test_replace_keeps_vanished_states() {
        let mut cache = DeviceCache::new();
        cache.replace(&[device("d1", PowerState::On), device("d2", PowerState::On)]);
        cache.replace(&[device("d2", PowerState::Off)]);

        assert_eq!(cache.available().len(), 1);
        assert!(cache.power("d1"));
        assert!(!cache.power("d2"));
    }

    #[test]
    fn test_replace_skips_missing_ids() {
        let mut cache = DeviceCache::new();
        cache.replace(&[device("", PowerState::On), device("d1", PowerState::Off)]);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.available().len(), 1);
        assert_eq!(cache.available()[0].unique_id, "d1");
        assert!(!cache.states().contains_key(""));
    }

    #[test]
    fn test_unknown_device_is_off() {
        let mut cache = DeviceCache::new();
        assert!(!cache.power("missing"));

        cache.set_power("d1", true);
        assert!(cache.power("d1"));
        assert!(!cache.power("missing"));
    }
}
