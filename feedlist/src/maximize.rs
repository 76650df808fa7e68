use crate::MaximizeConfig;
use crate::key::ItemKey;

/// The currently maximized item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maximized<K> {
    pub key: K,
    /// Height override; `None` lets the intrinsic content size apply.
    pub height: Option<u32>,
    /// Whether `height` came from the caller rather than the policy.
    pub explicit: bool,
}

/// Result of a [`MaximizeController::toggle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaximizeChange<K> {
    /// The item that lost its maximized state, if any.
    pub previous: Option<K>,
    /// The item that is maximized now, if any.
    pub current: Option<K>,
    /// Height override of `current`.
    pub height: Option<u32>,
}

impl<K> MaximizeChange<K> {
    pub fn entered(&self) -> bool {
        self.current.is_some()
    }
}

/// Exclusive expand/collapse state: nothing maximized, or exactly one item.
#[derive(Clone, Debug)]
pub struct MaximizeController<K> {
    config: MaximizeConfig,
    state: Option<Maximized<K>>,
}

impl<K: ItemKey> MaximizeController<K> {
    pub fn new(config: MaximizeConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    pub fn config(&self) -> &MaximizeConfig {
        &self.config
    }

    pub fn maximized(&self) -> Option<&Maximized<K>> {
        self.state.as_ref()
    }

    pub fn maximized_key(&self) -> Option<&K> {
        self.state.as_ref().map(|m| &m.key)
    }

    pub fn is_maximized(&self, key: &K) -> bool {
        self.state.as_ref().is_some_and(|m| &m.key == key)
    }

    /// Toggles `key`.
    ///
    /// Toggling the maximized item collapses it; toggling any other item maximizes it and
    /// collapses the previous one. An `explicit_height` always overrides the policy;
    /// `Some(0)` asks for natural sizing (no override) regardless of the configured mode.
    pub fn toggle(
        &mut self,
        key: K,
        explicit_height: Option<u32>,
        container_height: u32,
    ) -> MaximizeChange<K> {
        let previous = self.state.take().map(|m| m.key);
        if previous.as_ref() == Some(&key) {
            vdebug!("MaximizeController::toggle: collapse");
            return MaximizeChange {
                previous,
                current: None,
                height: None,
            };
        }

        let explicit = explicit_height.is_some();
        let height = match explicit_height {
            Some(0) => None,
            Some(h) => Some(h),
            None => self.config.expanded_height(container_height),
        };
        vdebug!(height, explicit, "MaximizeController::toggle: maximize");
        self.state = Some(Maximized {
            key: key.clone(),
            height,
            explicit,
        });
        MaximizeChange {
            previous,
            current: Some(key),
            height,
        }
    }

    /// Recomputes a policy-derived height after the container changed.
    ///
    /// Returns the maximized key and its new height when the height changed.
    pub fn on_container_resize(&mut self, container_height: u32) -> Option<(K, Option<u32>)> {
        let state = self.state.as_mut()?;
        if state.explicit {
            return None;
        }
        let height = self.config.expanded_height(container_height);
        if height == state.height {
            return None;
        }
        state.height = height;
        Some((state.key.clone(), height))
    }

    /// Resets to "nothing maximized" and returns the key that was maximized.
    pub fn clear(&mut self) -> Option<K> {
        self.state.take().map(|m| m.key)
    }
}
