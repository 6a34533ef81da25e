// Change notification and cached color state
//
// The ChangeNotifier fans configuration saves out to registered color listeners
// and to any number of tokio broadcast subscribers.

use crate::models::{AtcfColorSelections, AtcfCustomColors};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Format a configuration object was persisted in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveFormat {
    Text,
    Xml,
}

/// Events emitted when configuration in the store changes
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigChange {
    /// A configuration file was written
    Saved { path: String, format: SaveFormat },

    /// The XML copy of a legacy file was (re)generated
    Converted { path: String },

    /// Custom colors or color selections changed
    ColorsChanged,

    /// An objective aid profile was removed
    ProfileDeleted { name: String },
}

/// Receives a callback whenever color configuration is saved
pub trait ColorConfigurationListener: Send + Sync {
    fn colors_changed(&self);
}

type ListenerList = Arc<Vec<Arc<dyn ColorConfigurationListener>>>;

/// Copy-on-write listener set plus a broadcast channel
///
/// Notification iterates a snapshot of the listener list, so listeners may
/// add or remove listeners from inside their callback.
pub struct ChangeNotifier {
    listeners: RwLock<ListenerList>,
    change_tx: broadcast::Sender<ConfigChange>,
}

impl ChangeNotifier {
    /// Create a notifier with a broadcast buffer of 100 events
    pub fn new() -> Self {
        let (change_tx, _) = broadcast::channel(100);
        Self {
            listeners: RwLock::new(Arc::new(Vec::new())),
            change_tx,
        }
    }

    /// Subscribe to all future configuration changes
    pub fn subscribe(&self) -> broadcast::Receiver<ConfigChange> {
        self.change_tx.subscribe()
    }

    /// Register a listener. Registering the same listener twice is a no-op.
    pub fn add_color_listener(&self, listener: Arc<dyn ColorConfigurationListener>) -> bool {
        let mut guard = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        if guard.iter().any(|existing| Arc::ptr_eq(existing, &listener)) {
            return false;
        }
        let mut updated = Vec::clone(&guard);
        updated.push(listener);
        *guard = Arc::new(updated);
        true
    }

    pub fn remove_color_listener(&self, listener: &Arc<dyn ColorConfigurationListener>) -> bool {
        let mut guard = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        let updated: Vec<_> = guard
            .iter()
            .filter(|existing| !Arc::ptr_eq(*existing, listener))
            .cloned()
            .collect();
        let removed = updated.len() != before;
        *guard = Arc::new(updated);
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.snapshot().len()
    }

    fn snapshot(&self) -> ListenerList {
        Arc::clone(&self.listeners.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Call every registered listener, then broadcast [`ConfigChange::ColorsChanged`]
    pub fn fire_colors_changed(&self) {
        let listeners = self.snapshot();
        tracing::debug!("Notifying {} color listeners", listeners.len());
        for listener in listeners.iter() {
            listener.colors_changed();
        }
        self.emit(ConfigChange::ColorsChanged);
    }

    pub fn emit(&self, change: ConfigChange) {
        // No subscribers is fine
        let _ = self.change_tx.send(change);
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazily loaded color configuration, shared per manager
#[derive(Default)]
pub struct ColorCache {
    custom_colors: Mutex<Option<Arc<AtcfCustomColors>>>,
    selections: Mutex<Option<Arc<AtcfColorSelections>>>,
}

impl ColorCache {
    pub fn custom_colors(&self) -> Option<Arc<AtcfCustomColors>> {
        self.custom_colors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_custom_colors(&self, colors: AtcfCustomColors) -> Arc<AtcfCustomColors> {
        let colors = Arc::new(colors);
        *self.custom_colors.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&colors));
        colors
    }

    pub fn selections(&self) -> Option<Arc<AtcfColorSelections>> {
        self.selections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_selections(&self, selections: AtcfColorSelections) -> Arc<AtcfColorSelections> {
        let selections = Arc::new(selections);
        *self.selections.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&selections));
        selections
    }

    pub fn clear(&self) {
        *self.custom_colors.lock().unwrap_or_else(PoisonError::into_inner) = None;
        *self.selections.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingListener {
        calls: AtomicUsize,
    }

    impl ColorConfigurationListener for CountingListener {
        fn colors_changed(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_add_and_remove_listeners() {
        let notifier = ChangeNotifier::new();
        let listener: Arc<dyn ColorConfigurationListener> = Arc::new(CountingListener::default());

        assert!(notifier.add_color_listener(Arc::clone(&listener)));
        assert!(!notifier.add_color_listener(Arc::clone(&listener)));
        assert_eq!(notifier.listener_count(), 1);

        assert!(notifier.remove_color_listener(&listener));
        assert!(!notifier.remove_color_listener(&listener));
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_fire_reaches_every_listener() {
        let notifier = ChangeNotifier::new();
        let first = Arc::new(CountingListener::default());
        let second = Arc::new(CountingListener::default());
        notifier.add_color_listener(first.clone());
        notifier.add_color_listener(second.clone());

        notifier.fire_colors_changed();
        notifier.fire_colors_changed();

        assert_eq!(first.calls.load(Ordering::SeqCst), 2);
        assert_eq!(second.calls.load(Ordering::SeqCst), 2);
    }

    struct SelfRemovingListener {
        notifier: Arc<ChangeNotifier>,
        me: Mutex<Option<Arc<dyn ColorConfigurationListener>>>,
    }

    impl ColorConfigurationListener for SelfRemovingListener {
        fn colors_changed(&self) {
            if let Some(me) = self.me.lock().unwrap().take() {
                self.notifier.remove_color_listener(&me);
            }
        }
    }

    #[test]
    fn test_listener_may_remove_itself_during_fire() {
        let notifier = Arc::new(ChangeNotifier::new());
        let listener = Arc::new(SelfRemovingListener {
            notifier: Arc::clone(&notifier),
            me: Mutex::new(None),
        });
        let as_dyn: Arc<dyn ColorConfigurationListener> = listener.clone();
        *listener.me.lock().unwrap() = Some(Arc::clone(&as_dyn));
        notifier.add_color_listener(as_dyn);

        notifier.fire_colors_changed();
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_broadcast_without_subscribers_is_ok() {
        let notifier = ChangeNotifier::new();
        notifier.emit(ConfigChange::ColorsChanged);

        let mut rx = notifier.subscribe();
        notifier.emit(ConfigChange::ProfileDeleted {
            name: "early".to_string(),
        });
        assert_eq!(
            rx.try_recv().unwrap(),
            ConfigChange::ProfileDeleted {
                name: "early".to_string()
            }
        );
    }

    #[test]
    fn test_color_cache() {
        let cache = ColorCache::default();
        assert!(cache.custom_colors().is_none());

        let mut colors = AtcfCustomColors::default();
        colors.colors.push("rgb:00/00/ff".to_string());
        cache.set_custom_colors(colors);
        assert_eq!(cache.custom_colors().unwrap().colors.len(), 1);

        cache.set_selections(AtcfColorSelections::default());
        assert!(cache.selections().is_some());

        cache.clear();
        assert!(cache.custom_colors().is_none());
        assert!(cache.selections().is_none());
    }
}
