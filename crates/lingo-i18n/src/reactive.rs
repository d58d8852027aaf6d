//! Pull-based dependency graph for derived state.
//!
//! The graph has two node kinds:
//!
//! - [`Writable`]: a root value that callers set.
//! - [`Computed`]: a value derived from other nodes by a pure closure.
//!
//! # Invariants
//!
//! 1. Writing a root marks every transitive dependent dirty without
//!    recomputing anything.
//! 2. Reading a dirty node first brings its sources up to date, then
//!    recomputes only if a source version moved since the last computation.
//! 3. A node's version moves only when its value changes identity
//!    ([`Identity::same`]), so a recomputation that yields the same shared
//!    value does not ripple further down.
//! 4. Nodes lock downstream before upstream; derive closures must not write
//!    to the graph or read the node they belong to.

use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::sync::{Arc, Weak};

/// Equality used to decide whether a node's value changed.
pub trait Identity: Clone + Send + Sync + 'static {
    /// Whether `other` is the same value as `self` for change tracking.
    fn same(&self, other: &Self) -> bool;
}

/// Shared values change only when a new allocation is installed.
impl<T: ?Sized + Send + Sync + 'static> Identity for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl Identity for String {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

trait Source: Send + Sync {
    /// Bring the node up to date and return its version.
    fn sync(&self) -> u64;
    fn subscribe(&self, dependent: Weak<dyn Dependent>);
    fn unsubscribe(&self, dependent: &Weak<dyn Dependent>);
}

trait Dependent: Send + Sync {
    fn invalidate(&self);
}

/// Opaque edge handle passed to [`Computed::new`].
#[derive(Clone)]
pub struct Dependency(Arc<dyn Source>);

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dependency").finish()
    }
}

#[derive(Default)]
struct Dependents(Mutex<Vec<Weak<dyn Dependent>>>);

impl Dependents {
    fn add(&self, dependent: Weak<dyn Dependent>) {
        self.0.lock().push(dependent);
    }

    fn remove(&self, dependent: &Weak<dyn Dependent>) {
        self.0.lock().retain(|d| !Weak::ptr_eq(d, dependent));
    }

    fn len(&self) -> usize {
        self.0.lock().len()
    }

    fn clear(&self) {
        self.0.lock().clear();
    }

    /// Invalidate live dependents and prune dropped ones.
    fn notify(&self) {
        // Collect first so no lock is held while dependents take their own.
        let live: Vec<Arc<dyn Dependent>> = {
            let mut dependents = self.0.lock();
            dependents.retain(|d| d.strong_count() > 0);
            dependents.iter().filter_map(Weak::upgrade).collect()
        };
        for dependent in live {
            dependent.invalidate();
        }
    }
}

struct Slot<T> {
    value: T,
    version: u64,
}

struct WritableInner<T> {
    slot: Mutex<Slot<T>>,
    dependents: Dependents,
}

impl<T: Identity> Source for WritableInner<T> {
    fn sync(&self) -> u64 {
        self.slot.lock().version
    }

    fn subscribe(&self, dependent: Weak<dyn Dependent>) {
        self.dependents.add(dependent);
    }

    fn unsubscribe(&self, dependent: &Weak<dyn Dependent>) {
        self.dependents.remove(dependent);
    }
}

/// A root value of the graph.
///
/// Cloning creates another handle to the same node.
pub struct Writable<T> {
    inner: Arc<WritableInner<T>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.inner.slot.lock();
        f.debug_struct("Writable")
            .field("value", &slot.value)
            .field("version", &slot.version)
            .field("dependents", &self.inner.dependents.len())
            .finish()
    }
}

impl<T: Identity> Writable<T> {
    /// Create a root with version 0 and no dependents.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(WritableInner {
                slot: Mutex::new(Slot { value, version: 0 }),
                dependents: Dependents::default(),
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.inner.slot.lock().value.clone()
    }

    /// Replace the value. Returns `false` (and notifies nobody) when the new
    /// value is the [`same`](Identity::same) as the current one.
    pub fn set(&self, value: T) -> bool {
        self.update(|_| value)
    }

    /// Derive the next value from the current one under the node's lock,
    /// so concurrent updates never lose each other.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        {
            let mut slot = self.inner.slot.lock();
            let next = f(&slot.value);
            if next.same(&slot.value) {
                return false;
            }
            slot.value = next;
            slot.version += 1;
        }
        self.inner.dependents.notify();
        true
    }

    /// Number of value-changing writes so far
    pub fn version(&self) -> u64 {
        self.inner.slot.lock().version
    }

    /// Edge handle for building dependents
    pub fn dependency(&self) -> Dependency {
        Dependency(Arc::clone(&self.inner) as Arc<dyn Source>)
    }

    /// Number of registered dependents, including dropped ones not yet pruned
    pub fn dependent_count(&self) -> usize {
        self.inner.dependents.len()
    }

    /// Forget every dependent.
    pub fn dispose(&self) {
        self.inner.dependents.clear();
    }
}

struct ComputedState<T> {
    value: T,
    version: u64,
    /// Source versions `value` was computed against.
    seen: Vec<u64>,
    dirty: bool,
    disposed: bool,
}

type DeriveFn<T> = Box<dyn Fn() -> T + Send + Sync>;

struct ComputedInner<T> {
    derive: DeriveFn<T>,
    sources: Vec<Arc<dyn Source>>,
    state: Mutex<ComputedState<T>>,
    dependents: Dependents,
    this: Weak<ComputedInner<T>>,
}

impl<T: Identity> ComputedInner<T> {
    fn refresh(&self) -> MutexGuard<'_, ComputedState<T>> {
        let mut state = self.state.lock();
        if state.dirty && !state.disposed {
            let current: Vec<u64> = self.sources.iter().map(|source| source.sync()).collect();
            if current != state.seen {
                let next = (self.derive)();
                if !next.same(&state.value) {
                    state.value = next;
                    state.version += 1;
                }
                state.seen = current;
            }
            state.dirty = false;
        }
        state
    }

    fn as_dependent(&self) -> Weak<dyn Dependent> {
        self.this.clone()
    }
}

impl<T: Identity> Source for ComputedInner<T> {
    fn sync(&self) -> u64 {
        self.refresh().version
    }

    fn subscribe(&self, dependent: Weak<dyn Dependent>) {
        self.dependents.add(dependent);
    }

    fn unsubscribe(&self, dependent: &Weak<dyn Dependent>) {
        self.dependents.remove(dependent);
    }
}

impl<T: Identity> Dependent for ComputedInner<T> {
    fn invalidate(&self) {
        {
            let mut state = self.state.lock();
            if state.disposed {
                return;
            }
            state.dirty = true;
        }
        self.dependents.notify();
    }
}

/// A value derived from other nodes.
///
/// ```rust
/// use lingo_i18n::reactive::{Computed, Writable};
///
/// let name = Writable::new("crimx".to_string());
/// let shout = Computed::new([name.dependency()], {
///     let name = name.clone();
///     move || name.get().to_uppercase()
/// });
///
/// assert_eq!(shout.get(), "CRIMX");
/// name.set("apple".to_string());
/// assert_eq!(shout.get(), "APPLE");
/// ```
pub struct Computed<T> {
    inner: Arc<ComputedInner<T>>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Computed")
            .field("value", &state.value)
            .field("version", &state.version)
            .field("dirty", &state.dirty)
            .field("dependents", &self.inner.dependents.len())
            .finish()
    }
}

impl<T: Identity> Computed<T> {
    /// Create a node over `dependencies`. `derive` must read only those nodes.
    ///
    /// The first value is computed immediately; later ones on demand.
    pub fn new<I>(dependencies: I, derive: impl Fn() -> T + Send + Sync + 'static) -> Self
    where
        I: IntoIterator<Item = Dependency>,
    {
        let sources: Vec<Arc<dyn Source>> = dependencies.into_iter().map(|d| d.0).collect();
        let seen = sources.iter().map(|source| source.sync()).collect();
        let value = derive();

        let inner = Arc::new_cyclic(|this| ComputedInner {
            derive: Box::new(derive),
            sources,
            state: Mutex::new(ComputedState {
                value,
                version: 0,
                seen,
                // Re-checked on first read in case a source moved before subscription.
                dirty: true,
                disposed: false,
            }),
            dependents: Dependents::default(),
            this: this.clone(),
        });

        let dependent = inner.as_dependent();
        for source in &inner.sources {
            source.subscribe(dependent.clone());
        }

        Self { inner }
    }

    /// Current value, recomputed first if a source changed
    pub fn get(&self) -> T {
        self.inner.refresh().value.clone()
    }

    /// Borrow the current value
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.refresh().value)
    }

    /// Number of identity changes of the derived value so far
    pub fn version(&self) -> u64 {
        self.inner.refresh().version
    }

    /// Edge handle for building dependents
    pub fn dependency(&self) -> Dependency {
        Dependency(Arc::clone(&self.inner) as Arc<dyn Source>)
    }

    /// Number of registered dependents, including dropped ones not yet pruned
    pub fn dependent_count(&self) -> usize {
        self.inner.dependents.len()
    }

    /// Detach from sources and dependents. The last value stays readable
    /// but is never recomputed.
    pub fn dispose(&self) {
        self.inner.state.lock().disposed = true;
        let dependent = self.inner.as_dependent();
        for source in &self.inner.sources {
            source.unsubscribe(&dependent);
        }
        self.inner.dependents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counted<T: Identity>(
        deps: Vec<Dependency>,
        runs: &Arc<AtomicUsize>,
        derive: impl Fn() -> T + Send + Sync + 'static,
    ) -> Computed<T> {
        let runs = Arc::clone(runs);
        Computed::new(deps, move || {
            runs.fetch_add(1, Ordering::SeqCst);
            derive()
        })
    }

    #[test]
    fn test_recomputes_lazily() {
        let root = Writable::new("a".to_string());
        let runs = Arc::new(AtomicUsize::new(0));
        let derived = counted(vec![root.dependency()], &runs, {
            let root = root.clone();
            move || format!("{}!", root.get())
        });
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        root.set("b".to_string());
        root.set("c".to_string());
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        assert_eq!(derived.get(), "c!");
        assert_eq!(derived.get(), "c!");
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_setting_same_value_is_noop() {
        let root = Writable::new("en".to_string());
        assert!(!root.set("en".to_string()));
        assert_eq!(root.version(), 0);
        assert!(root.set("zh".to_string()));
        assert_eq!(root.version(), 1);
    }

    #[test]
    fn test_same_identity_stops_propagation() {
        let shared = Arc::new(1_u32);
        let root = Writable::new("x".to_string());
        let middle = Computed::new([root.dependency()], {
            let shared = Arc::clone(&shared);
            move || Arc::clone(&shared)
        });
        let runs = Arc::new(AtomicUsize::new(0));
        let leaf = counted(vec![middle.dependency()], &runs, {
            let middle = middle.clone();
            move || Arc::new(*middle.get() + 1)
        });

        root.set("y".to_string());
        assert_eq!(*leaf.get(), 2);
        assert_eq!(middle.version(), 0);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_chain_propagates_changes() {
        let root = Writable::new(Arc::new(2_i64));
        let double = Computed::new([root.dependency()], {
            let root = root.clone();
            move || Arc::new(*root.get() * 2)
        });
        let plus_one = Computed::new([double.dependency()], {
            let double = double.clone();
            move || Arc::new(*double.get() + 1)
        });

        assert_eq!(*plus_one.get(), 5);
        root.set(Arc::new(10));
        assert_eq!(*plus_one.get(), 21);
        assert_eq!(plus_one.version(), 1);
    }

    #[test]
    fn test_dispose_releases_subscriptions() {
        let root = Writable::new("a".to_string());
        let derived = Computed::new([root.dependency()], {
            let root = root.clone();
            move || root.get()
        });
        let leaf = Computed::new([derived.dependency()], {
            let derived = derived.clone();
            move || derived.get()
        });
        assert_eq!(root.dependent_count(), 1);
        assert_eq!(derived.dependent_count(), 1);

        leaf.dispose();
        derived.dispose();
        assert_eq!(root.dependent_count(), 0);
        assert_eq!(derived.dependent_count(), 0);

        root.set("b".to_string());
        assert_eq!(derived.get(), "a");
    }

    #[test]
    fn test_dropped_dependents_are_pruned() {
        let root = Writable::new("a".to_string());
        {
            let _derived = Computed::new([root.dependency()], {
                let root = root.clone();
                move || root.get()
            });
            assert_eq!(root.dependent_count(), 1);
        }
        root.set("b".to_string());
        assert_eq!(root.dependent_count(), 0);
    }

    #[test]
    fn test_nodes_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Writable<String>>();
        assert_send_sync::<Computed<Arc<str>>>();
    }
}
