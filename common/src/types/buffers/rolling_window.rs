use std::collections::vec_deque::Iter;
use std::collections::VecDeque;
use std::sync::Arc;

use arc_swap::ArcSwap;

pub const DEFAULT_WINDOW_CAPACITY: usize = 20;

#[derive(Clone, Debug)]
struct Window<T> {
    version: u64,
    samples: VecDeque<T>,
}

type SharedWindow<T> = Arc<ArcSwap<Window<T>>>;

/// Immutable view of a [`RollingWindow`] at one point in time, oldest sample first.
///
/// Taking a snapshot is O(1). Later pushes never change a snapshot that was
/// already handed out.
#[derive(Clone, Debug)]
pub struct WindowSnapshot<T>(Arc<Window<T>>);

impl<T> WindowSnapshot<T> {
    /// Number of mutations (pushes and resets) the window had gone through when
    /// the snapshot was taken.
    pub fn version(&self) -> u64 {
        self.0.version
    }

    pub fn len(&self) -> usize {
        self.0.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.samples.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.0.samples.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.samples.get(index)
    }

    /// Oldest retained sample.
    pub fn first(&self) -> Option<&T> {
        self.0.samples.front()
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<&T> {
        self.0.samples.back()
    }
}

impl<T: Clone> WindowSnapshot<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.0.samples.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a WindowSnapshot<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Bounded FIFO of the most recent `capacity` samples in arrival order.
///
/// Pushing appends at the back and, once the window is full, evicts the oldest
/// sample in the same step, so readers never observe more than `capacity`
/// samples. Readers only ever get [`WindowSnapshot`]s and never block: every
/// mutation builds a new window from the current one and swaps it in whole.
///
/// # Examples
///
/// ```
/// use common::types::buffers::RollingWindow;
/// use common::types::XYZ;
///
/// let window = RollingWindow::new(20, Some(XYZ::default())).unwrap();
/// window.push(XYZ::new([1.0, 2.0, 3.0]));
///
/// let snapshot = window.snapshot();
/// assert_eq!(snapshot.to_vec(), vec![XYZ::default(), XYZ::new([1.0, 2.0, 3.0])]);
/// ```
#[derive(Debug)]
pub struct RollingWindow<T> {
    shared: SharedWindow<T>,
    capacity: usize,
    seed: Option<T>,
}

impl<T: Clone> RollingWindow<T> {
    /// Creates a window holding at most `capacity` samples. When `seed` is given,
    /// the window starts (and restarts on [`reset`](Self::reset)) with that single
    /// sample so that the very first read already has data to show.
    pub fn new(capacity: usize, seed: Option<T>) -> Result<Self, &'static str> {
        if capacity == 0 {
            return Err("Window capacity must be positive");
        }
        let window = Window {
            version: 0,
            samples: initial_samples(capacity, seed.as_ref()),
        };
        Ok(Self {
            shared: Arc::new(ArcSwap::from_pointee(window)),
            capacity,
            seed,
        })
    }

    /// Appends `sample`, evicting and returning the oldest sample if the window
    /// was already full.
    pub fn push(&self, sample: T) -> Option<T> {
        let mut evicted = None;
        self.shared.rcu(|current| {
            let mut window = Window::clone(current);
            window.samples.push_back(sample.clone());
            evicted = if window.samples.len() > self.capacity {
                window.samples.pop_front()
            } else {
                None
            };
            window.version += 1;
            Arc::new(window)
        });
        evicted
    }

    /// Returns the window to its initial state: the seed sample, or empty.
    pub fn reset(&self) {
        self.shared.rcu(|current| {
            Arc::new(Window {
                version: current.version + 1,
                samples: initial_samples(self.capacity, self.seed.as_ref()),
            })
        });
    }

    pub fn snapshot(&self) -> WindowSnapshot<T> {
        read_snapshot(&self.shared)
    }

    /// Returns a read-only handle on this window.
    pub fn reader(&self) -> WindowReader<T> {
        WindowReader {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Default> RollingWindow<T> {
    /// Window of `capacity` samples seeded with `T::default()`.
    pub fn seeded(capacity: usize) -> Result<Self, &'static str> {
        Self::new(capacity, Some(T::default()))
    }
}

/// Read-only handle on a [`RollingWindow`]. It can take snapshots but never
/// modify the window.
#[derive(Clone, Debug)]
pub struct WindowReader<T> {
    shared: SharedWindow<T>,
}

impl<T> WindowReader<T> {
    pub fn snapshot(&self) -> WindowSnapshot<T> {
        read_snapshot(&self.shared)
    }
}

fn read_snapshot<T>(shared: &SharedWindow<T>) -> WindowSnapshot<T> {
    WindowSnapshot(shared.load_full())
}

fn initial_samples<T: Clone>(capacity: usize, seed: Option<&T>) -> VecDeque<T> {
    // one extra slot for the sample pushed just before eviction
    let mut samples = VecDeque::with_capacity(capacity + 1);
    if let Some(seed) = seed {
        samples.push_back(seed.clone());
    }
    samples
}
