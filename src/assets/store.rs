use crate::assets::H;
use dashmap::DashMap;
use dashmap::iter::Iter;
use dashmap::mapref::one::Ref as MapRef;
use dashmap::mapref::one::RefMut as MapRefMut;
use log::{trace, warn};
use std::fmt::{Debug, Display, Formatter};
use std::sync::RwLock;

type Ref<'a, T> = MapRef<'a, u32, T>;
type RefMut<'a, T> = MapRefMut<'a, u32, T>;

/// Generic asset store keyed by [`H<T>`] handles.
///
/// One store exists per resource kind, owned by the
/// [`AssetRegistry`](crate::assets::AssetRegistry). Lookups go through
/// shared references; the `DashMap` takes care of shard locking so pipeline
/// code can hold refs while the renderer mutates its own state.
pub struct Store<T: StoreType> {
    data: DashMap<u32, T>,
    next_id: RwLock<u32>,
}

/// Populates a store with its built-in assets at creation.
pub trait StoreDefaults: StoreType {
    fn populate(store: &mut Store<Self>);
}

pub trait StoreType: Sized + Debug {
    fn name() -> &'static str;
    fn ident_fmt(handle: H<Self>) -> HandleName<Self>;
    fn ident(handle: H<Self>) -> String {
        match Self::ident_fmt(handle) {
            HandleName::Static(name) => name.to_string(),
            HandleName::Id(id) => format!("{} #{id}", Self::name()),
        }
    }

    fn store(self, store: &Store<Self>) -> H<Self> {
        store.add(self)
    }

    fn is_builtin(handle: H<Self>) -> bool;
}

pub enum HandleName<T: StoreType> {
    Static(&'static str),
    Id(H<T>),
}

impl<T: StoreType> Display for HandleName<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HandleName::Static(s) => write!(f, "\"{s}\""),
            HandleName::Id(id) => write!(f, "#{id}"),
        }
    }
}

impl<T: StoreType> Store<T> {
    pub fn empty() -> Self {
        Self {
            data: DashMap::new(),
            next_id: RwLock::new(0),
        }
    }

    fn next_id(&self) -> H<T> {
        let mut id_lock = self.next_id.write().unwrap_or_else(|e| e.into_inner());
        let id = H::new(*id_lock);
        *id_lock += 1;
        id
    }

    pub fn add<T2: Into<T>>(&self, elem: T2) -> H<T> {
        let id = self.next_id();
        self.data.insert(id.id(), elem.into());

        trace!("[{} Store] Added element: {}", T::name(), T::ident_fmt(id));

        id
    }

    pub fn try_get(&self, h: H<T>) -> Option<Ref<'_, T>> {
        self.data.get(&h.id()).or_else(|| {
            warn!(
                "[{} Store] Invalid Reference: h={} not found",
                T::name(),
                T::ident_fmt(h)
            );
            None
        })
    }

    pub fn try_get_mut(&self, h: H<T>) -> Option<RefMut<'_, T>> {
        self.data.get_mut(&h.id()).or_else(|| {
            warn!(
                "[{} Store] Invalid Reference: h={} not found",
                T::name(),
                T::ident_fmt(h)
            );
            None
        })
    }

    pub fn contains(&self, h: H<T>) -> bool {
        self.data.contains_key(&h.id())
    }

    /// Removes a non-builtin asset. Built-ins stay for the store's lifetime.
    pub fn remove(&self, h: H<T>) -> Option<T> {
        if T::is_builtin(h) {
            return None;
        }
        Some(self.data.remove(&h.id())?.1)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn items(&self) -> Iter<'_, u32, T> {
        self.data.iter()
    }

    pub(crate) fn clear(&self) {
        self.data.clear();
    }
}

impl<T: StoreDefaults> Store<T> {
    pub fn populated() -> Self {
        let mut store = Self::empty();
        T::populate(&mut store);
        store
    }
}

#[macro_export]
#[cfg(debug_assertions)]
macro_rules! store_add_checked {
    ($store:ident, $expected_id:path, $elem:expr) => {
        let id = $store.add($elem);
        assert_eq!(id.id(), $expected_id);
    };
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! store_add_checked {
    ($store:ident, $expected_id:path, $elem:expr) => {
        $store.add($elem);
    };
}
