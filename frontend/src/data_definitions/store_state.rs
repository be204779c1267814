//! Shopper state shared by every page: cart, session and chosen vehicle.
//!
//! Each part is mirrored to `localStorage` after every change and read back
//! once the app is running in the browser.

use common::account::SessionInfo;
use common::cache::{TtlCache, TtlPolicy};
use common::cart::Cart;
use common::store_const::{CART_STORAGE_KEY, SESSION_STORAGE_KEY, SESSION_TTL_MS, VEHICLE_STORAGE_KEY};
use common::vehicle::VehicleSelection;
use dioxus::logger::tracing::warn;
use dioxus::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::data_definitions::browser_storage::{now_ms, LocalStorage};

fn cart_cache() -> TtlCache<Cart, LocalStorage> {
    TtlCache::new(LocalStorage, CART_STORAGE_KEY, TtlPolicy::Never)
}

fn session_cache() -> TtlCache<SessionInfo, LocalStorage> {
    TtlCache::new(LocalStorage, SESSION_STORAGE_KEY, TtlPolicy::After(SESSION_TTL_MS))
}

fn vehicle_cache() -> TtlCache<VehicleSelection, LocalStorage> {
    TtlCache::new(LocalStorage, VEHICLE_STORAGE_KEY, TtlPolicy::Never)
}

fn persist<T: Serialize + DeserializeOwned>(cache: TtlCache<T, LocalStorage>, value: Option<&T>) {
    match value {
        Some(value) => {
            if let Err(e) = cache.store(value, now_ms()) {
                warn!("could not save {}: {}", cache.key(), e);
            }
        }
        None => cache.clear(),
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct StoreState {
    pub cart: Signal<Cart>,
    pub session: Signal<Option<SessionInfo>>,
    pub vehicle: Signal<Option<VehicleSelection>>,
}

impl StoreState {
    pub fn new() -> Self {
        Self {
            cart: Signal::new(Cart::new()),
            session: Signal::new(None),
            vehicle: Signal::new(None),
        }
    }

    /// Read back what the previous visit saved. Expired sessions are dropped.
    pub fn load_saved(mut self) {
        let now = now_ms();
        if let Some(cart) = cart_cache().load(now) {
            self.cart.set(cart);
        }
        let session = session_cache().load(now).filter(|s| s.is_valid_at(now));
        if session.is_none() {
            session_cache().clear();
        }
        self.session.set(session);
        if let Some(vehicle) = vehicle_cache().load(now) {
            self.vehicle.set(Some(vehicle));
        }
    }

    pub fn update_cart<R>(mut self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let result = f(&mut self.cart.write());
        persist(cart_cache(), Some(&*self.cart.peek()));
        result
    }

    pub fn set_session(mut self, session: Option<SessionInfo>) {
        persist(session_cache(), session.as_ref());
        self.session.set(session);
    }

    pub fn set_vehicle(mut self, vehicle: Option<VehicleSelection>) {
        persist(vehicle_cache(), vehicle.as_ref());
        self.vehicle.set(vehicle);
    }

    /// The session, if it has not expired yet.
    pub fn active_session(&self) -> Option<SessionInfo> {
        let now = now_ms();
        self.session.read().clone().filter(|s| s.is_valid_at(now))
    }
}

pub fn use_store() -> StoreState {
    use_context::<StoreState>()
}
