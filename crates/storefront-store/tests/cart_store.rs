//! Integration tests for `CartStore` over the provided storage backends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use storefront_core::{Cart, Money, Product};
use storefront_store::{
    CartStore, JsonFileStorage, KeyValueStorage, MemoryStorage, StorageError, StorageResult,
    CART_KEY,
};

// =============================================================================
// Fixtures
// =============================================================================

fn headphones() -> Product {
    Product::new("1", "Wireless Headphones", Money::from_cents(19999))
}

fn shoes() -> Product {
    Product::new("3", "Running Shoes", Money::from_cents(12999))
}

fn memory_store() -> (Arc<MemoryStorage>, CartStore) {
    let storage = Arc::new(MemoryStorage::new());
    let store = CartStore::open(storage.clone());
    (storage, store)
}

/// Storage whose reads and/or writes always fail, counting attempts.
#[derive(Default)]
struct FailingStorage {
    fail_reads: bool,
    fail_writes: bool,
    writes: AtomicUsize,
}

impl KeyValueStorage for FailingStorage {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        Ok(())
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }
}

fn persisted(storage: &MemoryStorage) -> Cart {
    let json = storage.get(CART_KEY).unwrap().expect("cart slot written");
    serde_json::from_str(&json).unwrap()
}

// =============================================================================
// Operations
// =============================================================================

#[test]
fn test_checkout_scenario() {
    let (_, mut store) = memory_store();

    store.add_to_cart(&headphones(), 2);
    store.add_to_cart(&shoes(), 1);
    assert_eq!(store.cart().item_count(), 3);
    assert_eq!(store.cart().total(), Money::from_cents(52997));

    store.update_quantity("1", 1);
    assert_eq!(store.cart().item_count(), 2);
    assert_eq!(store.cart().total(), Money::from_cents(32998));

    store.remove_from_cart("3");
    assert_eq!(store.cart().item_count(), 1);
    assert_eq!(store.cart().total(), Money::from_cents(19999));
}

#[test]
fn test_add_merges_lines() {
    let (_, mut store) = memory_store();
    store.add_to_cart(&shoes(), 2);
    store.add_to_cart(&shoes(), 3);

    assert_eq!(store.cart().items().len(), 1);
    assert_eq!(store.get_item_quantity("3"), 5);
}

#[test]
fn test_add_one() {
    let (_, mut store) = memory_store();
    store.add_one(&shoes());
    store.add_one(&shoes());
    assert_eq!(store.get_item_quantity("3"), 2);
}

#[test]
fn test_update_to_zero_drops_prior_quantity() {
    let (_, mut store) = memory_store();
    store.add_to_cart(&headphones(), 2);
    store.add_to_cart(&shoes(), 4);
    let before = store.cart().item_count();

    store.update_quantity("3", 0);

    assert_eq!(store.get_item_quantity("3"), 0);
    assert_eq!(store.cart().item_count(), before - 4);
}

#[test]
fn test_update_missing_product_creates_nothing() {
    let (_, mut store) = memory_store();
    store.update_quantity("3", 5);
    assert!(store.cart().is_empty());
}

#[test]
fn test_remove_absent_leaves_cart_byte_identical() {
    let (storage, mut store) = memory_store();
    store.add_to_cart(&headphones(), 2);
    let before = serde_json::to_string(store.cart()).unwrap();

    store.remove_from_cart("404");

    assert_eq!(serde_json::to_string(store.cart()).unwrap(), before);
    assert_eq!(storage.get(CART_KEY).unwrap().unwrap(), before);
}

#[test]
fn test_clear() {
    let (_, mut store) = memory_store();
    store.add_to_cart(&headphones(), 2);
    store.add_to_cart(&shoes(), 1);

    store.clear_cart();

    assert_eq!(store.get_item_quantity("1"), 0);
    assert_eq!(store.get_item_quantity("anything"), 0);
    assert_eq!(store.cart().item_count(), 0);
    assert!(store.cart().total().is_zero());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_every_mutation_overwrites_slot() {
    let (storage, mut store) = memory_store();
    assert_eq!(storage.get(CART_KEY).unwrap(), None);

    store.add_to_cart(&headphones(), 2);
    assert_eq!(&persisted(&storage), store.cart());

    store.update_quantity("1", 5);
    assert_eq!(persisted(&storage).quantity_of("1"), 5);

    store.clear_cart();
    assert!(persisted(&storage).is_empty());
}

#[test]
fn test_rejected_add_does_not_write() {
    let storage = Arc::new(FailingStorage::default());
    let mut store = CartStore::open(storage.clone());

    store.add_to_cart(&headphones(), 0);
    store.add_to_cart(&headphones(), -3);

    assert!(store.cart().is_empty());
    assert_eq!(storage.writes.load(Ordering::SeqCst), 0);
}

#[test]
fn test_overflowing_add_is_refused_without_write() {
    let storage = Arc::new(FailingStorage::default());
    let mut store = CartStore::open(storage.clone());
    store.add_to_cart(&headphones(), 1);

    store.add_to_cart(&headphones(), i64::MAX / 19999 + 1);
    store.add_to_cart(&shoes(), i64::MAX);

    assert_eq!(store.get_item_quantity("1"), 1);
    assert_eq!(store.get_item_quantity("3"), 0);
    assert_eq!(store.cart().total(), Money::from_cents(19999));
    assert_eq!(storage.writes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_overflowing_update_is_refused_without_write() {
    let storage = Arc::new(FailingStorage::default());
    let mut store = CartStore::open(storage.clone());
    store.add_to_cart(&headphones(), 2);

    store.update_quantity("1", i64::MAX);

    assert_eq!(store.get_item_quantity("1"), 2);
    assert_eq!(storage.writes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_round_trip_through_slot() {
    let (storage, mut store) = memory_store();
    store.add_to_cart(&headphones(), 2);
    store.add_to_cart(&shoes(), 1);

    let reopened = CartStore::open(storage);

    assert_eq!(reopened.cart(), store.cart());
    assert_eq!(reopened.cart().item_count(), 3);
    assert_eq!(reopened.cart().total(), Money::from_cents(52997));
}

#[test]
fn test_round_trip_through_json_files() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = CartStore::open(Arc::new(JsonFileStorage::new(dir.path())));
    store.add_to_cart(&shoes(), 3);
    store.add_to_cart(&headphones(), 1);

    let reopened = CartStore::open(Arc::new(JsonFileStorage::new(dir.path())));
    assert_eq!(reopened.cart(), store.cart());

    let ids: Vec<&str> = reopened
        .cart()
        .items()
        .iter()
        .map(|l| l.product.id.as_str())
        .collect();
    assert_eq!(ids, vec!["3", "1"]);
}

#[test]
fn test_corrupt_slot_starts_empty() {
    let storage = Arc::new(MemoryStorage::with_entry(CART_KEY, "{not json"));
    let mut store = CartStore::open(storage.clone());
    assert!(store.cart().is_empty());

    // The next mutation replaces the corrupt value.
    store.add_one(&shoes());
    assert_eq!(persisted(&storage).quantity_of("3"), 1);
}

#[test]
fn test_incompatible_schema_starts_empty() {
    let storage = Arc::new(MemoryStorage::with_entry(
        CART_KEY,
        r#"{"lines":[{"sku":"X","qty":1}]}"#,
    ));
    let store = CartStore::open(storage);
    assert!(store.cart().is_empty());
}

#[test]
fn test_stale_cached_totals_are_recomputed() {
    let stale = format!(
        r#"{{"items":[{{"product":{},"quantity":2}}],"itemCount":9,"total":1}}"#,
        serde_json::to_string(&headphones()).unwrap()
    );
    let storage = Arc::new(MemoryStorage::with_entry(CART_KEY, stale));

    let store = CartStore::open(storage);

    assert_eq!(store.cart().item_count(), 2);
    assert_eq!(store.cart().total(), Money::from_cents(39998));
}

#[test]
fn test_overflowing_slot_starts_empty() {
    let huge = format!(
        r#"{{"items":[{{"product":{},"quantity":9223372036854775807}}],"itemCount":0,"total":0}}"#,
        serde_json::to_string(&headphones()).unwrap()
    );
    let storage = Arc::new(MemoryStorage::with_entry(CART_KEY, huge));

    let mut store = CartStore::open(storage.clone());
    assert!(store.cart().is_empty());

    store.add_one(&shoes());
    assert_eq!(persisted(&storage).item_count(), 1);
}

#[test]
fn test_slot_with_overflowing_item_count_starts_empty() {
    let line = |id: &str| {
        let product = Product::new(id, "Free Sticker", Money::zero());
        format!(
            r#"{{"product":{},"quantity":{}}}"#,
            serde_json::to_string(&product).unwrap(),
            i64::MAX
        )
    };
    let json = format!(r#"{{"items":[{},{}]}}"#, line("a"), line("b"));
    let storage = Arc::new(MemoryStorage::with_entry(CART_KEY, json));

    let store = CartStore::open(storage);
    assert!(store.cart().is_empty());
}

#[test]
fn test_unreadable_slot_starts_empty() {
    let storage = Arc::new(FailingStorage {
        fail_reads: true,
        ..Default::default()
    });
    let store = CartStore::open(storage);
    assert!(store.cart().is_empty());
}

#[test]
fn test_write_failures_never_disturb_mutations() {
    let storage = Arc::new(FailingStorage {
        fail_writes: true,
        ..Default::default()
    });
    let mut store = CartStore::open(storage.clone());

    store.add_to_cart(&headphones(), 2);
    store.add_to_cart(&shoes(), 1);
    store.update_quantity("1", 1);

    assert_eq!(store.cart().item_count(), 2);
    assert_eq!(store.cart().total(), Money::from_cents(32998));
    assert_eq!(storage.writes.load(Ordering::SeqCst), 3);
}

// =============================================================================
// Observers
// =============================================================================

#[test]
fn test_observers_fire_once_per_mutation_in_order() {
    let (_, mut store) = memory_store();
    let log = Arc::new(Mutex::new(Vec::new()));

    let first = log.clone();
    store.subscribe(move |cart| first.lock().unwrap().push(("first", cart.item_count())));
    let second = log.clone();
    store.subscribe(move |cart| second.lock().unwrap().push(("second", cart.item_count())));

    store.add_to_cart(&headphones(), 2);
    store.clear_cart();

    assert_eq!(
        *log.lock().unwrap(),
        vec![("first", 2), ("second", 2), ("first", 0), ("second", 0)]
    );
}

#[test]
fn test_observer_sees_state_before_persistence() {
    let (storage, mut store) = memory_store();
    let seen_in_slot = Arc::new(Mutex::new(None));

    let slot = seen_in_slot.clone();
    let probe = storage.clone();
    store.subscribe(move |_| {
        *slot.lock().unwrap() = Some(probe.get(CART_KEY).unwrap());
    });

    store.add_one(&shoes());

    // The slot was still empty when observers ran.
    assert_eq!(*seen_in_slot.lock().unwrap(), Some(None));
    assert!(storage.get(CART_KEY).unwrap().is_some());
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let (_, mut store) = memory_store();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let id = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.add_one(&shoes());
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.add_one(&shoes());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_item_count_is_net_of_adds_and_removals(
        steps in proptest::collection::vec((0..3usize, 1..6i64, any::<bool>()), 0..30)
    ) {
        let catalog = [headphones(), shoes(), Product::new("10", "Water Bottle", Money::from_cents(2499))];
        let (storage, mut store) = memory_store();
        let mut expected = [0i64; 3];

        for (p, qty, remove) in steps {
            if remove {
                store.remove_from_cart(&catalog[p].id);
                expected[p] = 0;
            } else {
                store.add_to_cart(&catalog[p], qty);
                expected[p] += qty;
            }

            let cart = store.cart();
            prop_assert_eq!(cart.item_count(), expected.iter().sum::<i64>());
            let total: i64 = catalog
                .iter()
                .zip(expected)
                .map(|(product, q)| product.price_cents * q)
                .sum();
            prop_assert_eq!(cart.total().cents(), total);
            prop_assert_eq!(&persisted(&storage), cart);
        }
    }
}
