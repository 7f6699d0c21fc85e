#![cfg(target_arch = "wasm32")]

use padel_core::{Draft, DraftStorage, DraftStore, OnboardingDraft};
use padel_web::storage::LocalStorage;
use std::rc::Rc;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trips_and_clears_only_its_flow() {
    let storage: Rc<dyn DraftStorage> = Rc::new(LocalStorage);
    storage.set("unrelated.key", "keep").expect("seed unrelated key");

    let store = DraftStore::new(storage.clone(), "padel.test", OnboardingDraft::FLOW);
    store.set("first_name", "Ana").expect("set");
    let reopened = DraftStore::new(storage.clone(), "padel.test", OnboardingDraft::FLOW);
    assert_eq!(reopened.get("first_name").expect("get"), Some("Ana".to_string()));

    assert_eq!(reopened.clear().expect("clear"), 1);
    assert!(reopened.is_empty().expect("is_empty"));
    assert_eq!(storage.get("unrelated.key").expect("get unrelated"), Some("keep".to_string()));
    storage.remove("unrelated.key").expect("cleanup");
}
