//! Process-wide translation store for the `global-store` feature.
//!
//! Hosts that want one catalog cache for the whole process, loaded by the
//! first render and kept until exit, can share this store instead of
//! threading their own through every renderer.

use std::sync::LazyLock;

use crate::catalog::TranslationStore;

static GLOBAL_STORE: LazyLock<TranslationStore> = LazyLock::new(TranslationStore::new);

/// The process-wide store.
pub fn store() -> &'static TranslationStore {
    &GLOBAL_STORE
}

/// Drop every catalog held by the process-wide store.
pub fn reset() {
    GLOBAL_STORE.reset();
}
