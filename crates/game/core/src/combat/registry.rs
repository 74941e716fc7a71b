//! Bullet kind → collision handler lookup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::entity::BulletKind;

use super::handlers::{
    BloodCakeHandler, BubbleTeaHandler, CollisionHandler, NightMarketHandler, NormalHandler,
    OysterOmeletteHandler, StinkyTofuHandler,
};

/// Registry of collision handlers keyed by bullet kind.
///
/// Kinds without a registered handler resolve through the fallback, which is
/// the plain bullet handler unless overridden.
pub struct HandlerRegistry {
    handlers: HashMap<BulletKind, Arc<dyn CollisionHandler>>,
    fallback: Arc<dyn CollisionHandler>,
}

impl HandlerRegistry {
    /// Creates an empty registry; every kind resolves to `fallback`.
    pub fn new(fallback: Arc<dyn CollisionHandler>) -> Self {
        Self {
            handlers: HashMap::new(),
            fallback,
        }
    }

    /// Registry with a handler for every bullet kind.
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::new(Arc::new(NormalHandler));
        registry.register(BulletKind::None, Arc::new(NormalHandler));
        registry.register(BulletKind::StinkyTofu, Arc::new(StinkyTofuHandler));
        registry.register(BulletKind::BloodCake, Arc::new(BloodCakeHandler));
        registry.register(BulletKind::OysterOmelette, Arc::new(OysterOmeletteHandler));
        registry.register(BulletKind::NightMarket, Arc::new(NightMarketHandler));
        registry.register(BulletKind::BubbleTea, Arc::new(BubbleTeaHandler));
        registry
    }

    /// Registers `handler` for `kind`, returning the handler it replaced.
    pub fn register(
        &mut self,
        kind: BulletKind,
        handler: Arc<dyn CollisionHandler>,
    ) -> Option<Arc<dyn CollisionHandler>> {
        self.handlers.insert(kind, handler)
    }

    /// Removes the handler for `kind`; it then resolves to the fallback.
    pub fn unregister(&mut self, kind: BulletKind) -> Option<Arc<dyn CollisionHandler>> {
        self.handlers.remove(&kind)
    }

    pub fn handler_for(&self, kind: BulletKind) -> &dyn CollisionHandler {
        self.handlers
            .get(&kind)
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    pub fn contains(&self, kind: BulletKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered kinds and handler names (for debugging).
    pub fn handlers(&self) -> impl Iterator<Item = (BulletKind, &'static str)> + '_ {
        self.handlers
            .iter()
            .map(|(kind, handler)| (*kind, handler.name()))
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_default_handlers()
    }
}
