//! Visual-effects contract.
//!
//! The core only requests effects; drawing them is the renderer's job. Every
//! call is fire-and-forget.

use crate::entity::BulletKind;
use crate::value::Vector2;

pub trait EffectsSink {
    fn trigger_screen_shake(&mut self, magnitude: f32, duration: f32);
    fn create_hit_effect(&mut self, position: Vector2, kind: BulletKind);
    fn create_pierce_effect(&mut self, position: Vector2);
    fn create_explosion_effect(&mut self, position: Vector2);
    fn create_chain_effect(&mut self, from: Vector2, to: Vector2);
}

/// A recorded effect request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectRequest {
    ScreenShake { magnitude: f32, duration: f32 },
    Hit { position: Vector2, kind: BulletKind },
    Pierce { position: Vector2 },
    Explosion { position: Vector2 },
    Chain { from: Vector2, to: Vector2 },
}

/// Effects sink that records requests instead of drawing them.
#[derive(Clone, Debug, Default)]
pub struct EffectLog {
    requests: Vec<EffectRequest>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[EffectRequest] {
        &self.requests
    }

    pub fn chain_links(&self) -> Vec<(Vector2, Vector2)> {
        self.requests
            .iter()
            .filter_map(|request| match *request {
                EffectRequest::Chain { from, to } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    pub fn count_hits(&self) -> usize {
        self.requests
            .iter()
            .filter(|request| matches!(request, EffectRequest::Hit { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

impl EffectsSink for EffectLog {
    fn trigger_screen_shake(&mut self, magnitude: f32, duration: f32) {
        self.requests
            .push(EffectRequest::ScreenShake { magnitude, duration });
    }

    fn create_hit_effect(&mut self, position: Vector2, kind: BulletKind) {
        self.requests.push(EffectRequest::Hit { position, kind });
    }

    fn create_pierce_effect(&mut self, position: Vector2) {
        self.requests.push(EffectRequest::Pierce { position });
    }

    fn create_explosion_effect(&mut self, position: Vector2) {
        self.requests.push(EffectRequest::Explosion { position });
    }

    fn create_chain_effect(&mut self, from: Vector2, to: Vector2) {
        self.requests.push(EffectRequest::Chain { from, to });
    }
}
