use slotmap::{SlotMap, new_key_type};

use crate::animation::ticker::Ticker;
use crate::errors::Result;
use crate::scene::{NodeHandle, Scene};

new_key_type! {
    pub struct TickerKey;
}

/// Animation context: the tickers driving one scene.
///
/// Owned by the application next to its [`Scene`] and advanced once per
/// frame, before the scene is traversed for drawing. Tickers run in
/// registration order. Dropping the animator or calling
/// [`Animator::clear`] tears every ticker down.
#[derive(Debug, Default)]
pub struct Animator {
    tickers: SlotMap<TickerKey, Ticker>,
    order: Vec<TickerKey>,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, ticker: Ticker) -> TickerKey {
        log::debug!(
            "Registering ticker: rate {} ticks/s, loop {} ticks",
            ticker.rate(),
            ticker.duration()
        );
        let key = self.tickers.insert(ticker);
        self.order.push(key);
        key
    }

    /// Removes a ticker. Returns it if the key was live.
    pub fn deregister(&mut self, key: TickerKey) -> Option<Ticker> {
        let ticker = self.tickers.remove(key)?;
        self.order.retain(|&k| k != key);
        Some(ticker)
    }

    /// Removes every ticker that drives `node`.
    pub fn deregister_node(&mut self, node: NodeHandle) -> usize {
        let before = self.tickers.len();
        self.tickers.retain(|_, ticker| ticker.timeline().node() != node);
        let tickers = &self.tickers;
        self.order.retain(|&k| tickers.contains_key(k));
        before - self.tickers.len()
    }

    pub fn clear(&mut self) {
        self.tickers.clear();
        self.order.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: TickerKey) -> Option<&Ticker> {
        self.tickers.get(key)
    }

    pub fn get_mut(&mut self, key: TickerKey) -> Option<&mut Ticker> {
        self.tickers.get_mut(key)
    }

    /// Tickers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TickerKey, &Ticker)> {
        self.order
            .iter()
            .filter_map(|&key| self.tickers.get(key).map(|ticker| (key, ticker)))
    }

    /// Advances every ticker by `elapsed` and applies its timeline to the
    /// scene. Stops at the first ticker that fails.
    pub fn update(&mut self, elapsed: f32, scene: &mut Scene) -> Result<()> {
        for &key in &self.order {
            if let Some(ticker) = self.tickers.get_mut(key) {
                ticker.update(elapsed, scene)?;
            }
        }
        Ok(())
    }
}
