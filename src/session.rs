//! Reactive generator state.
//!
//! A [`GeneratorSession`] owns the current [`GenerationConfig`] and the
//! [`Password`] generated from it. Every setter compares the new
//! configuration against the previous one; when they differ the password is
//! regenerated from scratch and registered listeners are notified. Writing
//! an identical value is a no-op.
//!
//! The session is created ("mounted") with an initial configuration and
//! generates immediately, so a password is always available. Dropping the
//! session drops the password.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::generator::{self, GenerationConfig, Password, MAX_LENGTH, MIN_LENGTH};

/// Handle returned by [`GeneratorSession::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GenerationConfig, &Password)>;

/// Result of a length update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUpdate {
    /// The requested length was already active
    Unchanged,
    /// The requested length was applied as-is
    Applied(usize),
    /// The requested length was out of range and clamped; the password
    /// is regenerated only if the clamped value differs from the old one
    Clamped { requested: usize, applied: usize },
}

pub struct GeneratorSession<R = StdRng> {
    config: GenerationConfig,
    password: Password,
    rng: R,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl GeneratorSession<StdRng> {
    /// Mount a session seeded from OS entropy.
    pub fn mount(config: GenerationConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Mount a session with `GenerationConfig::default()`.
    pub fn mount_default() -> Result<Self> {
        Self::mount(GenerationConfig::default())
    }
}

impl<R: Rng> GeneratorSession<R> {
    /// Mount a session with a caller-supplied random source.
    ///
    /// The initial length is clamped into range before the first password
    /// is generated.
    pub fn with_rng(mut config: GenerationConfig, mut rng: R) -> Result<Self> {
        config.length = GenerationConfig::clamp_length(config.length);
        let password = generator::generate(&config, &mut rng)?;
        tracing::debug!(%config, "session mounted");
        Ok(Self {
            config,
            password,
            rng,
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Register a change listener.
    ///
    /// Listeners run after every regeneration, in registration order, with
    /// the configuration and the fresh password.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GenerationConfig, &Password) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Set the length, clamping into `MIN_LENGTH..=MAX_LENGTH`.
    pub fn set_length(&mut self, length: usize) -> Result<LengthUpdate> {
        let applied = GenerationConfig::clamp_length(length);
        if applied != length {
            tracing::warn!(requested = length, applied, "length out of range, clamped");
        }

        let changed = self.update(|c| c.length = applied)?;
        Ok(if applied != length {
            LengthUpdate::Clamped {
                requested: length,
                applied,
            }
        } else if changed {
            LengthUpdate::Applied(applied)
        } else {
            LengthUpdate::Unchanged
        })
    }

    /// Set the length from raw text input.
    ///
    /// Unparsable input is ignored: the configuration and password stay as
    /// they were and [`Error::Invalid`] is returned.
    pub fn set_length_input(&mut self, input: &str) -> Result<LengthUpdate> {
        let trimmed = input.trim();
        match trimmed.parse::<usize>() {
            Ok(length) => self.set_length(length),
            Err(_) => {
                tracing::warn!(input = trimmed, "ignoring non-numeric length");
                Err(Error::invalid(format!(
                    "length must be a number between {MIN_LENGTH} and {MAX_LENGTH}, got '{trimmed}'"
                )))
            }
        }
    }

    /// Move the length by `delta`, saturating at the range ends.
    pub fn nudge_length(&mut self, delta: isize) -> Result<LengthUpdate> {
        let target = self.config.length.saturating_add_signed(delta);
        self.set_length(GenerationConfig::clamp_length(target))
    }

    /// Returns whether the password was regenerated.
    pub fn set_include_digits(&mut self, on: bool) -> Result<bool> {
        self.update(|c| c.include_digits = on)
    }

    /// Returns whether the password was regenerated.
    pub fn set_include_symbols(&mut self, on: bool) -> Result<bool> {
        self.update(|c| c.include_symbols = on)
    }

    pub fn toggle_digits(&mut self) -> Result<bool> {
        let on = !self.config.include_digits;
        self.set_include_digits(on)
    }

    pub fn toggle_symbols(&mut self) -> Result<bool> {
        let on = !self.config.include_symbols;
        self.set_include_symbols(on)
    }

    /// Replace the whole configuration. The length is clamped.
    pub fn apply(&mut self, config: GenerationConfig) -> Result<bool> {
        self.update(|c| {
            *c = config;
            c.length = GenerationConfig::clamp_length(config.length);
        })
    }

    /// Generate a fresh password without changing the configuration.
    pub fn regenerate(&mut self) -> Result<&Password> {
        self.refresh()?;
        Ok(&self.password)
    }

    fn update(&mut self, f: impl FnOnce(&mut GenerationConfig)) -> Result<bool> {
        let mut next = self.config;
        f(&mut next);
        if next == self.config {
            return Ok(false);
        }

        tracing::debug!(from = %self.config, to = %next, "config changed");
        let password = generator::generate(&next, &mut self.rng)?;
        self.config = next;
        self.password = password;
        self.notify();
        Ok(true)
    }

    fn refresh(&mut self) -> Result<()> {
        self.password = generator::generate(&self.config, &mut self.rng)?;
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.config, &self.password);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session(config: GenerationConfig) -> GeneratorSession<StdRng> {
        GeneratorSession::with_rng(config, StdRng::seed_from_u64(7)).expect("mount")
    }

    fn counter(session: &mut GeneratorSession<StdRng>) -> Rc<RefCell<Vec<GenerationConfig>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |config, password| {
            assert_eq!(password.len(), config.length);
            sink.borrow_mut().push(*config);
        });
        seen
    }

    #[test]
    fn test_mount_generates_with_defaults() {
        let session = session(GenerationConfig::default());
        assert_eq!(session.password().len(), 15);
        assert!(session.password().as_str().chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_mount_default_is_fifteen_letters() {
        let session = GeneratorSession::mount_default().expect("mount");
        assert_eq!(session.config(), &GenerationConfig::default());
        assert_eq!(session.password().len(), 15);
        assert!(session.password().as_str().chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_mount_clamps_initial_length() {
        let session = session(GenerationConfig::new(40, false, false));
        assert_eq!(session.config().length, MAX_LENGTH);
        assert_eq!(session.password().len(), MAX_LENGTH);
    }

    #[test]
    fn test_length_change_regenerates_and_notifies() {
        let mut session = session(GenerationConfig::default());
        let seen = counter(&mut session);

        assert_eq!(session.set_length(10).expect("set"), LengthUpdate::Applied(10));
        assert_eq!(session.password().len(), 10);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_same_value_is_noop() {
        let mut session = session(GenerationConfig::default());
        let seen = counter(&mut session);
        let before = session.password().clone();

        assert_eq!(session.set_length(15).expect("set"), LengthUpdate::Unchanged);
        assert!(!session.set_include_digits(false).expect("set"));
        assert!(!session.apply(GenerationConfig::default()).expect("apply"));

        assert!(seen.borrow().is_empty());
        assert_eq!(session.password(), &before);
    }

    #[test]
    fn test_out_of_range_length_is_clamped() {
        let mut session = session(GenerationConfig::new(10, false, false));

        let update = session.set_length(3).expect("set");
        assert_eq!(
            update,
            LengthUpdate::Clamped {
                requested: 3,
                applied: MIN_LENGTH
            }
        );
        assert_eq!(session.password().len(), MIN_LENGTH);

        let update = session.set_length(0).expect("set");
        assert!(matches!(update, LengthUpdate::Clamped { requested: 0, .. }));
        assert_eq!(session.config().length, MIN_LENGTH);
        assert!(!session.password().is_empty());
    }

    #[test]
    fn test_non_numeric_length_is_ignored() {
        let mut session = session(GenerationConfig::new(9, true, false));
        let before = session.password().clone();

        for bad in ["", "abc", "-4", "7.5"] {
            let err = session.set_length_input(bad).expect_err("rejected");
            assert!(matches!(err, Error::Invalid { .. }));
        }
        assert_eq!(session.config(), &GenerationConfig::new(9, true, false));
        assert_eq!(session.password(), &before);

        assert_eq!(
            session.set_length_input(" 12 ").expect("set"),
            LengthUpdate::Applied(12)
        );
    }

    #[test]
    fn test_toggles_change_alphabet() {
        let mut session = session(GenerationConfig::new(15, false, false));
        let seen = counter(&mut session);

        assert!(session.toggle_digits().expect("toggle"));
        assert!(session.toggle_symbols().expect("toggle"));
        assert_eq!(session.config(), &GenerationConfig::new(15, true, true));
        let alphabet = session.config().alphabet();
        assert!(session.password().as_str().chars().all(|c| alphabet.contains(c)));

        assert!(session.toggle_digits().expect("toggle"));
        assert!(!session.password().as_str().chars().any(|c| c.is_ascii_digit()));
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_length_round_trip_keeps_invariants() {
        let mut session = session(GenerationConfig::new(10, true, false));
        session.set_length(6).expect("set");
        assert_eq!(session.password().len(), 6);
        session.set_length(10).expect("set");
        assert_eq!(session.password().len(), 10);
        let alphabet = session.config().alphabet();
        assert!(session.password().as_str().chars().all(|c| alphabet.contains(c)));
    }

    #[test]
    fn test_nudge_saturates() {
        let mut session = session(GenerationConfig::new(MAX_LENGTH, false, false));
        assert_eq!(session.nudge_length(1).expect("nudge"), LengthUpdate::Unchanged);
        assert_eq!(session.nudge_length(-1).expect("nudge"), LengthUpdate::Applied(14));

        session.set_length(MIN_LENGTH).expect("set");
        assert_eq!(session.nudge_length(-1).expect("nudge"), LengthUpdate::Unchanged);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut session = session(GenerationConfig::default());
        let hits = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&hits);
        let id = session.subscribe(move |_, _| *sink.borrow_mut() += 1);

        session.set_length(8).expect("set");
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        assert_eq!(session.listener_count(), 0);
        session.set_length(9).expect("set");

        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_regenerate_keeps_config() {
        let mut session = session(GenerationConfig::new(12, true, true));
        let seen = counter(&mut session);
        let len = session.regenerate().expect("regen").len();
        assert_eq!(len, 12);
        assert_eq!(session.config(), &GenerationConfig::new(12, true, true));
        assert_eq!(seen.borrow().len(), 1);
    }
}
