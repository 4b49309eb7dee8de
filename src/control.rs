//! Runtime configuration: which numeric provider to use and how large a
//! problem must be before kernels fan out across threads.
//!
//! A process-wide [`Control`] is read from the environment on first use:
//!
//! - `DENSEMAT_PROVIDER` - `managed` (default) or `sequential`
//! - `DENSEMAT_PARALLELIZE_ORDER` - minimum dimension for the multiply family
//! - `DENSEMAT_PARALLELIZE_ELEMENTS` - minimum element count for elementwise work
//!
//! ```
//! use densemat::{Control, ProviderKind};
//!
//! let control = Control::from_lookup(|key| match key {
//!     "DENSEMAT_PROVIDER" => Some("sequential".to_string()),
//!     _ => None,
//! });
//! assert_eq!(control.provider, ProviderKind::Sequential);
//! ```

use log::{debug, warn};
use std::str::FromStr;
use std::sync::{OnceLock, PoisonError, RwLock};

pub const PROVIDER_VAR: &str = "DENSEMAT_PROVIDER";
pub const PARALLELIZE_ORDER_VAR: &str = "DENSEMAT_PARALLELIZE_ORDER";
pub const PARALLELIZE_ELEMENTS_VAR: &str = "DENSEMAT_PARALLELIZE_ELEMENTS";

/// Which [`LinearAlgebraProvider`](crate::provider::LinearAlgebraProvider)
/// backs flat array arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// rayon-backed chunked loops.
    #[default]
    Managed,
    /// Plain single-threaded loops.
    Sequential,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "managed" => Ok(ProviderKind::Managed),
            "sequential" => Ok(ProviderKind::Sequential),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// Settings consulted by every kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub provider: ProviderKind,
    /// Multiply-family kernels and transpose go parallel once the larger
    /// result dimension reaches this order.
    pub parallelize_order: usize,
    /// Elementwise kernels, reductions and random fills go parallel once
    /// they touch at least this many elements.
    pub parallelize_elements: usize,
}

impl Default for Control {
    fn default() -> Self {
        Control {
            provider: ProviderKind::Managed,
            parallelize_order: 64,
            parallelize_elements: 300,
        }
    }
}

static GLOBAL: OnceLock<RwLock<Control>> = OnceLock::new();

fn global_cell() -> &'static RwLock<Control> {
    GLOBAL.get_or_init(|| {
        let control = Control::from_env();
        debug!("densemat control initialised: {:?}", control);
        RwLock::new(control)
    })
}

impl Control {
    /// Builds settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Missing keys keep the
    /// default; unparseable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut control = Control::default();
        if let Some(value) = lookup(PROVIDER_VAR) {
            match value.parse() {
                Ok(kind) => control.provider = kind,
                Err(e) => warn!("ignoring {}: {}", PROVIDER_VAR, e),
            }
        }
        if let Some(order) = parse_count(&lookup, PARALLELIZE_ORDER_VAR) {
            control.parallelize_order = order;
        }
        if let Some(elements) = parse_count(&lookup, PARALLELIZE_ELEMENTS_VAR) {
            control.parallelize_elements = elements;
        }
        control
    }

    /// Snapshot of the process-wide settings.
    pub fn global() -> Control {
        *global_cell()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the process-wide settings. Operations already running keep
    /// the snapshot they started with.
    pub fn set_global(control: Control) {
        debug!("densemat control replaced: {:?}", control);
        *global_cell()
            .write()
            .unwrap_or_else(PoisonError::into_inner) = control;
    }
}

fn parse_count<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)?;
    match value.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("ignoring {}={:?}: {}", key, value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Control::from_lookup(|_| None), Control::default());
    }

    #[test]
    fn reads_every_key() {
        let control = Control::from_lookup(lookup_from(&[
            (PROVIDER_VAR, " Sequential "),
            (PARALLELIZE_ORDER_VAR, "128"),
            (PARALLELIZE_ELEMENTS_VAR, "0"),
        ]));
        assert_eq!(control.provider, ProviderKind::Sequential);
        assert_eq!(control.parallelize_order, 128);
        assert_eq!(control.parallelize_elements, 0);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let control = Control::from_lookup(lookup_from(&[
            (PROVIDER_VAR, "mkl"),
            (PARALLELIZE_ORDER_VAR, "-3"),
        ]));
        assert_eq!(control, Control::default());
    }
}
