//! Numeric backend for flat array arithmetic.
//!
//! The dense fast path hands whole buffers to a provider for the simple
//! elementwise operations (add, subtract, scale). Which provider is used is
//! a runtime choice, made through [`Control`](crate::Control).
//!
//! Available providers:
//! - `managed`: rayon-chunked loops (default)
//! - `sequential`: plain scalar loops

pub mod managed;
pub mod sequential;

pub use managed::ManagedProvider;
pub use sequential::SequentialProvider;

use crate::control::{Control, ProviderKind};

/// Flat array kernels over equally sized slices.
///
/// Callers guarantee that every slice passed to one call has the same
/// length; implementations may panic otherwise.
pub trait LinearAlgebraProvider: Send + Sync {
    /// `result[i] = x[i] + y[i]`
    fn add_arrays(&self, x: &[f64], y: &[f64], result: &mut [f64]);

    /// `result[i] = x[i] - y[i]`
    fn subtract_arrays(&self, x: &[f64], y: &[f64], result: &mut [f64]);

    /// `x[i] *= alpha`, in place.
    fn scale_array(&self, alpha: f64, x: &mut [f64]);

    /// `result[i] = x[i] * y[i]`
    fn pointwise_multiply_arrays(&self, x: &[f64], y: &[f64], result: &mut [f64]);
}

static MANAGED: ManagedProvider = ManagedProvider;
static SEQUENTIAL: SequentialProvider = SequentialProvider;

/// The provider selected by the global [`Control`].
pub fn provider() -> &'static dyn LinearAlgebraProvider {
    provider_for(Control::global().provider)
}

/// The provider for an explicit [`ProviderKind`].
pub fn provider_for(kind: ProviderKind) -> &'static dyn LinearAlgebraProvider {
    match kind {
        ProviderKind::Managed => &MANAGED,
        ProviderKind::Sequential => &SEQUENTIAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers_agree() {
        let x: Vec<f64> = (0..1000).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = (0..1000).map(|i| (i % 7) as f64 - 3.0).collect();

        for op in 0..3 {
            let mut managed = vec![0.0; x.len()];
            let mut sequential = vec![0.0; x.len()];
            for (kind, out) in [
                (ProviderKind::Managed, &mut managed),
                (ProviderKind::Sequential, &mut sequential),
            ] {
                let p = provider_for(kind);
                match op {
                    0 => p.add_arrays(&x, &y, out),
                    1 => p.subtract_arrays(&x, &y, out),
                    _ => p.pointwise_multiply_arrays(&x, &y, out),
                }
            }
            assert_eq!(managed, sequential, "op {}", op);
        }

        let mut a = x.clone();
        let mut b = x.clone();
        provider_for(ProviderKind::Managed).scale_array(-2.0, &mut a);
        provider_for(ProviderKind::Sequential).scale_array(-2.0, &mut b);
        assert_eq!(a, b);
        assert_eq!(a[3], -3.0);
    }
}
