//! Resource System Configuration
//!
//! [`ResourceConfig`] is consumed once when a
//! [`ResourceManager`](crate::assets::ResourceManager) is constructed. All
//! failure policies live here as explicit values rather than process-global
//! flags, so two managers in the same process can run different policies
//! and tests can exercise both sides of every toggle.

/// Policy applied when a loaded resource exceeds the device texture limit.
///
/// The check is advisory instrumentation, not a hard allocation limit: the
/// graphics driver enforces its own limits at upload time. `Warn` keeps the
/// resource and logs; `Fail` makes the fetch itself fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversizePolicy {
    /// Log a warning and keep the resource (default).
    #[default]
    Warn,
    /// Fail the fetch with [`ResourceError::Oversized`].
    ///
    /// [`ResourceError::Oversized`]: crate::errors::ResourceError::Oversized
    Fail,
}

/// Policy applied when a registered loader reports failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadFailurePolicy {
    /// Log the error and substitute a placeholder payload (default).
    ///
    /// A renderer mid-frame should degrade to a missing-texture marker
    /// rather than crash; the substituted payload is always valid.
    #[default]
    Placeholder,
    /// Propagate the loader error to the fetch caller.
    Fail,
}

/// Configuration for a [`ResourceManager`](crate::assets::ResourceManager).
///
/// # Example
///
/// ```rust,ignore
/// // Default: degrade gracefully, advisory size checks.
/// let config = ResourceConfig::default();
///
/// // Strict mode: every failure is surfaced to the caller.
/// let config = ResourceConfig::strict();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceConfig {
    /// Oversized-resource handling. See [`OversizePolicy`].
    pub oversize: OversizePolicy,

    /// Loader-failure handling. See [`LoadFailurePolicy`].
    pub load_failure: LoadFailurePolicy,

    /// Explicit maximum texture dimension override.
    ///
    /// `None` takes the value from the graphics-context limits passed at
    /// manager construction. Set this in headless tests or to clamp assets
    /// below what the device would accept.
    pub max_texture_size: Option<u32>,
}

impl ResourceConfig {
    /// Strict mode: oversized resources and loader failures both fail the
    /// fetch instead of degrading.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            oversize: OversizePolicy::Fail,
            load_failure: LoadFailurePolicy::Fail,
            max_texture_size: None,
        }
    }
}
