//! Component trait and implementations

/// Marker trait for components
pub trait Component: 'static + Send + Sync {}

// Shadow components
impl Component for crate::shadow::ShadowCaster {}
impl Component for crate::shadow::CompositeShadowCaster {}
