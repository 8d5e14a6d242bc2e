use thiserror::Error;

/// Feature of the controller that depends on a camera capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Pan,
    Zoom,
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feature::Pan => write!(f, "pan"),
            Feature::Zoom => write!(f, "dolly/zoom"),
        }
    }
}

/// Problems the controller recovers from locally by disabling a feature.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlsError {
    #[error("camera is neither perspective nor orthographic - {0} disabled")]
    UnsupportedProjection(Feature),
}
