//! Error types surfaced by camera control transitions.
use std::fmt;

/// Reasons a control request could not be honoured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// The rig holds no slot other than the orbit-reserved one.
    NoFlyCamera,
    /// The rig has no orbit-reserved slot.
    NoOrbitCamera,
    /// The registry is empty or every entry is excluded.
    NoEligibleTarget { registered: usize },
    /// The target's position reference no longer resolves.
    TargetUnresolved { name: String },
    /// A target with this display name is already registered.
    DuplicateTarget { name: String },
}

impl ControlError {
    pub fn no_eligible_target(registered: usize) -> Self {
        Self::NoEligibleTarget { registered }
    }

    pub fn target_unresolved(name: impl Into<String>) -> Self {
        Self::TargetUnresolved { name: name.into() }
    }

    pub fn duplicate_target(name: impl Into<String>) -> Self {
        Self::DuplicateTarget { name: name.into() }
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFlyCamera => write!(f, "No fly camera available"),
            Self::NoOrbitCamera => write!(f, "No orbit camera reserved"),
            Self::NoEligibleTarget { registered } => {
                write!(f, "No orbit target available ({} registered)", registered)
            }
            Self::TargetUnresolved { name } => {
                write!(f, "Orbit target '{}' is no longer in the scene", name)
            }
            Self::DuplicateTarget { name } => {
                write!(f, "Target '{}' is already registered", name)
            }
        }
    }
}

impl std::error::Error for ControlError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_target() {
        let error = ControlError::duplicate_target("house1");
        assert!(error.to_string().contains("house1"));

        let error = ControlError::target_unresolved("cop");
        assert!(error.to_string().contains("cop"));

        let error = ControlError::no_eligible_target(3);
        assert_eq!(error, ControlError::NoEligibleTarget { registered: 3 });
        assert!(error.to_string().contains("3 registered"));
    }
}
