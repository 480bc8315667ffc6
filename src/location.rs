use std::sync::Mutex;

/// Supplies the currently browsed location as an application-rooted path,
/// e.g. `/app/docs`. Stands in for the host's URL/history integration.
pub trait LocationProvider: Send + Sync {
    fn current(&self) -> String;
}

/// In-memory location, navigable by the embedding application.
pub struct MemoryLocation {
    current: Mutex<String>,
}

impl MemoryLocation {
    pub fn new(initial: impl Into<String>) -> Self {
        MemoryLocation {
            current: Mutex::new(initial.into()),
        }
    }

    pub fn navigate(&self, location: impl Into<String>) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = location.into();
    }
}

impl LocationProvider for MemoryLocation {
    fn current(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_replaces_current_location() {
        let location = MemoryLocation::new("/app");
        assert_eq!(location.current(), "/app");

        location.navigate("/app/docs");
        assert_eq!(location.current(), "/app/docs");
    }
}
