use crate::StoreTarget;

// One physical connection serializes every statement over the shared handle.
const DEFAULT_MAX_CONNECTIONS: u32 = 1;

#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub target: StoreTarget,
    pub max_connections: u32,
}

impl ConnectionSettings {
    pub fn new(target: StoreTarget) -> Self {
        Self {
            target,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(StoreTarget::SqliteMemory)
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }
}
