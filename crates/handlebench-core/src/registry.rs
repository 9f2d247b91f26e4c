//! The name → operation table a host consumes once at load time.
//!
//! Bindings walk [`REGISTRY`] and `match` on [`Operation`] to bind each
//! name to their own entry point. The table is the whole public surface.

/// An operation exposed to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `create_sized_handle(size)`: fresh host-owned block.
    SizedHandle,
    /// `create_static_handle()`: the process-wide slot.
    StaticHandle,
}

/// One row of the registration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Name the host exposes the operation under.
    pub name: &'static str,
    /// The operation bound to that name.
    pub op: Operation,
}

/// Name of the sized-handle operation.
pub const SIZED_HANDLE_NAME: &str = "userdata";

/// Name of the static-handle operation.
pub const STATIC_HANDLE_NAME: &str = "lightuserdata";

/// The registration table.
pub const REGISTRY: [RegistryEntry; 2] = [
    RegistryEntry {
        name: SIZED_HANDLE_NAME,
        op: Operation::SizedHandle,
    },
    RegistryEntry {
        name: STATIC_HANDLE_NAME,
        op: Operation::StaticHandle,
    },
];

/// Find the operation registered under `name`.
pub fn lookup(name: &str) -> Option<Operation> {
    REGISTRY.iter().find(|e| e.name == name).map(|e| e.op)
}
