// src/ecs/system.rs

use crate::protocol::{Identity, ModuleId};

/// A behaviour module that reads and writes component tables.
///
/// Systems here are driven by caller commands rather than a frame loop, so the
/// trait only carries what the registry needs to wire one in: the logical id
/// it is registered under and the address that receives write access.
pub trait System {
    fn id(&self) -> ModuleId;

    fn address(&self) -> Identity;
}
