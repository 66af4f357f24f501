//! Emission options.

use brig_format::constants::CHUNK_SIZE;
use brig_format::{MachineModel, Profile};

/// Settings fixed for the lifetime of one [`crate::BrigUnit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// Written to the version directive.
    pub profile: Profile,
    /// Written to the version directive.
    pub machine_model: MachineModel,
    /// Section chunk capacity. Power of two, at least 64.
    pub chunk_size: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            profile: Profile::Full,
            machine_model: MachineModel::Large,
            chunk_size: CHUNK_SIZE,
        }
    }
}

impl EmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_machine_model(mut self, machine_model: MachineModel) -> Self {
        self.machine_model = machine_model;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}
