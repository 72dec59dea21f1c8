//! Port allocation.
//!
//! Each process type owns a block of [`PORT_STRIDE`] ports starting at
//! `base + type_index * PORT_STRIDE`; instance `n` gets offset `n - 1` in its
//! block. Blocks only stay disjoint while every type runs at most
//! `PORT_STRIDE` instances. The export pipeline enforces that limit before
//! writing anything; this function does not.

use thiserror::Error;

/// Width of the port block reserved for one process type.
pub const PORT_STRIDE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// Instance numbers are 1-based.
    #[error("instance numbers start at 1")]
    ZeroInstance,

    #[error("port for process type #{type_index} instance {instance} exceeds 65535 (base {base})")]
    Overflow {
        type_index: usize,
        instance: u32,
        base: u16,
    },
}

/// Port for instance `instance` (1-based) of the process type at
/// `type_index` (0-based, declared order).
pub fn port_for(type_index: usize, instance: u32, base: u16) -> Result<u16, PortError> {
    if instance == 0 {
        return Err(PortError::ZeroInstance);
    }
    let overflow = || PortError::Overflow {
        type_index,
        instance,
        base,
    };
    let index = u32::try_from(type_index).map_err(|_| overflow())?;
    let port = index
        .checked_mul(PORT_STRIDE)
        .and_then(|block| block.checked_add(u32::from(base)))
        .and_then(|p| p.checked_add(instance - 1))
        .ok_or_else(overflow)?;
    u16::try_from(port).map_err(|_| overflow())
}
