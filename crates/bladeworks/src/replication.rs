//! Replication shim.
//!
//! A remote peer rebuilds a swing from its weapon type and combo step
//! (agreed out of band) plus the two scalars carried by [`SwingSync`].
//! Everything else, pose and trail included, is recomputed locally.

use bladeworks_shared::SwingSync;

use crate::instance::SwingInstance;

/// Writes `instance`'s sync packet into the front of `out`.
///
/// Returns false, writing nothing, if `out` is shorter than
/// [`SwingSync::SIZE`].
pub fn encode_swing(instance: &SwingInstance, out: &mut [u8]) -> bool {
    instance.sync_state().write_to(out)
}

/// Reads a sync packet. `None` for short buffers.
#[must_use]
pub fn decode_swing(bytes: &[u8]) -> Option<SwingSync> {
    SwingSync::from_bytes(bytes)
}

/// Reads a sync packet and applies it to `instance`.
///
/// Returns false, leaving the instance untouched, for short buffers.
pub fn apply_packet(instance: &mut SwingInstance, bytes: &[u8]) -> bool {
    match decode_swing(bytes) {
        Some(sync) => {
            instance.apply_sync(sync);
            true
        }
        None => false,
    }
}
