//! Replication wire contract for swing instances.
//!
//! Exactly two scalars travel over the wire, in fixed order:
//!
//! ```text
//! offset  size  field
//! 0       4     swing_time_ticks   i32, little-endian
//! 4       4     squish_factor      f32, little-endian
//! ```
//!
//! There is no version tag. Both sides resolve the phase table out of band
//! (by weapon type) and derive the phase locally from the combo step.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// The authoritative swing scalars a remote instance needs to reproduce the
/// pose deterministically.
///
/// Size: 8 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct SwingSync {
    /// Total swing duration in simulation ticks.
    pub swing_time_ticks: i32,
    /// Squish factor copied from the phase at initialization.
    pub squish_factor: f32,
}

impl SwingSync {
    /// Size of the encoded packet in bytes.
    pub const SIZE: usize = 8;

    /// Creates a new sync packet.
    #[inline]
    #[must_use]
    pub const fn new(swing_time_ticks: i32, squish_factor: f32) -> Self {
        Self {
            swing_time_ticks,
            squish_factor,
        }
    }

    /// Encodes into a fixed array.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.swing_time_ticks.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.squish_factor.to_le_bytes());
        bytes
    }

    /// Encodes into the front of `out`.
    ///
    /// Returns false (writing nothing) if `out` is shorter than [`Self::SIZE`].
    #[inline]
    pub fn write_to(&self, out: &mut [u8]) -> bool {
        if out.len() < Self::SIZE {
            return false;
        }
        out[..Self::SIZE].copy_from_slice(&self.to_bytes());
        true
    }

    /// Decodes from the front of `bytes`.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            swing_time_ticks: i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            squish_factor: f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_is_fixed() {
        let bytes = SwingSync::new(48, 0.9).to_bytes();
        assert_eq!(&bytes[0..4], &48i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &0.9f32.to_le_bytes());
    }

    #[test]
    fn test_short_buffer_rejected() {
        assert!(SwingSync::from_bytes(&[0u8; 7]).is_none());
        let mut out = [0u8; 4];
        assert!(!SwingSync::new(1, 1.0).write_to(&mut out));
        assert_eq!(out, [0u8; 4]);
    }

    #[test]
    fn test_decode_preserves_bits() {
        let sync = SwingSync::new(-3, f32::from_bits(0x3F66_6666));
        let mut out = [0u8; 16];
        assert!(sync.write_to(&mut out));
        let back = SwingSync::from_bytes(&out).unwrap();
        assert_eq!(back.swing_time_ticks, -3);
        assert_eq!(back.squish_factor.to_bits(), 0x3F66_6666);
    }

    #[test]
    fn test_pod_layout_matches_wire_size() {
        assert_eq!(std::mem::size_of::<SwingSync>(), SwingSync::SIZE);
        let sync = SwingSync::new(7, 0.5);
        // Little-endian hosts: the Pod layout is the wire layout.
        if cfg!(target_endian = "little") {
            assert_eq!(bytemuck::bytes_of(&sync), &sync.to_bytes());
        }
    }
}
