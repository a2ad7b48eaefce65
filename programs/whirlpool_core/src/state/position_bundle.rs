use crate::error::ErrorCode;
use crate::utils::constants::{POSITION_BITMAP_USIZE, POSITION_BUNDLE_SIZE};
use anchor_lang::prelude::*;

/// Up to `POSITION_BUNDLE_SIZE` positions owned through a single bundle mint.
///
/// Slot occupancy is a 256-bit bitmap; bit `i` is set while bundled position `i` is open.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct PositionBundle {
    pub position_bundle_mint: Pubkey,
    pub position_bitmap: [u8; POSITION_BITMAP_USIZE],
}

impl PositionBundle {
    pub const LEN: usize = 8 + 32 + POSITION_BITMAP_USIZE;

    pub fn initialize(&mut self, position_bundle_mint: Pubkey) {
        self.position_bundle_mint = position_bundle_mint;
        self.position_bitmap = [0; POSITION_BITMAP_USIZE];
    }

    /// A bundle can be deleted once every slot is closed.
    pub fn is_deletable(&self) -> bool {
        self.position_bitmap.iter().all(|byte| *byte == 0)
    }

    pub fn is_bundle_index_in_use(&self, bundle_index: u16) -> Result<bool> {
        let (byte, mask) = Self::slot(bundle_index)?;
        Ok(self.position_bitmap[byte] & mask != 0)
    }

    pub fn open_bundled_position(&mut self, bundle_index: u16) -> Result<()> {
        let (byte, mask) = Self::slot(bundle_index)?;
        require!(
            self.position_bitmap[byte] & mask == 0,
            ErrorCode::BundledPositionAlreadyOpened
        );
        self.position_bitmap[byte] |= mask;
        Ok(())
    }

    pub fn close_bundled_position(&mut self, bundle_index: u16) -> Result<()> {
        let (byte, mask) = Self::slot(bundle_index)?;
        require!(
            self.position_bitmap[byte] & mask != 0,
            ErrorCode::BundledPositionNotOpened
        );
        self.position_bitmap[byte] &= !mask;
        Ok(())
    }

    /// Lowest free slot, if any.
    pub fn first_unoccupied_index(&self) -> Option<u16> {
        (0..POSITION_BUNDLE_SIZE).find(|index| self.is_bundle_index_in_use(*index).ok() == Some(false))
    }

    fn slot(bundle_index: u16) -> Result<(usize, u8)> {
        require!(
            bundle_index < POSITION_BUNDLE_SIZE,
            ErrorCode::InvalidBundleIndex
        );
        Ok((usize::from(bundle_index / 8), 1u8 << (bundle_index % 8)))
    }
}
