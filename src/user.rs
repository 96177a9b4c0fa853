use crate::{constants::MAX_RESERVES, errors::BridgeError, storage};
use soroban_sdk::{panic_with_error, Address, Env};

/// A user's collateral configuration, one bit per reserve id
pub struct UserCollateral {
    pub address: Address, // The user's address
    pub flags: u128,      // Bit `n` is set if reserve `n` counts as collateral for the user
}

impl UserCollateral {
    pub fn load(e: &Env, address: Address) -> Self {
        let flags = storage::get_user_collateral(e, &address);
        Self { address, flags }
    }

    pub fn store(&self, e: &Env) {
        storage::set_user_collateral(e, &self.address, self.flags);
    }

    pub fn is_using_as_collateral(&self, reserve_id: u32) -> bool {
        reserve_id < MAX_RESERVES && (self.flags >> reserve_id) & 1 == 1
    }

    /// Sets or clears the collateral bit of a reserve
    ///
    /// ### Panics
    /// * `MaxReservesReached` - If the reserve id cannot be addressed by the bitmap
    pub fn set_using_as_collateral(&mut self, e: &Env, reserve_id: u32, enabled: bool) {
        if reserve_id >= MAX_RESERVES {
            panic_with_error!(e, BridgeError::MaxReservesReached);
        }
        let bit = 1u128 << reserve_id;
        if enabled {
            self.flags |= bit;
        } else {
            self.flags &= !bit;
        }
    }
}
