//! Owner and pause gates composed around the entry points.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::Error;

/// Require `caller` to have signed and to be the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != storage::get_owner(env)? {
        return Err(Error::NotOwner);
    }
    Ok(())
}

pub fn require_not_paused(env: &Env) -> Result<(), Error> {
    if storage::is_paused(env) {
        return Err(Error::ContractPaused);
    }
    Ok(())
}

pub fn require_paused(env: &Env) -> Result<(), Error> {
    if !storage::is_paused(env) {
        return Err(Error::NotPaused);
    }
    Ok(())
}
