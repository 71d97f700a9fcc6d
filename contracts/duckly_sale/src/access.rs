//! Owner gate composed around administrative entry points.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::Error;

/// Require `caller` to have signed and to be the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let owner = storage::get_owner(env)?;
    if *caller != owner {
        return Err(Error::NotOwner);
    }
    Ok(())
}
