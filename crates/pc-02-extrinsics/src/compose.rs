//! # Chain-Aware Composition
//!
//! The two-step preimage protocol: proposing a call whose content is large
//! means first checking whether its preimage is already registered. If it
//! is, only the proposal call goes out; if not, a note-preimage call is
//! bundled ahead of it in the same atomic batch. Either way the chain's
//! dedup-by-hash semantics are respected and no redundant storage write is
//! submitted.

use crate::builders::democracy;
use crate::errors::BuildError;
use pc_01_connection::ChainRpc;
use shared_types::{Balance, Call};
use tracing::debug;

/// Compose a democracy proposal for `proposal`, noting its preimage only if
/// the chain does not hold it yet.
pub async fn propose_with_preimage(
    rpc: &dyn ChainRpc,
    proposal: &Call,
    deposit: Balance,
) -> Result<Call, BuildError> {
    let hash = proposal.hash();
    let propose = democracy::propose_by_hash(hash, deposit);

    if rpc.preimage_exists(&hash).await? {
        debug!("[pc-02] preimage {hash} already noted, proposing directly");
        return Ok(propose);
    }

    debug!("[pc-02] preimage {hash} not found, bundling note + propose");
    Ok(Call::batch_all(vec![
        democracy::note_preimage(proposal),
        propose,
    ]))
}
