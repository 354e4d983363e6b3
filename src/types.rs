multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Fixed-size digest of the off-chain proposal content. Opaque to the
/// contract; not required to be unique across proposals.
pub type Fingerprint<M> = ManagedByteArray<M, 32>;

// ============================================================
// Proposal Status — lifecycle states
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub enum ProposalStatus {
    /// In the queue, open for voting.
    Queued,
    /// For side exceeded 50% of total supply. Terminal.
    Accepted,
    /// Against side exceeded 50% of total supply. Terminal.
    Declined,
    /// Expired in a full queue and evicted on a later submit. Terminal.
    Discarded,
}

// ============================================================
// Vote Direction
// ============================================================

/// Abstain must stay the first variant: an unset storage entry decodes
/// to discriminant 0, which doubles as "never voted".
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub enum VoteDirection {
    Abstain,
    For,
    Against,
}

// ============================================================
// Proposal — the core governance record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    /// Equal to the proposal's index in the archive. Never reused.
    pub id: u64,
    pub fingerprint: Fingerprint<M>,
    /// Absolute expiry timestamp: creation time + voting window.
    pub ttl: u64,
    /// Running weight of the holders currently on the For side.
    pub for_total: BigUint<M>,
    /// Running weight of the holders currently on the Against side.
    pub against_total: BigUint<M>,
    pub status: ProposalStatus,
}
