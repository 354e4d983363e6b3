#![no_std]

multiversx_sc::imports!();

pub mod types;

use types::{Fingerprint, Proposal, ProposalStatus, VoteDirection};

// ============================================================
// Constants
// ============================================================

/// Number of proposals that may accept votes at the same time
const QUEUE_CAPACITY: usize = 3;

/// Voting window: 3 days in seconds
const VOTING_PERIOD: u64 = 259_200;

/// Decimal precision of the weight unit
const TOKEN_DECIMALS: u32 = 6;

/// Whole-unit supply minted at genesis
const GENESIS_UNITS: u64 = 100;

/// Genesis supply in base units. Constant after init — no mint, no burn.
const GENESIS_SUPPLY: u64 = GENESIS_UNITS * 10u64.pow(TOKEN_DECIMALS);

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait TokenGovernance {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self) {
        let deployer = self.blockchain().get_caller();
        let supply = BigUint::from(GENESIS_SUPPLY);
        self.balances(&deployer).set(&supply);
        self.total_supply().set(&supply);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: transfer
    // Minimal ledger move. Tokens may only move into an empty
    // address; moving out of an address corrects that holder's
    // open votes (see reconcile_transfer).
    // ========================================================

    #[endpoint(transfer)]
    fn transfer(&self, to: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();

        // ── Pre-check: merging two voting histories into one
        //    address is not defined, so the destination must be
        //    empty ──
        require!(
            self.balances(&to).get() == 0u64,
            "Destination is already a holder"
        );

        let balance = self.balances(&caller).get();
        require!(
            amount > 0u64 && amount <= balance,
            "Invalid transfer amount"
        );

        self.balances(&caller).set(&balance - &amount);
        self.balances(&to).set(&amount);

        // ── Post-mutation: walk the open queue and shrink the
        //    caller's recorded vote weight by the moved amount ──
        self.reconcile_transfer(&caller, &amount);

        self.transfer_event(&caller, &to, &amount);
    }

    // ========================================================
    // ENDPOINT: submit
    // Any holder can propose. Eviction of an expired proposal is
    // checked lazily, only here, and only against the oldest
    // queue entry — the queue is never proactively cleaned.
    // ========================================================

    #[endpoint(submit)]
    fn submit(&self, fingerprint: Fingerprint<Self::Api>) -> u64 {
        let caller = self.blockchain().get_caller();
        require!(self.balances(&caller).get() > 0u64, "Not a holder");

        let now = self.blockchain().get_block_timestamp();

        if self.queue().len() == QUEUE_CAPACITY {
            let oldest_id = self.queue().get(1);
            let mut oldest = self.proposals(oldest_id).get();
            require!(oldest.ttl < now, "Proposal queue is full");

            oldest.status = ProposalStatus::Discarded;
            self.proposals(oldest_id).set(&oldest);
            self.dequeue(oldest_id);
            self.proposal_discarded_event(oldest_id);
        }

        let id = self.proposal_count().get();
        let proposal = Proposal {
            id,
            fingerprint: fingerprint.clone(),
            ttl: now + VOTING_PERIOD,
            for_total: BigUint::zero(),
            against_total: BigUint::zero(),
            status: ProposalStatus::Queued,
        };

        self.proposals(id).set(&proposal);
        self.proposal_count().set(id + 1);
        self.queue().push(&id);

        self.proposal_queued_event(&fingerprint, id);

        id
    }

    // ========================================================
    // ENDPOINT: vote
    // For/Against voting weighted by the caller's current
    // balance. A holder may flip sides any number of times
    // before the proposal resolves or expires.
    // ========================================================

    #[endpoint(vote)]
    fn vote(&self, proposal_id: u64, direction: VoteDirection) {
        let caller = self.blockchain().get_caller();
        require!(
            proposal_id < self.proposal_count().get(),
            "Proposal does not exist"
        );

        let weight = self.balances(&caller).get();
        require!(weight > 0u64, "Not a holder");

        let mut proposal = self.proposals(proposal_id).get();
        let now = self.blockchain().get_block_timestamp();
        require!(now <= proposal.ttl, "Voting period has expired");
        require!(
            proposal.status == ProposalStatus::Queued,
            "Proposal already solved"
        );
        require!(
            direction != VoteDirection::Abstain,
            "Cannot vote abstain"
        );

        let previous = self.votes(proposal_id, &caller).get();
        require!(direction != previous, "Already voted this way");

        // The running totals track the current balance of whoever
        // is on each side, so a flip retracts the caller's present
        // weight from the old side, not the weight cast back then.
        match previous {
            VoteDirection::For => proposal.for_total -= &weight,
            VoteDirection::Against => proposal.against_total -= &weight,
            VoteDirection::Abstain => {}
        }
        match direction {
            VoteDirection::For => proposal.for_total += &weight,
            VoteDirection::Against => proposal.against_total += &weight,
            VoteDirection::Abstain => {}
        }

        self.votes(proposal_id, &caller).set(&direction);
        self.vote_cast_event(&caller, proposal_id, &direction);

        self.check_majority(&mut proposal, &direction);
        self.proposals(proposal_id).set(&proposal);
    }

    // ========================================================
    // INTERNAL: majority detection
    // Only the side that just gained weight can have crossed the
    // threshold; the other side can only have lost weight.
    // ========================================================

    fn check_majority(&self, proposal: &mut Proposal<Self::Api>, direction: &VoteDirection) {
        // Strict majority of the supply read at evaluation time.
        let half = self.total_supply().get() / 2u64;

        match direction {
            VoteDirection::For => {
                if proposal.for_total > half {
                    proposal.status = ProposalStatus::Accepted;
                    self.dequeue(proposal.id);
                    self.proposal_accepted_event(proposal.id);
                }
            }
            VoteDirection::Against => {
                if proposal.against_total > half {
                    proposal.status = ProposalStatus::Declined;
                    self.dequeue(proposal.id);
                    self.proposal_declined_event(proposal.id);
                }
            }
            VoteDirection::Abstain => {}
        }
    }

    // ========================================================
    // INTERNAL: transfer reconciliation
    // A vote is a live pointer to "this holder backs this side
    // with their present balance". Moving tokens out shrinks the
    // contribution; moving everything out nullifies the vote.
    // Terminal proposals keep their tallies frozen, so only the
    // queue is scanned.
    // ========================================================

    fn reconcile_transfer(&self, source: &ManagedAddress, amount: &BigUint) {
        let drained = self.balances(source).get() == 0u64;
        let queue_len = self.queue().len();

        for i in 1..=queue_len {
            let proposal_id = self.queue().get(i);
            let recorded = self.votes(proposal_id, source).get();
            if recorded == VoteDirection::Abstain {
                continue;
            }

            let mut proposal = self.proposals(proposal_id).get();
            match recorded {
                VoteDirection::For => proposal.for_total -= amount,
                VoteDirection::Against => proposal.against_total -= amount,
                VoteDirection::Abstain => {}
            }
            self.proposals(proposal_id).set(&proposal);

            if drained {
                self.votes(proposal_id, source).clear();
                self.vote_cast_event(source, proposal_id, &VoteDirection::Abstain);
            }
        }
    }

    // ========================================================
    // INTERNAL: ordered queue removal
    // Eviction picks the oldest entry, so insertion order must
    // survive removal: shift the tail left instead of swapping.
    // O(QUEUE_CAPACITY) by construction.
    // ========================================================

    fn dequeue(&self, proposal_id: u64) {
        let len = self.queue().len();
        let mut position = 0usize;
        for i in 1..=len {
            if self.queue().get(i) == proposal_id {
                position = i;
                break;
            }
        }
        if position == 0 {
            return;
        }

        for i in position..len {
            let next = self.queue().get(i + 1);
            self.queue().set(i, &next);
        }
        self.queue().swap_remove(len);
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(getVote)]
    fn get_vote(&self, holder: &ManagedAddress, proposal_id: u64) -> VoteDirection {
        require!(
            proposal_id < self.proposal_count().get(),
            "Proposal does not exist"
        );
        require!(self.balances(holder).get() > 0u64, "Not a holder");
        self.votes(proposal_id, holder).get()
    }

    #[view(getQueuedCount)]
    fn get_queued_count(&self) -> u64 {
        let now = self.blockchain().get_block_timestamp();
        let mut live = 0u64;
        for proposal_id in self.queue().iter() {
            // Expired-but-not-yet-evicted entries stay in the queue
            // until the next submit; they no longer count as live.
            if self.proposals(proposal_id).get().ttl >= now {
                live += 1;
            }
        }
        live
    }

    #[view(getProposal)]
    fn get_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        require!(
            proposal_id < self.proposal_count().get(),
            "Proposal does not exist"
        );
        self.proposals(proposal_id).get()
    }

    #[view(getProposals)]
    fn get_proposals(&self, from: u64, count: u64) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        let total = self.proposal_count().get();
        let end = core::cmp::min(from.saturating_add(count), total);

        for proposal_id in from..end {
            result.push(self.proposals(proposal_id).get());
        }
        result
    }

    #[view(getQueue)]
    fn get_queue(&self) -> MultiValueEncoded<u64> {
        let mut result = MultiValueEncoded::new();
        for proposal_id in self.queue().iter() {
            result.push(proposal_id);
        }
        result
    }

    #[view(getBalance)]
    fn get_balance(&self, holder: &ManagedAddress) -> BigUint {
        self.balances(holder).get()
    }

    #[view(getTotalSupply)]
    fn get_total_supply(&self) -> BigUint {
        self.total_supply().get()
    }

    #[view(getQueueCapacity)]
    fn get_queue_capacity(&self) -> u32 {
        QUEUE_CAPACITY as u32
    }

    #[view(getVotingPeriod)]
    fn get_voting_period(&self) -> u64 {
        VOTING_PERIOD
    }

    #[view(getTokenDecimals)]
    fn get_token_decimals(&self) -> u32 {
        TOKEN_DECIMALS
    }

    #[view(getGenesisSupply)]
    fn get_genesis_supply(&self) -> BigUint {
        BigUint::from(GENESIS_SUPPLY)
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("transfer")]
    fn transfer_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("proposalQueued")]
    fn proposal_queued_event(
        &self,
        #[indexed] fingerprint: &Fingerprint<Self::Api>,
        #[indexed] proposal_id: u64,
    );

    #[event("voteCast")]
    fn vote_cast_event(
        &self,
        #[indexed] voter: &ManagedAddress,
        #[indexed] proposal_id: u64,
        direction: &VoteDirection,
    );

    #[event("proposalAccepted")]
    fn proposal_accepted_event(&self, #[indexed] proposal_id: u64);

    #[event("proposalDeclined")]
    fn proposal_declined_event(&self, #[indexed] proposal_id: u64);

    #[event("proposalDiscarded")]
    fn proposal_discarded_event(&self, #[indexed] proposal_id: u64);

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Ledger ──

    #[storage_mapper("balances")]
    fn balances(&self, holder: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("totalSupply")]
    fn total_supply(&self) -> SingleValueMapper<BigUint>;

    // ── Archive ──

    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, proposal_id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    // ── Queue ──

    #[storage_mapper("queue")]
    fn queue(&self) -> VecMapper<u64>;

    // ── Votes: sparse two-level map, unset decodes to Abstain ──

    #[storage_mapper("votes")]
    fn votes(
        &self,
        proposal_id: u64,
        holder: &ManagedAddress,
    ) -> SingleValueMapper<VoteDirection>;
}
